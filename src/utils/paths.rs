//! File name and filesystem helpers

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::Path;

/// Shorten `name` to `width` characters while keeping its extension visible
/// (e.g. width 14: "one_two-three.file" → "one_two-..file").
///
/// When the width cannot even fit the extension, the extension alone is
/// returned.
pub fn trunc_filename(width: usize, name: &str) -> String {
    const TRAIL: &str = ".";
    if width == 0 || name.is_empty() {
        return String::new();
    }
    if name.chars().count() <= width {
        return name.to_string();
    }
    let ext = name.rfind('.').map(|i| &name[i..]).unwrap_or_default();
    let ext_len = ext.chars().count();
    if width <= ext_len {
        return ext.to_string();
    }
    let keep = width - ext_len - TRAIL.len();
    let stem: String = name.chars().take(keep).collect();
    format!("{stem}{TRAIL}{ext}")
}

/// Whether `path` names an existing regular file.
pub fn is_file(path: impl AsRef<Path>) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Whether anything, file or directory, exists at `path`.
pub fn stat(path: impl AsRef<Path>) -> bool {
    fs::metadata(path).is_ok()
}

/// Whether the two files have identical contents.
pub fn file_match(a: impl AsRef<Path>, b: impl AsRef<Path>) -> Result<bool> {
    let (a, b) = (a.as_ref(), b.as_ref());
    if a.as_os_str().is_empty() || b.as_os_str().is_empty() {
        return Err(Error::EmptyName);
    }
    let file_a = File::open(a).map_err(|e| Error::io(a, e))?;
    let file_b = File::open(b).map_err(|e| Error::io(b, e))?;

    let len_a = file_a.metadata().map_err(|e| Error::io(a, e))?.len();
    let len_b = file_b.metadata().map_err(|e| Error::io(b, e))?.len();
    if len_a != len_b {
        tracing::debug!("{} and {} differ in size", a.display(), b.display());
        return Ok(false);
    }

    same_contents(BufReader::new(file_a), BufReader::new(file_b)).map_err(|e| Error::io(a, e))
}

fn same_contents<A: Read, B: Read>(mut a: A, mut b: B) -> io::Result<bool> {
    let mut buf_a = [0u8; 8192];
    let mut buf_b = [0u8; 8192];
    loop {
        let n = read_full(&mut a, &mut buf_a)?;
        let m = read_full(&mut b, &mut buf_b)?;
        if buf_a[..n] != buf_b[..m] {
            return Ok(false);
        }
        if n == 0 {
            return Ok(true);
        }
    }
}

fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
