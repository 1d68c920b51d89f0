//! Subresource Integrity digests
//!
//! Digests are SHA-384 encoded as standard base64 and prefixed with the
//! algorithm name, the form used by the HTML `integrity` attribute.

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use sha2::{Digest, Sha384};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

const PREFIX: &str = "sha384-";

/// Integrity digest of an in-memory buffer.
pub fn integrity_bytes(bytes: &[u8]) -> String {
    format_digest(Sha384::digest(bytes).as_slice())
}

/// Integrity digest of everything `reader` yields.
pub fn integrity_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha384::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(format_digest(hasher.finalize().as_slice()))
}

/// Integrity digest of the file at `path`.
pub fn integrity_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(Error::EmptyName);
    }
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let digest = integrity_reader(BufReader::new(file)).map_err(|e| Error::io(path, e))?;
    tracing::debug!("integrity {}: {}", path.display(), digest);
    Ok(digest)
}

fn format_digest(digest: &[u8]) -> String {
    format!("{PREFIX}{}", STANDARD.encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn known_digests() {
        assert_eq!(
            integrity_bytes(b""),
            "sha384-OLBgp1GsljhM2TJ+sbHjaiH9txEUvgdDTAzHv2P24donTt6/529l+9Ua0vFImLlb"
        );
        assert_eq!(
            integrity_bytes(b"hello world"),
            "sha384-/b2OdaZ/KfcBpOBAOF4uI5hjA+oQI5IRr5B/y7g1eLPkF8txzmRu/QgZ3YwIjeG9"
        );
        assert_eq!(
            integrity_bytes(b"hello"),
            "sha384-WeF0h3dEjGnea4ANejO7+5/xtGPkQ1TDVTvNucZm+pASWjx5+QOXvfX2oT3oKGhP"
        );
    }

    #[test]
    fn reader_matches_bytes() {
        let data = vec![0xc4u8; 20_000];
        assert_eq!(integrity_reader(data.as_slice()).unwrap(), integrity_bytes(&data));
    }

    #[test]
    fn file_digest() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(b"hello world").expect("write");
        assert_eq!(integrity_file(file.path()).unwrap(), integrity_bytes(b"hello world"));
    }

    #[test]
    fn file_errors() {
        assert!(matches!(integrity_file(""), Err(Error::EmptyName)));
        assert!(matches!(integrity_file("no/such/file"), Err(Error::Io { .. })));
    }
}
