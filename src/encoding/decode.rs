//! Rendering of classified bytes as UTF-8 text

use super::{cp437, determine_bytes};
use crate::domain::TextEncoding;
use std::borrow::Cow;
use std::io::{self, Read};

impl TextEncoding {
    /// Decode `bytes` as this encoding.
    ///
    /// UTF-8 input loses a leading BOM and has malformed sequences replaced
    /// by U+FFFD. The 8-bit encodings never fail.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        match self {
            TextEncoding::Utf8 => encoding_rs::UTF_8.decode_with_bom_removal(bytes).0,
            TextEncoding::Latin1 => latin1(bytes),
            TextEncoding::Cp437 => {
                if bytes.is_ascii() {
                    ascii(bytes)
                } else {
                    Cow::Owned(cp437::decode(bytes))
                }
            }
        }
    }
}

// encoding_rs maps the ISO-8859-1 label to windows-1252, which differs in
// 0x80..=0x9F, so Latin-1 is decoded directly.
fn latin1(bytes: &[u8]) -> Cow<'_, str> {
    if bytes.is_ascii() {
        return ascii(bytes);
    }
    Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect())
}

fn ascii(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

/// Read a whole stream, classify its prefix and decode it.
///
/// `fallback` is used when the stream is empty and the classifier has no
/// answer.
pub fn decode_to_string<R: Read>(
    mut reader: R,
    fallback: TextEncoding,
) -> io::Result<(TextEncoding, String)> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let encoding = determine_bytes(&bytes).unwrap_or(fallback);
    let text = encoding.decode(&bytes).into_owned();
    Ok((encoding, text))
}
