//! Encoding determination for legacy text artifacts
//!
//! Decides whether a byte stream is best read as UTF-8, ISO-8859-1 or IBM
//! code page 437 by looking at a bounded prefix of it. The decision is a pure
//! function of the prefix: no state survives a call and nothing is logged.
//!
//! The rules, in order:
//!
//! 1. a window that is valid UTF-8 throughout and holds at least one
//!    multi-byte sequence means [`TextEncoding::Utf8`]; plain ASCII does not
//!    count, and neither do valid pairs scattered among invalid bytes (CP437
//!    frames such as `CD BB` are accidentally valid UTF-8),
//! 2. CP437 glyph evidence means [`TextEncoding::Cp437`]: a single control
//!    byte that DOS renders as a glyph (♪ ♫ ⌂ ...) is enough, while
//!    box-drawing bytes only count when they form a run,
//! 3. everything else is [`TextEncoding::Latin1`].

use crate::domain::{Signals, TextEncoding};
use std::io::{ErrorKind, Read};

pub mod cp437;
pub mod decode;

pub use decode::decode_to_string;

/// Maximum number of bytes examined from the start of a stream.
pub const WINDOW_SIZE: usize = 512;

/// Consecutive box-drawing bytes needed before they count as CP437 evidence.
pub const BOX_RUN_LEN: usize = 3;

/// Minimum [`Signals::cp437_score`] for a CP437 classification.
pub const CP437_THRESHOLD: usize = 1;

const ESC: u8 = 0x1b;

/// Classify the first [`WINDOW_SIZE`] bytes of `reader`.
///
/// Returns `None` when the reader yields no bytes, either because it is
/// empty or because its first read fails. A failure after some bytes were
/// read classifies whatever prefix was captured.
pub fn determine<R: Read>(mut reader: R) -> Option<TextEncoding> {
    let mut window = [0u8; WINDOW_SIZE];
    let len = fill_window(&mut reader, &mut window);
    if len == 0 {
        return None;
    }
    Some(classify(&window[..len]))
}

/// Classify an in-memory buffer, looking at most at [`WINDOW_SIZE`] bytes.
pub fn determine_bytes(bytes: &[u8]) -> Option<TextEncoding> {
    if bytes.is_empty() {
        return None;
    }
    Some(classify(window_of(bytes)))
}

/// Like [`determine_bytes`] but also returns the tallies behind the decision.
pub fn explain_bytes(bytes: &[u8]) -> Option<(TextEncoding, Signals)> {
    if bytes.is_empty() {
        return None;
    }
    let signals = scan(window_of(bytes));
    Some((decide(&signals), signals))
}

/// Apply the decision rules to a window that is known to be non-empty.
pub fn classify(window: &[u8]) -> TextEncoding {
    decide(&scan(window))
}

fn decide(signals: &Signals) -> TextEncoding {
    if signals.utf8_sequences > 0 {
        TextEncoding::Utf8
    } else if signals.cp437_score() >= CP437_THRESHOLD {
        TextEncoding::Cp437
    } else {
        TextEncoding::Latin1
    }
}

/// Count the encoding signals present in `window`.
pub fn scan(window: &[u8]) -> Signals {
    let mut signals = Signals { window_len: window.len(), ..Signals::default() };

    // Length of the UTF-8 prefix, or 0 when the window holds invalid bytes
    // anywhere but in a sequence cut off by its end.
    let valid_len = match std::str::from_utf8(window) {
        Ok(text) => text.len(),
        Err(e) if e.error_len().is_none() => e.valid_up_to(),
        Err(_) => 0,
    };
    signals.utf8_sequences = window[..valid_len]
        .iter()
        .filter(|&&byte| !is_utf8_continuation(byte) && !byte.is_ascii())
        .count();
    let encoded = if signals.utf8_sequences > 0 { valid_len } else { 0 };

    let mut run = 0usize;
    for (i, &byte) in window.iter().enumerate() {
        if byte.is_ascii() {
            end_run(&mut signals, &mut run);
            if byte == ESC {
                signals.escapes += 1;
            } else if is_glyph_control(byte) {
                signals.glyph_controls += 1;
            }
        } else if i < encoded {
            end_run(&mut signals, &mut run);
        } else {
            signals.high_bit += 1;
            if is_box_drawing(byte) {
                signals.box_drawing += 1;
                run += 1;
            } else {
                end_run(&mut signals, &mut run);
            }
        }
    }
    end_run(&mut signals, &mut run);

    signals
}

fn is_utf8_continuation(byte: u8) -> bool {
    byte & 0xc0 == 0x80
}

fn end_run(signals: &mut Signals, run: &mut usize) {
    if *run >= BOX_RUN_LEN {
        signals.box_runs += 1;
    }
    *run = 0;
}

/// Control bytes that code page 437 displays as glyphs, plus the house (0x7F).
///
/// NUL, ESC and the whitespace controls (TAB, LF, VT, FF, CR) are excluded:
/// they occur in plain text of every encoding.
pub fn is_glyph_control(byte: u8) -> bool {
    matches!(byte, 0x01..=0x08 | 0x0e..=0x1a | 0x1c..=0x1f | 0x7f)
}

/// Shade, box-drawing and block elements of code page 437.
pub fn is_box_drawing(byte: u8) -> bool {
    (0xb0..=0xdf).contains(&byte)
}

fn window_of(bytes: &[u8]) -> &[u8] {
    &bytes[..bytes.len().min(WINDOW_SIZE)]
}

fn fill_window<R: Read>(reader: &mut R, window: &mut [u8]) -> usize {
    let mut filled = 0;
    while filled < window.len() {
        match reader.read(&mut window[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("unavailable"))
        }
    }

    /// Yields its bytes, then fails instead of reporting end of stream.
    struct PartialReader {
        data: Vec<u8>,
        done: bool,
    }

    impl Read for PartialReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.done {
                return Err(io::Error::new(ErrorKind::BrokenPipe, "gone"));
            }
            let n = self.data.len().min(buf.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.done = true;
            Ok(n)
        }
    }

    /// Hands out one byte per read and interrupts every other call.
    struct TrickleReader {
        data: Vec<u8>,
        pos: usize,
        interrupt: bool,
    }

    impl Read for TrickleReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::from(ErrorKind::Interrupted));
            }
            if self.pos >= self.data.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.data[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    fn with_text(prefix: &[u8], text: &str, suffix: &[u8]) -> Vec<u8> {
        let mut bytes = prefix.to_vec();
        bytes.extend_from_slice(text.as_bytes());
        bytes.extend_from_slice(suffix);
        bytes
    }

    #[test]
    fn empty_or_unavailable_input_has_no_result() {
        assert_eq!(determine(io::empty()), None);
        assert_eq!(determine(FailingReader), None);
        assert_eq!(determine_bytes(&[]), None);
        assert_eq!(explain_bytes(&[]), None);
    }

    #[test]
    fn plain_ascii_is_latin1() {
        assert_eq!(determine("Hello world!".as_bytes()), Some(TextEncoding::Latin1));
        assert_eq!(determine("\nHello world!\n".as_bytes()), Some(TextEncoding::Latin1));
        assert_eq!(determine("tabs\tand\r\ncrlf".as_bytes()), Some(TextEncoding::Latin1));
    }

    #[test]
    fn multibyte_utf8_is_utf8() {
        assert_eq!(determine("Hello world 👾!!!".as_bytes()), Some(TextEncoding::Utf8));
        assert_eq!(determine("naïve".as_bytes()), Some(TextEncoding::Utf8));
        assert_eq!(determine("─── box ───".as_bytes()), Some(TextEncoding::Utf8));
    }

    #[test]
    fn utf8_wins_over_cp437_signals() {
        let bytes = with_text(&[0x7f], " ─── Ω ", &[]);
        assert_eq!(determine_bytes(&bytes), Some(TextEncoding::Utf8));
        let (_, signals) = explain_bytes(&bytes).unwrap();
        assert_eq!(signals.utf8_sequences, 4);
        assert_eq!(signals.glyph_controls, 1);
        assert_eq!(signals.high_bit, 0);
    }

    #[test]
    fn frame_corner_pair_is_not_utf8() {
        // CD BB is also the valid UTF-8 encoding of U+037B.
        let frame = [0xc9, 0xcd, 0xcd, 0xcd, 0xbb];
        assert_eq!(determine_bytes(&frame), Some(TextEncoding::Cp437));
        let (_, signals) = explain_bytes(&frame).unwrap();
        assert_eq!(signals.utf8_sequences, 0);
        assert_eq!(signals.box_drawing, 5);
        assert_eq!(signals.box_runs, 1);
    }

    #[test]
    fn shaded_blocks_among_art_are_cp437() {
        let mut bytes = with_text(b"Greets ", "", &[0xdb, 0xb0, 0xdb, 0xb0, 0xdb, 0xb0]);
        bytes.extend_from_slice(b" to all\r\n");
        bytes.extend_from_slice(&[0xc4; 6]);
        bytes.push(0xb3);
        assert_eq!(determine_bytes(&bytes), Some(TextEncoding::Cp437));
        let (_, signals) = explain_bytes(&bytes).unwrap();
        assert_eq!(signals.box_drawing, 13);
        assert_eq!(signals.box_runs, 2);
    }

    #[test]
    fn valid_pairs_beside_invalid_bytes_are_not_utf8() {
        let bytes = with_text(b"", "naïve caf", &[0xe9, b'!']);
        assert_eq!(determine_bytes(&bytes), Some(TextEncoding::Latin1));
        let (_, signals) = explain_bytes(&bytes).unwrap();
        assert_eq!(signals.utf8_sequences, 0);
        assert_eq!(signals.high_bit, 3);
    }

    #[test]
    fn sequence_cut_by_window_edge_keeps_utf8() {
        let mut bytes = "é".as_bytes().to_vec();
        bytes.extend(std::iter::repeat(b'a').take(WINDOW_SIZE - 3));
        bytes.extend_from_slice("👾".as_bytes());
        assert_eq!(determine_bytes(&bytes), Some(TextEncoding::Utf8));
        let (_, signals) = explain_bytes(&bytes).unwrap();
        assert_eq!(signals.utf8_sequences, 1);
    }

    #[test]
    fn ansi_escape_is_latin1() {
        let bytes = with_text(&[0x1b], "[31mHelloWorld", &[]);
        assert_eq!(determine(Cursor::new(bytes.clone())), Some(TextEncoding::Latin1));
        let (_, signals) = explain_bytes(&bytes).unwrap();
        assert_eq!(signals.escapes, 1);
        assert_eq!(signals.glyph_controls, 0);
    }

    #[test]
    fn isolated_shade_bytes_are_latin1() {
        let bytes = with_text(&[0xb2], " Hello world! ", &[0xb2]);
        assert_eq!(determine(Cursor::new(bytes.clone())), Some(TextEncoding::Latin1));
        let (_, signals) = explain_bytes(&bytes).unwrap();
        assert_eq!(signals.box_drawing, 2);
        assert_eq!(signals.box_runs, 0);
    }

    #[test]
    fn isolated_accent_is_latin1() {
        let bytes = with_text(b"caf", "", &[0xe9]);
        assert_eq!(determine_bytes(&bytes), Some(TextEncoding::Latin1));
        let bytes = with_text(b"Bj\xf6", "rk and friends", &[]);
        assert_eq!(determine_bytes(&bytes), Some(TextEncoding::Latin1));
    }

    #[test]
    fn music_note_controls_are_cp437() {
        let bytes = with_text(&[0x0d, 0x0e], " aah bah cah", &[]);
        assert_eq!(determine(Cursor::new(bytes)), Some(TextEncoding::Cp437));
    }

    #[test]
    fn house_glyph_is_cp437() {
        let bytes = with_text(&[0x7f], " a DOS house glyph ", &[]);
        assert_eq!(determine(Cursor::new(bytes)), Some(TextEncoding::Cp437));
    }

    #[test]
    fn box_drawing_run_is_cp437() {
        let bytes = with_text(&[0xc4; 6], " a DOS line glyph ", &[]);
        assert_eq!(determine(Cursor::new(bytes.clone())), Some(TextEncoding::Cp437));
        let (_, signals) = explain_bytes(&bytes).unwrap();
        assert_eq!(signals.box_drawing, 6);
        assert_eq!(signals.box_runs, 1);
        assert_eq!(signals.utf8_sequences, 0);
    }

    #[test]
    fn short_box_run_is_not_enough() {
        let bytes = with_text(&[0xc4, 0xc4], " two dashes ", &[]);
        assert_eq!(determine_bytes(&bytes), Some(TextEncoding::Latin1));
        let bytes = with_text(&[0xc4, 0xc4, 0xc4], " three dashes ", &[]);
        assert_eq!(determine_bytes(&bytes), Some(TextEncoding::Cp437));
    }

    #[test]
    fn run_at_end_of_window_is_counted() {
        let bytes = with_text(b"title ", "", &[0xdb, 0xdb, 0xdb]);
        assert_eq!(determine_bytes(&bytes), Some(TextEncoding::Cp437));
    }

    #[test]
    fn bytes_past_the_window_are_ignored() {
        let mut bytes = vec![b'a'; WINDOW_SIZE];
        bytes.extend_from_slice("👾".as_bytes());
        assert_eq!(determine(Cursor::new(bytes.clone())), Some(TextEncoding::Latin1));
        assert_eq!(determine_bytes(&bytes), Some(TextEncoding::Latin1));
        let (_, signals) = explain_bytes(&bytes).unwrap();
        assert_eq!(signals.window_len, WINDOW_SIZE);
    }

    #[test]
    fn sequence_split_by_window_edge_is_not_utf8() {
        let mut bytes = vec![b'a'; WINDOW_SIZE - 2];
        bytes.extend_from_slice("👾".as_bytes());
        assert_eq!(determine_bytes(&bytes), Some(TextEncoding::Latin1));
    }

    #[test]
    fn partial_stream_classifies_prefix() {
        let reader = PartialReader { data: vec![0x7f, b'h', b'i'], done: false };
        assert_eq!(determine(reader), Some(TextEncoding::Cp437));
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let reader = TrickleReader { data: "né".as_bytes().to_vec(), pos: 0, interrupt: false };
        assert_eq!(determine(reader), Some(TextEncoding::Utf8));
    }

    #[test]
    fn classification_is_idempotent() {
        let inputs: [&[u8]; 4] =
            [b"Hello world!", &[0xc4, 0xc4, 0xc4, 0xc4], &[0x1b, b'['], "👾".as_bytes()];
        for input in inputs {
            assert_eq!(determine_bytes(input), determine_bytes(input));
            assert_eq!(determine(input), determine_bytes(input));
        }
    }

    #[test]
    fn binary_noise_never_panics() {
        let bytes: Vec<u8> = (0..=255u8).collect();
        assert!(determine_bytes(&bytes).is_some());
        let zeros = [0u8; 64];
        assert_eq!(determine_bytes(&zeros), Some(TextEncoding::Latin1));
    }

    #[test]
    fn glyph_control_table() {
        assert!(is_glyph_control(0x01));
        assert!(is_glyph_control(0x0e));
        assert!(is_glyph_control(0x1a));
        assert!(is_glyph_control(0x7f));
        for byte in [0x00, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x1b, b' ', b'~'] {
            assert!(!is_glyph_control(byte), "{byte:#04x} should not be a glyph control");
        }
    }
}
