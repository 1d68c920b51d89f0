//! Core domain types and models
//!
//! Defines the encoding classification, the per-scan signal tallies and the
//! runtime configuration shared by the library helpers and the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text encodings the classifier can report.
///
/// "No determination possible" is expressed as `Option::None` by the
/// classifier, never as a variant of this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextEncoding {
    /// Unicode text encoded as UTF-8
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    /// ISO-8859-1, the Western European 8-bit fallback
    #[serde(rename = "latin1", alias = "iso-8859-1")]
    Latin1,
    /// IBM PC code page 437, used by DOS-era text and art
    #[serde(rename = "cp437", alias = "ibm437")]
    Cp437,
}

impl TextEncoding {
    /// Short machine-friendly name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin1",
            TextEncoding::Cp437 => "cp437",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Latin1 => "ISO 8859-1",
            TextEncoding::Cp437 => "IBM Code Page 437",
        };
        f.write_str(name)
    }
}

impl FromStr for TextEncoding {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" | "unicode" => Ok(TextEncoding::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" | "iso8859-1" | "iso 8859-1" => {
                Ok(TextEncoding::Latin1)
            }
            "cp437" | "cp-437" | "ibm437" | "437" | "dos" => Ok(TextEncoding::Cp437),
            other => Err(crate::error::Error::UnknownEncoding(other.to_string())),
        }
    }
}

/// Tallies gathered from one scan of an input window.
///
/// These only describe the window they were computed from; nothing is
/// carried between classification calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signals {
    /// Number of bytes examined
    pub window_len: usize,

    /// Valid 2, 3 or 4 byte UTF-8 sequences, counted only when the whole
    /// window is UTF-8 (a sequence cut off by the end of the window is
    /// tolerated)
    pub utf8_sequences: usize,

    /// CP437 block and box-drawing bytes (0xB0..=0xDF) outside valid UTF-8
    pub box_drawing: usize,

    /// Runs of consecutive box-drawing bytes long enough to count as a signal
    pub box_runs: usize,

    /// Control bytes that CP437 renders as glyphs (including 0x7F)
    pub glyph_controls: usize,

    /// ESC bytes, normally the start of an ANSI escape sequence
    pub escapes: usize,

    /// Bytes with the high bit set that are not part of valid UTF-8
    pub high_bit: usize,
}

impl Signals {
    /// Weighted CP437 evidence: every glyph control plus every box-drawing run.
    pub fn cp437_score(&self) -> usize {
        self.glyph_controls + self.box_runs
    }
}

/// Unit system used when printing byte counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ByteFormat {
    /// Powers of 1024, compact form such as `1k` or `1024M`
    #[default]
    Binary,
    /// Powers of 1000 with one decimal, such as `1.1 GB`
    Decimal,
}

/// Runtime configuration for the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Encoding assumed when the classifier cannot decide (empty input)
    #[serde(default = "default_fallback_encoding")]
    pub fallback_encoding: TextEncoding,

    /// Use seconds granularity for time distances under a minute
    #[serde(default)]
    pub include_seconds: bool,

    /// Unit system for byte counts
    #[serde(default)]
    pub byte_format: ByteFormat,

    /// Column width used when truncating file names in listings
    #[serde(default = "default_trunc_width")]
    pub trunc_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fallback_encoding: default_fallback_encoding(),
            include_seconds: false,
            byte_format: ByteFormat::default(),
            trunc_width: default_trunc_width(),
        }
    }
}

fn default_fallback_encoding() -> TextEncoding {
    TextEncoding::Utf8
}
fn default_trunc_width() -> usize {
    30
}
