//! Retro-Helper: encoding detection and text helpers for legacy artifacts
//!
//! The core of this library decides whether a byte stream of unknown origin
//! is UTF-8, ISO-8859-1 or DOS code page 437 text (see [`encoding`]). Around
//! it sit small stateless helpers for naming, sizing, dating and digesting
//! the files those bytes came from.

pub mod cli;
pub mod config;
pub mod domain;
pub mod encoding;
pub mod error;
pub mod utils;

pub use domain::{Signals, TextEncoding};
pub use encoding::{determine, determine_bytes};
pub use error::{Error, Result};
