//! Library error type

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file name is empty")]
    EmptyName,

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid number: {0}")]
    InvalidNumber(String),

    #[error("invalid uuid: {0}")]
    InvalidUuid(String),

    #[error("invalid release date: {0}")]
    InvalidDate(String),

    #[error("unknown text encoding '{0}'. Use: utf-8|latin1|cp437")]
    UnknownEncoding(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}
