//! Crate-local error type.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    UnknownCacheBackend(String),
    InvalidDuration(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownCacheBackend(s) => {
                write!(f, "unknown cache backend {s:?}, expected one of: dense, std, trie")
            }
            Error::InvalidDuration(s) => write!(f, "invalid duration {s:?}"),
        }
    }
}

impl std::error::Error for Error {}
