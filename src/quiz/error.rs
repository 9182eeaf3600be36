//! Fatal error types
//!
//! Only conditions that terminate a run before (or during) generation live
//! here: an unreadable source file, an unwritable version file, or invalid
//! configuration values. Everything recoverable is a
//! [`Diagnostic`](crate::quiz::diagnostics::Diagnostic) instead.

use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Reading the source file or writing a version file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The requested number of versions is below 1.
    InvalidVersionCount(usize),
    /// A non-numeric value was supplied where a count is required.
    InvalidCount(String),
    /// The version suffix input is empty or not a single character.
    InvalidSuffix(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, source } => {
                write!(f, "cannot access '{}': {}", path.display(), source)
            }
            Error::InvalidVersionCount(count) => {
                write!(f, "number of versions must be >= 1, got {}", count)
            }
            Error::InvalidCount(value) => {
                write!(f, "expected a number, got '{}'", value)
            }
            Error::InvalidSuffix(value) => {
                write!(f, "expected a single suffix character, got '{}'", value)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
