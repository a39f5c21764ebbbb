//! Tagged error type shared by the shred reader/writer, clique builder,
//! report reader/writer, and filters.
//!
//! Every fallible operation in this crate returns `Result<T, Error>` so
//! callers can match on the specific failure tag instead of inspecting a
//! string. The CLI boundary (see `src/bin/*.rs`) converts any `Error` into
//! a one-line `stderr` diagnostic and a non-zero exit code.
use std::fmt;
use std::io;

/// A fatal condition encountered while reading, merging, or filtering
/// shred streams and reports.
#[derive(Debug)]
pub enum Error {
    /// Header magic/tag parse failure, or a content line that does not
    /// match the expected grammar.
    MalformedInput(String),
    /// Metadata (normalization, shred size, hash method) disagrees across
    /// two or more inputs being merged.
    Incompatible(String),
    /// The declared `Matches` count in a report header disagrees with the
    /// number of clique blocks actually read.
    MatchesMismatch { declared: usize, observed: usize },
    /// Text extraction referenced a file absent from the base directory.
    MissingFile(String),
    /// Underlying filesystem failure.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedInput(msg) => write!(f, "malformed input: {msg}"),
            Error::Incompatible(msg) => write!(f, "incompatible inputs: {msg}"),
            Error::MatchesMismatch { declared, observed } => write!(
                f,
                "Matches header declares {declared} but {observed} clique block(s) were read"
            ),
            Error::MissingFile(file_id) => write!(f, "missing file: {file_id}"),
            Error::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
