//! Error types shared by every `Lines` operation.

use std::fmt;

use thiserror::Error;

/// Which indexed array an out-of-range access was made against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexKind {
    /// The point (and point metadata) array.
    Point,
    /// The connection array.
    Connection,
    /// A position inside a line's connection list.
    LineEntry,
    /// The line sequence itself.
    Line,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Point => "point",
            Self::Connection => "connection",
            Self::LineEntry => "line entry",
            Self::Line => "line",
        };
        f.write_str(name)
    }
}

/// Errors returned by graph construction and graph walks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A capacity or name made no sense for the request.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// An index fell outside the array it was used against.
    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Array the index was used against.
        kind: IndexKind,
        /// Offending index.
        index: usize,
        /// Length of the array at the time of access.
        len: usize,
    },
    /// The operation exists on the API but has no defined behaviour yet.
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),
}

impl Error {
    /// Shorthand for building an [`Error::IndexOutOfRange`].
    pub fn out_of_range(kind: IndexKind, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { kind, index, len }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = Error::out_of_range(IndexKind::Connection, 7, 4);
        assert_eq!(e.to_string(), "connection index 7 out of range (len 4)");

        let e = Error::InvalidArgument("no points".into());
        assert_eq!(e.to_string(), "invalid argument: no points");

        let e = Error::Unimplemented("transform");
        assert_eq!(e.to_string(), "transform is not implemented");
    }
}
