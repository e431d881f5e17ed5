//! Error types for the ft-walker crate.
//!
//! Two failure channels are kept apart:
//!
//! - [`AccessError`]: a failure reported by the attribute reader or the
//!   directory enumerator. The walker never raises it on its own; it hands it
//!   to the visitor (`visit_file_failed` or the failure slot of
//!   `post_visit_directory`), which decides whether to recover or re-raise.
//! - The visitor's own error type. Anything a callback returns as `Err` leaves
//!   [`walk`](crate::walk) untouched. [`WalkError`] is the error type used by
//!   the ready-made visitors and is a convenient choice for custom ones.

use std::fmt;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};

/// The provider operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessOp {
    /// Reading the attributes of a path.
    ReadAttributes,
    /// Opening a directory stream.
    OpenDirectory,
    /// Pulling the next child from an open directory stream.
    ReadDirectory,
    /// Releasing a directory stream.
    CloseDirectory,
}

impl AccessOp {
    /// Returns a short description used in error messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::ReadAttributes => "read attributes of",
            Self::OpenDirectory => "open directory",
            Self::ReadDirectory => "read directory",
            Self::CloseDirectory => "close directory",
        }
    }
}

impl fmt::Display for AccessOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A wrapped failure from the attribute reader or directory enumerator.
///
/// Carries the failing operation, the path it was attempted on and the
/// original I/O error.
///
/// # Examples
///
/// ```
/// use std::io;
/// use ft_walker::{AccessError, AccessOp};
///
/// let err = AccessError::new(
///     AccessOp::OpenDirectory,
///     "src",
///     io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
/// );
/// assert_eq!(err.op(), AccessOp::OpenDirectory);
/// assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
/// assert_eq!(err.to_string(), "failed to open directory src: denied");
/// ```
#[derive(Debug, thiserror::Error)]
#[error("failed to {op} {path}: {source}")]
pub struct AccessError {
    op: AccessOp,
    path: Utf8PathBuf,
    #[source]
    source: io::Error,
}

impl AccessError {
    /// Wraps `source` as a failure of `op` on `path`.
    pub fn new(op: AccessOp, path: impl Into<Utf8PathBuf>, source: io::Error) -> Self {
        Self {
            op,
            path: path.into(),
            source,
        }
    }

    /// The operation that failed.
    #[inline]
    #[must_use]
    pub const fn op(&self) -> AccessOp {
        self.op
    }

    /// The path the operation was attempted on.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// The kind of the original I/O error.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }

    /// Borrows the original I/O error.
    #[inline]
    #[must_use]
    pub const fn source_error(&self) -> &io::Error {
        &self.source
    }

    /// Unwraps the original I/O error.
    #[must_use]
    pub fn into_source(self) -> io::Error {
        self.source
    }
}

/// Error type of the ready-made visitors.
///
/// # Examples
///
/// ```
/// use ft_walker::WalkError;
///
/// let err = WalkError::visitor("src/main.rs", "refusing to continue");
/// assert!(err.access().is_none());
/// assert_eq!(err.path().map(|p| p.as_str()), Some("src/main.rs"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    /// A provider failure that the visitor re-raised.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// A failure raised by visitor logic.
    #[error("visitor failed at {path}: {message}")]
    Visitor {
        /// The path being visited when the visitor failed.
        path: Utf8PathBuf,
        /// What went wrong.
        message: String,
    },
}

impl WalkError {
    /// Creates a new [`WalkError::Visitor`] error.
    #[inline]
    pub fn visitor(path: impl Into<Utf8PathBuf>, message: impl Into<String>) -> Self {
        Self::Visitor {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the wrapped provider failure, if this is one.
    #[must_use]
    pub const fn access(&self) -> Option<&AccessError> {
        match self {
            Self::Access(err) => Some(err),
            Self::Visitor { .. } => None,
        }
    }

    /// Returns the path associated with this error.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        match self {
            Self::Access(err) => Some(err.path()),
            Self::Visitor { path, .. } => Some(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn denied() -> io::Error {
        io::Error::new(io::ErrorKind::PermissionDenied, "denied")
    }

    #[test]
    fn test_access_error_display() {
        let err = AccessError::new(AccessOp::ReadAttributes, "a/b", denied());
        assert_eq!(err.to_string(), "failed to read attributes of a/b: denied");
    }

    #[test]
    fn test_access_error_source_chain() {
        let err = AccessError::new(AccessOp::CloseDirectory, "a", denied());
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("denied"));
        assert_eq!(err.into_source().kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_walk_error_from_access() {
        let err = WalkError::from(AccessError::new(AccessOp::ReadDirectory, "x", denied()));
        assert_eq!(err.access().map(AccessError::op), Some(AccessOp::ReadDirectory));
        assert_eq!(err.to_string(), "failed to read directory x: denied");
        assert_eq!(err.path().map(Utf8Path::as_str), Some("x"));
    }

    #[test]
    fn test_walk_error_visitor_display() {
        let err = WalkError::visitor("x/y", "boom");
        assert_eq!(err.to_string(), "visitor failed at x/y: boom");
    }
}
