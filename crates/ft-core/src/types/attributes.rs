//! Basic file attributes.
//!
//! [`FileAttributes`] is a snapshot of the metadata of a single path, taken
//! when the attribute reader was asked for it. The walker never caches it.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// The kind of file system entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// A regular file.
    #[default]
    File,
    /// A directory.
    Directory,
    /// A symbolic link that was not followed.
    Symlink,
    /// Anything else (sockets, devices, fifos).
    Other,
}

/// Metadata snapshot for a path.
///
/// # Examples
///
/// ```
/// use ft_core::{FileAttributes, FileKind};
///
/// let dir = FileAttributes::directory();
/// assert!(dir.is_directory());
///
/// let file = FileAttributes::file(128);
/// assert_eq!(file.kind, FileKind::File);
/// assert_eq!(file.len, 128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileAttributes {
    /// What kind of entry this is.
    pub kind: FileKind,

    /// Size in bytes, as reported by the provider.
    pub len: u64,

    /// Last modification time, if the provider knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<SystemTime>,
}

impl FileAttributes {
    /// Creates attributes for the given kind and size.
    #[inline]
    #[must_use]
    pub const fn new(kind: FileKind, len: u64) -> Self {
        Self {
            kind,
            len,
            modified: None,
        }
    }

    /// Creates attributes describing a regular file of `len` bytes.
    #[inline]
    #[must_use]
    pub const fn file(len: u64) -> Self {
        Self::new(FileKind::File, len)
    }

    /// Creates attributes describing a directory.
    #[inline]
    #[must_use]
    pub const fn directory() -> Self {
        Self::new(FileKind::Directory, 0)
    }

    /// Sets the modification time.
    #[inline]
    #[must_use]
    pub const fn with_modified(mut self, modified: SystemTime) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Returns `true` if the entry is a directory.
    #[inline]
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self.kind, FileKind::Directory)
    }

    /// Returns `true` if the entry is a regular file.
    #[inline]
    #[must_use]
    pub const fn is_regular_file(&self) -> bool {
        matches!(self.kind, FileKind::File)
    }

    /// Returns `true` if the entry is an unfollowed symbolic link.
    #[inline]
    #[must_use]
    pub const fn is_symlink(&self) -> bool {
        matches!(self.kind, FileKind::Symlink)
    }

    /// Returns `true` if the entry is neither a file, a directory nor a link.
    #[inline]
    #[must_use]
    pub const fn is_other(&self) -> bool {
        matches!(self.kind, FileKind::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_predicates() {
        assert!(FileAttributes::directory().is_directory());
        assert!(!FileAttributes::directory().is_regular_file());
        assert!(FileAttributes::file(0).is_regular_file());
        assert!(FileAttributes::new(FileKind::Symlink, 0).is_symlink());
        assert!(FileAttributes::new(FileKind::Other, 0).is_other());
    }

    #[test]
    fn test_serialization_skips_missing_mtime() {
        let json = serde_json::to_string(&FileAttributes::file(42)).unwrap();
        assert_eq!(json, r#"{"kind":"file","len":42}"#);
    }

    #[test]
    fn test_with_modified() {
        let attrs = FileAttributes::file(1).with_modified(SystemTime::UNIX_EPOCH);
        assert_eq!(attrs.modified, Some(SystemTime::UNIX_EPOCH));
    }
}
