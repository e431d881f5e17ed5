//! Capabilities the walker needs from a file system provider.
//!
//! The walker does not touch storage itself. It asks an [`AttributeReader`]
//! for metadata and a [`DirectoryEnumerator`] for the children of a
//! directory. [`LocalFs`](crate::LocalFs) and [`MemoryFs`](crate::MemoryFs)
//! implement both.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use ft_core::FileAttributes;

/// Reads basic attributes for a path.
pub trait AttributeReader {
    /// Returns a fresh attribute snapshot for `path`.
    ///
    /// # Errors
    ///
    /// Returns the provider's I/O error if the path cannot be inspected.
    fn read_attributes(&self, path: &Utf8Path) -> io::Result<FileAttributes>;
}

/// Opens directory streams.
pub trait DirectoryEnumerator {
    /// The stream type returned by [`open_directory`](Self::open_directory).
    type Stream: DirectoryStream;

    /// Opens a single-pass stream over the children of `dir`.
    ///
    /// The order in which children are yielded is a property of the
    /// provider; the walker preserves it.
    ///
    /// # Errors
    ///
    /// Returns the provider's I/O error if the directory cannot be opened.
    fn open_directory(&self, dir: &Utf8Path) -> io::Result<Self::Stream>;
}

/// A lazy, finite, single-pass sequence of child paths.
///
/// Each successfully opened stream must be closed exactly once. The walker
/// guarantees this on every exit path, including visitor failures.
pub trait DirectoryStream: Iterator<Item = io::Result<Utf8PathBuf>> {
    /// Releases the underlying enumeration resource.
    ///
    /// # Errors
    ///
    /// Returns the provider's I/O error if the release failed.
    fn close(&mut self) -> io::Result<()>;
}

impl<T: AttributeReader + ?Sized> AttributeReader for &T {
    fn read_attributes(&self, path: &Utf8Path) -> io::Result<FileAttributes> {
        (**self).read_attributes(path)
    }
}

impl<T: DirectoryEnumerator + ?Sized> DirectoryEnumerator for &T {
    type Stream = T::Stream;

    fn open_directory(&self, dir: &Utf8Path) -> io::Result<Self::Stream> {
        (**self).open_directory(dir)
    }
}
