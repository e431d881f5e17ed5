//! Local file system provider backed by `std::fs`.
//!
//! # Features
//!
//! - Reads attributes with or without following symbolic links
//! - Optionally yields directory children sorted by file name
//! - Converts paths to UTF-8 [`Utf8PathBuf`]; a non-UTF-8 name is reported as
//!   an iteration failure of its parent directory

use std::cmp::Ordering;
use std::fs::{self, Metadata, ReadDir};
use std::io;
use std::path::PathBuf;

use camino::{Utf8Path, Utf8PathBuf};
use ft_core::{FileAttributes, FileKind, WalkConfig};

use crate::source::{AttributeReader, DirectoryEnumerator, DirectoryStream};

/// The local file system.
///
/// # Examples
///
/// ```ignore
/// use camino::Utf8Path;
/// use ft_walker::{CountingVisitor, LocalFs, walk_file_tree};
///
/// let fs = LocalFs::new().with_follow_links(true);
/// let mut counter = CountingVisitor::new();
/// walk_file_tree(&fs, Utf8Path::new("./src"), &mut counter)?;
/// println!("{} files", counter.stats().files);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LocalFs {
    /// Whether attribute reads follow symbolic links.
    follow_links: bool,
    /// Whether directory children are sorted by file name.
    sorted: bool,
}

impl Default for LocalFs {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalFs {
    /// Creates a provider that does not follow links and sorts children.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            follow_links: false,
            sorted: true,
        }
    }

    /// Creates a provider configured from `config`.
    #[must_use]
    pub const fn from_config(config: &WalkConfig) -> Self {
        Self::new()
            .with_follow_links(config.follow_links)
            .with_sorted(config.sort_entries)
    }

    /// Configures whether to follow symbolic links.
    ///
    /// When links are not followed, a link is reported as
    /// [`FileKind::Symlink`] and is therefore visited as a leaf.
    #[must_use]
    pub const fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Configures whether children are yielded sorted by file name.
    ///
    /// Sorting reads the whole directory when it is opened. Unsorted
    /// streams read lazily in the order the operating system returns.
    #[must_use]
    pub const fn with_sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }
}

impl AttributeReader for LocalFs {
    fn read_attributes(&self, path: &Utf8Path) -> io::Result<FileAttributes> {
        let metadata = if self.follow_links {
            fs::metadata(path)?
        } else {
            fs::symlink_metadata(path)?
        };
        Ok(attributes_from_metadata(&metadata))
    }
}

impl DirectoryEnumerator for LocalFs {
    type Stream = LocalDirStream;

    fn open_directory(&self, dir: &Utf8Path) -> io::Result<LocalDirStream> {
        let entries = fs::read_dir(dir)?;
        if !self.sorted {
            return Ok(LocalDirStream {
                state: Some(StreamState::Live(entries)),
            });
        }

        let mut children: Vec<io::Result<Utf8PathBuf>> = entries.map(entry_path).collect();
        children.sort_by(compare_children);
        Ok(LocalDirStream {
            state: Some(StreamState::Buffered(children.into_iter())),
        })
    }
}

/// Directory stream over the local file system.
#[derive(Debug)]
pub struct LocalDirStream {
    /// `None` once closed.
    state: Option<StreamState>,
}

#[derive(Debug)]
enum StreamState {
    Live(ReadDir),
    Buffered(std::vec::IntoIter<io::Result<Utf8PathBuf>>),
}

impl Iterator for LocalDirStream {
    type Item = io::Result<Utf8PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state.as_mut()? {
            StreamState::Live(entries) => entries.next().map(entry_path),
            StreamState::Buffered(children) => children.next(),
        }
    }
}

impl DirectoryStream for LocalDirStream {
    fn close(&mut self) -> io::Result<()> {
        // Dropping the handle releases the underlying directory descriptor.
        self.state = None;
        Ok(())
    }
}

fn attributes_from_metadata(metadata: &Metadata) -> FileAttributes {
    let file_type = metadata.file_type();
    let kind = if file_type.is_dir() {
        FileKind::Directory
    } else if file_type.is_file() {
        FileKind::File
    } else if file_type.is_symlink() {
        FileKind::Symlink
    } else {
        FileKind::Other
    };

    let attrs = FileAttributes::new(kind, metadata.len());
    match metadata.modified() {
        Ok(modified) => attrs.with_modified(modified),
        Err(_) => attrs,
    }
}

fn entry_path(entry: io::Result<fs::DirEntry>) -> io::Result<Utf8PathBuf> {
    utf8_path(entry?.path())
}

fn utf8_path(path: PathBuf) -> io::Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).map_err(|path| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("path is not valid UTF-8: {}", path.display()),
        )
    })
}

/// Orders children by file name, with failures last.
fn compare_children(a: &io::Result<Utf8PathBuf>, b: &io::Result<Utf8PathBuf>) -> Ordering {
    match (a, b) {
        (Ok(a), Ok(b)) => a.file_name().cmp(&b.file_name()),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visitors::CountingVisitor;
    use crate::walker::walk_file_tree;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, root)
    }

    fn names(stream: LocalDirStream) -> Vec<String> {
        stream
            .map(|child| child.unwrap().file_name().unwrap_or_default().to_owned())
            .collect()
    }

    #[test]
    fn test_sorted_children() {
        let (_guard, root) = temp_root();
        for name in ["c.txt", "a.txt", "b"] {
            fs::write(root.join(name), "x").unwrap();
        }

        let stream = LocalFs::new().open_directory(&root).unwrap();
        assert_eq!(names(stream), vec!["a.txt", "b", "c.txt"]);
    }

    #[test]
    fn test_unsorted_children_yield_everything() {
        let (_guard, root) = temp_root();
        for name in ["c.txt", "a.txt", "b"] {
            fs::write(root.join(name), "x").unwrap();
        }

        let stream = LocalFs::new().with_sorted(false).open_directory(&root).unwrap();
        let mut found = names(stream);
        found.sort();
        assert_eq!(found, vec!["a.txt", "b", "c.txt"]);
    }

    #[test]
    fn test_attribute_kinds() {
        let (_guard, root) = temp_root();
        let file = root.join("file.rs");
        fs::write(&file, "fn main() {}").unwrap();

        let fs_view = LocalFs::new();
        let dir_attrs = fs_view.read_attributes(&root).unwrap();
        let file_attrs = fs_view.read_attributes(&file).unwrap();

        assert!(dir_attrs.is_directory());
        assert!(file_attrs.is_regular_file());
        assert_eq!(file_attrs.len, 12);
        assert!(file_attrs.modified.is_some());
    }

    #[test]
    fn test_missing_path() {
        let (_guard, root) = temp_root();
        let err = LocalFs::new()
            .read_attributes(&root.join("missing"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_closed_stream_yields_nothing() {
        let (_guard, root) = temp_root();
        fs::write(root.join("a"), "x").unwrap();

        let mut stream = LocalFs::new().with_sorted(false).open_directory(&root).unwrap();
        stream.close().unwrap();
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_walk_real_tree() {
        let (_guard, root) = temp_root();
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::write(root.join("Cargo.toml"), "[package]").unwrap();
        fs::write(root.join("src/lib.rs"), "").unwrap();
        fs::write(root.join("src/nested/mod.rs"), "").unwrap();

        let mut counter = CountingVisitor::new();
        walk_file_tree(&LocalFs::new(), &root, &mut counter).unwrap();

        let stats = counter.stats();
        assert_eq!(stats.directories, 3);
        assert_eq!(stats.files, 3);
        assert_eq!(stats.failures, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_follow_setting() {
        let (_guard, root) = temp_root();
        fs::create_dir(root.join("target")).unwrap();
        std::os::unix::fs::symlink(root.join("target"), root.join("link")).unwrap();

        let link = root.join("link");
        assert!(LocalFs::new().read_attributes(&link).unwrap().is_symlink());
        assert!(
            LocalFs::new()
                .with_follow_links(true)
                .read_attributes(&link)
                .unwrap()
                .is_directory()
        );
    }

    #[test]
    fn test_from_config() {
        let config = WalkConfig {
            follow_links: true,
            sort_entries: false,
            ..WalkConfig::default()
        };
        let fs_view = LocalFs::from_config(&config);
        assert!(fs_view.follow_links);
        assert!(!fs_view.sorted);
    }
}
