//! In-memory file system provider.
//!
//! [`MemoryFs`] holds a tree of files and directories keyed by path. Children
//! are yielded in insertion order, which makes walks fully deterministic. It
//! can inject failures into every provider operation and counts how many
//! directory streams were opened and closed.
//!
//! # Examples
//!
//! ```
//! use camino::Utf8Path;
//! use ft_walker::{FileCollector, MemoryFs, walk_file_tree};
//!
//! let fs = MemoryFs::new()
//!     .with_file("project/Cargo.toml", 120)
//!     .with_file("project/src/lib.rs", 900);
//!
//! let mut collector = FileCollector::new();
//! walk_file_tree(&fs, Utf8Path::new("project"), &mut collector).unwrap();
//!
//! assert_eq!(collector.files().len(), 2);
//! assert_eq!(fs.open_streams(), 0);
//! ```

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use camino::{Utf8Path, Utf8PathBuf};
use ft_core::FileAttributes;
use rustc_hash::FxHashMap;

use crate::source::{AttributeReader, DirectoryEnumerator, DirectoryStream};

#[derive(Debug, Clone)]
enum Node {
    File { len: u64 },
    Directory { children: Vec<Utf8PathBuf> },
}

/// Failures injected for a single path.
#[derive(Debug, Clone, Copy, Default)]
struct Faults {
    attributes: bool,
    open: bool,
    iteration_after: Option<usize>,
    close: bool,
}

/// Stream accounting shared between the file system and its streams.
#[derive(Debug, Default)]
struct StreamCounters {
    opened: AtomicUsize,
    closed: AtomicUsize,
}

/// A deterministic in-memory tree.
///
/// Adding an entry creates its missing ancestors as directories. Adding a
/// child below an existing file turns that file into an empty directory.
#[derive(Debug, Default)]
pub struct MemoryFs {
    /// Every known path.
    nodes: FxHashMap<Utf8PathBuf, Node>,
    /// Injected failures by path.
    faults: FxHashMap<Utf8PathBuf, Faults>,
    /// Open/close counters, shared with live streams.
    counters: Arc<StreamCounters>,
}

impl MemoryFs {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory.
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.add_dir(path);
        self
    }

    /// Adds a file of `len` bytes.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<Utf8PathBuf>, len: u64) -> Self {
        self.add_file(path, len);
        self
    }

    /// Adds a directory in place.
    pub fn add_dir(&mut self, path: impl Into<Utf8PathBuf>) {
        let path = path.into();
        self.ensure_dir(&path);
    }

    /// Adds a file in place, replacing any existing entry at `path`.
    pub fn add_file(&mut self, path: impl Into<Utf8PathBuf>, len: u64) {
        let path = path.into();
        self.link_to_parent(&path);
        self.nodes.insert(path, Node::File { len });
    }

    /// Makes reading the attributes of `path` fail.
    #[must_use]
    pub fn fail_attributes(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.faults.entry(path.into()).or_default().attributes = true;
        self
    }

    /// Makes opening the directory `path` fail.
    #[must_use]
    pub fn fail_open(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.faults.entry(path.into()).or_default().open = true;
        self
    }

    /// Makes the stream of `path` fail after yielding `count` children.
    #[must_use]
    pub fn fail_iteration_after(mut self, path: impl Into<Utf8PathBuf>, count: usize) -> Self {
        self.faults.entry(path.into()).or_default().iteration_after = Some(count);
        self
    }

    /// Makes closing the stream of `path` fail.
    #[must_use]
    pub fn fail_close(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.faults.entry(path.into()).or_default().close = true;
        self
    }

    /// Number of directory streams opened so far.
    #[must_use]
    pub fn opened_streams(&self) -> usize {
        self.counters.opened.load(Ordering::Relaxed)
    }

    /// Number of `close` calls made on streams so far.
    #[must_use]
    pub fn closed_streams(&self) -> usize {
        self.counters.closed.load(Ordering::Relaxed)
    }

    /// Number of streams opened but not yet closed.
    #[must_use]
    pub fn open_streams(&self) -> usize {
        self.opened_streams().saturating_sub(self.closed_streams())
    }

    /// Returns `true` if `path` exists in the tree.
    #[must_use]
    pub fn contains(&self, path: &Utf8Path) -> bool {
        self.nodes.contains_key(path)
    }

    fn ensure_dir(&mut self, path: &Utf8Path) {
        if matches!(self.nodes.get(path), Some(Node::Directory { .. })) {
            return;
        }
        self.link_to_parent(path);
        self.nodes.insert(
            path.to_owned(),
            Node::Directory {
                children: Vec::new(),
            },
        );
    }

    /// Creates the parent of `path` if needed and lists `path` under it.
    fn link_to_parent(&mut self, path: &Utf8Path) {
        let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) else {
            return;
        };
        self.ensure_dir(parent);
        if let Some(Node::Directory { children }) = self.nodes.get_mut(parent) {
            if !children.iter().any(|c| c.as_path() == path) {
                children.push(path.to_owned());
            }
        }
    }

    fn faults(&self, path: &Utf8Path) -> Faults {
        self.faults.get(path).copied().unwrap_or_default()
    }
}

fn injected(what: &str, path: &Utf8Path) -> io::Error {
    io::Error::other(format!("injected {what} failure: {path}"))
}

impl AttributeReader for MemoryFs {
    fn read_attributes(&self, path: &Utf8Path) -> io::Result<FileAttributes> {
        if self.faults(path).attributes {
            return Err(injected("attribute", path));
        }
        match self.nodes.get(path) {
            Some(Node::File { len }) => Ok(FileAttributes::file(*len)),
            Some(Node::Directory { .. }) => Ok(FileAttributes::directory()),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such entry: {path}"),
            )),
        }
    }
}

impl DirectoryEnumerator for MemoryFs {
    type Stream = MemoryDirStream;

    fn open_directory(&self, dir: &Utf8Path) -> io::Result<MemoryDirStream> {
        let faults = self.faults(dir);
        if faults.open {
            return Err(injected("open", dir));
        }
        let children = match self.nodes.get(dir) {
            Some(Node::Directory { children }) => children.clone(),
            Some(Node::File { .. }) => {
                return Err(io::Error::new(
                    io::ErrorKind::NotADirectory,
                    format!("not a directory: {dir}"),
                ));
            }
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such directory: {dir}"),
                ));
            }
        };

        self.counters.opened.fetch_add(1, Ordering::Relaxed);
        Ok(MemoryDirStream {
            dir: dir.to_owned(),
            children: children.into_iter(),
            yielded: 0,
            faults,
            exhausted: false,
            counters: Arc::clone(&self.counters),
        })
    }
}

/// Directory stream over a [`MemoryFs`] snapshot.
#[derive(Debug)]
pub struct MemoryDirStream {
    dir: Utf8PathBuf,
    children: std::vec::IntoIter<Utf8PathBuf>,
    yielded: usize,
    faults: Faults,
    exhausted: bool,
    counters: Arc<StreamCounters>,
}

impl Iterator for MemoryDirStream {
    type Item = io::Result<Utf8PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        if self.faults.iteration_after == Some(self.yielded) {
            self.exhausted = true;
            return Some(Err(injected("iteration", &self.dir)));
        }
        let child = self.children.next()?;
        self.yielded += 1;
        Some(Ok(child))
    }
}

impl DirectoryStream for MemoryDirStream {
    fn close(&mut self) -> io::Result<()> {
        self.exhausted = true;
        self.counters.closed.fetch_add(1, Ordering::Relaxed);
        if self.faults.close {
            return Err(injected("close", &self.dir));
        }
        Ok(())
    }
}
