//! Depth-first tree traversal.
//!
//! This module provides [`TreeWalker`] and the [`walk`] / [`walk_file_tree`]
//! entry points. The walker reads the attributes of each path, visits
//! non-directories (and everything at the depth limit) as leaves, and
//! descends into directories between `pre_visit_directory` and
//! `post_visit_directory`.
//!
//! # Stream Discipline
//!
//! Each recursion level owns at most one open [`DirectoryStream`], held by a
//! guard that closes it exactly once. On the normal path the close result is
//! captured and handed to `post_visit_directory`; when the level is left early
//! (terminate, skipped pre-visit, visitor error, panic) the guard closes the
//! stream and discards any close failure.

use camino::{Utf8Path, Utf8PathBuf};
use ft_core::{FileAttributes, VisitOutcome, WalkConfig};
use tracing::{debug, trace, warn};

use crate::error::{AccessError, AccessOp};
use crate::source::{AttributeReader, DirectoryEnumerator, DirectoryStream};
use crate::visitor::FileVisitor;

/// Walks the tree rooted at `start`, descending at most `max_depth` levels.
///
/// A `max_depth` of `0` visits `start` itself as a leaf.
///
/// # Errors
///
/// Returns whatever error a visitor callback returned. Provider failures
/// only surface here when the visitor re-raises them.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use ft_core::VisitOutcome;
/// use ft_walker::{CountingVisitor, MemoryFs, walk};
///
/// let fs = MemoryFs::new().with_file("root/a", 1).with_file("root/sub/b", 1);
/// let mut counter = CountingVisitor::new();
/// let outcome = walk(&fs, Utf8Path::new("root"), &mut counter, 1).unwrap();
///
/// assert_eq!(outcome, VisitOutcome::Continue);
/// assert_eq!(counter.stats().directories, 1);
/// // `sub` sits at the depth limit and is visited as a leaf.
/// assert_eq!(counter.stats().files, 2);
/// ```
pub fn walk<S, V>(
    source: &S,
    start: &Utf8Path,
    visitor: &mut V,
    max_depth: usize,
) -> Result<VisitOutcome, V::Error>
where
    S: AttributeReader + DirectoryEnumerator + ?Sized,
    V: FileVisitor + ?Sized,
{
    TreeWalker::new(source)
        .with_max_depth(max_depth)
        .walk(start, visitor)
}

/// Walks the whole tree rooted at `start`, without a depth limit.
///
/// # Errors
///
/// See [`walk`].
pub fn walk_file_tree<S, V>(
    source: &S,
    start: &Utf8Path,
    visitor: &mut V,
) -> Result<VisitOutcome, V::Error>
where
    S: AttributeReader + DirectoryEnumerator + ?Sized,
    V: FileVisitor + ?Sized,
{
    walk(source, start, visitor, usize::MAX)
}

/// A depth-limited tree walker over a file system provider.
///
/// The walker holds no state between walks; concurrent walks over disjoint
/// roots are safe whenever the provider is.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use ft_walker::{FileCollector, MemoryFs, TreeWalker};
///
/// let fs = MemoryFs::new().with_file("p/a.rs", 1).with_file("p/src/b.rs", 1);
/// let walker = TreeWalker::new(&fs);
///
/// let mut collector = FileCollector::new();
/// walker.walk(Utf8Path::new("p"), &mut collector).unwrap();
/// assert_eq!(collector.files().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TreeWalker<S> {
    /// Attribute reader and directory enumerator.
    source: S,
    /// Entries at this depth are visited as leaves.
    max_depth: usize,
}

impl<S> TreeWalker<S>
where
    S: AttributeReader + DirectoryEnumerator,
{
    /// Creates an unlimited-depth walker over `source`.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            source,
            max_depth: usize::MAX,
        }
    }

    /// Creates a walker using the depth limit from `config`.
    #[must_use]
    pub fn from_config(source: S, config: &WalkConfig) -> Self {
        Self::new(source).with_max_depth(config.effective_max_depth())
    }

    /// Sets the maximum depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the maximum depth.
    #[inline]
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the underlying provider.
    #[inline]
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Walks the tree rooted at `start`.
    ///
    /// Returns the outcome of the callback made for `start` itself.
    ///
    /// # Errors
    ///
    /// Returns whatever error a visitor callback returned.
    pub fn walk<V>(&self, start: &Utf8Path, visitor: &mut V) -> Result<VisitOutcome, V::Error>
    where
        V: FileVisitor + ?Sized,
    {
        debug!(start = %start, max_depth = self.max_depth, "starting walk");
        let outcome = self.walk_entry(start, 0, visitor)?;
        debug!(start = %start, %outcome, "walk finished");
        Ok(outcome)
    }

    fn walk_entry<V>(
        &self,
        path: &Utf8Path,
        depth: usize,
        visitor: &mut V,
    ) -> Result<VisitOutcome, V::Error>
    where
        V: FileVisitor + ?Sized,
    {
        let (attrs, stream) = match self.open_entry(path, depth) {
            Ok(Entry::Leaf(attrs)) => return visitor.visit_file(path, &attrs),
            Ok(Entry::Directory(attrs, stream)) => (attrs, stream),
            Err(error) => return visitor.visit_file_failed(path, error),
        };
        let mut stream = OpenStream::new(path, stream);

        let outcome = visitor.pre_visit_directory(path, &attrs)?;
        if !outcome.is_continue() {
            stream.close_discarding();
            return Ok(outcome);
        }

        trace!(dir = %path, depth, "descending");
        let mut failure = None;
        while let Some(next) = stream.next_child() {
            let child = match next {
                Ok(child) => child,
                Err(source) => {
                    failure = Some(AccessError::new(AccessOp::ReadDirectory, path, source));
                    break;
                }
            };

            match self.walk_entry(&child, depth + 1, visitor)? {
                VisitOutcome::Terminate => {
                    stream.close_discarding();
                    return Ok(VisitOutcome::Terminate);
                }
                VisitOutcome::SkipSiblings => break,
                VisitOutcome::Continue | VisitOutcome::SkipSubtree => {}
            }
        }

        if let Err(source) = stream.close() {
            let error = AccessError::new(AccessOp::CloseDirectory, path, source);
            if failure.is_some() {
                debug!(%error, "discarding close failure after earlier failure");
            } else {
                failure = Some(error);
            }
        }

        visitor.post_visit_directory(path, failure)
    }

    /// Reads attributes and, for a directory above the depth limit, opens
    /// its stream.
    fn open_entry(&self, path: &Utf8Path, depth: usize) -> Result<Entry<S::Stream>, AccessError> {
        let attrs = self
            .source
            .read_attributes(path)
            .map_err(|source| AccessError::new(AccessOp::ReadAttributes, path, source))?;

        if depth >= self.max_depth || !attrs.is_directory() {
            return Ok(Entry::Leaf(attrs));
        }

        let stream = self
            .source
            .open_directory(path)
            .map_err(|source| AccessError::new(AccessOp::OpenDirectory, path, source))?;
        Ok(Entry::Directory(attrs, stream))
    }
}

enum Entry<St> {
    Leaf(FileAttributes),
    Directory(FileAttributes, St),
}

/// Owns an open directory stream and closes it exactly once.
struct OpenStream<'a, St: DirectoryStream> {
    dir: &'a Utf8Path,
    stream: St,
    closed: bool,
}

impl<'a, St: DirectoryStream> OpenStream<'a, St> {
    const fn new(dir: &'a Utf8Path, stream: St) -> Self {
        Self {
            dir,
            stream,
            closed: false,
        }
    }

    fn next_child(&mut self) -> Option<std::io::Result<Utf8PathBuf>> {
        if self.closed {
            return None;
        }
        self.stream.next()
    }

    fn close(&mut self) -> std::io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.stream.close()
    }

    fn close_discarding(&mut self) {
        if let Err(err) = self.close() {
            warn!(dir = %self.dir, error = %err, "discarding directory close failure");
        }
    }
}

impl<St: DirectoryStream> Drop for OpenStream<'_, St> {
    fn drop(&mut self) {
        self.close_discarding();
    }
}
