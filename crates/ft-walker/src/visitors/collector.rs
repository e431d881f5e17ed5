//! File path collection.

use camino::{Utf8Path, Utf8PathBuf};
use ft_core::{FailurePolicy, FileAttributes, VisitOutcome};

use super::handle_failure;
use crate::error::{AccessError, WalkError};
use crate::visitor::FileVisitor;

/// Visitor that collects the paths of every non-directory leaf.
///
/// Directories visited as leaves because of the depth limit are not
/// collected. With [`FailurePolicy::Skip`], paths that could not be read are
/// remembered in [`skipped`](Self::skipped).
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use ft_walker::{FileCollector, MemoryFs, walk_file_tree};
///
/// let fs = MemoryFs::new().with_file("p/a.rs", 1).with_file("p/src/b.rs", 1);
/// let mut collector = FileCollector::new();
/// walk_file_tree(&fs, Utf8Path::new("p"), &mut collector).unwrap();
///
/// let files: Vec<&str> = collector.files().iter().map(|p| p.as_str()).collect();
/// assert_eq!(files, ["p/a.rs", "p/src/b.rs"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileCollector {
    files: Vec<Utf8PathBuf>,
    skipped: Vec<Utf8PathBuf>,
    policy: FailurePolicy,
}

impl FileCollector {
    /// Creates a collector that propagates failures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failure policy.
    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Paths collected so far, in visit order.
    #[must_use]
    pub fn files(&self) -> &[Utf8PathBuf] {
        &self.files
    }

    /// Paths whose failures were skipped.
    #[must_use]
    pub fn skipped(&self) -> &[Utf8PathBuf] {
        &self.skipped
    }

    /// Consumes the collector, returning the collected paths.
    #[must_use]
    pub fn into_files(self) -> Vec<Utf8PathBuf> {
        self.files
    }

    fn failed(&mut self, path: &Utf8Path, error: AccessError) -> Result<VisitOutcome, WalkError> {
        let outcome = handle_failure(self.policy, path, error)?;
        self.skipped.push(path.to_owned());
        Ok(outcome)
    }
}

impl FileVisitor for FileCollector {
    type Error = WalkError;

    fn visit_file(
        &mut self,
        file: &Utf8Path,
        attrs: &FileAttributes,
    ) -> Result<VisitOutcome, WalkError> {
        if !attrs.is_directory() {
            self.files.push(file.to_owned());
        }
        Ok(VisitOutcome::Continue)
    }

    fn visit_file_failed(
        &mut self,
        file: &Utf8Path,
        error: AccessError,
    ) -> Result<VisitOutcome, WalkError> {
        self.failed(file, error)
    }

    fn post_visit_directory(
        &mut self,
        dir: &Utf8Path,
        error: Option<AccessError>,
    ) -> Result<VisitOutcome, WalkError> {
        match error {
            Some(error) => self.failed(dir, error),
            None => Ok(VisitOutcome::Continue),
        }
    }
}
