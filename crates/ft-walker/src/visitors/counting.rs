//! Walk statistics.

use camino::Utf8Path;
use ft_core::{FailurePolicy, FileAttributes, VisitOutcome};
use serde::{Deserialize, Serialize};

use super::handle_failure;
use crate::error::{AccessError, WalkError};
use crate::visitor::FileVisitor;

/// Totals gathered by a [`CountingVisitor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WalkStats {
    /// Directories that were descended into.
    pub directories: u64,
    /// Entries visited as leaves: files, links, and directories at the
    /// depth limit.
    pub files: u64,
    /// Sum of the sizes of all leaves.
    pub bytes: u64,
    /// Provider failures seen, whether skipped or not.
    pub failures: u64,
}

impl WalkStats {
    /// Total number of entries visited, failures included.
    #[must_use]
    pub const fn entries(&self) -> u64 {
        self.directories + self.files + self.failures
    }
}

/// Visitor that only counts.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use ft_core::FailurePolicy;
/// use ft_walker::{CountingVisitor, MemoryFs, walk_file_tree};
///
/// let fs = MemoryFs::new()
///     .with_file("r/a", 10)
///     .with_file("r/b", 5)
///     .fail_attributes("r/b");
///
/// let mut counter = CountingVisitor::new().with_policy(FailurePolicy::Skip);
/// walk_file_tree(&fs, Utf8Path::new("r"), &mut counter).unwrap();
///
/// let stats = counter.stats();
/// assert_eq!((stats.directories, stats.files, stats.failures), (1, 1, 1));
/// assert_eq!(stats.bytes, 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CountingVisitor {
    stats: WalkStats,
    policy: FailurePolicy,
}

impl CountingVisitor {
    /// Creates a counter that propagates failures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failure policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the totals so far.
    #[must_use]
    pub const fn stats(&self) -> WalkStats {
        self.stats
    }
}

impl FileVisitor for CountingVisitor {
    type Error = WalkError;

    fn pre_visit_directory(
        &mut self,
        _dir: &Utf8Path,
        _attrs: &FileAttributes,
    ) -> Result<VisitOutcome, WalkError> {
        self.stats.directories += 1;
        Ok(VisitOutcome::Continue)
    }

    fn visit_file(
        &mut self,
        _file: &Utf8Path,
        attrs: &FileAttributes,
    ) -> Result<VisitOutcome, WalkError> {
        self.stats.files += 1;
        self.stats.bytes += attrs.len;
        Ok(VisitOutcome::Continue)
    }

    fn visit_file_failed(
        &mut self,
        file: &Utf8Path,
        error: AccessError,
    ) -> Result<VisitOutcome, WalkError> {
        self.stats.failures += 1;
        handle_failure(self.policy, file, error)
    }

    fn post_visit_directory(
        &mut self,
        dir: &Utf8Path,
        error: Option<AccessError>,
    ) -> Result<VisitOutcome, WalkError> {
        match error {
            Some(error) => {
                self.stats.failures += 1;
                handle_failure(self.policy, dir, error)
            }
            None => Ok(VisitOutcome::Continue),
        }
    }
}
