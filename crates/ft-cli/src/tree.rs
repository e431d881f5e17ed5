//! Indented tree listing.

use std::fmt::Write;

use camino::{Utf8Path, Utf8PathBuf};
use ft_core::{FailurePolicy, FileAttributes, FileKind, VisitOutcome};
use ft_walker::{AccessError, FileVisitor, WalkError};
use serde::Serialize;
use tracing::warn;

/// One line of the tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    /// Full path of the entry.
    pub path: Utf8PathBuf,
    /// Distance from the start path.
    pub depth: usize,
    /// Entry kind, absent when the entry could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FileKind>,
    /// Failure message for unreadable entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Visitor that records every entry together with its depth.
#[derive(Debug, Default)]
pub struct TreePrinter {
    entries: Vec<TreeEntry>,
    depth: usize,
    policy: FailurePolicy,
}

impl TreePrinter {
    /// Creates a printer with the given failure policy.
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Entries recorded so far, in visit order.
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    fn push(&mut self, path: &Utf8Path, depth: usize, kind: FileKind) {
        self.entries.push(TreeEntry {
            path: path.to_owned(),
            depth,
            kind: Some(kind),
            error: None,
        });
    }

    fn failed(
        &mut self,
        path: &Utf8Path,
        depth: usize,
        error: AccessError,
    ) -> Result<VisitOutcome, WalkError> {
        if self.policy == FailurePolicy::Propagate {
            return Err(error.into());
        }
        warn!(path = %path, %error, "skipping unreadable entry");
        self.entries.push(TreeEntry {
            path: path.to_owned(),
            depth,
            kind: None,
            error: Some(error.to_string()),
        });
        Ok(VisitOutcome::Continue)
    }
}

impl FileVisitor for TreePrinter {
    type Error = WalkError;

    fn pre_visit_directory(
        &mut self,
        dir: &Utf8Path,
        _attrs: &FileAttributes,
    ) -> Result<VisitOutcome, WalkError> {
        self.push(dir, self.depth, FileKind::Directory);
        self.depth += 1;
        Ok(VisitOutcome::Continue)
    }

    fn visit_file(
        &mut self,
        file: &Utf8Path,
        attrs: &FileAttributes,
    ) -> Result<VisitOutcome, WalkError> {
        self.push(file, self.depth, attrs.kind);
        Ok(VisitOutcome::Continue)
    }

    fn visit_file_failed(
        &mut self,
        file: &Utf8Path,
        error: AccessError,
    ) -> Result<VisitOutcome, WalkError> {
        self.failed(file, self.depth, error)
    }

    fn post_visit_directory(
        &mut self,
        dir: &Utf8Path,
        error: Option<AccessError>,
    ) -> Result<VisitOutcome, WalkError> {
        let inner = self.depth;
        self.depth = self.depth.saturating_sub(1);
        match error {
            Some(error) => self.failed(dir, inner, error),
            None => Ok(VisitOutcome::Continue),
        }
    }
}

/// Renders entries as an indented listing, two spaces per level.
///
/// The start path is printed in full, everything below it by file name.
/// Directories get a trailing `/`.
pub fn render_text(entries: &[TreeEntry]) -> String {
    let mut output = String::new();
    for entry in entries {
        let indent = "  ".repeat(entry.depth);
        let name = match entry.path.file_name() {
            Some(name) if entry.depth > 0 => name,
            _ => entry.path.as_str(),
        };
        let _ = match (&entry.error, entry.kind) {
            (Some(error), _) => writeln!(output, "{indent}{name} [{error}]"),
            (None, Some(FileKind::Directory)) => writeln!(output, "{indent}{name}/"),
            (None, Some(FileKind::Symlink)) => writeln!(output, "{indent}{name}@"),
            (None, _) => writeln!(output, "{indent}{name}"),
        };
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ft_walker::{MemoryFs, walk, walk_file_tree};

    fn sample() -> MemoryFs {
        MemoryFs::new()
            .with_file("proj/Cargo.toml", 10)
            .with_file("proj/src/lib.rs", 20)
            .with_file("proj/src/bin/main.rs", 5)
    }

    #[test]
    fn test_tree_listing() {
        let fs = sample();
        let mut printer = TreePrinter::new(FailurePolicy::Propagate);
        walk_file_tree(&fs, Utf8Path::new("proj"), &mut printer).unwrap();

        insta::assert_snapshot!(render_text(printer.entries()), @r"
        proj/
          Cargo.toml
          src/
            lib.rs
            bin/
              main.rs
        ");
    }

    #[test]
    fn test_depth_limit_shows_directory_as_leaf() {
        let fs = sample();
        let mut printer = TreePrinter::new(FailurePolicy::Propagate);
        walk(&fs, Utf8Path::new("proj"), &mut printer, 1).unwrap();

        let depths: Vec<(&str, usize)> = printer
            .entries()
            .iter()
            .map(|e| (e.path.as_str(), e.depth))
            .collect();
        assert_eq!(depths, [("proj", 0), ("proj/Cargo.toml", 1), ("proj/src", 1)]);
        assert_eq!(printer.entries()[2].kind, Some(FileKind::Directory));
    }

    #[test]
    fn test_skipped_failure_is_listed() {
        let fs = sample().fail_open("proj/src");
        let mut printer = TreePrinter::new(FailurePolicy::Skip);
        walk_file_tree(&fs, Utf8Path::new("proj"), &mut printer).unwrap();

        let text = render_text(printer.entries());
        assert!(text.contains("  src [failed to open directory proj/src:"));
        assert_eq!(printer.entries().len(), 3);
    }

    #[test]
    fn test_post_visit_failure_sits_inside_directory() {
        let fs = sample().fail_close("proj/src/bin");
        let mut printer = TreePrinter::new(FailurePolicy::Skip);
        walk_file_tree(&fs, Utf8Path::new("proj"), &mut printer).unwrap();

        let last = printer.entries().last().unwrap();
        assert_eq!(last.path.as_str(), "proj/src/bin");
        assert_eq!(last.depth, 3);
        assert!(last.error.is_some());
    }

    #[test]
    fn test_propagated_failure_ends_walk() {
        let fs = sample().fail_attributes("proj/Cargo.toml");
        let mut printer = TreePrinter::new(FailurePolicy::Propagate);

        let err = walk_file_tree(&fs, Utf8Path::new("proj"), &mut printer).unwrap_err();

        assert_eq!(err.path().map(Utf8Path::as_str), Some("proj/Cargo.toml"));
        assert_eq!(printer.entries().len(), 1);
    }

    #[test]
    fn test_json_entries() {
        let fs = MemoryFs::new().with_file("r/a", 1);
        let mut printer = TreePrinter::new(FailurePolicy::Propagate);
        walk_file_tree(&fs, Utf8Path::new("r"), &mut printer).unwrap();

        let json = serde_json::to_string(printer.entries()).unwrap();
        assert_eq!(
            json,
            r#"[{"path":"r","depth":0,"kind":"directory"},{"path":"r/a","depth":1,"kind":"file"}]"#
        );
    }
}
