//! The visitor contract driven by the walker.

use camino::Utf8Path;
use ft_core::{FileAttributes, VisitOutcome};

use crate::error::AccessError;

/// Callbacks invoked by the walker.
///
/// Every callback returns the [`VisitOutcome`] that steers the walk, or an
/// error that aborts it. Errors returned by a callback leave the walk as-is:
/// the walker neither wraps nor intercepts them.
///
/// All four callbacks have default bodies. The two failure callbacks re-raise
/// the failure they were given, so a visitor that only overrides
/// [`visit_file`](Self::visit_file) turns any unreadable entry into a failed
/// walk.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use ft_core::{FileAttributes, VisitOutcome};
/// use ft_walker::{FileVisitor, MemoryFs, WalkError, walk_file_tree};
///
/// #[derive(Default)]
/// struct Sizes(u64);
///
/// impl FileVisitor for Sizes {
///     type Error = WalkError;
///
///     fn visit_file(
///         &mut self,
///         _file: &Utf8Path,
///         attrs: &FileAttributes,
///     ) -> Result<VisitOutcome, WalkError> {
///         self.0 += attrs.len;
///         Ok(VisitOutcome::Continue)
///     }
/// }
///
/// let fs = MemoryFs::new().with_file("p/a", 3).with_file("p/q/b", 4);
/// let mut sizes = Sizes::default();
/// walk_file_tree(&fs, Utf8Path::new("p"), &mut sizes).unwrap();
/// assert_eq!(sizes.0, 7);
/// ```
pub trait FileVisitor {
    /// Error type of the callbacks. Must be able to carry a provider failure
    /// so the default failure callbacks can re-raise it.
    type Error: From<AccessError>;

    /// Called before the children of `dir` are visited.
    ///
    /// Returning anything other than [`VisitOutcome::Continue`] skips the
    /// children and [`post_visit_directory`](Self::post_visit_directory);
    /// the outcome is handed straight to the parent level.
    ///
    /// # Errors
    ///
    /// The default never fails.
    fn pre_visit_directory(
        &mut self,
        _dir: &Utf8Path,
        _attrs: &FileAttributes,
    ) -> Result<VisitOutcome, Self::Error> {
        Ok(VisitOutcome::Continue)
    }

    /// Called for every entry visited as a leaf: non-directories, and
    /// directories at the depth limit.
    ///
    /// # Errors
    ///
    /// The default never fails.
    fn visit_file(
        &mut self,
        _file: &Utf8Path,
        _attrs: &FileAttributes,
    ) -> Result<VisitOutcome, Self::Error> {
        Ok(VisitOutcome::Continue)
    }

    /// Called when the attributes of `file` could not be read, or when it
    /// is a directory that could not be opened.
    ///
    /// # Errors
    ///
    /// The default re-raises `error`.
    fn visit_file_failed(
        &mut self,
        _file: &Utf8Path,
        error: AccessError,
    ) -> Result<VisitOutcome, Self::Error> {
        Err(error.into())
    }

    /// Called after the children of `dir` were visited, or after iterating
    /// or closing its stream failed. `error` holds the first such failure.
    ///
    /// # Errors
    ///
    /// The default re-raises `error` when present.
    fn post_visit_directory(
        &mut self,
        _dir: &Utf8Path,
        error: Option<AccessError>,
    ) -> Result<VisitOutcome, Self::Error> {
        match error {
            Some(error) => Err(error.into()),
            None => Ok(VisitOutcome::Continue),
        }
    }
}

impl<V: FileVisitor + ?Sized> FileVisitor for &mut V {
    type Error = V::Error;

    fn pre_visit_directory(
        &mut self,
        dir: &Utf8Path,
        attrs: &FileAttributes,
    ) -> Result<VisitOutcome, Self::Error> {
        (**self).pre_visit_directory(dir, attrs)
    }

    fn visit_file(
        &mut self,
        file: &Utf8Path,
        attrs: &FileAttributes,
    ) -> Result<VisitOutcome, Self::Error> {
        (**self).visit_file(file, attrs)
    }

    fn visit_file_failed(
        &mut self,
        file: &Utf8Path,
        error: AccessError,
    ) -> Result<VisitOutcome, Self::Error> {
        (**self).visit_file_failed(file, error)
    }

    fn post_visit_directory(
        &mut self,
        dir: &Utf8Path,
        error: Option<AccessError>,
    ) -> Result<VisitOutcome, Self::Error> {
        (**self).post_visit_directory(dir, error)
    }
}
