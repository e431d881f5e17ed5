//! Visit outcome returned by visitor callbacks.
//!
//! This module provides [`VisitOutcome`], the one-shot instruction a visitor
//! returns from each callback to steer the tree walker.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Instruction returned by a visitor callback.
///
/// The walker inspects the outcome of every callback to decide what to do
/// next:
///
/// | Outcome | Effect |
/// |---------|--------|
/// | `Continue` | Keep walking normally |
/// | `Terminate` | Abort the whole walk, no further callbacks |
/// | `SkipSiblings` | Skip the remaining entries of the parent directory |
/// | `SkipSubtree` | Do not descend into the directory just pre-visited |
///
/// # Examples
///
/// ```
/// use ft_core::VisitOutcome;
///
/// let outcome = VisitOutcome::default();
/// assert!(outcome.is_continue());
/// assert_eq!(VisitOutcome::SkipSubtree.label(), "skip_subtree");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitOutcome {
    /// Continue the walk.
    #[default]
    Continue,
    /// Stop the walk immediately.
    ///
    /// No further visitor callbacks are made, including the
    /// `post_visit_directory` callbacks of every open ancestor.
    Terminate,
    /// Skip the remaining siblings of the visited entry.
    ///
    /// The parent directory still receives its `post_visit_directory` call.
    SkipSiblings,
    /// Do not visit the children of the directory.
    ///
    /// Only meaningful from `pre_visit_directory`; elsewhere it behaves like
    /// [`Continue`](Self::Continue).
    SkipSubtree,
}

impl VisitOutcome {
    /// Returns `true` for [`VisitOutcome::Continue`].
    #[inline]
    #[must_use]
    pub const fn is_continue(self) -> bool {
        matches!(self, Self::Continue)
    }

    /// Returns `true` for [`VisitOutcome::Terminate`].
    #[inline]
    #[must_use]
    pub const fn is_terminate(self) -> bool {
        matches!(self, Self::Terminate)
    }

    /// Returns `true` for [`VisitOutcome::SkipSiblings`].
    #[inline]
    #[must_use]
    pub const fn is_skip_siblings(self) -> bool {
        matches!(self, Self::SkipSiblings)
    }

    /// Returns `true` for [`VisitOutcome::SkipSubtree`].
    #[inline]
    #[must_use]
    pub const fn is_skip_subtree(self) -> bool {
        matches!(self, Self::SkipSubtree)
    }

    /// Returns a stable, lowercase label for display and logging.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::Terminate => "terminate",
            Self::SkipSiblings => "skip_siblings",
            Self::SkipSubtree => "skip_subtree",
        }
    }
}

impl fmt::Display for VisitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_continue() {
        assert_eq!(VisitOutcome::default(), VisitOutcome::Continue);
    }

    #[test]
    fn test_predicates_are_exclusive() {
        let all = [
            VisitOutcome::Continue,
            VisitOutcome::Terminate,
            VisitOutcome::SkipSiblings,
            VisitOutcome::SkipSubtree,
        ];
        for outcome in all {
            let hits = [
                outcome.is_continue(),
                outcome.is_terminate(),
                outcome.is_skip_siblings(),
                outcome.is_skip_subtree(),
            ]
            .iter()
            .filter(|hit| **hit)
            .count();
            assert_eq!(hits, 1, "{outcome} matched {hits} predicates");
        }
    }

    #[test]
    fn test_display_matches_serde() {
        for outcome in [VisitOutcome::Continue, VisitOutcome::SkipSiblings] {
            let json = serde_json::to_string(&outcome).unwrap();
            assert_eq!(json, format!("\"{outcome}\""));
        }
    }

    #[test]
    fn test_deserialize() {
        let outcome: VisitOutcome = serde_json::from_str(r#""terminate""#).unwrap();
        assert!(outcome.is_terminate());
    }
}
