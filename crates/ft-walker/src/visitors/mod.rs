//! Ready-made visitors.
//!
//! - [`CountingVisitor`]: tallies directories, leaves, bytes and failures
//! - [`FileCollector`]: collects the paths of every non-directory leaf
//!
//! Both honor a [`FailurePolicy`]: `Propagate` keeps the default re-raise,
//! `Skip` logs the failure and keeps walking.

mod collector;
mod counting;

pub use collector::FileCollector;
pub use counting::{CountingVisitor, WalkStats};

use camino::Utf8Path;
use ft_core::{FailurePolicy, VisitOutcome};
use tracing::warn;

use crate::error::{AccessError, WalkError};

/// Applies `policy` to a provider failure.
pub(crate) fn handle_failure(
    policy: FailurePolicy,
    path: &Utf8Path,
    error: AccessError,
) -> Result<VisitOutcome, WalkError> {
    match policy {
        FailurePolicy::Propagate => Err(error.into()),
        FailurePolicy::Skip => {
            warn!(path = %path, %error, "skipping unreadable entry");
            Ok(VisitOutcome::Continue)
        }
    }
}
