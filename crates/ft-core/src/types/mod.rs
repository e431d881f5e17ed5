//! Domain types for the filetree workspace.
//!
//! # Module Organization
//!
//! - `attributes` - Metadata snapshot read for a single path
//! - `outcome` - The result code returned by every visitor callback
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use ft_core::{FileAttributes, FileKind, VisitOutcome};
//! ```

mod attributes;
mod outcome;

pub use attributes::{FileAttributes, FileKind};
pub use outcome::VisitOutcome;
