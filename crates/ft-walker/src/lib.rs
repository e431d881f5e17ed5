//! Visitor-driven depth-first file tree walker.
//!
//! This crate walks a tree of files and directories, calling back into a
//! [`FileVisitor`] at each step. The visitor steers the traversal through the
//! [`VisitOutcome`](ft_core::VisitOutcome) it returns from every callback.
//!
//! # Overview
//!
//! - [`walk`] / [`walk_file_tree`] / [`TreeWalker`]: the traversal itself
//! - [`AttributeReader`], [`DirectoryEnumerator`], [`DirectoryStream`]: the
//!   provider seam the walker reads the tree through
//! - [`LocalFs`]: provider backed by the local file system
//! - [`MemoryFs`]: deterministic in-memory provider with failure injection
//! - [`CountingVisitor`], [`FileCollector`]: ready-made visitors
//!
//! # Example
//!
//! ```ignore
//! use camino::Utf8Path;
//! use ft_walker::{FileCollector, LocalFs, walk_file_tree};
//!
//! let mut collector = FileCollector::new();
//! walk_file_tree(&LocalFs::new(), Utf8Path::new("./src"), &mut collector)?;
//!
//! for file in collector.files() {
//!     println!("{file}");
//! }
//! ```
//!
//! # Callback Order
//!
//! ```text
//! walk(dir)
//!     │
//!     ├── read_attributes ──(fails)──> visit_file_failed
//!     ├── open_directory ───(fails)──> visit_file_failed
//!     ├── pre_visit_directory
//!     ├── walk(child) for each child
//!     ├── close stream
//!     └── post_visit_directory(first iteration/close failure)
//! ```
//!
//! Provider failures are handed to the visitor, never raised directly. Errors
//! returned by the visitor end the walk unchanged.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod error;
mod local;
mod memory;
mod source;
mod visitor;
mod visitors;
mod walker;

pub use error::{AccessError, AccessOp, WalkError};
pub use local::{LocalDirStream, LocalFs};
pub use memory::{MemoryDirStream, MemoryFs};
pub use source::{AttributeReader, DirectoryEnumerator, DirectoryStream};
pub use visitor::FileVisitor;
pub use visitors::{CountingVisitor, FileCollector, WalkStats};
pub use walker::{TreeWalker, walk, walk_file_tree};
