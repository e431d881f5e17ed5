//! Core types, errors, and configuration for the filetree workspace.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - [`VisitOutcome`], the instruction a visitor hands back to the walker
//! - [`FileAttributes`] and [`FileKind`], the metadata snapshot for a path
//! - Configuration structures ([`Config`], [`WalkConfig`], [`OutputConfig`])
//! - [`ConfigError`] for configuration loading

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, FailurePolicy, OutputConfig, OutputFormat, WalkConfig};
pub use error::ConfigError;
pub use types::{FileAttributes, FileKind, VisitOutcome};
