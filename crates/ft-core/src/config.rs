//! Configuration structures for the filetree workspace.
//!
//! This module provides configuration types for the walker and the CLI:
//!
//! - [`WalkConfig`] - Traversal settings (depth limit, links, ordering, failures)
//! - [`OutputConfig`] - How the CLI renders results
//! - [`Config`] - Root configuration combining all settings
//!
//! All configuration types implement [`Default`] and deserialize with
//! `#[serde(default)]`, so a configuration file only needs the keys it changes.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What a ready-made visitor does when an entry cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Re-raise the failure, aborting the walk.
    #[default]
    Propagate,
    /// Log the failure and keep walking.
    Skip,
}

/// Output format used by the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Configuration for a tree walk.
///
/// # Examples
///
/// ```
/// use ft_core::{FailurePolicy, WalkConfig};
///
/// let config = WalkConfig::default();
/// assert_eq!(config.max_depth, None);
/// assert_eq!(config.effective_max_depth(), usize::MAX);
/// assert!(!config.follow_links);
/// assert_eq!(config.on_failure, FailurePolicy::Propagate);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Maximum depth to descend. `None` means unlimited.
    ///
    /// A depth of `0` visits only the start path itself, as a leaf.
    pub max_depth: Option<usize>,

    /// Whether to follow symbolic links when reading attributes.
    pub follow_links: bool,

    /// Whether directory children are yielded in file-name order.
    pub sort_entries: bool,

    /// What ready-made visitors do with unreadable entries.
    pub on_failure: FailurePolicy,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            follow_links: false,
            sort_entries: true,
            on_failure: FailurePolicy::Propagate,
        }
    }
}

impl WalkConfig {
    /// Returns the depth limit with `None` mapped to [`usize::MAX`].
    #[inline]
    #[must_use]
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.unwrap_or(usize::MAX)
    }
}

/// Configuration for CLI output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format.
    pub format: OutputFormat,
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use ft_core::Config;
///
/// let config = Config::from_json_str(r#"{"walk": {"max_depth": 2}}"#).unwrap();
/// assert_eq!(config.walk.max_depth, Some(2));
/// assert!(config.walk.sort_entries);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Walker configuration.
    pub walk: WalkConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the JSON is malformed or has the
    /// wrong shape.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if `path` does not exist,
    /// [`ConfigError::Io`] if it cannot be read and [`ConfigError::Parse`]
    /// if its content is not a valid configuration.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_owned()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
