//! Configuration management for splitspec.
//!
//! This module defines the `Config` struct for tool settings. The
//! configuration can be loaded from a YAML or JSON file or created
//! programmatically.
//!
//! # Examples
//!
//! ```no_run
//! use splitspec_core::config::Config;
//!
//! let mut config = Config::new(".");
//! config.max_schema_depth = 6;
//! ```

// Internal imports (std, crate)
use std::path::Path;

use crate::error::Result;
use crate::tree::{TreeLimits, DEFAULT_MAX_DEPTH};

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Configuration for split-spec indexing and parsing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Workspace root containing the split spec(s)
    pub workspace_root: String,

    /// Maximum `$ref` nesting depth when expanding schema trees
    #[serde(default = "default_max_depth")]
    pub max_schema_depth: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Config {
    /// Create a new Config with default values
    pub fn new(workspace_root: impl Into<String>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            max_schema_depth: default_max_depth(),
        }
    }

    /// Load configuration from a YAML or JSON file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let config = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }

    /// Save configuration to a YAML or JSON file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        fs::write(path, content).await?;
        Ok(())
    }

    /// Tree expansion limits derived from this configuration
    pub fn tree_limits(&self) -> TreeLimits {
        TreeLimits {
            max_depth: self.max_schema_depth,
        }
    }
}
