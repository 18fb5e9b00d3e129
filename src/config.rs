//! Conversion settings, persisted as TOML.
//!
//! ```toml
//! diagnostics = true
//! marker = "**blank**"
//! max_depth = 512
//! ```

use std::path::Path;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rewrite::{DEFAULT_MARKER, RewriteOptions};
use crate::tree::DEFAULT_MAX_DEPTH;

/// Errors from loading or saving a configuration file.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(qcloze::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}: {message}")]
    #[diagnostic(
        code(qcloze::config::parse),
        help("Check the TOML syntax. Known keys: diagnostics, marker, max_depth.")
    )]
    Parse { path: String, message: String },

    #[error("invalid config: {path}: {message}")]
    #[diagnostic(
        code(qcloze::config::invalid),
        help(
            "`marker` must contain visible text so every statement shows where the \
             answer goes, and `max_depth` must be at least 1."
        )
    )]
    Invalid { path: String, message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(qcloze::config::write),
        help("Ensure you have write permissions to the target directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClozeConfig {
    /// Log the failing question and its raw parse when a rewrite fails.
    #[serde(default)]
    pub diagnostics: bool,
    /// Placeholder inserted where the answer belongs.
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Maximum bracket nesting accepted by the parser.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_marker() -> String {
    DEFAULT_MARKER.into()
}
fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for ClozeConfig {
    fn default() -> Self {
        Self {
            diagnostics: false,
            marker: default_marker(),
            max_depth: default_max_depth(),
        }
    }
}

impl ClozeConfig {
    /// The options threaded into [`crate::rewrite::adjust_order`].
    pub fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions {
            diagnostics: self.diagnostics,
            marker: self.marker.clone(),
        }
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate().map_err(|message| ConfigError::Invalid {
            path: path.display().to_string(),
            message,
        })?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot produce a usable
    /// statement.
    pub fn validate(&self) -> Result<(), String> {
        if self.marker.trim().is_empty() {
            return Err("marker is empty".into());
        }
        if self.max_depth == 0 {
            return Err("max_depth is 0".into());
        }
        Ok(())
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}
