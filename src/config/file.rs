//! Configuration file data structures

use crate::comparator::{Tolerance, DEFAULT_TOLERANCE};
use crate::error::ParityError;
use crate::snapshot::text::DEFAULT_TEXT_LIMIT;
use crate::snapshot::{WalkOptions, DEFAULT_SKIP_TAGS};
use serde::{Deserialize, Serialize};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".layout-parity.toml";

/// layout-parity configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ParityConfig {
    /// Comparison tolerance in pixels
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Maximum grapheme clusters of snapshot text content
    #[serde(default = "default_text_limit")]
    pub text_limit: usize,

    /// Tags excluded from snapshots
    #[serde(default = "default_skip_tags")]
    pub skip_tags: Vec<String>,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_text_limit() -> usize {
    DEFAULT_TEXT_LIMIT
}

fn default_skip_tags() -> Vec<String> {
    DEFAULT_SKIP_TAGS.iter().map(|t| t.to_string()).collect()
}

impl Default for ParityConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            text_limit: default_text_limit(),
            skip_tags: default_skip_tags(),
        }
    }
}

/// Values given on the command line, taking precedence over the file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    /// `--tolerance`
    pub tolerance: Option<f64>,
    /// `--text-limit`
    pub text_limit: Option<usize>,
    /// `--skip-tag`, replaces the configured list when non-empty
    pub skip_tags: Vec<String>,
}

impl ParityConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ParityError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ParityError::InvalidConfig {
                message: format!(
                    "tolerance must be a finite number >= 0 (got {})",
                    self.tolerance
                ),
            });
        }

        if self.text_limit == 0 {
            return Err(ParityError::InvalidConfig {
                message: "text-limit must be at least 1".to_string(),
            });
        }

        if let Some(tag) = self.skip_tags.iter().find(|t| t.trim().is_empty()) {
            return Err(ParityError::InvalidConfig {
                message: format!("skip-tags contains an empty tag name ({:?})", tag),
            });
        }

        Ok(())
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(tolerance) = overrides.tolerance {
            self.tolerance = tolerance;
        }
        if let Some(text_limit) = overrides.text_limit {
            self.text_limit = text_limit;
        }
        if !overrides.skip_tags.is_empty() {
            self.skip_tags = overrides.skip_tags;
        }
        self
    }

    /// Validated comparison tolerance
    pub fn tolerance(&self) -> Result<Tolerance, ParityError> {
        Tolerance::new(self.tolerance)
    }

    /// Walk options for a snapshot of the given kind
    pub fn walk_options(&self, include_styles: bool, include_rects: bool) -> WalkOptions {
        WalkOptions {
            include_styles,
            include_rects,
            skip_tags: self.skip_tags.clone(),
            text_limit: self.text_limit,
        }
    }
}
