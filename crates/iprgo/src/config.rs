//! Pipeline configuration
//!
//! Layered lowest to highest: built-in defaults, optional TOML file,
//! `IPRGO_*` environment variables, then whatever the caller sets explicitly
//! (the CLI applies its flags last).
//!
//! ```toml
//! input_dir = "data"
//! output_dir = "output"
//! score_threshold = 1e-6
//! score_sentinels = ["-"]
//! strains = ["Bgh2", "Bgt"]
//! ```

use crate::error::{IprGoError, Result};
use crate::filter::{RowFilter, DEFAULT_SCORE_SENTINEL, DEFAULT_SCORE_THRESHOLD};
use crate::report::DEFAULT_OUTPUT_SUFFIX;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration Constants
// ============================================================================

pub const DEFAULT_INPUT_DIR: &str = "data";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_INPUT_EXTENSION: &str = ".tsv";

/// Powdery mildew and smut strains the batch was first run over
pub const DEFAULT_STRAINS: [&str; 8] =
    ["Bgh2", "BghR1", "Bgt", "Ene", "UCSC1", "UMSG1", "UMSG2", "UMSG3"];

pub const ENV_INPUT_DIR: &str = "IPRGO_INPUT_DIR";
pub const ENV_OUTPUT_DIR: &str = "IPRGO_OUTPUT_DIR";
pub const ENV_SCORE_THRESHOLD: &str = "IPRGO_SCORE_THRESHOLD";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory holding `<strain><input_extension>` tables
    pub input_dir: PathBuf,

    /// Directory receiving `<strain><output_suffix>` reports
    pub output_dir: PathBuf,

    pub input_extension: String,

    pub output_suffix: String,

    /// Rows need a score strictly below this
    pub score_threshold: f64,

    /// Score values meaning "no score reported"
    pub score_sentinels: Vec<String>,

    /// Strains processed when none are named explicitly
    pub strains: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            input_extension: DEFAULT_INPUT_EXTENSION.to_string(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            score_sentinels: vec![DEFAULT_SCORE_SENTINEL.to_string()],
            strains: DEFAULT_STRAINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PipelineConfig {
    /// Load a TOML file; missing keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            IprGoError::config(format!("cannot read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&content)
            .map_err(|e| IprGoError::config(format!("'{}': {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| IprGoError::config(e.to_string()))
    }

    /// Apply `IPRGO_INPUT_DIR`, `IPRGO_OUTPUT_DIR` and `IPRGO_SCORE_THRESHOLD`
    pub fn merge_env(self) -> Result<Self> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    pub(crate) fn merge_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(dir) = var(ENV_INPUT_DIR) {
            self.input_dir = PathBuf::from(dir);
        }

        if let Some(dir) = var(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(dir);
        }

        if let Some(raw) = var(ENV_SCORE_THRESHOLD) {
            self.score_threshold = raw.trim().parse().map_err(|_| {
                IprGoError::config(format!("{} must be a number, got '{}'", ENV_SCORE_THRESHOLD, raw))
            })?;
        }

        Ok(self)
    }

    /// Drop repeated strains, keeping the first occurrence of each
    ///
    /// Two workers on the same strain would race on one report file.
    pub fn dedup_strains(&mut self) {
        let mut seen = HashSet::new();
        self.strains.retain(|strain| seen.insert(strain.clone()));
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(IprGoError::config("input directory cannot be empty"));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(IprGoError::config("output directory cannot be empty"));
        }

        if self.output_suffix.is_empty() {
            return Err(IprGoError::config("output suffix cannot be empty"));
        }

        if !self.score_threshold.is_finite() || self.score_threshold <= 0.0 {
            return Err(IprGoError::config(format!(
                "score threshold must be a positive number, got {}",
                self.score_threshold
            )));
        }

        if self.score_sentinels.is_empty() {
            return Err(IprGoError::config("at least one score sentinel is required"));
        }

        Ok(())
    }

    pub fn row_filter(&self) -> RowFilter {
        RowFilter::new(self.score_threshold, self.score_sentinels.iter().map(String::as_str))
    }
}
