//! IPRGO Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Turns InterProScan TSV output into per-protein GO term reports in the
//! tab-separated layout WEGO accepts.
//!
//! # Overview
//!
//! - **Loading**: typed, column-checked rows from a headerless TSV ([`loader`])
//! - **Filtering**: scored, significant matches carrying GO terms ([`filter`])
//! - **Aggregation**: one deduplicated GO set per protein ([`aggregate`])
//! - **Reporting**: sorted, deterministic text output ([`report`])
//!
//! # Example
//!
//! ```no_run
//! use iprgo::{GoReportGenerator, PipelineConfig};
//!
//! fn main() -> iprgo::Result<()> {
//!     let generator = GoReportGenerator::new(PipelineConfig::default())?;
//!     let report = generator.run("UMSG1")?;
//!     println!("{} proteins -> {}", report.proteins, report.output.display());
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod annotation;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod pipeline;
pub mod report;

pub use aggregate::GoAssociationTable;
pub use annotation::AnnotationRow;
pub use config::PipelineConfig;
pub use error::{IprGoError, Result};
pub use filter::{FilterDecision, FilterStats, RowFilter};
pub use pipeline::{GoReportGenerator, StrainOutcome, StrainReport};

use clap::Parser;
use std::path::PathBuf;

/// IPRGO - GO term reports from InterProScan tables
///
/// Reads `<input-dir>/<strain>.tsv`, keeps scored matches below the e-value
/// threshold that carry GO terms, and writes
/// `<output-dir>/<strain>.go.wego.txt` with one line per protein.
#[derive(Parser, Debug)]
#[command(name = "iprgo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Strains to process (defaults to the configured strain list)
    pub strains: Vec<String>,

    /// TOML configuration file
    #[arg(short, long, env = "IPRGO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory containing `<strain>.tsv` tables
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// Directory receiving the reports
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Keep matches with an e-value strictly below this
    #[arg(short = 't', long)]
    pub score_threshold: Option<f64>,

    /// Score value meaning "no score reported" (repeatable)
    #[arg(short, long = "sentinel")]
    pub sentinels: Vec<String>,

    /// Stop at the first strain that fails
    #[arg(long)]
    pub fail_fast: bool,

    /// Process strains concurrently
    #[arg(short, long, conflicts_with = "fail_fast")]
    pub parallel: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the CLI reference as Markdown and exit
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

impl Cli {
    /// Layer file, environment, then flags into one configuration
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        self.layer_config(|key| std::env::var(key).ok())
    }

    fn layer_config(&self, var: impl Fn(&str) -> Option<String>) -> Result<PipelineConfig> {
        let config = match self.config {
            Some(ref path) => PipelineConfig::from_file(path)?,
            None => PipelineConfig::default(),
        };
        let mut config = config.merge_vars(var)?;

        if let Some(ref dir) = self.input_dir {
            config.input_dir = dir.clone();
        }

        if let Some(ref dir) = self.output_dir {
            config.output_dir = dir.clone();
        }

        if let Some(threshold) = self.score_threshold {
            config.score_threshold = threshold;
        }

        if !self.sentinels.is_empty() {
            config.score_sentinels = self.sentinels.clone();
        }

        if !self.strains.is_empty() {
            config.strains = self.strains.clone();
        }

        config.dedup_strains();
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "iprgo",
            "--input-dir",
            "/in",
            "-t",
            "1e-9",
            "--sentinel",
            "-",
            "--sentinel",
            "NA",
            "Bgt",
            "Ene",
        ]);
        let config = cli.layer_config(|_| None).unwrap();

        assert_eq!(config.input_dir, PathBuf::from("/in"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.score_threshold, 1e-9);
        assert_eq!(config.score_sentinels, vec!["-", "NA"]);
        assert_eq!(config.strains, vec!["Bgt", "Ene"]);
    }

    #[test]
    fn test_flags_override_environment() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (config::ENV_INPUT_DIR, "/env/in"),
            (config::ENV_OUTPUT_DIR, "/env/out"),
            (config::ENV_SCORE_THRESHOLD, "1e-3"),
        ]);
        let cli = Cli::parse_from(["iprgo", "--output-dir", "/flag/out", "-t", "1e-8", "Bgt"]);

        let config = cli.layer_config(|k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.input_dir, PathBuf::from("/env/in"));
        assert_eq!(config.output_dir, PathBuf::from("/flag/out"));
        assert_eq!(config.score_threshold, 1e-8);
    }

    #[test]
    fn test_no_strains_uses_configured_list() {
        let cli = Cli::parse_from(["iprgo"]);
        let config = cli.layer_config(|_| None).unwrap();
        assert_eq!(config.strains.first().map(String::as_str), Some("Bgh2"));
    }

    #[test]
    fn test_repeated_strains_run_once() {
        let cli = Cli::parse_from(["iprgo", "--parallel", "Bgt", "Ene", "Bgt"]);
        let config = cli.layer_config(|_| None).unwrap();
        assert_eq!(config.strains, vec!["Bgt", "Ene"]);
    }

    #[test]
    fn test_invalid_threshold_flag_fails_validation() {
        let cli = Cli::parse_from(["iprgo", "--score-threshold", "0", "Bgt"]);
        assert!(cli.layer_config(|_| None).is_err());
    }
}
