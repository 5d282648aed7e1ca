//! GO Report Pipeline
//!
//! load -> filter -> aggregate -> write, for one strain at a time. Rows are
//! streamed: each one is checked and folded into the association table as
//! it is read, so memory is bounded by the number of proteins, not the size
//! of the table.

use crate::aggregate::GoAssociationTable;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::filter::{FilterDecision, FilterStats, RowFilter};
use crate::loader::{locate_input, AnnotationReader};
use crate::report::{output_path, write_report_file};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, error, info, instrument};

/// Summary of one successful strain run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrainReport {
    pub strain: String,
    pub input: PathBuf,
    pub output: PathBuf,
    pub stats: FilterStats,
    /// Proteins with at least one GO term
    pub proteins: usize,
    /// Distinct (protein, GO term) pairs written
    pub associations: usize,
}

/// Result of one strain inside a batch
#[derive(Debug)]
pub struct StrainOutcome {
    pub strain: String,
    pub result: Result<StrainReport>,
}

impl StrainOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Builds per-strain GO reports from InterProScan tables
#[derive(Debug, Clone)]
pub struct GoReportGenerator {
    config: PipelineConfig,
    filter: RowFilter,
}

impl GoReportGenerator {
    /// Create a generator; the configuration is validated up front
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let filter = config.row_filter();
        Ok(Self { config, filter })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Report location for a strain
    pub fn output_path(&self, strain: &str) -> PathBuf {
        output_path(&self.config.output_dir, &self.config.output_suffix, strain)
    }

    /// Read and aggregate a strain's table without writing anything
    pub fn build_table(&self, strain: &str) -> Result<(GoAssociationTable, FilterStats, PathBuf)> {
        let input = locate_input(&self.config.input_dir, &self.config.input_extension, strain)?;
        let mut table = GoAssociationTable::new();
        let mut stats = FilterStats::default();

        for row in AnnotationReader::open(&input)? {
            let row = row?;
            let decision = self.filter.evaluate(&row, &input)?;
            stats.record(decision);

            if decision == FilterDecision::Keep {
                table.insert_row(&row);
            }
        }

        debug!(
            strain,
            rows = stats.rows_read,
            kept = stats.kept,
            no_score = stats.no_score,
            above_threshold = stats.above_threshold,
            no_go_terms = stats.no_go_terms,
            "Filtered annotation rows"
        );

        Ok((table, stats, input))
    }

    /// Produce the report for one strain
    #[instrument(skip(self), fields(input_dir = %self.config.input_dir.display()))]
    pub fn run(&self, strain: &str) -> Result<StrainReport> {
        let (table, stats, input) = self.build_table(strain)?;
        let output = self.output_path(strain);

        write_report_file(&table, &output)?;

        let report = StrainReport {
            strain: strain.to_string(),
            input,
            output,
            stats,
            proteins: table.len(),
            associations: table.term_count(),
        };

        info!(
            strain,
            output = %report.output.display(),
            proteins = report.proteins,
            associations = report.associations,
            "GO report written"
        );

        Ok(report)
    }

    /// Process strains in order
    ///
    /// A failing strain is logged and recorded; the rest still run unless
    /// `fail_fast` is set.
    pub fn run_all<S: AsRef<str>>(&self, strains: &[S], fail_fast: bool) -> Vec<StrainOutcome> {
        let mut outcomes = Vec::with_capacity(strains.len());

        for strain in strains {
            let outcome = self.run_logged(strain.as_ref());
            let failed = !outcome.is_success();
            outcomes.push(outcome);

            if failed && fail_fast {
                break;
            }
        }

        outcomes
    }

    /// Run one strain, logging a failure instead of returning early
    pub fn run_logged(&self, strain: &str) -> StrainOutcome {
        let result = self.run(strain);

        if let Err(ref e) = result {
            error!(strain, kind = e.kind(), error = %e, "Strain failed");
        }

        StrainOutcome {
            strain: strain.to_string(),
            result,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::IprGoError;
    use std::path::Path;

    const TABLE: &str = "\
P51587\tabc123\t3418\tPfam\tPF09103\tdesc\t1\t100\t3.1E-52\tT\t2020-01-01\t\t\tGO:0005515|GO:0003677\t
P51587\tabc123\t3418\tGene3D\tG3DSA:2.40.50.140\tdesc\t5\t90\t1.2E-20\tT\t2020-01-01\tIPR002093\tBRCA2 repeat\tGO:0005515\t
P51587\tabc123\t3418\tCoils\tCoil\tCoil\t200\t220\t-\tT\t2020-01-01\t\t\tGO:0000001\t
Q9Y6K9\txyz789\t200\tSMART\tSM00130\tdesc\t50\t150\t1.0\tT\t2020-01-01\t\t\tGO:0016787\t
A0A000\txyz789\t120\tPfam\tPF00001\tdesc\t3\t60\t1e-30\tT\t2020-01-01\t\t\t\t
";

    fn setup(strains: &[(&str, &str)]) -> (tempfile::TempDir, GoReportGenerator) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data");
        std::fs::create_dir_all(&input).unwrap();
        for (strain, content) in strains {
            std::fs::write(input.join(format!("{}.tsv", strain)), content).unwrap();
        }

        let config = PipelineConfig {
            input_dir: input,
            output_dir: dir.path().join("output"),
            ..PipelineConfig::default()
        };
        (dir, GoReportGenerator::new(config).unwrap())
    }

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_run_writes_sorted_deduplicated_report() {
        let (_dir, generator) = setup(&[("Bgt", TABLE)]);
        let report = generator.run("Bgt").unwrap();

        assert_eq!(read(&report.output), "P51587\tGO:0003677\tGO:0005515\n");
        assert_eq!(report.proteins, 1);
        assert_eq!(report.associations, 2);
        assert_eq!(report.stats.rows_read, 5);
        assert_eq!(report.stats.kept, 2);
        assert_eq!(report.stats.no_score, 1);
        assert_eq!(report.stats.above_threshold, 1);
        assert_eq!(report.stats.no_go_terms, 1);
        assert!(report.output.ends_with("output/Bgt.go.wego.txt"));
    }

    #[test]
    fn test_run_is_idempotent() {
        let (_dir, generator) = setup(&[("Ene", TABLE)]);
        let first = read(&generator.run("Ene").unwrap().output);
        let second = read(&generator.run("Ene").unwrap().output);
        assert_eq!(first, second);
    }

    #[test]
    fn test_row_order_does_not_change_report() {
        let reversed: String = TABLE.lines().rev().map(|l| format!("{}\n", l)).collect();
        let (_dir, generator) = setup(&[("A", TABLE), ("B", reversed.as_str())]);

        let a = read(&generator.run("A").unwrap().output);
        let b = read(&generator.run("B").unwrap().output);
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_strain_is_input_not_found() {
        let (_dir, generator) = setup(&[]);
        let err = generator.run("UMSG3").unwrap_err();
        assert!(matches!(err, IprGoError::InputNotFound { .. }));
        assert!(!generator.output_path("UMSG3").exists());
    }

    #[test]
    fn test_bad_score_fails_strain() {
        let bad = TABLE.replace("1.2E-20", "1.2X-20");
        let (_dir, generator) = setup(&[("Bgh2", bad.as_str())]);
        let err = generator.run("Bgh2").unwrap_err();
        assert!(matches!(err, IprGoError::ScoreParse { line: 2, .. }));
    }

    #[test]
    fn test_run_all_continues_past_failures() {
        let (_dir, generator) = setup(&[("Bgt", TABLE), ("UMSG1", TABLE)]);
        let outcomes = generator.run_all(&["Bgt", "missing", "UMSG1"], false);

        let ok: Vec<bool> = outcomes.iter().map(StrainOutcome::is_success).collect();
        assert_eq!(ok, vec![true, false, true]);
        assert_eq!(outcomes[1].strain, "missing");
    }

    #[test]
    fn test_run_all_fail_fast_stops() {
        let (_dir, generator) = setup(&[("Bgt", TABLE)]);
        let outcomes = generator.run_all(&["missing", "Bgt"], true);
        assert_eq!(outcomes.len(), 1);
        assert!(!generator.output_path("Bgt").exists());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = PipelineConfig {
            score_threshold: -1.0,
            ..PipelineConfig::default()
        };
        assert!(GoReportGenerator::new(config).is_err());
    }
}
