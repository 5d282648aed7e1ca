//! Row Filter
//!
//! A row reaches the report only when all of these hold:
//!
//! 1. its score is not a "not applicable" sentinel (Coils, MobiDBLite,
//!    Phobius and ProSitePatterns report none),
//! 2. the score parsed as a float is strictly below the threshold,
//! 3. the GO column carries at least one identifier.
//!
//! The sentinel check always runs before the float parse. A score that is
//! neither a sentinel nor a float is a hard error.

use crate::annotation::AnnotationRow;
use crate::error::{IprGoError, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

/// Default e-value cut-off
pub const DEFAULT_SCORE_THRESHOLD: f64 = 1e-6;

/// Default "no score reported" marker
pub const DEFAULT_SCORE_SENTINEL: &str = "-";

/// Outcome of checking one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Keep,
    /// Score column holds a sentinel
    NoScore,
    /// Score is at or above the threshold (or NaN)
    AboveThreshold,
    /// GO column is absent or empty
    NoGoTerms,
}

/// Row counts for one filtering pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub rows_read: usize,
    pub kept: usize,
    pub no_score: usize,
    pub above_threshold: usize,
    pub no_go_terms: usize,
}

impl FilterStats {
    pub fn record(&mut self, decision: FilterDecision) {
        self.rows_read += 1;
        match decision {
            FilterDecision::Keep => self.kept += 1,
            FilterDecision::NoScore => self.no_score += 1,
            FilterDecision::AboveThreshold => self.above_threshold += 1,
            FilterDecision::NoGoTerms => self.no_go_terms += 1,
        }
    }

    pub fn dropped(&self) -> usize {
        self.rows_read - self.kept
    }
}

/// Score and GO predicates applied to every annotation row
#[derive(Debug, Clone, PartialEq)]
pub struct RowFilter {
    threshold: f64,
    sentinels: BTreeSet<String>,
}

impl Default for RowFilter {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_THRESHOLD, [DEFAULT_SCORE_SENTINEL])
    }
}

impl RowFilter {
    pub fn new<I, S>(threshold: f64, sentinels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            threshold,
            sentinels: sentinels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_sentinel(&self, score: &str) -> bool {
        self.sentinels.contains(score.trim())
    }

    /// Decide whether `row` belongs in the report
    ///
    /// `source` names the table the row came from, for error messages.
    pub fn evaluate(&self, row: &AnnotationRow, source: &Path) -> Result<FilterDecision> {
        if self.is_sentinel(&row.score) {
            return Ok(FilterDecision::NoScore);
        }

        let score = row
            .score
            .trim()
            .parse::<f64>()
            .map_err(|_| IprGoError::ScoreParse {
                path: source.to_path_buf(),
                line: row.line,
                value: row.score.clone(),
            })?;

        if score.is_nan() || score >= self.threshold {
            return Ok(FilterDecision::AboveThreshold);
        }

        if !row.has_go_terms() {
            return Ok(FilterDecision::NoGoTerms);
        }

        Ok(FilterDecision::Keep)
    }

    /// Keep the qualifying rows, in input order
    pub fn filter_rows<I>(&self, rows: I, source: &Path) -> Result<(Vec<AnnotationRow>, FilterStats)>
    where
        I: IntoIterator<Item = AnnotationRow>,
    {
        let mut stats = FilterStats::default();
        let mut kept = Vec::new();

        for row in rows {
            let decision = self.evaluate(&row, source)?;
            stats.record(decision);
            if decision == FilterDecision::Keep {
                kept.push(row);
            }
        }

        Ok((kept, stats))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::annotation::test_support::row;

    fn src() -> &'static Path {
        Path::new("test.tsv")
    }

    #[test]
    fn test_significant_row_with_go_is_kept() {
        let filter = RowFilter::default();
        let r = row("P51587", "3.1E-52", Some("GO:0005515|GO:0003677"));
        assert_eq!(filter.evaluate(&r, src()).unwrap(), FilterDecision::Keep);
    }

    #[test]
    fn test_sentinel_score_is_dropped_regardless_of_go() {
        let filter = RowFilter::default();
        let r = row("P1", "-", Some("GO:0005515"));
        assert_eq!(filter.evaluate(&r, src()).unwrap(), FilterDecision::NoScore);
    }

    #[test]
    fn test_score_at_or_above_threshold_is_dropped() {
        let filter = RowFilter::default();
        for score in ["1.0", "1e-6", "1.0E-6", "0.5", "NaN"] {
            let r = row("P1", score, Some("GO:0005515"));
            assert_eq!(
                filter.evaluate(&r, src()).unwrap(),
                FilterDecision::AboveThreshold,
                "score {}",
                score
            );
        }
        let r = row("P1", "9.9e-7", Some("GO:0005515"));
        assert_eq!(filter.evaluate(&r, src()).unwrap(), FilterDecision::Keep);
    }

    #[test]
    fn test_missing_go_is_dropped() {
        let filter = RowFilter::default();
        assert_eq!(
            filter.evaluate(&row("P1", "1e-20", None), src()).unwrap(),
            FilterDecision::NoGoTerms
        );
        assert_eq!(
            filter.evaluate(&row("P1", "1e-20", Some("")), src()).unwrap(),
            FilterDecision::NoGoTerms
        );
    }

    #[test]
    fn test_unparseable_score_fails_loud() {
        let filter = RowFilter::default();
        let mut r = row("P1", "abc", Some("GO:0005515"));
        r.line = 12;

        let err = filter.evaluate(&r, src()).unwrap_err();
        match err {
            IprGoError::ScoreParse { line, value, .. } => {
                assert_eq!(line, 12);
                assert_eq!(value, "abc");
            },
            other => panic!("expected score parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_sentinels() {
        let filter = RowFilter::new(1e-6, ["-", "NA"]);
        assert!(filter.is_sentinel("NA"));
        assert_eq!(
            filter.evaluate(&row("P1", "NA", Some("GO:1")), src()).unwrap(),
            FilterDecision::NoScore
        );
    }

    #[test]
    fn test_filter_rows_keeps_order_and_counts() {
        let filter = RowFilter::default();
        let rows = vec![
            row("P3", "1e-30", Some("GO:0000003")),
            row("P1", "-", Some("GO:0000001")),
            row("P2", "0.1", Some("GO:0000002")),
            row("P4", "1e-9", None),
            row("P0", "2e-8", Some("GO:0000000")),
        ];

        let (kept, stats) = filter.filter_rows(rows, src()).unwrap();
        let accessions: Vec<&str> = kept.iter().map(|r| r.protein_accession.as_str()).collect();
        assert_eq!(accessions, vec!["P3", "P0"]);
        assert_eq!(
            stats,
            FilterStats {
                rows_read: 5,
                kept: 2,
                no_score: 1,
                above_threshold: 1,
                no_go_terms: 1,
            }
        );
        assert_eq!(stats.dropped(), 3);
    }
}
