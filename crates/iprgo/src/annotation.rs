//! InterProScan Annotation Model
//!
//! One [`AnnotationRow`] per line of an InterProScan TSV table. Columns are
//! positional (the file has no header):
//!
//! ```text
//! Protein Accession        P51587
//! Sequence MD5 digest      14086411a2cdf1c4cba63020e1622579
//! Sequence Length          3418
//! Analysis                 Pfam / PRINTS / Gene3D
//! Signature Accession      PF09103 / G3DSA:2.40.50.140
//! Signature Description    BRCA2 repeat profile
//! Start location
//! Stop location
//! Score                    e-value of the match, or "-" (e.g. 3.1E-52)
//! Status                   T
//! Date                     run date
//! InterPro accession       IPR002093        (optional)
//! InterPro description     BRCA2 repeat     (optional)
//! GO annotations           GO:0005515|...   (optional)
//! Pathways annotations     REACT_71|...     (optional)
//! ```

use serde::{Deserialize, Serialize};

/// Number of columns in a full InterProScan TSV record
pub const COLUMN_COUNT: usize = 15;

/// Column names in file order
pub const COLUMN_NAMES: [&str; COLUMN_COUNT] = [
    "protein_accession",
    "sequence_md5",
    "sequence_length",
    "analysis_method",
    "signature_accession",
    "signature_description",
    "start",
    "end",
    "score",
    "status",
    "date",
    "interpro_accession",
    "interpro_description",
    "go_terms",
    "pathway",
];

/// Separator between identifiers in the GO and pathway columns
pub const GO_TERM_DELIMITER: char = '|';

/// Placeholder InterProScan writes into optional columns it has no value for
pub const MISSING_VALUE: &str = "-";

/// A single domain match from an InterProScan TSV table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRow {
    pub protein_accession: String,
    pub sequence_md5: String,
    pub sequence_length: u32,
    /// Member database or tool that produced the match (Pfam, Gene3D, Coils...)
    pub analysis_method: String,
    pub signature_accession: String,
    pub signature_description: String,
    pub start: u32,
    pub end: u32,
    /// Raw score text; either an e-value or a "not applicable" sentinel
    pub score: String,
    pub status: String,
    pub date: String,
    pub interpro_accession: Option<String>,
    pub interpro_description: Option<String>,
    /// `|`-joined GO identifiers
    pub go_terms: Option<String>,
    pub pathway: Option<String>,

    /// 1-based line in the source table, 0 for rows built in memory
    #[serde(default)]
    pub line: u64,
}

impl AnnotationRow {
    /// Individual GO identifiers attached to this match
    ///
    /// Empty tokens (an empty column, `GO:1||GO:2`, trailing `|`) contribute
    /// nothing.
    pub fn go_term_list(&self) -> impl Iterator<Item = &str> {
        self.go_terms
            .as_deref()
            .unwrap_or_default()
            .split(GO_TERM_DELIMITER)
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// Whether the GO column carries at least one identifier
    pub fn has_go_terms(&self) -> bool {
        self.go_term_list().next().is_some()
    }
}

/// Read an optional column, mapping empty cells and the missing marker to `None`
pub fn optional_column(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() || value == MISSING_VALUE {
        None
    } else {
        Some(value.to_string())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::row;
    use super::*;

    #[test]
    fn test_column_names_cover_schema() {
        assert_eq!(COLUMN_NAMES.len(), COLUMN_COUNT);
        assert_eq!(COLUMN_NAMES[8], "score");
        assert_eq!(COLUMN_NAMES[13], "go_terms");
    }

    #[test]
    fn test_go_term_list_splits_on_pipe() {
        let r = row("P51587", "3.1E-52", Some("GO:0005515|GO:0003677"));
        let terms: Vec<&str> = r.go_term_list().collect();
        assert_eq!(terms, vec!["GO:0005515", "GO:0003677"]);
        assert!(r.has_go_terms());
    }

    #[test]
    fn test_go_term_list_ignores_empty_tokens() {
        let r = row("P1", "1e-10", Some(""));
        assert_eq!(r.go_term_list().count(), 0);
        assert!(!r.has_go_terms());

        let r = row("P1", "1e-10", Some("GO:0000001||GO:0000002|"));
        assert_eq!(r.go_term_list().count(), 2);

        let r = row("P1", "1e-10", None);
        assert!(!r.has_go_terms());
    }

    #[test]
    fn test_optional_column() {
        assert_eq!(optional_column(""), None);
        assert_eq!(optional_column("-"), None);
        assert_eq!(optional_column(" IPR002093 "), Some("IPR002093".to_string()));
    }
}
