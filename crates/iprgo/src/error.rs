//! Error types for IPRGO
//!
//! Every failure is fatal to the strain being processed. Messages name the
//! strain or file involved so a batch run can be diagnosed from its log.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for IPRGO operations
pub type Result<T> = std::result::Result<T, IprGoError>;

#[derive(Error, Debug)]
pub enum IprGoError {
    /// No annotation table at the conventional location for a strain
    #[error("Input not found for strain '{strain}': '{}' does not exist", .path.display())]
    InputNotFound { strain: String, path: PathBuf },

    /// A record does not have the fixed InterProScan column count
    #[error("Schema mismatch in '{}' at line {line}: expected {expected} columns, found {found}", .path.display())]
    SchemaMismatch {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A typed column holds a value of the wrong type
    #[error("Invalid {column} in '{}' at line {line}: '{value}'", .path.display())]
    InvalidField {
        path: PathBuf,
        line: u64,
        column: &'static str,
        value: String,
    },

    /// A score that is neither a known sentinel nor a float
    #[error("Unparseable score in '{}' at line {line}: '{value}' is not a number or a known sentinel", .path.display())]
    ScoreParse { path: PathBuf, line: u64, value: String },

    /// The report could not be created or written
    #[error("Failed to write report '{}': {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Low-level read failure while scanning a table
    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IprGoError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an output write error for `path`
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }

    /// Short machine-friendly category, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InputNotFound { .. } => "input_not_found",
            Self::SchemaMismatch { .. } => "schema_mismatch",
            Self::InvalidField { .. } => "invalid_field",
            Self::ScoreParse { .. } => "score_parse",
            Self::OutputWrite { .. } => "output_write",
            Self::Read { .. } => "read",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_strain_and_file() {
        let err = IprGoError::InputNotFound {
            strain: "Bgt".to_string(),
            path: PathBuf::from("data/Bgt.tsv"),
        };
        let msg = err.to_string();
        assert!(msg.contains("Bgt"));
        assert!(msg.contains("data/Bgt.tsv"));
        assert_eq!(err.kind(), "input_not_found");

        let err = IprGoError::ScoreParse {
            path: PathBuf::from("data/Ene.tsv"),
            line: 7,
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unparseable score in 'data/Ene.tsv' at line 7: 'abc' is not a number or a known sentinel"
        );
    }

    #[test]
    fn test_schema_mismatch_message() {
        let err = IprGoError::SchemaMismatch {
            path: PathBuf::from("x.tsv"),
            line: 3,
            expected: 15,
            found: 11,
        };
        assert_eq!(
            err.to_string(),
            "Schema mismatch in 'x.tsv' at line 3: expected 15 columns, found 11"
        );
    }
}
