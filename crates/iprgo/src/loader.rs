//! InterProScan TSV Loader
//!
//! Streams a headerless, tab-separated InterProScan table into typed
//! [`AnnotationRow`]s. Every record must have exactly [`COLUMN_COUNT`]
//! columns; a short or long record stops the read with
//! [`IprGoError::SchemaMismatch`] instead of shifting values into the wrong
//! fields.
//!
//! Fields are never quoted. Blank lines are skipped and CRLF endings are
//! accepted; line numbers in errors are physical lines of the file.

use crate::annotation::{optional_column, AnnotationRow, COLUMN_COUNT, COLUMN_NAMES};
use crate::error::{IprGoError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Column separator
pub const FIELD_DELIMITER: char = '\t';

/// Resolve and check the annotation table for a strain
///
/// The table lives at `<input_dir>/<strain><extension>`.
pub fn locate_input(input_dir: &Path, extension: &str, strain: &str) -> Result<PathBuf> {
    let path = input_dir.join(format!("{}{}", strain, extension));

    if !path.is_file() {
        return Err(IprGoError::InputNotFound {
            strain: strain.to_string(),
            path,
        });
    }

    Ok(path)
}

/// Iterator over the rows of one annotation table, in file order
pub struct AnnotationReader<R: Read> {
    lines: Lines<BufReader<R>>,
    /// Physical line of the last line read, 1-based
    line_number: u64,
    path: PathBuf,
}

impl AnnotationReader<File> {
    /// Open a table on disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        debug!(path = %path.display(), "Opened annotation table");
        Ok(Self::from_reader(file, path))
    }
}

impl<R: Read> AnnotationReader<R> {
    /// Read a table from any source; `path` is only used in error messages
    pub fn from_reader(reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
            line_number: 0,
            path: path.into(),
        }
    }

    /// Path reported in errors for this table
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse one line (without its terminator) into a row
    ///
    /// Format: ProteinAcc MD5 Length Analysis SigAcc SigDesc Start Stop Score Status Date IprAcc IprDesc GO Pathways
    pub fn parse_line(&self, line: &str) -> Result<AnnotationRow> {
        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        let line_number = self.line_number;

        if fields.len() != COLUMN_COUNT {
            return Err(IprGoError::SchemaMismatch {
                path: self.path.clone(),
                line: line_number,
                expected: COLUMN_COUNT,
                found: fields.len(),
            });
        }

        let integer = |idx: usize| -> Result<u32> {
            let raw = fields[idx].trim();
            raw.parse::<u32>().map_err(|_| IprGoError::InvalidField {
                path: self.path.clone(),
                line: line_number,
                column: COLUMN_NAMES[idx],
                value: raw.to_string(),
            })
        };

        Ok(AnnotationRow {
            protein_accession: fields[0].to_string(),
            sequence_md5: fields[1].to_string(),
            sequence_length: integer(2)?,
            analysis_method: fields[3].to_string(),
            signature_accession: fields[4].to_string(),
            signature_description: fields[5].to_string(),
            start: integer(6)?,
            end: integer(7)?,
            score: fields[8].trim().to_string(),
            status: fields[9].to_string(),
            date: fields[10].to_string(),
            interpro_accession: optional_column(fields[11]),
            interpro_description: optional_column(fields[12]),
            go_terms: optional_column(fields[13]),
            pathway: optional_column(fields[14]),
            line: line_number,
        })
    }
}

impl<R: Read> Iterator for AnnotationReader<R> {
    type Item = Result<AnnotationRow>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_number += 1;

            match line {
                Err(source) => {
                    return Some(Err(IprGoError::Read {
                        path: self.path.clone(),
                        source,
                    }))
                },
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => return Some(self.parse_line(&line)),
            }
        }
    }
}

/// Load a whole table into memory, in file order
pub fn load_table(path: impl AsRef<Path>) -> Result<Vec<AnnotationRow>> {
    let rows = AnnotationReader::open(path.as_ref())?.collect::<Result<Vec<_>>>()?;
    debug!(path = %path.as_ref().display(), rows = rows.len(), "Loaded annotation table");
    Ok(rows)
}
