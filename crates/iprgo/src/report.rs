//! WEGO Report Writer
//!
//! Writes one line per protein: the accession, a tab, then its GO terms
//! joined by tabs. Proteins and terms are both in lexicographic order, so the
//! same table always produces the same bytes.

use crate::aggregate::GoAssociationTable;
use crate::error::{IprGoError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Suffix of WEGO-ready report files
pub const DEFAULT_OUTPUT_SUFFIX: &str = ".go.wego.txt";

/// Report location for a strain: `<output_dir>/<strain><suffix>`
pub fn output_path(output_dir: &Path, suffix: &str, strain: &str) -> PathBuf {
    output_dir.join(format!("{}{}", strain, suffix))
}

/// Write the report to any writer
pub fn write_report<W: Write>(table: &GoAssociationTable, writer: &mut W) -> std::io::Result<()> {
    for (accession, terms) in table.iter() {
        writer.write_all(accession.as_bytes())?;
        for term in terms {
            writer.write_all(b"\t")?;
            writer.write_all(term.as_bytes())?;
        }
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Create or overwrite the report file at `path`
///
/// The parent directory is created when missing. A failure part way through
/// can leave a truncated file behind.
pub fn write_report_file(table: &GoAssociationTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| IprGoError::output_write(path, e))?;
    }

    let file = File::create(path).map_err(|e| IprGoError::output_write(path, e))?;
    let mut writer = BufWriter::new(file);

    write_report(table, &mut writer)
        .and_then(|()| writer.flush())
        .map_err(|e| IprGoError::output_write(path, e))?;

    debug!(path = %path.display(), proteins = table.len(), "Report written");
    Ok(())
}

/// Render the report in memory, same layout as [`write_report`]
pub fn render_report(table: &GoAssociationTable) -> String {
    let mut out = String::with_capacity(table.len() * 32);
    for (accession, terms) in table.iter() {
        out.push_str(accession);
        for term in terms {
            out.push('\t');
            out.push_str(term);
        }
        out.push('\n');
    }
    out
}
