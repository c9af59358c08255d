//! Duplicate report rendering

use clap::ValueEnum;
use std::io::{self, Write};

use crate::scanner::duplicate_detector::{redundant_count, DuplicateGroup};

/// Output format for the duplicate report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One `digest  path  (N files)` line per group
    #[default]
    Text,
    /// Pretty-printed JSON array
    Json,
}

/// Write the duplicate groups to `out`
///
/// # Arguments
/// * `out` - Destination, usually stdout
/// * `groups` - Groups as returned by `find_duplicates`
/// * `format` - Text or JSON
pub fn write_report<W: Write>(
    mut out: W,
    groups: &[DuplicateGroup],
    format: ReportFormat,
) -> io::Result<()> {
    match format {
        ReportFormat::Text => write_text(&mut out, groups),
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut out, groups)?;
            writeln!(out)
        }
    }
}

fn write_text<W: Write>(out: &mut W, groups: &[DuplicateGroup]) -> io::Result<()> {
    writeln!(
        out,
        "Found {} duplicate group(s), {} redundant file(s)",
        groups.len(),
        redundant_count(groups)
    )?;

    for group in groups {
        writeln!(
            out,
            "{}  {}  ({} files)",
            group.digest,
            group.representative.display(),
            group.count
        )?;
    }

    Ok(())
}
