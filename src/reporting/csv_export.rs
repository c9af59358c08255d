//! Catalog export as comma-delimited rows
//!
//! One row per catalog record, no header, columns in this order:
//! `name, path, digest, size_bytes, processing_time_nanos`.

use csv::ByteRecord;
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::core::error::{DedupError, Result};
use crate::scanner::catalog::{Catalog, FileRecord};

/// Default export file name
pub const DEFAULT_EXPORT_FILE: &str = "result.csv";

const COLUMNS: usize = 5;

/// A single exported catalog row
///
/// Name and path columns hold the raw bytes of the OS string, so file names
/// that are not valid UTF-8 survive an export and re-read unchanged on Unix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub name: OsString,
    pub path: PathBuf,
    pub digest: String,
    pub size_bytes: u64,
    pub processing_time_nanos: u64,
}

impl From<&FileRecord> for CatalogRow {
    fn from(record: &FileRecord) -> Self {
        Self {
            name: record.name.clone(),
            path: record.path.clone(),
            digest: record.digest.clone(),
            size_bytes: record.size_bytes,
            processing_time_nanos: u64::try_from(record.processing_time.as_nanos())
                .unwrap_or(u64::MAX),
        }
    }
}

impl CatalogRow {
    fn to_byte_record(&self) -> ByteRecord {
        let mut row = ByteRecord::new();
        row.push_field(&os_to_bytes(&self.name));
        row.push_field(&os_to_bytes(self.path.as_os_str()));
        row.push_field(self.digest.as_bytes());
        row.push_field(self.size_bytes.to_string().as_bytes());
        row.push_field(self.processing_time_nanos.to_string().as_bytes());
        row
    }

    fn from_byte_record(row: &ByteRecord, line: u64) -> Result<Self> {
        if row.len() != COLUMNS {
            return Err(DedupError::MalformedRow {
                line,
                reason: format!("expected {} fields, found {}", COLUMNS, row.len()),
            });
        }

        let digest = std::str::from_utf8(&row[2])
            .map_err(|_| DedupError::MalformedRow {
                line,
                reason: "digest is not valid UTF-8".to_string(),
            })?
            .to_string();

        Ok(Self {
            name: os_from_bytes(&row[0]),
            path: PathBuf::from(os_from_bytes(&row[1])),
            digest,
            size_bytes: parse_number(&row[3], "size_bytes", line)?,
            processing_time_nanos: parse_number(&row[4], "processing_time_nanos", line)?,
        })
    }
}

fn parse_number(field: &[u8], column: &str, line: u64) -> Result<u64> {
    std::str::from_utf8(field)
        .ok()
        .and_then(|text| text.parse().ok())
        .ok_or_else(|| DedupError::MalformedRow {
            line,
            reason: format!("{} is not an unsigned integer", column),
        })
}

#[cfg(unix)]
fn os_to_bytes(value: &OsStr) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(value.as_bytes())
}

// No lossless byte view of an OsStr off Unix
#[cfg(not(unix))]
fn os_to_bytes(value: &OsStr) -> Cow<'_, [u8]> {
    match value.to_string_lossy() {
        Cow::Borrowed(text) => Cow::Borrowed(text.as_bytes()),
        Cow::Owned(text) => Cow::Owned(text.into_bytes()),
    }
}

#[cfg(unix)]
fn os_from_bytes(bytes: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes.to_vec())
}

#[cfg(not(unix))]
fn os_from_bytes(bytes: &[u8]) -> OsString {
    OsString::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Write the catalog to any writer
pub fn write_csv<W: Write>(writer: W, catalog: &Catalog) -> std::result::Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for record in catalog {
        csv_writer.write_byte_record(&CatalogRow::from(record).to_byte_record())?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Export the catalog to `output_path`, replacing any existing file
///
/// # Arguments
/// * `output_path` - Destination file
/// * `catalog` - Records to export, written in catalog order
pub fn export_csv(output_path: &Path, catalog: &Catalog) -> Result<()> {
    let file = File::create(output_path).map_err(|source| DedupError::ExportCreate {
        path: output_path.to_path_buf(),
        source,
    })?;

    write_csv(file, catalog).map_err(|source| DedupError::ExportWrite {
        path: output_path.to_path_buf(),
        source,
    })
}

/// Parse rows previously written by [`write_csv`]
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<CatalogRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut record = ByteRecord::new();
    while csv_reader.read_byte_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        rows.push(CatalogRow::from_byte_record(&record, line)?);
    }

    Ok(rows)
}
