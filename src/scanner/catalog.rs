//! Per-file records accumulated over one scan

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressIterator};
use log::{debug, info};
use rayon::prelude::*;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::digester::digest_file;
use crate::core::error::Result;
use super::file_scanner::{traverse, FileEntry};

/// One hashed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub digest: String,
    pub path: PathBuf,
    pub name: OsString,
    pub size_bytes: u64,
    pub processing_time: Duration,
}

/// All files hashed during one scan, in traversal order
///
/// A catalog is built once by [`build_catalog`] and only read afterwards.
/// Paths are unique because the walker visits each entry once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<FileRecord>,
    skipped: Vec<PathBuf>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileRecord> {
        self.records.iter()
    }

    /// Entries seen during traversal but not hashed (symlinks, special files)
    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }

    /// Total bytes hashed across all records
    pub fn total_bytes(&self) -> u64 {
        self.records.iter().map(|r| r.size_bytes).sum()
    }
}

impl From<Vec<FileRecord>> for Catalog {
    fn from(records: Vec<FileRecord>) -> Self {
        Self {
            records,
            skipped: Vec::new(),
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a FileRecord;
    type IntoIter = std::slice::Iter<'a, FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Options for building a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Hashing threads; 0 or 1 hashes one file at a time
    pub workers: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self { workers: 1 }
    }
}

fn hash_entry(entry: &FileEntry) -> Result<FileRecord> {
    let digest = digest_file(&entry.path)?;
    debug!(
        "{} {} ({} bytes, {:?})",
        digest.digest,
        entry.path.display(),
        digest.size_bytes,
        digest.elapsed
    );

    Ok(FileRecord {
        digest: digest.digest,
        path: entry.path.clone(),
        name: entry.name.clone(),
        size_bytes: digest.size_bytes,
        processing_time: digest.elapsed,
    })
}

/// Hash every entry and collect the results into a catalog
///
/// Records appear in the same order as `entries` regardless of the worker
/// count. The first hashing failure aborts the build.
///
/// # Arguments
/// * `entries` - Files to hash, in traversal order
/// * `options` - Worker configuration
/// * `progress` - Advanced once per hashed file
pub fn build_catalog(
    entries: &[FileEntry],
    options: &ScanOptions,
    progress: &ProgressBar,
) -> Result<Catalog> {
    let records = if options.workers <= 1 {
        entries
            .iter()
            .progress_with(progress.clone())
            .map(hash_entry)
            .collect::<Result<Vec<_>>>()?
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.workers)
            .build()?;
        pool.install(|| {
            entries
                .par_iter()
                .progress_with(progress.clone())
                .map(hash_entry)
                .collect::<Result<Vec<_>>>()
        })?
    };

    Ok(Catalog::from(records))
}

/// Walk `root` and hash every regular file below it
///
/// # Arguments
/// * `root` - Directory to scan
/// * `options` - Worker configuration
/// * `progress` - Progress bar; its length is set once traversal finishes
pub fn scan_directory(root: &Path, options: &ScanOptions, progress: &ProgressBar) -> Result<Catalog> {
    let traversal = traverse(root)?;
    info!(
        "Found {} file(s) under {}, skipped {} other entry(ies)",
        traversal.files.len(),
        root.display(),
        traversal.skipped.len()
    );

    progress.set_length(traversal.files.len() as u64);
    let mut catalog = build_catalog(&traversal.files, options, progress)?;
    catalog.skipped = traversal.skipped;
    info!(
        "Hashed {} file(s), {} bytes",
        catalog.len(),
        catalog.total_bytes()
    );

    Ok(catalog)
}
