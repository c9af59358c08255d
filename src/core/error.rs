//! Error types for the scan pipeline
//!
//! Every variant names the failing operation and the path involved. The
//! library never terminates the process itself; errors bubble up to `main`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while walking, hashing or exporting
#[derive(Debug, Error)]
pub enum DedupError {
    /// Root path is missing or cannot be resolved
    #[error("cannot access root {}: {source}", path.display())]
    RootInaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Root path exists but is not a directory
    #[error("root {} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    /// An entry below the root could not be read during traversal
    #[error("traversal failed at {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// File could not be opened for hashing
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File could not be read to the end while hashing
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Export file could not be created
    #[error("cannot create export file {}: {source}", path.display())]
    ExportCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A catalog row could not be written to the export
    #[error("cannot write export file {}: {source}", path.display())]
    ExportWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Exported catalog could not be read back
    #[error("cannot read catalog export: {0}")]
    CatalogRead(#[from] csv::Error),

    /// Exported catalog row has the wrong shape
    #[error("malformed catalog row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    /// Worker pool for parallel hashing could not be started
    #[error("failed to build hashing thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl DedupError {
    /// Path the error refers to, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            DedupError::RootInaccessible { path, .. }
            | DedupError::NotADirectory { path }
            | DedupError::Walk { path, .. }
            | DedupError::Open { path, .. }
            | DedupError::Read { path, .. }
            | DedupError::ExportCreate { path, .. }
            | DedupError::ExportWrite { path, .. } => Some(path),
            DedupError::CatalogRead(_)
            | DedupError::MalformedRow { .. }
            | DedupError::ThreadPool(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DedupError>;
