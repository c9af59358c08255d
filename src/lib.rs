//! Duplicate File Finder Library
//!
//! Walks a directory tree, hashes every regular file with SHA-256 and groups
//! files with identical content.

pub mod core;
pub mod logging;
pub mod scanner;
pub mod reporting;

pub use crate::core::digester;
pub use scanner::file_scanner;
pub use reporting::report_writer;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::core::digester::{digest_bytes, digest_file, FileDigest};
    pub use crate::core::error::{DedupError, Result};
    pub use crate::scanner::catalog::{build_catalog, scan_directory, Catalog, FileRecord, ScanOptions};
    pub use crate::scanner::file_scanner::{collect_files, traverse, walk_files, FileEntry, FileWalk, Traversal};
    pub use crate::scanner::duplicate_detector::{count_digests, find_duplicates, redundant_count, DuplicateGroup};
    pub use crate::reporting::csv_export::{export_csv, read_csv, write_csv, CatalogRow, DEFAULT_EXPORT_FILE};
    pub use crate::reporting::report_writer::{write_report, ReportFormat};
}
