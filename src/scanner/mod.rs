//! File scanning, hashing and duplicate grouping

pub mod catalog;
pub mod file_scanner;
pub mod duplicate_detector;

pub use catalog::{build_catalog, scan_directory, Catalog, FileRecord, ScanOptions};
pub use file_scanner::{collect_files, traverse, walk_files, FileEntry, FileWalk, Traversal};
pub use duplicate_detector::{count_digests, find_duplicates, redundant_count, DuplicateGroup};
