//! Report and export writers

pub mod csv_export;
pub mod report_writer;

pub use csv_export::{export_csv, read_csv, write_csv, CatalogRow, DEFAULT_EXPORT_FILE};
pub use report_writer::{write_report, ReportFormat};
