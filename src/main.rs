use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::io;
use std::path::PathBuf;

use dupe_finder_rs::logging::init_logging;
use dupe_finder_rs::prelude::*;

#[derive(Parser)]
#[command(name = "dupe_finder_rs")]
#[command(about = "Find duplicate files by SHA-256 content hash", long_about = None)]
struct Cli {
    /// Root directory to scan recursively
    directory: PathBuf,

    /// Number of hashing threads (1 hashes files one at a time)
    #[arg(short, long, default_value_t = 1)]
    workers: usize,

    /// Export the full file catalog as CSV
    #[arg(long)]
    export: bool,

    /// Destination of the CSV export
    #[arg(long, default_value = DEFAULT_EXPORT_FILE)]
    export_path: PathBuf,

    /// Duplicate report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Run in batch mode (no progress bar)
    #[arg(long)]
    batch: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    info!(
        "Scanning {} with {} worker(s)",
        cli.directory.display(),
        cli.workers.max(1)
    );

    let progress = if cli.batch || cli.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        pb
    };

    let options = ScanOptions { workers: cli.workers };
    let catalog = scan_directory(&cli.directory, &options, &progress)
        .with_context(|| format!("Failed to scan {}", cli.directory.display()))?;
    progress.finish_and_clear();

    // Keep stdout parseable when emitting JSON
    let status = format!(
        "Traversal complete: {} file(s) cataloged, {} non-regular entry(ies) skipped",
        catalog.len(),
        catalog.skipped().len()
    );
    match cli.format {
        ReportFormat::Text => println!("{}", status),
        ReportFormat::Json => eprintln!("{}", status),
    }

    if cli.export {
        export_csv(&cli.export_path, &catalog).context("Catalog export failed")?;
        info!("Catalog exported to {}", cli.export_path.display());
    }

    let duplicates = find_duplicates(&catalog);
    write_report(io::stdout().lock(), &duplicates, cli.format)
        .context("Failed to write duplicate report")?;

    Ok(())
}
