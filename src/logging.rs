//! Logging setup
//!
//! Diagnostics go through the `log` facade to stderr via `env_logger`, so the
//! duplicate report on stdout stays clean for piping. `RUST_LOG` takes
//! precedence over the command-line flags when it is set.

use env_logger::Builder;
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Initialize the logger from CLI verbosity flags
///
/// Must be called once, before any log macros run.
///
/// # Arguments
/// * `verbose` - Count of `-v` flags (0=warn, 1=info, 2=debug, 3+=trace)
/// * `quiet` - Only report errors
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    if env::var_os("RUST_LOG").is_some() {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    builder.format(|buf, record| {
        let level = record.level();
        let style = buf.default_level_style(level);
        writeln!(buf, "{style}{:<5}{style:#} {}", level, record.args())
    });

    builder.init();
}

fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
