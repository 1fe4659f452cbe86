//! exif-orient - decode EXIF metadata from JPEG files.
//!
//! Prints the decoded directories and orientation of each file. A file that
//! fails to decode is logged and skipped, unless `--fail-fast` is given.

use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exif_orient::{
    config::{Config, OutputFormat},
    report::FileReport,
    ExifDocument, ExifError,
};

/// Reasons a run ends unsuccessfully.
#[derive(Debug, Error)]
enum RunError {
    /// `--fail-fast` was given and a file failed to decode
    #[error("{path}: {source}")]
    Aborted { path: String, source: ExifError },

    /// Every input file failed to decode
    #[error("No file could be decoded")]
    NothingDecoded,

    #[error("Failed to write report: {0}")]
    Output(#[from] io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Per-run counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Summary {
    decoded: usize,
    skipped: usize,
}

fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let stdout = io::stdout();
    match run(&config, &mut stdout.lock()) {
        Ok(summary) => {
            debug!(decoded = summary.decoded, skipped = summary.skipped, "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Decode every configured file and write its report to `out`.
///
/// Files that fail are logged and skipped unless `fail_fast` is set. The run
/// fails only if no file decodes.
fn run<W: Write>(config: &Config, out: &mut W) -> Result<Summary, RunError> {
    let only = config.directory_filter();
    let mut summary = Summary::default();

    for path in &config.files {
        let path_str = path.display().to_string();
        debug!(path = %path_str, "decoding");

        let document = match ExifDocument::open(path) {
            Ok(document) => document,
            Err(source) if config.fail_fast => {
                return Err(RunError::Aborted {
                    path: path_str,
                    source,
                });
            }
            Err(e) => {
                warn!("{}: {}, skipping", path_str, e);
                summary.skipped += 1;
                continue;
            }
        };

        let report = FileReport::new(path_str, &document, only, config.orientation_only);
        match config.format {
            OutputFormat::Text => write!(out, "{}", report)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &report)?;
                writeln!(out)?;
            }
        }
        summary.decoded += 1;
    }

    if summary.decoded == 0 {
        return Err(RunError::NothingDecoded);
    }

    Ok(summary)
}

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr so they never mix with the report on stdout.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "exif_orient=debug"
    } else {
        "exif_orient=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// =============================================================================
// Tests
// =============================================================================
