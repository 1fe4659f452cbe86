//! Configuration for the `exif-orient` command-line tool.
//!
//! Options can be given as arguments or as environment variables with the
//! `EXIF_` prefix:
//!
//! - `EXIF_FORMAT` - Output format, `text` or `json` (default: text)
//! - `EXIF_DIRECTORY` - Only print this directory (IFD0, EXIF, GPS, Interoperability)
//! - `EXIF_FAIL_FAST` - Stop at the first file that fails to decode

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::format::exif::DirectoryName;

/// Output format for decoded metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned, human-readable listing
    #[default]
    Text,
    /// One JSON document per file, one per line
    Json,
}

/// exif-orient - Decode EXIF metadata and orientation from JPEG files.
#[derive(Parser, Debug, Clone)]
#[command(name = "exif-orient")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// JPEG files to decode.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, env = "EXIF_FORMAT")]
    pub format: OutputFormat,

    /// Only print fields from this directory.
    #[arg(short, long, env = "EXIF_DIRECTORY")]
    pub directory: Option<String>,

    /// Print only byte order and orientation.
    #[arg(long, default_value_t = false)]
    pub orientation_only: bool,

    /// Stop at the first file that fails to decode instead of skipping it.
    #[arg(long, default_value_t = false, env = "EXIF_FAIL_FAST")]
    pub fail_fast: bool,

    /// Enable verbose (debug) logging.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.files.is_empty() {
            return Err("At least one input file is required".to_string());
        }

        if self.directory.is_some() && self.directory_filter().is_none() {
            return Err(format!(
                "Unknown directory '{}'. Expected one of: IFD0, EXIF, GPS, Interoperability",
                self.directory.as_deref().unwrap_or_default()
            ));
        }

        if self.orientation_only && self.directory.is_some() {
            return Err("--orientation-only cannot be combined with --directory".to_string());
        }

        Ok(())
    }

    /// Parsed `--directory` value.
    pub fn directory_filter(&self) -> Option<DirectoryName> {
        self.directory.as_deref().and_then(DirectoryName::from_name)
    }
}

// =============================================================================
// Tests
// =============================================================================
