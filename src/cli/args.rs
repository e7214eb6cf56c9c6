//! Command-line argument definitions for the ARGOS importer
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::{CompressionAlgorithm, HemisphereRule, IngestConfig};
use crate::constants::DEFAULT_BATCH_SIZE;
use crate::error::{ArgosError, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the ARGOS telemetry importer
///
/// Reads every ARGOS DS text file in a folder and writes the location fixes
/// to a single point dataset.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "argos-import",
    version,
    about = "Import ARGOS satellite telemetry files into a point dataset",
    long_about = "Scans a folder of ARGOS DS text files, pairs each header line with its \
                  location line, and writes one point per fix (tag id, location class, \
                  timestamp) to a Parquet dataset in WGS84. Records that cannot be parsed \
                  are reported and skipped."
)]
pub struct Args {
    /// Folder holding the ARGOS text files
    #[arg(value_name = "INPUT_FOLDER")]
    pub input_folder: PathBuf,

    /// Path of the output point dataset
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Spatial reference requested for the output
    ///
    /// Fixes are always written in WGS84 (EPSG:4326); the value is
    /// recorded in the log only.
    #[arg(
        long = "spatial-reference",
        value_name = "SR",
        help = "Spatial reference requested for the output"
    )]
    pub spatial_reference: Option<String>,

    /// Reject coordinates whose hemisphere letter is not N, S, E or W
    ///
    /// By default any letter other than N or E gives a negative coordinate.
    #[arg(
        long = "strict-hemisphere",
        help = "Reject coordinates with an unknown hemisphere letter"
    )]
    pub strict_hemisphere: bool,

    /// Accept coordinates outside [-90, 90] / [-180, 180]
    #[arg(
        long = "no-range-check",
        help = "Do not reject out-of-range coordinates"
    )]
    pub no_range_check: bool,

    /// Parquet compression algorithm
    #[arg(
        long = "compression",
        value_enum,
        value_name = "ALG",
        default_value = "snappy",
        help = "Parquet compression algorithm"
    )]
    pub compression: CompressionAlgorithm,

    /// Fixes buffered before a batch is written
    #[arg(
        long = "batch-size",
        value_name = "N",
        default_value_t = DEFAULT_BATCH_SIZE,
        help = "Number of fixes buffered before each write"
    )]
    pub batch_size: usize,

    /// Force overwrite of an existing output file
    #[arg(long = "force", help = "Force overwrite of an existing output file")]
    pub force_overwrite: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the final report
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Disable the progress bar
    #[arg(long = "no-progress", help = "Disable the progress bar")]
    pub no_progress: bool,
}

/// Output format options for the final report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Progress bars are shown unless disabled, quiet or producing JSON
    pub fn show_progress(&self) -> bool {
        !self.no_progress && !self.quiet && self.output_format == OutputFormat::Human
    }

    /// Build the ingestion configuration these arguments describe
    pub fn to_config(&self) -> Result<IngestConfig> {
        if self.input_folder.exists() && !self.input_folder.is_dir() {
            return Err(ArgosError::configuration(format!(
                "Input path is not a directory: {}",
                self.input_folder.display()
            )));
        }

        let mut config = IngestConfig::default()
            .with_progress(self.show_progress())
            .with_compression(self.compression)
            .with_batch_size(self.batch_size);

        if self.strict_hemisphere {
            config = config.with_hemisphere_rule(HemisphereRule::Strict);
        }
        if self.no_range_check {
            config = config.without_range_validation();
        }
        if self.force_overwrite {
            config = config.with_overwrite();
        }
        if let Some(spatial_reference) = &self.spatial_reference {
            config = config.with_output_spatial_reference(spatial_reference.clone());
        }

        config.validate()?;
        Ok(config)
    }
}
