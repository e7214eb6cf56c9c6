//! Configuration management and validation.
//!
//! Provides configuration structures for record parsing rules, input file
//! filtering, and Parquet output settings.

use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_ROW_GROUP_SIZE, README_FILE_NAME};
use crate::error::{ArgosError, Result};
use clap::ValueEnum;
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};

/// How the trailing hemisphere letter of a coordinate is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HemisphereRule {
    /// `N` and `E` are positive, any other letter is negative
    #[default]
    Lenient,
    /// `N`/`E` are positive, `S`/`W` are negative, anything else is an error
    Strict,
}

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    #[default]
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    #[value(name = "none", alias = "uncompressed")]
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

/// Output sink configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Compression algorithm selection
    pub compression: CompressionAlgorithm,

    /// Fixes buffered before a batch is handed to the writer
    pub batch_size: usize,

    /// Target row group size (rows per group)
    pub row_group_size: usize,

    /// Replace an existing output file
    pub overwrite: bool,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            compression: CompressionAlgorithm::Snappy,
            batch_size: DEFAULT_BATCH_SIZE,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
            overwrite: false,
        }
    }
}

/// Global configuration for an ingestion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Hemisphere suffix interpretation
    pub hemisphere_rule: HemisphereRule,

    /// Reject fixes whose latitude or longitude falls outside WGS84 bounds
    pub validate_ranges: bool,

    /// File names that are never ingested
    pub excluded_files: Vec<String>,

    /// Show a progress bar while processing files
    pub show_progress: bool,

    /// Spatial reference requested for the output. Recorded only; fixes are
    /// always written in WGS84.
    pub output_spatial_reference: Option<String>,

    /// Output sink settings
    pub sink: SinkConfig,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            hemisphere_rule: HemisphereRule::Lenient,
            validate_ranges: true,
            excluded_files: vec![README_FILE_NAME.to_string()],
            show_progress: false,
            output_spatial_reference: None,
            sink: SinkConfig::default(),
        }
    }
}

impl IngestConfig {
    /// Use the given hemisphere rule
    pub fn with_hemisphere_rule(mut self, rule: HemisphereRule) -> Self {
        self.hemisphere_rule = rule;
        self
    }

    /// Accept coordinates outside WGS84 bounds
    pub fn without_range_validation(mut self) -> Self {
        self.validate_ranges = false;
        self
    }

    /// Add a file name to skip in addition to README.txt
    pub fn with_excluded_file(mut self, name: impl Into<String>) -> Self {
        self.excluded_files.push(name.into());
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn with_output_spatial_reference(mut self, spatial_reference: impl Into<String>) -> Self {
        self.output_spatial_reference = Some(spatial_reference.into());
        self
    }

    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.sink.compression = compression;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.sink.batch_size = batch_size;
        self
    }

    /// Allow replacing an existing output file
    pub fn with_overwrite(mut self) -> Self {
        self.sink.overwrite = true;
        self
    }

    /// Whether a file name is on the exclusion list
    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.excluded_files.iter().any(|name| name == file_name)
    }

    /// Check settings that would otherwise fail deep inside the run
    pub fn validate(&self) -> Result<()> {
        if self.sink.batch_size == 0 {
            return Err(ArgosError::configuration("batch_size must be at least 1"));
        }
        if self.sink.row_group_size == 0 {
            return Err(ArgosError::configuration(
                "row_group_size must be at least 1",
            ));
        }
        Ok(())
    }
}
