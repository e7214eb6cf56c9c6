//! ARGOS Importer Library
//!
//! A Rust library for importing ARGOS satellite telemetry text files into a
//! point dataset of animal location fixes.
//!
//! This library provides tools for:
//! - Scanning ARGOS DS files and pairing each header line with its location line
//! - Normalizing hemisphere-suffixed coordinates to signed decimal degrees
//! - Reporting unparseable records with tag id, file and line without stopping
//! - Writing fixes to a Parquet point dataset in WGS84
//!
//! # Example
//!
//! ```no_run
//! use argos_importer::{IngestConfig, IngestionDriver, MemorySink};
//! use std::path::Path;
//!
//! let mut sink = MemorySink::new();
//! let report = IngestionDriver::new(IngestConfig::default())
//!     .run_folder(Path::new("telemetry"), &mut sink)?;
//! println!("{} fixes, {} warnings", report.fixes_written, report.warning_count());
//! # Ok::<(), argos_importer::ArgosError>(())
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod parser;
pub mod processor;
pub mod sink;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{CompressionAlgorithm, HemisphereRule, IngestConfig, SinkConfig};
pub use error::{ArgosError, ExtractionCause, ExtractionError, Result, SinkError};
pub use models::{IngestionReport, IngestionWarning, TrackingFix, WarningKind};
pub use processor::{FileDiscovery, IngestionDriver};
pub use sink::{FixSink, MemorySink, ParquetFixSink};
