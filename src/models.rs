//! Core data structures for ARGOS ingestion.
//!
//! Defines the tracking fix produced per datum and the report returned
//! by an ingestion run.

use crate::constants::WGS84_EPSG;
use crate::error::ExtractionError;
use serde::{Deserialize, Serialize};

/// A single location fix for a tracked animal
///
/// Built from one header line and its paired location line. Coordinates
/// are signed decimal degrees in WGS84.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingFix {
    pub tag_id: i64,
    pub location_class: String,
    /// Source date with '/' separators followed by the time token, e.g.
    /// `09/07/97 03:53:28`. Field order is kept exactly as in the file.
    pub timestamp: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl TrackingFix {
    /// Point geometry as (x, y) = (longitude, latitude)
    pub fn point(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }

    /// Point geometry as WKT
    pub fn geometry_wkt(&self) -> String {
        format!("POINT ({} {})", self.longitude, self.latitude)
    }

    /// EPSG code of the geometry's spatial reference
    pub fn srid(&self) -> u32 {
        WGS84_EPSG
    }
}

/// Category of a non-fatal problem encountered during ingestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// A datum could not be turned into a fix
    Extraction,
    /// The output sink refused a fix
    SinkWrite,
    /// Buffered fixes could not be flushed at the end of a file
    SinkFlush,
    /// The input file could not be opened
    FileOpen,
    /// Reading the input file failed part way through
    FileRead,
}

/// A non-fatal problem, located by file and where possible by tag and line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionWarning {
    pub file: String,
    pub tag_id: Option<i64>,
    pub line_number: Option<usize>,
    pub kind: WarningKind,
    pub message: String,
}

impl IngestionWarning {
    pub fn new(file: impl Into<String>, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            tag_id: None,
            line_number: None,
            kind,
            message: message.into(),
        }
    }

    /// Warning for a datum the extractor or scanner rejected
    pub fn from_extraction(file: impl Into<String>, error: &ExtractionError) -> Self {
        Self {
            file: file.into(),
            tag_id: error.tag_id,
            line_number: error.line_number,
            kind: WarningKind::Extraction,
            message: error.cause.to_string(),
        }
    }

    pub fn with_tag_id(mut self, tag_id: i64) -> Self {
        self.tag_id = Some(tag_id);
        self
    }

    pub fn with_line(mut self, line_number: usize) -> Self {
        self.line_number = Some(line_number);
        self
    }
}

/// Summary of an ingestion run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestionReport {
    /// Files that were opened and scanned
    pub files_processed: usize,
    /// Entries passed over without reading (README, directories, excluded names)
    pub files_skipped: usize,
    /// Files that could not be opened or read to the end
    pub files_failed: usize,
    /// Fixes stored by the sink, excluding any lost in a failed batch
    pub fixes_written: usize,
    /// Datums that yielded no fix, including sink rejections
    pub records_rejected: usize,
    pub warnings: Vec<IngestionWarning>,
    pub processing_time_ms: u64,
}

impl IngestionReport {
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Warnings of one kind
    pub fn warnings_of(&self, kind: WarningKind) -> impl Iterator<Item = &IngestionWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }

    /// Percentage of datums that became fixes
    pub fn success_rate(&self) -> f64 {
        let total = self.fixes_written + self.records_rejected;
        if total == 0 {
            0.0
        } else {
            (self.fixes_written as f64 / total as f64) * 100.0
        }
    }
}
