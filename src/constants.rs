//! Application constants for the ARGOS importer
//!
//! Fixed field offsets of the ARGOS two-line datum layout, file-level
//! markers, and default values for configuration.

// =============================================================================
// ARGOS Datum Layout
// =============================================================================

/// Substring that identifies the header line of a datum
pub const HEADER_MARKER: &str = "Date :";

/// Field offsets within the whitespace-split header line
///
/// A typical header line reads:
/// ```text
/// 20616  Date : 09.07.97 03:53:28  LC : 3  IQ : 66
/// ```
pub mod header_fields {
    /// Tag (PTT) identifier of the tracked animal
    pub const TAG_ID: usize = 0;

    /// Fix date, '.'-separated
    pub const DATE: usize = 3;

    /// Fix time of day
    pub const TIME: usize = 4;

    /// Location class code
    pub const LOCATION_CLASS: usize = 7;

    /// Minimum number of tokens a header line must carry
    pub const MIN_TOKENS: usize = LOCATION_CLASS + 1;
}

/// Field offsets within the whitespace-split location line
///
/// A typical location line reads:
/// ```text
///       Lat1 : 34.690N  Lon1 : 76.671W  Lat2 : 34.690N  Lon2 : 76.671W
/// ```
pub mod location_fields {
    /// Primary latitude solution
    pub const LATITUDE: usize = 2;

    /// Primary longitude solution
    pub const LONGITUDE: usize = 5;

    /// Minimum number of tokens a location line must carry
    pub const MIN_TOKENS: usize = LONGITUDE + 1;
}

/// Separator used for dates in ARGOS files
pub const SOURCE_DATE_SEPARATOR: char = '.';

/// Separator used for dates in the output timestamp
pub const OUTPUT_DATE_SEPARATOR: &str = "/";

// =============================================================================
// Coordinates
// =============================================================================

/// EPSG code of the WGS84 geographic coordinate system fixes are reported in
pub const WGS84_EPSG: u32 = 4326;

/// Valid latitude range in decimal degrees
pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;

/// Valid longitude range in decimal degrees
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

// =============================================================================
// Input Files
// =============================================================================

/// File shipped alongside ARGOS downloads that never contains data
pub const README_FILE_NAME: &str = "README.txt";

// =============================================================================
// Output
// =============================================================================

/// Column names of the output point dataset
pub mod columns {
    pub const GEOMETRY: &str = "geometry";
    pub const TAG_ID: &str = "tag_id";
    pub const LOCATION_CLASS: &str = "location_class";
    pub const TIMESTAMP: &str = "timestamp";
    pub const LONGITUDE: &str = "longitude";
    pub const LATITUDE: &str = "latitude";
}

/// Fixes buffered in the sink before a batch is written
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Rows per Parquet row group
pub const DEFAULT_ROW_GROUP_SIZE: usize = 100_000;
