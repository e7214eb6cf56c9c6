//! ARGOS telemetry parser
//!
//! ARGOS ground-segment files describe each location fix with two
//! consecutive lines: a header line carrying the tag id, date, time and
//! location class, and a location line carrying the latitude/longitude
//! solution. Everything else in the file (message counts, frequencies,
//! sensor dumps) is ignored.
//!
//! ## Architecture
//!
//! - [`coordinate`] - hemisphere-suffixed coordinate normalization
//! - [`record`] - positional extraction of one datum into a [`TrackingFix`]
//! - [`scanner`] - lazy line scanner pairing header and location lines
//!
//! ## Usage
//!
//! ```rust
//! use argos_importer::parser::{RecordExtractor, RecordScanner};
//!
//! let text = "20616  Date : 09.07.97 03:53:28  LC : 3  IQ : 66\n\
//!             Lat1 : 34.690N  Lon1 : 76.671W  Lat2 : 34.690N  Lon2 : 76.671W\n";
//!
//! let fixes: Vec<_> = RecordScanner::from_reader(text.as_bytes(), RecordExtractor::default())
//!     .filter_map(Result::ok)
//!     .collect();
//!
//! assert_eq!(fixes.len(), 1);
//! assert_eq!(fixes[0].longitude, -76.671);
//! ```
//!
//! [`TrackingFix`]: crate::models::TrackingFix

pub mod coordinate;
pub mod record;
pub mod scanner;

#[cfg(test)]
pub mod tests;

pub use coordinate::normalize;
pub use record::RecordExtractor;
pub use scanner::{RecordScanner, ScanResult, is_header_line};
