//! Datum extraction for ARGOS records
//!
//! Turns one header line and its paired location line into a
//! [`TrackingFix`]. Fields are located purely by position after
//! whitespace splitting; see [`crate::constants::header_fields`] and
//! [`crate::constants::location_fields`] for the offsets.

use super::coordinate::normalize;
use crate::config::{HemisphereRule, IngestConfig};
use crate::constants::{
    MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE, OUTPUT_DATE_SEPARATOR,
    SOURCE_DATE_SEPARATOR, header_fields, location_fields,
};
use crate::error::{Axis, DatumLine, ExtractionCause, ExtractionError};
use crate::models::TrackingFix;

/// Builds validated fixes from datum line pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordExtractor {
    hemisphere_rule: HemisphereRule,
    validate_ranges: bool,
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new(HemisphereRule::Lenient, true)
    }
}

impl RecordExtractor {
    pub fn new(hemisphere_rule: HemisphereRule, validate_ranges: bool) -> Self {
        Self {
            hemisphere_rule,
            validate_ranges,
        }
    }

    pub fn from_config(config: &IngestConfig) -> Self {
        Self::new(config.hemisphere_rule, config.validate_ranges)
    }

    /// Extract a fix from a header line and the location line that follows it
    pub fn extract(
        &self,
        header_line: &str,
        location_line: &str,
    ) -> Result<TrackingFix, ExtractionError> {
        let header: Vec<&str> = header_line.split_whitespace().collect();

        if header.len() < header_fields::MIN_TOKENS {
            return Err(ExtractionError::new(
                header_tag_id(header_line),
                ExtractionCause::InsufficientTokens {
                    line: DatumLine::Header,
                    expected: header_fields::MIN_TOKENS,
                    found: header.len(),
                },
            ));
        }

        let tag_token = header[header_fields::TAG_ID];
        let tag_id: i64 = tag_token.parse().map_err(|_| {
            ExtractionError::new(
                None,
                ExtractionCause::InvalidTagId {
                    token: tag_token.to_string(),
                },
            )
        })?;

        let location: Vec<&str> = location_line.split_whitespace().collect();

        if location.len() < location_fields::MIN_TOKENS {
            return Err(ExtractionError::new(
                Some(tag_id),
                ExtractionCause::InsufficientTokens {
                    line: DatumLine::Location,
                    expected: location_fields::MIN_TOKENS,
                    found: location.len(),
                },
            ));
        }

        let latitude = normalize(location[location_fields::LATITUDE], self.hemisphere_rule)
            .map_err(|e| ExtractionError::new(Some(tag_id), e))?;
        let longitude = normalize(location[location_fields::LONGITUDE], self.hemisphere_rule)
            .map_err(|e| ExtractionError::new(Some(tag_id), e))?;

        if self.validate_ranges {
            check_range(Axis::Latitude, latitude, MIN_LATITUDE, MAX_LATITUDE)
                .map_err(|cause| ExtractionError::new(Some(tag_id), cause))?;
            check_range(Axis::Longitude, longitude, MIN_LONGITUDE, MAX_LONGITUDE)
                .map_err(|cause| ExtractionError::new(Some(tag_id), cause))?;
        }

        let date =
            header[header_fields::DATE].replace(SOURCE_DATE_SEPARATOR, OUTPUT_DATE_SEPARATOR);
        let time = header[header_fields::TIME];

        Ok(TrackingFix {
            tag_id,
            location_class: header[header_fields::LOCATION_CLASS].to_string(),
            timestamp: format!("{} {}", date, time),
            latitude,
            longitude,
        })
    }
}

/// Tag id of a header line, if its first token is an integer
pub fn header_tag_id(header_line: &str) -> Option<i64> {
    header_line
        .split_whitespace()
        .nth(header_fields::TAG_ID)
        .and_then(|token| token.parse().ok())
}

fn check_range(axis: Axis, value: f64, min: f64, max: f64) -> Result<(), ExtractionCause> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ExtractionCause::CoordinateOutOfRange { axis, value })
    }
}
