//! Hemisphere-suffixed coordinate normalization
//!
//! ARGOS reports positions as a decimal magnitude followed by a hemisphere
//! letter (`34.690N`, `76.671W`). This module turns such tokens into signed
//! decimal degrees.

use crate::config::HemisphereRule;
use crate::error::CoordinateError;

/// Convert a hemisphere-tagged token to signed decimal degrees
///
/// `N` and `E` keep the magnitude positive and `S` and `W` negate it. Under
/// [`HemisphereRule::Lenient`] every other trailing character also negates the
/// magnitude; under [`HemisphereRule::Strict`] it is rejected.
pub fn normalize(token: &str, rule: HemisphereRule) -> Result<f64, CoordinateError> {
    let malformed = || CoordinateError::Malformed {
        token: token.to_string(),
    };

    let mut chars = token.chars();
    let hemisphere = chars.next_back().ok_or_else(malformed)?;
    let magnitude: f64 = chars.as_str().parse().map_err(|_| malformed())?;

    if !magnitude.is_finite() {
        return Err(malformed());
    }

    match hemisphere {
        'N' | 'E' => Ok(magnitude),
        'S' | 'W' => Ok(-magnitude),
        _ => match rule {
            HemisphereRule::Lenient => Ok(-magnitude),
            HemisphereRule::Strict => Err(CoordinateError::UnrecognizedHemisphere {
                token: token.to_string(),
            }),
        },
    }
}
