//! Unit conversions for raw buoy fields.
//!
//! All functions are pure. Heights are not rounded; temperatures are rounded
//! half-up to one decimal place; directions are bucketed into compass points.

use crate::constants::{FEET_PER_METER, TEMPERATURE_PLACES};
use crate::error::{BuoyError, Result};
use std::fmt;

/// Sixteen-point compass direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassPoint {
    N,
    Nne,
    Ne,
    Ene,
    E,
    Ese,
    Se,
    Sse,
    S,
    Ssw,
    Sw,
    Wsw,
    W,
    Wnw,
    Nw,
    Nnw,
}

impl CompassPoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::Nne => "NNE",
            CompassPoint::Ne => "NE",
            CompassPoint::Ene => "ENE",
            CompassPoint::E => "E",
            CompassPoint::Ese => "ESE",
            CompassPoint::Se => "SE",
            CompassPoint::Sse => "SSE",
            CompassPoint::S => "S",
            CompassPoint::Ssw => "SSW",
            CompassPoint::Sw => "SW",
            CompassPoint::Wsw => "WSW",
            CompassPoint::W => "W",
            CompassPoint::Wnw => "WNW",
            CompassPoint::Nw => "NW",
            CompassPoint::Nnw => "NNW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive upper bound of each compass bucket, in order
const COMPASS_BUCKETS: [(i64, CompassPoint); 17] = [
    (11, CompassPoint::N),
    (34, CompassPoint::Nne),
    (56, CompassPoint::Ne),
    (79, CompassPoint::Ene),
    (101, CompassPoint::E),
    (124, CompassPoint::Ese),
    (146, CompassPoint::Se),
    (169, CompassPoint::Sse),
    (191, CompassPoint::S),
    (214, CompassPoint::Ssw),
    (236, CompassPoint::Sw),
    (259, CompassPoint::Wsw),
    (281, CompassPoint::W),
    (304, CompassPoint::Wnw),
    (326, CompassPoint::Nw),
    (349, CompassPoint::Nnw),
    (360, CompassPoint::N),
];

pub fn meters_to_feet(meters: f64) -> f64 {
    meters * FEET_PER_METER
}

/// Convert Celsius to Fahrenheit, rounded half-up to one decimal place
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    round_plus(celsius * 9.0 / 5.0 + 32.0, TEMPERATURE_PLACES)
}

/// Round half-up to the nearest integer
pub fn round(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round half-up to the given number of decimal places
pub fn round_plus(value: f64, places: i32) -> f64 {
    let shift = 10f64.powi(places);
    round(value * shift) / shift
}

/// Map a whole-degree azimuth to its compass point
///
/// Buckets are checked in ascending order so 350..=360 wraps back to north.
/// Negative angles and angles above 360 are rejected.
pub fn degrees_to_compass(degrees: i64) -> Result<CompassPoint> {
    if degrees < 0 {
        return Err(BuoyError::InvalidAngle { degrees });
    }

    COMPASS_BUCKETS
        .iter()
        .find(|(upper, _)| degrees <= *upper)
        .map(|(_, point)| *point)
        .ok_or(BuoyError::InvalidAngle { degrees })
}
