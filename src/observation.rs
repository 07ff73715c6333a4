//! Observation building from extracted feed tokens.
//!
//! Parses each consumed field, converts it to engineering units and
//! assembles an [`Observation`]. Any failure aborts the build; no partial
//! record is ever produced.

use crate::constants::{FEED_TIMESTAMP_FORMAT, MIN_OBSERVATION_FIELDS, OBSERVATION_ZONE, fields};
use crate::error::{BuoyError, Result};
use crate::models::Observation;
use crate::units::{celsius_to_fahrenheit, degrees_to_compass, meters_to_feet};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;
use tracing::debug;

/// Build an observation from the tokens of one feed line
pub fn build_observation(tokens: &[String]) -> Result<Observation> {
    if tokens.len() < MIN_OBSERVATION_FIELDS {
        return Err(BuoyError::malformed_feed(format!(
            "expected at least {} fields, found {}",
            MIN_OBSERVATION_FIELDS,
            tokens.len()
        )));
    }

    let timestamp = parse_timestamp(&tokens[fields::TIMESTAMP])?;

    let height_m: f64 = parse_field(
        tokens,
        fields::SIGNIFICANT_WAVE_HEIGHT,
        "significant_wave_height",
    )?;
    let dominant_period: i32 =
        parse_field(tokens, fields::DOMINANT_WAVE_PERIOD, "dominant_wave_period")?;
    let average_period: f64 = parse_field(tokens, fields::AVERAGE_PERIOD, "average_period")?;
    let direction_deg: i64 =
        parse_field(tokens, fields::MEAN_WAVE_DIRECTION, "mean_wave_direction")?;
    let water_temp_c: f64 =
        parse_field(tokens, fields::WATER_TEMPERATURE, "water_temperature")?;

    let observation = Observation {
        timestamp,
        significant_wave_height_ft: meters_to_feet(height_m),
        dominant_wave_period_s: dominant_period,
        average_period_s: average_period,
        mean_wave_direction: degrees_to_compass(direction_deg)?,
        water_temperature_f: celsius_to_fahrenheit(water_temp_c),
    };

    debug!("Built observation: {:?}", observation);
    Ok(observation)
}

/// Parse "YYYY MM DD hh mm" on the UTC feed clock into the station zone
fn parse_timestamp(parts: &[String]) -> Result<DateTime<Tz>> {
    let raw = parts.join(" ");
    let naive = NaiveDateTime::parse_from_str(&raw, FEED_TIMESTAMP_FORMAT)
        .map_err(|_| BuoyError::parse("timestamp", raw.clone()))?;

    Ok(Utc.from_utc_datetime(&naive).with_timezone(&OBSERVATION_ZONE))
}

fn parse_field<T: FromStr>(tokens: &[String], index: usize, field: &'static str) -> Result<T> {
    let value = &tokens[index];
    value
        .parse::<T>()
        .map_err(|_| BuoyError::parse(field, value.as_str()))
}
