//! Summary rendering and the hourly publishing gate.

use crate::constants::{PUBLISH_HOURS, RFC822_FORMAT, SCHEDULE_ZONE};
use crate::models::Observation;
use chrono::{DateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

/// Render the three-line summary posted for an observation
///
/// ```text
/// 01 Jan 16 04:00 PST
/// Swell: 3.3ft at 10 sec from S
/// Water: 59.0F
/// ```
///
/// Height is always shown with one decimal. Temperature is already rounded
/// and is written in its shortest form.
pub fn format_observation(observation: &Observation) -> String {
    format!(
        "{}\nSwell: {:.1}ft at {} sec from {}\nWater: {:?}F",
        observation.timestamp.format(RFC822_FORMAT),
        observation.significant_wave_height_ft,
        observation.dominant_wave_period_s,
        observation.mean_wave_direction,
        observation.water_temperature_f,
    )
}

/// Wall clock in the zone the publishing schedule is defined in
pub fn publish_clock(now: DateTime<Utc>) -> DateTime<Tz> {
    now.with_timezone(&SCHEDULE_ZONE)
}

/// Whether a run at `now` should publish its summary
pub fn should_publish<Z: TimeZone>(now: &DateTime<Z>) -> bool {
    PUBLISH_HOURS.contains(&now.hour())
}
