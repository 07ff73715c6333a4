//! Application constants for buoybot
//!
//! Feed layout, conversion factors, time zones and the publishing schedule.

use chrono_tz::Tz;

// =============================================================================
// Feed Layout
// =============================================================================

/// NDBC realtime2 feed URL template; `{station}` is replaced by the buoy id
pub const DEFAULT_FEED_URL: &str = "https://www.ndbc.noaa.gov/data/realtime2/{station}.txt";

/// Placeholder substituted in feed URL templates
pub const STATION_PLACEHOLDER: &str = "{station}";

/// Header and units lines precede the most recent observation
pub const OBSERVATION_LINE_INDEX: usize = 2;

/// Historical byte range of the most recent observation line
pub const LEGACY_OBSERVATION_BYTES: std::ops::Range<usize> = 188..281;

/// Observation lines must carry at least fields 0..=14
pub const MIN_OBSERVATION_FIELDS: usize = 15;

/// Token positions within an observation line
pub mod fields {
    /// Year, month, day, hour, minute
    pub const TIMESTAMP: std::ops::Range<usize> = 0..5;
    /// WVHT, metres
    pub const SIGNIFICANT_WAVE_HEIGHT: usize = 8;
    /// DPD, whole seconds
    pub const DOMINANT_WAVE_PERIOD: usize = 9;
    /// APD, seconds
    pub const AVERAGE_PERIOD: usize = 10;
    /// MWD, degrees true
    pub const MEAN_WAVE_DIRECTION: usize = 11;
    /// WTMP, degrees Celsius
    pub const WATER_TEMPERATURE: usize = 14;
}

/// Feed timestamp layout after joining the first five tokens
pub const FEED_TIMESTAMP_FORMAT: &str = "%Y %m %d %H %M";

// =============================================================================
// Units
// =============================================================================

pub const FEET_PER_METER: f64 = 3.28084;

/// Decimal places kept for water temperature
pub const TEMPERATURE_PLACES: i32 = 1;

// =============================================================================
// Time Zones and Schedule
// =============================================================================

/// Zone observations are rendered in
pub const OBSERVATION_ZONE: Tz = chrono_tz::America::Los_Angeles;

/// Zone the publishing schedule is evaluated in
pub const SCHEDULE_ZONE: Tz = chrono_tz::US::Pacific;

/// Local hours at which a run publishes its summary
pub const PUBLISH_HOURS: [u32; 8] = [5, 7, 9, 11, 13, 16, 18, 20];

/// RFC 822 style timestamp used at the head of every summary
pub const RFC822_FORMAT: &str = "%d %b %y %H:%M %Z";

// =============================================================================
// Networking and Storage
// =============================================================================

/// Status update endpoint
pub const STATUS_ENDPOINT: &str = "https://api.twitter.com/2/tweets";

pub const HTTP_TIMEOUT_SECS: u64 = 30;

pub const USER_AGENT: &str = concat!("buoybot/", env!("CARGO_PKG_VERSION"));

/// Default database file name under the user data directory
pub const DEFAULT_DATABASE_DIR: &str = "buoybot";
pub const DEFAULT_DATABASE_FILE: &str = "observations.db";
