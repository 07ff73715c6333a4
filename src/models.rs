//! Core data structures for a buoybot run.
//!
//! Defines the converted observation record and the summary of what a run
//! did with it.

use crate::units::CompassPoint;
use chrono::DateTime;
use chrono_tz::Tz;

/// Latest buoy observation converted to engineering units
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Observation time in the station's local zone
    pub timestamp: DateTime<Tz>,
    /// Significant wave height, feet (unrounded)
    pub significant_wave_height_ft: f64,
    /// Dominant wave period, seconds
    pub dominant_wave_period_s: i32,
    /// Average wave period, seconds
    pub average_period_s: f64,
    pub mean_wave_direction: CompassPoint,
    /// Water temperature, Fahrenheit rounded to one decimal
    pub water_temperature_f: f64,
}

/// What happened to the summary at the end of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Posted; carries the text echoed back by the service
    Published(String),
    /// Outside the publishing hours
    Skipped,
    /// The service rejected the post; the run still succeeds
    Failed(String),
    /// Dry run, nothing was persisted or posted
    DryRun,
}

/// Result of one complete run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub observation: Observation,
    pub summary: String,
    /// Row id of the stored observation, if it was persisted
    pub row_id: Option<i64>,
    pub publish: PublishOutcome,
}
