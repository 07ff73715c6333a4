//! buoybot Library
//!
//! Fetches the latest observation for an NDBC marine buoy, converts it to
//! engineering units, stores it in SQLite and, at set hours, posts a short
//! swell report as a status update.
//!
//! This library provides tools for:
//! - Extracting the most recent observation line from a realtime2 text feed
//! - Converting wave height, water temperature and wave direction
//! - Building an immutable, zone-adjusted [`Observation`]
//! - Rendering the summary text and gating publication by local hour
//! - Persisting observations and publishing summaries behind trait seams

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod feed;
pub mod fetch;
pub mod models;
pub mod observation;
pub mod pipeline;
pub mod publish;
pub mod report;
pub mod storage;
pub mod units;

// Re-export commonly used types
pub use config::Config;
pub use error::{BuoyError, Result};
pub use models::{Observation, PublishOutcome, RunOutcome};
pub use units::CompassPoint;
