//! Observation line extraction from NDBC realtime2 feeds.
//!
//! A feed starts with a column header line and a units line, followed by
//! observations newest first:
//!
//! ```text
//! #YY  MM DD hh mm WDIR WSPD GST  WVHT   DPD   APD MWD   PRES  ATMP  WTMP  DEWP  VIS PTDY  TIDE
//! #yr  mo dy hr mn degT m/s  m/s     m   sec   sec degT   hPa  degC  degC  degC  nmi  hPa    ft
//! 2016 01 01 12 00 290  5.0  6.0   1.0    10   9.5 180 1020.1  12.0  15.0   8.0   MM   MM    MM
//! ```
//!
//! Only the first observation line is consumed.

use crate::constants::{LEGACY_OBSERVATION_BYTES, MIN_OBSERVATION_FIELDS, OBSERVATION_LINE_INDEX};
use crate::error::{BuoyError, Result};
use serde::Deserialize;
use tracing::debug;

/// How the most recent observation line is located in the feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum FeedLayout {
    /// Third newline-delimited line
    #[default]
    Line,
    /// Fixed byte range from the historical feed width
    LegacyOffset,
}

impl FeedLayout {
    pub fn extract(&self, raw: &[u8]) -> Result<Vec<String>> {
        match self {
            FeedLayout::Line => extract(raw),
            FeedLayout::LegacyOffset => extract_legacy_offset(raw),
        }
    }
}

/// Split the most recent observation line into whitespace separated tokens
pub fn extract(raw: &[u8]) -> Result<Vec<String>> {
    let text = String::from_utf8_lossy(raw);

    let line = text.lines().nth(OBSERVATION_LINE_INDEX).ok_or_else(|| {
        BuoyError::malformed_feed(format!(
            "expected at least {} lines, found {}",
            OBSERVATION_LINE_INDEX + 1,
            text.lines().count()
        ))
    })?;

    if line.trim_start().starts_with('#') {
        return Err(BuoyError::malformed_feed(
            "observation line is a header line",
        ));
    }

    tokenize(line)
}

/// Tokenize the observation at its historical fixed byte offsets
pub fn extract_legacy_offset(raw: &[u8]) -> Result<Vec<String>> {
    let slice = raw.get(LEGACY_OBSERVATION_BYTES).ok_or_else(|| {
        BuoyError::malformed_feed(format!(
            "feed is {} bytes, expected at least {}",
            raw.len(),
            LEGACY_OBSERVATION_BYTES.end
        ))
    })?;

    tokenize(&String::from_utf8_lossy(slice))
}

fn tokenize(line: &str) -> Result<Vec<String>> {
    let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();

    if tokens.len() < MIN_OBSERVATION_FIELDS {
        return Err(BuoyError::malformed_feed(format!(
            "expected at least {} fields, found {}",
            MIN_OBSERVATION_FIELDS,
            tokens.len()
        )));
    }

    debug!("Extracted {} observation fields", tokens.len());
    Ok(tokens)
}
