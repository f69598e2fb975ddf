//! Error types for day-length computations

use thiserror::Error;

/// Result type for day-length operations
pub type Result<T> = std::result::Result<T, SolarError>;

/// Errors that abort a report. Events that simply do not happen on a given
/// day are not errors; see [`crate::types::Occurrence`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolarError {
    /// Latitude/longitude out of range or not finite, or a blank name
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// Identifier not recognized by the timezone resolver
    #[error("Unknown timezone identifier: {0}")]
    UnresolvedTimeZone(String),

    /// Depression angle outside 0-90 degrees
    #[error("Invalid depression angle: {0}° (expected 0 to 90)")]
    InvalidDepressionAngle(f64),

    /// Horizon altitude not finite, outside -90 to 90, or below the twilight threshold
    #[error("Invalid horizon altitude: {0}° (expected -90 to 90, not below the twilight threshold)")]
    InvalidHorizonAltitude(f64),

    /// Year or instant outside chrono's representable range
    #[error("Date out of range: year {0}")]
    DateOutOfRange(i32),
}
