// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for ephemeris computations.
//!
//! Only invalid *input* is an error.  An event that does not happen on the
//! requested day (polar day, polar night, a refinement that fails to settle)
//! is a regular value, see [`EventTime`](crate::EventTime).

use thiserror::Error;

/// Errors raised while building or evaluating an ephemeris.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    /// The civil date does not exist.
    #[error("invalid date {year:04}-{month:02}-{day:02}: {reason}")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        reason: &'static str,
    },

    /// The time-of-day fields are out of range.
    #[error("invalid time of day {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u32, minute: u32, second: u32 },

    /// A Julian Day that cannot be mapped back onto the calendar.
    #[error("invalid Julian Day {0}")]
    InvalidJulianDay(f64),

    /// Geographic coordinates outside their valid range.
    #[error("invalid observer location: latitude {latitude}°, longitude {longitude}°")]
    InvalidLocation { latitude: f64, longitude: f64 },

    /// UTC offset outside ±14 hours.
    #[error("invalid UTC offset {0} h")]
    InvalidUtcOffset(f64),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EphemerisError>;
