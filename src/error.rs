//! Error types for phase classification and timezone conversion.

use crate::types::Transition;
use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;
use core::fmt;

/// Result type alias for operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Why an ephemeris query found no crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Circumstance {
    /// The Sun stays above the requested horizon (polar day).
    AlwaysAbove,
    /// The Sun stays below the requested horizon (polar night).
    AlwaysBelow,
    /// Crossings exist near the instant, just not within the search window.
    OutsideWindow,
}

impl fmt::Display for Circumstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AlwaysAbove => "sun stays above the horizon",
            Self::AlwaysBelow => "sun stays below the horizon",
            Self::OutsideWindow => "no crossing within the search window",
        })
    }
}

/// Errors that can occur while classifying an observation or converting a timestamp.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// An observer field is out of range.
    InvalidLocation {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// An angle string could not be parsed.
    InvalidAngle {
        /// The text that failed to parse.
        input: String,
    },
    /// A phase label is not one of night, dawn, day or dusk.
    UnknownPhase {
        /// The unrecognized label.
        input: String,
    },
    /// The Sun never crosses the requested horizon near the instant.
    NoSuchTransition {
        /// Which transition was being searched for.
        transition: Transition,
        /// What the Sun does instead.
        circumstance: Circumstance,
    },
    /// The timezone identifier is not in the IANA database.
    InvalidTimezone {
        /// The unrecognized identifier.
        name: String,
    },
    /// The local time occurs twice in the zone (DST fall-back).
    AmbiguousLocalTime {
        /// The naive wall-clock time.
        local: NaiveDateTime,
        /// Earlier of the two candidates.
        earliest: DateTime<Tz>,
        /// Later of the two candidates.
        latest: DateTime<Tz>,
    },
    /// The local time is skipped in the zone (DST spring-forward).
    NonexistentLocalTime {
        /// The naive wall-clock time.
        local: NaiveDateTime,
        /// The zone in which it does not exist.
        timezone: Tz,
    },
    /// The underlying ephemeris engine failed.
    Ephemeris(solar_positioning::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLocation { field, value } => {
                write!(f, "invalid location: {field} {value} is out of range")
            }
            Self::InvalidAngle { input } => write!(f, "invalid angle {input:?}"),
            Self::UnknownPhase { input } => write!(f, "unknown phase {input:?}"),
            Self::NoSuchTransition {
                transition,
                circumstance,
            } => write!(f, "no {transition} found: {circumstance}"),
            Self::InvalidTimezone { name } => write!(f, "invalid timezone {name:?}"),
            Self::AmbiguousLocalTime {
                local,
                earliest,
                latest,
            } => write!(
                f,
                "ambiguous local time {local} in {}: {} or {}",
                earliest.timezone(),
                earliest.offset(),
                latest.offset()
            ),
            Self::NonexistentLocalTime { local, timezone } => {
                write!(f, "local time {local} does not exist in {timezone}")
            }
            Self::Ephemeris(err) => write!(f, "ephemeris error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Ephemeris(err) => Some(err),
            _ => None,
        }
    }
}

impl From<solar_positioning::Error> for Error {
    fn from(err: solar_positioning::Error) -> Self {
        Self::Ephemeris(err)
    }
}

impl Error {
    /// Creates an invalid location error.
    #[must_use]
    pub const fn invalid_location(field: &'static str, value: f64) -> Self {
        Self::InvalidLocation { field, value }
    }

    /// Creates an invalid angle error.
    #[must_use]
    pub fn invalid_angle(input: impl Into<String>) -> Self {
        Self::InvalidAngle {
            input: input.into(),
        }
    }

    /// Creates a missing transition error.
    #[must_use]
    pub const fn no_such_transition(transition: Transition, circumstance: Circumstance) -> Self {
        Self::NoSuchTransition {
            transition,
            circumstance,
        }
    }

    /// Creates an invalid timezone error.
    #[must_use]
    pub fn invalid_timezone(name: impl Into<String>) -> Self {
        Self::InvalidTimezone { name: name.into() }
    }

    /// True for any malformed or out-of-range observer input.
    #[must_use]
    pub const fn is_invalid_location(&self) -> bool {
        matches!(self, Self::InvalidLocation { .. } | Self::InvalidAngle { .. })
    }

    /// True when the Sun does not cross the requested horizon.
    #[must_use]
    pub const fn is_no_such_transition(&self) -> bool {
        matches!(self, Self::NoSuchTransition { .. })
    }
}

/// Validates latitude is within the valid range (-90 to +90 degrees).
///
/// # Errors
/// Returns `InvalidLocation` if latitude is outside -90 to +90 degrees.
pub fn check_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::invalid_location("latitude", latitude));
    }
    Ok(())
}

/// Validates longitude is within the valid range (-180 to +180 degrees).
///
/// # Errors
/// Returns `InvalidLocation` if longitude is outside -180 to +180 degrees.
pub fn check_longitude(longitude: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::invalid_location("longitude", longitude));
    }
    Ok(())
}

/// Validates elevation lies between the Dead Sea shore and low Earth orbit.
///
/// # Errors
/// Returns `InvalidLocation` if elevation is not finite or outside -500 to 100 000 meters.
pub fn check_elevation(elevation: f64) -> Result<()> {
    if !(-500.0..=100_000.0).contains(&elevation) {
        return Err(Error::invalid_location("elevation", elevation));
    }
    Ok(())
}

/// Validates pressure for refraction; zero disables refraction.
///
/// # Errors
/// Returns `InvalidLocation` if pressure is not between 0 and 2000 mbar.
pub fn check_pressure(pressure: f64) -> Result<()> {
    if !(0.0..=2000.0).contains(&pressure) {
        return Err(Error::invalid_location("pressure", pressure));
    }
    Ok(())
}

/// Validates temperature is above absolute zero and reasonable for refraction.
///
/// # Errors
/// Returns `InvalidLocation` if temperature is outside -273.15 to 100°C.
pub fn check_temperature(temperature: f64) -> Result<()> {
    if !(-273.15..=100.0).contains(&temperature) {
        return Err(Error::invalid_location("temperature", temperature));
    }
    Ok(())
}
