//! Core data types for diurnal phase classification.

use crate::angle::{Angle, parse_angle};
use crate::{Error, Result};
use chrono::{DateTime, TimeDelta, Utc};
use core::fmt;
use core::str::FromStr;

/// Standard horizon for sunrise and sunset: 34 arcminutes of refraction, as used by the USNO.
pub const STANDARD_HORIZON: Angle = Angle::from_degrees(-34.0 / 60.0);

/// Apparent angular radius of the Sun in degrees.
pub const SUN_SEMIDIAMETER: f64 = 16.0 / 60.0;

/// The four diurnal phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Phase {
    /// Sun below the twilight angle.
    Night,
    /// Between morning twilight start and sunrise.
    Dawn,
    /// Between sunrise and sunset.
    Day,
    /// Between sunset and evening twilight end.
    Dusk,
}

impl Phase {
    /// Gets the lowercase label for this phase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Night => "night",
            Self::Dawn => "dawn",
            Self::Day => "day",
            Self::Dusk => "dusk",
        }
    }

    /// The transition that begins this phase.
    #[must_use]
    pub const fn opened_by(self) -> Transition {
        match self {
            Self::Night => Transition::TwilightEnd,
            Self::Dawn => Transition::TwilightStart,
            Self::Day => Transition::Sunrise,
            Self::Dusk => Transition::Sunset,
        }
    }

    /// The transition that ends this phase.
    #[must_use]
    pub const fn closed_by(self) -> Transition {
        match self {
            Self::Night => Transition::TwilightStart,
            Self::Dawn => Transition::Sunrise,
            Self::Day => Transition::Sunset,
            Self::Dusk => Transition::TwilightEnd,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "night" => Ok(Self::Night),
            "dawn" => Ok(Self::Dawn),
            "day" => Ok(Self::Day),
            "dusk" => Ok(Self::Dusk),
            _ => Err(Error::UnknownPhase {
                input: s.to_string(),
            }),
        }
    }
}

/// A boundary between two phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Transition {
    /// Sun's center rises through the twilight angle.
    TwilightStart,
    /// Sun's upper limb rises through the horizon.
    Sunrise,
    /// Sun's upper limb sets through the horizon.
    Sunset,
    /// Sun's center sets through the twilight angle.
    TwilightEnd,
}

impl Transition {
    /// All transitions in tie-breaking order.
    pub const ALL: [Self; 4] = [
        Self::TwilightStart,
        Self::Sunrise,
        Self::Sunset,
        Self::TwilightEnd,
    ];

    /// The phase that this transition ends.
    #[must_use]
    pub const fn ends(self) -> Phase {
        match self {
            Self::TwilightStart => Phase::Night,
            Self::Sunrise => Phase::Dawn,
            Self::Sunset => Phase::Day,
            Self::TwilightEnd => Phase::Dusk,
        }
    }

    /// Checks if the Sun is rising at this transition.
    #[must_use]
    pub const fn is_rising(self) -> bool {
        matches!(self, Self::TwilightStart | Self::Sunrise)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TwilightStart => "twilight start",
            Self::Sunrise => "sunrise",
            Self::Sunset => "sunset",
            Self::TwilightEnd => "twilight end",
        })
    }
}

/// Which point of the solar disc defines a rise or set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limb {
    /// Top edge of the disc (sunrise and sunset).
    Upper,
    /// Geometric center of the disc (twilight).
    Center,
}

/// Altitude and limb mode for a rise/set query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizon {
    altitude: Angle,
    limb: Limb,
}

impl Horizon {
    /// Creates a horizon from an apparent altitude and limb mode.
    #[must_use]
    pub const fn new(altitude: Angle, limb: Limb) -> Self {
        Self { altitude, limb }
    }

    /// Horizon for sunrise and sunset, measured at the upper limb.
    #[must_use]
    pub const fn sunrise_sunset(altitude: Angle) -> Self {
        Self::new(altitude, Limb::Upper)
    }

    /// Horizon for twilight, measured at the center of the disc.
    #[must_use]
    pub const fn twilight(twilight: Twilight) -> Self {
        Self::new(twilight.altitude(), Limb::Center)
    }

    /// Gets the apparent altitude.
    #[must_use]
    pub const fn altitude(&self) -> Angle {
        self.altitude
    }

    /// Gets the limb mode.
    #[must_use]
    pub const fn limb(&self) -> Limb {
        self.limb
    }
}

/// Twilight boundary definitions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum Twilight {
    /// Sun's center 6° below the horizon.
    #[default]
    Civil,
    /// Sun's center 12° below the horizon.
    Nautical,
    /// Sun's center 18° below the horizon.
    Astronomical,
    /// Any other altitude.
    Custom(Angle),
}

impl Twilight {
    /// Gets the altitude of the Sun's center at the twilight boundary.
    #[must_use]
    pub const fn altitude(&self) -> Angle {
        match self {
            Self::Civil => Angle::from_degrees(-6.0),
            Self::Nautical => Angle::from_degrees(-12.0),
            Self::Astronomical => Angle::from_degrees(-18.0),
            Self::Custom(angle) => *angle,
        }
    }

    /// Creates a twilight definition, folding the standard angles into their named variants.
    ///
    /// # Errors
    /// Returns `InvalidAngle` if the altitude is outside -90 to +90 degrees.
    pub fn custom(altitude: Angle) -> Result<Self> {
        let degrees = altitude.degrees();
        if !(-90.0..=90.0).contains(&degrees) {
            return Err(Error::invalid_angle(altitude.to_string()));
        }
        Ok(match degrees {
            d if d == -6.0 => Self::Civil,
            d if d == -12.0 => Self::Nautical,
            d if d == -18.0 => Self::Astronomical,
            _ => Self::Custom(altitude),
        })
    }
}

impl FromStr for Twilight {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "civil" => Ok(Self::Civil),
            "nautical" | "nautic" => Ok(Self::Nautical),
            "astronomical" => Ok(Self::Astronomical),
            _ => Self::custom(parse_angle(s)?),
        }
    }
}

impl TryFrom<String> for Twilight {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Twilight> for String {
    fn from(twilight: Twilight) -> Self {
        match twilight {
            Twilight::Civil => "civil".to_owned(),
            Twilight::Nautical => "nautical".to_owned(),
            Twilight::Astronomical => "astronomical".to_owned(),
            Twilight::Custom(angle) => angle.degrees().to_string(),
        }
    }
}

/// Elapsed time of a phase, displayed like `16:22:03`.
///
/// Spans beyond a day get a `1 day, ` prefix and sub-second spans keep
/// microseconds (`0:38:12.500000`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhaseDuration(TimeDelta);

impl PhaseDuration {
    /// Wraps a time delta.
    #[must_use]
    pub const fn new(delta: TimeDelta) -> Self {
        Self(delta)
    }

    /// Gets the underlying time delta.
    #[must_use]
    pub const fn as_time_delta(&self) -> TimeDelta {
        self.0
    }

    /// Gets the length in fractional hours.
    #[must_use]
    pub fn hours(&self) -> f64 {
        self.0.num_milliseconds() as f64 / 3_600_000.0
    }
}

impl fmt::Display for PhaseDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delta = self.0;
        if delta < TimeDelta::zero() {
            f.write_str("-")?;
        }
        let delta = delta.abs();
        let days = delta.num_days();
        let seconds = delta.num_seconds() - days * 86_400;
        let micros = delta.subsec_nanos() / 1_000;

        match days {
            0 => {}
            1 => f.write_str("1 day, ")?,
            n => write!(f, "{n} days, ")?,
        }
        write!(
            f,
            "{}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )?;
        if micros != 0 {
            write!(f, ".{micros:06}")?;
        }
        Ok(())
    }
}

/// Outcome of classifying one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    phase: Phase,
    next_transition: DateTime<Utc>,
    duration: Option<PhaseDuration>,
}

impl Classification {
    pub(crate) const fn new(
        phase: Phase,
        next_transition: DateTime<Utc>,
        duration: Option<PhaseDuration>,
    ) -> Self {
        Self {
            phase,
            next_transition,
            duration,
        }
    }

    /// Gets the classified phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Gets the label of the classified phase.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.phase.as_str()
    }

    /// Gets the transition that ends the phase.
    #[must_use]
    pub const fn ending(&self) -> Transition {
        self.phase.closed_by()
    }

    /// Gets when the phase ends.
    #[must_use]
    pub const fn ends_at(&self) -> DateTime<Utc> {
        self.next_transition
    }

    /// Gets the phase duration, if it was requested.
    #[must_use]
    pub const fn duration(&self) -> Option<PhaseDuration> {
        self.duration
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.duration {
            Some(duration) => write!(f, "{} ({duration})", self.phase),
            None => write!(f, "{}", self.phase),
        }
    }
}
