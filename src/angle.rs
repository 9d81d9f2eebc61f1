//! Angles in decimal degrees, parsed from decimal or sexagesimal text.
//!
//! Observer coordinates and horizon altitudes are often written the way
//! almanacs print them: `"-0:34"` for 34 arcminutes below the horizon or
//! `"49:05:20.3"` for a latitude. Plain decimals such as `"-6"` or
//! `"49.088964"` are accepted too.
//!
//! ```
//! use dusk_dawn::Angle;
//!
//! let horizon: Angle = "-0:34".parse().unwrap();
//! assert!((horizon.degrees() + 34.0 / 60.0).abs() < 1e-12);
//!
//! let latitude: Angle = "49.088964".parse().unwrap();
//! assert_eq!(latitude.degrees(), 49.088964);
//! ```
//!
//! The sign applies to the whole value: `-0:34` is `-(0° + 34')`, and a sign
//! in any later component is rejected.

use crate::{Error, Result};
use core::fmt;
use core::str::FromStr;

/// An angle in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "AngleRepr", into = "f64")
)]
pub struct Angle(f64);

impl Angle {
    /// Creates an angle from decimal degrees.
    #[must_use]
    pub const fn from_degrees(degrees: f64) -> Self {
        Self(degrees)
    }

    /// Creates an angle from sign and degree/arcminute/arcsecond parts.
    #[must_use]
    pub fn from_dms(negative: bool, degrees: f64, minutes: f64, seconds: f64) -> Self {
        let magnitude = degrees + minutes / 60.0 + seconds / 3600.0;
        Self(if negative { -magnitude } else { magnitude })
    }

    /// Gets the value in decimal degrees.
    #[must_use]
    pub const fn degrees(self) -> f64 {
        self.0
    }
}

impl From<f64> for Angle {
    fn from(degrees: f64) -> Self {
        Self(degrees)
    }
}

impl From<Angle> for f64 {
    fn from(angle: Angle) -> Self {
        angle.0
    }
}

/// Values accepted wherever an angle may be given as degrees or as text.
pub trait IntoAngle {
    /// Converts into an angle.
    ///
    /// # Errors
    /// Returns `InvalidAngle` if text cannot be parsed.
    fn into_angle(self) -> Result<Angle>;
}

impl IntoAngle for Angle {
    fn into_angle(self) -> Result<Angle> {
        Ok(self)
    }
}

impl IntoAngle for f64 {
    fn into_angle(self) -> Result<Angle> {
        Ok(Angle(self))
    }
}

impl IntoAngle for &str {
    fn into_angle(self) -> Result<Angle> {
        parse_angle(self)
    }
}

impl IntoAngle for String {
    fn into_angle(self) -> Result<Angle> {
        parse_angle(&self)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

impl FromStr for Angle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_angle(s)
    }
}

/// Parses a decimal or colon-separated sexagesimal angle.
///
/// # Errors
/// Returns `InvalidAngle` for empty input, more than three components,
/// signs after the first component, out-of-range minutes or seconds, or
/// anything that is not a finite number.
pub fn parse_angle(input: &str) -> Result<Angle> {
    let trimmed = input.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        Some(_) => (false, trimmed),
        None => return Err(Error::invalid_angle(input)),
    };

    let mut parts = [0.0_f64; 3];
    let mut count = 0;
    for part in unsigned.split(':') {
        if count == parts.len() {
            return Err(Error::invalid_angle(input));
        }
        parts[count] = parse_component(part).ok_or_else(|| Error::invalid_angle(input))?;
        count += 1;
    }

    // Minutes and seconds must stay below 60.
    if parts[1..count.max(1)].iter().any(|&value| value >= 60.0) {
        return Err(Error::invalid_angle(input));
    }

    Ok(Angle::from_dms(negative, parts[0], parts[1], parts[2]))
}

fn parse_component(part: &str) -> Option<f64> {
    let part = part.trim();
    if part.is_empty() || part.starts_with(['-', '+']) {
        return None;
    }
    part.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum AngleRepr {
    Degrees(f64),
    Text(String),
}

#[cfg(feature = "serde")]
impl TryFrom<AngleRepr> for Angle {
    type Error = Error;

    fn try_from(repr: AngleRepr) -> Result<Self> {
        match repr {
            AngleRepr::Degrees(degrees) => Ok(Self(degrees)),
            AngleRepr::Text(text) => parse_angle(&text),
        }
    }
}
