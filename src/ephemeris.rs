//! Rise and set queries for the Sun.
//!
//! The [`Ephemeris`] trait is the seam between phase classification and
//! astronomy. [`SpaEphemeris`] implements it on top of the NREL Solar
//! Position Algorithm from the `solar-positioning` crate. It walks away from
//! the reference instant sampling the Sun's geometric altitude, with each
//! step no longer than the Sun needs to reach the target altitude, and
//! bisects the first bracketed crossing in the requested direction. Crossings
//! are found the same way whatever UTC hour they fall on.

use crate::error::Circumstance;
use crate::observer::Observer;
use crate::types::{Horizon, Limb, SUN_SEMIDIAMETER, Transition};
use crate::{Error, Result};
use chrono::{DateTime, TimeDelta, Utc};
use log::trace;
use solar_positioning::time::DeltaT;
use solar_positioning::{RefractionCorrection, spa};

/// Apparent altitudes below this get no refraction correction.
const REFRACTION_FLOOR: f64 = -2.0;

/// Upper bound on the rate of change of solar altitude, degrees per second.
///
/// Hour-angle motion gives at most 15.04°/h; the margin covers declination
/// drift and parallax.
const MAX_ALTITUDE_RATE: f64 = 16.0 / 3600.0;

/// Shortest sampling step, seconds.
const MIN_STEP: f64 = 10.0;

/// Longest sampling step, seconds.
const MAX_STEP: f64 = 3.0 * 3600.0;

/// Crossings are refined to this resolution.
const RESOLUTION: TimeDelta = TimeDelta::milliseconds(500);

/// Source of solar rise and set instants.
///
/// `next_*` queries return the first crossing strictly after `instant`;
/// `previous_*` queries return the last crossing at or before it. Rising
/// queries report missing crossings as [`Transition::TwilightStart`] or
/// [`Transition::Sunrise`] depending on the limb, setting queries as
/// [`Transition::TwilightEnd`] or [`Transition::Sunset`].
pub trait Ephemeris {
    /// Next time the Sun rises through `horizon`.
    ///
    /// # Errors
    /// Returns `NoSuchTransition` if the Sun does not cross the horizon.
    fn next_rising(
        &self,
        observer: &Observer,
        instant: DateTime<Utc>,
        horizon: Horizon,
    ) -> Result<DateTime<Utc>>;

    /// Next time the Sun sets through `horizon`.
    ///
    /// # Errors
    /// Returns `NoSuchTransition` if the Sun does not cross the horizon.
    fn next_setting(
        &self,
        observer: &Observer,
        instant: DateTime<Utc>,
        horizon: Horizon,
    ) -> Result<DateTime<Utc>>;

    /// Most recent time the Sun rose through `horizon`.
    ///
    /// # Errors
    /// Returns `NoSuchTransition` if the Sun does not cross the horizon.
    fn previous_rising(
        &self,
        observer: &Observer,
        instant: DateTime<Utc>,
        horizon: Horizon,
    ) -> Result<DateTime<Utc>>;

    /// Most recent time the Sun set through `horizon`.
    ///
    /// # Errors
    /// Returns `NoSuchTransition` if the Sun does not cross the horizon.
    fn previous_setting(
        &self,
        observer: &Observer,
        instant: DateTime<Utc>,
        horizon: Horizon,
    ) -> Result<DateTime<Utc>>;
}

/// Maps a crossing direction and limb to the transition it represents.
#[must_use]
pub const fn transition_for(rising: bool, horizon: &Horizon) -> Transition {
    match (rising, horizon.limb()) {
        (true, Limb::Center) => Transition::TwilightStart,
        (true, Limb::Upper) => Transition::Sunrise,
        (false, Limb::Upper) => Transition::Sunset,
        (false, Limb::Center) => Transition::TwilightEnd,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Next,
    Previous,
}

/// A sampled instant and the Sun's altitude above the target there.
#[derive(Debug, Clone, Copy)]
struct Sample {
    at: DateTime<Utc>,
    height: f64,
}

impl Sample {
    const fn is_above(self) -> bool {
        self.height >= 0.0
    }
}

/// SPA-backed ephemeris.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaEphemeris {
    search_days: i64,
}

impl Default for SpaEphemeris {
    fn default() -> Self {
        Self { search_days: 2 }
    }
}

impl SpaEphemeris {
    /// Creates an ephemeris that searches up to `search_days` days from the instant.
    ///
    /// Values below one are raised to one.
    #[must_use]
    pub fn with_search_days(search_days: u32) -> Self {
        Self {
            search_days: i64::from(search_days.max(1)),
        }
    }

    /// Gets the search window in days.
    #[must_use]
    pub const fn search_days(&self) -> i64 {
        self.search_days
    }

    /// Apparent altitude of the Sun's center as seen by `observer`, in degrees.
    ///
    /// Includes refraction unless the observer's pressure is zero.
    ///
    /// # Errors
    /// Returns `Ephemeris` if SPA rejects the inputs.
    pub fn solar_altitude(&self, observer: &Observer, instant: DateTime<Utc>) -> Result<f64> {
        let refraction = if observer.pressure() > 0.0 {
            Some(RefractionCorrection::new(
                observer.pressure(),
                observer.temperature(),
            )?)
        } else {
            None
        };
        altitude(
            observer,
            instant,
            DeltaT::estimate_from_date_like(instant)?,
            refraction,
        )
    }

    fn find(
        &self,
        observer: &Observer,
        instant: DateTime<Utc>,
        horizon: Horizon,
        rising: bool,
        direction: Direction,
    ) -> Result<DateTime<Utc>> {
        let target = center_altitude(observer, &horizon);
        if !target.is_finite() {
            return Err(Error::invalid_angle(horizon.altitude().to_string()));
        }
        let delta_t = DeltaT::estimate_from_date_like(instant)?;
        let sample = |at: DateTime<Utc>| -> Result<Sample> {
            let height = altitude(observer, at, delta_t, None)? - target;
            Ok(Sample { at, height })
        };

        let limit = TimeDelta::days(self.search_days);
        let mut current = sample(instant)?;
        let (mut seen_above, mut seen_below) = (current.is_above(), !current.is_above());
        let mut found = None;

        loop {
            let remaining = limit - (current.at - instant).abs();
            if remaining <= TimeDelta::zero() {
                break;
            }
            let step = step_for(current.height).min(remaining);
            let following = sample(match direction {
                Direction::Next => current.at + step,
                Direction::Previous => current.at - step,
            })?;
            seen_above |= following.is_above();
            seen_below |= !following.is_above();

            let (earlier, later) = match direction {
                Direction::Next => (current, following),
                Direction::Previous => (following, current),
            };
            if earlier.is_above() != later.is_above() && later.is_above() == rising {
                found = Some(bisect(earlier, later, &sample)?);
                break;
            }
            current = following;
        }

        trace!(
            "{direction:?} {} at {target:.4}° from {instant}: {found:?}",
            if rising { "rising" } else { "setting" },
        );

        found.ok_or_else(|| {
            let circumstance = match (seen_above, seen_below) {
                (true, false) => Circumstance::AlwaysAbove,
                (false, true) => Circumstance::AlwaysBelow,
                _ => Circumstance::OutsideWindow,
            };
            Error::no_such_transition(transition_for(rising, &horizon), circumstance)
        })
    }
}

/// Topocentric altitude of the Sun's center, geometric when `refraction` is `None`.
fn altitude(
    observer: &Observer,
    instant: DateTime<Utc>,
    delta_t: f64,
    refraction: Option<RefractionCorrection>,
) -> Result<f64> {
    let position = spa::solar_position(
        instant,
        observer.latitude(),
        observer.longitude(),
        observer.elevation(),
        delta_t,
        refraction,
    )?;
    Ok(position.elevation_angle())
}

/// Longest step that cannot pass the target from `height` degrees away.
#[allow(clippy::cast_possible_truncation)]
fn step_for(height: f64) -> TimeDelta {
    let seconds = (height.abs() / MAX_ALTITUDE_RATE).clamp(MIN_STEP, MAX_STEP);
    TimeDelta::milliseconds((seconds * 1000.0) as i64)
}

/// Narrows a bracketed crossing and returns the first instant on its far side.
fn bisect(
    mut earlier: Sample,
    mut later: Sample,
    sample: &impl Fn(DateTime<Utc>) -> Result<Sample>,
) -> Result<DateTime<Utc>> {
    while later.at - earlier.at > RESOLUTION {
        let middle = sample(earlier.at + (later.at - earlier.at) / 2)?;
        if middle.is_above() == earlier.is_above() {
            earlier = middle;
        } else {
            later = middle;
        }
    }
    Ok(later.at)
}

impl Ephemeris for SpaEphemeris {
    fn next_rising(
        &self,
        observer: &Observer,
        instant: DateTime<Utc>,
        horizon: Horizon,
    ) -> Result<DateTime<Utc>> {
        self.find(observer, instant, horizon, true, Direction::Next)
    }

    fn next_setting(
        &self,
        observer: &Observer,
        instant: DateTime<Utc>,
        horizon: Horizon,
    ) -> Result<DateTime<Utc>> {
        self.find(observer, instant, horizon, false, Direction::Next)
    }

    fn previous_rising(
        &self,
        observer: &Observer,
        instant: DateTime<Utc>,
        horizon: Horizon,
    ) -> Result<DateTime<Utc>> {
        self.find(observer, instant, horizon, true, Direction::Previous)
    }

    fn previous_setting(
        &self,
        observer: &Observer,
        instant: DateTime<Utc>,
        horizon: Horizon,
    ) -> Result<DateTime<Utc>> {
        self.find(observer, instant, horizon, false, Direction::Previous)
    }
}

/// Geometric altitude of the Sun's center when `horizon` is crossed.
///
/// Removes refraction at the apparent horizon altitude and, for upper-limb
/// horizons, the solar semidiameter.
#[must_use]
pub fn center_altitude(observer: &Observer, horizon: &Horizon) -> f64 {
    let apparent = horizon.altitude().degrees();
    let semidiameter = match horizon.limb() {
        Limb::Upper => SUN_SEMIDIAMETER,
        Limb::Center => 0.0,
    };
    apparent - refraction(observer, apparent) - semidiameter
}

/// Refraction in degrees at an apparent altitude, after Bennett as scaled in SPA.
#[must_use]
pub fn refraction(observer: &Observer, apparent_altitude: f64) -> f64 {
    if observer.pressure() <= 0.0 || apparent_altitude < REFRACTION_FLOOR {
        return 0.0;
    }
    let argument = (apparent_altitude + 10.3 / (apparent_altitude + 5.11)).to_radians();
    observer.refraction_scale() * 1.02 / (60.0 * argument.tan())
}
