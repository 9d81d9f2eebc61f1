//! Diurnal phase classification.
//!
//! An instant is classified by which of the four upcoming transitions comes
//! first:
//!
//! | soonest transition | phase |
//! |--------------------|-------|
//! | twilight start     | night |
//! | sunrise            | dawn  |
//! | sunset             | day   |
//! | twilight end       | dusk  |
//!
//! Ties go to the earlier row. When a duration is requested, the most recent
//! transition that opened the phase is looked up as well and the phase spans
//! from there to the soonest upcoming transition.

use crate::angle::Angle;
use crate::ephemeris::{Ephemeris, SpaEphemeris};
use crate::observer::{LocationOverrides, Observer, SiteConfig};
use crate::types::{
    Classification, Horizon, Phase, PhaseDuration, STANDARD_HORIZON, Transition, Twilight,
};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use log::debug;

/// Twilight, horizon and duration settings for a classification.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ClassifyOptions {
    /// Twilight boundary, civil by default.
    pub twilight: Twilight,
    /// Apparent horizon for sunrise and sunset, `-0:34` by default.
    pub horizon: Angle,
    /// Whether to compute the phase duration.
    pub duration: bool,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            twilight: Twilight::Civil,
            horizon: STANDARD_HORIZON,
            duration: false,
        }
    }
}

impl ClassifyOptions {
    /// Sets the twilight boundary.
    #[must_use]
    pub const fn with_twilight(mut self, twilight: Twilight) -> Self {
        self.twilight = twilight;
        self
    }

    /// Sets the sunrise/sunset horizon.
    #[must_use]
    pub const fn with_horizon(mut self, horizon: Angle) -> Self {
        self.horizon = horizon;
        self
    }

    /// Requests the phase duration.
    #[must_use]
    pub const fn with_duration(mut self) -> Self {
        self.duration = true;
        self
    }

    /// Checks that both horizon angles are finite and within ±90°.
    ///
    /// # Errors
    /// Returns `InvalidAngle` naming the offending angle.
    pub fn validate(&self) -> Result<()> {
        for angle in [self.horizon, self.twilight.altitude()] {
            let degrees = angle.degrees();
            if !degrees.is_finite() || !(-90.0..=90.0).contains(&degrees) {
                return Err(Error::invalid_angle(angle.to_string()));
            }
        }
        Ok(())
    }

    const fn horizon_for(&self, transition: Transition) -> Horizon {
        match transition {
            Transition::Sunrise | Transition::Sunset => Horizon::sunrise_sunset(self.horizon),
            Transition::TwilightStart | Transition::TwilightEnd => {
                Horizon::twilight(self.twilight)
            }
        }
    }
}

/// Classifies `instant` for the default site with the given overrides, using SPA.
///
/// # Errors
/// Returns `InvalidLocation` for bad observer fields and `NoSuchTransition`
/// when the Sun does not cross one of the horizons (polar day or night).
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use dusk_dawn::{classify, ClassifyOptions, LocationOverrides, Phase};
///
/// let instant = Utc.with_ymd_and_hms(2023, 6, 21, 12, 0, 0).unwrap();
/// let result = classify(instant, &LocationOverrides::new(), &ClassifyOptions::default()).unwrap();
/// assert_eq!(result.phase(), Phase::Day);
/// ```
pub fn classify(
    instant: DateTime<Utc>,
    location: &LocationOverrides,
    options: &ClassifyOptions,
) -> Result<Classification> {
    let observer = location.resolve(&SiteConfig::default())?;
    classify_with(&SpaEphemeris::default(), instant, &observer, options)
}

/// Classifies `instant` for `observer` using any ephemeris.
///
/// # Errors
/// Returns `InvalidAngle` for a non-finite or out-of-range horizon and
/// propagates every ephemeris error, including `NoSuchTransition`.
pub fn classify_with<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    instant: DateTime<Utc>,
    observer: &Observer,
    options: &ClassifyOptions,
) -> Result<Classification> {
    options.validate()?;
    let [first, rest @ ..] = Transition::ALL;
    let mut soonest = first;
    let mut ends_at = next_transition(ephemeris, observer, instant, options, first)?;
    // Strict comparison keeps the earlier transition on ties.
    for transition in rest {
        let at = next_transition(ephemeris, observer, instant, options, transition)?;
        if at < ends_at {
            soonest = transition;
            ends_at = at;
        }
    }
    let phase = soonest.ends();

    let duration = if options.duration {
        let opening = phase.opened_by();
        let started_at = previous_transition(ephemeris, observer, instant, options, opening)?;
        Some(PhaseDuration::new(ends_at - started_at))
    } else {
        None
    };

    debug!(
        "{instant} at ({}, {}): {phase} until {soonest} at {ends_at}",
        observer.latitude(),
        observer.longitude()
    );
    Ok(Classification::new(phase, ends_at, duration))
}

/// Returns `(phase, Some(duration))` or `(phase, None)` for the given site defaults.
///
/// # Errors
/// Same as [`classify_with`].
pub fn classify_at_site(
    instant: DateTime<Utc>,
    site: &SiteConfig,
    location: &LocationOverrides,
    options: &ClassifyOptions,
) -> Result<(Phase, Option<PhaseDuration>)> {
    let observer = location.resolve(site)?;
    let result = classify_with(&SpaEphemeris::default(), instant, &observer, options)?;
    Ok((result.phase(), result.duration()))
}

fn next_transition<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    observer: &Observer,
    instant: DateTime<Utc>,
    options: &ClassifyOptions,
    transition: Transition,
) -> Result<DateTime<Utc>> {
    let horizon = options.horizon_for(transition);
    if transition.is_rising() {
        ephemeris.next_rising(observer, instant, horizon)
    } else {
        ephemeris.next_setting(observer, instant, horizon)
    }
}

fn previous_transition<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    observer: &Observer,
    instant: DateTime<Utc>,
    options: &ClassifyOptions,
    transition: Transition,
) -> Result<DateTime<Utc>> {
    let horizon = options.horizon_for(transition);
    if transition.is_rising() {
        ephemeris.previous_rising(observer, instant, horizon)
    } else {
        ephemeris.previous_setting(observer, instant, horizon)
    }
}
