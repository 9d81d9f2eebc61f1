//! # Dusk Dawn
//!
//! Classify a moment in UTC as **night**, **dawn**, **day** or **dusk** for an observer on Earth.
//!
//! The classifier asks an ephemeris for the next twilight start, sunrise, sunset and
//! twilight end, and labels the moment by whichever comes first. It can also report how
//! long the current phase lasts, from the transition that opened it to the one that
//! closes it. A small helper converts naive local timestamps to UTC through the IANA
//! timezone database.
//!
//! ## Features
//!
//! - Civil, nautical, astronomical or custom twilight angles
//! - Refraction-adjusted sunrise and sunset horizon (`-0:34` by default)
//! - Per-observation overrides of latitude, longitude, elevation, temperature and pressure
//! - Polar day and night reported as errors, never as a misleading label
//! - Pluggable [`Ephemeris`]; the default uses NREL SPA from `solar-positioning`
//!
//! ## Feature Flags
//!
//! - `serde`: (de)serialize site configuration, overrides, options and phases. Angles
//!   accept either numbers or strings like `"49:05:20"`.
//!
//! ## Quick Start
//!
//! ### Classifying an instant
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use dusk_dawn::{classify, ClassifyOptions, LocationOverrides, Phase, Twilight};
//!
//! let instant = Utc.with_ymd_and_hms(2023, 6, 21, 0, 0, 0).unwrap();
//! let options = ClassifyOptions::default()
//!     .with_twilight(Twilight::Civil)
//!     .with_duration();
//!
//! let result = classify(instant, &LocationOverrides::new(), &options).unwrap();
//! assert_eq!(result.phase(), Phase::Night);
//! println!("{} lasting {}", result.label(), result.duration().unwrap());
//! ```
//!
//! ### Overriding the observer
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use dusk_dawn::{classify, ClassifyOptions, LocationOverrides};
//!
//! let singapore = LocationOverrides::new()
//!     .latitude("1:17:00")?
//!     .longitude(103.8333)?
//!     .elevation(15.0)
//!     .temperature(30.0);
//! let instant = Utc.with_ymd_and_hms(2023, 3, 20, 4, 0, 0).unwrap();
//! let result = classify(instant, &singapore, &ClassifyOptions::default())?;
//! assert_eq!(result.label(), "day");
//! # Ok::<(), dusk_dawn::Error>(())
//! ```
//!
//! ### Local time to UTC
//! ```rust
//! use chrono::NaiveDate;
//! use dusk_dawn::to_utc;
//!
//! let local = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let utc = to_utc(local, "Europe/Warsaw").unwrap();
//! assert_eq!(utc.to_rfc3339(), "2022-12-31T23:00:00+00:00");
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of standard twilight angles
)]

// Public API exports
pub use crate::angle::{Angle, IntoAngle, parse_angle};
pub use crate::classify::{ClassifyOptions, classify, classify_at_site, classify_with};
pub use crate::ephemeris::{Ephemeris, SpaEphemeris};
pub use crate::error::{Circumstance, Error, Result};
pub use crate::observer::{LocationOverrides, Observer, SiteConfig};
pub use crate::timezone::{Disambiguation, localize, parse_timezone, to_utc, to_utc_with};
pub use crate::types::{
    Classification, Horizon, Limb, Phase, PhaseDuration, STANDARD_HORIZON, Transition, Twilight,
};

// Classification modules
pub mod classify;
pub mod ephemeris;

// Core modules
pub mod angle;
pub mod error;
pub mod observer;
pub mod types;

// Conversion modules
pub mod timezone;
