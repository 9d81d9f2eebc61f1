//! Observer configuration: site defaults, per-observation overrides and validation.
//!
//! Every observation may carry its own latitude, longitude, elevation,
//! temperature and pressure. Fields it leaves out fall back to a
//! [`SiteConfig`], which defaults to the reference site in the High Tatras
//! (49.088964°N, 20.070236°E, 952 m, 0 °C, 1010 mbar).
//!
//! ```
//! use dusk_dawn::{LocationOverrides, SiteConfig};
//!
//! let site = SiteConfig::default();
//! let observer = LocationOverrides::new()
//!     .latitude("52:13:48")
//!     .unwrap()
//!     .temperature(12.5)
//!     .resolve(&site)
//!     .unwrap();
//!
//! assert!((observer.latitude() - 52.23).abs() < 1e-9);
//! assert_eq!(observer.longitude(), 20.070236);
//! assert_eq!(observer.temperature(), 12.5);
//! ```

use crate::angle::{Angle, IntoAngle};
use crate::error::{
    check_elevation, check_latitude, check_longitude, check_pressure, check_temperature,
};
use crate::Result;

/// Latitude of the reference site in degrees.
pub const DEFAULT_LATITUDE: f64 = 49.088964;
/// Longitude of the reference site in degrees.
pub const DEFAULT_LONGITUDE: f64 = 20.070236;
/// Elevation of the reference site in meters.
pub const DEFAULT_ELEVATION: f64 = 952.0;
/// Ambient temperature assumed at the reference site in °C.
pub const DEFAULT_TEMPERATURE: f64 = 0.0;
/// Air pressure assumed at the reference site in millibars.
pub const DEFAULT_PRESSURE: f64 = 1010.0;

/// Site-wide defaults used for any field an observation does not override.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SiteConfig {
    /// Latitude, decimal degrees north.
    pub latitude: Angle,
    /// Longitude, decimal degrees east.
    pub longitude: Angle,
    /// Meters above sea level.
    pub elevation: f64,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Millibars; zero disables refraction.
    pub pressure: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            latitude: Angle::from_degrees(DEFAULT_LATITUDE),
            longitude: Angle::from_degrees(DEFAULT_LONGITUDE),
            elevation: DEFAULT_ELEVATION,
            temperature: DEFAULT_TEMPERATURE,
            pressure: DEFAULT_PRESSURE,
        }
    }
}

impl SiteConfig {
    /// Creates a site at the given coordinates with default atmosphere and elevation.
    #[must_use]
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Angle::from_degrees(latitude),
            longitude: Angle::from_degrees(longitude),
            ..Self::default()
        }
    }

    /// Sets the elevation in meters.
    #[must_use]
    pub const fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = elevation;
        self
    }

    /// Sets the temperature in °C and pressure in millibars.
    #[must_use]
    pub const fn with_atmosphere(mut self, temperature: f64, pressure: f64) -> Self {
        self.temperature = temperature;
        self.pressure = pressure;
        self
    }

    /// Validates the site as an observer with no overrides.
    ///
    /// # Errors
    /// Returns `InvalidLocation` for any out-of-range field.
    pub fn observer(&self) -> Result<Observer> {
        LocationOverrides::new().resolve(self)
    }
}

/// Optional per-observation values that take precedence over a [`SiteConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LocationOverrides {
    /// Latitude, decimal degrees north.
    pub latitude: Option<Angle>,
    /// Longitude, decimal degrees east.
    pub longitude: Option<Angle>,
    /// Meters above sea level.
    pub elevation: Option<f64>,
    /// Degrees Celsius.
    pub temperature: Option<f64>,
    /// Millibars.
    pub pressure: Option<f64>,
}

impl LocationOverrides {
    /// Creates overrides with every field unset.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latitude: None,
            longitude: None,
            elevation: None,
            temperature: None,
            pressure: None,
        }
    }

    /// Overrides the latitude from degrees or angle text such as `"49:05:20"`.
    ///
    /// # Errors
    /// Returns `InvalidAngle` if text cannot be parsed.
    pub fn latitude(mut self, latitude: impl IntoAngle) -> Result<Self> {
        self.latitude = Some(latitude.into_angle()?);
        Ok(self)
    }

    /// Overrides the longitude from degrees or angle text.
    ///
    /// # Errors
    /// Returns `InvalidAngle` if text cannot be parsed.
    pub fn longitude(mut self, longitude: impl IntoAngle) -> Result<Self> {
        self.longitude = Some(longitude.into_angle()?);
        Ok(self)
    }

    /// Overrides the elevation in meters.
    #[must_use]
    pub const fn elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    /// Overrides the temperature in °C.
    #[must_use]
    pub const fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Overrides the pressure in millibars.
    #[must_use]
    pub const fn pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    /// Fills unset fields from `site` and validates the result.
    ///
    /// # Errors
    /// Returns `InvalidLocation` for any out-of-range field.
    pub fn resolve(&self, site: &SiteConfig) -> Result<Observer> {
        Observer::new(
            self.latitude.unwrap_or(site.latitude).degrees(),
            self.longitude.unwrap_or(site.longitude).degrees(),
            self.elevation.unwrap_or(site.elevation),
            self.temperature.unwrap_or(site.temperature),
            self.pressure.unwrap_or(site.pressure),
        )
    }
}

/// A validated observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    latitude: f64,
    longitude: f64,
    elevation: f64,
    temperature: f64,
    pressure: f64,
}

impl Observer {
    /// Creates an observer after validating every field.
    ///
    /// # Errors
    /// Returns `InvalidLocation` for any out-of-range field.
    pub fn new(
        latitude: f64,
        longitude: f64,
        elevation: f64,
        temperature: f64,
        pressure: f64,
    ) -> Result<Self> {
        check_latitude(latitude)?;
        check_longitude(longitude)?;
        check_elevation(elevation)?;
        check_temperature(temperature)?;
        check_pressure(pressure)?;
        Ok(Self {
            latitude,
            longitude,
            elevation,
            temperature,
            pressure,
        })
    }

    /// Gets the latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Gets the longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Gets the elevation in meters.
    #[must_use]
    pub const fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Gets the temperature in °C.
    #[must_use]
    pub const fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Gets the pressure in millibars.
    #[must_use]
    pub const fn pressure(&self) -> f64 {
        self.pressure
    }

    /// Scale factor applied to standard refraction, 1.0 at 1010 mbar and 10 °C.
    #[must_use]
    pub fn refraction_scale(&self) -> f64 {
        (self.pressure / 1010.0) * (283.0 / (273.0 + self.temperature))
    }
}
