use chrono::{DateTime, FixedOffset, NaiveDate};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SolarError};

/// Observer position plus the civil timezone its clocks follow.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    name: String,
    latitude: f64,
    longitude: f64,
    timezone_id: String,
}

impl Location {
    /// Builds a validated location. Latitude is degrees north in [-90, 90],
    /// longitude degrees east in [-180, 180].
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        timezone_id: impl Into<String>,
    ) -> Result<Self> {
        let location = Self {
            name: name.into(),
            latitude,
            longitude,
            timezone_id: timezone_id.into(),
        };
        location.validate()?;
        Ok(location)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn timezone_id(&self) -> &str {
        &self.timezone_id
    }

    /// Re-checks the field invariants. Deserialized locations skip `new`, so
    /// the report assembler calls this before every computation.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SolarError::InvalidLocation(
                "location name must not be empty".to_string(),
            ));
        }
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(SolarError::InvalidLocation(format!(
                "latitude {} outside [-90, 90]",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(SolarError::InvalidLocation(format!(
                "longitude {} outside [-180, 180]",
                self.longitude
            )));
        }
        if self.timezone_id.trim().is_empty() {
            return Err(SolarError::UnresolvedTimeZone(self.timezone_id.clone()));
        }
        Ok(())
    }
}

/// Degrees of the sun's center below the horizon that bound twilight.
///
/// Values above 18° are accepted; at most latitudes they simply produce
/// twilight bounds that never occur.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct DepressionAngle(f64);

impl DepressionAngle {
    pub const HORIZON: DepressionAngle = DepressionAngle(0.0);
    pub const CIVIL: DepressionAngle = DepressionAngle(6.0);
    pub const NAUTICAL: DepressionAngle = DepressionAngle(12.0);
    pub const ASTRONOMICAL: DepressionAngle = DepressionAngle(18.0);

    pub fn new(degrees: f64) -> Result<Self> {
        if degrees.is_finite() && (0.0..=90.0).contains(&degrees) {
            Ok(Self(degrees))
        } else {
            Err(SolarError::InvalidDepressionAngle(degrees))
        }
    }

    pub fn degrees(self) -> f64 {
        self.0
    }
}

impl Default for DepressionAngle {
    fn default() -> Self {
        Self::CIVIL
    }
}

impl TryFrom<f64> for DepressionAngle {
    type Error = SolarError;

    fn try_from(degrees: f64) -> Result<Self> {
        Self::new(degrees)
    }
}

impl From<DepressionAngle> for f64 {
    fn from(angle: DepressionAngle) -> f64 {
        angle.0
    }
}

/// Sun's geocentric coordinates at one instant, from the harmonic ephemeris.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolarCoordinates {
    /// Fractional year angle in radians the coordinates were evaluated at
    pub year_angle: f64,
    pub declination: f64,
    /// Apparent minus mean solar time, minutes
    pub equation_of_time: f64,
}

/// Hours of true solar time on the solar day of `date`. Noon is 12.0.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrueSolarTime {
    pub date: NaiveDate,
    pub hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EventKind {
    SolarMidnight,
    TwilightStart,
    Sunrise,
    SolarNoon,
    Sunset,
    TwilightEnd,
}

/// Whether an altitude threshold was crossed, and if not, on which side the
/// sun stayed all day.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Occurrence<T> {
    At(T),
    AlwaysAbove,
    AlwaysBelow,
}

impl<T> Occurrence<T> {
    pub fn occurred(&self) -> bool {
        matches!(self, Occurrence::At(_))
    }

    pub fn instant(&self) -> Option<&T> {
        match self {
            Occurrence::At(t) => Some(t),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Occurrence<U> {
        match self {
            Occurrence::At(t) => Occurrence::At(f(t)),
            Occurrence::AlwaysAbove => Occurrence::AlwaysAbove,
            Occurrence::AlwaysBelow => Occurrence::AlwaysBelow,
        }
    }

    pub fn try_map<U, E, F: FnOnce(T) -> std::result::Result<U, E>>(
        self,
        f: F,
    ) -> std::result::Result<Occurrence<U>, E> {
        Ok(match self {
            Occurrence::At(t) => Occurrence::At(f(t)?),
            Occurrence::AlwaysAbove => Occurrence::AlwaysAbove,
            Occurrence::AlwaysBelow => Occurrence::AlwaysBelow,
        })
    }
}

pub type CivilTime = DateTime<FixedOffset>;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayEvent {
    pub kind: EventKind,
    pub occurrence: Occurrence<CivilTime>,
}

impl DayEvent {
    pub fn time(&self) -> Option<CivilTime> {
        self.occurrence.instant().copied()
    }
}

/// Morning and evening crossings of one altitude threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossings<T> {
    pub rising: Occurrence<T>,
    pub falling: Occurrence<T>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayReport {
    pub date: NaiveDate,
    pub location_name: String,
    pub depression_angle: DepressionAngle,
    pub solar_midnight: DayEvent,
    pub twilight_start: DayEvent,
    pub sunrise: DayEvent,
    pub solar_noon: DayEvent,
    pub sunset: DayEvent,
    pub twilight_end: DayEvent,
    /// Equation of time at the day's solar noon, signed minutes
    pub equation_of_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayLengthConfig {
    pub depression_angle: DepressionAngle,
    /// Altitude of the sun's center at sunrise/sunset, degrees
    pub horizon_altitude: f64,
}

impl DayLengthConfig {
    /// Altitude bounding twilight: `-depression`, or the horizon altitude
    /// itself when the depression is zero.
    pub fn twilight_altitude(&self) -> f64 {
        let depression = self.depression_angle.degrees();
        if depression == 0.0 {
            self.horizon_altitude
        } else {
            -depression
        }
    }

    /// The horizon altitude must be a finite angle in [-90, 90] that does
    /// not sit below the twilight threshold.
    pub fn validate(&self) -> Result<()> {
        let horizon = self.horizon_altitude;
        if !horizon.is_finite()
            || !(-90.0..=90.0).contains(&horizon)
            || horizon < self.twilight_altitude()
        {
            return Err(SolarError::InvalidHorizonAltitude(horizon));
        }
        Ok(())
    }
}

impl Default for DayLengthConfig {
    fn default() -> Self {
        Self {
            depression_angle: DepressionAngle::CIVIL,
            horizon_altitude: crate::events::SUNRISE_ALTITUDE,
        }
    }
}

/// Start angle and clockwise sweep of one band on the day dial, radians.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolarArc {
    pub start: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DaySegments {
    pub daylight: Vec<PolarArc>,
    pub twilight: Vec<PolarArc>,
    pub night: Vec<PolarArc>,
}
