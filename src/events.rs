//! Event solver: closed-form threshold crossings, solar noon and midnight,
//! and the clock that maps true solar time onto UTC.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use log::{debug, trace};

use crate::angles::{
    deg_to_rad, rad_to_deg, solar_coordinates, utc_hours_since, utc_solar_correction,
    DEGREES_PER_HOUR,
};
use crate::error::{Result, SolarError};
use crate::types::{Crossings, Occurrence, TrueSolarTime};

/// Altitude of the sun's center at apparent sunrise/sunset: standard
/// refraction (34') plus the solar semi-diameter (16').
pub const SUNRISE_ALTITUDE: f64 = -0.833;

impl TrueSolarTime {
    pub fn new(date: NaiveDate, hours: f64) -> Self {
        Self { date, hours }
    }

    pub fn noon(date: NaiveDate) -> Self {
        Self::new(date, 12.0)
    }

    /// Midnight opening the solar day, twelve solar hours before noon.
    pub fn midnight(date: NaiveDate) -> Self {
        Self::new(date, 0.0)
    }

    /// UTC instant at which a meridian at `longitude` reads this true solar
    /// time. The equation of time is evaluated twice: at the day's
    /// approximate noon, then at the resulting estimate.
    pub fn to_utc(&self, longitude: f64) -> Result<DateTime<Utc>> {
        let noon_utc = 12.0 - longitude / DEGREES_PER_HOUR;
        let mut eot = solar_coordinates(self.date, noon_utc).equation_of_time;
        let mut utc_hours = self.hours - utc_solar_correction(longitude, eot);
        eot = solar_coordinates(self.date, utc_hours).equation_of_time;
        utc_hours = self.hours - utc_solar_correction(longitude, eot);

        let micros = (utc_hours * 3_600_000_000.0).round() as i64;
        self.date
            .and_time(NaiveTime::MIN)
            .and_utc()
            .checked_add_signed(Duration::microseconds(micros))
            .ok_or(SolarError::DateOutOfRange(self.date.year()))
    }

    /// True solar time of `instant` at `longitude`, counted from the start of
    /// the solar day `date`.
    pub fn from_utc(date: NaiveDate, instant: &DateTime<Utc>, longitude: f64) -> Self {
        let utc_hours = utc_hours_since(date, instant);
        let eot = solar_coordinates(date, utc_hours).equation_of_time;
        Self::new(date, utc_hours + utc_solar_correction(longitude, eot))
    }
}

/// Half-width in degrees of hour angle of the arc spent above `altitude`.
///
/// Solves sin(alt) = sin(lat)sin(dec) + cos(lat)cos(dec)cos(H) for H. An
/// argument above 1 means the sun never climbs to `altitude`; below -1 it
/// never sinks to it.
pub fn crossing_hour_angle(latitude: f64, declination: f64, altitude: f64) -> Occurrence<f64> {
    let lat = deg_to_rad(latitude);
    let dec = deg_to_rad(declination);
    let numerator = deg_to_rad(altitude).sin() - lat.sin() * dec.sin();
    let denominator = lat.cos() * dec.cos();

    // At the poles the altitude is constant over the day.
    if denominator.abs() < 1e-12 {
        return if numerator < 0.0 {
            Occurrence::AlwaysAbove
        } else {
            Occurrence::AlwaysBelow
        };
    }

    let cos_h = numerator / denominator;
    // A non-finite argument never yields a crossing.
    if !cos_h.is_finite() || cos_h > 1.0 {
        Occurrence::AlwaysBelow
    } else if cos_h < -1.0 {
        Occurrence::AlwaysAbove
    } else {
        Occurrence::At(rad_to_deg(cos_h.acos()))
    }
}

#[derive(Debug, Clone, Copy)]
enum Half {
    Rising,
    Falling,
}

impl Half {
    fn sign(self) -> f64 {
        match self {
            Half::Rising => -1.0,
            Half::Falling => 1.0,
        }
    }
}

/// Morning and evening instants at which the sun's center passes
/// `altitude` degrees on the solar day of `date`.
///
/// Two passes: the first uses the midday declination, the second
/// re-evaluates the declination at each estimated event time.
pub fn solve_crossings(
    date: NaiveDate,
    latitude: f64,
    longitude: f64,
    altitude: f64,
) -> Crossings<TrueSolarTime> {
    let noon_utc = 12.0 - longitude / DEGREES_PER_HOUR;
    let midday = solar_coordinates(date, noon_utc);
    let first = crossing_hour_angle(latitude, midday.declination, altitude);
    trace!(
        "{} alt {:.3}°: first pass dec {:.4}° -> {:?}",
        date,
        altitude,
        midday.declination,
        first
    );

    let half_arc = match first {
        Occurrence::At(h) => h,
        degenerate => {
            debug!(
                "{} at lat {:.3}: sun never crosses {:.3}° ({:?})",
                date, latitude, altitude, degenerate
            );
            let status = degenerate.map(|_| TrueSolarTime::noon(date));
            return Crossings {
                rising: status,
                falling: status,
            };
        }
    };

    let refine = |half: Half| {
        let estimate = 12.0 + half.sign() * half_arc / DEGREES_PER_HOUR;
        let utc_estimate = estimate - utc_solar_correction(longitude, midday.equation_of_time);
        let coords = solar_coordinates(date, utc_estimate);
        let second = crossing_hour_angle(latitude, coords.declination, altitude);
        trace!(
            "{} {:?}: second pass dec {:.4}° -> {:?}",
            date,
            half,
            coords.declination,
            second
        );
        second.map(|h| TrueSolarTime::new(date, 12.0 + half.sign() * h / DEGREES_PER_HOUR))
    };

    Crossings {
        rising: refine(Half::Rising),
        falling: refine(Half::Falling),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pole_in_summer_is_always_above() {
        assert_eq!(
            crossing_hour_angle(90.0, 20.0, SUNRISE_ALTITUDE),
            Occurrence::AlwaysAbove
        );
        assert_eq!(
            crossing_hour_angle(-90.0, 20.0, SUNRISE_ALTITUDE),
            Occurrence::AlwaysBelow
        );
    }

    #[test]
    fn nan_altitude_never_crosses() {
        assert_eq!(
            crossing_hour_angle(40.0, 10.0, f64::NAN),
            Occurrence::AlwaysBelow
        );
        assert_eq!(
            crossing_hour_angle(f64::NAN, 10.0, SUNRISE_ALTITUDE),
            Occurrence::AlwaysBelow
        );
    }

    #[test]
    fn equinox_equator_half_arc_is_near_ninety() {
        match crossing_hour_angle(0.0, 0.0, 0.0) {
            Occurrence::At(h) => assert!((h - 90.0).abs() < 1e-9, "h={}", h),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rising_precedes_falling() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let c = solve_crossings(date, 40.0, -75.0, SUNRISE_ALTITUDE);
        let (r, f) = (c.rising.instant().unwrap(), c.falling.instant().unwrap());
        assert!(r.hours < 12.0 && f.hours > 12.0);
    }
}
