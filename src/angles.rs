//! Orbital model, equation of time, and the altitude function.
//!
//! The ephemeris is the low-precision Fourier fit to the fractional year
//! angle (Spencer 1971, as used by NOAA's solar calculator). It keeps no
//! state and is good to well under a minute of time for any modern date.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

use crate::types::SolarCoordinates;

pub const DEGREES_PER_HOUR: f64 = 15.0;
/// Minutes of clock time per degree of longitude
pub const MINUTES_PER_DEGREE: f64 = 4.0;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn leap_year(year: i32) -> bool {
    (year % 400 == 0) || (year % 4 == 0 && year % 100 != 0)
}

pub fn days_in_year(year: i32) -> u32 {
    if leap_year(year) {
        366
    } else {
        365
    }
}

/// Year angle in radians for a fractional day of year, where 1.0 is noon
/// UTC on January 1st.
pub fn fractional_year_angle(day_of_year: f64, days_in_year: u32) -> f64 {
    2.0 * std::f64::consts::PI / days_in_year as f64 * (day_of_year - 1.0)
}

/// Year angle at `utc_hours` past UTC midnight on `date`. Hours outside
/// 0..24 are allowed and spill into the neighbouring days.
pub fn fractional_year(date: NaiveDate, utc_hours: f64) -> f64 {
    let day = date.ordinal() as f64 + (utc_hours - 12.0) / 24.0;
    fractional_year_angle(day, days_in_year(date.year()))
}

/// Apparent minus mean solar time in minutes. Positive when the sun runs
/// fast (early November peak), negative when it runs slow (mid February).
pub fn equation_of_time(year_angle: f64) -> f64 {
    let g = year_angle;
    229.18
        * (0.000075
            + 0.001868 * g.cos()
            - 0.032077 * g.sin()
            - 0.014615 * (2.0 * g).cos()
            - 0.040849 * (2.0 * g).sin())
}

/// Solar declination in degrees.
pub fn solar_declination(year_angle: f64) -> f64 {
    let g = year_angle;
    rad_to_deg(
        0.006918 - 0.399912 * g.cos() + 0.070257 * g.sin()
            - 0.006758 * (2.0 * g).cos()
            + 0.000907 * (2.0 * g).sin()
            - 0.002697 * (3.0 * g).cos()
            + 0.00148 * (3.0 * g).sin(),
    )
}

pub fn solar_coordinates(date: NaiveDate, utc_hours: f64) -> SolarCoordinates {
    let year_angle = fractional_year(date, utc_hours);
    SolarCoordinates {
        year_angle,
        declination: solar_declination(year_angle),
        equation_of_time: equation_of_time(year_angle),
    }
}

/// Hours to add to UTC to get true solar time.
pub fn utc_solar_correction(longitude: f64, eot: f64) -> f64 {
    (MINUTES_PER_DEGREE * longitude + eot) / 60.0
}

pub fn hour_angle(true_solar_hours: f64) -> f64 {
    DEGREES_PER_HOUR * (true_solar_hours - 12.0)
}

pub fn solar_zenith_angle(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let cos_zenith =
        lat_rad.sin() * dec_rad.sin() + lat_rad.cos() * dec_rad.cos() * ha_rad.cos();
    rad_to_deg(cos_zenith.clamp(-1.0, 1.0).acos())
}

pub fn solar_altitude(zenith_angle: f64) -> f64 {
    90.0 - zenith_angle
}

/// Geometric altitude of the sun's center for a given declination and
/// true solar time.
pub fn altitude_at_solar_time(latitude: f64, declination: f64, true_solar_hours: f64) -> f64 {
    solar_altitude(solar_zenith_angle(
        latitude,
        declination,
        hour_angle(true_solar_hours),
    ))
}

/// Fractional hours from UTC midnight on `date` to `instant`.
pub fn utc_hours_since(date: NaiveDate, instant: &DateTime<Utc>) -> f64 {
    let midnight = date.and_time(NaiveTime::MIN).and_utc();
    (*instant - midnight).num_milliseconds() as f64 / 3_600_000.0
}

/// Altitude of the sun's center in degrees as seen from (latitude, longitude)
/// at a UTC instant.
pub fn solar_altitude_at(latitude: f64, longitude: f64, instant: &DateTime<Utc>) -> f64 {
    let date = instant.date_naive();
    let utc_hours = utc_hours_since(date, instant);
    let coords = solar_coordinates(date, utc_hours);
    let true_solar = utc_hours + utc_solar_correction(longitude, coords.equation_of_time);
    altitude_at_solar_time(latitude, coords.declination, true_solar)
}
