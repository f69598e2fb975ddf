use chrono::{Datelike, NaiveDate, TimeZone, Utc};

use day_length::angles::*;

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn days_of(year: i32) -> impl Iterator<Item = NaiveDate> {
    date(year, 1, 1).iter_days().take_while(move |d| d.year() == year)
}

// ── Calendar ──

#[test]
fn test_leap_years() {
    assert!(leap_year(2024));
    assert!(leap_year(2000));
    assert!(!leap_year(1900));
    assert!(!leap_year(2025));
    assert_eq!(days_in_year(2024), 366);
    assert_eq!(days_in_year(2025), 365);
}

#[test]
fn test_fractional_year_origin_is_jan_first_noon() {
    assert_approx!(fractional_year(date(2025, 1, 1), 12.0), 0.0, 1e-12);
    assert_approx!(
        fractional_year(date(2025, 1, 2), 0.0),
        fractional_year(date(2025, 1, 1), 24.0),
        1e-12
    );
}

#[test]
fn test_fractional_year_spans_full_turn() {
    let end = fractional_year(date(2025, 12, 31), 12.0);
    assert_approx!(end, std::f64::consts::TAU * 364.0 / 365.0, 1e-9);
}

// ── Declination ──

#[test]
fn test_solar_declination_solstices_equinoxes() {
    assert_approx!(solar_declination(fractional_year(date(2024, 6, 20), 12.0)), 23.44, 0.3);
    assert_approx!(solar_declination(fractional_year(date(2024, 12, 21), 12.0)), -23.44, 0.3);
    assert_approx!(solar_declination(fractional_year(date(2024, 3, 20), 12.0)), 0.0, 0.6);
    assert_approx!(solar_declination(fractional_year(date(2024, 9, 22), 12.0)), 0.0, 1.0);
}

#[test]
fn test_solar_declination_bounded_all_days() {
    for d in days_of(2024).chain(days_of(2025)) {
        let decl = solar_coordinates(d, 12.0).declination;
        assert!(decl.abs() <= 23.5, "{}: {}", d, decl);
    }
}

// ── Equation of time ──

#[test]
fn test_equation_of_time_bounded() {
    for d in days_of(2025) {
        for hour in [0.0, 6.0, 12.0, 18.0] {
            let eot = solar_coordinates(d, hour).equation_of_time;
            assert!((-17.0..=17.0).contains(&eot), "{} {}h: {}", d, hour, eot);
        }
    }
}

#[test]
fn test_equation_of_time_has_four_zero_crossings() {
    let values: Vec<(NaiveDate, f64)> = days_of(2025)
        .map(|d| (d, solar_coordinates(d, 12.0).equation_of_time))
        .collect();
    let crossings: Vec<u32> = values
        .windows(2)
        .filter(|w| w[0].1.signum() != w[1].1.signum())
        .map(|w| w[1].0.month())
        .collect();
    assert_eq!(crossings, vec![4, 6, 9, 12], "{:?}", crossings);
}

#[test]
fn test_equation_of_time_extremes() {
    let values: Vec<(NaiveDate, f64)> = days_of(2025)
        .map(|d| (d, solar_coordinates(d, 12.0).equation_of_time))
        .collect();
    let (min_day, min) = values
        .iter()
        .copied()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap();
    let (max_day, max) = values
        .iter()
        .copied()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap();
    assert_eq!(min_day.month(), 2, "min on {}", min_day);
    assert_approx!(min, -14.2, 1.0);
    assert!((300..=315).contains(&max_day.ordinal()), "max on {}", max_day);
    assert_approx!(max, 16.4, 1.0);
}

#[test]
fn test_equation_of_time_sign_convention() {
    // Sun runs slow in February, fast in early November.
    assert!(equation_of_time(fractional_year(date(2025, 2, 11), 12.0)) < 0.0);
    assert!(equation_of_time(fractional_year(date(2025, 11, 3), 12.0)) > 0.0);
}

// ── Hour angle ──

#[test]
fn test_hour_angle_solar_noon() {
    assert_approx!(hour_angle(12.0), 0.0, 0.01);
}

#[test]
fn test_hour_angle_known_values() {
    assert_approx!(hour_angle(13.0), 15.0, 0.01);
    assert_approx!(hour_angle(11.0), -15.0, 0.01);
    assert_approx!(hour_angle(15.0), 45.0, 0.01);
    assert_approx!(hour_angle(0.0), -180.0, 0.01);
}

#[test]
fn test_utc_solar_correction() {
    assert_approx!(utc_solar_correction(15.0, 0.0), 1.0, 1e-12);
    assert_approx!(utc_solar_correction(-90.0, 6.0), -5.9, 1e-12);
}

// ── Altitude function ──

#[test]
fn test_zenith_altitude_complement() {
    let cases: &[(f64, f64, f64)] = &[
        (39.8, 0.0, 0.0),
        (0.0, 23.45, 90.0),
        (-33.9, -23.45, 45.0),
        (70.0, 23.45, 180.0),
    ];
    for &(lat, decl, ha) in cases {
        let z = solar_zenith_angle(lat, decl, ha);
        assert_approx!(z + solar_altitude(z), 90.0, 1e-10);
    }
}

#[test]
fn test_altitude_peaks_at_solar_noon() {
    let noon = altitude_at_solar_time(51.5, 10.0, 12.0);
    assert_approx!(noon, 90.0 - 51.5 + 10.0, 1e-9);
    for h in [11.5, 11.9, 12.1, 12.5] {
        assert!(altitude_at_solar_time(51.5, 10.0, h) < noon);
    }
    let midnight = altitude_at_solar_time(51.5, 10.0, 0.0);
    for h in [0.5, 3.0, 21.0, 23.5] {
        assert!(altitude_at_solar_time(51.5, 10.0, h) > midnight);
    }
}

#[test]
fn test_altitude_monotonic_on_each_half() {
    let samples: Vec<f64> = (0..=48)
        .map(|i| altitude_at_solar_time(42.0, -5.0, i as f64 * 0.25))
        .collect();
    for w in samples.windows(2) {
        assert!(w[1] > w[0], "{:?}", w);
    }
    let samples: Vec<f64> = (48..=96)
        .map(|i| altitude_at_solar_time(42.0, -5.0, i as f64 * 0.25))
        .collect();
    for w in samples.windows(2) {
        assert!(w[1] < w[0], "{:?}", w);
    }
}

#[test]
fn test_london_midsummer_noon_altitude() {
    let instant = Utc.with_ymd_and_hms(2024, 6, 21, 12, 2, 0).unwrap();
    assert_approx!(solar_altitude_at(51.5, -0.13, &instant), 61.9, 0.3);
}

#[test]
fn test_london_midwinter_midnight_below_horizon() {
    let instant = Utc.with_ymd_and_hms(2024, 12, 21, 0, 0, 0).unwrap();
    assert!(solar_altitude_at(51.5, -0.13, &instant) < -50.0);
}

#[test]
fn test_utc_hours_since() {
    let instant = Utc.with_ymd_and_hms(2024, 6, 21, 6, 30, 0).unwrap();
    assert_approx!(utc_hours_since(date(2024, 6, 21), &instant), 6.5, 1e-9);
    assert_approx!(utc_hours_since(date(2024, 6, 20), &instant), 30.5, 1e-9);
    assert_approx!(utc_hours_since(date(2024, 6, 22), &instant), -17.5, 1e-9);
}

// ── DegRad roundtrip ──

#[test]
fn test_deg_rad_roundtrip() {
    for &deg in &[0.0, 45.0, 90.0, 180.0, 270.0, 360.0, -45.0, -180.0, 123.456] {
        assert_approx!(rad_to_deg(deg_to_rad(deg)), deg, 1e-10);
    }
}
