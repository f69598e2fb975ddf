//! Geometry for a 24-hour dial: midnight at the top, time running
//! clockwise. Angles are radians; nothing here draws.

use std::f64::consts::TAU;

use chrono::{NaiveTime, Timelike};

use crate::types::{DayEvent, DayReport, DaySegments, PolarArc};

pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Minutes since local midnight, fractional.
pub fn time_to_minutes(time: NaiveTime) -> f64 {
    time.num_seconds_from_midnight() as f64 / 60.0
}

pub fn time_to_angle(time: NaiveTime) -> f64 {
    time_to_minutes(time) / MINUTES_PER_DAY * TAU
}

pub fn hour_tick_angles() -> [f64; 24] {
    std::array::from_fn(|hour| hour as f64 / 24.0 * TAU)
}

/// Clockwise arc from `from` to `to`, wrapping through midnight.
pub fn arc_between(from: NaiveTime, to: NaiveTime) -> PolarArc {
    let start = time_to_angle(from);
    PolarArc {
        start,
        width: (time_to_angle(to) - start).rem_euclid(TAU),
    }
}

const FULL_CIRCLE: PolarArc = PolarArc {
    start: 0.0,
    width: TAU,
};

/// Part of the day the sun spends above one threshold.
#[derive(Debug, Clone, Copy)]
enum Band {
    Between(NaiveTime, NaiveTime),
    Full,
    Empty,
}

impl Band {
    fn of(rise: &DayEvent, set: &DayEvent) -> Band {
        use crate::types::Occurrence::*;
        match (rise.occurrence, set.occurrence) {
            (At(r), At(s)) => Band::Between(r.time(), s.time()),
            (AlwaysAbove, _) | (_, AlwaysAbove) => Band::Full,
            _ => Band::Empty,
        }
    }

    fn arcs(self) -> Vec<PolarArc> {
        match self {
            Band::Between(from, to) => vec![arc_between(from, to)],
            Band::Full => vec![FULL_CIRCLE],
            Band::Empty => Vec::new(),
        }
    }

    fn complement(self) -> Band {
        match self {
            Band::Between(from, to) => Band::Between(to, from),
            Band::Full => Band::Empty,
            Band::Empty => Band::Full,
        }
    }
}

fn non_empty(arcs: Vec<PolarArc>) -> Vec<PolarArc> {
    arcs.into_iter().filter(|a| a.width > 0.0).collect()
}

/// Splits the dial into daylight, twilight and night bands.
///
/// The twilight band must contain the daylight band, which holds for any
/// report built from a config that passes [`DayLengthConfig::validate`].
///
/// [`DayLengthConfig::validate`]: crate::types::DayLengthConfig::validate
pub fn day_segments(report: &DayReport) -> DaySegments {
    let daylight = Band::of(&report.sunrise, &report.sunset);
    let lit = Band::of(&report.twilight_start, &report.twilight_end);

    let twilight = match (lit, daylight) {
        (Band::Between(dawn, dusk), Band::Between(rise, set)) => {
            vec![arc_between(dawn, rise), arc_between(set, dusk)]
        }
        (Band::Between(dawn, dusk), Band::Empty) => vec![arc_between(dawn, dusk)],
        (Band::Full, Band::Between(rise, set)) => vec![arc_between(set, rise)],
        (Band::Full, Band::Empty) => vec![FULL_CIRCLE],
        _ => Vec::new(),
    };

    DaySegments {
        daylight: non_empty(daylight.arcs()),
        twilight: non_empty(twilight),
        night: non_empty(lit.complement().arcs()),
    }
}

impl DayReport {
    pub fn segments(&self) -> DaySegments {
        day_segments(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn arc_wraps_through_midnight() {
        let a = arc_between(hm(22, 0), hm(2, 0));
        assert!((a.width - TAU / 6.0).abs() < 1e-9, "width={}", a.width);
    }

    #[test]
    fn noon_is_half_turn() {
        assert!((time_to_angle(hm(12, 0)) - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(hour_tick_angles()[0], 0.0);
    }
}
