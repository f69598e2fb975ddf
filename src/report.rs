//! Day report assembly: runs the solver for the horizon and twilight
//! thresholds and converts every instant to the observer's civil time.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use log::debug;

use crate::angles::{solar_coordinates, DEGREES_PER_HOUR};
use crate::error::{Result, SolarError};
use crate::events::solve_crossings;
use crate::timezone::{IanaResolver, TimeZoneResolver};
use crate::types::{
    CivilTime, DayEvent, DayLengthConfig, DayReport, DepressionAngle, EventKind, Location,
    Occurrence, TrueSolarTime,
};

/// Computes the day report for one date using the IANA timezone database
/// and the standard sunrise altitude.
pub fn compute(
    date: NaiveDate,
    location: &Location,
    depression_angle: DepressionAngle,
) -> Result<DayReport> {
    DayLengthCalculator::new(DayLengthConfig {
        depression_angle,
        ..DayLengthConfig::default()
    })
    .compute(date, location)
}

#[derive(Debug, Clone)]
pub struct DayLengthCalculator<R = IanaResolver> {
    config: DayLengthConfig,
    resolver: R,
}

impl DayLengthCalculator<IanaResolver> {
    pub fn new(config: DayLengthConfig) -> Self {
        Self::with_resolver(config, IanaResolver)
    }
}

impl Default for DayLengthCalculator<IanaResolver> {
    fn default() -> Self {
        Self::new(DayLengthConfig::default())
    }
}

impl<R: TimeZoneResolver> DayLengthCalculator<R> {
    pub fn with_resolver(config: DayLengthConfig, resolver: R) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> &DayLengthConfig {
        &self.config
    }

    pub fn compute(&self, date: NaiveDate, location: &Location) -> Result<DayReport> {
        location.validate()?;
        self.resolver.validate(location.timezone_id())?;
        self.config.validate()?;
        let depression = self.config.depression_angle;

        debug!(
            "computing {} for {} ({:.4}, {:.4}) depression {}°",
            date,
            location.name(),
            location.latitude(),
            location.longitude(),
            depression.degrees()
        );

        let (latitude, longitude) = (location.latitude(), location.longitude());
        let solar_date = self.solar_day(date, location)?;
        if solar_date != date {
            debug!("{}: solving on solar day {}", date, solar_date);
        }

        let sun = solve_crossings(solar_date, latitude, longitude, self.config.horizon_altitude);
        let twilight = solve_crossings(
            solar_date,
            latitude,
            longitude,
            self.config.twilight_altitude(),
        );
        let noon_utc = 12.0 - longitude / DEGREES_PER_HOUR;
        let equation_of_time = solar_coordinates(solar_date, noon_utc).equation_of_time;

        let event = |kind: EventKind, occurrence: Occurrence<TrueSolarTime>| -> Result<DayEvent> {
            Ok(DayEvent {
                kind,
                occurrence: occurrence.try_map(|t| self.to_civil(t, location))?,
            })
        };

        Ok(DayReport {
            date,
            location_name: location.name().to_string(),
            depression_angle: depression,
            solar_midnight: event(
                EventKind::SolarMidnight,
                Occurrence::At(TrueSolarTime::midnight(solar_date)),
            )?,
            twilight_start: event(EventKind::TwilightStart, twilight.rising)?,
            sunrise: event(EventKind::Sunrise, sun.rising)?,
            solar_noon: event(
                EventKind::SolarNoon,
                Occurrence::At(TrueSolarTime::noon(solar_date)),
            )?,
            sunset: event(EventKind::Sunset, sun.falling)?,
            twilight_end: event(EventKind::TwilightEnd, twilight.falling)?,
            equation_of_time,
        })
    }

    fn to_civil(&self, t: TrueSolarTime, location: &Location) -> Result<CivilTime> {
        let utc = t.to_utc(location.longitude())?;
        let offset = self.resolver.offset_at(location.timezone_id(), &utc)?;
        Ok(utc.with_timezone(&offset))
    }

    /// Solar day whose noon falls on `date` in the observer's zone. It is
    /// `date` itself unless the zone runs far from the local meridian
    /// (Pacific/Apia, Pacific/Kiritimati).
    fn solar_day(&self, date: NaiveDate, location: &Location) -> Result<NaiveDate> {
        let mut solar_date = date;
        for _ in 0..2 {
            let noon = self.to_civil(TrueSolarTime::noon(solar_date), location)?;
            let shift = (noon.date_naive() - date).num_days();
            if shift == 0 {
                break;
            }
            solar_date = solar_date
                .checked_sub_signed(Duration::days(shift))
                .ok_or(SolarError::DateOutOfRange(date.year()))?;
        }
        Ok(solar_date)
    }

    /// One report per calendar day of `year`.
    pub fn compute_year(&self, year: i32, location: &Location) -> Result<Vec<DayReport>> {
        let first = NaiveDate::from_yo_opt(year, 1).ok_or(SolarError::DateOutOfRange(year))?;
        first
            .iter_days()
            .take_while(|d| d.year() == year)
            .map(|d| self.compute(d, location))
            .collect()
    }
}

impl DayReport {
    /// All six events in clock order around the dial.
    pub fn events(&self) -> [DayEvent; 6] {
        [
            self.solar_midnight,
            self.twilight_start,
            self.sunrise,
            self.solar_noon,
            self.sunset,
            self.twilight_end,
        ]
    }

    pub fn event(&self, kind: EventKind) -> DayEvent {
        match kind {
            EventKind::SolarMidnight => self.solar_midnight,
            EventKind::TwilightStart => self.twilight_start,
            EventKind::Sunrise => self.sunrise,
            EventKind::SolarNoon => self.solar_noon,
            EventKind::Sunset => self.sunset,
            EventKind::TwilightEnd => self.twilight_end,
        }
    }

    /// Sunset minus sunrise; a full day under the midnight sun and zero
    /// during polar night.
    pub fn day_length(&self) -> Duration {
        match (self.sunrise.occurrence, self.sunset.occurrence) {
            (Occurrence::At(rise), Occurrence::At(set)) => set - rise,
            (Occurrence::AlwaysAbove, _) | (_, Occurrence::AlwaysAbove) => Duration::hours(24),
            _ => Duration::zero(),
        }
    }

    /// Twilight start to sunrise.
    pub fn morning_twilight(&self) -> Option<Duration> {
        Some(self.sunrise.time()? - self.twilight_start.time()?)
    }

    /// Sunset to twilight end.
    pub fn evening_twilight(&self) -> Option<Duration> {
        Some(self.twilight_end.time()? - self.sunset.time()?)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::SolarMidnight => "Solar midnight",
            EventKind::TwilightStart => "Twilight start",
            EventKind::Sunrise => "Sunrise",
            EventKind::SolarNoon => "Solar noon",
            EventKind::Sunset => "Sunset",
            EventKind::TwilightEnd => "Twilight end",
        };
        f.write_str(name)
    }
}

fn clock(occurrence: &Occurrence<CivilTime>) -> String {
    match occurrence {
        Occurrence::At(t) => t.format("%H:%M").to_string(),
        Occurrence::AlwaysAbove => "always above".to_string(),
        Occurrence::AlwaysBelow => "always below".to_string(),
    }
}

impl fmt::Display for DayEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, clock(&self.occurrence))
    }
}

impl fmt::Display for DayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.day_length().num_seconds();
        write!(
            f,
            "Sunrise: {}    Sunset: {}    Length of Day: {}:{:02}:{:02}",
            clock(&self.sunrise.occurrence),
            clock(&self.sunset.occurrence),
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        )
    }
}
