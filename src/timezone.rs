//! Civil time lookup. The engine never owns a timezone database; it asks a
//! [`TimeZoneResolver`] for the offset in force at each solved instant.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

use crate::error::{Result, SolarError};

pub trait TimeZoneResolver {
    /// Fails with [`SolarError::UnresolvedTimeZone`] for unknown identifiers.
    fn validate(&self, timezone_id: &str) -> Result<()>;

    /// UTC offset, daylight saving included, in force at `instant`.
    fn offset_at(&self, timezone_id: &str, instant: &DateTime<Utc>) -> Result<FixedOffset>;
}

/// Resolver backed by the IANA database compiled into `chrono-tz`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IanaResolver;

impl IanaResolver {
    fn parse(timezone_id: &str) -> Result<Tz> {
        timezone_id
            .parse::<Tz>()
            .map_err(|_| SolarError::UnresolvedTimeZone(timezone_id.to_string()))
    }
}

impl TimeZoneResolver for IanaResolver {
    fn validate(&self, timezone_id: &str) -> Result<()> {
        Self::parse(timezone_id).map(|_| ())
    }

    fn offset_at(&self, timezone_id: &str, instant: &DateTime<Utc>) -> Result<FixedOffset> {
        let tz = Self::parse(timezone_id)?;
        Ok(tz.offset_from_utc_datetime(&instant.naive_utc()).fix())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DstRule {
    /// One hour ahead from the second Sunday of March until the first
    /// Sunday of November
    UnitedStates,
}

impl DstRule {
    pub fn in_effect(self, date: NaiveDate) -> bool {
        match self {
            DstRule::UnitedStates => us_dst_in_effect(date),
        }
    }
}

/// Whether US daylight saving time applies on `date`. Decided per civil
/// date; the 02:00 changeover is not modelled.
pub fn us_dst_in_effect(date: NaiveDate) -> bool {
    use chrono::Datelike;

    let year = date.year();
    let start = NaiveDate::from_weekday_of_month_opt(year, 3, Weekday::Sun, 2);
    let end = NaiveDate::from_weekday_of_month_opt(year, 11, Weekday::Sun, 1);
    match (start, end) {
        (Some(start), Some(end)) => start <= date && date < end,
        _ => false,
    }
}

/// Single-zone resolver for hosts without a timezone database: a standard
/// offset plus an optional daylight saving rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedRuleResolver {
    pub id: String,
    pub standard_offset: FixedOffset,
    pub dst_rule: Option<DstRule>,
}

impl FixedRuleResolver {
    pub fn new(
        id: impl Into<String>,
        standard_offset: FixedOffset,
        dst_rule: Option<DstRule>,
    ) -> Self {
        Self {
            id: id.into(),
            standard_offset,
            dst_rule,
        }
    }
}

impl TimeZoneResolver for FixedRuleResolver {
    fn validate(&self, timezone_id: &str) -> Result<()> {
        if timezone_id == self.id {
            Ok(())
        } else {
            Err(SolarError::UnresolvedTimeZone(timezone_id.to_string()))
        }
    }

    fn offset_at(&self, timezone_id: &str, instant: &DateTime<Utc>) -> Result<FixedOffset> {
        self.validate(timezone_id)?;
        let local_date = instant.with_timezone(&self.standard_offset).date_naive();
        let dst = self.dst_rule.is_some_and(|rule| rule.in_effect(local_date));
        if !dst {
            return Ok(self.standard_offset);
        }
        FixedOffset::east_opt(self.standard_offset.local_minus_utc() + 3600)
            .ok_or_else(|| SolarError::UnresolvedTimeZone(timezone_id.to_string()))
    }
}
