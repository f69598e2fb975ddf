pub mod angles;
pub mod error;
pub mod events;
pub mod polar;
pub mod report;
pub mod timezone;
pub mod types;

pub use angles::{
    altitude_at_solar_time, days_in_year, deg_to_rad, equation_of_time, fractional_year,
    fractional_year_angle, hour_angle, leap_year, rad_to_deg, solar_altitude, solar_altitude_at,
    solar_coordinates, solar_declination, solar_zenith_angle, utc_hours_since,
    utc_solar_correction, DEGREES_PER_HOUR, MINUTES_PER_DEGREE,
};

pub use error::{Result, SolarError};

pub use events::{crossing_hour_angle, solve_crossings, SUNRISE_ALTITUDE};

pub use polar::{arc_between, day_segments, hour_tick_angles, time_to_angle, time_to_minutes};

pub use report::{compute, DayLengthCalculator};

pub use timezone::{us_dst_in_effect, DstRule, FixedRuleResolver, IanaResolver, TimeZoneResolver};

pub use types::{
    CivilTime, Crossings, DayEvent, DayLengthConfig, DayReport, DaySegments, DepressionAngle,
    EventKind, Location, Occurrence, PolarArc, SolarCoordinates, TrueSolarTime,
};
