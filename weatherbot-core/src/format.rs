//! Rendering of a [`WeatherReport`] into the one-line chat reply.

use chrono::{DateTime, Utc};

use crate::{
    config::Unit,
    model::{MainInfo, WeatherReport, Wind},
};

/// Reply sent when `!weather` is called without a location.
pub const USAGE: &str = "Usage: !weather (city[,country])|(postal code[,country])";

/// `Portland || Updated: 5 minutes ago || Conditions: Clouds (broken clouds) || ...`
pub fn report_line(report: &WeatherReport, now: DateTime<Utc>, unit: Unit) -> String {
    format!(
        "{} || Updated: {} || Conditions: {} || Temperature: {} || High/Low: {} || Humidity: {:.0}% || {}",
        report.name,
        relative_time(report.dt, now),
        report.conditions().summary(),
        report.main.temp.display(unit),
        high_low(&report.main, unit),
        report.main.humidity,
        wind(&report.wind, unit),
    )
}

/// `75.20°F / 68.00°F (24.00°C / 20.00°C)`
fn high_low(main: &MainInfo, unit: Unit) -> String {
    let (max, min) = (main.temp_max, main.temp_min);
    match unit {
        Unit::Imperial => format!(
            "{:.2}°F / {:.2}°F ({:.2}°C / {:.2}°C)",
            max.fahrenheit(),
            min.fahrenheit(),
            max.celsius(),
            min.celsius(),
        ),
        Unit::Metric => format!(
            "{:.2}°C / {:.2}°C ({:.2}°F / {:.2}°F)",
            max.celsius(),
            min.celsius(),
            max.fahrenheit(),
            min.fahrenheit(),
        ),
    }
}

/// `WSW at 9.2 MPH (14.8 km/h)`
fn wind(wind: &Wind, unit: Unit) -> String {
    match unit {
        Unit::Imperial => format!(
            "{} at {:.1} MPH ({:.1} km/h)",
            wind.deg,
            wind.speed.mph(),
            wind.speed.kmh()
        ),
        Unit::Metric => format!(
            "{} at {:.1} km/h ({:.1} MPH)",
            wind.deg,
            wind.speed.kmh(),
            wind.speed.mph()
        ),
    }
}

/// Coarse human-readable distance between `then` and `now`: `3 hours ago`, `2 days from now`.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let (delta, suffix) = if then <= now {
        (now - then, "ago")
    } else {
        (then - now, "from now")
    };

    let secs = delta.num_seconds();
    if secs < 1 {
        return "now".to_string();
    }

    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;
    const WEEK: i64 = 7 * DAY;
    const MONTH: i64 = 30 * DAY;
    const YEAR: i64 = 12 * MONTH;
    const LONG_TIME: i64 = 37 * YEAR;

    let (amount, unit) = match secs {
        s if s < MINUTE => (s, "second"),
        s if s < HOUR => (s / MINUTE, "minute"),
        s if s < DAY => (s / HOUR, "hour"),
        s if s < WEEK => (s / DAY, "day"),
        s if s < MONTH => (s / WEEK, "week"),
        s if s < YEAR => (s / MONTH, "month"),
        s if s < 18 * MONTH => (1, "year"),
        s if s < 2 * YEAR => (2, "year"),
        s if s < LONG_TIME => (s / YEAR, "year"),
        _ => return format!("a long while {suffix}"),
    };

    let plural = if amount == 1 { "" } else { "s" };
    format!("{amount} {unit}{plural} {suffix}")
}
