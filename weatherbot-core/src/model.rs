use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::units::{Bearing, Kelvin, WindSpeed};

/// Current-weather payload as returned by OpenWeatherMap (standard units).
///
/// Fields absent from the payload decode to their zero value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WeatherReport {
    pub id: i64,
    pub name: String,
    pub coord: Coord,
    pub weather: Vec<Condition>,
    pub base: String,
    pub main: MainInfo,
    pub visibility: f64,
    pub wind: Wind,
    pub clouds: Clouds,
    pub rain: Precipitation,
    pub snow: Precipitation,
    #[serde(deserialize_with = "epoch_seconds::deserialize")]
    pub dt: DateTime<Utc>,
    pub sys: Sys,
    pub timezone: i64,
}

impl WeatherReport {
    /// The primary condition, or an empty one when the API sent none.
    pub fn conditions(&self) -> Condition {
        self.weather.first().cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

impl Condition {
    /// `Clouds (broken clouds)`
    pub fn summary(&self) -> String {
        format!("{} ({})", self.main, self.description)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct MainInfo {
    pub temp: Kelvin,
    pub feels_like: Kelvin,
    pub temp_min: Kelvin,
    pub temp_max: Kelvin,
    pub pressure: f64,
    pub humidity: f64,
    pub sea_level: f64,
    #[serde(rename = "grnd_level")]
    pub ground_level: f64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Wind {
    pub speed: WindSpeed,
    pub deg: Bearing,
    pub gust: WindSpeed,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Clouds {
    pub all: f64,
}

/// Rain or snow volume in millimetres.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Precipitation {
    #[serde(rename = "1h")]
    pub hour1: f64,
    #[serde(rename = "3h")]
    pub hour3: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Sys {
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

/// `dt` arrives as a bare Unix epoch integer.
mod epoch_seconds {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, de};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = i64::deserialize(deserializer)?;
        DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| de::Error::custom(format!("timestamp {secs} out of range")))
    }
}
