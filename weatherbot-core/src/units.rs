//! Physical quantities as reported by OpenWeatherMap in its "standard" units.
//!
//! Values are stored exactly as decoded; every other unit is derived on read.

use serde::Deserialize;
use std::fmt;

use crate::config::Unit;

const KELVIN_OFFSET: f64 = 273.15;
const MPS_TO_KMH: f64 = 3.6;
const KMH_TO_MPH: f64 = 0.621371;

/// Temperature in Kelvin.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize)]
#[serde(transparent)]
pub struct Kelvin(pub f64);

impl Kelvin {
    pub fn celsius(self) -> f64 {
        self.0 - KELVIN_OFFSET
    }

    pub fn fahrenheit(self) -> f64 {
        self.celsius() * 9.0 / 5.0 + 32.0
    }

    /// Both scales, the preferred one first: `72.00°F (22.22°C)`.
    pub fn display(self, unit: Unit) -> String {
        match unit {
            Unit::Imperial => format!("{:.2}°F ({:.2}°C)", self.fahrenheit(), self.celsius()),
            Unit::Metric => format!("{:.2}°C ({:.2}°F)", self.celsius(), self.fahrenheit()),
        }
    }
}

impl fmt::Display for Kelvin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display(Unit::Imperial))
    }
}

/// Wind speed in metres per second, the unit OpenWeatherMap reports when no
/// `units` parameter is sent. km/h and MPH are converted from that.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize)]
#[serde(transparent)]
pub struct WindSpeed(pub f64);

impl WindSpeed {
    pub fn kmh(self) -> f64 {
        self.0 * MPS_TO_KMH
    }

    pub fn mph(self) -> f64 {
        self.kmh() * KMH_TO_MPH
    }
}

/// Wind direction in meteorological degrees (0 = from the north).
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize)]
#[serde(transparent)]
pub struct Bearing(pub f64);

/// Upper (inclusive) edge of each 22.5° sector, starting right after north.
/// Anything above the last edge wraps back to north.
const SECTORS: [(f64, &str); 16] = [
    (11.25, "N"),
    (33.75, "NNE"),
    (56.25, "NE"),
    (78.75, "ENE"),
    (101.25, "E"),
    (123.75, "ESE"),
    (146.25, "SE"),
    (168.75, "SSE"),
    (191.25, "S"),
    (213.75, "SSW"),
    (236.25, "SW"),
    (258.75, "WSW"),
    (281.25, "W"),
    (303.75, "WNW"),
    (326.25, "NW"),
    (348.75, "NNW"),
];

impl Bearing {
    /// 16-point compass label, or `""` for a non-finite bearing.
    pub fn compass_point(self) -> &'static str {
        if !self.0.is_finite() {
            return "";
        }

        // 360 itself is north, same as 0.
        let deg = self.0.rem_euclid(360.0);

        SECTORS
            .iter()
            .find(|(upper, _)| deg <= *upper)
            .map_or("N", |(_, label)| *label)
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.compass_point())
    }
}
