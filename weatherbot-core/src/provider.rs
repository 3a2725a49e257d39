use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::WeatherError, model::WeatherReport, query::LocationQuery};

pub mod openweather;

/// Source of current-weather reports.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, query: &LocationQuery) -> Result<WeatherReport, WeatherError>;
}
