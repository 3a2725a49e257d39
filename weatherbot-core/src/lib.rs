//! Core library for the `weatherbot` chat command service.
//!
//! This crate defines:
//! - Service configuration & credentials handling
//! - Abstraction over the weather provider (OpenWeatherMap)
//! - The decoded weather report model and its unit conversions
//! - Formatting of a report into a single chat line
//! - The `!weather` command table a host bot registers
//!
//! It is used by the `weatherbot` binary, but can be embedded by any host that
//! can route `!`-commands and deliver chat messages.

pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod provider;
pub mod query;
pub mod service;
pub mod units;

pub use config::{Config, ServiceConfig, Unit};
pub use error::WeatherError;
pub use model::WeatherReport;
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use query::LocationQuery;
pub use service::{
    Action, ChatMessage, Command, CommandService, Invocation, MsgType, SERVICE_TYPE,
    WeatherService,
};
