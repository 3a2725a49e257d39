use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use tracing::info;
use weatherbot_core::{Config, Unit, WeatherService};

use crate::console;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherbot", version, about = "!weather chat command service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeatherMap API key, default country and units.
    Configure,

    /// Look up current weather once and print the reply.
    Lookup {
        /// City or postal code, optionally followed by `,country`.
        location: Vec<String>,
    },

    /// Read chat lines from stdin and answer `!weather` / `!w` commands.
    Console,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Lookup { location } => {
                let service = load_service()?;
                let msg = service.lookup(location.as_slice()).await?;
                println!("{}", msg.body);
                Ok(())
            }
            Command::Console => {
                let service = load_service()?;
                console::run(&service).await
            }
        }
    }
}

fn load_service() -> anyhow::Result<WeatherService> {
    let config = Config::load()?;
    let service = WeatherService::from_config(&config.effective_service_config())?;
    Ok(service)
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let current = &config.weather;

    let api_key = Password::new("OpenWeatherMap API key (leave empty to keep current):")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let country = Text::new("Default country code:")
        .with_default(current.default_country())
        .prompt()
        .context("Failed to read default country")?;

    let start = Unit::all()
        .iter()
        .position(|u| *u == current.unit)
        .unwrap_or_default();
    let unit = Select::new("Preferred units:", Unit::all().to_vec())
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read units")?;

    if !api_key.trim().is_empty() {
        config.weather.api_key = api_key.trim().to_string();
    }
    config.weather.set_default_country(&country);
    config.weather.unit = unit;

    config.save()?;
    info!(path = %Config::config_file_path()?.display(), "Configuration saved");

    if !config.weather.has_api_key() {
        println!("No API key stored yet; lookups will fail until one is configured.");
    }

    Ok(())
}
