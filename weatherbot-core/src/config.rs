use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf};

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Country appended to queries when neither the user nor the config names one.
pub const FALLBACK_COUNTRY: &str = "us";

/// Which temperature/speed scale leads in formatted output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Imperial,
    Metric,
}

impl Unit {
    pub const fn all() -> &'static [Unit] {
        &[Unit::Imperial, Unit::Metric]
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Unit::Imperial => "imperial",
            Unit::Metric => "metric",
        })
    }
}

/// Settings of the weather service, as a host hands them over at registration.
///
/// Example JSON:
/// `{"api_key": "abc123", "default_country": "gb", "unit": "metric"}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub api_key: String,

    /// Appended to locations without a country qualifier. Empty means unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_country: Option<String>,

    #[serde(default)]
    pub unit: Unit,
}

impl ServiceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Decode the host-provided JSON service config.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse weather service config JSON")
    }

    /// The configured default country, falling back to `us`.
    pub fn default_country(&self) -> &str {
        self.default_country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(FALLBACK_COUNTRY)
    }

    /// Store a user-entered default country. An empty answer, or accepting the
    /// fallback when none was set, leaves the field unset so it keeps tracking
    /// [`FALLBACK_COUNTRY`].
    pub fn set_default_country(&mut self, answer: &str) {
        let answer = answer.trim().to_lowercase();
        let keeps_fallback = self.default_country.is_none() && answer == FALLBACK_COUNTRY;

        self.default_country = (!answer.is_empty() && !keeps_fallback).then_some(answer);
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Replace the API key when an override is given (e.g. from the environment).
    pub fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = key;
        }
        self
    }
}

/// Top-level configuration stored on disk by the `weatherbot` binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Example TOML:
    /// [weather]
    /// api_key = "..."
    /// default_country = "gb"
    /// unit = "metric"
    #[serde(default)]
    pub weather: ServiceConfig,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherbot", "weatherbot")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Service settings with the `OPENWEATHER_API_KEY` override applied.
    pub fn effective_service_config(&self) -> ServiceConfig {
        self.weather
            .clone()
            .with_api_key_override(std::env::var(API_KEY_ENV).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_country_falls_back_to_us() {
        let mut cfg = ServiceConfig::new("KEY");
        assert_eq!(cfg.default_country(), "us");

        cfg.default_country = Some("  ".into());
        assert_eq!(cfg.default_country(), "us");

        cfg.default_country = Some("gb".into());
        assert_eq!(cfg.default_country(), "gb");
    }

    #[test]
    fn accepting_fallback_country_keeps_it_unset() {
        let mut cfg = ServiceConfig::new("KEY");

        cfg.set_default_country(" US ");
        assert_eq!(cfg.default_country, None);
        assert_eq!(cfg.default_country(), "us");

        cfg.set_default_country("");
        assert_eq!(cfg.default_country, None);

        cfg.set_default_country("GB");
        assert_eq!(cfg.default_country.as_deref(), Some("gb"));
    }

    #[test]
    fn explicit_country_can_be_switched_back_to_us() {
        let mut cfg = ServiceConfig {
            default_country: Some("gb".into()),
            ..ServiceConfig::new("KEY")
        };

        cfg.set_default_country("us");
        assert_eq!(cfg.default_country.as_deref(), Some("us"));
    }

    #[test]
    fn parses_host_json() {
        let cfg = ServiceConfig::from_json(
            r#"{"api_key": "abc123", "default_country": "de", "unit": "metric"}"#,
        )
        .expect("valid service config");

        assert_eq!(cfg.api_key, "abc123");
        assert_eq!(cfg.default_country(), "de");
        assert_eq!(cfg.unit, Unit::Metric);
    }

    #[test]
    fn host_json_fields_are_optional() {
        let cfg = ServiceConfig::from_json(r#"{"api_key": "abc123"}"#).expect("valid config");

        assert_eq!(cfg.unit, Unit::Imperial);
        assert_eq!(cfg.default_country, None);
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let err = ServiceConfig::from_json(r#"{"api_key": "k", "unit": "kelvin"}"#).unwrap_err();
        assert!(err.to_string().contains("Failed to parse weather service config JSON"));
    }

    #[test]
    fn api_key_override_only_applies_when_non_empty() {
        let cfg = ServiceConfig::new("STORED");

        let same = cfg.clone().with_api_key_override(Some(String::new()));
        assert_eq!(same.api_key, "STORED");

        let replaced = cfg.with_api_key_override(Some("ENV".into()));
        assert_eq!(replaced.api_key, "ENV");
        assert!(replaced.has_api_key());
    }

    #[test]
    fn toml_roundtrip_keeps_weather_section() {
        let cfg = Config {
            weather: ServiceConfig {
                api_key: "KEY".into(),
                default_country: Some("fr".into()),
                unit: Unit::Metric,
            },
        };

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        assert!(text.contains("[weather]"));

        let parsed = Config::from_toml(&text).expect("parse");
        assert_eq!(parsed.weather, cfg.weather);
    }

    #[test]
    fn empty_toml_is_unconfigured() {
        let cfg = Config::from_toml("").expect("empty config is valid");
        assert!(!cfg.weather.has_api_key());
    }
}
