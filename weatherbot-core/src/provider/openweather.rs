use async_trait::async_trait;
use reqwest::{Client, Url};
use std::{fmt, sync::LazyLock};
use tracing::{debug, warn};

use crate::{error::WeatherError, model::WeatherReport, query::LocationQuery};

use super::WeatherProvider;

pub const API_BASE: &str = "https://api.openweathermap.org/data/2.5/weather";

/// One client for the whole process; it is never reconfigured per request.
static HTTP_CLIENT: LazyLock<Client> = LazyLock::new(Client::new);

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: Url,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, API_BASE)
    }

    /// Point the provider at another endpoint serving the same API (a proxy or a test server).
    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self, WeatherError> {
        Self::with_client(api_key, base_url, HTTP_CLIENT.clone())
    }

    /// Use a caller-supplied client instead of the shared one.
    pub fn with_client(api_key: String, base_url: &str, http: Client) -> Result<Self, WeatherError> {
        let base_url = Url::parse(base_url).map_err(|e| WeatherError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            api_key,
            base_url,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, query: &LocationQuery) -> Result<WeatherReport, WeatherError> {
        let q = query.as_query();
        debug!(q = %q, "Requesting current weather from OpenWeatherMap");

        let res = self
            .http
            .get(self.base_url.clone())
            .query(&[("q", q.as_str()), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(WeatherError::request)?;

        let status = res.status();
        let body = res.text().await.map_err(WeatherError::request)?;
        debug!(status = %status, bytes = body.len(), "Received OpenWeatherMap response");

        if !status.is_success() {
            warn!(status = %status, q = %q, "OpenWeatherMap rejected the request");
            return Err(WeatherError::InvalidResponse { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
