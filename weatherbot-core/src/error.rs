use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by a single weather lookup.
///
/// Every variant is terminal for the request: nothing is cached or retried.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("could not parse base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error(
        "no OpenWeatherMap API key configured.\n\
         Hint: run `weatherbot configure` or set OPENWEATHER_API_KEY."
    )]
    MissingApiKey,

    /// Transport failure. The request URL carries the API key, so it is stripped.
    #[error("error making weather request: {0}")]
    Request(reqwest::Error),

    #[error("invalid response ({status}): {body}")]
    InvalidResponse { status: StatusCode, body: String },

    #[error("invalid weather response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl WeatherError {
    pub(crate) fn request(err: reqwest::Error) -> Self {
        WeatherError::Request(err.without_url())
    }
}
