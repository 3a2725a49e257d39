//! The `!weather` service as a host bot sees it: a command table plus a handler.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::{fmt, sync::Arc};
use tracing::info;

use crate::{
    config::{ServiceConfig, Unit},
    error::WeatherError,
    format::{USAGE, report_line},
    provider::{WeatherProvider, openweather::OpenWeatherProvider},
    query::LocationQuery,
};

/// Service type under which hosts register this service.
pub const SERVICE_TYPE: &str = "weather";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MsgType {
    #[serde(rename = "m.notice")]
    Notice,
    #[serde(rename = "m.text")]
    Text,
}

impl MsgType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MsgType::Notice => "m.notice",
            MsgType::Text => "m.text",
        }
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chat message handed back to the host for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub msgtype: MsgType,
    pub body: String,
}

impl ChatMessage {
    pub fn notice(body: impl Into<String>) -> Self {
        Self {
            msgtype: MsgType::Notice,
            body: body.into(),
        }
    }

    pub fn text(body: impl Into<String>) -> Self {
        Self {
            msgtype: MsgType::Text,
            body: body.into(),
        }
    }
}

/// One command call routed by the host: who sent it, where, and the tokens after the command path.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub room_id: String,
    pub user_id: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Usage,
    Search,
}

/// A command path (`["weather", "help"]`) bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub path: &'static [&'static str],
    pub action: Action,
}

impl Command {
    /// If `tokens` start with this command's path, return the remaining arguments.
    pub fn strip_path<'a, S: AsRef<str>>(&self, tokens: &'a [S]) -> Option<&'a [S]> {
        if tokens.len() < self.path.len() {
            return None;
        }

        let (head, rest) = tokens.split_at(self.path.len());
        head.iter()
            .zip(self.path)
            .all(|(token, part)| token.as_ref().eq_ignore_ascii_case(part))
            .then_some(rest)
    }
}

/// What a host needs from a service to register and call its commands.
#[async_trait]
pub trait CommandService: Send + Sync {
    fn service_type(&self) -> &'static str;

    fn commands(&self) -> &'static [Command];

    async fn execute(
        &self,
        action: Action,
        invocation: &Invocation,
    ) -> Result<ChatMessage, WeatherError>;
}

const COMMANDS: &[Command] = &[
    Command {
        path: &["weather", "help"],
        action: Action::Usage,
    },
    Command {
        path: &["weather"],
        action: Action::Search,
    },
    Command {
        path: &["w"],
        action: Action::Search,
    },
];

#[derive(Debug, Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    default_country: String,
    unit: Unit,
}

impl WeatherService {
    /// Build the service against the live OpenWeatherMap API.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, WeatherError> {
        if !config.has_api_key() {
            return Err(WeatherError::MissingApiKey);
        }

        let provider = OpenWeatherProvider::new(config.api_key.clone())?;
        Ok(Self::with_provider(Arc::new(provider), config))
    }

    pub fn with_provider(provider: Arc<dyn WeatherProvider>, config: &ServiceConfig) -> Self {
        Self {
            provider,
            default_country: config.default_country().to_owned(),
            unit: config.unit,
        }
    }

    pub fn usage() -> ChatMessage {
        ChatMessage::notice(USAGE)
    }

    /// Look up current weather for the joined `args`, or reply with usage when there are none.
    pub async fn lookup<S: AsRef<str>>(&self, args: &[S]) -> Result<ChatMessage, WeatherError> {
        let Some(query) = LocationQuery::from_args(args, &self.default_country) else {
            return Ok(Self::usage());
        };

        let report = self.provider.current_weather(&query).await?;
        info!(location = %query.location, place = %report.name, "Weather lookup succeeded");

        Ok(ChatMessage::text(report_line(&report, Utc::now(), self.unit)))
    }
}

#[async_trait]
impl CommandService for WeatherService {
    fn service_type(&self) -> &'static str {
        SERVICE_TYPE
    }

    fn commands(&self) -> &'static [Command] {
        COMMANDS
    }

    async fn execute(
        &self,
        action: Action,
        invocation: &Invocation,
    ) -> Result<ChatMessage, WeatherError> {
        match action {
            Action::Usage => Ok(Self::usage()),
            Action::Search => self.lookup(invocation.args.as_slice()).await,
        }
    }
}
