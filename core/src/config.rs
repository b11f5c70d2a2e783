//! Client configuration and its validation.
//!
//! # Design
//! `ClientConfig` is statically shaped and immutable once built. The
//! loosely-typed form (a JSON object or a set of environment variables) is
//! deserialized into `ConfigBag` first, so unknown keys and mistyped values
//! are rejected up front instead of surfacing at the first request.
//! Required keys are checked in the fixed order host, port, user, password.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ApiError;
use crate::http::compose_url;

/// Timeout used when none is configured, or when the configured value is not
/// a positive integer.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

pub const ENV_HOST: &str = "RABBITMQ_MGMT_HOST";
pub const ENV_PORT: &str = "RABBITMQ_MGMT_PORT";
pub const ENV_USER: &str = "RABBITMQ_MGMT_USER";
pub const ENV_PASSWORD: &str = "RABBITMQ_MGMT_PASSWORD";
pub const ENV_TIMEOUT_MS: &str = "RABBITMQ_MGMT_TIMEOUT_MS";

/// Which response statuses count as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Only `200 OK`. Creation (201) and deletion (204) answers are errors.
    #[default]
    ExactOk,
    /// Any `2xx` status.
    AnySuccess,
}

impl StatusPolicy {
    pub fn accepts(self, status: u16) -> bool {
        match self {
            StatusPolicy::ExactOk => status == 200,
            StatusPolicy::AnySuccess => (200..300).contains(&status),
        }
    }
}

/// The loosely-typed configuration bag.
///
/// `user` is also accepted under the name `username`. `timeout` is in
/// milliseconds and may be any JSON value; anything other than a positive
/// integer falls back to `DEFAULT_TIMEOUT`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigBag {
    pub host: Option<String>,
    pub port: Option<u16>,
    #[serde(alias = "username")]
    pub user: Option<String>,
    pub password: Option<String>,
    pub timeout: Option<serde_json::Value>,
}

/// Validated connection parameters for one broker.
#[derive(Clone)]
pub struct ClientConfig {
    host: String,
    port: u16,
    username: String,
    password: String,
    timeout: Duration,
    status_policy: StatusPolicy,
}

impl ClientConfig {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ApiError> {
        ClientConfig::try_from(ConfigBag {
            host: Some(host.into()),
            port: Some(port),
            user: Some(username.into()),
            password: Some(password.into()),
            timeout: None,
        })
    }

    /// Parse and validate a JSON configuration object.
    pub fn from_json(json: &str) -> Result<Self, ApiError> {
        let bag: ConfigBag =
            serde_json::from_str(json).map_err(|e| ApiError::ConfigError(e.to_string()))?;
        ClientConfig::try_from(bag)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, ApiError> {
        let bag: ConfigBag =
            serde_json::from_value(value).map_err(|e| ApiError::ConfigError(e.to_string()))?;
        ClientConfig::try_from(bag)
    }

    /// Read the configuration from the `RABBITMQ_MGMT_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        ClientConfig::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let port = lookup(ENV_PORT)
            .map(|raw| {
                raw.trim()
                    .parse::<u16>()
                    .map_err(|e| ApiError::ConfigError(format!("{ENV_PORT}: {e}")))
            })
            .transpose()?;
        let timeout = lookup(ENV_TIMEOUT_MS)
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map(serde_json::Value::from);

        ClientConfig::try_from(ConfigBag {
            host: lookup(ENV_HOST),
            port,
            user: lookup(ENV_USER),
            password: lookup(ENV_PASSWORD),
            timeout,
        })
    }

    /// Set the timeout in milliseconds. Zero or negative selects the default.
    pub fn with_timeout_ms(mut self, millis: i64) -> Self {
        self.timeout = resolve_timeout(Some(millis));
        self
    }

    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }

    /// Absolute URL for a resource path on this broker.
    pub fn url(&self, path: &str) -> String {
        compose_url(&self.host, self.port, path)
    }
}

impl TryFrom<ConfigBag> for ClientConfig {
    type Error = ApiError;

    fn try_from(bag: ConfigBag) -> Result<Self, Self::Error> {
        let host = required(bag.host, "host")?;
        let port = bag.port.ok_or(ApiError::MissingConfig { key: "port" })?;
        let username = required(bag.user, "user")?;
        let password = required(bag.password, "password")?;
        let timeout = resolve_timeout(bag.timeout.as_ref().and_then(serde_json::Value::as_i64));

        Ok(ClientConfig {
            host,
            port,
            username,
            password,
            timeout,
            status_policy: StatusPolicy::default(),
        })
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("status_policy", &self.status_policy)
            .finish()
    }
}

/// Positive milliseconds are used as-is; anything else is `DEFAULT_TIMEOUT`.
pub fn resolve_timeout(millis: Option<i64>) -> Duration {
    match millis {
        Some(ms) if ms > 0 => Duration::from_millis(ms.unsigned_abs()),
        _ => DEFAULT_TIMEOUT,
    }
}

fn required(value: Option<String>, key: &'static str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingConfig { key })
}
