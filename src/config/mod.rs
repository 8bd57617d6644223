//! Configuration module for the Chaster client.
//!
//! Holds the bearer token, the API root, the per-request timeout and any
//! extra headers sent with every request.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::{Host, Url};

use crate::auth::token_hint;
use crate::errors::{ChasterError, ChasterResult};

/// Default root of the Chaster API.
pub const DEFAULT_BASE_URL: &str = "https://api.chaster.app";

/// Default request timeout (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the bearer token.
pub const TOKEN_ENV: &str = "CHASTER_TOKEN";

/// Environment variable overriding the API root.
pub const BASE_URL_ENV: &str = "CHASTER_BASE_URL";

/// Environment variable overriding the timeout, in seconds.
pub const TIMEOUT_ENV: &str = "CHASTER_TIMEOUT";

/// Configuration for the Chaster client.
#[derive(Clone)]
pub struct ChasterConfig {
    token: SecretString,
    /// API root, without trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Custom headers to include in requests.
    pub custom_headers: Vec<(String, String)>,
}

impl ChasterConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ChasterConfigBuilder {
        ChasterConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CHASTER_TOKEN` (required): OAuth2 access token or developer token
    /// - `CHASTER_BASE_URL` (optional): custom API root
    /// - `CHASTER_TIMEOUT` (optional): request timeout in seconds
    pub fn from_env() -> ChasterResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Creates a configuration from an arbitrary variable lookup.
    ///
    /// Unlike [`Self::from_env`] this does not touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> ChasterResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_ENV).ok_or_else(|| {
            ChasterError::configuration(format!("{} environment variable not set", TOKEN_ENV))
        })?;

        let mut builder = ChasterConfigBuilder::new().token(token);

        if let Some(base_url) = lookup(BASE_URL_ENV) {
            builder = builder.base_url(base_url);
        }

        if let Some(timeout) = lookup(TIMEOUT_ENV) {
            let secs = timeout.trim().parse::<u64>().map_err(|_| {
                ChasterError::configuration(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    TIMEOUT_ENV, timeout
                ))
            })?;
            builder = builder.timeout_secs(secs);
        }

        builder.build()
    }

    /// Returns the bearer token.
    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// Returns the token hint (last 4 characters) for debugging.
    pub fn token_hint(&self) -> String {
        token_hint(self.token.expose_secret())
    }
}

impl std::fmt::Debug for ChasterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChasterConfig")
            .field("token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("custom_headers", &self.custom_headers.len())
            .finish()
    }
}

/// Builder for [`ChasterConfig`].
#[derive(Default)]
pub struct ChasterConfigBuilder {
    token: Option<SecretString>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    custom_headers: Vec<(String, String)>,
}

impl ChasterConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::new(token.into()));
        self
    }

    /// Sets the bearer token from an already wrapped secret.
    pub fn secret_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// Sets the API root.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Adds a custom header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((name.into(), value.into()));
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> ChasterResult<ChasterConfig> {
        let token = self
            .token
            .ok_or_else(|| ChasterError::configuration("Access token is required"))?;

        if token.expose_secret().trim().is_empty() {
            return Err(ChasterError::configuration("Access token cannot be empty"));
        }

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        validate_base_url(&base_url)?;

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ChasterError::configuration("Timeout must be greater than zero"));
        }

        for (name, _) in &self.custom_headers {
            if name.trim().is_empty() {
                return Err(ChasterError::configuration("Custom header name cannot be empty"));
            }
        }

        Ok(ChasterConfig {
            token,
            base_url,
            timeout,
            custom_headers: self.custom_headers,
        })
    }
}

/// HTTPS is required, except plain HTTP to a loopback host.
fn validate_base_url(base_url: &str) -> ChasterResult<()> {
    let url = Url::parse(base_url)?;

    if url.query().is_some() || url.fragment().is_some() {
        return Err(ChasterError::configuration(
            "Base URL must not carry a query or fragment",
        ));
    }

    match url.scheme() {
        "https" => Ok(()),
        "http" if is_loopback(&url) => Ok(()),
        _ => Err(ChasterError::configuration("Base URL must use HTTPS")),
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}
