//! HTTP Transport Strategies
//!
//! A strategy is the concrete HTTP client used to reach the gateway. Three
//! are available:
//! - `Default`: certificate-verifying client (override name `requests`)
//! - `UnsafeSsl`: accepts any server certificate (override name `httplib`)
//! - `Legacy`: HTTP/1.1 only, no connection reuse (override name `pycurl`)
//!
//! The override names are kept compatible with existing deployment
//! configuration that sets `BRAINTREE_HTTP_STRATEGY`.

use super::{Request, Response};
use crate::error::{GatewayError, Result};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

/// Environment variable overriding the transport strategy
pub const STRATEGY_ENV_VAR: &str = "BRAINTREE_HTTP_STRATEGY";

/// Request timeout applied by every strategy
const REQUEST_TIMEOUT_SECS: u64 = 60;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Transport strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Certificate-verifying client
    Default,
    /// Client that skips certificate verification
    UnsafeSsl,
    /// HTTP/1.1-only client without connection pooling
    Legacy,
}

impl StrategyKind {
    /// Resolves an override name (`httplib`, `pycurl`, `requests`)
    ///
    /// # Errors
    ///
    /// Any other value yields `GatewayError::InvalidStrategy`.
    pub fn from_override(name: &str) -> Result<Self> {
        match name {
            "httplib" => Ok(StrategyKind::UnsafeSsl),
            "pycurl" => Ok(StrategyKind::Legacy),
            "requests" => Ok(StrategyKind::Default),
            other => Err(GatewayError::InvalidStrategy(other.to_string())),
        }
    }

    /// Override name that selects this strategy
    pub fn override_name(&self) -> &'static str {
        match self {
            StrategyKind::Default => "requests",
            StrategyKind::UnsafeSsl => "httplib",
            StrategyKind::Legacy => "pycurl",
        }
    }

    /// Picks the strategy for an override value and the unsafe-SSL flag
    ///
    /// The unsafe-SSL flag wins over any override, including invalid ones.
    /// Without an override the default strategy is used.
    pub fn select(override_value: Option<&str>, use_unsafe_ssl: bool) -> Result<Self> {
        if use_unsafe_ssl {
            return Ok(StrategyKind::UnsafeSsl);
        }
        match override_value {
            Some(name) => Self::from_override(name),
            None => Ok(StrategyKind::Default),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StrategyKind::Default => "default",
            StrategyKind::UnsafeSsl => "unsafe-ssl",
            StrategyKind::Legacy => "legacy",
        };
        write!(f, "{}", label)
    }
}

/// Reads the strategy override from the process environment
///
/// A set-but-empty variable counts as present and will fail selection.
pub fn strategy_override_from_env() -> Option<String> {
    std::env::var_os(STRATEGY_ENV_VAR).map(|v| v.to_string_lossy().into_owned())
}

/// Concrete transport used by [`Http`](super::Http) to send requests
#[derive(Clone)]
pub struct HttpStrategy {
    kind: StrategyKind,
    client: Client,
}

impl fmt::Debug for HttpStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpStrategy").field("kind", &self.kind).finish()
    }
}

impl HttpStrategy {
    /// Builds the HTTP client for `kind`
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Http` if the TLS backend cannot be initialized.
    pub fn new(kind: StrategyKind) -> Result<Self> {
        let builder = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS));

        let builder = match kind {
            StrategyKind::Default => builder,
            StrategyKind::UnsafeSsl => {
                tracing::warn!(
                    "SSL certificate verification disabled; connections are open to man-in-the-middle attacks"
                );
                builder.danger_accept_invalid_certs(true)
            }
            StrategyKind::Legacy => builder.http1_only().pool_max_idle_per_host(0),
        };

        let client = builder.build()?;
        tracing::debug!(strategy = %kind, "HTTP strategy initialized");

        Ok(Self { kind, client })
    }

    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    /// Sends a request and collects the full response body
    ///
    /// Status codes are not interpreted here; see [`Http`](super::Http).
    pub async fn send(&self, request: Request) -> Result<Response> {
        let mut builder = self.client.request(request.method, &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        if let Some(auth) = &request.basic_auth {
            builder = builder.basic_auth(&auth.username, Some(auth.password.expose_secret()));
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(Response { status, body })
    }
}
