//! Gateway Environments
//!
//! Endpoint descriptors for the development, QA, sandbox and production
//! gateways.

use crate::error::{GatewayError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Default port of a locally running development gateway
const DEFAULT_DEVELOPMENT_PORT: u16 = 3000;

/// API endpoint descriptor
///
/// ## Environment Variables
///
/// - `GATEWAY_PORT`: port of the development gateway (default: 3000)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Environment {
    /// Environment name (e.g. "sandbox")
    pub name: String,
    /// Gateway host name
    pub server: String,
    /// Gateway port
    pub port: u16,
    /// Whether the gateway is reached over TLS
    pub is_ssl: bool,
}

impl Environment {
    /// Creates a custom environment
    pub fn new(name: impl Into<String>, server: impl Into<String>, port: u16, is_ssl: bool) -> Self {
        Self {
            name: name.into(),
            server: server.into(),
            port,
            is_ssl,
        }
    }

    /// Locally running gateway, plain HTTP
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Config` if `GATEWAY_PORT` is set but is not a valid port.
    pub fn development() -> Result<Self> {
        let port = match std::env::var("GATEWAY_PORT") {
            Ok(value) => value.trim().parse().map_err(|_| {
                GatewayError::Config(format!("GATEWAY_PORT is not a valid port: {:?}", value))
            })?,
            Err(_) => DEFAULT_DEVELOPMENT_PORT,
        };
        Ok(Self::new("development", "localhost", port, false))
    }

    pub fn qa() -> Self {
        Self::new("qa", "qa.braintreegateway.com", 443, true)
    }

    pub fn sandbox() -> Self {
        Self::new("sandbox", "api.sandbox.braintreegateway.com", 443, true)
    }

    pub fn production() -> Self {
        Self::new("production", "api.braintreegateway.com", 443, true)
    }

    /// Looks up a predefined environment by name (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidEnvironment` for unknown names.
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "development" => Self::development(),
            "qa" => Ok(Self::qa()),
            "sandbox" => Ok(Self::sandbox()),
            "production" => Ok(Self::production()),
            _ => Err(GatewayError::InvalidEnvironment(name.to_string())),
        }
    }

    /// URL scheme prefix, `https://` or `http://`
    pub fn protocol(&self) -> &'static str {
        if self.is_ssl {
            "https://"
        } else {
            "http://"
        }
    }

    /// `server:port`
    pub fn server_and_port(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }

    /// Base URL of the gateway, without any merchant path
    pub fn base_url(&self) -> String {
        format!("{}{}", self.protocol(), self.server_and_port())
    }
}

impl FromStr for Environment {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
