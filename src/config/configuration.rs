//! Gateway Configuration
//!
//! Process-wide gateway settings and the per-call [`Configuration`] snapshot
//! that request collaborators work from.
//!
//! ```no_run
//! use braintree_gateway::config::{Configuration, Environment};
//!
//! Configuration::configure(
//!     Environment::sandbox(),
//!     "your_merchant_id",
//!     "your_public_key",
//!     "your_private_key",
//! );
//!
//! let config = Configuration::instantiate()?;
//! assert_eq!(config.base_merchant_path(), "/merchants/your_merchant_id");
//! # Ok::<(), braintree_gateway::error::GatewayError>(())
//! ```

use super::{Credentials, Environment, SecretString};
use crate::error::{GatewayError, Result};
use crate::http::strategy::{strategy_override_from_env, HttpStrategy, StrategyKind};
use crate::http::Http;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

/// Gateway API version sent with every request
const API_VERSION: &str = "3";

/// Settings written by [`Configuration::configure`]
#[derive(Debug, Clone)]
struct GlobalSettings {
    environment: Environment,
    credentials: Credentials,
}

static GLOBAL_SETTINGS: RwLock<Option<GlobalSettings>> = RwLock::new(None);

/// Skips certificate verification for every configuration when set
static USE_UNSAFE_SSL: AtomicBool = AtomicBool::new(false);

/// Gateway account configuration
///
/// Built either directly with [`Configuration::new`] or as a snapshot of the
/// global settings with [`Configuration::instantiate`].
#[derive(Debug, Clone)]
pub struct Configuration {
    environment: Environment,
    credentials: Credentials,
    /// `BRAINTREE_HTTP_STRATEGY` as captured when the configuration was built
    strategy_override: Option<String>,
}

impl Configuration {
    /// Sets the process-wide gateway settings
    ///
    /// Call once at startup, before any request is issued. Also resets the
    /// unsafe-SSL flag to `false`.
    pub fn configure(
        environment: Environment,
        merchant_id: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<SecretString>,
    ) {
        let credentials = Credentials::new(merchant_id, public_key, private_key);

        tracing::info!(
            environment = %environment,
            merchant_id = %credentials.merchant_id,
            public_key = %credentials.public_key,
            "Gateway configured"
        );

        let mut settings = GLOBAL_SETTINGS
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *settings = Some(GlobalSettings {
            environment,
            credentials,
        });
        USE_UNSAFE_SSL.store(false, Ordering::SeqCst);
    }

    /// Sets the process-wide gateway settings from environment variables
    ///
    /// ## Environment Variables
    ///
    /// - `BRAINTREE_ENVIRONMENT`: development, qa, sandbox or production (default: sandbox)
    /// - `BRAINTREE_MERCHANT_ID`, `BRAINTREE_PUBLIC_KEY`, `BRAINTREE_PRIVATE_KEY`: required
    ///
    /// # Errors
    ///
    /// Returns `InvalidEnvironment` or `Config` if a variable is missing or invalid.
    pub fn configure_from_env() -> Result<()> {
        let environment = match std::env::var("BRAINTREE_ENVIRONMENT") {
            Ok(name) => Environment::parse(&name)?,
            Err(_) => Environment::sandbox(),
        };
        let credentials = Credentials::from_env()?;

        Self::configure(
            environment,
            credentials.merchant_id,
            credentials.public_key,
            credentials.private_key,
        );
        Ok(())
    }

    /// Snapshots the global settings into a new configuration
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::NotConfigured` if [`Configuration::configure`]
    /// has not been called.
    pub fn instantiate() -> Result<Self> {
        let settings = GLOBAL_SETTINGS
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(GatewayError::NotConfigured)?;

        Ok(Self::from_credentials(settings.environment, settings.credentials))
    }

    /// Enables or disables certificate verification bypass for all configurations
    ///
    /// Only for runtimes where certificate validation is impossible.
    pub fn set_use_unsafe_ssl(enabled: bool) {
        if enabled {
            tracing::warn!("Unsafe SSL enabled: gateway certificates will not be verified");
        }
        USE_UNSAFE_SSL.store(enabled, Ordering::SeqCst);
    }

    pub fn use_unsafe_ssl() -> bool {
        USE_UNSAFE_SSL.load(Ordering::SeqCst)
    }

    pub fn api_version() -> &'static str {
        API_VERSION
    }

    /// Creates a configuration without touching global settings
    ///
    /// The strategy override is read from `BRAINTREE_HTTP_STRATEGY` now;
    /// an invalid value surfaces later from [`Configuration::http_strategy`].
    pub fn new(
        environment: Environment,
        merchant_id: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<SecretString>,
    ) -> Self {
        Self::from_credentials(
            environment,
            Credentials::new(merchant_id, public_key, private_key),
        )
    }

    fn from_credentials(environment: Environment, credentials: Credentials) -> Self {
        let strategy_override = strategy_override_from_env();
        tracing::debug!(?strategy_override, "HTTP strategy override captured");

        Self {
            environment,
            credentials,
            strategy_override,
        }
    }

    /// Replaces the captured strategy override instead of reading the process environment
    pub fn with_strategy_override(mut self, override_value: Option<&str>) -> Self {
        self.strategy_override = override_value.map(str::to_string);
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn merchant_id(&self) -> &str {
        &self.credentials.merchant_id
    }

    pub fn public_key(&self) -> &str {
        &self.credentials.public_key
    }

    pub fn private_key(&self) -> &SecretString {
        &self.credentials.private_key
    }

    /// `/merchants/<merchant_id>`
    pub fn base_merchant_path(&self) -> String {
        format!("/merchants/{}", self.credentials.merchant_id)
    }

    /// Protocol, server, port and merchant path, e.g.
    /// `https://api.sandbox.braintreegateway.com:443/merchants/abc`
    pub fn base_merchant_url(&self) -> String {
        format!(
            "{}{}{}",
            self.environment.protocol(),
            self.environment.server_and_port(),
            self.base_merchant_path()
        )
    }

    /// Strategy that [`Configuration::http_strategy`] would build
    ///
    /// # Errors
    ///
    /// `InvalidStrategy` if the override was unrecognized and unsafe SSL is off.
    pub fn strategy_kind(&self) -> Result<StrategyKind> {
        StrategyKind::select(self.strategy_override.as_deref(), Self::use_unsafe_ssl())
    }

    /// Builds the transport strategy for this configuration
    ///
    /// The global unsafe-SSL flag takes precedence over the override variable.
    pub fn http_strategy(&self) -> Result<HttpStrategy> {
        HttpStrategy::new(self.strategy_kind()?)
    }

    /// Request dispatcher for this configuration
    pub fn http(&self) -> Result<Http> {
        Http::new(self.clone())
    }
}

#[cfg(test)]
pub(crate) fn reset_global_settings() {
    *GLOBAL_SETTINGS
        .write()
        .unwrap_or_else(PoisonError::into_inner) = None;
    USE_UNSAFE_SSL.store(false, Ordering::SeqCst);
}
