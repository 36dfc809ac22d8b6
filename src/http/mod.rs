//! Gateway HTTP Dispatcher
//!
//! [`Http`] turns merchant-relative paths into authenticated gateway
//! requests and hands them to the configured [`HttpStrategy`].

pub mod strategy;

pub use reqwest::Method;
pub use strategy::{HttpStrategy, StrategyKind, STRATEGY_ENV_VAR};

use crate::config::{Configuration, SecretString};
use crate::error::{GatewayError, Result};

/// Basic auth credentials attached to a request
#[derive(Debug, Clone)]
pub struct BasicAuth {
    pub username: String,
    pub password: SecretString,
}

/// Fully resolved gateway request
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub basic_auth: Option<BasicAuth>,
    pub body: Option<String>,
}

impl Request {
    /// Returns the value of the first header named `name` (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw gateway response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request dispatcher bound to one [`Configuration`]
///
/// The strategy is chosen once, when the dispatcher is built.
#[derive(Debug, Clone)]
pub struct Http {
    configuration: Configuration,
    strategy: HttpStrategy,
}

impl Http {
    /// Creates a dispatcher using the configuration's HTTP strategy
    ///
    /// # Errors
    ///
    /// Propagates `InvalidStrategy` from [`Configuration::http_strategy`].
    pub fn new(configuration: Configuration) -> Result<Self> {
        let strategy = configuration.http_strategy()?;
        Ok(Self {
            configuration,
            strategy,
        })
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn strategy(&self) -> &HttpStrategy {
        &self.strategy
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        self.execute(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: impl Into<String>) -> Result<Response> {
        self.execute(Method::POST, path, Some(body.into())).await
    }

    pub async fn put(&self, path: &str, body: impl Into<String>) -> Result<Response> {
        self.execute(Method::PUT, path, Some(body.into())).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        self.execute(Method::DELETE, path, None).await
    }

    /// Builds the request for a merchant-relative `path`
    ///
    /// `path` is appended to [`Configuration::base_merchant_url`].
    pub fn build_request(&self, method: Method, path: &str, body: Option<String>) -> Request {
        let config = &self.configuration;

        let headers = vec![
            ("Accept", "application/xml".to_string()),
            ("Content-Type", "application/xml".to_string()),
            ("X-ApiVersion", Configuration::api_version().to_string()),
            ("User-Agent", format!("Braintree Rust {}", env!("CARGO_PKG_VERSION"))),
        ];

        Request {
            method,
            url: format!("{}{}", config.base_merchant_url(), path),
            headers,
            basic_auth: Some(BasicAuth {
                username: config.public_key().to_string(),
                password: config.private_key().clone(),
            }),
            body,
        }
    }

    async fn execute(&self, method: Method, path: &str, body: Option<String>) -> Result<Response> {
        let request = self.build_request(method, path, body);
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            strategy = %self.strategy.kind(),
            "Dispatching gateway request"
        );

        let response = self.strategy.send(request).await?;

        if let Some(err) = GatewayError::from_status(response.status, path) {
            tracing::warn!(status = response.status, path, "Gateway request failed");
            return Err(err);
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    fn dispatcher() -> Http {
        let config = Configuration::new(
            Environment::new("local", "localhost", 3000, false),
            "merchant_1",
            "public_1",
            "private_1",
        )
        .with_strategy_override(None);
        Http::new(config).expect("dispatcher should build")
    }

    #[test]
    fn test_build_request_url_and_headers() {
        let http = dispatcher();
        let request = http.build_request(Method::GET, "/customers/42", None);

        assert_eq!(request.url, "http://localhost:3000/merchants/merchant_1/customers/42");
        assert_eq!(request.header("x-apiversion"), Some("3"));
        assert_eq!(request.header("Accept"), Some("application/xml"));
        assert!(request.header("User-Agent").unwrap().starts_with("Braintree Rust "));

        let auth = request.basic_auth.expect("basic auth attached");
        assert_eq!(auth.username, "public_1");
        assert_eq!(auth.password.expose_secret(), "private_1");
    }

    #[test]
    fn test_response_success_range() {
        let created = Response {
            status: 201,
            body: "<customer/>".to_string(),
        };
        assert!(created.is_success());

        let invalid = Response {
            status: 422,
            body: "<api-error-response/>".to_string(),
        };
        assert!(!invalid.is_success());
    }
}
