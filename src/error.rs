use thiserror::Error;

/// Errors raised while configuring the gateway or dispatching requests to it
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("gateway not configured: call Configuration::configure before instantiate")]
    NotConfigured,

    #[error("invalid http strategy: {0}")]
    InvalidStrategy(String),

    #[error("invalid environment: {0}")]
    InvalidEnvironment(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed: check public and private keys")]
    Authentication,

    #[error("Authorization failed: API keys lack permission for this request")]
    Authorization,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Client library is no longer supported by the gateway (HTTP 426)")]
    UpgradeRequired,

    #[error("Gateway server error (HTTP 500)")]
    ServerError,

    #[error("Gateway is down for maintenance (HTTP 503)")]
    DownForMaintenance,

    #[error("Unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    Http(String),
}

impl GatewayError {
    /// Maps a non-success gateway status code onto an error
    ///
    /// Returns `None` for statuses the caller should treat as a normal
    /// response (2xx and 422 validation failures).
    pub fn from_status(status: u16, path: &str) -> Option<Self> {
        match status {
            200..=299 | 422 => None,
            401 => Some(GatewayError::Authentication),
            403 => Some(GatewayError::Authorization),
            404 => Some(GatewayError::NotFound(path.to_string())),
            426 => Some(GatewayError::UpgradeRequired),
            500 => Some(GatewayError::ServerError),
            503 => Some(GatewayError::DownForMaintenance),
            other => Some(GatewayError::UnexpectedStatus(other)),
        }
    }

    /// Short machine-readable name for the error kind
    pub fn error_type(&self) -> &'static str {
        match self {
            GatewayError::NotConfigured => "not_configured",
            GatewayError::InvalidStrategy(_) => "invalid_strategy",
            GatewayError::InvalidEnvironment(_) => "invalid_environment",
            GatewayError::Config(_) => "config_error",
            GatewayError::Authentication => "authentication",
            GatewayError::Authorization => "authorization",
            GatewayError::NotFound(_) => "not_found",
            GatewayError::UpgradeRequired => "upgrade_required",
            GatewayError::ServerError => "server_error",
            GatewayError::DownForMaintenance => "down_for_maintenance",
            GatewayError::UnexpectedStatus(_) => "unexpected_status",
            GatewayError::Connection(_) => "connection_error",
            GatewayError::Http(_) => "http_error",
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Connection(
                "Request timeout. Please check your internet connection.".to_string(),
            )
        } else if err.is_connect() {
            GatewayError::Connection(
                "Failed to connect to the gateway. Please check your internet connection."
                    .to_string(),
            )
        } else if err.is_builder() {
            GatewayError::Http(format!("Failed to build HTTP client or request: {}", err))
        } else {
            GatewayError::Http(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_and_validation_statuses_are_not_errors() {
        assert!(GatewayError::from_status(200, "/").is_none());
        assert!(GatewayError::from_status(201, "/").is_none());
        assert!(GatewayError::from_status(422, "/").is_none());
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            GatewayError::from_status(401, "/"),
            Some(GatewayError::Authentication)
        ));
        assert!(matches!(
            GatewayError::from_status(403, "/"),
            Some(GatewayError::Authorization)
        ));
        assert!(matches!(
            GatewayError::from_status(426, "/"),
            Some(GatewayError::UpgradeRequired)
        ));
        assert!(matches!(
            GatewayError::from_status(503, "/"),
            Some(GatewayError::DownForMaintenance)
        ));
        assert!(matches!(
            GatewayError::from_status(418, "/"),
            Some(GatewayError::UnexpectedStatus(418))
        ));
    }

    #[test]
    fn test_not_found_keeps_path() {
        let err = GatewayError::from_status(404, "/merchants/m1/customers/42").unwrap();
        assert_eq!(err.to_string(), "Resource not found: /merchants/m1/customers/42");
        assert_eq!(err.error_type(), "not_found");
    }

    #[test]
    fn test_invalid_strategy_message() {
        let err = GatewayError::InvalidStrategy("curl".to_string());
        assert_eq!(err.to_string(), "invalid http strategy: curl");
    }
}
