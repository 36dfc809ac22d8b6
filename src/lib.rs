// Library exports for braintree-gateway

pub mod config; // Gateway configuration and credentials
pub mod error;
pub mod http; // Request dispatcher and transport strategies

pub use config::{Configuration, Credentials, Environment, SecretString};
pub use error::{GatewayError, Result};
pub use http::{Http, HttpStrategy, StrategyKind};
