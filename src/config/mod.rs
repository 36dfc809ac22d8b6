//! Configuration Management
//!
//! Gateway environments, merchant credentials and the process-wide
//! configuration used to build request dispatchers.

pub mod configuration;
pub mod credentials;
pub mod environment;

// Re-export
pub use configuration::Configuration;
pub use credentials::{Credentials, SecretString};
pub use environment::Environment;
