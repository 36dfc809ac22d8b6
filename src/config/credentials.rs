//! Merchant Credential Management
//!
//! Secure handling of gateway API credentials loaded from code or environment
//! variables. The private key is never logged and is masked when displayed.

use crate::error::{GatewayError, Result};
use std::fmt;

/// Secure string wrapper that masks sensitive data in logs
///
/// Debug output shows only `SecretString(***)` and Display shows the
/// truncated form `first4...last4`.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Creates a new SecretString from a String
    pub fn new(value: String) -> Self {
        SecretString(value)
    }

    /// Returns a reference to the inner string
    ///
    /// **Security Warning**: Only use this when building the Authorization
    /// header. Never log or display the returned value.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Returns a masked version of the secret for safe logging
    ///
    /// Format: `first4...last4` (e.g., "abcd...wxyz")
    pub fn masked(&self) -> String {
        let s = &self.0;
        if s.chars().count() <= 8 {
            return "***".to_string();
        }
        let head: String = s.chars().take(4).collect();
        let tail: String = s.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
        format!("{}...{}", head, tail)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString(***)")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        SecretString::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        SecretString::new(s.to_string())
    }
}

/// Merchant account credentials
///
/// `merchant_id` and `public_key` identify the account and may appear in
/// logs; `private_key` is kept as a [`SecretString`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    /// Merchant account identifier, used in every API path
    pub merchant_id: String,
    /// Public API key (basic auth username)
    pub public_key: String,
    /// Private API key (basic auth password)
    pub private_key: SecretString,
}

impl Credentials {
    pub fn new(
        merchant_id: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<SecretString>,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    /// Loads credentials from environment variables
    ///
    /// Reads `BRAINTREE_MERCHANT_ID`, `BRAINTREE_PUBLIC_KEY` and
    /// `BRAINTREE_PRIVATE_KEY`. Values are trimmed and must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Config` naming the first missing or empty variable.
    pub fn from_env() -> Result<Self> {
        let merchant_id = required_var("BRAINTREE_MERCHANT_ID")?;
        let public_key = required_var("BRAINTREE_PUBLIC_KEY")?;
        let private_key = required_var("BRAINTREE_PRIVATE_KEY")?;

        Ok(Self {
            merchant_id,
            public_key,
            private_key: SecretString::new(private_key),
        })
    }
}

fn required_var(name: &str) -> Result<String> {
    let value = std::env::var(name)
        .map_err(|_| GatewayError::Config(format!("{} not set", name)))?;

    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(GatewayError::Config(format!(
            "{} is empty after trimming whitespace",
            name
        )));
    }

    Ok(value)
}
