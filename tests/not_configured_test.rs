// Runs in its own test binary so no other test has configured the gateway

use braintree_gateway::{Configuration, GatewayError};

#[test]
fn test_instantiate_without_configure_fails() {
    let err = Configuration::instantiate().unwrap_err();
    assert!(matches!(err, GatewayError::NotConfigured));
    assert_eq!(err.error_type(), "not_configured");
}
