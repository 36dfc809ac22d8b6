// Integration tests for global configuration and strategy selection

use braintree_gateway::config::{Configuration, Environment};
use braintree_gateway::http::{StrategyKind, STRATEGY_ENV_VAR};
use braintree_gateway::GatewayError;
use serial_test::serial;

/// Runs `f` with the strategy override variable set to `value`, restoring it afterwards
fn with_strategy_override<T>(value: Option<&str>, f: impl FnOnce() -> T) -> T {
    let previous = std::env::var_os(STRATEGY_ENV_VAR);

    // SAFETY: serial_test keeps environment mutation single-threaded
    unsafe {
        match value {
            Some(v) => std::env::set_var(STRATEGY_ENV_VAR, v),
            None => std::env::remove_var(STRATEGY_ENV_VAR),
        }
    }

    let result = f();

    unsafe {
        match previous {
            Some(v) => std::env::set_var(STRATEGY_ENV_VAR, v),
            None => std::env::remove_var(STRATEGY_ENV_VAR),
        }
    }

    result
}

fn configure_development() {
    Configuration::configure(
        Environment::new("development", "localhost", 3000, false),
        "integration_merchant_id",
        "integration_public_key",
        "integration_private_key",
    );
}

#[test]
#[serial]
fn test_base_merchant_path_for_development() {
    configure_development();
    let config = Configuration::instantiate().unwrap();

    assert_eq!(config.base_merchant_path(), "/merchants/integration_merchant_id");
    assert_eq!(
        config.base_merchant_url(),
        "http://localhost:3000/merchants/integration_merchant_id"
    );
}

#[test]
#[serial]
fn test_instantiate_matches_most_recent_configure() {
    configure_development();
    Configuration::configure(Environment::sandbox(), "merchant_b", "public_b", "private_b");

    let config = Configuration::instantiate().unwrap();
    assert_eq!(config.environment(), &Environment::sandbox());
    assert_eq!(config.merchant_id(), "merchant_b");
    assert_eq!(config.public_key(), "public_b");
    assert_eq!(config.private_key().expose_secret(), "private_b");
}

#[test]
#[serial]
fn test_default_strategy_without_override() {
    configure_development();
    with_strategy_override(None, || {
        let strategy = Configuration::instantiate().unwrap().http_strategy().unwrap();
        assert_eq!(strategy.kind(), StrategyKind::Default);
    });
}

#[test]
#[serial]
fn test_overriding_http_strategy() {
    configure_development();
    assert!(!Configuration::use_unsafe_ssl());

    with_strategy_override(Some("httplib"), || {
        let strategy = Configuration::instantiate().unwrap().http_strategy().unwrap();
        assert_eq!(strategy.kind(), StrategyKind::UnsafeSsl);
    });

    with_strategy_override(Some("pycurl"), || {
        let strategy = Configuration::instantiate().unwrap().http_strategy().unwrap();
        assert_eq!(strategy.kind(), StrategyKind::Legacy);
    });

    with_strategy_override(Some("requests"), || {
        let strategy = Configuration::instantiate().unwrap().http_strategy().unwrap();
        assert_eq!(strategy.kind(), StrategyKind::Default);
    });
}

#[test]
#[serial]
fn test_overriding_http_strategy_fails_on_invalid_strategy() {
    configure_development();

    with_strategy_override(Some("invalid"), || {
        let config = Configuration::instantiate().expect("instantiate does not validate strategy");
        match config.http_strategy() {
            Err(GatewayError::InvalidStrategy(name)) => assert_eq!(name, "invalid"),
            other => panic!("expected InvalidStrategy, got {:?}", other),
        }
        assert!(config.http().is_err());
    });
}

#[test]
#[serial]
fn test_unsafe_ssl_overrides_strategy_variable() {
    configure_development();
    Configuration::set_use_unsafe_ssl(true);

    for value in ["requests", "pycurl", "invalid"] {
        with_strategy_override(Some(value), || {
            let strategy = Configuration::instantiate().unwrap().http_strategy().unwrap();
            assert_eq!(strategy.kind(), StrategyKind::UnsafeSsl, "override {}", value);
        });
    }

    Configuration::set_use_unsafe_ssl(false);
}

#[test]
#[serial]
fn test_strategy_resolved_when_configuration_is_built() {
    configure_development();

    let config = with_strategy_override(Some("pycurl"), || Configuration::instantiate().unwrap());

    // variable is gone now, selection made at instantiate time still holds
    assert_eq!(config.strategy_kind().unwrap(), StrategyKind::Legacy);
}
