use std::env;

use payroll::config::{Config, StorageBackend};
use pretty_assertions::assert_eq;
use serial_test::serial;

const VARS: [&str; 7] = [
    "DATABASE_URL",
    "HOST",
    "PORT",
    "ENVIRONMENT",
    "BASE_URL",
    "PAY_SYNC_INTERVAL_SECS",
    "STORAGE",
];

/// Runs `f` with the given variables set and every other config variable
/// cleared, restoring the previous environment afterwards.
fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
    let saved: Vec<(&str, Option<String>)> =
        VARS.iter().map(|key| (*key, env::var(key).ok())).collect();

    unsafe {
        for key in VARS {
            env::remove_var(key);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }
    }

    let result = f();

    unsafe {
        for (key, value) in saved {
            match value {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }
    }

    result
}

#[test]
#[serial]
fn test_config_defaults() {
    let config = with_env(&[], || Config::from_env_only().unwrap());

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8080);
    assert_eq!(config.environment, "development");
    assert_eq!(config.client_base_url, "http://localhost:3000");
    assert_eq!(config.pay_sync_interval_secs, 3600);
    assert_eq!(config.storage, StorageBackend::Postgres);
    assert!(config.is_development());
    assert!(!config.is_production());
}

#[test]
#[serial]
fn test_config_custom_values() {
    let config = with_env(
        &[
            ("DATABASE_URL", "postgres://payroll@db:5432/payroll_test"),
            ("HOST", "0.0.0.0"),
            ("PORT", "9090"),
            ("ENVIRONMENT", "production"),
            ("BASE_URL", "https://payroll.example.com"),
            ("PAY_SYNC_INTERVAL_SECS", "0"),
            ("STORAGE", "Memory"),
        ],
        || Config::from_env_only().unwrap(),
    );

    assert_eq!(config.database_url, "postgres://payroll@db:5432/payroll_test");
    assert_eq!(config.server_address(), "0.0.0.0:9090");
    assert_eq!(config.client_base_url, "https://payroll.example.com");
    assert_eq!(config.pay_sync_interval_secs, 0);
    assert_eq!(config.storage, StorageBackend::Memory);
    assert!(config.is_production());
}

#[test]
#[serial]
fn test_config_unparseable_numbers_fall_back() {
    let config = with_env(
        &[("PORT", "eighty"), ("PAY_SYNC_INTERVAL_SECS", "-5")],
        || Config::from_env_only().unwrap(),
    );

    assert_eq!(config.port, 8080);
    assert_eq!(config.pay_sync_interval_secs, 3600);
}

#[test]
#[serial]
fn test_config_rejects_unknown_storage() {
    let result = with_env(&[("STORAGE", "mongodb")], Config::from_env_only);

    assert!(result.is_err());
}
