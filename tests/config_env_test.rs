//! Configuration resolved from the process environment.
//!
//! Tests mutate process-wide variables, so they run serially.

use std::time::Duration;

use itinerari::config::{ChatConfig, ENV_AUTH_TOKEN, ENV_CHAT_URL, ENV_READ_TIMEOUT_SECS};
use itinerari::error::ConfigError;
use serial_test::serial;

fn clear_env() {
    for name in [ENV_CHAT_URL, ENV_AUTH_TOKEN, ENV_READ_TIMEOUT_SECS] {
        std::env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_from_env_complete() {
    clear_env();
    std::env::set_var(ENV_CHAT_URL, "https://gateway.example/functions/v1/travel-chat");
    std::env::set_var(ENV_AUTH_TOKEN, "anon-key");
    std::env::set_var(ENV_READ_TIMEOUT_SECS, "30");

    let config = ChatConfig::from_env().unwrap();

    assert_eq!(
        config.endpoint_url,
        "https://gateway.example/functions/v1/travel-chat"
    );
    assert_eq!(config.auth_token, "anon-key");
    assert_eq!(config.read_timeout, Some(Duration::from_secs(30)));
    clear_env();
}

#[test]
#[serial]
fn test_from_env_without_timeout() {
    clear_env();
    std::env::set_var(ENV_CHAT_URL, "http://localhost:54321/functions/v1/travel-chat");
    std::env::set_var(ENV_AUTH_TOKEN, "anon-key");

    let config = ChatConfig::from_env().unwrap();

    assert_eq!(config.read_timeout, None);
    clear_env();
}

#[test]
#[serial]
fn test_from_env_missing_token() {
    clear_env();
    std::env::set_var(ENV_CHAT_URL, "https://gateway.example/chat");

    let err = ChatConfig::from_env().unwrap_err();

    assert_eq!(
        err,
        ConfigError::MissingVar {
            name: ENV_AUTH_TOKEN
        }
    );
    assert!(err.user_message().contains(ENV_AUTH_TOKEN));
    clear_env();
}

#[test]
#[serial]
fn test_from_env_nothing_set() {
    clear_env();
    let err = ChatConfig::from_env().unwrap_err();
    assert_eq!(err, ConfigError::MissingVar { name: ENV_CHAT_URL });
}
