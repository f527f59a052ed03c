//! Tests for environment-driven configuration.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use portfolio_assistant::client::{AssistantClient, DEGRADED_REPLY};
use portfolio_assistant::config::{AssistantConfig, DEFAULT_MODEL, DEFAULT_TIMEOUT};
use portfolio_assistant::portfolio::Portfolio;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CONFIG_ENV_VARS: [&str; 7] = [
    "API_KEY",
    "GEMINI_API_KEY",
    "GOOGLE_API_KEY",
    "PORTFOLIO_ASSISTANT_MODEL",
    "PORTFOLIO_ASSISTANT_BASE_URL",
    "PORTFOLIO_ASSISTANT_TIMEOUT_SECS",
    "PORTFOLIO_DATA",
];

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn capture(keys: &[&str]) -> Self {
        let saved = keys
            .iter()
            .map(|key| ((*key).to_string(), std::env::var(key).ok()))
            .collect();
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

fn env_lock_guard() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn config_from(vars: &[(&str, &str)]) -> AssistantConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    AssistantConfig::from_lookup(|name: &str| vars.get(name).cloned())
}

#[test]
fn missing_key_is_degraded_not_an_error() {
    let config = config_from(&[]);

    assert!(!config.has_credentials());
    assert_eq!(config.model, DEFAULT_MODEL);
    assert_eq!(config.request_timeout, Some(DEFAULT_TIMEOUT));
    assert_eq!(config.portfolio_path, None);
}

#[test]
fn reads_gemini_key_and_overrides() {
    let config = config_from(&[
        ("GEMINI_API_KEY", "gemini-key"),
        ("PORTFOLIO_ASSISTANT_MODEL", "gemini-2.0-flash"),
        ("PORTFOLIO_ASSISTANT_TIMEOUT_SECS", "15"),
        ("PORTFOLIO_DATA", "/srv/portfolio.toml"),
    ]);

    assert_eq!(config.api_key(), Some("gemini-key"));
    assert_eq!(config.model, "gemini-2.0-flash");
    assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
    assert_eq!(config.portfolio_path, Some(PathBuf::from("/srv/portfolio.toml")));
}

#[test]
fn blank_api_key_falls_through_to_next_variable() {
    let config = config_from(&[("API_KEY", "  "), ("GOOGLE_API_KEY", "google-key")]);
    assert_eq!(config.api_key(), Some("google-key"));

    let config = config_from(&[("API_KEY", "")]);
    assert!(!config.has_credentials());
}

#[test]
fn zero_timeout_disables_and_garbage_is_ignored() {
    let config = config_from(&[("PORTFOLIO_ASSISTANT_TIMEOUT_SECS", "0")]);
    assert_eq!(config.request_timeout, None);

    let config = config_from(&[("PORTFOLIO_ASSISTANT_TIMEOUT_SECS", "soon")]);
    assert_eq!(config.request_timeout, Some(DEFAULT_TIMEOUT));
}

#[test]
fn from_env_reads_process_environment() {
    let _lock = env_lock_guard();
    let _guard = EnvGuard::capture(&CONFIG_ENV_VARS);
    // Every variable is pinned, so values from a local .env file cannot leak in.
    for key in CONFIG_ENV_VARS {
        std::env::set_var(key, "");
    }
    std::env::set_var("GEMINI_API_KEY", "env-key");
    std::env::set_var("PORTFOLIO_ASSISTANT_MODEL", "gemini-2.0-flash");

    let config = AssistantConfig::from_env();

    assert_eq!(config.api_key(), Some("env-key"));
    assert_eq!(config.model, "gemini-2.0-flash");
    assert_eq!(config.request_timeout, Some(DEFAULT_TIMEOUT));
}

#[tokio::test]
async fn degraded_config_produces_degraded_client() {
    let client = AssistantClient::new(&AssistantConfig::new(), &Portfolio::default());
    assert!(!client.is_configured());
    assert_eq!(client.get_reply("anyone there?").await, DEGRADED_REPLY);
}
