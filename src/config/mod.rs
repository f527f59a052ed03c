//! Configuration (layered: code > env > defaults).
//!
//! A missing API key is a valid configuration: the assistant runs in
//! degraded mode and answers with a fixed message instead of calling out.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::types::GenerationSettings;

/// Default Gemini model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default Gemini REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Environment variables checked for the API key, in order.
pub const API_KEY_VARS: [&str; 3] = ["API_KEY", "GEMINI_API_KEY", "GOOGLE_API_KEY"];

pub const MODEL_VAR: &str = "PORTFOLIO_ASSISTANT_MODEL";
pub const BASE_URL_VAR: &str = "PORTFOLIO_ASSISTANT_BASE_URL";
pub const TIMEOUT_VAR: &str = "PORTFOLIO_ASSISTANT_TIMEOUT_SECS";
pub const PORTFOLIO_VAR: &str = "PORTFOLIO_DATA";

/// Process-wide settings, built once at startup and passed explicitly.
#[derive(Clone)]
pub struct AssistantConfig {
    api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// `None` disables the timeout.
    pub request_timeout: Option<Duration>,
    pub portfolio_path: Option<PathBuf>,
    pub settings: GenerationSettings,
}

impl fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| ".."))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("portfolio_path", &self.portfolio_path)
            .field("settings", &self.settings)
            .finish()
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AssistantConfig {
    /// Config with defaults and no credential.
    pub fn new() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Some(DEFAULT_TIMEOUT),
            portfolio_path: None,
            settings: GenerationSettings::default(),
        }
    }

    /// Load from environment variables, reading `.env` first if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();

        if let Some(key) = API_KEY_VARS
            .iter()
            .filter_map(|var| lookup(*var))
            .find(|key| !key.trim().is_empty())
        {
            config.set_api_key(key);
        }

        if let Some(model) = non_empty(lookup(MODEL_VAR)) {
            config.model = model;
        }
        if let Some(url) = non_empty(lookup(BASE_URL_VAR)) {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = non_empty(lookup(TIMEOUT_VAR)) {
            match raw.trim().parse::<u64>() {
                Ok(0) => config.request_timeout = None,
                Ok(secs) => config.request_timeout = Some(Duration::from_secs(secs)),
                Err(_) => tracing::warn!(var = TIMEOUT_VAR, value = %raw, "Ignoring invalid timeout"),
            }
        }
        if let Some(path) = non_empty(lookup(PORTFOLIO_VAR)) {
            config.portfolio_path = Some(PathBuf::from(path));
        }

        config
    }

    /// Set the API key. Blank keys clear it.
    pub fn set_api_key(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.api_key = if key.trim().is_empty() { None } else { Some(key) };
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.set_api_key(key);
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Whether a usable credential is configured.
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Per-user location of an optional `portfolio.toml`.
pub fn default_portfolio_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "portfolio-assistant")
        .map(|dirs| dirs.config_dir().join("portfolio.toml"))
}
