//! Client configuration read from `AUTHFLOW_*` environment variables with an
//! optional runtime override layer (command-line flags). Blank overrides are
//! ignored so an empty flag never wipes a configured value. Configuration
//! values are public; do not store secrets here.

use std::env;

/// Default request timeout (milliseconds) applied to all HTTP helpers.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Locale used for localized routes when none is configured.
pub const DEFAULT_LOCALE: &str = "en";
/// Identity provider base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Client configuration derived from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub base_url: String,
    pub locale: String,
    pub timeout_ms: u64,
    pub strict_password: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            strict_password: false,
        }
    }
}

impl AppConfig {
    /// Loads config from environment variables, falling back to defaults for
    /// missing, blank or unparsable values.
    pub fn load() -> Self {
        let mut config = Self::default();
        let runtime = RuntimeConfig {
            base_url: read_env("AUTHFLOW_BASE_URL"),
            locale: read_env("AUTHFLOW_LOCALE"),
            timeout_ms: read_env("AUTHFLOW_TIMEOUT_MS").and_then(|value| value.parse().ok()),
            strict_password: read_env("AUTHFLOW_STRICT_PASSWORD").and_then(|value| parse_flag(&value)),
        };
        apply_runtime_overrides(&mut config, runtime);
        config
    }

    /// Loads config from the environment and then applies runtime overrides.
    pub fn load_with(runtime: RuntimeConfig) -> Self {
        let mut config = Self::load();
        apply_runtime_overrides(&mut config, runtime);
        config
    }
}

/// Values supplied at runtime, e.g. from command-line flags.
#[derive(Clone, Debug, Default)]
pub struct RuntimeConfig {
    pub base_url: Option<String>,
    pub locale: Option<String>,
    pub timeout_ms: Option<u64>,
    pub strict_password: Option<bool>,
}

impl RuntimeConfig {
    /// Builds overrides from raw flag values, dropping blank strings.
    pub fn from_flags(base_url: Option<&str>, locale: Option<&str>, strict_password: bool) -> Self {
        Self {
            base_url: base_url.and_then(normalize_runtime_value),
            locale: locale.and_then(normalize_runtime_value),
            timeout_ms: None,
            strict_password: strict_password.then_some(true),
        }
    }
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.base_url {
        config.base_url = value;
    }
    if let Some(value) = runtime.locale {
        config.locale = value;
    }
    if let Some(value) = runtime.timeout_ms.filter(|value| *value > 0) {
        config.timeout_ms = value;
    }
    if let Some(value) = runtime.strict_password {
        config.strict_password = value;
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .and_then(|value| normalize_runtime_value(&value))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
