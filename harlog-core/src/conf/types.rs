use crate::redaction::RedactionConfig;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub const DEFAULT_COLLECTOR_URL: &str = "https://metrics.readme.io";
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// Top-level shape of a config file: a single `metrics` block.
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub metrics: MetricsOptionsSpec,
}

/// Options as supplied by the caller, before aliases are merged.
///
/// List entries are kept untyped so that non-string entries can be reported
/// instead of failing deserialization with a less useful message.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsOptionsSpec {
    #[serde(default)]
    pub deny_list: Option<Vec<Value>>,
    #[serde(default)]
    pub denylist: Option<Vec<Value>>,
    #[serde(default)]
    pub blacklist: Option<Vec<Value>>,
    #[serde(default)]
    pub blocklist: Option<Vec<Value>>,

    #[serde(default)]
    pub allow_list: Option<Vec<Value>>,
    #[serde(default)]
    pub allowlist: Option<Vec<Value>>,
    #[serde(default)]
    pub whitelist: Option<Vec<Value>>,

    /// Marks traffic as development rather than production.
    #[serde(default, alias = "is_development")]
    pub development: bool,

    /// Deliver without waiting for the collector's acknowledgment.
    #[serde(default = "default_fire_and_forget")]
    pub fire_and_forget: bool,

    /// Base of the per-log documentation URL.
    #[serde(default)]
    pub base_log_url: Option<String>,

    #[serde(default = "default_collector_url")]
    pub collector_url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for MetricsOptionsSpec {
    fn default() -> Self {
        Self {
            deny_list: None,
            denylist: None,
            blacklist: None,
            blocklist: None,
            allow_list: None,
            allowlist: None,
            whitelist: None,
            development: false,
            fire_and_forget: default_fire_and_forget(),
            base_log_url: None,
            collector_url: default_collector_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_fire_and_forget() -> bool {
    true
}

fn default_collector_url() -> String {
    DEFAULT_COLLECTOR_URL.to_owned()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Wait for the collector and surface failures to the caller.
    Await,
    /// Send in the background; failures are only logged.
    FireAndForget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryConfig {
    pub collector_url: Url,
    pub timeout: Duration,
    pub mode: DeliveryMode,
}

impl DeliveryConfig {
    pub fn new(collector_url: Url) -> Self {
        Self {
            collector_url,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            mode: DeliveryMode::FireAndForget,
        }
    }

    pub fn with_mode(mut self, mode: DeliveryMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Validated, canonical options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsOptions {
    pub redaction: RedactionConfig,
    pub is_development: bool,
    pub delivery: DeliveryConfig,
    pub base_log_url: Option<Url>,
}
