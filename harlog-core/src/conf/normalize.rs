use crate::conf::{
    ConfigError, DeliveryConfig, DeliveryMode, MetricsOptions, MetricsOptionsSpec,
};
use crate::redaction::RedactionConfig;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Merges deprecated aliases into the canonical lists and validates every option.
///
/// Entries from all spellings of a list are concatenated in declaration order
/// (canonical name first) and deduplicated.
pub fn normalize_options(spec: MetricsOptionsSpec) -> Result<MetricsOptions, ConfigError> {
    let deny_list = merge_lists([
        ("deny_list", spec.deny_list),
        ("denylist", spec.denylist),
        ("blacklist", spec.blacklist),
        ("blocklist", spec.blocklist),
    ])?;
    let allow_list = merge_lists([
        ("allow_list", spec.allow_list),
        ("allowlist", spec.allowlist),
        ("whitelist", spec.whitelist),
    ])?;

    if spec.timeout_ms == 0 {
        return Err(ConfigError::ZeroTimeout);
    }

    let mode = if spec.fire_and_forget {
        DeliveryMode::FireAndForget
    } else {
        DeliveryMode::Await
    };
    let delivery = DeliveryConfig::new(parse_http_url("collector_url", &spec.collector_url)?)
        .with_mode(mode)
        .with_timeout(Duration::from_millis(spec.timeout_ms));

    let base_log_url = spec
        .base_log_url
        .as_deref()
        .map(|raw| parse_http_url("base_log_url", raw))
        .transpose()?;

    Ok(MetricsOptions {
        redaction: RedactionConfig::new(deny_list, allow_list),
        is_development: spec.development,
        delivery,
        base_log_url,
    })
}

fn merge_lists<const N: usize>(
    lists: [(&'static str, Option<Vec<Value>>); N],
) -> Result<Vec<String>, ConfigError> {
    let mut merged = Vec::new();
    for (option, entries) in lists {
        for (index, entry) in entries.unwrap_or_default().into_iter().enumerate() {
            merged.push(list_entry(option, index, entry)?);
        }
    }
    Ok(merged)
}

fn list_entry(option: &'static str, index: usize, entry: Value) -> Result<String, ConfigError> {
    match entry {
        Value::String(s) if s.is_empty() => Err(ConfigError::EmptyListEntry { option, index }),
        Value::String(s) => Ok(s),
        other => Err(ConfigError::NonStringListEntry {
            option,
            index,
            found: other.to_string(),
        }),
    }
}

fn parse_http_url(option: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        option,
        value: raw.to_owned(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme {
            option,
            value: raw.to_owned(),
        }),
    }
}
