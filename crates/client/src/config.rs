//! Client configuration.

use std::time::Duration;

use yanstore_inventory::DEFAULT_PAGE_SIZE;
use yanstore_rates::DEFAULT_TTL;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_API_URL: &str = "YANSTORE_API_URL";
pub const ENV_PAGE_SIZE: &str = "YANSTORE_PAGE_SIZE";
pub const ENV_RATES_TTL_SECS: &str = "YANSTORE_RATES_TTL_SECS";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "YANSTORE_HTTP_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST backend, without a trailing `/`.
    pub api_url: String,
    pub page_size: usize,
    pub rates_ttl: Duration,
    /// Whole-request deadline for every backend call.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            rates_ttl: DEFAULT_TTL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: normalize_url(api_url.into()),
            ..Self::default()
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; missing or unparseable values
    /// fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_url = lookup(ENV_API_URL)
            .filter(|v| !v.trim().is_empty())
            .map(normalize_url)
            .unwrap_or(defaults.api_url);

        let page_size = parse_or(&lookup, ENV_PAGE_SIZE, defaults.page_size, |v| {
            v.parse::<usize>().ok().filter(|n| *n > 0)
        });

        let rates_ttl = parse_or(&lookup, ENV_RATES_TTL_SECS, defaults.rates_ttl, |v| {
            v.parse::<u64>().ok().map(Duration::from_secs)
        });

        let request_timeout =
            parse_or(&lookup, ENV_HTTP_TIMEOUT_SECS, defaults.request_timeout, |v| {
                v.parse::<u64>()
                    .ok()
                    .filter(|n| *n > 0)
                    .map(Duration::from_secs)
            });

        Self {
            api_url,
            page_size,
            rates_ttl,
            request_timeout,
        }
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    parse: impl Fn(&str) -> Option<T>,
) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => match parse(raw.trim()) {
            Some(value) => value,
            None => {
                tracing::warn!(key, value = %raw, "ignoring invalid configuration value");
                default
            }
        },
    }
}

fn normalize_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}
