//! Client configuration with env-style overrides.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

pub const DEFAULT_API_BASE_URL: &str = "https://backend-fast-api-ai.fly.dev/api";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u32,
    pub upload_timeout_ms: u32,
    pub page_size: usize,
    pub search_debounce_ms: u32,
    /// How long the success animation stays before the form resets.
    pub success_reset_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout_ms: 30_000,
            upload_timeout_ms: 60_000,
            page_size: crate::query::DEFAULT_PAGE_SIZE,
            search_debounce_ms: 300,
            success_reset_ms: 3_000,
        }
    }
}

impl ClientConfig {
    /// Build from a variable lookup (`std::env::var`, `option_env!`, a map in
    /// tests). Missing or unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let api_base_url = lookup("SMARTFACE_API_BASE_URL")
            .map(|raw| raw.trim().trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_base_url);
        Self {
            api_base_url,
            request_timeout_ms: parse_or(&lookup, "SMARTFACE_REQUEST_TIMEOUT_MS", defaults.request_timeout_ms),
            upload_timeout_ms: parse_or(&lookup, "SMARTFACE_UPLOAD_TIMEOUT_MS", defaults.upload_timeout_ms),
            ..defaults
        }
    }

    /// Compile-time configuration for the browser bundle.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| {
            let value = match key {
                "SMARTFACE_API_BASE_URL" => option_env!("SMARTFACE_API_BASE_URL"),
                "SMARTFACE_REQUEST_TIMEOUT_MS" => option_env!("SMARTFACE_REQUEST_TIMEOUT_MS"),
                "SMARTFACE_UPLOAD_TIMEOUT_MS" => option_env!("SMARTFACE_UPLOAD_TIMEOUT_MS"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key).and_then(|raw| raw.trim().parse().ok()).unwrap_or(default)
}
