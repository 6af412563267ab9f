//! Configuration for lab loans module

use crate::contract::Page;
use serde::{Deserialize, Serialize};

/// Lab loans module configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Page size when a list request has no `limit`
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    /// Upper bound for `limit`
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl Config {
    /// Build a page from list query parameters, clamping `limit` to `1..=max_page_size`
    pub fn page(&self, skip: Option<u64>, limit: Option<u64>) -> Page {
        let max = self.max_page_size.max(1);
        let limit = limit
            .unwrap_or(self.default_page_size)
            .clamp(1, max);
        Page::new(skip.unwrap_or(0), limit)
    }
}

fn default_page_size() -> u64 {
    100
}

fn default_max_page_size() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.page(None, None), Page::new(0, 100));
    }

    #[test]
    fn test_page_clamps_limit() {
        let config = Config::default();
        assert_eq!(config.page(Some(20), Some(10_000)), Page::new(20, 500));
        assert_eq!(config.page(None, Some(0)), Page::new(0, 1));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"max_page_size": 50}"#).unwrap();
        assert_eq!(config.max_page_size, 50);
        assert_eq!(config.default_page_size, 100);
        assert_eq!(config.page(None, None).limit, 50);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_json::from_str(r#"{"retention": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_health_identity_is_not_configurable() {
        for field in [r#"{"version": "9.9.9"}"#, r#"{"application": "OTRO"}"#] {
            let result: Result<Config, _> = serde_json::from_str(field);
            assert!(result.is_err(), "accepted {}", field);
        }
    }
}
