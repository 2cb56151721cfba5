//! Runtime configuration, resolved once at startup and provided via context.

use crate::shared::api_utils::api_base;

/// Settings + notifications refresh period
pub const POLL_INTERVAL_MS: u32 = 30_000;

/// How long a toast stays on screen
pub const TOAST_TTL_MS: u32 = 5_000;

/// Default page size for paginated lists
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Page size used when walking every settings page
pub const SETTINGS_PAGE_SIZE: u32 = 100;

/// Items shown in the header bell dropdown
pub const BELL_PREVIEW_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub poll_interval_ms: u32,
    pub toast_ttl_ms: u32,
}

impl AppConfig {
    /// Reads what the page provides, defaults for the rest
    pub fn load() -> Self {
        let config = Self {
            api_base: api_base(),
            ..Self::default()
        };
        log::info!(
            "config: api_base={} poll_interval_ms={}",
            config.api_base,
            config.poll_interval_ms
        );
        config
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            poll_interval_ms: POLL_INTERVAL_MS,
            toast_ttl_ms: TOAST_TTL_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.poll_interval_ms, 30_000);
        assert_eq!(config.toast_ttl_ms, 5_000);
    }
}
