//! Application configuration. API host, timeouts, front-end tuning.

use crate::domain::DomainError;
use serde::Deserialize;

/// Used when no API URL is configured (local Flask backend).
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Base URL of the REST API. Read from MEMORYOS_API_URL, or VITE_API_URL for
    /// setups shared with the web front-end.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds. Read from MEMORYOS_REQUEST_TIMEOUT_SECS.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Simulated latency of the mock reminder source. Read from MEMORYOS_REMINDER_DELAY_MS.
    #[serde(default)]
    pub reminder_delay_ms: Option<u64>,

    /// Memories per vault page. Read from MEMORYOS_PAGE_SIZE.
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl AppConfig {
    pub fn load() -> Result<Self, DomainError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("MEMORYOS"));
        if let Ok(path) = std::env::var("MEMORYOS_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c
            .build()
            .and_then(|built| built.try_deserialize())
            .map_err(|e| DomainError::Config(e.to_string()))?;
        // VITE_API_URL is read directly (no prefix) so one .env can serve both front-ends
        if cfg.api_url.is_none() {
            if let Ok(url) = std::env::var("VITE_API_URL") {
                if !url.trim().is_empty() {
                    cfg.api_url = Some(url);
                }
            }
        }
        Ok(cfg)
    }

    /// Base URL without a trailing slash. Falls back to DEFAULT_API_URL.
    pub fn api_url_or_default(&self) -> String {
        self.api_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string()
    }

    /// Defaults to 15 seconds.
    pub fn request_timeout_secs_or_default(&self) -> u64 {
        self.request_timeout_secs.unwrap_or(15)
    }

    /// Defaults to 500ms.
    pub fn reminder_delay_ms_or_default(&self) -> u64 {
        self.reminder_delay_ms.unwrap_or(500)
    }

    /// Defaults to 12, never 0.
    pub fn page_size_or_default(&self) -> u32 {
        self.page_size.filter(|n| *n > 0).unwrap_or(12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_url_or_default(), DEFAULT_API_URL);
        assert_eq!(cfg.request_timeout_secs_or_default(), 15);
        assert_eq!(cfg.reminder_delay_ms_or_default(), 500);
        assert_eq!(cfg.page_size_or_default(), 12);
    }

    #[test]
    fn test_api_url_is_normalised() {
        let cfg = AppConfig {
            api_url: Some(" https://api.example.com/ ".into()),
            page_size: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.api_url_or_default(), "https://api.example.com");
        assert_eq!(cfg.page_size_or_default(), 12);
    }
}
