use crate::error::{Result, StudioError};
use crate::logger::LogLevel;
use std::env;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub log_level: Option<LogLevel>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            timeout: None,
            log_level: None,
        }
    }
}

impl StudioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `BACKEND_URL`, `BACKEND_TIMEOUT_SECS` and `LOG_LEVEL`.
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let base_url = env::var("BACKEND_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let timeout = env::var("BACKEND_TIMEOUT_SECS")
            .ok()
            .and_then(|secs| secs.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        let log_level = env::var("LOG_LEVEL")
            .ok()
            .and_then(|level| level.parse().ok());

        StudioConfig {
            base_url: normalize_base_url(&base_url),
            timeout,
            log_level,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(StudioError::Config(format!(
                "backend URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        Ok(())
    }

    /// Joins an `/api/...` path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
