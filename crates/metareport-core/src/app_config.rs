use std::path::PathBuf;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Ledger web-app endpoint. Only the `sync` command needs it.
    pub script_url: Option<String>,
    pub sync_timeout_secs: u64,
    pub sync_max_retries: u32,
    pub sync_retry_backoff_ms: u64,
    /// Default manual overlay file for Facebook story performance.
    pub overlay_path: Option<PathBuf>,
}

impl AppConfig {
    /// Returns the ledger endpoint or fails as if the env var were required.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `METAREPORT_SCRIPT_URL` is unset.
    pub fn require_script_url(&self) -> Result<&str, ConfigError> {
        self.script_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("METAREPORT_SCRIPT_URL".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("script_url", &self.script_url.as_ref().map(|_| "[redacted]"))
            .field("sync_timeout_secs", &self.sync_timeout_secs)
            .field("sync_max_retries", &self.sync_max_retries)
            .field("sync_retry_backoff_ms", &self.sync_retry_backoff_ms)
            .field("overlay_path", &self.overlay_path)
            .finish()
    }
}
