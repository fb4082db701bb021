//! HTTP client for the hosted spreadsheet script.
//!
//! The script receives the whole [`SyncPayload`] as one JSON POST, writes
//! every section itself and answers with a `{"status", "message"}` envelope.
//! A `"status": "error"` answer is surfaced as [`LedgerError::Script`].

use std::time::Duration;

use metareport_engine::SyncPayload;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::retry::retry_with_backoff;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl ScriptResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }
}

/// Client for the ledger web-app endpoint.
pub struct ScriptClient {
    client: Client,
    url: Url,
    max_retries: u32,
    retry_backoff_base_ms: u64,
}

impl ScriptClient {
    /// Creates a client with retries disabled.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`LedgerError::Script`] if `url` is not a
    /// valid URL.
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self, LedgerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("metareport/0.1 (weekly-sync)")
            .build()?;
        let url = Url::parse(url)
            .map_err(|e| LedgerError::Script(format!("invalid script URL: {e}")))?;

        Ok(Self {
            client,
            url,
            max_retries: 0,
            retry_backoff_base_ms: 1_000,
        })
    }

    /// Enables retries of requests that never reached the script.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, retry_backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff_base_ms = retry_backoff_base_ms;
        self
    }

    /// Posts `payload` to the script and returns its answer.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Http`] on network failure or a non-2xx status.
    /// - [`LedgerError::Deserialize`] if the body is not the expected JSON
    ///   envelope.
    /// - [`LedgerError::Script`] if the script reports an error.
    pub async fn push(&self, payload: &SyncPayload) -> Result<ScriptResponse, LedgerError> {
        tracing::info!(
            week = %payload.week_label,
            instagram_posts = payload.instagram_posts.len(),
            instagram_stories = payload.instagram_stories.len(),
            facebook_posts = payload.facebook_posts.len(),
            facebook_stories = payload.facebook_stories.len(),
            "pushing sync payload to ledger"
        );

        let response = retry_with_backoff(self.max_retries, self.retry_backoff_base_ms, || {
            self.post_once(payload)
        })
        .await?;

        if !response.is_success() {
            let message = if response.message.is_empty() {
                format!("status '{}'", response.status)
            } else {
                response.message
            };
            return Err(LedgerError::Script(message));
        }

        tracing::info!(message = %response.message, "ledger sync accepted");
        Ok(response)
    }

    async fn post_once(&self, payload: &SyncPayload) -> Result<ScriptResponse, LedgerError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(payload)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| LedgerError::Deserialize {
            context: format!("ledger response ({} bytes)", body.len()),
            source: e,
        })
    }
}
