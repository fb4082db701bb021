//! Retry with exponential back-off and jitter for ledger pushes.
//!
//! The ledger script appends rows as it goes, so a request that reached it
//! must not be sent again. Only failures where the request provably never
//! ran are retried: connection failures and `503 Service Unavailable`.

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;

use crate::error::LedgerError;

/// Returns `true` for errors that are safe to retry after a back-off delay.
///
/// Timeouts are not retried: the script may still be writing.
pub(crate) fn is_retriable(err: &LedgerError) -> bool {
    match err {
        LedgerError::Http(e) => {
            e.is_connect() || e.status() == Some(StatusCode::SERVICE_UNAVAILABLE)
        }
        LedgerError::Script(_) | LedgerError::Deserialize { .. } | LedgerError::Sheet { .. } => {
            false
        }
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on
/// retriable errors.
///
/// The delay before retry `n` is `backoff_base_ms * 2^(n-1)` with ±25 %
/// jitter, capped at 30 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, LedgerError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LedgerError>>,
{
    const MAX_DELAY_MS: u64 = 30_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "ledger push failed before reaching the script; retrying"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
