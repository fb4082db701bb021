use thiserror::Error;

/// Errors raised while writing a sync to the ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Network or TLS failure, or a non-2xx status from the script endpoint.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The ledger script answered but reported a failure, or the client was
    /// misconfigured.
    #[error("ledger script error: {0}")]
    Script(String),

    /// The script response body could not be decoded.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A single sheet rejected its rows.
    #[error("sheet '{sheet}' write failed: {reason}")]
    Sheet { sheet: String, reason: String },
}
