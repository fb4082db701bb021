use thiserror::Error;

/// Errors surfaced by the engine's input boundary.
///
/// Metric derivation itself is total and never fails; a missing edit target
/// is a silent no-op rather than an error.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A manually entered count did not parse as a non-negative integer.
    #[error("invalid numeric value for {field}: '{value}'")]
    InvalidNumeric { field: &'static str, value: String },

    /// The hand-entered Facebook stories JSON could not be parsed.
    #[error("malformed Facebook stories payload: {0}")]
    MalformedOverlayPayload(#[from] serde_json::Error),
}
