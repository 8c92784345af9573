use thiserror::Error;

/// Errors raised while parsing captured API payloads.
#[derive(Error, Debug)]
pub enum ModelError {
    /// JSON deserialization error.
    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
    /// The payload carries no `kind` tag.
    #[error("record has no kind tag")]
    MissingKind,
}
