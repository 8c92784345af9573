use thiserror::Error;

/// Validation errors for canonical primitives.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When a canonical tree could not be encoded for hashing.
    #[error("canonical encoding failed: {reason}")]
    Encoding {
        /// Encoder message.
        reason: String,
    },
}
