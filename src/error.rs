//! Error types for the scoring and projection engine.

use thiserror::Error;

/// Caller contract violations raised by the engine.
///
/// Every variant is a rejected request: the engine never computes a partial
/// result once one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A population, hourly series, or control value broke its contract.
    #[error("invalid input: {field}: {message}")]
    InvalidInput {
        /// Name of the offending argument or field (e.g. `"controls.shift_pct"`).
        field: String,
        /// Human-readable constraint description.
        message: String,
    },

    /// The requested zone key is not part of the dataset.
    #[error("zone \"{0}\" not found in dataset")]
    UnknownZone(String),
}

impl EngineError {
    /// Shorthand for [`EngineError::InvalidInput`].
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}
