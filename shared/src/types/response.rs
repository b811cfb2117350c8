//! Structured failure payload surfaced to callers.

use serde::{Deserialize, Serialize};

/// Structured `{kind, message}` pair returned to callers on failure.
///
/// The core only classifies failures; the HTTP layer (an external
/// collaborator) maps `kind` onto a status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Failure classification: "BadRequest", "NotFound",
    /// "ValidationFailure", or "InternalFailure".
    pub kind: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}
