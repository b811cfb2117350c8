//! Domain-specific error types and error handling.

use thiserror::Error;
use vf_shared::types::response::ErrorResponse;

/// Errors raised by the verification token codec.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("verification token has expired")]
    Expired,

    #[error("verification token signature is invalid")]
    InvalidSignature,

    #[error("verification token is malformed")]
    Malformed,

    #[error("verification token could not be signed")]
    SigningFailed,
}

/// Core domain errors, classified the way the HTTP-layer collaborator
/// consumes them.
#[derive(Error, Debug)]
pub enum DomainError {
    /// The request is invalid against current state: expired or wrong
    /// code, wrong channel combination, disabled-feature preconditions.
    #[error("{message}")]
    BadRequest { message: String },

    /// No account matched the given id, filter, or API key.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// The input shape itself is malformed.
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// A collaborator failed: signing, dispatch, store, or IAM errors.
    #[error("internal failure: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Failure classification consumed by the HTTP layer's status mapping.
    ///
    /// Token failures are caller errors except for signing failures,
    /// which are a server-side problem.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::BadRequest { .. } => "BadRequest",
            DomainError::NotFound { .. } => "NotFound",
            DomainError::Validation { .. } => "ValidationFailure",
            DomainError::Internal { .. } => "InternalFailure",
            DomainError::Token(TokenError::SigningFailed) => "InternalFailure",
            DomainError::Token(_) => "BadRequest",
        }
    }

    /// Structured `{kind, message}` payload for callers.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.kind(), self.to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
