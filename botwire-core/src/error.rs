//! Error types for botwire
//!
//! Every non-success outcome of a method call is exactly one variant of
//! [`Error`]:
//!
//! - **Validation**: a local precondition failed; nothing was sent
//! - **Deserialization**: the answer could not be read as an envelope, or it
//!   broke the envelope invariants
//! - **RemoteRejected**: the answer was a well-formed failure envelope
//! - **Transport**: the transport collaborator could not deliver the request or
//!   read the answer (never produced by a method itself)
//!
//! The variants are disjoint. A remote failure is never reported as a parse
//! fault and a parse fault is never dressed up as a remote failure.
//!
//! # Examples
//!
//! ```rust
//! use botwire_core::{ApiError, Error};
//!
//! let error = Error::RemoteRejected(ApiError::new(Some(429), "Too Many Requests"));
//! assert!(error.is_remote_rejected());
//! assert_eq!(error.error_code(), Some(429));
//! ```

use crate::types::ResponseParameters;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for botwire operations
pub type Result<T> = std::result::Result<T, Error>;

/// Classified failure of a method call
///
/// `Error` is `Clone` so a single failure can be handed to several observers
/// (logging, metrics, the caller). The underlying parse fault is shared behind
/// an `Arc` for that reason.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Local precondition violated before any network I/O
    ///
    /// The remote side never observes a request that failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The raw answer is malformed or inconsistent with the envelope contract
    ///
    /// `source` holds the parser's own fault when there is one. It is `None`
    /// for structural violations found after a successful parse, such as a
    /// success envelope without a result.
    #[error("Deserialization error: {message}")]
    Deserialization {
        /// What went wrong, in words
        message: String,
        /// The parse fault reported by serde_json, if any
        #[source]
        source: Option<Arc<serde_json::Error>>,
    },

    /// The answer parsed correctly and reported failure
    ///
    /// Carries the remote error code and description verbatim.
    #[error("Remote rejected request: {0}")]
    RemoteRejected(ApiError),

    /// Transport fault reported by the dispatcher's transport
    #[error("Transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Build a `Deserialization` error that wraps a serde_json fault
    pub fn parse(message: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Deserialization {
            message: message.into(),
            source: Some(Arc::new(source)),
        }
    }

    /// Build a `Deserialization` error for a structural envelope violation
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::Deserialization {
            message: message.into(),
            source: None,
        }
    }

    /// True for `Error::Validation`
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// True for `Error::Deserialization`
    pub fn is_deserialization(&self) -> bool {
        matches!(self, Error::Deserialization { .. })
    }

    /// True for `Error::RemoteRejected`
    pub fn is_remote_rejected(&self) -> bool {
        matches!(self, Error::RemoteRejected(_))
    }

    /// True for `Error::Transport`
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Remote error code, for `RemoteRejected` errors that carry one
    pub fn error_code(&self) -> Option<i32> {
        match self {
            Error::RemoteRejected(api) => api.error_code,
            _ => None,
        }
    }

    /// Seconds the remote side asked the caller to wait, if it said so
    ///
    /// This layer never acts on the value; it is surfaced for callers that
    /// implement their own retry policy.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Error::RemoteRejected(api) => api.parameters.as_ref().and_then(|p| p.retry_after),
            _ => None,
        }
    }

    /// Short stable label for the error kind, used as a metrics attribute
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation",
            Error::Deserialization { .. } => "deserialization",
            Error::RemoteRejected(_) => "remote_rejected",
            Error::Transport(_) => "transport",
        }
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::RemoteRejected(err)
    }
}

/// Failure reported by the remote side inside a well-formed envelope
///
/// Built from the `error_code`, `description` and `parameters` fields of a
/// failure envelope. None of them are interpreted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Numeric error code (HTTP-like, e.g. 400, 403, 429)
    ///
    /// Usually present but not guaranteed by the platform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i32>,

    /// Human-readable description, exactly as sent
    pub description: String,

    /// Extra hints attached to some failures (flood control, chat migration)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ResponseParameters>,
}

impl ApiError {
    /// Create an error with an optional code and a description
    pub fn new(error_code: Option<i32>, description: impl Into<String>) -> Self {
        Self {
            error_code,
            description: description.into(),
            parameters: None,
        }
    }

    /// Attach the response parameters sent alongside the failure
    pub fn with_parameters(mut self, parameters: ResponseParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

impl std::fmt::Display for ApiError {
    /// Formats as "[code] description", or just the description when the
    /// remote side sent no code.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.error_code {
            Some(code) => write!(f, "[{}] {}", code, self.description),
            None => write!(f, "{}", self.description),
        }
    }
}

impl std::error::Error for ApiError {}

/// A method's local precondition was violated
///
/// Names the offending field (or, for rules spanning several fields, a
/// comma-separated list of them) and the rule that failed.
///
/// ```rust
/// use botwire_core::ValidationError;
///
/// let error = ValidationError::missing("chat_id");
/// assert_eq!(error.field, "chat_id");
/// assert_eq!(error.to_string(), "chat_id: required field is missing");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    /// Wire key of the offending field, or the fields involved in the rule
    pub field: String,
    /// The rule that was violated
    pub reason: String,
}

impl ValidationError {
    /// Create a validation error for a field and a reason
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// A required field was left unset
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, "required field is missing")
    }

    /// Two fields that may not be combined were both set
    pub fn conflict(first: &str, second: &str) -> Self {
        Self::new(
            format!("{}, {}", first, second),
            "fields are mutually exclusive",
        )
    }
}
