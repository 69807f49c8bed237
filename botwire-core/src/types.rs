//! Wire types shared by every method
//!
//! Every answer from the bot API, successful or not, arrives wrapped in the
//! same envelope:
//!
//! ```json
//! {"success": true, "result": [...]}
//! {"success": false, "error_code": 429, "description": "Too Many Requests"}
//! ```
//!
//! [`ResponseEnvelope`] is generic over the result type so that one parsing
//! routine serves every method. The production platform names the flag `ok`;
//! both spellings are accepted when parsing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Generic success/failure wrapper around a raw answer
///
/// # Invariants
///
/// A well-formed envelope is exactly one of:
/// - **Success**: `success` is true and `result` is present
/// - **Failure**: `success` is false and `description` is present
///   (`error_code` is usually present too)
///
/// The type itself does not enforce this, since it has to be able to hold
/// whatever the remote side sent. [`ResponseEnvelope::into_result`] is where
/// the invariants are checked.
///
/// # Examples
///
/// ```rust
/// use botwire_core::ResponseEnvelope;
///
/// let ok: ResponseEnvelope<i64> = ResponseEnvelope::success(7);
/// assert_eq!(ok.into_result().unwrap(), 7);
///
/// let failed: ResponseEnvelope<i64> = ResponseEnvelope::failure(Some(400), "Bad Request");
/// assert!(failed.into_result().unwrap_err().is_remote_rejected());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    /// Whether the remote side accepted the request
    ///
    /// Read from `success` or `ok`; an answer carrying both is malformed.
    #[serde(alias = "ok")]
    pub success: bool,

    /// The typed result, present only on success
    ///
    /// A JSON `null` is treated the same as an absent field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,

    /// Remote error code, present on most failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i32>,

    /// Human-readable failure description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Extra hints attached to some failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ResponseParameters>,
}

impl<T> ResponseEnvelope<T> {
    /// Create a success envelope carrying `result`
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            error_code: None,
            description: None,
            parameters: None,
        }
    }

    /// Create a failure envelope
    pub fn failure(error_code: Option<i32>, description: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error_code,
            description: Some(description.into()),
            parameters: None,
        }
    }

    /// Check the envelope invariants and unwrap the outcome
    ///
    /// - success with a result → `Ok(result)`
    /// - success without a result → `Error::Deserialization`
    /// - failure with a description → `Error::RemoteRejected`, fields verbatim
    /// - failure without a description → `Error::Deserialization`
    pub fn into_result(self) -> crate::Result<T> {
        if self.success {
            return self
                .result
                .ok_or_else(|| crate::Error::malformed("Success envelope is missing its result"));
        }

        let description = self.description.ok_or_else(|| {
            crate::Error::malformed(match self.error_code {
                Some(code) => {
                    format!("Failure envelope (code {}) is missing its description", code)
                }
                None => "Failure envelope is missing its description".to_string(),
            })
        })?;

        Err(crate::Error::RemoteRejected(crate::ApiError {
            error_code: self.error_code,
            description,
            parameters: self.parameters,
        }))
    }
}

/// Hints the remote side attaches to some failures
///
/// Only carried through to the caller; nothing in this crate acts on them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseParameters {
    /// Flood control: seconds to wait before the request may be repeated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,

    /// The group was migrated to a supergroup with this identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrate_to_chat_id: Option<i64>,
}

/// An incoming event record
///
/// Apart from `update_id`, the shape of an update is none of this crate's
/// business: every other field is kept verbatim in `payload` and written back
/// out unchanged.
///
/// ```rust
/// use botwire_core::Update;
///
/// let update: Update = serde_json::from_str(
///     r#"{"update_id": 10, "message": {"text": "hi"}}"#,
/// ).unwrap();
/// assert_eq!(update.update_id, 10);
/// assert_eq!(update.kind(), Some("message"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    /// Monotonic identifier assigned by the remote side
    pub update_id: i64,

    /// All remaining fields, untouched
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Update {
    /// Name of the first payload field, which is the update's type
    /// ("message", "callback_query", ...) on the production platform
    pub fn kind(&self) -> Option<&str> {
        self.payload.keys().next().map(String::as_str)
    }
}

/// Offset that confirms every update in `updates`
///
/// An update counts as confirmed once `getUpdates` is called with an offset
/// greater than its `update_id`. Returns `None` for an empty batch.
pub fn next_offset(updates: &[Update]) -> Option<i64> {
    updates
        .iter()
        .map(|u| u.update_id)
        .max()
        .map(|id| id.saturating_add(1))
}
