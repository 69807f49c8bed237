//! Codec for request parameters and response envelopes
//!
//! This module is the only place where raw answer text is turned into typed
//! results. Every method's `deserialize_response` ends up in
//! [`decode_envelope`], so the envelope rules are implemented exactly once:
//!
//! 1. Parse the text as `ResponseEnvelope<T>`; a parse fault becomes
//!    `Error::Deserialization` wrapping the serde_json error
//! 2. `success=true` returns the result, or `Error::Deserialization` when the
//!    result is missing
//! 3. `success=false` becomes `Error::RemoteRejected` with code and
//!    description untouched
//!
//! Nothing here retries or interprets remote failures.
//!
//! # Examples
//!
//! ```rust
//! use botwire_core::codec;
//!
//! let updates: Vec<serde_json::Value> =
//!     codec::decode_envelope(r#"{"success":true,"result":[]}"#).unwrap();
//! assert!(updates.is_empty());
//!
//! let error = codec::decode_envelope::<Vec<serde_json::Value>>(
//!     r#"{"success":false,"error_code":429,"description":"rate limited"}"#,
//! ).unwrap_err();
//! assert_eq!(error.error_code(), Some(429));
//! ```

use crate::error::{Error, Result};
use crate::params::Parameters;
use crate::types::ResponseEnvelope;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Encode any serializable value to a JSON string
///
/// # Errors
///
/// Returns `Error::Deserialization` wrapping the serde_json fault if the value
/// cannot be represented as JSON (for instance a map with non-string keys).
pub fn encode<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::parse("Unable to encode value", e))
}

/// Encode a parameter set as a JSON object
///
/// `Parameters` only ever holds JSON values, so in practice this never fails;
/// it still returns `Result` to keep every codec entry point uniform.
pub fn encode_parameters(params: &Parameters) -> Result<String> {
    encode(params)
}

/// Decode a JSON string directly into `T`, without envelope handling
///
/// # Errors
///
/// Returns `Error::Deserialization` if the text is not valid JSON for `T`.
pub fn decode_as<'de, T: Deserialize<'de>>(data: &'de str) -> Result<T> {
    serde_json::from_str(data).map_err(|e| Error::parse("Unable to decode value", e))
}

/// Decode the raw envelope without checking its invariants
///
/// Useful for diagnostics; method calls go through [`decode_envelope`].
pub fn decode_raw_envelope<T: DeserializeOwned>(raw: &str) -> Result<ResponseEnvelope<T>> {
    serde_json::from_str(raw).map_err(|e| Error::parse("Unable to deserialize response", e))
}

/// Parse a raw answer into the typed result of a method
///
/// The type parameter `T` is the method's result type; it is the only thing
/// that differs between methods.
///
/// # Errors
///
/// - `Error::Deserialization` if `raw` is not a well-formed envelope for `T`,
///   or if a success envelope has no result (or a failure envelope has no
///   description)
/// - `Error::RemoteRejected` if the envelope reports failure
pub fn decode_envelope<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let envelope = decode_raw_envelope::<T>(raw).map_err(|e| {
        tracing::debug!(error = %e, raw_len = raw.len(), "Failed to parse response envelope");
        e
    })?;

    if !envelope.success {
        tracing::debug!(
            error_code = ?envelope.error_code,
            description = ?envelope.description,
            "Response envelope reports failure"
        );
    }

    envelope.into_result()
}
