//! The method contract
//!
//! A method is a typed description of one remote operation. It knows:
//!
//! - its wire path ([`BotMethod::PATH`])
//! - how to turn its fields into wire parameters ([`BotMethod::parameters`])
//! - which local preconditions must hold before it is sent
//!   ([`BotMethod::validate`])
//! - what its result looks like ([`BotMethod::Output`]), and therefore how to
//!   read the answer ([`BotMethod::deserialize_response`])
//!
//! # Call order
//!
//! A dispatcher drives every method through the same fixed sequence:
//!
//! 1. `validate()`: on failure, stop; nothing is sent
//! 2. `parameters()` and `path()`: hand both to the transport
//! 3. `deserialize_response(raw)`: only once a raw answer exists
//!
//! Methods are plain values. They hold no connection, no shared state and no
//! interior mutability, so any number of them can be built, validated and
//! parsed concurrently.
//!
//! # Implementing a method
//!
//! ```rust
//! use botwire_core::{validation, BotMethod, Parameters, ValidationError};
//!
//! struct SendChatAction {
//!     chat_id: Option<i64>,
//!     action: Option<String>,
//! }
//!
//! impl BotMethod for SendChatAction {
//!     type Output = bool;
//!     const PATH: &'static str = "sendchataction";
//!
//!     fn parameters(&self) -> Parameters {
//!         let mut params = Parameters::new();
//!         params.insert_optional("chat_id", self.chat_id);
//!         params.insert_optional("action", self.action.clone());
//!         params
//!     }
//!
//!     fn validate(&self) -> Result<(), ValidationError> {
//!         validation::require("chat_id", &self.chat_id)?;
//!         validation::require("action", &self.action)
//!     }
//! }
//!
//! let method = SendChatAction { chat_id: None, action: Some("typing".into()) };
//! assert_eq!(method.validate().unwrap_err().field, "chat_id");
//! assert!(method.deserialize_response(r#"{"success":true,"result":true}"#).unwrap());
//! ```

use crate::codec;
use crate::error::{Result, ValidationError};
use crate::params::Parameters;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// A typed request against the bot API
pub trait BotMethod: Send + Sync {
    /// Result type carried by a success envelope for this method
    type Output: DeserializeOwned + Send;

    /// Wire path, relative to the bot's base URL
    const PATH: &'static str;

    /// Wire path of this method
    fn path(&self) -> &'static str {
        Self::PATH
    }

    /// Build the wire parameter set
    ///
    /// Unset optional fields must be left out of the mapping, never written
    /// as `null` or as an empty value.
    fn parameters(&self) -> Parameters;

    /// Check local preconditions
    ///
    /// Must be pure: no I/O, no mutation. Returns the first violated rule.
    /// Methods without preconditions can rely on the default, which accepts
    /// every instance.
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        Ok(())
    }

    /// Parse a raw answer into this method's result
    ///
    /// The default delegates to [`codec::decode_envelope`]; methods should not
    /// need to override it.
    fn deserialize_response(&self, raw: &str) -> Result<Self::Output> {
        codec::decode_envelope::<Self::Output>(raw)
    }

    /// How long the remote side is asked to hold the request open
    ///
    /// `None` for ordinary calls. Dispatchers use this to check that their
    /// transport's read timeout outlasts the hold; it never affects what is
    /// sent.
    fn long_poll_timeout(&self) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation;
    use crate::Error;

    /// Method with one required field and two mutually exclusive ones
    struct SetPhoto {
        chat_id: Option<i64>,
        url: Option<String>,
        file_id: Option<String>,
    }

    impl BotMethod for SetPhoto {
        type Output = bool;
        const PATH: &'static str = "setphoto";

        fn parameters(&self) -> Parameters {
            let mut params = Parameters::new();
            params.insert_optional("chat_id", self.chat_id);
            params.insert_optional("url", self.url.clone());
            params.insert_optional("file_id", self.file_id.clone());
            params
        }

        fn validate(&self) -> std::result::Result<(), ValidationError> {
            validation::require("chat_id", &self.chat_id)?;
            validation::mutually_exclusive("url", &self.url, "file_id", &self.file_id)
        }
    }

    struct Ping;

    impl BotMethod for Ping {
        type Output = String;
        const PATH: &'static str = "ping";

        fn parameters(&self) -> Parameters {
            Parameters::new()
        }
    }

    #[test]
    fn test_path() {
        assert_eq!(Ping.path(), "ping");
        assert_eq!(<SetPhoto as BotMethod>::PATH, "setphoto");
    }

    #[test]
    fn test_default_validate_accepts() {
        assert!(Ping.validate().is_ok());
    }

    #[test]
    fn test_default_long_poll_timeout() {
        assert_eq!(Ping.long_poll_timeout(), None);
    }

    #[test]
    fn test_validate_missing_required_field() {
        let method = SetPhoto {
            chat_id: None,
            url: None,
            file_id: None,
        };
        assert_eq!(
            method.validate().unwrap_err(),
            ValidationError::missing("chat_id")
        );
    }

    #[test]
    fn test_validate_mutually_exclusive_fields() {
        let method = SetPhoto {
            chat_id: Some(1),
            url: Some("https://example.com/a.png".into()),
            file_id: Some("AgAD".into()),
        };
        let error = method.validate().unwrap_err();
        assert_eq!(error.field, "url, file_id");
    }

    #[test]
    fn test_validate_success() {
        let method = SetPhoto {
            chat_id: Some(1),
            url: None,
            file_id: Some("AgAD".into()),
        };
        assert!(method.validate().is_ok());
        let params = method.parameters();
        let keys: Vec<&str> = params.keys().collect();
        assert_eq!(keys, vec!["chat_id", "file_id"]);
    }

    #[test]
    fn test_deserialize_response_uses_output_type() {
        let pong = Ping
            .deserialize_response(r#"{"success":true,"result":"pong"}"#)
            .unwrap();
        assert_eq!(pong, "pong");

        // Same text, different output type: Ping expects a string
        let error = Ping
            .deserialize_response(r#"{"success":true,"result":true}"#)
            .unwrap_err();
        assert!(matches!(error, Error::Deserialization { .. }));
    }
}
