//! Method contract, response envelope and error taxonomy for bot API clients
//!
//! Every remote operation against a bot platform's HTTP+JSON API is a typed
//! value implementing [`BotMethod`]. A method knows its wire path, builds its
//! own parameters, validates itself before dispatch, and parses the generic
//! response envelope into its own result type or a classified [`Error`].
//!
//! - **Types**: [`ResponseEnvelope`], [`ResponseParameters`], [`Update`]
//! - **Parameters**: the ordered wire parameter set of one request
//! - **Codec**: the single envelope parsing routine shared by every method
//! - **Method**: the [`BotMethod`] trait and reusable [`validation`] rules
//! - **Methods**: concrete operations, currently [`GetUpdates`]
//! - **Error handling**: [`Error`], [`ApiError`], [`ValidationError`]
//! - **Observability**: tracing and OpenTelemetry setup
//!
//! # Architecture
//!
//! The crate is transport-agnostic: it never opens a connection. The
//! `botwire-client` crate supplies a dispatcher that runs a method through
//! validate → send → parse over a pluggable transport.
//!
//! # Example
//!
//! ```rust
//! use botwire_core::{BotMethod, GetUpdates};
//!
//! let method = GetUpdates::builder().offset(-5).limit(10).build();
//! method.validate().unwrap();
//!
//! let params = method.parameters();
//! assert_eq!(params.len(), 2);
//!
//! let updates = method
//!     .deserialize_response(r#"{"success":true,"result":[{"update_id":1,"message":{}}]}"#)
//!     .unwrap();
//! assert_eq!(updates[0].update_id, 1);
//! ```

pub mod codec;
pub mod error;
pub mod method;
pub mod methods;
pub mod observability;
pub mod params;
pub mod types;
pub mod validation;

// Re-export the most commonly used types for convenience
pub use error::{ApiError, Error, Result, ValidationError};
pub use method::BotMethod;
pub use methods::{GetUpdates, GetUpdatesBuilder};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use params::Parameters;
pub use types::{next_offset, ResponseEnvelope, ResponseParameters, Update};
