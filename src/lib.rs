//! botwire - typed bot API methods over HTTP+JSON
//!
//! This is the main convenience crate that re-exports all botwire sub-crates.
//! Use this crate if you want a single dependency that provides both the
//! method contract and the dispatcher.
//!
//! # Architecture
//!
//! botwire is organized into modular crates:
//!
//! - **botwire-core**: method contract, response envelope, error taxonomy,
//!   the `getUpdates` method, observability setup
//! - **botwire-client**: dispatcher, transport seam and HTTP transport
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use botwire::{next_offset, BotClient, GetUpdates};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BotClient::builder("123456:ABC-DEF").build()?;
//!     let mut offset = None;
//!
//!     loop {
//!         let mut builder = GetUpdates::builder().timeout(30);
//!         if let Some(next) = offset {
//!             builder = builder.offset(next);
//!         }
//!
//!         let updates = client.get_updates(&builder.build()).await?;
//!         for update in &updates {
//!             println!("update {} ({:?})", update.update_id, update.kind());
//!         }
//!         offset = next_offset(&updates).or(offset);
//!     }
//! }
//! ```
//!
//! # Calling a method by hand
//!
//! ```rust
//! use botwire::{BotMethod, Error, GetUpdates};
//!
//! let method = GetUpdates::builder().limit(10).build();
//! method.validate()?;
//!
//! let params = method.parameters();
//! assert_eq!(serde_json::to_string(&params).unwrap(), r#"{"limit":10}"#);
//!
//! let answer = r#"{"success":false,"error_code":401,"description":"Unauthorized"}"#;
//! match method.deserialize_response(answer) {
//!     Err(Error::RemoteRejected(api)) => assert_eq!(api.error_code, Some(401)),
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! # Ok::<(), botwire::ValidationError>(())
//! ```

// Re-export all public APIs from sub-crates
pub use botwire_client as client;
pub use botwire_core as core;

// Convenience re-exports of the most commonly used types
pub use botwire_client::{BotClient, ClientBuilder, HttpTransport, Transport};
pub use botwire_core::{
    next_offset, ApiError, BotMethod, Error, GetUpdates, Parameters, ResponseEnvelope, Result,
    Update, ValidationError,
};
