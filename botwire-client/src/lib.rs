//! Dispatcher and HTTP transport for botwire bot API methods
//!
//! This crate sends [`BotMethod`](botwire_core::BotMethod) values to the bot
//! API and hands back their typed results.
//!
//! # Core Features
//!
//! - **Dispatcher**: validate → send → parse, in that order, for any method
//! - **Transport seam**: the [`Transport`] trait, with an HTTPS implementation
//! - **Long-poll check**: warns when a hold would outlast the transport timeout
//! - **Observability**: tracing spans per call, OpenTelemetry metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use botwire_client::BotClient;
//! use botwire_core::{next_offset, GetUpdates};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BotClient::builder("123456:ABC-DEF").build()?;
//!
//!     let method = GetUpdates::builder().timeout(30).allowed_update("message").build();
//!     let updates = client.get_updates(&method).await?;
//!
//!     for update in &updates {
//!         println!("{} {:?}", update.update_id, update.kind());
//!     }
//!     println!("confirm with offset {:?}", next_offset(&updates));
//!     Ok(())
//! }
//! ```

mod client;
mod client_builder;
mod metrics;
mod transport;

pub use client::BotClient;
pub use client_builder::{ClientBuilder, DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT};
pub use metrics::ClientMetrics;
pub use transport::{BuildError, HttpTransport, Transport};
