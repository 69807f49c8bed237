//! Concrete bot API methods
//!
//! Each submodule holds one operation: its fields, wire keys, builder and
//! [`BotMethod`](crate::BotMethod) implementation.

pub mod get_updates;

pub use get_updates::{GetUpdates, GetUpdatesBuilder};
