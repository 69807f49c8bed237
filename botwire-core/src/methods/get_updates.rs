//! `getUpdates`: receive incoming updates by long polling

use crate::error::Result;
use crate::method::BotMethod;
use crate::params::Parameters;
use crate::types::Update;
use std::time::Duration;

/// Wire key of [`GetUpdates::offset`]
pub const OFFSET_FIELD: &str = "offset";
/// Wire key of [`GetUpdates::limit`]
pub const LIMIT_FIELD: &str = "limit";
/// Wire key of [`GetUpdates::timeout`]
pub const TIMEOUT_FIELD: &str = "timeout";
/// Wire key of [`GetUpdates::allowed_updates`]
pub const ALLOWED_UPDATES_FIELD: &str = "allowed_updates";

/// Receive incoming updates using long polling
///
/// Every field is optional and independent, so any instance is valid.
///
/// # Examples
///
/// ```rust
/// use botwire_core::{BotMethod, GetUpdates};
///
/// let method = GetUpdates::builder()
///     .offset(42)
///     .timeout(30)
///     .allowed_update("message")
///     .allowed_update("callback_query")
///     .build();
///
/// assert_eq!(method.path(), "getupdates");
/// assert_eq!(
///     serde_json::to_string(&method.parameters()).unwrap(),
///     r#"{"offset":42,"timeout":30,"allowed_updates":["message","callback_query"]}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetUpdates {
    /// Identifier of the first update to return
    ///
    /// Must be one greater than the highest `update_id` already received;
    /// calling with such an offset confirms every earlier update. A negative
    /// value returns only the last `|offset|` pending updates and forgets the
    /// rest. Unset: start from the earliest unconfirmed update. Same width
    /// as [`Update::update_id`], so [`next_offset`](crate::next_offset) feeds
    /// it directly.
    pub offset: Option<i64>,

    /// Maximum number of updates to return
    ///
    /// The remote side accepts 1 to 100 and clamps anything else; this value
    /// is sent as is.
    pub limit: Option<i32>,

    /// Long-poll hold in seconds
    ///
    /// `0` answers immediately (short polling). A positive value holds the
    /// request open until an update arrives or the time runs out.
    pub timeout: Option<i32>,

    /// Update types to receive
    ///
    /// - `None`: keep the filter stored by the remote side
    /// - `Some(vec![])`: receive every type
    /// - `Some(kinds)`: replace the stored filter with `kinds`
    pub allowed_updates: Option<Vec<String>>,
}

impl GetUpdates {
    /// Create a request with every field unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a request
    pub fn builder() -> GetUpdatesBuilder {
        GetUpdatesBuilder::default()
    }

    /// Rebuild a request from its wire parameters
    ///
    /// Absent keys become unset fields, an empty array stays an empty filter.
    /// Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// `Error::Deserialization` if a known key holds a value of the wrong type.
    pub fn from_parameters(params: &Parameters) -> Result<Self> {
        Ok(Self {
            offset: params.get_as(OFFSET_FIELD)?,
            limit: params.get_as(LIMIT_FIELD)?,
            timeout: params.get_as(TIMEOUT_FIELD)?,
            allowed_updates: params.get_as(ALLOWED_UPDATES_FIELD)?,
        })
    }
}

impl BotMethod for GetUpdates {
    type Output = Vec<Update>;
    const PATH: &'static str = "getupdates";

    fn parameters(&self) -> Parameters {
        let mut params = Parameters::new();
        params.insert_optional(OFFSET_FIELD, self.offset);
        params.insert_optional(LIMIT_FIELD, self.limit);
        params.insert_optional(TIMEOUT_FIELD, self.timeout);
        params.insert_optional(ALLOWED_UPDATES_FIELD, self.allowed_updates.clone());
        params
    }

    fn long_poll_timeout(&self) -> Option<Duration> {
        match self.timeout {
            Some(secs) if secs > 0 => Some(Duration::from_secs(secs as u64)),
            _ => None,
        }
    }
}

/// Builder for [`GetUpdates`]
#[derive(Debug, Clone, Default)]
pub struct GetUpdatesBuilder {
    inner: GetUpdates,
}

impl GetUpdatesBuilder {
    /// Set the first update identifier to return
    pub fn offset(mut self, offset: i64) -> Self {
        self.inner.offset = Some(offset);
        self
    }

    /// Set the maximum number of updates
    pub fn limit(mut self, limit: i32) -> Self {
        self.inner.limit = Some(limit);
        self
    }

    /// Set the long-poll hold in seconds
    pub fn timeout(mut self, timeout: i32) -> Self {
        self.inner.timeout = Some(timeout);
        self
    }

    /// Replace the update filter
    ///
    /// An empty iterator sets the filter explicitly empty ("every type").
    pub fn allowed_updates<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.allowed_updates = Some(kinds.into_iter().map(Into::into).collect());
        self
    }

    /// Append one update type to the filter
    pub fn allowed_update(mut self, kind: impl Into<String>) -> Self {
        self.inner
            .allowed_updates
            .get_or_insert_with(Vec::new)
            .push(kind.into());
        self
    }

    /// Set the filter explicitly empty, so every update type is delivered
    pub fn clear_allowed_updates(mut self) -> Self {
        self.inner.allowed_updates = Some(Vec::new());
        self
    }

    /// Finish building
    pub fn build(self) -> GetUpdates {
        self.inner
    }
}
