//! Bot API dispatcher
//!
//! [`BotClient`] runs a method through its fixed call sequence:
//!
//! 1. **Validate**: a failure is returned at once; the transport is never
//!    touched
//! 2. **Send**: the method's parameters go to the method's own path
//! 3. **Parse**: the raw answer goes back to the method, which turns it into
//!    its result or a classified error
//!
//! Every outcome is passed to the caller unchanged. The client does not retry,
//! does not back off on flood-control answers and does not loop over updates;
//! those decisions belong to the caller.
//!
//! # Cloning
//!
//! `BotClient` is cheaply cloneable using `Arc` internally. All clones share
//! the same transport and metrics, and can be used from many tasks at once.

use crate::transport::Transport;
use crate::{ClientBuilder, ClientMetrics};
use botwire_core::{next_offset, BotMethod, Error, GetUpdates, Result, Update};
use std::sync::Arc;
use std::time::Instant;

/// Dispatcher for bot API methods
#[derive(Clone)]
pub struct BotClient {
    /// Transport used for every call
    pub(crate) transport: Arc<dyn Transport>,
    /// Metrics for observability
    pub(crate) metrics: Option<Arc<ClientMetrics>>,
}

impl BotClient {
    /// Create a client over an existing transport, without metrics
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            metrics: None,
        }
    }

    /// Start configuring an HTTP client for the bot identified by `token`
    pub fn builder(token: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(token)
    }

    /// Validate, send and parse a method call
    ///
    /// # Errors
    ///
    /// - `Error::Validation`: the method failed its own checks; nothing was sent
    /// - `Error::Transport`: the transport could not deliver the call
    /// - `Error::Deserialization`: the answer was not a well-formed envelope
    /// - `Error::RemoteRejected`: the remote side refused the call
    #[tracing::instrument(skip_all, fields(path = M::PATH))]
    pub async fn execute<M: BotMethod>(&self, method: &M) -> Result<M::Output> {
        let path = method.path();

        if let Err(violation) = method.validate() {
            tracing::warn!(
                field = %violation.field,
                reason = %violation.reason,
                "Method failed validation, not sent"
            );
            if let Some(ref m) = self.metrics {
                m.record_rejected(path);
                m.record_error(path, "validation");
            }
            return Err(Error::Validation(violation));
        }

        self.check_long_poll(method);

        let params = method.parameters();
        tracing::debug!(param_count = params.len(), "Sending request");

        let start = Instant::now();
        let outcome = match self.transport.send(path, &params).await {
            Ok(raw) => method.deserialize_response(&raw),
            Err(e) => Err(e),
        };
        let duration = start.elapsed().as_secs_f64();

        match &outcome {
            Ok(_) => {
                if let Some(ref m) = self.metrics {
                    m.record_request(path, "success", duration);
                }
                tracing::debug!(duration_secs = duration, "Request completed successfully");
            }
            Err(e) => {
                if let Some(ref m) = self.metrics {
                    m.record_request(path, e.kind(), duration);
                    m.record_error(path, e.kind());
                }
                match e {
                    Error::RemoteRejected(api) => tracing::warn!(
                        error_code = ?api.error_code,
                        description = %api.description,
                        retry_after = ?e.retry_after(),
                        "Request rejected by remote side"
                    ),
                    _ => tracing::error!(error = %e, kind = e.kind(), "Request failed"),
                }
            }
        }

        outcome
    }

    /// Fetch pending updates
    ///
    /// Same as [`execute`](Self::execute), plus update counting in metrics.
    /// The offset that confirms the returned batch is
    /// [`next_offset`](botwire_core::next_offset) of the result.
    pub async fn get_updates(&self, method: &GetUpdates) -> Result<Vec<Update>> {
        let updates = self.execute(method).await?;

        if let Some(ref m) = self.metrics {
            m.record_updates(updates.len() as u64);
        }
        tracing::debug!(
            count = updates.len(),
            next_offset = ?next_offset(&updates),
            "Updates received"
        );

        Ok(updates)
    }

    /// Warn when the transport would give up before the remote side answers
    fn check_long_poll<M: BotMethod>(&self, method: &M) {
        if let (Some(hold), Some(read_timeout)) =
            (method.long_poll_timeout(), self.transport.read_timeout())
        {
            if read_timeout <= hold {
                tracing::warn!(
                    hold_secs = hold.as_secs(),
                    read_timeout_secs = read_timeout.as_secs_f64(),
                    "Long poll outlasts the transport timeout; the call will likely time out"
                );
            }
        }
    }
}

impl std::fmt::Debug for BotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotClient")
            .field("read_timeout", &self.transport.read_timeout())
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}
