//! Event system for the transaction list.
//!
//! The manager emits a [`ListEvent`] whenever a reconciliation cycle ends, whatever the
//! outcome, and whenever the list is changed outside a cycle. Handlers registered with the
//! [`EventDispatcher`] observe these events to refresh views, record diagnostics or schedule
//! retries, without the manager knowing about them.

use crate::wallet::TxListError;
use crate::wallet::scope::AccountScope;
use crate::wallet::sync::reconcile::ReconcileStats;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Events that occur while maintaining the transaction list
#[derive(Debug, Clone)]
pub enum ListEvent {
    /// A fetched batch was reconciled into the list
    Reconciled {
        scope: AccountScope,
        generation: u64,
        stats: ReconcileStats,
        list_len: usize,
    },
    /// The upstream fetch failed; the list was left as it was
    FetchFailed {
        scope: AccountScope,
        generation: u64,
        error: String,
    },
    /// A batch arrived after a newer fetch started and was discarded
    Superseded {
        scope: AccountScope,
        generation: u64,
    },
    /// A record was inserted without a fetch cycle
    OptimisticInsert { hash: String },
    /// The list was cleared
    Cleared,
}

/// Trait for handling list events.
#[async_trait::async_trait]
pub trait ListEventHandler: Send + Sync {
    /// Handle an event. Failures are logged by the dispatcher and otherwise ignored.
    async fn handle(&self, event: &ListEvent) -> Result<(), TxListError>;

    /// Get the name of this handler for logging and diagnostics.
    fn name(&self) -> &'static str;
}

/// Event dispatcher that manages multiple event handlers.
///
/// Handlers are called in registration order.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn ListEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn register_handler(&mut self, handler: Arc<dyn ListEventHandler>) {
        self.handlers.push(handler);
    }

    #[cfg(test)]
    fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Dispatch an event to all registered handlers.
    ///
    /// Errors from handlers are logged, but do not stop other handlers from running.
    pub async fn dispatch(&self, event: &ListEvent) {
        for handler in &self.handlers {
            if let Err(e) = handler.handle(event).await {
                tracing::error!("Handler {} failed to process event: {}", handler.name(), e);
            }
        }
    }
}

/// Handler that writes every event to the log.
pub struct LoggingEventHandler;

#[async_trait::async_trait]
impl ListEventHandler for LoggingEventHandler {
    async fn handle(&self, event: &ListEvent) -> Result<(), TxListError> {
        match event {
            ListEvent::Reconciled {
                scope,
                generation,
                stats,
                list_len,
            } => info!(
                "Reconciled {} (generation {}): {}, {} records listed",
                scope,
                generation,
                stats.summary(),
                list_len
            ),
            ListEvent::FetchFailed {
                scope,
                generation,
                error,
            } => warn!(
                "Fetch for {} (generation {}) failed, keeping cached list: {}",
                scope, generation, error
            ),
            ListEvent::Superseded { scope, generation } => debug!(
                "Fetch for {} (generation {}) superseded by a newer fetch",
                scope, generation
            ),
            ListEvent::OptimisticInsert { hash } => debug!("Inserted {} optimistically", hash),
            ListEvent::Cleared => debug!("Transaction list cleared"),
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "LoggingEventHandler"
    }
}
