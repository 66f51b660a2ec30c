//! Transaction list manager, the application-facing entry point.
//!
//! This module defines the `TransactionListManager`, which ties together the scope selector,
//! the reconciliation engine and the list store. A fetch runs one reconciliation cycle:
//! the selector dispatches the scope to its ledger, the fetched batch is reconciled with the
//! cached pending records, and the result is swapped into the store.
//!
//! The manager is responsible for:
//! - Absorbing fetch failures: the cached list is kept and the cycle yields an empty result
//! - Discarding batches of fetches overtaken by a newer fetch or by `clear`
//! - Optimistic insertion of just-broadcast transactions
//! - Lookups, balances and the confirmation index
//! - Dispatching a `ListEvent` for every change

use crate::ledger::{AccountLedger, UtxoLedger};
use crate::transaction::TransactionRecord;
use crate::wallet::scope::AccountScope;
use crate::wallet::sync::{
    events::{EventDispatcher, ListEvent, ListEventHandler, LoggingEventHandler},
    selector::ScopeSelector,
    store::{TransactionListStore, TransactionSnapshot},
};
use crate::wallet::{PageWindow, TxListError};

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maintains the canonical transaction list for the selected account scope.
///
/// Share it behind an `Arc`; every method takes `&self`.
pub struct TransactionListManager {
    selector: ScopeSelector,
    store: TransactionListStore,
    dispatcher: EventDispatcher,
}

impl TransactionListManager {
    /// Create a manager over the given selector, with a logging event handler registered.
    pub fn new(selector: ScopeSelector) -> Self {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register_handler(Arc::new(LoggingEventHandler));

        Self {
            selector,
            store: TransactionListStore::new(),
            dispatcher,
        }
    }

    pub fn with_ledgers(
        utxo_ledger: Arc<dyn UtxoLedger>,
        account_ledger: Arc<dyn AccountLedger>,
    ) -> Self {
        Self::new(ScopeSelector::new(utxo_ledger, account_ledger))
    }

    /// Register an additional event handler. Handlers run in registration order.
    pub fn register_handler(&mut self, handler: Arc<dyn ListEventHandler>) {
        self.dispatcher.register_handler(handler);
    }

    /// Run one reconciliation cycle for `scope` and return the resulting canonical list.
    ///
    /// A failed upstream fetch leaves the cached list untouched and yields an empty list.
    ///
    /// # Errors
    /// `TxListError::Superseded` if another fetch or a `clear` started while this fetch was
    /// in flight. Its batch is discarded and the cache keeps the newer state.
    pub async fn fetch(
        &self,
        scope: &AccountScope,
        window: PageWindow,
    ) -> Result<Vec<TransactionRecord>, TxListError> {
        let generation = self.store.begin_generation();
        info!(
            "Fetching transactions for {} (generation {}, limit {}, offset {})",
            scope, generation, window.limit, window.offset
        );

        let batch = match self.selector.fetch_batch(scope, window).await {
            Ok(batch) => batch,
            Err(e) => {
                self.dispatcher
                    .dispatch(&ListEvent::FetchFailed {
                        scope: scope.clone(),
                        generation,
                        error: e.to_string(),
                    })
                    .await;
                return Ok(Vec::new());
            }
        };

        match self.store.apply_reconciled(generation, batch) {
            Some(applied) => {
                self.dispatcher
                    .dispatch(&ListEvent::Reconciled {
                        scope: scope.clone(),
                        generation,
                        stats: applied.stats,
                        list_len: applied.list.len(),
                    })
                    .await;
                Ok(applied.list.as_ref().clone())
            }
            None => {
                self.dispatcher
                    .dispatch(&ListEvent::Superseded {
                        scope: scope.clone(),
                        generation,
                    })
                    .await;
                Err(TxListError::Superseded { generation })
            }
        }
    }

    /// Current canonical snapshot.
    pub fn current_list(&self) -> TransactionSnapshot {
        self.store.list()
    }

    /// Empty the list, typically before switching scope.
    ///
    /// Fetches still in flight are invalidated. The confirmation index is kept.
    pub async fn clear(&self) {
        let generation = self.store.clear();
        debug!("Cleared list at generation {}", generation);
        self.dispatcher.dispatch(&ListEvent::Cleared).await;
    }

    /// Insert a just-broadcast transaction at its sorted position and return the new list.
    pub async fn insert_optimistic(&self, record: TransactionRecord) -> Vec<TransactionRecord> {
        let hash = record.hash.clone();
        let list = self.store.insert_single_sorted(record);
        self.dispatcher
            .dispatch(&ListEvent::OptimisticInsert { hash })
            .await;
        list.as_ref().clone()
    }

    /// UTXO balance of `scope`, in satoshis.
    ///
    /// # Errors
    /// `TxListError::Usage` for the account ledger scope; `TxListError::Fetch` if the ledger
    /// call fails. The list is never touched.
    pub async fn balance(&self, scope: &AccountScope) -> Result<u64, TxListError> {
        self.selector.balance(scope).await.inspect_err(|e| {
            if !matches!(e, TxListError::Usage(_)) {
                warn!("Balance lookup for {} failed: {}", scope, e);
            }
        })
    }

    /// Find a transaction of the current list by hash.
    ///
    /// # Errors
    /// `TxListError::NotFound` if the current scope's list has no such transaction.
    pub async fn find_by_hash(&self, hash: &str) -> Result<TransactionRecord, TxListError> {
        self.store
            .list()
            .iter()
            .find(|record| record.hash == hash)
            .cloned()
            .ok_or_else(|| TxListError::NotFound {
                hash: hash.to_string(),
            })
    }

    /// Confirmations of every transaction seen so far, across scope switches.
    pub fn confirmation_index(&self) -> HashMap<String, u64> {
        self.store.confirmation_index()
    }
}
