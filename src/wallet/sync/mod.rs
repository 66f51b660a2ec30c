//! Transaction List Synchronization Module
//!
//! This module holds the core that keeps the canonical transaction list consistent across
//! successive fetches:
//!
//! - `manager`: The entry point. Runs reconciliation cycles and exposes the list operations.
//! - `selector`: Maps an account scope to the ledger call that answers it.
//! - `reconcile`: Merges a fetched batch with the cached pending transactions.
//! - `store`: Holds the canonical snapshot and the confirmation index.
//! - `events`: Event types and handlers notified of list changes.

/// Event system for observers of the list
pub mod events;
/// Application-facing coordinator
pub mod manager;
/// Pending-aware merge of fetched batches
pub mod reconcile;
/// Scope to ledger dispatch
pub mod selector;
/// Snapshot store for the canonical list
pub mod store;

pub use manager::*;
