//! In-memory store for the canonical transaction list.
//!
//! The list is held as an immutable `Arc<Vec<_>>` snapshot that writers replace whole under a
//! single write lock. Readers clone the `Arc` and always see a complete, sorted list; the
//! cleared-then-refilled intermediate state of a reconciliation is never visible.
//!
//! Alongside the list the store keeps a confirmation index (`hash -> confirmations`). It grows
//! with every record written and is not reset by [`TransactionListStore::clear`], so
//! confirmation counts survive account scope switches.
//!
//! Every fetch and every clear takes a generation from the store. A reconciled batch is
//! written only while its generation is still the latest one handed out, checked under the
//! same write lock that `clear` bumps the generation under.

use crate::transaction::TransactionRecord;
use crate::wallet::sync::reconcile::{ReconcileStats, canonicalize, reconcile};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Shared snapshot of the canonical list.
pub type TransactionSnapshot = Arc<Vec<TransactionRecord>>;

#[derive(Debug, Default)]
struct StoreState {
	list: TransactionSnapshot,
	confirmations: HashMap<String, u64>,
	/// Generation of the last reconciliation applied
	applied_generation: u64,
}

impl StoreState {
	fn index(&mut self, records: &[TransactionRecord]) {
		for record in records {
			self.confirmations
				.insert(record.hash.clone(), record.confirmations);
		}
	}
}

/// A reconciliation that was written to the store.
#[derive(Debug, Clone)]
pub struct AppliedBatch {
	pub list: TransactionSnapshot,
	pub stats: ReconcileStats,
}

/// Store for the canonical transaction list and the confirmation index.
#[derive(Debug, Default)]
pub struct TransactionListStore {
	state: RwLock<StoreState>,
	/// Generation handed to the most recently started fetch or clear
	latest_generation: AtomicU64,
}

impl TransactionListStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Current canonical snapshot.
	pub fn list(&self) -> TransactionSnapshot {
		self.state.read().list.clone()
	}

	/// Hand out the generation for a fetch that is about to start.
	pub fn begin_generation(&self) -> u64 {
		self.latest_generation.fetch_add(1, Ordering::SeqCst) + 1
	}

	/// Empty the list and return the clear's generation.
	///
	/// Batches of fetches started before the clear can no longer be applied. The
	/// confirmation index is left untouched.
	pub fn clear(&self) -> u64 {
		let mut state = self.state.write();
		let generation = self.begin_generation();
		state.list = Arc::new(Vec::new());
		state.applied_generation = generation;
		generation
	}

	/// Replace the contents with `records`, deduplicated by hash and sorted newest first.
	pub fn insert_batch(&self, records: Vec<TransactionRecord>) -> TransactionSnapshot {
		let (records, duplicates) = canonicalize(records);
		if duplicates > 0 {
			debug!("Collapsed {} duplicate records on insert", duplicates);
		}

		let mut state = self.state.write();
		state.index(&records);
		state.list = Arc::new(records);
		state.list.clone()
	}

	/// Insert one record at its sorted position without a fetch cycle.
	///
	/// A record already cached under the same hash is replaced.
	pub fn insert_single_sorted(&self, record: TransactionRecord) -> TransactionSnapshot {
		let mut state = self.state.write();
		state
			.confirmations
			.insert(record.hash.clone(), record.confirmations);

		let mut list: Vec<TransactionRecord> = state
			.list
			.iter()
			.filter(|r| r.hash != record.hash)
			.cloned()
			.collect();
		let idx = list.partition_point(|r| r.time >= record.time);
		list.insert(idx, record);

		state.list = Arc::new(list);
		state.list.clone()
	}

	/// Reconcile `fresh` against the current list and swap in the result, in one critical
	/// section.
	///
	/// Returns `None` without touching the store if a newer fetch or clear has started since
	/// `generation` was handed out, or if a generation at or above it was already applied.
	pub fn apply_reconciled(
		&self,
		generation: u64,
		fresh: Vec<TransactionRecord>,
	) -> Option<AppliedBatch> {
		let mut state = self.state.write();
		let latest = self.latest_generation.load(Ordering::SeqCst);
		if generation != latest || generation <= state.applied_generation {
			debug!(
				"Discarding generation {} (latest {}, applied {})",
				generation, latest, state.applied_generation
			);
			return None;
		}

		let outcome = reconcile(&state.list, fresh);
		state.index(&outcome.records);
		state.list = Arc::new(outcome.records);
		state.applied_generation = generation;

		Some(AppliedBatch {
			list: state.list.clone(),
			stats: outcome.stats,
		})
	}

	/// Copy of the confirmation index.
	pub fn confirmation_index(&self) -> HashMap<String, u64> {
		self.state.read().confirmations.clone()
	}

	#[cfg(test)]
	fn applied_generation(&self) -> u64 {
		self.state.read().applied_generation
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::transaction::{AccountDetails, Direction, LedgerDetails};

	fn tx(hash: &str, time: u64, confirmations: u64) -> TransactionRecord {
		TransactionRecord::new(
			hash,
			time,
			LedgerDetails::Account(AccountDetails {
				direction: Direction::Sent,
				from: "0xown".to_string(),
				to: "0xother".to_string(),
				value_wei: 1,
				fee_wei: 0,
			}),
		)
		.with_confirmations(confirmations)
	}

	fn assert_sorted(list: &[TransactionRecord]) {
		for pair in list.windows(2) {
			assert!(pair[0].time >= pair[1].time, "{:?}", list);
		}
	}

	#[test]
	fn insert_batch_sorts_and_indexes() {
		let store = TransactionListStore::new();
		let list = store.insert_batch(vec![tx("a", 1, 9), tx("b", 3, 2), tx("c", 2, 4)]);

		assert_sorted(&list);
		assert_eq!(list[0].hash, "b");
		assert_eq!(store.confirmation_index().get("a"), Some(&9));
	}

	#[test]
	fn insert_single_keeps_order_and_uniqueness() {
		let store = TransactionListStore::new();
		store.insert_batch(vec![tx("a", 30, 1), tx("b", 10, 1)]);

		let list = store.insert_single_sorted(tx("n", 20, 0).with_pending(true));
		assert_eq!(
			list.iter().map(|r| r.hash.as_str()).collect::<Vec<_>>(),
			vec!["a", "n", "b"]
		);

		let list = store.insert_single_sorted(tx("n", 40, 0));
		assert_eq!(list.len(), 3);
		assert_eq!(list[0].hash, "n");
		assert_sorted(&list);
	}

	#[test]
	fn clear_keeps_confirmation_index() {
		let store = TransactionListStore::new();
		store.insert_batch(vec![tx("a", 1, 7)]);
		store.clear();

		assert!(store.list().is_empty());
		assert_eq!(store.confirmation_index().get("a"), Some(&7));
	}

	#[test]
	fn snapshots_are_not_affected_by_later_writes() {
		let store = TransactionListStore::new();
		let before = store.insert_batch(vec![tx("a", 1, 1)]);
		store.clear();
		assert_eq!(before.len(), 1);
	}

	#[test]
	fn older_generation_is_not_applied() {
		let store = TransactionListStore::new();
		let old = store.begin_generation();
		let new = store.begin_generation();
		assert!(store.apply_reconciled(new, vec![tx("new", 2, 1)]).is_some());
		assert!(store.apply_reconciled(old, vec![tx("old", 1, 1)]).is_none());

		assert_eq!(store.list()[0].hash, "new");
		assert_eq!(store.applied_generation(), new);
	}

	#[test]
	fn generation_is_not_applied_twice() {
		let store = TransactionListStore::new();
		let generation = store.begin_generation();
		assert!(store.apply_reconciled(generation, vec![tx("a", 1, 1)]).is_some());
		assert!(store.apply_reconciled(generation, vec![tx("b", 2, 1)]).is_none());
		assert_eq!(store.list()[0].hash, "a");
	}

	#[test]
	fn clear_invalidates_fetches_started_before_it() {
		let store = TransactionListStore::new();
		let in_flight = store.begin_generation();
		let cleared = store.clear();

		assert!(cleared > in_flight);
		assert!(store.apply_reconciled(in_flight, vec![tx("stale", 1, 1)]).is_none());
		assert!(store.list().is_empty());
		assert_eq!(store.applied_generation(), cleared);

		let next = store.begin_generation();
		assert!(store.apply_reconciled(next, vec![tx("fresh", 2, 1)]).is_some());
		assert_eq!(store.list()[0].hash, "fresh");
	}
}
