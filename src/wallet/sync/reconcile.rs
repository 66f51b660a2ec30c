//! Reconciliation of a freshly fetched batch with the cached list.
//!
//! The upstream query source lags behind broadcast, so a refresh may not yet mention a
//! transaction the wallet knows is pending. Pending records therefore survive a refresh until
//! a record with the same hash shows up in a fetched batch, which then supersedes them.
//! Everything else in the cached list is replaced by the batch.

use crate::transaction::TransactionRecord;
use std::collections::{HashMap, HashSet};

/// Counters describing one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
	/// Records in the fetched batch
	pub fetched: usize,
	/// Cached pending records absent from the batch and kept
	pub pending_retained: usize,
	/// Cached pending records superseded by a fetched record with the same hash
	pub pending_confirmed: usize,
	/// Records dropped because a later record had the same hash
	pub duplicates_collapsed: usize,
}

impl ReconcileStats {
	pub fn summary(&self) -> String {
		format!(
			"{} fetched, {} pending retained, {} pending confirmed{}",
			self.fetched,
			self.pending_retained,
			self.pending_confirmed,
			if self.duplicates_collapsed == 0 {
				String::new()
			} else {
				format!(", {} duplicates collapsed", self.duplicates_collapsed)
			}
		)
	}
}

/// Result of [`reconcile`]: the new canonical list and what happened to produce it.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
	pub records: Vec<TransactionRecord>,
	pub stats: ReconcileStats,
}

/// Merge `fresh` with the pending records of `current`.
///
/// Pending records of `current` whose hash does not appear in `fresh` are appended to it; the
/// combined set is then deduplicated by hash (last occurrence wins) and sorted newest first.
pub fn reconcile(current: &[TransactionRecord], fresh: Vec<TransactionRecord>) -> ReconcileOutcome {
	let fetched = fresh.len();

	let mut pending_confirmed = 0;
	let remaining_pending: Vec<TransactionRecord> = {
		let fresh_hashes: HashSet<&str> = fresh.iter().map(|r| r.hash.as_str()).collect();
		current
			.iter()
			.filter(|r| r.is_pending)
			.filter(|r| {
				let confirmed = fresh_hashes.contains(r.hash.as_str());
				if confirmed {
					pending_confirmed += 1;
				}
				!confirmed
			})
			.cloned()
			.collect()
	};
	let pending_retained = remaining_pending.len();

	let mut combined = fresh;
	combined.extend(remaining_pending);
	let (records, duplicates_collapsed) = canonicalize(combined);

	ReconcileOutcome {
		records,
		stats: ReconcileStats {
			fetched,
			pending_retained,
			pending_confirmed,
			duplicates_collapsed,
		},
	}
}

/// Deduplicate by hash and sort newest first.
///
/// A later record with an already seen hash replaces the earlier one in place. The sort is
/// stable, so records with equal times keep their relative order. Returns the number of
/// records dropped as duplicates.
pub fn canonicalize(records: Vec<TransactionRecord>) -> (Vec<TransactionRecord>, usize) {
	let mut positions: HashMap<String, usize> = HashMap::with_capacity(records.len());
	let mut unique: Vec<TransactionRecord> = Vec::with_capacity(records.len());
	let mut duplicates = 0;

	for record in records {
		match positions.get(&record.hash) {
			Some(&idx) => {
				unique[idx] = record;
				duplicates += 1;
			}
			None => {
				positions.insert(record.hash.clone(), unique.len());
				unique.push(record);
			}
		}
	}

	unique.sort_by(|a, b| b.time.cmp(&a.time));
	(unique, duplicates)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::transaction::{Direction, LedgerDetails, UtxoDetails};

	fn tx(hash: &str, time: u64, pending: bool) -> TransactionRecord {
		TransactionRecord::new(
			hash,
			time,
			LedgerDetails::Utxo(UtxoDetails {
				direction: Direction::Received,
				amount: time,
				fee: 0,
				double_spend: false,
			}),
		)
		.with_pending(pending)
	}

	fn hashes(records: &[TransactionRecord]) -> Vec<&str> {
		records.iter().map(|r| r.hash.as_str()).collect()
	}

	#[test]
	fn keeps_unseen_pending_and_drops_stale_confirmed() {
		let current = vec![tx("a", 100, false), tx("b", 50, true)];
		let fresh = vec![tx("c", 120, false), tx("a", 100, false)];

		let outcome = reconcile(&current, fresh);

		assert_eq!(hashes(&outcome.records), vec!["c", "a", "b"]);
		assert!(outcome.records[2].is_pending);
		assert_eq!(outcome.stats.pending_retained, 1);
		assert_eq!(outcome.stats.pending_confirmed, 0);
	}

	#[test]
	fn fetched_record_supersedes_pending() {
		let current = vec![tx("p", 90, true)];
		let fresh = vec![tx("p", 95, false)];

		let outcome = reconcile(&current, fresh);

		assert_eq!(outcome.records.len(), 1);
		assert!(!outcome.records[0].is_pending);
		assert_eq!(outcome.records[0].time, 95);
		assert_eq!(outcome.stats.pending_confirmed, 1);
	}

	#[test]
	fn confirmed_records_missing_from_batch_are_dropped() {
		let current = vec![tx("old", 10, false)];
		let outcome = reconcile(&current, vec![tx("new", 20, false)]);
		assert_eq!(hashes(&outcome.records), vec!["new"]);
	}

	#[test]
	fn empty_batch_yields_pending_only() {
		let current = vec![tx("a", 30, false), tx("b", 10, true), tx("c", 20, true)];
		let outcome = reconcile(&current, Vec::new());
		assert_eq!(hashes(&outcome.records), vec!["c", "b"]);
	}

	#[test]
	fn duplicate_hashes_in_batch_last_wins() {
		let fresh = vec![tx("d", 10, false), tx("e", 20, false), tx("d", 30, false)];
		let outcome = reconcile(&[], fresh);

		assert_eq!(hashes(&outcome.records), vec!["d", "e"]);
		assert_eq!(outcome.records[0].time, 30);
		assert_eq!(outcome.stats.duplicates_collapsed, 1);
	}

	#[test]
	fn equal_times_keep_batch_order() {
		let (records, _) = canonicalize(vec![tx("x", 5, false), tx("y", 5, false)]);
		assert_eq!(hashes(&records), vec!["x", "y"]);
	}

	#[test]
	fn reconciling_twice_is_idempotent() {
		let fresh = vec![tx("a", 3, false), tx("b", 2, false), tx("c", 1, false)];
		let first = reconcile(&[], fresh.clone());
		let second = reconcile(&first.records, fresh);
		assert_eq!(first.records, second.records);
	}
}
