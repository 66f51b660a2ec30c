//! Normalized transaction records shared by both ledger families.
//!
//! A [`TransactionRecord`] exposes exactly what the transaction list needs to merge and order
//! records: a hash, an ordering time, the pending flag and a confirmation count. Everything
//! ledger specific lives behind [`LedgerDetails`].

/// Conversion from raw ledger records
pub mod normalize;

use crate::utils::format_token_amount;
use serde::{Deserialize, Serialize};

/// Decimals of the UTXO ledger's base unit (satoshi).
pub const UTXO_DECIMALS: u32 = 8;
/// Decimals of the account ledger's base unit (wei).
pub const ACCOUNT_DECIMALS: u32 = 18;

/// Which ledger family a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerKind {
	Utxo,
	Account,
}

/// Direction of value relative to the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
	Received,
	Sent,
	/// Funds moved between the wallet's own addresses.
	Transferred,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoDetails {
	pub direction: Direction,
	/// Absolute value moved, in satoshis.
	pub amount: u64,
	pub fee: u64,
	pub double_spend: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDetails {
	pub direction: Direction,
	pub from: String,
	pub to: String,
	pub value_wei: u128,
	pub fee_wei: u128,
}

/// Ledger specific part of a record. Not used for merging or ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerDetails {
	Utxo(UtxoDetails),
	Account(AccountDetails),
}

/// One transaction in the canonical list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
	/// Merge and dedup key, unique within a ledger.
	pub hash: String,
	/// Ordering key in unix seconds. The canonical list is sorted newest first.
	pub time: u64,
	/// Broadcast or observed locally but not yet confirmed upstream.
	pub is_pending: bool,
	pub confirmations: u64,
	pub details: LedgerDetails,
}

impl TransactionRecord {
	/// A confirmed-looking record with zero confirmations.
	pub fn new(hash: impl Into<String>, time: u64, details: LedgerDetails) -> Self {
		Self {
			hash: hash.into(),
			time,
			is_pending: false,
			confirmations: 0,
			details,
		}
	}

	/// A pending record stamped with the current time, for a transaction just broadcast.
	pub fn broadcast_now(hash: impl Into<String>, details: LedgerDetails) -> Self {
		let now = chrono::Utc::now().timestamp().max(0) as u64;
		Self::new(hash, now, details).with_pending(true)
	}

	pub fn with_pending(mut self, is_pending: bool) -> Self {
		self.is_pending = is_pending;
		self
	}

	pub fn with_confirmations(mut self, confirmations: u64) -> Self {
		self.confirmations = confirmations;
		self
	}

	pub fn ledger_kind(&self) -> LedgerKind {
		match self.details {
			LedgerDetails::Utxo(_) => LedgerKind::Utxo,
			LedgerDetails::Account(_) => LedgerKind::Account,
		}
	}

	/// One-line human readable description, used by the binary's listing.
	pub fn summary(&self) -> String {
		let when = chrono::DateTime::from_timestamp(self.time as i64, 0)
			.map(|t| t.to_rfc3339())
			.unwrap_or_else(|| self.time.to_string());
		let (direction, amount) = match &self.details {
			LedgerDetails::Utxo(d) => (
				d.direction,
				format!("{} BTC", format_token_amount(d.amount as u128, UTXO_DECIMALS)),
			),
			LedgerDetails::Account(d) => (
				d.direction,
				format!("{} ETH", format_token_amount(d.value_wei, ACCOUNT_DECIMALS)),
			),
		};
		format!(
			"{} {:?} {} ({} confirmations{}) {}",
			when,
			direction,
			amount,
			self.confirmations,
			if self.is_pending { ", pending" } else { "" },
			self.hash
		)
	}
}

/// Depth of a block below the ledger head, counting the block itself.
///
/// Zero for transactions without a block or for blocks above the reported head.
pub fn confirmation_depth(latest_height: u64, block_height: Option<u64>) -> u64 {
	match block_height {
		Some(height) if height <= latest_height => latest_height - height + 1,
		_ => 0,
	}
}
