use crate::ledger::LedgerError;

/// Page of a scoped UTXO query. Ignored by the account ledger, which always returns the
/// whole history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
	pub limit: u32,
	pub offset: u32,
}

impl PageWindow {
	pub fn new(limit: u32, offset: u32) -> Self {
		Self { limit, offset }
	}
}

impl Default for PageWindow {
	fn default() -> Self {
		Self {
			limit: 50,
			offset: 0,
		}
	}
}

/// Error types for the transaction list
#[derive(Debug, thiserror::Error)]
pub enum TxListError {
	/// An upstream ledger call failed.
	#[error("Fetch error: {0}")]
	Fetch(#[from] LedgerError),

	/// The hash is not in the current scope's cached list.
	#[error("Transaction {hash} not found in the current list")]
	NotFound { hash: String },

	/// The caller asked for something the scope cannot answer.
	#[error("Usage error: {0}")]
	Usage(String),

	/// A newer fetch started or applied before this one completed; its batch was discarded.
	#[error("Fetch generation {generation} superseded by a newer fetch")]
	Superseded { generation: u64 },

	#[error("Configuration error: {0}")]
	Config(String),
}
