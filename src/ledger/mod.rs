//! Ledger integration module.
//!
//! This module defines the contracts the transaction list consumes from the upstream ledgers,
//! the raw record types those ledgers return, and an HTTP client implementing both contracts
//! against a blockchain explorer API. Two ledger families are supported: a UTXO ledger that
//! answers scoped, paged queries and an account ledger that returns the whole history of one
//! configured address together with the latest block height.

/// HTTP client for the explorer API
mod client;
/// Type definitions for raw ledger records and errors
mod types;

pub use client::BlockchainApiClient;
pub use types::*;

/// Query source for a UTXO-style ledger.
///
/// Implementations may block on the network; callers always await them from an async task.
#[async_trait::async_trait]
pub trait UtxoLedger: Send + Sync {
	/// Fetch one page of transactions for the given query variant, newest first.
	async fn transactions(
		&self,
		query: &UtxoQuery,
		limit: u32,
		offset: u32,
	) -> Result<Vec<RawUtxoTx>, LedgerError>;

	/// Final balance in satoshis for the given query variant.
	async fn balance(&self, query: &UtxoQuery) -> Result<u64, LedgerError>;
}

/// Query source for an account-based ledger.
#[async_trait::async_trait]
pub trait AccountLedger: Send + Sync {
	/// The address whose history this ledger reports.
	fn account_address(&self) -> &str;

	async fn latest_block(&self) -> Result<LatestBlock, LedgerError>;

	async fn all_transactions(&self) -> Result<Vec<RawAccountTx>, LedgerError>;
}
