//! Types for the upstream ledger queries and the explorer API responses

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Query variants understood by a UTXO ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UtxoQuery {
	/// Every HD account plus every imported (legacy) address
	AllAccounts,
	/// Imported (legacy) addresses only
	ImportedAddresses,
	/// A single HD account, identified by its extended public key
	Account(String),
}

/// A transaction as reported by the UTXO ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawUtxoTx {
	/// The transaction hash.
	pub hash: String,
	/// Unix time in seconds at which the ledger first saw the transaction.
	pub time: u64,
	/// Net effect on the queried addresses, in satoshis. Negative when funds left the wallet.
	pub result: i64,
	/// Fee paid by the transaction, in satoshis.
	#[serde(default)]
	pub fee: u64,
	/// Height of the including block, absent while the transaction is unconfirmed.
	#[serde(default)]
	pub block_height: Option<u64>,
	#[serde(default)]
	pub double_spend: bool,
	/// Confirmation depth, filled in by the client from the latest block height.
	#[serde(default)]
	pub confirmations: u64,
}

/// A transaction as reported by the account ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawAccountTx {
	pub hash: String,
	#[serde(rename = "timeStamp")]
	pub time_stamp: u64,
	pub from: String,
	#[serde(default)]
	pub to: String,
	/// Transferred value in wei, as a decimal string.
	pub value: String,
	#[serde(rename = "blockNumber", default)]
	pub block_number: Option<u64>,
	#[serde(rename = "gasPrice", default)]
	pub gas_price: String,
	#[serde(rename = "gasUsed", default)]
	pub gas_used: u64,
}

/// Head of the account ledger.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LatestBlock {
	#[serde(alias = "number")]
	pub height: u64,
}

/// Response body of the `multiaddr` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MultiAddressResponse {
	#[serde(default)]
	pub wallet: Option<WalletSummary>,
	#[serde(default)]
	pub addresses: Vec<AddressSummary>,
	#[serde(default)]
	pub txs: Vec<RawUtxoTx>,
	#[serde(default)]
	pub info: Option<ChainInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WalletSummary {
	pub final_balance: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AddressSummary {
	pub address: String,
	pub final_balance: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChainInfo {
	pub latest_block: LatestBlock,
}

/// Per-address entry of the account endpoint, which keys its body by address.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AccountSummary {
	#[serde(default)]
	pub txns: Vec<RawAccountTx>,
}

pub(crate) type AccountResponse = HashMap<String, AccountSummary>;

/// Error types for ledger queries
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
	#[error("HTTP error: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("API error: {0}")]
	ApiError(String),

	#[error("Malformed ledger record: {0}")]
	ParseError(String),

	#[error("No data returned")]
	NoData,

	#[error("Ledger unavailable: {0}")]
	Unavailable(String),
}
