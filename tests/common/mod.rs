//! In-memory ledgers for driving the transaction list in tests.

#![allow(dead_code)]

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Notify;
use tx_list_sync::TransactionListManager;
use tx_list_sync::ledger::{
	AccountLedger, LatestBlock, LedgerError, RawAccountTx, RawUtxoTx, UtxoLedger, UtxoQuery,
};

// BIP32 test vector 1, chain m
pub const XPUB: &str = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";
pub const OWN_ADDRESS: &str = "0x5a0b54d5dc17e0aadc383d2db43b0a0d3e029c4c";

pub fn utxo_tx(hash: &str, time: u64, block_height: Option<u64>) -> RawUtxoTx {
	RawUtxoTx {
		hash: hash.to_string(),
		time,
		result: 10_000,
		fee: 226,
		block_height,
		double_spend: false,
		confirmations: if block_height.is_some() { 1 } else { 0 },
	}
}

pub fn account_tx(hash: &str, time: u64, block_number: Option<u64>) -> RawAccountTx {
	RawAccountTx {
		hash: hash.to_string(),
		time_stamp: time,
		from: OWN_ADDRESS.to_string(),
		to: "0x0000000000000000000000000000000000000001".to_string(),
		value: "1000000000000000".to_string(),
		block_number,
		gas_price: "1000000000".to_string(),
		gas_used: 21_000,
	}
}

/// A held-open call: the ledger signals `entered` and waits for `release`.
#[derive(Clone, Default)]
pub struct Gate {
	pub entered: Arc<Notify>,
	pub release: Arc<Notify>,
}

#[derive(Default)]
pub struct MockUtxoLedger {
	pages: Mutex<HashMap<UtxoQuery, Vec<RawUtxoTx>>>,
	balances: Mutex<HashMap<UtxoQuery, u64>>,
	gates: Mutex<HashMap<UtxoQuery, Gate>>,
	failing: Mutex<bool>,
	calls: Mutex<Vec<(UtxoQuery, u32, u32)>>,
}

impl MockUtxoLedger {
	pub fn set_page(&self, query: UtxoQuery, txs: Vec<RawUtxoTx>) {
		self.pages.lock().insert(query, txs);
	}

	pub fn set_balance(&self, query: UtxoQuery, balance: u64) {
		self.balances.lock().insert(query, balance);
	}

	pub fn set_failing(&self, failing: bool) {
		*self.failing.lock() = failing;
	}

	pub fn gate(&self, query: UtxoQuery) -> Gate {
		let gate = Gate::default();
		self.gates.lock().insert(query, gate.clone());
		gate
	}

	pub fn calls(&self) -> Vec<(UtxoQuery, u32, u32)> {
		self.calls.lock().clone()
	}
}

#[async_trait::async_trait]
impl UtxoLedger for MockUtxoLedger {
	async fn transactions(
		&self,
		query: &UtxoQuery,
		limit: u32,
		offset: u32,
	) -> Result<Vec<RawUtxoTx>, LedgerError> {
		self.calls.lock().push((query.clone(), limit, offset));

		let gate = self.gates.lock().get(query).cloned();
		if let Some(gate) = gate {
			gate.entered.notify_one();
			gate.release.notified().await;
		}

		if *self.failing.lock() {
			return Err(LedgerError::Unavailable("mock ledger offline".to_string()));
		}

		let page = self.pages.lock().get(query).cloned().unwrap_or_default();
		Ok(page
			.into_iter()
			.skip(offset as usize)
			.take(limit as usize)
			.collect())
	}

	async fn balance(&self, query: &UtxoQuery) -> Result<u64, LedgerError> {
		if *self.failing.lock() {
			return Err(LedgerError::Unavailable("mock ledger offline".to_string()));
		}
		Ok(self.balances.lock().get(query).copied().unwrap_or_default())
	}
}

#[derive(Default)]
pub struct MockAccountLedger {
	height: Mutex<u64>,
	txs: Mutex<Vec<RawAccountTx>>,
	fail_latest: Mutex<bool>,
	fail_transactions: Mutex<bool>,
}

impl MockAccountLedger {
	pub fn set_height(&self, height: u64) {
		*self.height.lock() = height;
	}

	pub fn set_transactions(&self, txs: Vec<RawAccountTx>) {
		*self.txs.lock() = txs;
	}

	pub fn set_fail_latest(&self, fail: bool) {
		*self.fail_latest.lock() = fail;
	}

	pub fn set_fail_transactions(&self, fail: bool) {
		*self.fail_transactions.lock() = fail;
	}
}

#[async_trait::async_trait]
impl AccountLedger for MockAccountLedger {
	fn account_address(&self) -> &str {
		OWN_ADDRESS
	}

	async fn latest_block(&self) -> Result<LatestBlock, LedgerError> {
		if *self.fail_latest.lock() {
			return Err(LedgerError::Unavailable("latest block unavailable".to_string()));
		}
		Ok(LatestBlock {
			height: *self.height.lock(),
		})
	}

	async fn all_transactions(&self) -> Result<Vec<RawAccountTx>, LedgerError> {
		if *self.fail_transactions.lock() {
			return Err(LedgerError::Unavailable("transactions unavailable".to_string()));
		}
		Ok(self.txs.lock().clone())
	}
}

pub struct Harness {
	pub utxo: Arc<MockUtxoLedger>,
	pub account: Arc<MockAccountLedger>,
	pub manager: Arc<TransactionListManager>,
}

pub fn harness() -> Harness {
	let utxo = Arc::new(MockUtxoLedger::default());
	let account = Arc::new(MockAccountLedger::default());
	let manager = Arc::new(TransactionListManager::with_ledgers(
		utxo.clone(),
		account.clone(),
	));
	Harness {
		utxo,
		account,
		manager,
	}
}

pub fn hashes(records: &[tx_list_sync::TransactionRecord]) -> Vec<&str> {
	records.iter().map(|r| r.hash.as_str()).collect()
}
