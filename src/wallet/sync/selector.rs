use crate::ledger::{AccountLedger, LedgerError, UtxoLedger, UtxoQuery};
use crate::transaction::TransactionRecord;
use crate::transaction::normalize::{account_record, utxo_record};
use crate::wallet::scope::{AccountScope, FetchPlan, balance_query};
use crate::wallet::{PageWindow, TxListError};
use futures_util::future::try_join;
use std::sync::Arc;
use tracing::{debug, info};

/// Routes a scope to the ledger that answers it and normalizes the batch it returns.
#[derive(Clone)]
pub struct ScopeSelector {
	utxo_ledger: Arc<dyn UtxoLedger>,
	account_ledger: Arc<dyn AccountLedger>,
}

impl ScopeSelector {
	pub fn new(utxo_ledger: Arc<dyn UtxoLedger>, account_ledger: Arc<dyn AccountLedger>) -> Self {
		Self {
			utxo_ledger,
			account_ledger,
		}
	}

	/// Fetch and normalize the batch for `scope`.
	pub async fn fetch_batch(
		&self,
		scope: &AccountScope,
		window: PageWindow,
	) -> Result<Vec<TransactionRecord>, LedgerError> {
		let plan = FetchPlan::for_scope(scope);
		self.fetch_plan(&plan, window).await
	}

	pub async fn fetch_plan(
		&self,
		plan: &FetchPlan,
		window: PageWindow,
	) -> Result<Vec<TransactionRecord>, LedgerError> {
		match plan {
			FetchPlan::Utxo(query) => self.fetch_utxo(query, window).await,
			FetchPlan::MalformedAccountFallback { address } => {
				debug!("Fetching legacy addresses in place of account {}", address);
				self.fetch_utxo(&UtxoQuery::ImportedAddresses, window).await
			}
			FetchPlan::AccountLedger => self.fetch_account_ledger().await,
		}
	}

	async fn fetch_utxo(
		&self,
		query: &UtxoQuery,
		window: PageWindow,
	) -> Result<Vec<TransactionRecord>, LedgerError> {
		let raw = self
			.utxo_ledger
			.transactions(query, window.limit, window.offset)
			.await?;
		Ok(raw.iter().map(utxo_record).collect())
	}

	/// Both calls must succeed: every record needs the latest height for its depth.
	async fn fetch_account_ledger(&self) -> Result<Vec<TransactionRecord>, LedgerError> {
		let (latest, raw) = try_join(
			self.account_ledger.latest_block(),
			self.account_ledger.all_transactions(),
		)
		.await?;

		let own_address = self.account_ledger.account_address();
		let records = raw
			.iter()
			.map(|tx| account_record(tx, latest, own_address))
			.collect::<Result<Vec<_>, _>>()?;

		info!(
			"Fetched {} account ledger transactions at height {}",
			records.len(),
			latest.height
		);
		Ok(records)
	}

	/// UTXO balance for `scope`, in satoshis.
	///
	/// # Errors
	/// `TxListError::Usage` for the account ledger scope, `TxListError::Fetch` if the ledger
	/// call fails.
	pub async fn balance(&self, scope: &AccountScope) -> Result<u64, TxListError> {
		let query = balance_query(scope)?;
		Ok(self.utxo_ledger.balance(&query).await?)
	}
}
