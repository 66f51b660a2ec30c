//!
//! HTTP client for the blockchain explorer API.
//!
//! This module provides an async client implementing both ledger contracts. UTXO queries go
//! through the `multiaddr` endpoint, account ledger queries through the `eth/account` and
//! `eth/latestblock` endpoints. Transient failures are retried with exponential backoff before
//! they are reported to the caller.

use super::types::*;
use super::{AccountLedger, UtxoLedger};
use crate::config::ApiConfig;
use crate::transaction::confirmation_depth;

use backoff::ExponentialBackoff;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Explorer API client
#[derive(Clone)]
pub struct BlockchainApiClient {
	/// The underlying HTTP client.
	http_client: Client,
	/// Base URL of the UTXO endpoints.
	utxo_url: String,
	/// Base URL of the account ledger endpoints.
	account_url: String,
	/// Bound on the time spent retrying a single request.
	retry_window: Duration,
	xpubs: Vec<String>,
	legacy_addresses: Vec<String>,
	account_address: String,
}

impl BlockchainApiClient {
	/// Create a new client from the given configuration.
	///
	/// # Errors
	/// Returns `LedgerError::HttpError` if the HTTP client cannot be built.
	pub fn new(config: &ApiConfig) -> Result<Self, LedgerError> {
		let http_client = Client::builder().timeout(config.request_timeout).build()?;

		info!(
			"Created explorer client: utxo={}, account={}, {} xpubs, {} legacy addresses",
			config.utxo_url,
			config.account_url,
			config.xpubs.len(),
			config.legacy_addresses.len()
		);

		Ok(Self {
			http_client,
			utxo_url: config.utxo_url.clone(),
			account_url: config.account_url.clone(),
			retry_window: config.retry_window,
			xpubs: config.xpubs.clone(),
			legacy_addresses: config.legacy_addresses.clone(),
			account_address: config.account_address.clone(),
		})
	}

	/// Addresses and keys the `multiaddr` endpoint is asked about for a query.
	fn active_set(&self, query: &UtxoQuery) -> Vec<String> {
		match query {
			UtxoQuery::AllAccounts => self
				.xpubs
				.iter()
				.chain(self.legacy_addresses.iter())
				.cloned()
				.collect(),
			UtxoQuery::ImportedAddresses => self.legacy_addresses.clone(),
			UtxoQuery::Account(xpub) => vec![xpub.clone()],
		}
	}

	async fn multi_address(
		&self,
		active: &[String],
		limit: u32,
		offset: u32,
	) -> Result<MultiAddressResponse, LedgerError> {
		let url = format!("{}/multiaddr", self.utxo_url);
		let params = [
			("active", active.join("|")),
			("n", limit.to_string()),
			("offset", offset.to_string()),
		];
		self.get_json(&url, &params).await
	}

	/// Execute a GET request and decode its JSON body.
	///
	/// Connection failures, timeouts and 5xx responses are retried until `retry_window`
	/// elapses. Other failures are returned immediately.
	async fn get_json<T: DeserializeOwned + Send>(
		&self,
		url: &str,
		params: &[(&str, String)],
	) -> Result<T, LedgerError> {
		let policy = ExponentialBackoff {
			max_elapsed_time: Some(self.retry_window),
			..ExponentialBackoff::default()
		};

		backoff::future::retry(policy, || async move {
			debug!("GET {}", url);
			let response = self
				.http_client
				.get(url)
				.query(params)
				.send()
				.await
				.map_err(|e| {
					if e.is_timeout() || e.is_connect() {
						warn!("Transient error requesting {}: {}", url, e);
						backoff::Error::transient(LedgerError::from(e))
					} else {
						backoff::Error::permanent(LedgerError::from(e))
					}
				})?;

			let status = response.status();
			if status.is_server_error() {
				warn!("Server error from {}: {}", url, status);
				return Err(backoff::Error::transient(LedgerError::ApiError(format!(
					"HTTP error: {}",
					status
				))));
			}
			if !status.is_success() {
				return Err(backoff::Error::permanent(LedgerError::ApiError(format!(
					"HTTP error: {}",
					status
				))));
			}

			response
				.json::<T>()
				.await
				.map_err(|e| backoff::Error::permanent(LedgerError::from(e)))
		})
		.await
	}
}

#[async_trait::async_trait]
impl UtxoLedger for BlockchainApiClient {
	async fn transactions(
		&self,
		query: &UtxoQuery,
		limit: u32,
		offset: u32,
	) -> Result<Vec<RawUtxoTx>, LedgerError> {
		let active = self.active_set(query);
		if active.is_empty() {
			debug!("No addresses for {:?}, nothing to fetch", query);
			return Ok(Vec::new());
		}

		let response = self.multi_address(&active, limit, offset).await?;
		let latest = response.info.map(|info| info.latest_block.height);

		let txs = response
			.txs
			.into_iter()
			.map(|mut tx| {
				tx.confirmations = match latest {
					Some(height) => confirmation_depth(height, tx.block_height),
					None => tx.confirmations,
				};
				tx
			})
			.collect::<Vec<_>>();

		debug!("Fetched {} UTXO transactions for {:?}", txs.len(), query);
		Ok(txs)
	}

	async fn balance(&self, query: &UtxoQuery) -> Result<u64, LedgerError> {
		let active = self.active_set(query);
		if active.is_empty() {
			return Ok(0);
		}

		let response = self.multi_address(&active, 0, 0).await?;
		match query {
			UtxoQuery::Account(xpub) => response
				.addresses
				.iter()
				.find(|summary| &summary.address == xpub)
				.map(|summary| summary.final_balance)
				.ok_or(LedgerError::NoData),
			UtxoQuery::AllAccounts | UtxoQuery::ImportedAddresses => match response.wallet {
				Some(wallet) => Ok(wallet.final_balance),
				None => Ok(response.addresses.iter().map(|a| a.final_balance).sum()),
			},
		}
	}
}

#[async_trait::async_trait]
impl AccountLedger for BlockchainApiClient {
	fn account_address(&self) -> &str {
		&self.account_address
	}

	async fn latest_block(&self) -> Result<LatestBlock, LedgerError> {
		let url = format!("{}/eth/latestblock", self.account_url);
		self.get_json(&url, &[]).await
	}

	async fn all_transactions(&self) -> Result<Vec<RawAccountTx>, LedgerError> {
		if self.account_address.is_empty() {
			return Err(LedgerError::Unavailable(
				"No account address configured".to_string(),
			));
		}

		let url = format!("{}/eth/account/{}", self.account_url, self.account_address);
		let response: AccountResponse = self.get_json(&url, &[]).await?;

		let summary = response
			.iter()
			.find(|(address, _)| address.eq_ignore_ascii_case(&self.account_address))
			.map(|(_, summary)| summary)
			.or_else(|| response.values().next())
			.ok_or(LedgerError::NoData)?;

		debug!(
			"Fetched {} account transactions for {}",
			summary.txns.len(),
			self.account_address
		);
		Ok(summary.txns.clone())
	}
}
