//! Runtime configuration for the ledger clients.
//!
//! Defaults point at the public explorer endpoints. Every field can be overridden from the
//! environment through [`ApiConfig::from_env`].

use crate::wallet::TxListError;
use std::time::Duration;

pub const DEFAULT_UTXO_URL: &str = "https://blockchain.info";
pub const DEFAULT_ACCOUNT_URL: &str = "https://api.blockchain.info";

/// Configuration for [`crate::ledger::BlockchainApiClient`]
#[derive(Debug, Clone)]
pub struct ApiConfig {
	/// Base URL of the UTXO explorer API.
	pub utxo_url: String,
	/// Base URL of the account ledger API.
	pub account_url: String,
	/// Timeout applied to every HTTP request.
	pub request_timeout: Duration,
	/// Upper bound on the time spent retrying transient failures of one request.
	pub retry_window: Duration,
	/// Extended public keys of the wallet's HD accounts.
	pub xpubs: Vec<String>,
	/// Imported (legacy) addresses of the wallet.
	pub legacy_addresses: Vec<String>,
	/// The single address tracked on the account ledger.
	pub account_address: String,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			utxo_url: DEFAULT_UTXO_URL.to_string(),
			account_url: DEFAULT_ACCOUNT_URL.to_string(),
			request_timeout: Duration::from_secs(30),
			retry_window: Duration::from_secs(10),
			xpubs: Vec::new(),
			legacy_addresses: Vec::new(),
			account_address: String::new(),
		}
	}
}

impl ApiConfig {
	/// Build a configuration from `TXLIST_*` environment variables, falling back to defaults.
	///
	/// List-valued variables are comma separated.
	pub fn from_env() -> Result<Self, TxListError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, TxListError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut config = Self::default();

		if let Some(url) = lookup("TXLIST_UTXO_URL") {
			config.utxo_url = url.trim_end_matches('/').to_string();
		}
		if let Some(url) = lookup("TXLIST_ACCOUNT_URL") {
			config.account_url = url.trim_end_matches('/').to_string();
		}
		if let Some(secs) = lookup("TXLIST_TIMEOUT_SECS") {
			let secs = parse_secs("TXLIST_TIMEOUT_SECS", &secs)?;
			if secs == 0 {
				return Err(TxListError::Config(
					"TXLIST_TIMEOUT_SECS must be at least 1".to_string(),
				));
			}
			config.request_timeout = Duration::from_secs(secs);
		}
		if let Some(secs) = lookup("TXLIST_RETRY_SECS") {
			// 0 disables retries
			config.retry_window = Duration::from_secs(parse_secs("TXLIST_RETRY_SECS", &secs)?);
		}
		if let Some(xpubs) = lookup("TXLIST_XPUBS") {
			config.xpubs = split_list(&xpubs);
		}
		if let Some(addresses) = lookup("TXLIST_LEGACY_ADDRESSES") {
			config.legacy_addresses = split_list(&addresses);
		}
		if let Some(address) = lookup("TXLIST_ACCOUNT_ADDRESS") {
			config.account_address = address.trim().to_string();
		}

		Ok(config)
	}
}

fn parse_secs(key: &str, value: &str) -> Result<u64, TxListError> {
	value
		.trim()
		.parse::<u64>()
		.map_err(|e| TxListError::Config(format!("Invalid {} {:?}: {}", key, value, e)))
}

fn split_list(value: &str) -> Vec<String> {
	value
		.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(str::to_string)
		.collect()
}
