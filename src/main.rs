use std::sync::Arc;
use tracing::{error, info, warn};
use tx_list_sync::config::ApiConfig;
use tx_list_sync::ledger::BlockchainApiClient;
use tx_list_sync::transaction::UTXO_DECIMALS;
use tx_list_sync::utils::format_token_amount;
use tx_list_sync::{AccountScope, PageWindow, TransactionListManager};

/// Parse the scope argument: `all`, `legacy`, `account`, or an extended public key.
fn parse_scope(arg: Option<String>) -> AccountScope {
	match arg.as_deref() {
		None | Some("all") => AccountScope::AllAccountsAndLegacy,
		Some("legacy") => AccountScope::AllLegacy,
		Some("account") => AccountScope::AccountLedger,
		Some(address) => AccountScope::UtxoAccount {
			address: address.to_string(),
		},
	}
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::from_default_env()
				.add_directive(tracing::Level::INFO.into()),
		)
		.with_target(false)
		.with_thread_ids(false)
		.with_thread_names(false)
		.with_file(false)
		.with_line_number(false)
		.with_timer(tracing_subscriber::fmt::time::time())
		.init();

	let config = match ApiConfig::from_env() {
		Ok(config) => config,
		Err(e) => {
			error!("Invalid configuration: {}", e);
			return;
		}
	};

	let client = match BlockchainApiClient::new(&config) {
		Ok(client) => Arc::new(client),
		Err(e) => {
			error!("Failed to create explorer client: {}", e);
			return;
		}
	};

	let manager = TransactionListManager::with_ledgers(client.clone(), client);
	let scope = parse_scope(std::env::args().nth(1));
	info!("Listing transactions for {}", scope);

	let list = match manager.fetch(&scope, PageWindow::default()).await {
		Ok(list) => list,
		Err(e) => {
			error!("Failed to fetch transactions: {}", e);
			return;
		}
	};

	info!("{} transactions", list.len());
	for record in &list {
		info!("{}", record.summary());
	}

	match manager.balance(&scope).await {
		Ok(balance) => info!(
			"Balance: {} BTC",
			format_token_amount(balance as u128, UTXO_DECIMALS)
		),
		Err(e) => warn!("No balance for {}: {}", scope, e),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn scope_argument_parsing() {
		assert_eq!(parse_scope(None), AccountScope::AllAccountsAndLegacy);
		assert_eq!(
			parse_scope(Some("legacy".to_string())),
			AccountScope::AllLegacy
		);
		assert_eq!(
			parse_scope(Some("account".to_string())),
			AccountScope::AccountLedger
		);
		assert_eq!(
			parse_scope(Some("xpub123".to_string())),
			AccountScope::UtxoAccount {
				address: "xpub123".to_string()
			}
		);
	}
}
