//! Account scopes and the fetch plans derived from them.

use crate::ledger::UtxoQuery;
use crate::wallet::TxListError;
use crate::wallet::xpub::is_well_formed_xpub;
use std::fmt;
use tracing::warn;

/// Account selection that determines which upstream fetch applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AccountScope {
	/// Every HD account plus every imported address
	AllAccountsAndLegacy,
	/// Imported (legacy) addresses only
	AllLegacy,
	/// The account-based ledger
	AccountLedger,
	/// One UTXO HD account, identified by its extended public key
	UtxoAccount { address: String },
}

impl fmt::Display for AccountScope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AccountScope::AllAccountsAndLegacy => write!(f, "all accounts and legacy"),
			AccountScope::AllLegacy => write!(f, "all legacy"),
			AccountScope::AccountLedger => write!(f, "account ledger"),
			AccountScope::UtxoAccount { address } => write!(f, "account {}", address),
		}
	}
}

/// Concrete fetch for a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPlan {
	/// Paged UTXO query
	Utxo(UtxoQuery),
	/// A single-account scope whose address is not an extended public key. Fetched as the
	/// imported-addresses query.
	MalformedAccountFallback { address: String },
	/// Whole history of the account ledger
	AccountLedger,
}

impl FetchPlan {
	pub fn for_scope(scope: &AccountScope) -> Self {
		match scope {
			AccountScope::AllAccountsAndLegacy => FetchPlan::Utxo(UtxoQuery::AllAccounts),
			AccountScope::AllLegacy => FetchPlan::Utxo(UtxoQuery::ImportedAddresses),
			AccountScope::AccountLedger => FetchPlan::AccountLedger,
			AccountScope::UtxoAccount { address } => {
				if is_well_formed_xpub(address) {
					FetchPlan::Utxo(UtxoQuery::Account(address.clone()))
				} else {
					warn!(
						"Scope address {:?} is not an extended public key, fetching legacy addresses instead",
						address
					);
					FetchPlan::MalformedAccountFallback {
						address: address.clone(),
					}
				}
			}
		}
	}

	/// The UTXO query this plan runs, if any.
	pub fn utxo_query(&self) -> Option<UtxoQuery> {
		match self {
			FetchPlan::Utxo(query) => Some(query.clone()),
			FetchPlan::MalformedAccountFallback { .. } => Some(UtxoQuery::ImportedAddresses),
			FetchPlan::AccountLedger => None,
		}
	}
}

/// UTXO balance query for a scope.
///
/// A single-account scope is queried by its address as given, even when it is not an
/// extended public key.
///
/// # Errors
/// `TxListError::Usage` for the account ledger scope.
pub fn balance_query(scope: &AccountScope) -> Result<UtxoQuery, TxListError> {
	match scope {
		AccountScope::AllAccountsAndLegacy => Ok(UtxoQuery::AllAccounts),
		AccountScope::AllLegacy => Ok(UtxoQuery::ImportedAddresses),
		AccountScope::UtxoAccount { address } => Ok(UtxoQuery::Account(address.clone())),
		AccountScope::AccountLedger => Err(TxListError::Usage(
			"UTXO balance requested for the account ledger scope".to_string(),
		)),
	}
}
