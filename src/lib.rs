//! Reconciled transaction list for a wallet spanning a UTXO ledger and an account ledger.
//!
//! Successive, possibly overlapping fetches are merged into one de-duplicated, newest-first
//! list per account scope. Transactions the wallet knows are pending survive refreshes that
//! do not mention them yet, and a failed fetch never disturbs the cached list.

pub mod config;
pub mod ledger;
pub mod transaction;
pub mod utils;
pub mod wallet;

pub use transaction::{LedgerKind, TransactionRecord};
pub use wallet::{AccountScope, PageWindow, TransactionListManager, TxListError};
