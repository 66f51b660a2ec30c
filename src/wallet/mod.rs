pub mod scope;
pub mod sync;
pub mod types;
pub mod xpub;

pub use scope::{AccountScope, FetchPlan};
pub use sync::TransactionListManager;
pub use types::*;
