//!
//! Utility module.
//!
//! Re-exports formatting helpers used by record summaries and the binary.
/// Amount formatting
pub mod index;

pub use index::format_token_amount;
