use super::{
	AccountDetails, Direction, LedgerDetails, TransactionRecord, UtxoDetails, confirmation_depth,
};
use crate::ledger::{LatestBlock, LedgerError, RawAccountTx, RawUtxoTx};

/// Map a UTXO ledger record. A record without a block height is pending.
pub fn utxo_record(raw: &RawUtxoTx) -> TransactionRecord {
	let direction = match raw.result {
		r if r > 0 => Direction::Received,
		r if r < 0 => Direction::Sent,
		_ => Direction::Transferred,
	};

	TransactionRecord {
		hash: raw.hash.clone(),
		time: raw.time,
		is_pending: raw.block_height.is_none(),
		confirmations: raw.confirmations,
		details: LedgerDetails::Utxo(UtxoDetails {
			direction,
			amount: raw.result.unsigned_abs(),
			fee: raw.fee,
			double_spend: raw.double_spend,
		}),
	}
}

/// Map an account ledger record, computing its depth below `latest`.
///
/// # Errors
/// `LedgerError::ParseError` if the value or gas price is not a decimal integer.
pub fn account_record(
	raw: &RawAccountTx,
	latest: LatestBlock,
	own_address: &str,
) -> Result<TransactionRecord, LedgerError> {
	let value_wei = parse_wei(&raw.value, "value", &raw.hash)?;
	let gas_price = parse_wei(&raw.gas_price, "gasPrice", &raw.hash)?;

	let from_self = raw.from.eq_ignore_ascii_case(own_address);
	let to_self = raw.to.eq_ignore_ascii_case(own_address);
	let direction = match (from_self, to_self) {
		(true, true) => Direction::Transferred,
		(true, false) => Direction::Sent,
		_ => Direction::Received,
	};

	Ok(TransactionRecord {
		hash: raw.hash.clone(),
		time: raw.time_stamp,
		is_pending: raw.block_number.is_none(),
		confirmations: confirmation_depth(latest.height, raw.block_number),
		details: LedgerDetails::Account(AccountDetails {
			direction,
			from: raw.from.clone(),
			to: raw.to.clone(),
			value_wei,
			fee_wei: gas_price.saturating_mul(raw.gas_used as u128),
		}),
	})
}

fn parse_wei(value: &str, field: &str, hash: &str) -> Result<u128, LedgerError> {
	let value = value.trim();
	if value.is_empty() {
		return Ok(0);
	}
	value.parse::<u128>().map_err(|e| {
		LedgerError::ParseError(format!("{} of transaction {}: {:?} ({})", field, hash, value, e))
	})
}
