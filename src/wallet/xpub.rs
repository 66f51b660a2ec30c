//! Extended public key format check.

/// BIP32 version bytes accepted as extended public keys (mainnet `xpub`, testnet `tpub`).
const XPUB_VERSIONS: [[u8; 4]; 2] = [[0x04, 0x88, 0xB2, 0x1E], [0x04, 0x35, 0x87, 0xCF]];

/// Serialized extended key length without the checksum.
const EXTENDED_KEY_LEN: usize = 78;

/// Whether `candidate` is a base58check encoded BIP32 extended public key.
///
/// Only the encoding is checked: version bytes, payload length, checksum and the public key
/// prefix. The key is not parsed as a curve point.
pub fn is_well_formed_xpub(candidate: &str) -> bool {
	let payload = match bs58::decode(candidate.trim()).with_check(None).into_vec() {
		Ok(payload) => payload,
		Err(_) => return false,
	};

	payload.len() == EXTENDED_KEY_LEN
		&& XPUB_VERSIONS.iter().any(|v| payload[..4] == v[..])
		&& matches!(payload[45], 0x02 | 0x03)
}

#[cfg(test)]
mod tests {
	use super::*;

	// BIP32 test vector 1, chain m
	const MASTER_XPUB: &str = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";
	// Same vector, private key serialization
	const MASTER_XPRV: &str = "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi";

	#[test]
	fn accepts_bip32_test_vector() {
		assert!(is_well_formed_xpub(MASTER_XPUB));
	}

	#[test]
	fn rejects_private_keys_addresses_and_garbage() {
		assert!(!is_well_formed_xpub(MASTER_XPRV));
		assert!(!is_well_formed_xpub("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2"));
		assert!(!is_well_formed_xpub("not-an-xpub"));
		assert!(!is_well_formed_xpub(""));
	}

	#[test]
	fn rejects_corrupted_checksum() {
		let mut corrupted = MASTER_XPUB.to_string();
		corrupted.pop();
		corrupted.push('9');
		assert!(!is_well_formed_xpub(&corrupted));
	}
}
