//! Bech32 string codec.
//!
//! The generic layer of the identifier format: a human-readable part, a
//! `1` separator, 5-bit data groups in a 32-character alphabet, and a
//! 6-group BCH checksum with residue target 1. This module moves 5-bit
//! groups in and out of strings; what the groups mean is the caller's
//! business.

use thiserror::Error;

/// The 32-character data alphabet, indexed by 5-bit group value.
const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Generator coefficients of the checksum polynomial.
const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

/// Number of checksum groups appended to the data part.
const CHECKSUM_LENGTH: usize = 6;

/// Longest accepted encoded string.
const MAX_LENGTH: usize = 90;

/// Errors produced while encoding or decoding a bech32 string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Bech32Error {
	/// The checksum groups do not match the rest of the string.
	#[error("invalid checksum")]
	InvalidChecksum,
	/// The string has no `1` separator.
	#[error("missing separator")]
	MissingSeparator,
	/// The string, or one of its parts, has an impossible length.
	#[error("invalid length {0}")]
	InvalidLength(usize),
	/// The human-readable part is empty or contains invalid characters.
	#[error("invalid human-readable part {0:?}")]
	InvalidHrp(String),
	/// The string mixes upper and lower case.
	#[error("mixed case")]
	MixedCase,
	/// A data character is outside the alphabet.
	#[error("invalid character {0:?}")]
	InvalidChar(char),
	/// A data group does not fit the requested bit width.
	#[error("invalid data value {0}")]
	InvalidData(u8),
	/// Regrouping left non-zero padding bits.
	#[error("invalid padding")]
	InvalidPadding,
}

fn polymod(values: &[u8]) -> u32 {
	let mut chk: u32 = 1;
	for &value in values {
		let top = chk >> 25;
		chk = (chk & 0x01ff_ffff) << 5 ^ u32::from(value);
		for (i, &generator) in GENERATOR.iter().enumerate() {
			if (top >> i) & 1 == 1 {
				chk ^= generator;
			}
		}
	}
	chk
}

fn hrp_expand(hrp: &str) -> Vec<u8> {
	let mut expanded = Vec::with_capacity(hrp.len() * 2 + 1);
	for byte in hrp.bytes() {
		expanded.push(byte >> 5);
	}
	expanded.push(0);
	for byte in hrp.bytes() {
		expanded.push(byte & 0x1f);
	}
	expanded
}

fn create_checksum(hrp: &str, data: &[u8]) -> [u8; CHECKSUM_LENGTH] {
	let mut values = hrp_expand(hrp);
	values.extend_from_slice(data);
	values.extend_from_slice(&[0; CHECKSUM_LENGTH]);
	let residue = polymod(&values) ^ 1;
	let mut checksum = [0u8; CHECKSUM_LENGTH];
	for (i, group) in checksum.iter_mut().enumerate() {
		*group = ((residue >> (5 * (CHECKSUM_LENGTH - 1 - i))) & 0x1f) as u8;
	}
	checksum
}

fn verify_checksum(hrp: &str, data: &[u8]) -> bool {
	let mut values = hrp_expand(hrp);
	values.extend_from_slice(data);
	polymod(&values) == 1
}

fn validate_hrp(hrp: &str) -> Result<(), Bech32Error> {
	if hrp.is_empty() || !hrp.bytes().all(|b| (33..=126).contains(&b)) {
		return Err(Bech32Error::InvalidHrp(hrp.to_string()));
	}
	Ok(())
}

/// Encodes 5-bit data groups under a human-readable part.
pub fn encode(hrp: &str, data: &[u8]) -> Result<String, Bech32Error> {
	validate_hrp(hrp)?;
	if let Some(&group) = data.iter().find(|&&group| group > 31) {
		return Err(Bech32Error::InvalidData(group));
	}
	let checksum = create_checksum(hrp, data);
	let mut encoded = String::with_capacity(hrp.len() + 1 + data.len() + CHECKSUM_LENGTH);
	encoded.push_str(hrp);
	encoded.push('1');
	for &group in data.iter().chain(checksum.iter()) {
		encoded.push(char::from(CHARSET[usize::from(group)]));
	}
	Ok(encoded)
}

/// Decodes a bech32 string into its human-readable part and 5-bit data
/// groups, with the checksum verified and stripped.
///
/// Accepts all-lowercase or all-uppercase input; the returned
/// human-readable part is always lowercase.
pub fn decode(encoded: &str) -> Result<(String, Vec<u8>), Bech32Error> {
	if encoded.len() > MAX_LENGTH {
		return Err(Bech32Error::InvalidLength(encoded.len()));
	}
	let has_lower = encoded.chars().any(|c| c.is_ascii_lowercase());
	let has_upper = encoded.chars().any(|c| c.is_ascii_uppercase());
	if has_lower && has_upper {
		return Err(Bech32Error::MixedCase);
	}
	let encoded = encoded.to_ascii_lowercase();

	let separator = encoded.rfind('1').ok_or(Bech32Error::MissingSeparator)?;
	let hrp = &encoded[..separator];
	let data_part = &encoded[separator + 1..];
	validate_hrp(hrp)?;
	if data_part.len() < CHECKSUM_LENGTH {
		return Err(Bech32Error::InvalidLength(data_part.len()));
	}

	let mut data = Vec::with_capacity(data_part.len());
	for c in data_part.chars() {
		// The alphabet lookup compares bytes; a non-ASCII char whose low
		// byte matches an alphabet character must not slip through it.
		if !c.is_ascii() {
			return Err(Bech32Error::InvalidChar(c));
		}
		let index = CHARSET
			.iter()
			.position(|&b| b == c as u8)
			.ok_or(Bech32Error::InvalidChar(c))?;
		data.push(index as u8);
	}
	if !verify_checksum(hrp, &data) {
		return Err(Bech32Error::InvalidChecksum);
	}
	data.truncate(data.len() - CHECKSUM_LENGTH);
	Ok((hrp.to_string(), data))
}

/// Regroups a bit stream between group widths.
///
/// Encoding packs 8-bit bytes into 5-bit groups with `pad` set; decoding
/// unpacks with `pad` unset, which also rejects non-zero or oversized
/// padding left by a malformed string.
pub fn convert_bits(
	data: &[u8],
	from_bits: u32,
	to_bits: u32,
	pad: bool,
) -> Result<Vec<u8>, Bech32Error> {
	let mut acc: u32 = 0;
	let mut bits: u32 = 0;
	let max_value: u32 = (1 << to_bits) - 1;
	let mut converted = Vec::with_capacity((data.len() * from_bits as usize) / to_bits as usize + 1);
	for &value in data {
		if u32::from(value) >> from_bits != 0 {
			return Err(Bech32Error::InvalidData(value));
		}
		acc = (acc << from_bits) | u32::from(value);
		bits += from_bits;
		while bits >= to_bits {
			bits -= to_bits;
			converted.push(((acc >> bits) & max_value) as u8);
		}
	}
	if pad {
		if bits > 0 {
			converted.push(((acc << (to_bits - bits)) & max_value) as u8);
		}
	} else if bits >= from_bits || ((acc << (to_bits - bits)) & max_value) != 0 {
		return Err(Bech32Error::InvalidPadding);
	}
	Ok(converted)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_decode_reference_strings() {
		// Published reference strings for the residue-1 checksum.
		for valid in [
			"a12uel5l",
			"abcdef1qpzry9x8gf2tvdw0s3jn54khce6mua7lmqqqxw",
			"split1checkupstagehandshakeupstreamerranterredcaperred2y9e3w",
		] {
			assert!(decode(valid).is_ok(), "expected {} to decode", valid);
		}
	}

	#[test]
	fn test_round_trip() {
		let data: Vec<u8> = (0..32).collect();
		let encoded = encode("lbr", &data).unwrap();
		let (hrp, decoded) = decode(&encoded).unwrap();
		assert_eq!(hrp, "lbr");
		assert_eq!(decoded, data);
	}

	#[test]
	fn test_uppercase_input_is_accepted() {
		let encoded = encode("lbr", &[1, 2, 3]).unwrap();
		let (hrp, data) = decode(&encoded.to_ascii_uppercase()).unwrap();
		assert_eq!(hrp, "lbr");
		assert_eq!(data, vec![1, 2, 3]);
	}

	#[test]
	fn test_mixed_case_is_rejected() {
		let mut encoded = encode("lbr", &[1, 2, 3]).unwrap();
		encoded.replace_range(..1, "L");
		assert_eq!(decode(&encoded), Err(Bech32Error::MixedCase));
	}

	#[test]
	fn test_corrupted_character_fails_checksum() {
		let encoded = encode("lbr", &[1, 2, 3]).unwrap();
		let mut corrupted: Vec<char> = encoded.chars().collect();
		let last = corrupted.len() - 1;
		corrupted[last] = if corrupted[last] == 'q' { 'p' } else { 'q' };
		let corrupted: String = corrupted.into_iter().collect();
		assert_eq!(decode(&corrupted), Err(Bech32Error::InvalidChecksum));
	}

	#[test]
	fn test_missing_separator() {
		assert_eq!(decode("qqqqqq"), Err(Bech32Error::MissingSeparator));
	}

	#[test]
	fn test_empty_hrp() {
		assert!(matches!(decode("1qqqqqq"), Err(Bech32Error::InvalidHrp(_))));
	}

	#[test]
	fn test_character_outside_alphabet() {
		assert_eq!(decode("lbr1bqqqqqq"), Err(Bech32Error::InvalidChar('b')));
	}

	#[test]
	fn test_non_ascii_character_is_rejected() {
		// U+0175 truncates to the byte of 'u'; substituting it must not
		// decode as 'u' would.
		let encoded = encode("lbr", &(0..32).collect::<Vec<u8>>()).unwrap();
		assert!(encoded.contains('u'));
		let forged = encoded.replace('u', "\u{175}");
		assert_eq!(decode(&forged), Err(Bech32Error::InvalidChar('\u{175}')));
	}

	#[test]
	fn test_data_group_out_of_range_on_encode() {
		assert_eq!(encode("lbr", &[32]), Err(Bech32Error::InvalidData(32)));
	}

	#[test]
	fn test_convert_bits_round_trip() {
		let bytes = [0xf7, 0x25, 0x89, 0xb7];
		let groups = convert_bits(&bytes, 8, 5, true).unwrap();
		assert_eq!(groups, vec![30, 28, 18, 24, 19, 13, 24]);
		let back = convert_bits(&groups, 5, 8, false).unwrap();
		assert_eq!(back, bytes);
	}

	#[test]
	fn test_convert_bits_rejects_dirty_padding() {
		// A lone 5-bit group cannot carry a whole byte.
		assert_eq!(convert_bits(&[0x1f], 5, 8, false), Err(Bech32Error::InvalidPadding));
	}
}
