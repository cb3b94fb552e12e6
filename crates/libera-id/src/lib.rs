//! Account identifier codec for the Libera client SDK.
//!
//! An account identifier is the human-facing form of an account address:
//! a network prefix, a format version, the 16-byte account address, and an
//! 8-byte sub-address, carried in a checksummed bech32 string such as
//! `lbr1p7ujcndcl7nudzwt8fglhx6wxn08kgs5tm6mz4usw5p72t`. The checksum
//! catches typos before a payment leaves the building, the prefix stops
//! mainnet identifiers from being replayed against test networks, and the
//! version byte leaves room for future formats.

mod bech32;

pub use bech32::Bech32Error;

use libera_types::{
	AccountAddress, AddressError, SubAddress, ACCOUNT_ADDRESS_LENGTH, SUB_ADDRESS_LENGTH,
};
use thiserror::Error;

/// Network prefix of mainnet account identifiers.
pub const MAINNET_PREFIX: &str = "lbr";
/// Network prefix of testnet account identifiers.
pub const TESTNET_PREFIX: &str = "tlb";
/// The identifier format version this crate emits and accepts.
pub const VERSION_1: u8 = 1;

/// Errors produced while encoding or decoding an account identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
	/// The bech32 layer rejected the string.
	#[error(transparent)]
	Codec(#[from] Bech32Error),
	/// The decoded payload is not an address plus a sub-address.
	#[error("invalid account identifier, account address and sub-address length does not match")]
	PayloadLength,
	/// The identifier was minted for a different network.
	#[error("invalid account identifier: expected network prefix {expected:?}, got {actual:?}")]
	PrefixMismatch {
		/// The prefix the caller demanded.
		expected: String,
		/// The prefix the string actually carries.
		actual: String,
	},
	/// The identifier uses a format version this crate does not know.
	#[error("invalid account identifier: unknown version {0}")]
	UnknownVersion(u8),
	/// The string has no version group at all.
	#[error("invalid account identifier: missing version")]
	MissingVersion,
	/// The decoded payload failed address construction.
	#[error("invalid account identifier: {0}")]
	Address(#[from] AddressError),
}

/// A parsed account identifier.
///
/// An identifier without a sub-address carries the all-zero sub-address;
/// decoding never yields "absent".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountIdentifier {
	/// Network prefix the identifier was minted for.
	pub prefix: String,
	/// Identifier format version.
	pub version: u8,
	/// The account address.
	pub account_address: AccountAddress,
	/// The sub-address; all-zero when absent.
	pub sub_address: SubAddress,
}

impl AccountIdentifier {
	/// Creates an identifier for the given network.
	///
	/// Passing `None` for the sub-address is the same as passing the
	/// all-zero sub-address.
	pub fn new(
		prefix: &str,
		account_address: AccountAddress,
		sub_address: Option<SubAddress>,
	) -> Self {
		Self {
			prefix: prefix.to_string(),
			version: VERSION_1,
			account_address,
			sub_address: sub_address.unwrap_or(SubAddress::ZERO),
		}
	}

	/// Encodes the identifier into its bech32 string form.
	pub fn encode(&self) -> Result<String, IdentifierError> {
		let mut payload = self.account_address.to_vec();
		payload.extend_from_slice(self.sub_address.as_bytes());
		let mut data = vec![self.version];
		data.extend(bech32::convert_bits(&payload, 8, 5, true)?);
		Ok(bech32::encode(&self.prefix, &data)?)
	}

	/// Decodes an identifier, demanding it was minted for `prefix`.
	pub fn decode(prefix: &str, encoded: &str) -> Result<Self, IdentifierError> {
		let (actual_prefix, data) = bech32::decode(encoded)?;
		if actual_prefix != prefix {
			return Err(IdentifierError::PrefixMismatch {
				expected: prefix.to_string(),
				actual: actual_prefix,
			});
		}
		let (&version, payload_groups) =
			data.split_first().ok_or(IdentifierError::MissingVersion)?;
		if version != VERSION_1 {
			return Err(IdentifierError::UnknownVersion(version));
		}
		let payload = bech32::convert_bits(payload_groups, 5, 8, false)?;
		if payload.len() != ACCOUNT_ADDRESS_LENGTH + SUB_ADDRESS_LENGTH {
			return Err(IdentifierError::PayloadLength);
		}
		Ok(Self {
			prefix: actual_prefix,
			version,
			account_address: AccountAddress::try_from(&payload[..ACCOUNT_ADDRESS_LENGTH])?,
			sub_address: SubAddress::try_from(&payload[ACCOUNT_ADDRESS_LENGTH..])?,
		})
	}

	/// Returns the sub-address, or `None` when the identifier carries the
	/// reserved all-zero sub-address.
	pub fn sub_address(&self) -> Option<SubAddress> {
		if self.sub_address.is_zero() {
			None
		} else {
			Some(self.sub_address)
		}
	}
}
