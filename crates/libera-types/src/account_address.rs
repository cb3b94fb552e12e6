//! Account address types for the Libera ledger.
//!
//! Libera accounts are identified by a 16-byte address, optionally refined
//! by an 8-byte sub-address that routes funds within a custodial account.
//! Both types parse from lowercase hex (with or without a `0x` prefix) and
//! display as bare lowercase hex.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length in bytes of an on-chain account address.
pub const ACCOUNT_ADDRESS_LENGTH: usize = 16;
/// Length in bytes of a sub-address.
pub const SUB_ADDRESS_LENGTH: usize = 8;

/// Errors produced when constructing an address from external input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
	/// The input could not be interpreted as a 16-byte account address.
	#[error("invalid account address: {0}")]
	InvalidAccountAddress(String),
	/// The input could not be interpreted as an 8-byte sub-address.
	#[error("invalid sub address: {0}")]
	InvalidSubAddress(String),
}

/// A 16-byte Libera account address.
///
/// Serializes canonically as its raw bytes; the JSON-RPC service exchanges
/// addresses as bare lowercase hex strings, which `Display` and `FromStr`
/// provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountAddress([u8; ACCOUNT_ADDRESS_LENGTH]);

impl AccountAddress {
	/// Creates an address from its raw bytes.
	pub const fn new(bytes: [u8; ACCOUNT_ADDRESS_LENGTH]) -> Self {
		Self(bytes)
	}

	/// Parses an address from a hex string, accepting an optional `0x` prefix.
	pub fn from_hex(s: &str) -> Result<Self, AddressError> {
		let stripped = s.strip_prefix("0x").unwrap_or(s);
		let bytes = hex::decode(stripped)
			.map_err(|e| AddressError::InvalidAccountAddress(format!("{} ({})", s, e)))?;
		Self::try_from(bytes.as_slice())
	}

	/// Returns the raw address bytes.
	pub fn as_bytes(&self) -> &[u8; ACCOUNT_ADDRESS_LENGTH] {
		&self.0
	}

	/// Returns the address as an owned byte vector.
	pub fn to_vec(&self) -> Vec<u8> {
		self.0.to_vec()
	}

	/// Returns the address as bare lowercase hex.
	pub fn to_hex(&self) -> String {
		hex::encode(self.0)
	}
}

impl TryFrom<&[u8]> for AccountAddress {
	type Error = AddressError;

	fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
		let bytes: [u8; ACCOUNT_ADDRESS_LENGTH] = bytes.try_into().map_err(|_| {
			AddressError::InvalidAccountAddress(format!(
				"expected {} bytes, got {}",
				ACCOUNT_ADDRESS_LENGTH,
				bytes.len()
			))
		})?;
		Ok(Self(bytes))
	}
}

impl FromStr for AccountAddress {
	type Err = AddressError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_hex(s)
	}
}

impl fmt::Display for AccountAddress {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.to_hex())
	}
}

/// An 8-byte sub-address within a custodial account.
///
/// The all-zero sub-address is reserved: it marks an account identifier that
/// carries no sub-address at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubAddress([u8; SUB_ADDRESS_LENGTH]);

impl SubAddress {
	/// The reserved all-zero sub-address.
	pub const ZERO: SubAddress = SubAddress([0u8; SUB_ADDRESS_LENGTH]);

	/// Creates a sub-address from its raw bytes.
	pub const fn new(bytes: [u8; SUB_ADDRESS_LENGTH]) -> Self {
		Self(bytes)
	}

	/// Parses a sub-address from a hex string, accepting an optional `0x`
	/// prefix.
	pub fn from_hex(s: &str) -> Result<Self, AddressError> {
		let stripped = s.strip_prefix("0x").unwrap_or(s);
		let bytes = hex::decode(stripped)
			.map_err(|e| AddressError::InvalidSubAddress(format!("{} ({})", s, e)))?;
		Self::try_from(bytes.as_slice())
	}

	/// Returns the raw sub-address bytes.
	pub fn as_bytes(&self) -> &[u8; SUB_ADDRESS_LENGTH] {
		&self.0
	}

	/// Returns the sub-address as bare lowercase hex.
	pub fn to_hex(&self) -> String {
		hex::encode(self.0)
	}

	/// Returns true for the reserved all-zero sub-address.
	pub fn is_zero(&self) -> bool {
		self.0 == [0u8; SUB_ADDRESS_LENGTH]
	}
}

impl TryFrom<&[u8]> for SubAddress {
	type Error = AddressError;

	fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
		let bytes: [u8; SUB_ADDRESS_LENGTH] = bytes.try_into().map_err(|_| {
			AddressError::InvalidSubAddress(format!(
				"expected {} bytes, got {}",
				SUB_ADDRESS_LENGTH,
				bytes.len()
			))
		})?;
		Ok(Self(bytes))
	}
}

impl FromStr for SubAddress {
	type Err = AddressError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_hex(s)
	}
}

impl fmt::Display for SubAddress {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.to_hex())
	}
}
