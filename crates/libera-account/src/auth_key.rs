//! Authentication key derivation.
//!
//! An account's on-chain authentication key is the SHA3-256 digest of its
//! public key material followed by a scheme byte, and a fresh account's
//! address is the last 16 bytes of that digest. Rotating keys changes the
//! authentication key but never the address.

use libera_types::{hashing, AccountAddress, ACCOUNT_ADDRESS_LENGTH};
use std::fmt;

/// Scheme byte of single Ed25519 key material.
const ED25519_SCHEME: u8 = 0;
/// Scheme byte of threshold MultiEd25519 key material.
const MULTI_ED25519_SCHEME: u8 = 1;

/// A 32-byte account authentication key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuthenticationKey([u8; 32]);

impl AuthenticationKey {
	/// Derives the authentication key of a single Ed25519 public key.
	pub fn ed25519(public_key: &[u8]) -> Self {
		Self::derive(public_key, ED25519_SCHEME)
	}

	/// Derives the authentication key of MultiEd25519 public key material.
	pub fn multi_ed25519(public_key: &[u8]) -> Self {
		Self::derive(public_key, MULTI_ED25519_SCHEME)
	}

	fn derive(public_key: &[u8], scheme: u8) -> Self {
		let mut preimage = public_key.to_vec();
		preimage.push(scheme);
		Self(hashing::sha3_256(&preimage))
	}

	/// Returns the raw authentication key bytes.
	pub fn as_bytes(&self) -> &[u8; 32] {
		&self.0
	}

	/// Returns the key as bare lowercase hex, the form accounts report it
	/// in.
	pub fn to_hex(&self) -> String {
		hex::encode(self.0)
	}

	/// Returns the account address a fresh account under this key gets:
	/// the last 16 bytes of the key.
	pub fn derived_address(&self) -> AccountAddress {
		let mut address = [0u8; ACCOUNT_ADDRESS_LENGTH];
		address.copy_from_slice(&self.0[32 - ACCOUNT_ADDRESS_LENGTH..]);
		AccountAddress::new(address)
	}
}

impl fmt::Display for AuthenticationKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.to_hex())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::keys::{AccountKey, Ed25519KeyPair, MultiEd25519KeyPair};

	#[test]
	fn test_ed25519_derivation_appends_scheme_zero() {
		let pair = Ed25519KeyPair::from_seed([7u8; 32]);
		let key = AuthenticationKey::ed25519(&pair.public_key());

		let mut preimage = pair.public_key().to_vec();
		preimage.push(0);
		assert_eq!(key.as_bytes(), &hashing::sha3_256(&preimage));
	}

	#[test]
	fn test_schemes_never_collide() {
		let bytes = [9u8; 32];
		assert_ne!(
			AuthenticationKey::ed25519(&bytes),
			AuthenticationKey::multi_ed25519(&bytes)
		);
	}

	#[test]
	fn test_derived_address_is_key_suffix() {
		let key = AuthenticationKey::ed25519(&[7u8; 32]);
		assert_eq!(key.derived_address().as_bytes(), &key.as_bytes()[16..]);
		assert!(key.to_hex().ends_with(&key.derived_address().to_hex()));
	}

	#[test]
	fn test_account_key_picks_scheme_by_capability() {
		let single = AccountKey::from(Ed25519KeyPair::from_seed([1u8; 32]));
		assert_eq!(
			single.authentication_key(),
			AuthenticationKey::ed25519(&single.public_key_bytes())
		);

		let multi = AccountKey::from(
			MultiEd25519KeyPair::new(vec![[1u8; 32], [2u8; 32]], 2).unwrap(),
		);
		assert_eq!(
			multi.authentication_key(),
			AuthenticationKey::multi_ed25519(&multi.public_key_bytes())
		);
	}
}
