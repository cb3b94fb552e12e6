//! Ed25519 and MultiEd25519 key pairs.
//!
//! Single-key accounts hold one Ed25519 pair. Multi-signature accounts
//! hold N pairs (at most 32) of which a threshold K must sign. Both live
//! behind [`AccountKey`], whose `is_multi` capability is the one place
//! the rest of the SDK asks which kind it is dealing with.

use ed25519_dalek::{Signer, SigningKey};
use std::fmt;
use zeroize::Zeroize;

use libera_types::TransactionAuthenticator;

use crate::auth_key::AuthenticationKey;
use crate::AccountError;

/// Length in bytes of an Ed25519 public key.
pub const ED25519_PUBLIC_KEY_LENGTH: usize = 32;
/// Length in bytes of an Ed25519 signature.
pub const ED25519_SIGNATURE_LENGTH: usize = 64;
/// Most keys a multi-signature account can hold.
pub const MAX_MULTI_ED25519_KEYS: usize = 32;
/// Length in bytes of the signer bitmap trailing a MultiEd25519 signature.
pub const BITMAP_LENGTH: usize = 4;

/// A single Ed25519 key pair.
pub struct Ed25519KeyPair {
	signing_key: SigningKey,
}

impl Ed25519KeyPair {
	/// Generates a key pair from the system random source.
	pub fn generate() -> Self {
		Self {
			signing_key: SigningKey::from_bytes(&rand::random::<[u8; 32]>()),
		}
	}

	/// Derives a key pair deterministically from a 32-byte seed.
	pub fn from_seed(seed: [u8; 32]) -> Self {
		let mut seed = seed;
		let signing_key = SigningKey::from_bytes(&seed);
		seed.zeroize();
		Self { signing_key }
	}

	/// Derives a key pair from a hex-encoded 32-byte seed.
	pub fn from_hex(seed_hex: &str) -> Result<Self, AccountError> {
		let mut decoded = hex::decode(seed_hex)
			.map_err(|e| AccountError::InvalidKey(format!("seed is not hex: {}", e)))?;
		let result = <[u8; 32]>::try_from(decoded.as_slice())
			.map(Self::from_seed)
			.map_err(|_| {
				AccountError::InvalidKey(format!("seed must be 32 bytes, got {}", decoded.len()))
			});
		decoded.zeroize();
		result
	}

	/// Returns the 32-byte public key.
	pub fn public_key(&self) -> [u8; ED25519_PUBLIC_KEY_LENGTH] {
		self.signing_key.verifying_key().to_bytes()
	}

	/// Signs a message, returning the 64-byte signature.
	pub fn sign(&self, message: &[u8]) -> Vec<u8> {
		self.signing_key.sign(message).to_bytes().to_vec()
	}
}

impl fmt::Debug for Ed25519KeyPair {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Ed25519KeyPair")
			.field("public_key", &hex::encode(self.public_key()))
			.finish_non_exhaustive()
	}
}

/// A K-of-N threshold Ed25519 key set.
///
/// The public form is the N concatenated public keys followed by the
/// threshold byte. A signature is the first K partial signatures in key
/// order, followed by a 4-byte bitmap whose bit i (most significant bit
/// first) marks key i as a signer.
pub struct MultiEd25519KeyPair {
	keys: Vec<SigningKey>,
	threshold: u8,
}

impl MultiEd25519KeyPair {
	/// Builds a key set from 32-byte seeds and a signing threshold.
	pub fn new(seeds: Vec<[u8; 32]>, threshold: u8) -> Result<Self, AccountError> {
		if seeds.is_empty() || seeds.len() > MAX_MULTI_ED25519_KEYS {
			return Err(AccountError::InvalidKey(format!(
				"key count must be between 1 and {}, got {}",
				MAX_MULTI_ED25519_KEYS,
				seeds.len()
			)));
		}
		if threshold == 0 || usize::from(threshold) > seeds.len() {
			return Err(AccountError::InvalidKey(format!(
				"threshold must be between 1 and {}, got {}",
				seeds.len(),
				threshold
			)));
		}
		let keys = seeds
			.into_iter()
			.map(|mut seed| {
				let key = SigningKey::from_bytes(&seed);
				seed.zeroize();
				key
			})
			.collect();
		Ok(Self { keys, threshold })
	}

	/// Generates a key set from the system random source.
	pub fn generate(num_keys: usize, threshold: u8) -> Result<Self, AccountError> {
		let seeds = (0..num_keys).map(|_| rand::random::<[u8; 32]>()).collect();
		Self::new(seeds, threshold)
	}

	/// Returns the signing threshold K.
	pub fn threshold(&self) -> u8 {
		self.threshold
	}

	/// Returns the concatenated public keys followed by the threshold byte.
	pub fn public_key_bytes(&self) -> Vec<u8> {
		let mut bytes = Vec::with_capacity(self.keys.len() * ED25519_PUBLIC_KEY_LENGTH + 1);
		for key in &self.keys {
			bytes.extend_from_slice(&key.verifying_key().to_bytes());
		}
		bytes.push(self.threshold);
		bytes
	}

	/// Signs a message with the first K keys, returning the concatenated
	/// partial signatures and the signer bitmap.
	pub fn sign(&self, message: &[u8]) -> Vec<u8> {
		let signers = usize::from(self.threshold);
		let mut bytes = Vec::with_capacity(signers * ED25519_SIGNATURE_LENGTH + BITMAP_LENGTH);
		let mut bitmap = [0u8; BITMAP_LENGTH];
		for (i, key) in self.keys.iter().take(signers).enumerate() {
			bytes.extend_from_slice(&key.sign(message).to_bytes());
			bitmap[i / 8] |= 0x80 >> (i % 8);
		}
		bytes.extend_from_slice(&bitmap);
		bytes
	}
}

impl fmt::Debug for MultiEd25519KeyPair {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MultiEd25519KeyPair")
			.field("num_keys", &self.keys.len())
			.field("threshold", &self.threshold)
			.finish_non_exhaustive()
	}
}

/// The key material of an account, either kind.
#[derive(Debug)]
pub enum AccountKey {
	/// A single-key account.
	Single(Ed25519KeyPair),
	/// A threshold multi-signature account.
	Multi(MultiEd25519KeyPair),
}

impl AccountKey {
	/// True for threshold multi-signature key material.
	///
	/// Everything scheme-dependent in the SDK branches on this one
	/// capability: authenticator variants, authentication key scheme
	/// bytes, signature layouts.
	pub fn is_multi(&self) -> bool {
		matches!(self, AccountKey::Multi(_))
	}

	/// Returns the public key material in its wire form.
	pub fn public_key_bytes(&self) -> Vec<u8> {
		match self {
			AccountKey::Single(pair) => pair.public_key().to_vec(),
			AccountKey::Multi(pair) => pair.public_key_bytes(),
		}
	}

	/// Signs a message with the underlying key material.
	pub fn sign(&self, message: &[u8]) -> Vec<u8> {
		match self {
			AccountKey::Single(pair) => pair.sign(message),
			AccountKey::Multi(pair) => pair.sign(message),
		}
	}

	/// Wraps a signature into the authenticator variant matching this
	/// key's scheme.
	pub fn authenticator(&self, signature: Vec<u8>) -> TransactionAuthenticator {
		let public_key = self.public_key_bytes();
		if self.is_multi() {
			TransactionAuthenticator::MultiEd25519 {
				public_key,
				signature,
			}
		} else {
			TransactionAuthenticator::Ed25519 {
				public_key,
				signature,
			}
		}
	}

	/// Derives the authentication key for this key material.
	pub fn authentication_key(&self) -> AuthenticationKey {
		if self.is_multi() {
			AuthenticationKey::multi_ed25519(&self.public_key_bytes())
		} else {
			AuthenticationKey::ed25519(&self.public_key_bytes())
		}
	}
}

impl From<Ed25519KeyPair> for AccountKey {
	fn from(pair: Ed25519KeyPair) -> Self {
		AccountKey::Single(pair)
	}
}

impl From<MultiEd25519KeyPair> for AccountKey {
	fn from(pair: MultiEd25519KeyPair) -> Self {
		AccountKey::Multi(pair)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ed25519_dalek::{Signature, Verifier, VerifyingKey};

	#[test]
	fn test_from_seed_is_deterministic() {
		let a = Ed25519KeyPair::from_seed([42u8; 32]);
		let b = Ed25519KeyPair::from_seed([42u8; 32]);
		assert_eq!(a.public_key(), b.public_key());
	}

	#[test]
	fn test_generate_produces_distinct_keys() {
		assert_ne!(
			Ed25519KeyPair::generate().public_key(),
			Ed25519KeyPair::generate().public_key()
		);
	}

	#[test]
	fn test_from_hex_round_trip() {
		let seed_hex = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
		let pair = Ed25519KeyPair::from_hex(seed_hex).unwrap();
		assert_eq!(pair.public_key(), Ed25519KeyPair::from_seed([
			0x9d, 0x61, 0xb1, 0x9d, 0xef, 0xfd, 0x5a, 0x60, 0xba, 0x84, 0x4a, 0xf4, 0x92, 0xec,
			0x2c, 0xc4, 0x44, 0x49, 0xc5, 0x69, 0x7b, 0x32, 0x69, 0x19, 0x70, 0x3b, 0xac, 0x03,
			0x1c, 0xae, 0x7f, 0x60,
		])
		.public_key());
	}

	#[test]
	fn test_from_hex_rejects_short_seed() {
		let err = Ed25519KeyPair::from_hex("9d61").unwrap_err();
		assert!(err.to_string().starts_with("Invalid key"));
	}

	#[test]
	fn test_signature_verifies() {
		let pair = Ed25519KeyPair::from_seed([7u8; 32]);
		let signature = pair.sign(b"message");
		let verifying = VerifyingKey::from_bytes(&pair.public_key()).unwrap();
		let signature = Signature::from_bytes(signature.as_slice().try_into().unwrap());
		assert!(verifying.verify(b"message", &signature).is_ok());
	}

	#[test]
	fn test_debug_redacts_secrets() {
		let pair = Ed25519KeyPair::from_seed([42u8; 32]);
		let debug = format!("{:?}", pair);
		assert!(!debug.contains(&hex::encode([42u8; 32])));
		assert!(debug.contains(&hex::encode(pair.public_key())));
	}

	#[test]
	fn test_multi_public_key_layout() {
		let pair = MultiEd25519KeyPair::new(vec![[1u8; 32], [2u8; 32], [3u8; 32]], 2).unwrap();
		let bytes = pair.public_key_bytes();
		assert_eq!(bytes.len(), 3 * ED25519_PUBLIC_KEY_LENGTH + 1);
		assert_eq!(bytes[bytes.len() - 1], 2);
		assert_eq!(
			&bytes[..ED25519_PUBLIC_KEY_LENGTH],
			Ed25519KeyPair::from_seed([1u8; 32]).public_key()
		);
	}

	#[test]
	fn test_multi_signature_layout_and_bitmap() {
		let pair = MultiEd25519KeyPair::new(vec![[1u8; 32], [2u8; 32], [3u8; 32]], 2).unwrap();
		let signature = pair.sign(b"message");
		assert_eq!(signature.len(), 2 * ED25519_SIGNATURE_LENGTH + BITMAP_LENGTH);
		// Keys 0 and 1 signed: bits 0 and 1 of the first bitmap byte.
		assert_eq!(&signature[2 * ED25519_SIGNATURE_LENGTH..], &[0xc0, 0x00, 0x00, 0x00]);
	}

	#[test]
	fn test_multi_partial_signatures_verify() {
		let seeds = vec![[1u8; 32], [2u8; 32], [3u8; 32]];
		let pair = MultiEd25519KeyPair::new(seeds.clone(), 2).unwrap();
		let combined = pair.sign(b"message");
		for (i, seed) in seeds.into_iter().take(2).enumerate() {
			let single = Ed25519KeyPair::from_seed(seed);
			let verifying = VerifyingKey::from_bytes(&single.public_key()).unwrap();
			let part = &combined[i * ED25519_SIGNATURE_LENGTH..(i + 1) * ED25519_SIGNATURE_LENGTH];
			let part = Signature::from_bytes(part.try_into().unwrap());
			assert!(verifying.verify(b"message", &part).is_ok());
		}
	}

	#[test]
	fn test_multi_validation_bounds() {
		assert!(MultiEd25519KeyPair::new(vec![], 1).is_err());
		assert!(MultiEd25519KeyPair::new(vec![[0u8; 32]; 33], 1).is_err());
		assert!(MultiEd25519KeyPair::new(vec![[0u8; 32]; 3], 0).is_err());
		assert!(MultiEd25519KeyPair::new(vec![[0u8; 32]; 3], 4).is_err());
		assert!(MultiEd25519KeyPair::new(vec![[0u8; 32]; 3], 3).is_ok());
		assert!(MultiEd25519KeyPair::generate(32, 32).is_ok());
	}

	#[test]
	fn test_account_key_capability() {
		let single = AccountKey::from(Ed25519KeyPair::generate());
		let multi = AccountKey::from(MultiEd25519KeyPair::generate(2, 1).unwrap());
		assert!(!single.is_multi());
		assert!(multi.is_multi());
	}

	#[test]
	fn test_authenticator_variant_follows_capability() {
		let single = AccountKey::from(Ed25519KeyPair::generate());
		let multi = AccountKey::from(MultiEd25519KeyPair::generate(2, 1).unwrap());
		assert!(matches!(
			single.authenticator(single.sign(b"m")),
			TransactionAuthenticator::Ed25519 { .. }
		));
		assert!(matches!(
			multi.authenticator(multi.sign(b"m")),
			TransactionAuthenticator::MultiEd25519 { .. }
		));
	}
}
