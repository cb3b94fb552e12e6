//! Domain-separated SHA3-256 hashing.
//!
//! Every hashable structure on the ledger gets its own hash domain: the
//! 32-byte prefix `SHA3-256("LIBERA::" ‖ name)` is prepended to the
//! structure's canonical bytes before hashing or signing. Reusing a
//! signature or hash across structure kinds is therefore impossible.

use sha3::{Digest, Sha3_256};

/// Salt prepended to every hash domain name.
const HASH_SALT: &[u8] = b"LIBERA::";

/// Computes the 32-byte domain prefix for a named structure kind.
pub fn hash_prefix(name: &str) -> [u8; 32] {
	let mut hasher = Sha3_256::new();
	hasher.update(HASH_SALT);
	hasher.update(name.as_bytes());
	hasher.finalize().into()
}

/// Computes the SHA3-256 digest of a byte slice.
pub fn sha3_256(bytes: &[u8]) -> [u8; 32] {
	let mut hasher = Sha3_256::new();
	hasher.update(bytes);
	hasher.finalize().into()
}
