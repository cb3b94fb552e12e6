//! Canonical (wire) serialization helpers.
//!
//! Transactions are submitted to the ledger as the canonical serialization
//! of [`SignedTransaction`](crate::transaction::SignedTransaction), and the
//! same byte layout feeds signing pre-images and transaction hashes. The
//! encoding is bincode with its fixed layout: little-endian fixed-width
//! integers, `u64` length prefixes on sequences and strings, and `u32`
//! variant tags on enums. Identical values always produce identical bytes.

use serde::Serialize;

/// Errors produced by canonical serialization.
///
/// Serialization of the transaction types in this crate cannot fail on
/// well-formed values; a failure here indicates a bug and callers treat it
/// as fatal.
#[derive(Debug, thiserror::Error)]
pub enum CanonicalError {
	/// The underlying encoder reported a failure.
	#[error("canonical serialization failed: {0}")]
	Serialize(#[from] bincode::Error),
}

/// Serializes a value into its canonical wire bytes.
pub fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, CanonicalError> {
	Ok(bincode::serialize(value)?)
}
