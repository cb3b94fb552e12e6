//! Account management module for the Libera client SDK.
//!
//! This module owns everything between a secret seed and a submittable
//! transaction: Ed25519 and threshold MultiEd25519 key pairs, the
//! authentication keys accounts are created under, and the signing path
//! that turns a raw transaction into a signed one.

use thiserror::Error;

/// Authentication key derivation.
pub mod auth_key;
/// Ed25519 and MultiEd25519 key pairs.
pub mod keys;
/// Transaction signing.
pub mod signer;

pub use auth_key::AuthenticationKey;
pub use keys::{AccountKey, Ed25519KeyPair, MultiEd25519KeyPair};
pub use signer::sign_transaction;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	/// Error that occurs when signing operations fail.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
}
