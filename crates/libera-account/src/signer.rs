//! Transaction signing.
//!
//! One signing path for every kind of key: serialize the raw transaction
//! into its domain-prefixed signing message, sign it, and let the key
//! wrap the signature in the authenticator variant matching its scheme.

use libera_types::{RawTransaction, SignedTransaction};

use crate::keys::AccountKey;
use crate::AccountError;

/// Signs a raw transaction, producing the transaction `submit` sends.
///
/// Signing is pure computation: no I/O, no retries. A failure means the
/// transaction could not be serialized and is fatal to the call.
pub fn sign_transaction(
	key: &AccountKey,
	raw_txn: RawTransaction,
) -> Result<SignedTransaction, AccountError> {
	let message = raw_txn
		.signing_message()
		.map_err(|e| AccountError::SigningFailed(e.to_string()))?;
	let signature = key.sign(&message);
	let authenticator = key.authenticator(signature);
	Ok(SignedTransaction::new(raw_txn, authenticator))
}
