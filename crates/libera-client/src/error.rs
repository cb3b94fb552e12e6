//! Error taxonomy of the client.
//!
//! Five families with different fates: stale responses are advisory and
//! the only errors the client itself ever absorbs; chain mismatches are
//! configuration-fatal and never retried; server-reported JSON-RPC errors
//! surface verbatim; transaction-outcome errors are terminal verdicts of
//! a wait; everything else is transport noise a retry may cure.

use thiserror::Error;

use libera_jsonrpc::{RpcError, TransportError};
use libera_types::{AccountAddress, CanonicalError, ChainId, LedgerState, TransactionView};
use std::time::Duration;

/// A replica answered from further in the past than what this client has
/// already seen.
///
/// The tracked state is left untouched when this is raised; the response
/// that caused it must not be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("stale response: expected ledger state at least {client}, got {server}")]
pub struct StaleResponseError {
	/// The state this client had already seen.
	pub client: LedgerState,
	/// The state the replica answered with.
	pub server: LedgerState,
}

/// Errors surfaced by client calls.
#[derive(Debug, Error)]
pub enum Error {
	/// The transport could not complete the exchange.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The node reported an application-level error, passed on verbatim.
	#[error(transparent)]
	Rpc(#[from] RpcError),
	/// The answering replica was behind this client's view.
	#[error(transparent)]
	StaleResponse(#[from] StaleResponseError),
	/// The node serves a different network than this client was built for.
	#[error("chain id mismatch: expected {expected}, got {actual}")]
	ChainIdMismatch {
		/// Chain id the client was configured with.
		expected: ChainId,
		/// Chain id the node reported.
		actual: ChainId,
	},
	/// The response envelope was well-formed but its result was not.
	#[error("invalid response: {0}")]
	InvalidResponse(String),
	/// A request payload could not be serialized.
	#[error(transparent)]
	Canonical(#[from] CanonicalError),
	/// Another transaction is committed under the waited-for sequence
	/// number.
	#[error("transaction hash mismatch: expected {expected}, got {actual}")]
	HashMismatch {
		/// Hash of the transaction the caller submitted.
		expected: String,
		/// Hash of the transaction actually committed.
		actual: String,
		/// The committed transaction.
		txn: Box<TransactionView>,
	},
	/// The waited-for transaction committed but did not execute.
	#[error("transaction execution failed: {:?}", .0.vm_status)]
	TransactionExecutionFailed(Box<TransactionView>),
	/// Ledger time passed the transaction's expiration before it was seen.
	#[error(
		"transaction expired: expiration {expiration_timestamp_secs}s, ledger time {ledger_timestamp_usecs}us"
	)]
	TransactionExpired {
		/// Expiration the transaction carried, in seconds.
		expiration_timestamp_secs: u64,
		/// Ledger time the expiry was observed at, in microseconds.
		ledger_timestamp_usecs: u64,
	},
	/// The wait budget ran out without a terminal answer.
	#[error("transaction not found within {timeout:?}: address {address}, sequence number {sequence_number}")]
	WaitTimeout {
		/// Sender account that was polled.
		address: AccountAddress,
		/// Sequence number that was polled.
		sequence_number: u64,
		/// Wall-clock budget that ran out.
		timeout: Duration,
	},
}

impl Error {
	/// True for errors another attempt against the same (or another)
	/// replica may cure.
	///
	/// Server-reported errors and chain mismatches are deterministic and
	/// excluded; so are all transaction-outcome verdicts.
	pub fn is_retryable(&self) -> bool {
		matches!(
			self,
			Error::Transport(_) | Error::StaleResponse(_) | Error::InvalidResponse(_)
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_stale_response_display() {
		let stale = StaleResponseError {
			client: LedgerState::new(100, 2_000),
			server: LedgerState::new(90, 1_000),
		};
		assert_eq!(
			stale.to_string(),
			"stale response: expected ledger state at least (version: 100, timestamp: 2000us), \
			 got (version: 90, timestamp: 1000us)"
		);
	}

	#[test]
	fn test_retryable_partition() {
		let transport = Error::Transport(TransportError::Failure {
			message: "connection reset".to_string(),
		});
		let stale = Error::StaleResponse(StaleResponseError {
			client: LedgerState::new(2, 2),
			server: LedgerState::new(1, 1),
		});
		let invalid = Error::InvalidResponse("missing field".to_string());
		assert!(transport.is_retryable());
		assert!(stale.is_retryable());
		assert!(invalid.is_retryable());

		let rpc = Error::Rpc(RpcError {
			code: -32600,
			message: "invalid request".to_string(),
			data: None,
		});
		let chain = Error::ChainIdMismatch {
			expected: ChainId::TESTNET,
			actual: ChainId::MAINNET,
		};
		assert!(!rpc.is_retryable());
		assert!(!chain.is_retryable());
	}

	#[test]
	fn test_rpc_error_surfaces_verbatim() {
		let err = Error::Rpc(RpcError {
			code: -32001,
			message: "VM status error".to_string(),
			data: None,
		});
		assert_eq!(err.to_string(), "JSON-RPC error -32001: VM status error");
	}
}
