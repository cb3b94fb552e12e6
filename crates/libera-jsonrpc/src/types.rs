//! Protocol types: methods, envelopes, errors, the transport trait.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

use libera_types::{ChainId, LedgerState};

/// JSON-RPC methods exposed by Libera full nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
	/// Lists the currencies known to the chain.
	GetCurrencies,
	/// Ledger metadata, latest or at a version.
	GetMetadata,
	/// State of one account.
	GetAccount,
	/// One transaction of an account, by sequence number.
	GetAccountTransaction,
	/// A range of transactions of an account.
	GetAccountTransactions,
	/// A range of transactions of the whole ledger.
	GetTransactions,
	/// A range of events of one event stream.
	GetEvents,
	/// Submits a signed transaction.
	Submit,
}

impl Method {
	/// The method name on the wire.
	pub fn as_str(&self) -> &'static str {
		match self {
			Method::GetCurrencies => "get_currencies",
			Method::GetMetadata => "get_metadata",
			Method::GetAccount => "get_account",
			Method::GetAccountTransaction => "get_account_transaction",
			Method::GetAccountTransactions => "get_account_transactions",
			Method::GetTransactions => "get_transactions",
			Method::GetEvents => "get_events",
			Method::Submit => "submit",
		}
	}
}

impl fmt::Display for Method {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// A JSON-RPC request: a method and its positional parameters.
#[derive(Debug, Clone)]
pub struct Request {
	/// Method to invoke.
	pub method: Method,
	/// Positional parameters, already JSON-encoded.
	pub params: Vec<serde_json::Value>,
}

impl Request {
	/// Creates a request.
	pub fn new(method: Method, params: Vec<serde_json::Value>) -> Self {
		Self { method, params }
	}
}

/// The response envelope every Libera node answers with.
///
/// On top of the standard JSON-RPC 2.0 fields, every response, error
/// responses included, carries the answering node's chain id and the
/// ledger state it had seen at answer time. The client layer feeds those
/// into its chain check and staleness tracking on every call.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
	/// Protocol version echoed by the node.
	#[serde(default)]
	pub jsonrpc: String,
	/// Result value for successful calls; null and absent both mean "no
	/// result", which nullable reads use for "not found".
	#[serde(default)]
	pub result: Option<serde_json::Value>,
	/// Error object for failed calls.
	#[serde(default)]
	pub error: Option<RpcError>,
	/// Chain id of the answering node.
	pub libera_chain_id: u8,
	/// Ledger version the node had seen when answering.
	pub libera_ledger_version: u64,
	/// Ledger timestamp the node had seen when answering, in microseconds.
	pub libera_ledger_timestampusec: u64,
}

impl Response {
	/// The answering node's chain id.
	pub fn chain_id(&self) -> ChainId {
		ChainId::new(self.libera_chain_id)
	}

	/// The ledger state snapshot the response was served at.
	pub fn ledger_state(&self) -> LedgerState {
		LedgerState::new(self.libera_ledger_version, self.libera_ledger_timestampusec)
	}
}

/// An application-level JSON-RPC error, exactly as the node reported it.
#[derive(Debug, Clone, PartialEq, Deserialize, Error)]
#[error("JSON-RPC error {code}: {message}")]
pub struct RpcError {
	/// Numeric error code.
	pub code: i64,
	/// Human-readable message.
	pub message: String,
	/// Optional structured details.
	#[serde(default)]
	pub data: Option<serde_json::Value>,
}

/// Low-level transport errors.
///
/// Cloneable and comparable so test transports can script them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
	/// Invalid transport configuration.
	#[error("transport configuration invalid: {message}")]
	Config {
		/// Human-readable description.
		message: String,
	},
	/// Transport operation failed.
	#[error("transport failure: {message}")]
	Failure {
		/// Human-readable description.
		message: String,
	},
}

/// Carrier interface between the client and a node.
///
/// Implementations move one request to one node and bring its envelope
/// back, nothing more. Retry, chain validation, and staleness handling
/// belong to the caller.
#[async_trait]
pub trait RpcTransport: Send + Sync {
	/// Sends one request and returns the node's response envelope.
	async fn send_request(&self, request: Request) -> Result<Response, TransportError>;
}
