//! Scripted transport and envelope builders shared by the unit tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use libera_jsonrpc::{Request, Response, RpcError, RpcTransport, TransportError};
use libera_types::{ChainId, TransactionDataView, TransactionView, VmStatusView};

/// Chain id every scripted envelope answers with unless stated otherwise.
pub const CHAIN: ChainId = ChainId::TESTING;

/// One scripted exchange: either a node envelope or a transport failure.
pub type Scripted = Result<Response, TransportError>;

/// Transport that replays a script of responses in order.
pub struct MockTransport {
	responses: Mutex<VecDeque<Scripted>>,
	calls: AtomicUsize,
}

impl MockTransport {
	pub fn new(responses: Vec<Scripted>) -> Self {
		Self {
			responses: Mutex::new(responses.into()),
			calls: AtomicUsize::new(0),
		}
	}

	/// Number of requests the client actually sent.
	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl RpcTransport for MockTransport {
	async fn send_request(&self, _request: Request) -> Result<Response, TransportError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.responses
			.lock()
			.pop_front()
			.unwrap_or_else(|| {
				Err(TransportError::Failure {
					message: "script exhausted".to_string(),
				})
			})
	}
}

fn envelope(chain: ChainId, version: u64, timestamp_usecs: u64) -> Response {
	Response {
		jsonrpc: "2.0".to_string(),
		result: None,
		error: None,
		libera_chain_id: chain.value(),
		libera_ledger_version: version,
		libera_ledger_timestampusec: timestamp_usecs,
	}
}

/// A successful envelope carrying `result`.
pub fn ok_response(result: serde_json::Value, version: u64, timestamp_usecs: u64) -> Scripted {
	let mut response = envelope(CHAIN, version, timestamp_usecs);
	response.result = Some(result);
	Ok(response)
}

/// A successful envelope whose result is JSON null ("not found").
pub fn not_found_response(version: u64, timestamp_usecs: u64) -> Scripted {
	ok_response(serde_json::Value::Null, version, timestamp_usecs)
}

/// A successful envelope carrying a committed user transaction.
pub fn transaction_response(
	hash: &str,
	vm_status: VmStatusView,
	version: u64,
	timestamp_usecs: u64,
) -> Scripted {
	let view = TransactionView {
		version,
		hash: hash.to_string(),
		transaction: TransactionDataView::User {
			sender: "f72589b71ff4f8d139674a3f7369c69b".to_string(),
			signature_scheme: "Scheme::Ed25519".to_string(),
			signature: "22".to_string(),
			public_key: "11".to_string(),
			sequence_number: 5,
			chain_id: CHAIN.value(),
			max_gas_amount: 1_000_000,
			gas_unit_price: 0,
			gas_currency: "LBR".to_string(),
			expiration_timestamp_secs: 1_602_888_396,
			script_hash: "aa".to_string(),
		},
		events: vec![],
		vm_status,
		gas_used: 175,
	};
	ok_response(
		serde_json::to_value(view).unwrap(),
		version,
		timestamp_usecs,
	)
}

/// An envelope carrying a server-reported error.
pub fn error_response(code: i64, message: &str, version: u64, timestamp_usecs: u64) -> Scripted {
	let mut response = envelope(CHAIN, version, timestamp_usecs);
	response.error = Some(RpcError {
		code,
		message: message.to_string(),
		data: None,
	});
	Ok(response)
}

/// A successful envelope answered by a node on another network.
pub fn wrong_chain_response(chain: ChainId, version: u64, timestamp_usecs: u64) -> Scripted {
	let mut response = envelope(chain, version, timestamp_usecs);
	response.result = Some(serde_json::Value::Null);
	Ok(response)
}

/// A transport-level failure.
pub fn transport_failure(message: &str) -> Scripted {
	Err(TransportError::Failure {
		message: message.to_string(),
	})
}
