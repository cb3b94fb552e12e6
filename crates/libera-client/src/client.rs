//! The consistency-aware JSON-RPC client.
//!
//! Every call runs the same gauntlet: send the request, check the
//! answering node's chain id against the configured one, offer the
//! response's ledger snapshot to the tracker, surface any server-reported
//! error verbatim, then decode the result. What differs per call is only
//! its [`CallPolicy`]: reads retry transient failures and treat a stale
//! replica as an error; `submit` does neither, because an acknowledgement
//! by any replica is an acceptance.

use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use libera_jsonrpc::{HttpTransport, Method, Request, Response, RpcTransport, TransportError};
use libera_types::{
	AccountAddress, AccountView, ChainId, CurrencyInfoView, EventView, LedgerState, MetadataView,
	SignedTransaction, TransactionView,
};

use crate::error::Error;
use crate::retry::RetryPolicy;
use crate::state::LedgerStateTracker;
use crate::waiter::DEFAULT_WAIT_POLL_INTERVAL;

/// How one call treats retries and stale replicas.
///
/// Call sites state their semantics explicitly; nothing is inferred from
/// the method name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallPolicy {
	/// Retry the call on transient errors under the client's retry
	/// policy.
	pub retry_transient: bool,
	/// Keep going when the response's ledger snapshot lags the tracker
	/// instead of failing the call.
	pub ignore_stale_snapshot: bool,
}

impl CallPolicy {
	/// Policy of idempotent reads: retry freely, reject stale replicas.
	pub const READ: CallPolicy = CallPolicy {
		retry_transient: true,
		ignore_stale_snapshot: false,
	};

	/// Policy of submissions: one attempt, and a stale acknowledgement is
	/// still an acknowledgement.
	pub const SUBMIT: CallPolicy = CallPolicy {
		retry_transient: false,
		ignore_stale_snapshot: true,
	};
}

/// Builder for a [`Client`] with non-default knobs.
pub struct ClientBuilder {
	chain_id: ChainId,
	url: Option<String>,
	timeout: Duration,
	retry_policy: RetryPolicy,
	wait_poll_interval: Duration,
	transport: Option<Arc<dyn RpcTransport>>,
}

impl ClientBuilder {
	/// Creates a builder for a client of the given network.
	pub fn new(chain_id: ChainId) -> Self {
		Self {
			chain_id,
			url: None,
			timeout: libera_jsonrpc::http::DEFAULT_TIMEOUT,
			retry_policy: RetryPolicy::default(),
			wait_poll_interval: DEFAULT_WAIT_POLL_INTERVAL,
			transport: None,
		}
	}

	/// Sets the full node URL to talk to.
	pub fn with_url(mut self, url: impl Into<String>) -> Self {
		self.url = Some(url.into());
		self
	}

	/// Sets the per-request HTTP timeout.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// Sets the retry policy applied to read calls.
	pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
		self.retry_policy = retry_policy;
		self
	}

	/// Sets the interval between transaction polls while waiting.
	pub fn with_wait_poll_interval(mut self, interval: Duration) -> Self {
		self.wait_poll_interval = interval;
		self
	}

	/// Injects a transport, replacing the HTTP one a URL would build.
	pub fn with_transport(mut self, transport: Arc<dyn RpcTransport>) -> Self {
		self.transport = Some(transport);
		self
	}

	/// Builds the client.
	pub fn build(self) -> Result<Client, Error> {
		let transport = match self.transport {
			Some(transport) => transport,
			None => {
				let url = self.url.ok_or_else(|| {
					Error::Transport(TransportError::Config {
						message: "either a url or a transport is required".to_string(),
					})
				})?;
				Arc::new(HttpTransport::with_timeout(url, self.timeout)?)
			},
		};
		Ok(Client {
			transport,
			chain_id: self.chain_id,
			tracker: LedgerStateTracker::new(),
			retry_policy: self.retry_policy,
			wait_poll_interval: self.wait_poll_interval,
		})
	}
}

/// A client bound to one network.
///
/// Cheap to share behind an `Arc`; all methods take `&self` and the only
/// interior state is the tracked ledger snapshot.
pub struct Client {
	transport: Arc<dyn RpcTransport>,
	chain_id: ChainId,
	tracker: LedgerStateTracker,
	retry_policy: RetryPolicy,
	pub(crate) wait_poll_interval: Duration,
}

impl std::fmt::Debug for Client {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Client")
			.field("chain_id", &self.chain_id)
			.field("tracker", &self.tracker)
			.field("retry_policy", &self.retry_policy)
			.field("wait_poll_interval", &self.wait_poll_interval)
			.finish_non_exhaustive()
	}
}

impl Client {
	/// Creates a client for `url` with default knobs.
	pub fn new(url: impl Into<String>, chain_id: ChainId) -> Result<Self, Error> {
		Self::builder(chain_id).with_url(url).build()
	}

	/// Starts a builder for a client of the given network.
	pub fn builder(chain_id: ChainId) -> ClientBuilder {
		ClientBuilder::new(chain_id)
	}

	/// The network this client validates every response against.
	pub fn chain_id(&self) -> ChainId {
		self.chain_id
	}

	/// The highest ledger state any response has shown this client.
	pub fn last_known_ledger_state(&self) -> LedgerState {
		self.tracker.current()
	}

	/// Overrides the tracked ledger state.
	///
	/// For carrying a freshness floor over from another client instance.
	pub fn set_last_known_ledger_state(&self, state: LedgerState) {
		self.tracker.set(state);
	}

	/// Lists the currencies known to the chain.
	pub async fn get_currencies(&self) -> Result<Vec<CurrencyInfoView>, Error> {
		let response = self
			.call(CallPolicy::READ, Method::GetCurrencies, vec![])
			.await?;
		decode_result(response)
	}

	/// Returns ledger metadata at the latest version the answering node
	/// has seen.
	pub async fn get_metadata(&self) -> Result<MetadataView, Error> {
		let response = self
			.call(CallPolicy::READ, Method::GetMetadata, vec![])
			.await?;
		decode_result(response)
	}

	/// Returns ledger metadata at a specific version.
	pub async fn get_metadata_by_version(&self, version: u64) -> Result<MetadataView, Error> {
		let response = self
			.call(CallPolicy::READ, Method::GetMetadata, vec![json!(version)])
			.await?;
		decode_result(response)
	}

	/// Returns the state of an account, or `None` for an address the
	/// ledger has never seen.
	pub async fn get_account(&self, address: AccountAddress) -> Result<Option<AccountView>, Error> {
		let response = self
			.call(
				CallPolicy::READ,
				Method::GetAccount,
				vec![json!(address.to_hex())],
			)
			.await?;
		decode_result(response)
	}

	/// Returns the transaction an account committed under a sequence
	/// number, or `None` while no such transaction is committed.
	pub async fn get_account_transaction(
		&self,
		address: AccountAddress,
		sequence_number: u64,
		include_events: bool,
	) -> Result<Option<TransactionView>, Error> {
		let response = self
			.call(
				CallPolicy::READ,
				Method::GetAccountTransaction,
				vec![
					json!(address.to_hex()),
					json!(sequence_number),
					json!(include_events),
				],
			)
			.await?;
		decode_result(response)
	}

	/// Returns up to `limit` transactions an account committed starting
	/// at a sequence number.
	pub async fn get_account_transactions(
		&self,
		address: AccountAddress,
		start: u64,
		limit: u64,
		include_events: bool,
	) -> Result<Vec<TransactionView>, Error> {
		let response = self
			.call(
				CallPolicy::READ,
				Method::GetAccountTransactions,
				vec![
					json!(address.to_hex()),
					json!(start),
					json!(limit),
					json!(include_events),
				],
			)
			.await?;
		decode_result(response)
	}

	/// Returns up to `limit` committed transactions starting at a ledger
	/// version.
	pub async fn get_transactions(
		&self,
		start_version: u64,
		limit: u64,
		include_events: bool,
	) -> Result<Vec<TransactionView>, Error> {
		let response = self
			.call(
				CallPolicy::READ,
				Method::GetTransactions,
				vec![json!(start_version), json!(limit), json!(include_events)],
			)
			.await?;
		decode_result(response)
	}

	/// Returns up to `limit` events of one event stream starting at a
	/// stream sequence number.
	pub async fn get_events(
		&self,
		key: &str,
		start: u64,
		limit: u64,
	) -> Result<Vec<EventView>, Error> {
		let response = self
			.call(
				CallPolicy::READ,
				Method::GetEvents,
				vec![json!(key), json!(start), json!(limit)],
			)
			.await?;
		decode_result(response)
	}

	/// Submits a signed transaction.
	///
	/// Success means a replica accepted the transaction into its mempool,
	/// nothing more; pair with
	/// [`wait_for_signed_transaction`](Self::wait_for_signed_transaction)
	/// for the execution verdict. Submission is never retried by the
	/// client, and a stale acknowledgement is still an acceptance.
	pub async fn submit(&self, txn: &SignedTransaction) -> Result<(), Error> {
		tracing::info!(
			sender = %txn.raw_txn.sender,
			sequence_number = txn.raw_txn.sequence_number,
			"Submitting transaction"
		);
		self.submit_hex(&txn.to_hex()?).await
	}

	/// Submits an already-serialized signed transaction.
	pub async fn submit_hex(&self, signed_txn_hex: &str) -> Result<(), Error> {
		self.call(
			CallPolicy::SUBMIT,
			Method::Submit,
			vec![json!(signed_txn_hex)],
		)
		.await?;
		Ok(())
	}

	/// Runs one request under a call policy.
	pub(crate) async fn call(
		&self,
		policy: CallPolicy,
		method: Method,
		params: Vec<serde_json::Value>,
	) -> Result<Response, Error> {
		let request = Request::new(method, params);
		if !policy.retry_transient {
			return self.call_once(policy, request).await;
		}
		backoff::future::retry(self.retry_policy.to_backoff(), || {
			let request = request.clone();
			async move {
				self.call_once(policy, request).await.map_err(|error| {
					if error.is_retryable() {
						tracing::debug!(%method, %error, "Retrying call");
						backoff::Error::transient(error)
					} else {
						backoff::Error::permanent(error)
					}
				})
			}
		})
		.await
	}

	/// One attempt: transport, chain check, tracker offer, error lift.
	async fn call_once(&self, policy: CallPolicy, request: Request) -> Result<Response, Error> {
		let method = request.method;
		let response = self.transport.send_request(request).await?;

		// A wrong-network response must never reach the tracker.
		if response.chain_id() != self.chain_id {
			return Err(Error::ChainIdMismatch {
				expected: self.chain_id,
				actual: response.chain_id(),
			});
		}

		if let Err(stale) = self.tracker.update(response.ledger_state()) {
			if policy.ignore_stale_snapshot {
				tracing::warn!(
					method = %method,
					client = %stale.client,
					server = %stale.server,
					"Ignoring stale ledger snapshot"
				);
			} else {
				return Err(Error::StaleResponse(stale));
			}
		}

		if let Some(error) = response.error.clone() {
			return Err(Error::Rpc(error));
		}
		Ok(response)
	}
}

/// Decodes a response's result field, mapping JSON null through `Option`
/// targets as "not found".
fn decode_result<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
	serde_json::from_value(response.result.unwrap_or(serde_json::Value::Null))
		.map_err(|error| Error::InvalidResponse(error.to_string()))
}
