//! HTTP transport over reqwest.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::types::{Request, Response, RpcTransport, TransportError};

/// Request timeout applied when the caller does not pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-RPC transport that POSTs requests to a full node over HTTP.
#[derive(Debug)]
pub struct HttpTransport {
	/// HTTP client used for RPC calls.
	client: reqwest::Client,
	/// Target JSON-RPC endpoint URL.
	url: String,
	/// Id for the next request; each request gets a fresh one.
	next_id: AtomicU64,
}

impl HttpTransport {
	/// Creates a transport with the default request timeout.
	pub fn new(url: impl Into<String>) -> Result<Self, TransportError> {
		Self::with_timeout(url, DEFAULT_TIMEOUT)
	}

	/// Creates a transport with an explicit request timeout.
	pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
		let client = reqwest::Client::builder()
			.timeout(timeout)
			.build()
			.map_err(|error| TransportError::Config {
				message: error.to_string(),
			})?;
		Ok(Self {
			client,
			url: url.into(),
			next_id: AtomicU64::new(1),
		})
	}
}

#[async_trait]
impl RpcTransport for HttpTransport {
	async fn send_request(&self, request: Request) -> Result<Response, TransportError> {
		let id = self.next_id.fetch_add(1, Ordering::Relaxed);
		let payload = serde_json::json!({
			"jsonrpc": "2.0",
			"id": id,
			"method": request.method.as_str(),
			"params": request.params,
		});

		tracing::debug!(method = %request.method, id, "Sending JSON-RPC request");
		let response = self
			.client
			.post(&self.url)
			.json(&payload)
			.send()
			.await
			.map_err(|error| TransportError::Failure {
				message: error.to_string(),
			})?;

		let response = response
			.error_for_status()
			.map_err(|error| TransportError::Failure {
				message: error.to_string(),
			})?;

		response
			.json()
			.await
			.map_err(|error| TransportError::Failure {
				message: error.to_string(),
			})
	}
}
