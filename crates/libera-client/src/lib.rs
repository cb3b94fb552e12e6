//! Consistency-aware client for the Libera JSON-RPC service.
//!
//! Full-node replicas are not required to agree with each other at any
//! instant, so a client that spreads calls across them must defend its
//! own view of the ledger. This crate wraps the JSON-RPC surface in that
//! defense: every response's ledger snapshot feeds a monotonic tracker,
//! every response's chain id is checked against the configured network,
//! idempotent reads retry under a backoff policy, and a poll loop turns
//! "submitted" into an execution verdict or a typed failure.

/// The consistency-aware JSON-RPC client.
pub mod client;
/// Error taxonomy of the client.
pub mod error;
/// Retry policy for idempotent read calls.
pub mod retry;
/// Monotonic ledger state tracking.
pub mod state;
/// Waiting for a submitted transaction's verdict.
pub mod waiter;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{CallPolicy, Client, ClientBuilder};
pub use error::{Error, StaleResponseError};
pub use retry::RetryPolicy;
pub use state::LedgerStateTracker;
pub use waiter::{DEFAULT_WAIT_POLL_INTERVAL, DEFAULT_WAIT_TIMEOUT};
