//! JSON-RPC plumbing for the Libera client SDK.
//!
//! This module speaks the node's wire protocol and nothing else: typed
//! method names, the request shape, the response envelope with its ledger
//! state extension fields, and a transport trait with an HTTP
//! implementation. Consistency rules live a layer up, in `libera-client`;
//! swapping the transport out (for tests, or for another carrier) swaps
//! none of those rules.

/// HTTP transport over reqwest.
pub mod http;
/// Protocol types: methods, envelopes, errors, the transport trait.
pub mod types;

pub use http::HttpTransport;
pub use types::{Method, Request, Response, RpcError, RpcTransport, TransportError};
