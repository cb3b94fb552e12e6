//! Common types module for the Libera client SDK.
//!
//! This module defines the core data types shared by every other crate in
//! the workspace: account addresses, chain identifiers, ledger state
//! snapshots, transaction structures with their canonical serialization,
//! domain-separated hashing, and the JSON view models returned by the
//! Libera JSON-RPC service.

/// Fixed-length account address and sub-address types.
pub mod account_address;
/// Canonical (wire) serialization helpers.
pub mod canonical;
/// Chain identifiers for the known Libera networks.
pub mod chain_id;
/// Domain-separated SHA3-256 hashing.
pub mod hashing;
/// Ledger state snapshots reported by full nodes.
pub mod ledger_state;
/// Transaction structures: payloads, raw and signed transactions,
/// authenticators.
pub mod transaction;
/// JSON view models returned by the JSON-RPC service.
pub mod views;

// Re-export all types for convenient access
pub use account_address::{
	AccountAddress, AddressError, SubAddress, ACCOUNT_ADDRESS_LENGTH, SUB_ADDRESS_LENGTH,
};
pub use canonical::{to_bytes, CanonicalError};
pub use chain_id::ChainId;
pub use hashing::{hash_prefix, sha3_256};
pub use ledger_state::LedgerState;
pub use transaction::{
	RawTransaction, Script, SignedTransaction, StructTag, TransactionArgument,
	TransactionAuthenticator, TransactionPayload, TypeTag,
};
pub use views::{
	AccountRoleView, AccountView, AmountView, CurrencyInfoView, EventView, MetadataView,
	TransactionDataView, TransactionView, VmStatusView,
};
