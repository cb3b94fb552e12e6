//! JSON view models returned by the Libera JSON-RPC service.
//!
//! Views mirror the service's JSON shapes and stay decoupled from the wire
//! transaction types: a view is what a node reports about the ledger, not
//! what a client submits to it. Tagged enums keep an `Unknown` fallback so
//! a newer node never breaks deserialization.

use serde::{Deserialize, Serialize};

/// An amount of some currency, in microunits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountView {
	/// Amount in microunits of `currency`.
	pub amount: u64,
	/// Currency code.
	pub currency: String,
}

/// Metadata of an on-chain currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyInfoView {
	/// Currency code, such as `LBR`.
	pub code: String,
	/// Microunits per whole unit.
	pub scaling_factor: u64,
	/// Smallest representable fraction of a whole unit.
	pub fractional_part: u64,
}

/// Ledger metadata at a version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataView {
	/// Ledger version the metadata describes.
	pub version: u64,
	/// Ledger timestamp at that version, in microseconds.
	pub timestamp: u64,
}

/// Role-specific account attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountRoleView {
	/// A custodial parent account.
	ParentVasp {
		/// Registered operator name.
		human_name: String,
	},
	/// A sub-account of a custodial parent.
	ChildVasp {
		/// Address of the parent account, as bare hex.
		parent_vasp_address: String,
	},
	/// Any role this client does not model.
	#[serde(other)]
	Unknown,
}

/// State of an account at a ledger version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountView {
	/// Account address, as bare hex.
	pub address: String,
	/// Balances held, one entry per currency.
	pub balances: Vec<AmountView>,
	/// Next sequence number a transaction from this account must carry.
	pub sequence_number: u64,
	/// Authentication key the account currently accepts, as hex.
	pub authentication_key: String,
	/// Event key of the sent-payment event stream.
	pub sent_events_key: String,
	/// Event key of the received-payment event stream.
	pub received_events_key: String,
	/// Whether key rotation is delegated away from the account.
	pub delegated_key_rotation_capability: bool,
	/// Whether withdrawal is delegated away from the account.
	pub delegated_withdrawal_capability: bool,
	/// Whether the account is frozen.
	pub is_frozen: bool,
	/// Role-specific attributes.
	pub role: AccountRoleView,
}

/// Outcome of executing a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VmStatusView {
	/// The transaction executed successfully.
	Executed,
	/// Execution stopped when the gas budget ran out.
	OutOfGas,
	/// A Move abort was raised.
	MoveAbort {
		/// Module the abort was raised in.
		location: String,
		/// Abort code raised.
		abort_code: u64,
	},
	/// Execution failed inside a function.
	ExecutionFailure {
		/// Module the failure occurred in.
		location: String,
		/// Index of the failing function.
		function_index: u16,
		/// Code offset of the failure.
		code_offset: u16,
	},
	/// Any status this client does not model.
	#[serde(other)]
	Unknown,
}

impl VmStatusView {
	/// True only for the successful terminal status.
	pub fn is_executed(&self) -> bool {
		matches!(self, VmStatusView::Executed)
	}
}

/// Transaction content, by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionDataView {
	/// A consensus block boundary.
	BlockMetadata {
		/// Block time in microseconds.
		timestamp_usecs: u64,
	},
	/// A genesis or administrative write set.
	WriteSet,
	/// A user-submitted transaction.
	User {
		/// Sender address, as bare hex.
		sender: String,
		/// Authentication scheme name.
		signature_scheme: String,
		/// Signature bytes, as hex.
		signature: String,
		/// Public key bytes, as hex.
		public_key: String,
		/// Sequence number the transaction consumed.
		sequence_number: u64,
		/// Chain id the transaction named.
		chain_id: u8,
		/// Gas budget.
		max_gas_amount: u64,
		/// Gas price.
		gas_unit_price: u64,
		/// Gas currency code.
		gas_currency: String,
		/// Expiration time in seconds.
		expiration_timestamp_secs: u64,
		/// Hash of the executed script.
		script_hash: String,
	},
	/// Any kind this client does not model.
	#[serde(other)]
	Unknown,
}

/// A committed transaction, as reported by a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionView {
	/// Version the transaction committed at.
	pub version: u64,
	/// Hash of the transaction, as hex.
	pub hash: String,
	/// Transaction content.
	pub transaction: TransactionDataView,
	/// Events emitted during execution.
	#[serde(default)]
	pub events: Vec<EventView>,
	/// Execution outcome.
	pub vm_status: VmStatusView,
	/// Gas consumed.
	pub gas_used: u64,
}

/// An event emitted by a committed transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventView {
	/// Key of the stream the event belongs to.
	pub key: String,
	/// Position of the event within its stream.
	pub sequence_number: u64,
	/// Ledger version of the emitting transaction.
	pub transaction_version: u64,
	/// Event payload, kept as raw JSON.
	pub data: serde_json::Value,
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_deserialize_executed_user_transaction() {
		let view: TransactionView = serde_json::from_value(json!({
			"version": 4433485,
			"hash": "e5a2f8701b46cf7fea5a4f4e9d24a67f16de1f9d9ff6d105b37e7bbb6c3a82bd",
			"transaction": {
				"type": "user",
				"sender": "f72589b71ff4f8d139674a3f7369c69b",
				"signature_scheme": "Scheme::Ed25519",
				"signature": "22",
				"public_key": "11",
				"sequence_number": 5,
				"chain_id": 2,
				"max_gas_amount": 1000000,
				"gas_unit_price": 0,
				"gas_currency": "LBR",
				"expiration_timestamp_secs": 1602888396,
				"script_hash": "aa"
			},
			"events": [],
			"vm_status": { "type": "executed" },
			"gas_used": 175
		}))
		.unwrap();

		assert!(view.vm_status.is_executed());
		match view.transaction {
			TransactionDataView::User {
				sequence_number, ..
			} => assert_eq!(sequence_number, 5),
			other => panic!("expected user transaction, got {:?}", other),
		}
	}

	#[test]
	fn test_unmodeled_vm_status_falls_back_to_unknown() {
		let status: VmStatusView =
			serde_json::from_value(json!({ "type": "verification_error" })).unwrap();
		assert_eq!(status, VmStatusView::Unknown);
		assert!(!status.is_executed());
	}

	#[test]
	fn test_move_abort_carries_location_and_code() {
		let status: VmStatusView = serde_json::from_value(json!({
			"type": "move_abort",
			"location": "00000000000000000000000000000001::LiberaAccount",
			"abort_code": 1288
		}))
		.unwrap();
		assert_eq!(
			status,
			VmStatusView::MoveAbort {
				location: "00000000000000000000000000000001::LiberaAccount".to_string(),
				abort_code: 1288
			}
		);
	}

	#[test]
	fn test_block_metadata_transaction() {
		let data: TransactionDataView = serde_json::from_value(json!({
			"type": "block_metadata",
			"timestamp_usecs": 1602888396000000u64
		}))
		.unwrap();
		assert_eq!(
			data,
			TransactionDataView::BlockMetadata {
				timestamp_usecs: 1_602_888_396_000_000
			}
		);
	}

	#[test]
	fn test_account_view_with_unknown_role() {
		let account: AccountView = serde_json::from_value(json!({
			"address": "f72589b71ff4f8d139674a3f7369c69b",
			"balances": [{ "amount": 100, "currency": "LBR" }],
			"sequence_number": 8,
			"authentication_key": "d939b0214b484bf4d71d08d0247b755af72589b71ff4f8d139674a3f7369c69b",
			"sent_events_key": "0100000000000000f72589b71ff4f8d139674a3f7369c69b",
			"received_events_key": "0000000000000000f72589b71ff4f8d139674a3f7369c69b",
			"delegated_key_rotation_capability": false,
			"delegated_withdrawal_capability": false,
			"is_frozen": false,
			"role": { "type": "treasury_compliance" }
		}))
		.unwrap();
		assert_eq!(account.role, AccountRoleView::Unknown);
		assert_eq!(account.balances[0].amount, 100);
	}

	#[test]
	fn test_event_data_stays_raw_json() {
		let event: EventView = serde_json::from_value(json!({
			"key": "0100000000000000f72589b71ff4f8d139674a3f7369c69b",
			"sequence_number": 3,
			"transaction_version": 4433485,
			"data": { "type": "sentpayment", "amount": { "amount": 100, "currency": "LBR" } }
		}))
		.unwrap();
		assert_eq!(event.data["type"], "sentpayment");
	}
}
