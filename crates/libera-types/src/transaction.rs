//! Transaction structures: payloads, raw and signed transactions,
//! authenticators.
//!
//! Field order in these structs is the canonical wire order; changing it
//! changes every signature and hash. All structures are immutable once
//! built and cheap to clone and share.

use serde::{Deserialize, Serialize};

use crate::account_address::AccountAddress;
use crate::canonical::{self, CanonicalError};
use crate::chain_id::ChainId;
use crate::hashing;

/// A Move type, as named in a script's type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeTag {
	/// Boolean.
	Bool,
	/// Unsigned 8-bit integer.
	U8,
	/// Unsigned 64-bit integer.
	U64,
	/// Unsigned 128-bit integer.
	U128,
	/// Account address.
	Address,
	/// Transaction signer reference.
	Signer,
	/// Homogeneous vector of another type.
	Vector(Box<TypeTag>),
	/// A named struct, such as a currency type.
	Struct(StructTag),
}

/// Fully-qualified name of a Move struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructTag {
	/// Address of the account the defining module is published under.
	pub address: AccountAddress,
	/// Name of the defining module.
	pub module: String,
	/// Name of the struct.
	pub name: String,
	/// Type parameters, for generic structs.
	pub type_params: Vec<TypeTag>,
}

/// A runtime argument passed to a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionArgument {
	/// Unsigned 8-bit integer.
	U8(u8),
	/// Unsigned 64-bit integer.
	U64(u64),
	/// Unsigned 128-bit integer.
	U128(u128),
	/// Account address.
	Address(AccountAddress),
	/// Raw byte vector.
	U8Vector(Vec<u8>),
	/// Boolean.
	Bool(bool),
}

/// A Move script: compiled code plus its type and value arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
	/// Compiled script bytecode.
	pub code: Vec<u8>,
	/// Type arguments the code is instantiated with.
	pub ty_args: Vec<TypeTag>,
	/// Runtime arguments.
	pub args: Vec<TransactionArgument>,
}

impl Script {
	/// Creates a script from its code and arguments.
	pub fn new(code: Vec<u8>, ty_args: Vec<TypeTag>, args: Vec<TransactionArgument>) -> Self {
		Self {
			code,
			ty_args,
			args,
		}
	}
}

/// What a transaction executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionPayload {
	/// Run a script.
	Script(Script),
	/// Publish a compiled module.
	Module(Vec<u8>),
}

/// An unsigned transaction, exactly as covered by the sender's signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
	/// Account sending the transaction.
	pub sender: AccountAddress,
	/// Sequence number of the sender account this transaction consumes.
	pub sequence_number: u64,
	/// What the transaction executes.
	pub payload: TransactionPayload,
	/// Maximal gas the sender is willing to pay.
	pub max_gas_amount: u64,
	/// Price per gas unit, in `gas_currency_code` microunits.
	pub gas_unit_price: u64,
	/// Currency code gas is paid in.
	pub gas_currency_code: String,
	/// Expiration time in seconds since the Unix epoch; the transaction can
	/// no longer execute once ledger time passes this point.
	pub expiration_timestamp_secs: u64,
	/// Network the transaction is destined for.
	pub chain_id: ChainId,
}

impl RawTransaction {
	/// Serializes the transaction into its canonical bytes.
	pub fn to_bytes(&self) -> Result<Vec<u8>, CanonicalError> {
		canonical::to_bytes(self)
	}

	/// Returns the exact byte sequence a sender signs: the hash domain
	/// prefix for raw transactions followed by the canonical bytes.
	pub fn signing_message(&self) -> Result<Vec<u8>, CanonicalError> {
		let mut message = hashing::hash_prefix("RawTransaction").to_vec();
		message.extend(self.to_bytes()?);
		Ok(message)
	}
}

/// Proof of who authorized a transaction.
///
/// The variant order is the wire tag order and also fixes the
/// authentication scheme numbering (Ed25519 = 0, MultiEd25519 = 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionAuthenticator {
	/// A single Ed25519 key and signature.
	Ed25519 {
		/// 32-byte public key.
		public_key: Vec<u8>,
		/// 64-byte signature over the raw transaction's signing message.
		signature: Vec<u8>,
	},
	/// A K-of-N threshold of Ed25519 keys.
	MultiEd25519 {
		/// Concatenated 32-byte public keys followed by the threshold byte.
		public_key: Vec<u8>,
		/// Concatenated 64-byte signatures followed by a 4-byte signer
		/// bitmap.
		signature: Vec<u8>,
	},
}

impl TransactionAuthenticator {
	/// Returns the public key material carried by the authenticator.
	pub fn public_key_bytes(&self) -> &[u8] {
		match self {
			TransactionAuthenticator::Ed25519 { public_key, .. } => public_key,
			TransactionAuthenticator::MultiEd25519 { public_key, .. } => public_key,
		}
	}

	/// Returns the signature material carried by the authenticator.
	pub fn signature_bytes(&self) -> &[u8] {
		match self {
			TransactionAuthenticator::Ed25519 { signature, .. } => signature,
			TransactionAuthenticator::MultiEd25519 { signature, .. } => signature,
		}
	}
}

/// A transaction ready for submission: the raw transaction plus the
/// authenticator proving the sender approved it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
	/// The signed content.
	pub raw_txn: RawTransaction,
	/// Who authorized it, and how.
	pub authenticator: TransactionAuthenticator,
}

impl SignedTransaction {
	/// Creates a signed transaction from its parts.
	pub fn new(raw_txn: RawTransaction, authenticator: TransactionAuthenticator) -> Self {
		Self {
			raw_txn,
			authenticator,
		}
	}

	/// Serializes the transaction into its canonical bytes, the exact
	/// payload `submit` sends.
	pub fn to_bytes(&self) -> Result<Vec<u8>, CanonicalError> {
		canonical::to_bytes(self)
	}

	/// Returns the canonical bytes as lowercase hex, the `submit` wire
	/// parameter.
	pub fn to_hex(&self) -> Result<String, CanonicalError> {
		Ok(hex::encode(self.to_bytes()?))
	}

	/// Computes the hash under which the ledger records this transaction.
	///
	/// The ledger stores user transactions as the first variant of its
	/// transaction enum, so a zero tag byte sits between the domain prefix
	/// and the canonical bytes.
	pub fn hash(&self) -> Result<String, CanonicalError> {
		let mut preimage = hashing::hash_prefix("Transaction").to_vec();
		preimage.push(0);
		preimage.extend(self.to_bytes()?);
		Ok(hex::encode(hashing::sha3_256(&preimage)))
	}
}
