//! Chain identifiers for the known Libera networks.
//!
//! Every transaction embeds the chain id of the network it is destined for,
//! and every JSON-RPC response echoes the chain id of the answering node.
//! Comparing the two protects a client from talking to the wrong network.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Libera network identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u8);

impl ChainId {
	/// The main Libera network.
	pub const MAINNET: ChainId = ChainId(1);
	/// The public long-running test network.
	pub const TESTNET: ChainId = ChainId(2);
	/// The shared development network.
	pub const DEVNET: ChainId = ChainId(3);
	/// Local networks spun up by tests and tools.
	pub const TESTING: ChainId = ChainId(4);

	/// Creates a chain id from its raw value.
	pub const fn new(id: u8) -> Self {
		Self(id)
	}

	/// Returns the raw chain id value.
	pub const fn value(&self) -> u8 {
		self.0
	}
}

impl From<u8> for ChainId {
	fn from(id: u8) -> Self {
		Self(id)
	}
}

impl From<ChainId> for u8 {
	fn from(id: ChainId) -> Self {
		id.0
	}
}

impl fmt::Display for ChainId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_named_networks() {
		assert_eq!(ChainId::MAINNET.value(), 1);
		assert_eq!(ChainId::TESTNET.value(), 2);
		assert_eq!(ChainId::DEVNET.value(), 3);
		assert_eq!(ChainId::TESTING.value(), 4);
	}

	#[test]
	fn test_u8_conversions() {
		assert_eq!(ChainId::from(2), ChainId::TESTNET);
		assert_eq!(u8::from(ChainId::MAINNET), 1);
		assert_eq!(ChainId::new(7).to_string(), "7");
	}
}
