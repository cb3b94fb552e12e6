//! Ledger state snapshots reported by full nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point-in-time snapshot of how much of the ledger a node has seen.
///
/// Both fields grow together on a healthy node: `version` counts committed
/// transactions and `timestamp_usecs` is the ledger time in microseconds.
/// The zero value means "nothing known yet" and orders before every real
/// snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
	/// Ledger version, the count of committed transactions.
	pub version: u64,
	/// Ledger timestamp in microseconds since the Unix epoch.
	pub timestamp_usecs: u64,
}

impl LedgerState {
	/// Creates a snapshot from its two components.
	pub const fn new(version: u64, timestamp_usecs: u64) -> Self {
		Self {
			version,
			timestamp_usecs,
		}
	}
}

impl fmt::Display for LedgerState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"(version: {}, timestamp: {}us)",
			self.version, self.timestamp_usecs
		)
	}
}
