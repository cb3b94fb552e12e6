//! Monotonic ledger state tracking.
//!
//! The tracker is the client's memory of how much ledger it has already
//! seen. Every response's snapshot is offered to it; the held state only
//! ever moves forward, and a snapshot behind it convicts the answering
//! replica of staleness.

use parking_lot::RwLock;

use libera_types::LedgerState;

use crate::error::StaleResponseError;

/// Tracks the highest `(version, timestamp)` pair observed so far.
///
/// Shared freely across tasks; the lock is held only for the comparison
/// and the copy, never across an await point.
#[derive(Debug, Default)]
pub struct LedgerStateTracker {
	state: RwLock<LedgerState>,
}

impl LedgerStateTracker {
	/// Creates a tracker that has seen nothing yet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a tracker primed with a known state.
	pub fn with_state(state: LedgerState) -> Self {
		Self {
			state: RwLock::new(state),
		}
	}

	/// Returns the currently held state.
	pub fn current(&self) -> LedgerState {
		*self.state.read()
	}

	/// Replaces the held state unconditionally.
	///
	/// For pinning a freshness floor from outside, typically copied from
	/// another client instance. Ordinary response handling must go
	/// through [`update`](Self::update) instead.
	pub fn set(&self, state: LedgerState) {
		*self.state.write() = state;
	}

	/// Offers a response's snapshot to the tracker.
	///
	/// Returns `Ok(true)` when the candidate advanced the held state,
	/// `Ok(false)` when it matched it exactly, and a
	/// [`StaleResponseError`] when either field lags; the held state is
	/// untouched in the error case.
	pub fn update(&self, candidate: LedgerState) -> Result<bool, StaleResponseError> {
		let mut held = self.state.write();
		if candidate == *held {
			return Ok(false);
		}
		if candidate.version >= held.version && candidate.timestamp_usecs >= held.timestamp_usecs {
			*held = candidate;
			return Ok(true);
		}
		Err(StaleResponseError {
			client: *held,
			server: candidate,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_update_adopts_newer_state() {
		let tracker = LedgerStateTracker::new();
		assert_eq!(tracker.update(LedgerState::new(10, 100)), Ok(true));
		assert_eq!(tracker.current(), LedgerState::new(10, 100));
	}

	#[test]
	fn test_update_is_a_noop_on_equal_state() {
		let tracker = LedgerStateTracker::with_state(LedgerState::new(10, 100));
		assert_eq!(tracker.update(LedgerState::new(10, 100)), Ok(false));
		assert_eq!(tracker.current(), LedgerState::new(10, 100));
	}

	#[test]
	fn test_update_accepts_single_field_advance() {
		let tracker = LedgerStateTracker::with_state(LedgerState::new(10, 100));
		assert_eq!(tracker.update(LedgerState::new(10, 101)), Ok(true));
		assert_eq!(tracker.update(LedgerState::new(11, 101)), Ok(true));
	}

	#[test]
	fn test_update_rejects_version_regression() {
		let tracker = LedgerStateTracker::with_state(LedgerState::new(10, 100));
		let err = tracker.update(LedgerState::new(9, 200)).unwrap_err();
		assert_eq!(err.client, LedgerState::new(10, 100));
		assert_eq!(err.server, LedgerState::new(9, 200));
		// Rejection never mutates.
		assert_eq!(tracker.current(), LedgerState::new(10, 100));
	}

	#[test]
	fn test_update_rejects_timestamp_regression() {
		let tracker = LedgerStateTracker::with_state(LedgerState::new(10, 100));
		assert!(tracker.update(LedgerState::new(11, 99)).is_err());
		assert_eq!(tracker.current(), LedgerState::new(10, 100));
	}

	#[test]
	fn test_set_overrides_unconditionally() {
		let tracker = LedgerStateTracker::with_state(LedgerState::new(10, 100));
		tracker.set(LedgerState::new(5, 50));
		assert_eq!(tracker.current(), LedgerState::new(5, 50));
	}

	#[test]
	fn test_concurrent_updates_keep_the_maximum() {
		use std::sync::Arc;

		let tracker = Arc::new(LedgerStateTracker::new());
		let handles: Vec<_> = (0..8u64)
			.map(|offset| {
				let tracker = Arc::clone(&tracker);
				std::thread::spawn(move || {
					for i in 0..100u64 {
						// Interleavings may reject some of these; only
						// forward progress matters.
						let _ = tracker.update(LedgerState::new(i * 8 + offset, i * 8 + offset));
					}
				})
			})
			.collect();
		for handle in handles {
			handle.join().unwrap();
		}
		assert_eq!(tracker.current(), LedgerState::new(799, 799));
	}
}
