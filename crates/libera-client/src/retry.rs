//! Retry policy for idempotent read calls.
//!
//! The policy is plain data so applications can carry it in their own
//! configuration files; the client compiles it into an exponential
//! backoff schedule per call. Only reads are ever retried, and only on
//! errors another replica might answer differently.

use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_initial_interval_ms() -> u64 {
	100
}

fn default_max_interval_ms() -> u64 {
	2_000
}

fn default_multiplier() -> f64 {
	2.0
}

fn default_max_elapsed_time_ms() -> u64 {
	10_000
}

/// Backoff schedule applied to retried read calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
	/// Delay before the first retry, in milliseconds.
	#[serde(default = "default_initial_interval_ms")]
	pub initial_interval_ms: u64,
	/// Ceiling on the delay between retries, in milliseconds.
	#[serde(default = "default_max_interval_ms")]
	pub max_interval_ms: u64,
	/// Growth factor applied to the delay after each retry.
	#[serde(default = "default_multiplier")]
	pub multiplier: f64,
	/// Total budget across all attempts, in milliseconds; once it is
	/// spent the last error surfaces.
	#[serde(default = "default_max_elapsed_time_ms")]
	pub max_elapsed_time_ms: u64,
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			initial_interval_ms: default_initial_interval_ms(),
			max_interval_ms: default_max_interval_ms(),
			multiplier: default_multiplier(),
			max_elapsed_time_ms: default_max_elapsed_time_ms(),
		}
	}
}

impl RetryPolicy {
	/// A policy that gives every call exactly one attempt.
	pub fn no_retry() -> Self {
		Self {
			max_elapsed_time_ms: 0,
			..Self::default()
		}
	}

	/// Compiles the policy into a backoff schedule for one call.
	pub fn to_backoff(&self) -> ExponentialBackoff {
		ExponentialBackoffBuilder::new()
			.with_initial_interval(Duration::from_millis(self.initial_interval_ms))
			.with_max_interval(Duration::from_millis(self.max_interval_ms))
			.with_multiplier(self.multiplier)
			.with_max_elapsed_time(Some(Duration::from_millis(self.max_elapsed_time_ms)))
			.build()
	}
}
