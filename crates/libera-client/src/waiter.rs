//! Waiting for a submitted transaction's verdict.
//!
//! Submission only proves a replica accepted a transaction into its
//! mempool; execution happens later, if at all. The waiter polls the
//! sender's `(address, sequence number)` slot until one of five terminal
//! outcomes is reached: the expected transaction executed, a different
//! transaction took the slot, the transaction committed but failed,
//! ledger time passed the expiration, or the wall-clock budget ran out.

use std::time::{Duration, Instant};

use libera_types::{AccountAddress, SignedTransaction, TransactionView};

use crate::client::Client;
use crate::error::Error;

/// Interval between polls when the builder does not pick one.
pub const DEFAULT_WAIT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Wall-clock wait budget when the caller does not pick one.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(30);

impl Client {
	/// Waits for a signed transaction this client (or anyone else)
	/// submitted.
	///
	/// Convenience over [`wait_for_transaction`](Self::wait_for_transaction):
	/// the sender, sequence number, expiration, and expected hash are all
	/// taken from the transaction itself.
	pub async fn wait_for_signed_transaction(
		&self,
		txn: &SignedTransaction,
		timeout: Option<Duration>,
	) -> Result<TransactionView, Error> {
		self.wait_for_transaction(
			txn.raw_txn.sender,
			txn.raw_txn.sequence_number,
			txn.raw_txn.expiration_timestamp_secs,
			&txn.hash()?,
			timeout,
		)
		.await
	}

	/// Polls until the transaction expected at `(address, sequence_number)`
	/// reaches a terminal outcome.
	///
	/// Success means a transaction with the expected hash committed and
	/// executed; the committed record is returned. Every other outcome is
	/// a typed error: [`Error::HashMismatch`] when a different transaction
	/// consumed the sequence number,
	/// [`Error::TransactionExecutionFailed`] when the expected one
	/// committed without executing, [`Error::TransactionExpired`] once
	/// ledger time passes the expiration with nothing committed, and
	/// [`Error::WaitTimeout`] when the wall-clock budget runs out first.
	///
	/// A stale replica's answer is not an outcome; the loop moves straight
	/// to the next poll without sleeping, since another replica may
	/// already be ahead.
	pub async fn wait_for_transaction(
		&self,
		address: AccountAddress,
		sequence_number: u64,
		expiration_timestamp_secs: u64,
		txn_hash: &str,
		timeout: Option<Duration>,
	) -> Result<TransactionView, Error> {
		let timeout = timeout.unwrap_or(DEFAULT_WAIT_TIMEOUT);
		let start = Instant::now();
		// The deadline is checked once per iteration; an in-flight poll is
		// never cancelled.
		while start.elapsed() < timeout {
			let found = match self
				.get_account_transaction(address, sequence_number, true)
				.await
			{
				Ok(found) => found,
				Err(Error::StaleResponse(stale)) => {
					tracing::debug!(
						%address,
						sequence_number,
						server = %stale.server,
						"Stale replica while waiting, polling again"
					);
					continue;
				},
				Err(error) => return Err(error),
			};

			let txn = match found {
				Some(txn) => txn,
				None => {
					let ledger = self.last_known_ledger_state();
					if expiration_timestamp_secs.saturating_mul(1_000_000)
						<= ledger.timestamp_usecs
					{
						return Err(Error::TransactionExpired {
							expiration_timestamp_secs,
							ledger_timestamp_usecs: ledger.timestamp_usecs,
						});
					}
					tokio::time::sleep(self.wait_poll_interval).await;
					continue;
				},
			};

			if txn.hash != txn_hash {
				return Err(Error::HashMismatch {
					expected: txn_hash.to_string(),
					actual: txn.hash.clone(),
					txn: Box::new(txn),
				});
			}
			if !txn.vm_status.is_executed() {
				return Err(Error::TransactionExecutionFailed(Box::new(txn)));
			}
			tracing::info!(%address, sequence_number, version = txn.version, "Transaction executed");
			return Ok(txn);
		}
		Err(Error::WaitTimeout {
			address,
			sequence_number,
			timeout,
		})
	}
}
