//! Retry policy with exponential backoff.
//!
//! Applied around the record-fetch and render steps only; email
//! dispatch uses cross-provider fallback instead of same-provider
//! retries. Backoff is blind: no jitter, no error classification.

use std::future::Future;
use std::time::Duration;

use crate::prelude::*;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
	wait_min_max: (u64, u64),
	times: u16,
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self { wait_min_max: (2, 60), times: 3 }
	}
}

impl RetryPolicy {
	/// Create a new RetryPolicy with custom min/max backoff and number of retries
	pub fn new(wait_min_max: (u64, u64), times: u16) -> Self {
		Self { wait_min_max, times }
	}

	/// Calculate exponential backoff in seconds: min * (2^attempt), capped at max
	pub fn calculate_backoff(&self, attempt_count: u16) -> u64 {
		let (min, max) = self.wait_min_max;
		let backoff = min * (1u64 << u64::from(attempt_count.min(62)));
		backoff.min(max)
	}

	/// Check if we should continue retrying
	pub fn should_retry(&self, attempt_count: u16) -> bool {
		attempt_count < self.times
	}

	pub fn times(&self) -> u16 {
		self.times
	}
}

/// Run `op` until it succeeds or the policy is exhausted.
///
/// `what` names the step in retry logs ("record fetch", "pdf render").
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, what: &str, mut op: F) -> CtResult<T>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = CtResult<T>>,
{
	let mut attempt: u16 = 0;
	loop {
		match op().await {
			Ok(value) => return Ok(value),
			Err(e) => {
				if !policy.should_retry(attempt) {
					warn!("{} failed after {} attempts: {}", what, u32::from(attempt) + 1, e);
					return Err(e);
				}
				let backoff = policy.calculate_backoff(attempt);
				warn!(
					"{} failed (attempt {}/{}): {}; retrying in {}s",
					what,
					attempt + 1,
					policy.times + 1,
					e,
					backoff
				);
				tokio::time::sleep(Duration::from_secs(backoff)).await;
				attempt += 1;
			}
		}
	}
}


// vim: ts=4
