// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for API calls issued through a client.
///
/// Throttled calls count toward both `throttled` and `failures`; the counters
/// are updated independently, so a reader can observe one increment before the
/// other.
#[derive(Debug, Default)]
pub struct CallMetrics {
	attempts: AtomicU64,
	success: AtomicU64,
	failure: AtomicU64,
	throttled: AtomicU64,
}
impl CallMetrics {
	/// Returns the total number of API calls attempted.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of API calls that completed successfully.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of API calls that failed.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	/// Returns the number of API calls the server rejected with HTTP 429.
	pub fn throttled(&self) -> u64 {
		self.throttled.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failure.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_throttle(&self) {
		self.throttled.fetch_add(1, Ordering::Relaxed);
	}
}
