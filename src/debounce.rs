//! Trailing-edge debounce for bursty edit streams.
//!
//! Each edit arms a ticket and waits out the quiet period; only the ticket
//! still newest when the period elapses settles. Superseded tickets report
//! themselves so callers can drop their work without side effects.

// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::_prelude::*;

/// Debounce window shared by every edit of one input.
#[derive(Clone, Debug)]
pub struct Debouncer {
	quiet: Duration,
	epoch: Arc<AtomicU64>,
}
impl Debouncer {
	/// Creates a debouncer with the given quiet period.
	pub fn new(quiet: Duration) -> Self {
		Self { quiet, epoch: Arc::new(AtomicU64::new(0)) }
	}

	/// Registers a new edit, superseding any armed ticket.
	pub fn arm(&self) -> DebounceTicket {
		let epoch = self.epoch.fetch_add(1, Ordering::Relaxed) + 1;

		DebounceTicket { epoch, shared: self.epoch.clone(), quiet: self.quiet }
	}

	/// Supersedes any armed ticket without arming a new one.
	///
	/// Used when an immediate action, e.g. field blur, must silence the
	/// pending debounced one.
	pub fn preempt(&self) {
		self.epoch.fetch_add(1, Ordering::Relaxed);
	}
}

/// One armed edit awaiting its quiet period.
#[derive(Debug)]
pub struct DebounceTicket {
	epoch: u64,
	shared: Arc<AtomicU64>,
	quiet: Duration,
}
impl DebounceTicket {
	/// Waits out the quiet period.
	///
	/// Returns `true` when this ticket is still the newest edit, `false`
	/// when a later edit or a preemption superseded it.
	pub async fn settle(self) -> bool {
		tokio::time::sleep(self.quiet.unsigned_abs()).await;

		self.shared.load(Ordering::Relaxed) == self.epoch
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn debouncer() -> Debouncer {
		Debouncer::new(Duration::milliseconds(500))
	}

	#[tokio::test(start_paused = true)]
	async fn a_lone_edit_settles() {
		assert!(debouncer().arm().settle().await);
	}

	#[tokio::test(start_paused = true)]
	async fn a_newer_edit_supersedes_the_armed_ticket() {
		let debouncer = debouncer();
		let first = debouncer.arm();
		let second = debouncer.arm();

		assert!(!first.settle().await);
		assert!(second.settle().await);
	}

	#[tokio::test(start_paused = true)]
	async fn preemption_silences_the_armed_ticket() {
		let debouncer = debouncer();
		let armed = debouncer.arm();

		debouncer.preempt();

		assert!(!armed.settle().await);
	}
}
