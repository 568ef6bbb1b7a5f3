//! Duplicate-work control: latest-wins coalescing and double-submit latching.
//!
//! Refreshable reads go through [`InFlightRegistry`]: beginning an operation
//! cancels the previous in-flight attempt for the same operation, and the
//! superseded attempt surfaces as [`Error::Aborted`] without any user-visible
//! state change. Submissions go through [`BusySet`]: while one attempt holds
//! the latch, duplicates are refused instead of cancelling it.

// std
use std::{
	collections::HashSet,
	sync::atomic::{AtomicU64, Ordering},
};
// crates.io
use tokio_util::sync::CancellationToken;
// self
use crate::{_prelude::*, obs::Operation};

#[derive(Debug)]
struct Slot {
	generation: u64,
	token: CancellationToken,
}

type Slots = Arc<Mutex<HashMap<Operation, Slot>>>;

/// Latest-wins coalescing for refreshable reads.
#[derive(Clone, Debug, Default)]
pub struct InFlightRegistry {
	slots: Slots,
	// Generations are global, so a slot re-created after a finish can never
	// collide with a guard from its previous life.
	generation: Arc<AtomicU64>,
}
impl InFlightRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a new attempt for `operation`, cancelling the previous one.
	///
	/// The returned guard de-registers itself when dropped, whether the
	/// attempt completed or lost to a successor.
	pub fn begin(&self, operation: Operation) -> InFlightGuard {
		let generation = self.generation.fetch_add(1, Ordering::Relaxed);
		let token = CancellationToken::new();

		if let Some(previous) =
			self.slots.lock().insert(operation, Slot { generation, token: token.clone() })
		{
			previous.token.cancel();
		}

		InFlightGuard { operation, generation, token, slots: self.slots.clone() }
	}

	/// True while an attempt for `operation` is registered.
	pub fn is_in_flight(&self, operation: Operation) -> bool {
		self.slots.lock().contains_key(&operation)
	}
}

/// One registered attempt; dropping it de-registers the attempt.
#[derive(Debug)]
pub struct InFlightGuard {
	operation: Operation,
	generation: u64,
	token: CancellationToken,
	slots: Slots,
}
impl InFlightGuard {
	/// Operation this attempt belongs to.
	pub fn operation(&self) -> Operation {
		self.operation
	}

	/// True once a newer attempt for the same operation has begun.
	pub fn is_superseded(&self) -> bool {
		self.token.is_cancelled()
	}

	/// Resolves once a newer attempt for the same operation has begun.
	pub async fn superseded(&self) {
		self.token.cancelled().await;
	}
}
impl Drop for InFlightGuard {
	fn drop(&mut self) {
		let mut slots = self.slots.lock();

		// A stale guard must never evict its successor's slot.
		if slots.get(&self.operation).map(|slot| slot.generation) == Some(self.generation) {
			slots.remove(&self.operation);
		}
	}
}

type BusyKey = (Operation, Option<String>);

/// Busy latch refusing duplicate submissions of the same action.
#[derive(Clone, Debug, Default)]
pub struct BusySet {
	held: Arc<Mutex<HashSet<BusyKey>>>,
}
impl BusySet {
	/// Creates an empty latch set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Latches `operation`, or returns `None` while a previous hold is live.
	pub fn try_hold(&self, operation: Operation) -> Option<BusyGuard> {
		self.try_insert((operation, None))
	}

	/// Latches `operation` for one subject, e.g. a single funding request row.
	pub fn try_hold_scoped(
		&self,
		operation: Operation,
		subject: impl Into<String>,
	) -> Option<BusyGuard> {
		self.try_insert((operation, Some(subject.into())))
	}

	/// True while an unscoped hold for `operation` is live.
	pub fn is_busy(&self, operation: Operation) -> bool {
		self.held.lock().contains(&(operation, None))
	}

	fn try_insert(&self, key: BusyKey) -> Option<BusyGuard> {
		self.held
			.lock()
			.insert(key.clone())
			.then(|| BusyGuard { key, held: self.held.clone() })
	}
}

/// RAII hold on a [`BusySet`] entry; dropping it releases the latch.
#[derive(Debug)]
pub struct BusyGuard {
	key: BusyKey,
	held: Arc<Mutex<HashSet<BusyKey>>>,
}
impl Drop for BusyGuard {
	fn drop(&mut self) {
		self.held.lock().remove(&self.key);
	}
}
