//! Ordered endpoint candidates with sticky adoption.
//!
//! The pool starts on the first configured candidate and only moves when a
//! candidate proves itself, either through a successful fallback attempt or a
//! health probe. Adoption is sticky: later requests keep using the adopted
//! candidate until it fails in turn.

// std
use std::sync::atomic::{AtomicUsize, Ordering};
// self
use crate::_prelude::*;

/// Probe path answered by every backend deployment.
pub(crate) const HEALTH_PATH: &str = "/health";

/// Ordered endpoint candidates sharing one sticky active slot.
#[derive(Clone, Debug)]
pub struct EndpointPool {
	candidates: Arc<Vec<Url>>,
	active: Arc<AtomicUsize>,
}
impl EndpointPool {
	/// Creates a pool over validated candidates, starting on the first.
	///
	/// [`crate::config::ClientConfig`] guarantees the list is non-empty.
	pub(crate) fn new(candidates: Vec<Url>) -> Self {
		Self { candidates: Arc::new(candidates), active: Arc::new(AtomicUsize::new(0)) }
	}

	/// Returns the active candidate and its index.
	pub fn active(&self) -> (usize, &Url) {
		// `adopt` rejects out-of-range indexes, so the slot always points
		// inside `candidates`.
		let index = self.active.load(Ordering::Relaxed);

		(index, &self.candidates[index])
	}

	/// Returns the candidate after `index`, when one exists.
	///
	/// Used for the single fallback attempt a transport failure is allowed.
	pub fn next_after(&self, index: usize) -> Option<(usize, &Url)> {
		let next = index + 1;

		self.candidates.get(next).map(|url| (next, url))
	}

	/// Makes `index` the active candidate for subsequent requests.
	pub fn adopt(&self, index: usize) {
		if index < self.candidates.len() {
			self.active.store(index, Ordering::Relaxed);
		}
	}

	/// Returns every candidate in preference order.
	pub fn candidates(&self) -> &[Url] {
		&self.candidates
	}
}
