//! Debounced smartcard verification.
//!
//! Keystrokes publish their format outcome immediately; a well-formed number
//! then waits out the quiet period before it is verified against the backend.
//! Every evaluation supersedes the previous one, so a stale lookup can never
//! overwrite the state a newer edit produced.

// self
use crate::{
	_prelude::*,
	api::models::TvCustomer,
	debounce::Debouncer,
	inflight::{InFlightGuard, InFlightRegistry},
	obs::Operation,
	smartcard::{FormatCheck, TvProvider, check_format},
};

/// Boxed future returned by [`CustomerLookup`] implementations.
pub type LookupFuture<'a> = Pin<Box<dyn Future<Output = Result<TvCustomer>> + 'a + Send>>;

/// Backend seam the pipeline verifies smartcards through.
pub trait CustomerLookup
where
	Self: 'static + Send + Sync,
{
	/// Looks up the customer registered to `smartcard` at `provider`.
	fn lookup<'a>(&'a self, provider: &'a TvProvider, smartcard: &'a str) -> LookupFuture<'a>;
}

/// Observable verification state of the smartcard field.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FieldState {
	/// Nothing to validate yet.
	#[default]
	Empty,
	/// The number fails the provider's format rule, or no provider is chosen.
	FormatInvalid {
		/// Message shown next to the field.
		message: &'static str,
	},
	/// The number fits the format rule; verification has not started.
	FormatValid {
		/// Digits-only form submitted to the backend.
		normalized: String,
	},
	/// Verification is in flight.
	Pending {
		/// Digits-only form submitted to the backend.
		normalized: String,
	},
	/// The backend recognized the smartcard.
	Verified {
		/// Digits-only form submitted to the backend.
		normalized: String,
		/// Name and bouquet registered to the smartcard.
		customer: TvCustomer,
	},
	/// The backend did not recognize the smartcard; details stay hidden.
	VerificationFailed {
		/// Digits-only form submitted to the backend.
		normalized: String,
	},
}
impl FieldState {
	/// Message to show next to the field, when one applies.
	pub fn message(&self) -> Option<&'static str> {
		match self {
			Self::FormatInvalid { message } => Some(message),
			_ => None,
		}
	}

	/// Customer details to show, once verification succeeded.
	pub fn customer(&self) -> Option<&TvCustomer> {
		match self {
			Self::Verified { customer, .. } => Some(customer),
			_ => None,
		}
	}
}

#[derive(Debug, Default)]
struct Inner {
	provider: Option<TvProvider>,
	input: String,
	field: FieldState,
}

enum Staged {
	Settled(FieldState),
	Lookup { provider: TvProvider, normalized: String },
}

/// Smartcard field controller for the TV subscription form.
pub struct SmartcardPipeline<L> {
	lookup: L,
	debouncer: Debouncer,
	registry: InFlightRegistry,
	inner: Arc<RwLock<Inner>>,
}
impl<L> SmartcardPipeline<L>
where
	L: CustomerLookup,
{
	/// Creates a pipeline over `lookup` with the given debounce quiet period.
	pub fn new(lookup: L, debounce: Duration, registry: InFlightRegistry) -> Self {
		Self {
			lookup,
			debouncer: Debouncer::new(debounce),
			registry,
			inner: Arc::new(RwLock::new(Inner::default())),
		}
	}

	/// Current field state.
	pub fn state(&self) -> FieldState {
		self.inner.read().field.clone()
	}

	/// Currently selected provider.
	pub fn provider(&self) -> Option<TvProvider> {
		self.inner.read().provider.clone()
	}

	/// Records a keystroke. The format outcome is published before this
	/// returns control to the event loop; only the backend lookup of a
	/// well-formed number waits out the quiet period.
	///
	/// Returns the state the edit settled on, or the state a newer edit
	/// published when it superseded this one.
	pub async fn edit(&self, input: impl Into<String>) -> FieldState {
		let input = input.into();
		let (guard, staged) = self.stage(|inner| inner.input = input, false);
		let Staged::Lookup { provider, normalized } = staged else {
			return self.state();
		};
		let ticket = self.debouncer.arm();

		if !ticket.settle().await {
			return self.state();
		}

		self.verify(guard, provider, normalized).await
	}

	/// Evaluates immediately when the user leaves the field.
	pub async fn blur(&self) -> FieldState {
		self.debouncer.preempt();

		let (guard, staged) = self.stage(|_| (), true);

		match staged {
			Staged::Settled(_) => self.state(),
			Staged::Lookup { provider, normalized } =>
				self.verify(guard, provider, normalized).await,
		}
	}

	/// Switches the provider and re-evaluates the current input immediately.
	pub async fn select_provider(&self, provider: Option<TvProvider>) -> FieldState {
		self.debouncer.preempt();

		let (guard, staged) = self.stage(|inner| inner.provider = provider, false);

		match staged {
			Staged::Settled(_) => self.state(),
			Staged::Lookup { provider, normalized } =>
				self.verify(guard, provider, normalized).await,
		}
	}

	// Applies the edit, claims the verification slot, and publishes the format
	// outcome, all under one lock: by the time a superseded evaluation
	// observes its cancellation, the state it reads back is already this one.
	fn stage(&self, apply: impl FnOnce(&mut Inner), blurred: bool) -> (InFlightGuard, Staged) {
		let mut inner = self.inner.write();
		let guard = self.registry.begin(Operation::SmartcardVerification);

		apply(&mut inner);

		let staged = if inner.input.trim().is_empty() {
			Staged::Settled(FieldState::Empty)
		} else {
			match &inner.provider {
				// Input without a provider only draws attention once the user
				// leaves the field.
				None if blurred => Staged::Settled(FieldState::FormatInvalid {
					message: "Please select a TV provider first",
				}),
				None => Staged::Settled(FieldState::Empty),
				Some(provider) => match check_format(provider, &inner.input) {
					FormatCheck::Missing => Staged::Settled(FieldState::Empty),
					FormatCheck::Invalid(message) =>
						Staged::Settled(FieldState::FormatInvalid { message }),
					FormatCheck::Valid { normalized } =>
						Staged::Lookup { provider: provider.clone(), normalized },
				},
			}
		};

		inner.field = match &staged {
			Staged::Settled(state) => state.clone(),
			Staged::Lookup { normalized, .. } =>
				FieldState::FormatValid { normalized: normalized.clone() },
		};

		(guard, staged)
	}

	async fn verify(
		&self,
		guard: InFlightGuard,
		provider: TvProvider,
		normalized: String,
	) -> FieldState {
		if guard.is_superseded() {
			return self.state();
		}

		self.transition(&guard, FieldState::Pending { normalized: normalized.clone() });

		let outcome = tokio::select! {
			outcome = self.lookup.lookup(&provider, &normalized) => outcome,
			_ = guard.superseded() => Err(Error::Aborted),
		};

		match outcome {
			Ok(customer) => self.transition(&guard, FieldState::Verified { normalized, customer }),
			Err(e) if e.is_aborted() => self.state(),
			Err(_) => self.transition(&guard, FieldState::VerificationFailed { normalized }),
		}
	}

	// Writes `state` unless a newer evaluation has claimed the slot; a
	// superseded evaluation must leave no trace.
	fn transition(&self, guard: &InFlightGuard, state: FieldState) -> FieldState {
		if guard.is_superseded() {
			return self.state();
		}

		self.inner.write().field = state.clone();

		state
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicU32, Ordering};
	// self
	use super::*;

	struct FakeLookup {
		customer: Option<TvCustomer>,
		delay: Duration,
		calls: AtomicU32,
	}
	impl FakeLookup {
		fn verified(name: &str) -> Self {
			Self {
				customer: Some(TvCustomer {
					customer_name: Some(name.into()),
					current_plan: Some("GOtv Max".into()),
				}),
				delay: Duration::ZERO,
				calls: AtomicU32::new(0),
			}
		}

		fn failing() -> Self {
			Self { customer: None, delay: Duration::ZERO, calls: AtomicU32::new(0) }
		}

		fn delayed(mut self, delay: Duration) -> Self {
			self.delay = delay;

			self
		}

		fn calls(&self) -> u32 {
			self.calls.load(Ordering::Relaxed)
		}
	}
	impl CustomerLookup for Arc<FakeLookup> {
		fn lookup<'a>(&'a self, _: &'a TvProvider, _: &'a str) -> LookupFuture<'a> {
			Box::pin(async move {
				self.calls.fetch_add(1, Ordering::Relaxed);

				if self.delay.is_positive() {
					tokio::time::sleep(self.delay.unsigned_abs()).await;
				}

				match &self.customer {
					Some(customer) => Ok(customer.clone()),
					None => Err(Error::Api {
						message: "Customer not found".into(),
						status: Some(404),
					}),
				}
			})
		}
	}

	fn pipeline(lookup: Arc<FakeLookup>) -> SmartcardPipeline<Arc<FakeLookup>> {
		SmartcardPipeline::new(lookup, Duration::milliseconds(10), InFlightRegistry::new())
	}

	#[tokio::test(start_paused = true)]
	async fn a_valid_edit_verifies_after_the_quiet_period() {
		let lookup = Arc::new(FakeLookup::verified("Ada Obi"));
		let pipeline = pipeline(lookup.clone());

		pipeline.select_provider(Some(TvProvider::Gotv)).await;

		let state = pipeline.edit("1234567890").await;

		assert_eq!(
			state.customer().and_then(|c| c.customer_name.as_deref()),
			Some("Ada Obi"),
		);
		assert_eq!(lookup.calls(), 1);
	}

	#[tokio::test(start_paused = true)]
	async fn invalid_formats_never_reach_the_backend() {
		let lookup = Arc::new(FakeLookup::verified("Ada Obi"));
		let pipeline = pipeline(lookup.clone());

		pipeline.select_provider(Some(TvProvider::Gotv)).await;

		let state = pipeline.edit("12345").await;

		assert_eq!(state.message(), Some("GOtv smartcard must be 10 digits"));
		assert_eq!(lookup.calls(), 0);
	}

	#[tokio::test(start_paused = true)]
	async fn clearing_the_input_resets_the_field() {
		let lookup = Arc::new(FakeLookup::verified("Ada Obi"));
		let pipeline = pipeline(lookup);

		pipeline.select_provider(Some(TvProvider::Gotv)).await;
		pipeline.edit("1234567890").await;

		assert_eq!(pipeline.edit("   ").await, FieldState::Empty);
	}

	#[tokio::test(start_paused = true)]
	async fn blur_without_a_provider_prompts_for_one() {
		let lookup = Arc::new(FakeLookup::verified("Ada Obi"));
		let pipeline = pipeline(lookup.clone());

		assert_eq!(pipeline.edit("1234567890").await, FieldState::Empty);
		assert_eq!(
			pipeline.blur().await.message(),
			Some("Please select a TV provider first"),
		);
		assert_eq!(lookup.calls(), 0);
	}

	#[tokio::test(start_paused = true)]
	async fn switching_providers_revalidates_the_same_input() {
		let lookup = Arc::new(FakeLookup::verified("Ada Obi"));
		let pipeline = pipeline(lookup);

		pipeline.select_provider(Some(TvProvider::Dstv)).await;

		assert!(pipeline.edit("12345678901").await.customer().is_some());

		let state = pipeline.select_provider(Some(TvProvider::Gotv)).await;

		assert_eq!(state.message(), Some("GOtv smartcard must be 10 digits"));
	}

	#[tokio::test(start_paused = true)]
	async fn failed_verification_keeps_the_details_hidden() {
		let lookup = Arc::new(FakeLookup::failing());
		let pipeline = pipeline(lookup);

		pipeline.select_provider(Some(TvProvider::Gotv)).await;

		let state = pipeline.edit("1234567890").await;

		assert_eq!(state, FieldState::VerificationFailed { normalized: "1234567890".into() });
		assert_eq!(state.customer(), None);
	}

	#[tokio::test(flavor = "multi_thread")]
	async fn a_superseding_edit_silences_the_stale_lookup() {
		let lookup = Arc::new(FakeLookup::verified("Ada Obi").delayed(Duration::milliseconds(200)));
		let pipeline = Arc::new(pipeline(lookup));

		pipeline.select_provider(Some(TvProvider::Gotv)).await;

		let slow = {
			let pipeline = pipeline.clone();

			tokio::spawn(async move { pipeline.edit("1234567890").await })
		};

		// Let the first edit pass its quiet period and enter the lookup.
		tokio::time::sleep(std::time::Duration::from_millis(60)).await;

		let state = pipeline.edit("12345").await;

		assert_eq!(state.message(), Some("GOtv smartcard must be 10 digits"));

		let stale = slow.await.expect("Superseded edit should finish cleanly.");

		assert_eq!(stale.message(), Some("GOtv smartcard must be 10 digits"));
		assert_eq!(pipeline.state().message(), Some("GOtv smartcard must be 10 digits"));
	}

	#[tokio::test(start_paused = true)]
	async fn format_feedback_lands_before_the_lookup_debounce() {
		let lookup = Arc::new(FakeLookup::verified("Ada Obi"));
		let pipeline = Arc::new(pipeline(lookup.clone()));

		pipeline.select_provider(Some(TvProvider::Gotv)).await;

		let edit = {
			let pipeline = pipeline.clone();

			tokio::spawn(async move { pipeline.edit("1234567890").await })
		};

		// No clock advance yet: the edit has staged but its quiet period has
		// not elapsed.
		tokio::task::yield_now().await;

		assert_eq!(pipeline.state(), FieldState::FormatValid { normalized: "1234567890".into() });
		assert_eq!(lookup.calls(), 0);

		let settled = edit.await.expect("The edit should settle cleanly.");

		assert!(settled.customer().is_some());
		assert_eq!(lookup.calls(), 1);
	}

	struct CoalescingLookup {
		registry: InFlightRegistry,
		calls: AtomicU32,
	}
	impl CustomerLookup for Arc<CoalescingLookup> {
		fn lookup<'a>(&'a self, _: &'a TvProvider, _: &'a str) -> LookupFuture<'a> {
			Box::pin(async move {
				// Claims the lookup slot the way the client's coalescing
				// wrapper does, sharing the pipeline's registry.
				let guard = self.registry.begin(Operation::CustomerLookup);

				self.calls.fetch_add(1, Ordering::Relaxed);

				if guard.is_superseded() {
					return Err(Error::Aborted);
				}

				Ok(TvCustomer {
					customer_name: Some("Ada Obi".into()),
					current_plan: Some("GOtv Max".into()),
				})
			})
		}
	}

	#[tokio::test(start_paused = true)]
	async fn a_lookup_coalescing_in_the_shared_registry_still_verifies() {
		let registry = InFlightRegistry::new();
		let lookup =
			Arc::new(CoalescingLookup { registry: registry.clone(), calls: AtomicU32::new(0) });
		let pipeline =
			SmartcardPipeline::new(lookup.clone(), Duration::milliseconds(10), registry);

		pipeline.select_provider(Some(TvProvider::Gotv)).await;

		let state = pipeline.edit("1234567890").await;

		assert_eq!(
			state.customer().and_then(|c| c.customer_name.as_deref()),
			Some("Ada Obi"),
		);
		assert_eq!(lookup.calls.load(Ordering::Relaxed), 1);
	}
}
