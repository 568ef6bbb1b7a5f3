//! High-level backend operations exposed by the client context.
//!
//! [`Client`] is the single context object the whole SDK revolves around: it
//! owns the transport, the session store, the response cache, the in-flight
//! registry, and the endpoint pool, and every operation module hangs its
//! methods off it. Construct one at application start and hand clones to each
//! view or controller.

pub mod admin;
pub mod auth;
pub mod refresh;
pub mod services;
pub mod tv;
pub mod wallet;

mod common;
mod notifications;
mod profile;

pub use {admin::*, auth::*, refresh::*, services::*, tv::*, wallet::*};

// std
use std::sync::atomic::AtomicU64;
// self
use crate::{
	_prelude::*,
	cache::ResponseCache,
	config::ClientConfig,
	debounce::Debouncer,
	endpoints::EndpointPool,
	http::HttpTransport,
	inflight::{BusySet, InFlightRegistry},
	store::SessionStore,
};
#[cfg(feature = "reqwest")]
use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type DefaultClient = Client<ReqwestTransport>;

/// Coordinates every backend call of one signed-in (or signing-in) user.
///
/// The client owns the shared mutable state the call policies need: the
/// persisted session, the TTL response cache, the per-operation in-flight
/// registry, the busy latch for submissions, and the sticky endpoint pool.
/// Individual operation modules implement their flows against this context so
/// the retry/refresh/cancellation contract lives in exactly one place.
pub struct Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Transport executing every outbound request.
	pub transport: Arc<T>,
	/// Store persisting the bearer session across runs.
	pub store: Arc<dyn SessionStore>,
	/// Validated configuration the client was built with.
	pub config: ClientConfig,
	/// Sticky pool of candidate API base URLs.
	pub pool: EndpointPool,
	/// TTL cache for idempotent lookups.
	pub cache: ResponseCache,
	/// Latest-wins coalescing registry for refreshable reads.
	pub registry: InFlightRegistry,
	/// Duplicate-submission latch for mutating calls.
	pub busy: BusySet,
	/// Always-on counters for token refresh outcomes.
	pub refresh_metrics: Arc<RefreshMetrics>,
	pub(crate) refresh_guard: Arc<AsyncMutex<()>>,
	pub(crate) refresh_epoch: Arc<AtomicU64>,
	pub(crate) search_debouncer: Debouncer,
	pub(crate) pending_tv: Arc<RwLock<Option<PendingTvSubscription>>>,
	pub(crate) tv_reference: Arc<RwLock<Option<String>>>,
}
impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(
		config: ClientConfig,
		store: Arc<dyn SessionStore>,
		transport: impl Into<Arc<T>>,
	) -> Self {
		let pool = EndpointPool::new(config.endpoints.clone());
		let search_debouncer = Debouncer::new(config.search_debounce);

		Self {
			transport: transport.into(),
			store,
			config,
			pool,
			cache: ResponseCache::new(),
			registry: InFlightRegistry::new(),
			busy: BusySet::new(),
			refresh_metrics: Default::default(),
			refresh_guard: Default::default(),
			refresh_epoch: Default::default(),
			search_debouncer,
			pending_tv: Default::default(),
			tv_reference: Default::default(),
		}
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestTransport> {
	/// Creates a client with its own reqwest-backed transport.
	///
	/// Use [`Client::with_transport`] to share a pre-configured transport
	/// (proxies, custom TLS, recorded sessions) instead.
	pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Self {
		Self::with_transport(config, store, ReqwestTransport::default())
	}
}
impl<T> Clone for Client<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			store: self.store.clone(),
			config: self.config.clone(),
			pool: self.pool.clone(),
			cache: self.cache.clone(),
			registry: self.registry.clone(),
			busy: self.busy.clone(),
			refresh_metrics: self.refresh_metrics.clone(),
			refresh_guard: self.refresh_guard.clone(),
			refresh_epoch: self.refresh_epoch.clone(),
			search_debouncer: self.search_debouncer.clone(),
			pending_tv: self.pending_tv.clone(),
			tv_reference: self.tv_reference.clone(),
		}
	}
}
impl<T> Debug for Client<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("endpoints", &self.pool.candidates())
			.field("active_endpoint", &self.pool.active().1.as_str())
			.field("request_timeout", &self.config.request_timeout)
			.finish()
	}
}
