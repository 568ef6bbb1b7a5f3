//! Storage contracts and built-in backends for the persisted session.

pub mod file;
pub mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

// self
use crate::{_prelude::*, auth::Session};

/// Persistence contract future returned by [`SessionStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract for the client-held session.
///
/// Backends persist the session as one unit so the all-or-nothing invariant
/// of [`Session`](crate::auth::Session) survives restarts: there is no way to
/// clear the tokens while leaving a stale account behind.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Returns the stored session, if any.
	fn load(&self) -> StoreFuture<'_, Option<Session>>;

	/// Persists or replaces the whole session.
	fn save(&self, session: Session) -> StoreFuture<'_, ()>;

	/// Overwrites only the access token, leaving the refresh token and account
	/// untouched. Returns the updated session when one was stored.
	fn replace_access_token<'a>(
		&'a self,
		access_token: &'a str,
	) -> StoreFuture<'a, Option<Session>>;

	/// Removes the session (tokens and account together).
	fn clear(&self) -> StoreFuture<'_, ()>;
}

/// Error type produced by [`SessionStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
