//! Thread-safe in-memory [`SessionStore`] implementation for tests and ephemeral runs.

// self
use crate::{
	_prelude::*,
	auth::Session,
	store::{SessionStore, StoreError, StoreFuture},
};

type SessionSlot = Arc<RwLock<Option<Session>>>;

/// Keeps the session in-process; nothing survives a restart.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore(SessionSlot);
impl MemorySessionStore {
	fn load_now(slot: SessionSlot) -> Option<Session> {
		slot.read().clone()
	}

	fn save_now(slot: SessionSlot, session: Session) -> Result<(), StoreError> {
		*slot.write() = Some(session);

		Ok(())
	}

	fn replace_now(slot: SessionSlot, access_token: &str) -> Option<Session> {
		let mut guard = slot.write();

		match guard.take() {
			Some(session) => {
				let rotated = session.with_access_token(access_token);

				*guard = Some(rotated.clone());

				Some(rotated)
			},
			None => None,
		}
	}

	fn clear_now(slot: SessionSlot) -> Result<(), StoreError> {
		*slot.write() = None;

		Ok(())
	}
}
impl SessionStore for MemorySessionStore {
	fn load(&self) -> StoreFuture<'_, Option<Session>> {
		let slot = self.0.clone();

		Box::pin(async move { Ok(Self::load_now(slot)) })
	}

	fn save(&self, session: Session) -> StoreFuture<'_, ()> {
		let slot = self.0.clone();

		Box::pin(async move { Self::save_now(slot, session) })
	}

	fn replace_access_token<'a>(
		&'a self,
		access_token: &'a str,
	) -> StoreFuture<'a, Option<Session>> {
		let slot = self.0.clone();

		Box::pin(async move { Ok(Self::replace_now(slot, access_token)) })
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		let slot = self.0.clone();

		Box::pin(async move { Self::clear_now(slot) })
	}
}
