//! Typed client SDK for the EasySubscribe VTU platform—bearer sessions with single-flight
//! refresh, TTL response caching, cancel-on-supersede coalescing, and debounced smartcard
//! verification in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod debounce;
pub mod endpoints;
pub mod error;
pub mod flows;
pub mod http;
pub mod inflight;
pub mod obs;
pub mod smartcard;
pub mod store;
pub mod validate;
pub mod view;
#[cfg(feature = "reqwest")]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests and demos; enabled with the
	//! default `reqwest` feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{Session, UserAccount},
		config::ClientConfig,
		flows::Client,
		http::ReqwestTransport,
		store::{MemorySessionStore, SessionStore},
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type TestClient = Client<ReqwestTransport>;

	/// Builds a configuration pointed at the given mock endpoints, with short deadlines and
	/// debounce windows so tests settle quickly.
	pub fn test_config(endpoints: impl IntoIterator<Item = Url>) -> ClientConfig {
		ClientConfig::builder()
			.endpoints(endpoints)
			.request_timeout(Duration::seconds(5))
			.smartcard_debounce(Duration::milliseconds(25))
			.search_debounce(Duration::milliseconds(25))
			.build()
			.expect("Failed to build test client configuration.")
	}

	/// Constructs a [`Client`] backed by an in-memory session store and the reqwest transport
	/// used across integration tests.
	pub fn build_test_client(
		endpoints: impl IntoIterator<Item = Url>,
	) -> (TestClient, Arc<MemorySessionStore>) {
		let store_backend = Arc::new(MemorySessionStore::default());
		let store: Arc<dyn SessionStore> = store_backend.clone();
		let client = Client::new(test_config(endpoints), store);

		(client, store_backend)
	}

	/// Account fixture shared by session-seeding helpers.
	pub fn test_account() -> UserAccount {
		UserAccount {
			id: "64aa01".into(),
			name: "Ada Obi".into(),
			email: "ada@example.com".into(),
			phone: Some("08031234567".into()),
			role: None,
			wallet_balance: Some(12_500.),
		}
	}

	/// Session fixture holding `access-seed`/`refresh-seed` for [`test_account`].
	pub fn seeded_session() -> Session {
		Session::new("access-seed", "refresh-seed", test_account())
	}

	/// Persists [`seeded_session`] into `store` so authenticated calls can proceed.
	pub async fn sign_in(store: &MemorySessionStore) {
		store.save(seeded_session()).await.expect("Failed to seed the test session store.");
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
