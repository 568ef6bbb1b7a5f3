//! TTL cache for read-mostly backend responses.
//!
//! Entries are stored as JSON values so one cache serves every payload type.
//! Only successful fetches are written; a failed fetch leaves whatever was
//! cached before untouched. Expiry is checked lazily on read.

// self
use crate::_prelude::*;

#[derive(Clone, Debug)]
struct CacheEntry {
	expires_at: OffsetDateTime,
	value: serde_json::Value,
}

/// String-keyed TTL cache shared by all flows of one client.
#[derive(Clone, Debug, Default)]
pub struct ResponseCache {
	entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}
impl ResponseCache {
	/// Creates an empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the cached payload for `key`, or runs `fetch` and caches its success.
	///
	/// A stale or missing entry triggers `fetch`; its failure propagates
	/// without touching the cache. A fresh entry whose stored shape no longer
	/// matches `T` is treated as a miss and overwritten by the next success.
	pub async fn get_or_fetch<T, F, Fut>(&self, key: &str, ttl: Duration, fetch: F) -> Result<T>
	where
		T: Serialize + serde::de::DeserializeOwned,
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<T>>,
	{
		if let Some(value) = self.lookup(key) {
			if let Ok(typed) = serde_json::from_value(value) {
				return Ok(typed);
			}
		}

		let fetched = fetch().await?;

		// Caching is best-effort; a payload that cannot round-trip through
		// JSON is returned uncached.
		if let Ok(value) = serde_json::to_value(&fetched) {
			self.entries.write().insert(
				key.into(),
				CacheEntry { expires_at: OffsetDateTime::now_utc() + ttl, value },
			);
		}

		Ok(fetched)
	}

	/// Drops the entry for `key`, forcing the next read to fetch.
	pub fn invalidate(&self, key: &str) {
		self.entries.write().remove(key);
	}

	/// Drops every entry.
	pub fn clear(&self) {
		self.entries.write().clear();
	}

	fn lookup(&self, key: &str) -> Option<serde_json::Value> {
		let entries = self.entries.read();
		let entry = entries.get(key)?;

		(OffsetDateTime::now_utc() < entry.expires_at).then(|| entry.value.clone())
	}
}

/// Cache key for a provider's TV variation catalog.
pub fn tv_variations_key(provider: &str) -> String {
	format!("tvVariations_{provider}")
}

/// Cache key for a smartcard customer lookup.
pub fn customer_details_key(provider: &str, smartcard: &str) -> String {
	format!("customerDetails_{provider}_{smartcard}")
}
