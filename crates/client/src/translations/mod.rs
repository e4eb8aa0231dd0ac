//! Page-lifetime translation cache.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::{ActionClient, Outcome};

/// Lazily populated key to text mapping.
///
/// Entries are never invalidated. Failed lookups are not cached, so the next
/// request for the same key asks the server again. Concurrent misses for one
/// key may each issue a request; the first answer stored wins.
#[derive(Debug)]
pub struct Translations {
	client: ActionClient,
	cache: RwLock<HashMap<String, String>>,
}

impl Translations {
	/// Creates an empty cache resolving through `client`.
	pub fn new(client: ActionClient) -> Self {
		Self {
			client,
			cache: RwLock::new(HashMap::new()),
		}
	}

	/// Returns the cached text for `key` without asking the server.
	pub fn cached(&self, key: &str) -> Option<String> {
		self.cache.read().get(key).cloned()
	}

	/// Seeds the cache, e.g. with texts embedded in the page.
	pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
		self.cache.write().entry(key.into()).or_insert_with(|| value.into());
	}

	/// Returns the text for `key`, fetching it on a miss.
	pub async fn resolve(&self, key: &str) -> Option<String> {
		if let Some(value) = self.cached(key) {
			return Some(value);
		}
		match self.client.get_translation(key).await {
			Outcome::Success(value) => {
				let mut cache = self.cache.write();
				Some(cache.entry(key.to_owned()).or_insert(value).clone())
			}
			outcome => {
				debug!(key, ?outcome, "translation unavailable");
				None
			}
		}
	}
}

#[cfg(test)]
mod tests;
