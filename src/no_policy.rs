use std::fmt;
use std::hash::Hash;

use ahash::RandomState;
use indexmap::IndexSet;

use crate::traits::CachePolicy;

/// Policy without any ordering.
///
/// Keeps the tracked key set and hands out whichever key happens to sit first
/// in it. Erasure swaps the last key into the vacated position, so the
/// candidate order is unrelated to insertion or access order.
pub struct NoPolicy<K> {
	keys: IndexSet<K, RandomState>,
}

impl<K: Hash + Eq> NoPolicy<K> {
	pub fn new() -> Self {
		Self {
			keys: IndexSet::with_hasher(RandomState::new()),
		}
	}
}

impl<K: Hash + Eq> Default for NoPolicy<K> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K: Hash + Eq> CachePolicy<K> for NoPolicy<K> {
	fn insert(&mut self, key: K) {
		self.keys.insert(key);
	}

	fn touch(&mut self, _key: &K) {}

	fn erase(&mut self, key: &K) {
		self.keys.swap_remove(key);
	}

	fn replacement_candidate(&self) -> Option<&K> {
		self.keys.first()
	}

	fn len(&self) -> usize {
		self.keys.len()
	}

	fn clear(&mut self) {
		self.keys.clear();
	}
}

impl<K> fmt::Debug for NoPolicy<K> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NoPolicy").field("tracked", &self.keys.len()).finish()
	}
}
