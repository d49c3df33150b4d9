use std::fmt;
use std::hash::Hash;

use crate::list::KeyList;
use crate::traits::CachePolicy;

/// First in, first out.
///
/// Keys are evicted in the order they were admitted: with keys inserted as
/// `A -> B -> C`, `A` is the replacement candidate, then `B`, then `C`.
/// Accesses never change the order.
pub struct FifoPolicy<K> {
	queue: KeyList<K>,
}

impl<K: Hash + Eq + Clone> FifoPolicy<K> {
	pub fn new() -> Self {
		Self {
			queue: KeyList::new(),
		}
	}
}

impl<K: Hash + Eq + Clone> Default for FifoPolicy<K> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K: Hash + Eq + Clone> CachePolicy<K> for FifoPolicy<K> {
	fn insert(&mut self, key: K) {
		self.queue.push_front(key);
	}

	fn touch(&mut self, _key: &K) {}

	fn erase(&mut self, key: &K) {
		let removed = self.queue.remove(key);
		debug_assert!(removed, "erased key is not tracked");
	}

	fn replacement_candidate(&self) -> Option<&K> {
		self.queue.back()
	}

	fn len(&self) -> usize {
		self.queue.len()
	}

	fn clear(&mut self) {
		self.queue.clear();
	}
}

impl<K: Hash + Eq + Clone> fmt::Debug for FifoPolicy<K> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FifoPolicy").field("tracked", &self.queue.len()).finish()
	}
}
