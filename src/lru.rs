use std::fmt;
use std::hash::Hash;

use crate::list::KeyList;
use crate::traits::CachePolicy;

/// Least recently used.
///
/// Keys are ordered by recency of access, most recent at the head. Both
/// inserts and touches move a key to the head; the tail is the replacement
/// candidate.
///
/// With a cache of three and keys inserted as `A -> B -> C`:
///
/// ```text
/// recency (head..tail)   C B A
/// touch A                A C B
/// touch B                B A C
/// insert D               D B A   (C evicted)
/// ```
///
/// [`erase`](CachePolicy::erase) removes exactly the named key, wherever it
/// sits, so explicit removals never disturb the recency of other keys.
pub struct LruPolicy<K> {
	recency: KeyList<K>,
}

impl<K: Hash + Eq + Clone> LruPolicy<K> {
	pub fn new() -> Self {
		Self {
			recency: KeyList::new(),
		}
	}
}

impl<K: Hash + Eq + Clone> Default for LruPolicy<K> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K: Hash + Eq + Clone> CachePolicy<K> for LruPolicy<K> {
	fn insert(&mut self, key: K) {
		self.recency.push_front(key);
	}

	fn touch(&mut self, key: &K) {
		let moved = self.recency.move_to_front(key);
		debug_assert!(moved, "touched key is not tracked");
	}

	fn erase(&mut self, key: &K) {
		let removed = self.recency.remove(key);
		debug_assert!(removed, "erased key is not tracked");
	}

	fn replacement_candidate(&self) -> Option<&K> {
		self.recency.back()
	}

	fn len(&self) -> usize {
		self.recency.len()
	}

	fn clear(&mut self) {
		self.recency.clear();
	}
}

impl<K: Hash + Eq + Clone> fmt::Debug for LruPolicy<K> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LruPolicy").field("tracked", &self.recency.len()).finish()
	}
}
