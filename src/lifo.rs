use std::fmt;
use std::hash::Hash;

use crate::list::KeyList;
use crate::traits::CachePolicy;

/// Last in, first out.
///
/// The most recently admitted key that is still tracked is evicted first:
/// with keys inserted as `A -> B -> C`, `C` is the replacement candidate,
/// then `B`, then `A`. Accesses never change the order.
pub struct LifoPolicy<K> {
	stack: KeyList<K>,
}

impl<K: Hash + Eq + Clone> LifoPolicy<K> {
	pub fn new() -> Self {
		Self {
			stack: KeyList::new(),
		}
	}
}

impl<K: Hash + Eq + Clone> Default for LifoPolicy<K> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K: Hash + Eq + Clone> CachePolicy<K> for LifoPolicy<K> {
	fn insert(&mut self, key: K) {
		self.stack.push_front(key);
	}

	fn touch(&mut self, _key: &K) {}

	fn erase(&mut self, key: &K) {
		let removed = self.stack.remove(key);
		debug_assert!(removed, "erased key is not tracked");
	}

	fn replacement_candidate(&self) -> Option<&K> {
		self.stack.front()
	}

	fn len(&self) -> usize {
		self.stack.len()
	}

	fn clear(&mut self) {
		self.stack.clear();
	}
}

impl<K: Hash + Eq + Clone> fmt::Debug for LifoPolicy<K> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LifoPolicy").field("tracked", &self.stack.len()).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn policy_of(keys: &[char]) -> LifoPolicy<char> {
		let mut policy = LifoPolicy::new();
		for &key in keys {
			policy.insert(key);
		}
		policy
	}

	#[test]
	fn test_newest_is_candidate() {
		let mut policy = policy_of(&['a', 'b', 'c']);

		assert_eq!(policy.replacement_candidate(), Some(&'c'));
		policy.erase(&'c');
		assert_eq!(policy.replacement_candidate(), Some(&'b'));
		policy.erase(&'b');
		assert_eq!(policy.replacement_candidate(), Some(&'a'));
	}

	#[test]
	fn test_touch_does_not_reorder() {
		let mut policy = policy_of(&['a', 'b', 'c']);

		policy.touch(&'a');

		assert_eq!(policy.replacement_candidate(), Some(&'c'));
	}

	#[test]
	fn test_erase_of_buried_key() {
		let mut policy = policy_of(&['a', 'b', 'c']);

		policy.erase(&'a');

		assert_eq!(policy.len(), 2);
		assert_eq!(policy.stack.to_vec(), vec!['c', 'b']);
	}

	#[test]
	fn test_candidate_follows_latest_insert() {
		let mut policy = policy_of(&['a', 'b', 'c']);

		policy.erase(&'c');
		policy.insert('d');

		assert_eq!(policy.replacement_candidate(), Some(&'d'));
	}
}
