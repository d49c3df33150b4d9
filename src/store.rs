use std::collections::{BTreeMap, HashMap as StdHashMap};
use std::hash::{BuildHasher, Hash};

use hashbrown::HashMap;

/// Default storage: a `hashbrown` map keyed with `ahash`.
pub type DefaultStore<K, V> = HashMap<K, V, ahash::RandomState>;

/// Key/value storage used by a [`Cache`](crate::Cache).
///
/// Storage only holds entries; it never decides what to evict. Implemented for
/// `hashbrown::HashMap`, `std::collections::HashMap` and `BTreeMap`.
pub trait Store<K, V> {
	/// Create empty storage sized for `capacity` entries.
	fn with_capacity(capacity: usize) -> Self
	where
		Self: Sized;

	fn get(&self, key: &K) -> Option<&V>;

	fn get_mut(&mut self, key: &K) -> Option<&mut V>;

	fn contains_key(&self, key: &K) -> bool;

	/// Insert an entry, returning the previous value for the key.
	fn insert(&mut self, key: K, value: V) -> Option<V>;

	/// Remove an entry, handing back the stored key alongside the value.
	fn remove_entry(&mut self, key: &K) -> Option<(K, V)>;

	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Remove every entry, passing each one to `f`.
	fn drain_with<F>(&mut self, f: F)
	where
		F: FnMut(K, V);
}

impl<K, V, S> Store<K, V> for HashMap<K, V, S>
where
	K: Hash + Eq,
	S: BuildHasher + Default,
{
	fn with_capacity(capacity: usize) -> Self {
		HashMap::with_capacity_and_hasher(capacity, S::default())
	}

	fn get(&self, key: &K) -> Option<&V> {
		HashMap::get(self, key)
	}

	fn get_mut(&mut self, key: &K) -> Option<&mut V> {
		HashMap::get_mut(self, key)
	}

	fn contains_key(&self, key: &K) -> bool {
		HashMap::contains_key(self, key)
	}

	fn insert(&mut self, key: K, value: V) -> Option<V> {
		HashMap::insert(self, key, value)
	}

	fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
		HashMap::remove_entry(self, key)
	}

	fn len(&self) -> usize {
		HashMap::len(self)
	}

	fn drain_with<F>(&mut self, mut f: F)
	where
		F: FnMut(K, V),
	{
		for (key, value) in self.drain() {
			f(key, value);
		}
	}
}

impl<K, V, S> Store<K, V> for StdHashMap<K, V, S>
where
	K: Hash + Eq,
	S: BuildHasher + Default,
{
	fn with_capacity(capacity: usize) -> Self {
		StdHashMap::with_capacity_and_hasher(capacity, S::default())
	}

	fn get(&self, key: &K) -> Option<&V> {
		StdHashMap::get(self, key)
	}

	fn get_mut(&mut self, key: &K) -> Option<&mut V> {
		StdHashMap::get_mut(self, key)
	}

	fn contains_key(&self, key: &K) -> bool {
		StdHashMap::contains_key(self, key)
	}

	fn insert(&mut self, key: K, value: V) -> Option<V> {
		StdHashMap::insert(self, key, value)
	}

	fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
		StdHashMap::remove_entry(self, key)
	}

	fn len(&self) -> usize {
		StdHashMap::len(self)
	}

	fn drain_with<F>(&mut self, mut f: F)
	where
		F: FnMut(K, V),
	{
		for (key, value) in self.drain() {
			f(key, value);
		}
	}
}

impl<K: Ord, V> Store<K, V> for BTreeMap<K, V> {
	fn with_capacity(_capacity: usize) -> Self {
		BTreeMap::new()
	}

	fn get(&self, key: &K) -> Option<&V> {
		BTreeMap::get(self, key)
	}

	fn get_mut(&mut self, key: &K) -> Option<&mut V> {
		BTreeMap::get_mut(self, key)
	}

	fn contains_key(&self, key: &K) -> bool {
		BTreeMap::contains_key(self, key)
	}

	fn insert(&mut self, key: K, value: V) -> Option<V> {
		BTreeMap::insert(self, key, value)
	}

	fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
		BTreeMap::remove_entry(self, key)
	}

	fn len(&self) -> usize {
		BTreeMap::len(self)
	}

	fn drain_with<F>(&mut self, mut f: F)
	where
		F: FnMut(K, V),
	{
		std::mem::take(self).into_iter().for_each(|(key, value)| f(key, value));
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn exercise<M: Store<u32, String>>() {
		let mut store = M::with_capacity(4);
		assert!(store.is_empty());

		assert!(store.insert(1, "one".to_string()).is_none());
		assert!(store.insert(2, "two".to_string()).is_none());
		assert_eq!(store.insert(1, "uno".to_string()), Some("one".to_string()));
		assert_eq!(store.len(), 2);

		assert_eq!(store.get(&1).map(String::as_str), Some("uno"));
		if let Some(value) = store.get_mut(&2) {
			value.push('!');
		}
		assert_eq!(store.get(&2).map(String::as_str), Some("two!"));
		assert!(store.contains_key(&2));
		assert!(!store.contains_key(&3));

		assert_eq!(store.remove_entry(&1), Some((1, "uno".to_string())));
		assert!(store.remove_entry(&1).is_none());

		let mut drained = Vec::new();
		store.drain_with(|key, value| drained.push((key, value)));
		assert_eq!(drained, vec![(2, "two!".to_string())]);
		assert!(store.is_empty());
	}

	#[test]
	fn test_hashbrown_store() {
		exercise::<DefaultStore<u32, String>>();
	}

	#[test]
	fn test_std_hash_map_store() {
		exercise::<StdHashMap<u32, String>>();
	}

	#[test]
	fn test_btree_store() {
		exercise::<BTreeMap<u32, String>>();
	}
}
