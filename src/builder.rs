use std::hash::Hash;
use std::marker::PhantomData;

use crate::cache::{Cache, EraseCallback};
use crate::error::CacheError;
use crate::no_policy::NoPolicy;
use crate::store::{DefaultStore, Store};
use crate::traits::{CachePolicy, PolicyKind};

/// Builder for configuring a Cache.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use policy_cache::{CacheBuilder, LruPolicy};
///
/// let cache = CacheBuilder::new(128)
///     .policy(LruPolicy::new())
///     .store::<BTreeMap<u64, String>>()
///     .on_erase(|key: &u64, value: &String| println!("dropped {key} => {value}"))
///     .build()
///     .unwrap();
///
/// cache.put(1, "one".to_string());
/// assert_eq!(cache.capacity(), 128);
/// ```
pub struct CacheBuilder<K, V, P = NoPolicy<K>, M = DefaultStore<K, V>> {
	capacity: usize,
	policy: P,
	on_erase: Option<EraseCallback<K, V>>,
	store: PhantomData<fn() -> M>,
}

impl<K: Hash + Eq + Clone, V> CacheBuilder<K, V> {
	/// Create a new builder for a cache holding at most `capacity` entries.
	///
	/// Defaults to [`NoPolicy`], `hashbrown` storage and no erase callback.
	pub fn new(capacity: usize) -> Self {
		Self {
			capacity,
			policy: NoPolicy::new(),
			on_erase: None,
			store: PhantomData,
		}
	}
}

impl<K, V, P, M> CacheBuilder<K, V, P, M> {
	/// Use the given policy instance.
	pub fn policy<Q>(self, policy: Q) -> CacheBuilder<K, V, Q, M>
	where
		Q: CachePolicy<K>,
	{
		CacheBuilder {
			capacity: self.capacity,
			policy,
			on_erase: self.on_erase,
			store: PhantomData,
		}
	}

	/// Use a built-in policy chosen at runtime.
	pub fn policy_kind(self, kind: PolicyKind) -> CacheBuilder<K, V, Box<dyn CachePolicy<K> + Send>, M>
	where
		K: Hash + Eq + Clone + Send + 'static,
	{
		self.policy(kind.build())
	}

	/// Use a different storage map.
	pub fn store<S>(self) -> CacheBuilder<K, V, P, S>
	where
		S: Store<K, V>,
	{
		CacheBuilder {
			capacity: self.capacity,
			policy: self.policy,
			on_erase: self.on_erase,
			store: PhantomData,
		}
	}

	/// Set the callback fired with every entry that leaves the cache.
	pub fn on_erase<F>(mut self, on_erase: F) -> Self
	where
		F: Fn(&K, &V) + Send + Sync + 'static,
	{
		self.on_erase = Some(Box::new(on_erase));
		self
	}

	/// Build the cache with the configured settings.
	///
	/// Fails with [`CacheError::InvalidCapacity`] if the capacity is zero.
	pub fn build(self) -> Result<Cache<K, V, P, M>, CacheError>
	where
		K: Clone,
		P: CachePolicy<K>,
		M: Store<K, V>,
	{
		Cache::from_parts(self.capacity, self.policy, self.on_erase)
	}
}
