use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::error::CacheError;
use crate::fifo::FifoPolicy;
use crate::lifo::LifoPolicy;
use crate::lru::LruPolicy;
#[cfg(feature = "metrics")]
use crate::metrics::{CacheMetrics, Counters};
use crate::no_policy::NoPolicy;
use crate::store::{DefaultStore, Store};
use crate::traits::CachePolicy;

/// Callback fired with every entry that leaves the cache.
pub type EraseCallback<K, V> = Box<dyn Fn(&K, &V) + Send + Sync>;

/// Cache evicting the oldest inserted key first.
pub type FifoCache<K, V> = Cache<K, V, FifoPolicy<K>>;

/// Cache evicting the newest inserted key first.
pub type LifoCache<K, V> = Cache<K, V, LifoPolicy<K>>;

/// Cache evicting the least recently used key first.
pub type LruCache<K, V> = Cache<K, V, LruPolicy<K>>;

/// Fixed-capacity, thread-safe cache with a pluggable eviction policy.
///
/// Capacity counts entries. When a `put` of a new key would exceed it, the
/// policy's replacement candidate is evicted first. Storage (`M`) and policy
/// (`P`) live behind a single mutex that every operation holds for its whole
/// duration, so each call is atomic with respect to every other call. Reads
/// take the same lock because they update the policy (see [`LruPolicy`]).
///
/// Share across threads with `Arc<Cache<..>>`.
///
/// # Erase callback
///
/// A callback installed through [`CacheBuilder::on_erase`](crate::CacheBuilder::on_erase)
/// runs once for every entry that leaves the cache: evictions, `remove`,
/// `clear` and drop. It runs synchronously while the cache lock is held and
/// must not call back into the same cache.
pub struct Cache<K, V, P = NoPolicy<K>, M = DefaultStore<K, V>>
where
	P: CachePolicy<K>,
	M: Store<K, V>,
{
	state: Mutex<State<K, V, P, M>>,
	capacity: usize,
	on_erase: Option<EraseCallback<K, V>>,
}

/// Everything guarded by the cache lock.
struct State<K, V, P, M> {
	entries: M,
	policy: P,
	#[cfg(feature = "metrics")]
	counters: Counters,
	marker: PhantomData<(K, V)>,
}

impl<K, V, P> Cache<K, V, P>
where
	K: Hash + Eq + Clone,
	P: CachePolicy<K> + Default,
{
	/// Create a cache holding at most `capacity` entries, with a default
	/// policy instance and no erase callback.
	///
	/// Fails with [`CacheError::InvalidCapacity`] if `capacity` is zero.
	pub fn new(capacity: usize) -> Result<Self, CacheError> {
		Self::with_policy(capacity, P::default())
	}
}

impl<K, V, P> Cache<K, V, P>
where
	K: Hash + Eq + Clone,
	P: CachePolicy<K>,
{
	/// Create a cache driven by the given policy instance.
	pub fn with_policy(capacity: usize, policy: P) -> Result<Self, CacheError> {
		Self::from_parts(capacity, policy, None)
	}
}

impl<K, V, P, M> Cache<K, V, P, M>
where
	K: Clone,
	P: CachePolicy<K>,
	M: Store<K, V>,
{
	pub(crate) fn from_parts(
		capacity: usize,
		mut policy: P,
		on_erase: Option<EraseCallback<K, V>>,
	) -> Result<Self, CacheError> {
		if capacity == 0 {
			warn!("rejected cache construction with zero capacity");
			return Err(CacheError::InvalidCapacity);
		}

		// Storage starts empty, so the policy must not track anything yet.
		policy.clear();

		Ok(Self {
			state: Mutex::new(State {
				entries: M::with_capacity(capacity),
				policy,
				#[cfg(feature = "metrics")]
				counters: Counters::default(),
				marker: PhantomData,
			}),
			capacity,
			on_erase,
		})
	}

	/// Insert or update an entry.
	///
	/// Updating an existing key replaces its value and counts as an access;
	/// it never evicts. Inserting a new key into a full cache first evicts the
	/// policy's replacement candidate.
	pub fn put(&self, key: K, value: V) {
		let mut guard = self.state.lock();
		let state = &mut *guard;

		if let Some(slot) = state.entries.get_mut(&key) {
			*slot = value;
			state.policy.touch(&key);
			#[cfg(feature = "metrics")]
			{
				state.counters.updates += 1;
			}
			trace!("updated cached entry");
			return;
		}

		if state.entries.len() >= self.capacity {
			self.evict_one(state);
		}

		state.policy.insert(key.clone());
		state.entries.insert(key, value);
		#[cfg(feature = "metrics")]
		{
			state.counters.inserts += 1;
		}
		trace!(size = state.entries.len(), "inserted cache entry");
	}

	/// Run `f` on the cached value for `key`.
	///
	/// A hit counts as an access. Returns `None` on a miss. `f` runs under the
	/// cache lock.
	pub fn get_with<R, F>(&self, key: &K, f: F) -> Option<R>
	where
		F: FnOnce(&V) -> R,
	{
		let mut guard = self.state.lock();
		let state = &mut *guard;

		match state.entries.get(key) {
			Some(value) => {
				state.policy.touch(key);
				#[cfg(feature = "metrics")]
				{
					state.counters.hits += 1;
				}
				Some(f(value))
			}
			None => {
				#[cfg(feature = "metrics")]
				{
					state.counters.misses += 1;
				}
				None
			}
		}
	}

	/// Clone of the cached value, or `None` if the key is absent.
	///
	/// A hit counts as an access.
	pub fn try_get(&self, key: &K) -> Option<V>
	where
		V: Clone,
	{
		self.get_with(key, V::clone)
	}

	/// Clone of the cached value.
	///
	/// Fails with [`CacheError::NotFound`] if the key is absent.
	pub fn get(&self, key: &K) -> Result<V, CacheError>
	where
		V: Clone,
	{
		self.try_get(key).ok_or(CacheError::NotFound)
	}

	/// Check whether `key` is cached without counting an access.
	pub fn cached(&self, key: &K) -> bool {
		self.state.lock().entries.contains_key(key)
	}

	/// Number of cached entries.
	pub fn size(&self) -> usize {
		self.state.lock().entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.size() == 0
	}

	/// Maximum number of entries.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Remove an entry.
	///
	/// Returns false, without side effects, if the key is absent.
	pub fn remove(&self, key: &K) -> bool {
		let mut guard = self.state.lock();
		let state = &mut *guard;

		let Some((key, value)) = state.entries.remove_entry(key) else {
			return false;
		};
		state.policy.erase(&key);
		#[cfg(feature = "metrics")]
		{
			state.counters.removals += 1;
		}
		self.notify(&key, &value);
		trace!(size = state.entries.len(), "removed cache entry");
		true
	}

	/// Remove every entry, firing the erase callback for each.
	pub fn clear(&self) {
		let mut guard = self.state.lock();
		clear_state(&mut guard, self.on_erase.as_ref());
	}

	/// Snapshot of the cache counters.
	#[cfg(feature = "metrics")]
	pub fn metrics(&self) -> CacheMetrics {
		let state = self.state.lock();
		state.counters.snapshot(state.entries.len(), self.capacity)
	}

	/// Evict the policy's replacement candidate from policy and storage.
	fn evict_one(&self, state: &mut State<K, V, P, M>) {
		let victim = state
			.policy
			.replacement_candidate()
			.cloned()
			.expect("eviction policy must track every cached key");
		state.policy.erase(&victim);

		let (key, value) = state
			.entries
			.remove_entry(&victim)
			.expect("replacement candidate must be cached");
		#[cfg(feature = "metrics")]
		{
			state.counters.evictions += 1;
		}
		self.notify(&key, &value);
		debug!(capacity = self.capacity, "evicted replacement candidate");
	}

	fn notify(&self, key: &K, value: &V) {
		if let Some(on_erase) = &self.on_erase {
			on_erase(key, value);
		}
	}
}

fn clear_state<K, V, P, M>(state: &mut State<K, V, P, M>, on_erase: Option<&EraseCallback<K, V>>)
where
	P: CachePolicy<K>,
	M: Store<K, V>,
{
	let cleared = state.entries.len();
	state.policy.clear();
	state.entries.drain_with(|key, value| {
		if let Some(on_erase) = on_erase {
			on_erase(&key, &value);
		}
	});
	trace!(cleared, "cleared cache");
}

impl<K, V, P, M> Drop for Cache<K, V, P, M>
where
	P: CachePolicy<K>,
	M: Store<K, V>,
{
	fn drop(&mut self) {
		clear_state(self.state.get_mut(), self.on_erase.as_ref());
	}
}

impl<K, V, P, M> fmt::Debug for Cache<K, V, P, M>
where
	P: CachePolicy<K>,
	M: Store<K, V>,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut debug = f.debug_struct("Cache");
		debug.field("capacity", &self.capacity);
		match self.state.try_lock() {
			Some(state) => debug.field("size", &state.entries.len()),
			None => debug.field("size", &format_args!("<locked>")),
		};
		debug.finish()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::thread;

	use super::*;
	use crate::builder::CacheBuilder;

	type Log = Arc<Mutex<Vec<(u64, String)>>>;

	fn logged_cache<P: CachePolicy<u64>>(capacity: usize, policy: P) -> (Cache<u64, String, P>, Log) {
		let log: Log = Arc::default();
		let sink = log.clone();
		let cache = CacheBuilder::new(capacity)
			.policy(policy)
			.on_erase(move |key: &u64, value: &String| sink.lock().push((*key, value.clone())))
			.build()
			.unwrap();
		(cache, log)
	}

	#[test]
	fn test_cache_put_and_get() {
		let cache: Cache<u64, String> = Cache::new(4).unwrap();

		cache.put(1, "one".to_string());

		assert_eq!(cache.get(&1).unwrap(), "one");
		assert_eq!(cache.try_get(&1).as_deref(), Some("one"));
		assert!(cache.cached(&1));
		assert_eq!(cache.size(), 1);
	}

	#[test]
	fn test_cache_zero_capacity() {
		let result: Result<Cache<u64, String>, _> = Cache::new(0);
		assert_eq!(result.unwrap_err(), CacheError::InvalidCapacity);
	}

	#[test]
	fn test_cache_miss() {
		let cache: LruCache<u64, String> = LruCache::new(2).unwrap();

		assert_eq!(cache.get(&7), Err(CacheError::NotFound));
		assert!(cache.try_get(&7).is_none());
		assert!(!cache.cached(&7));
		assert!(cache.get_with(&7, |value| value.len()).is_none());
	}

	#[test]
	fn test_cache_update_keeps_size_and_skips_callback() {
		let (cache, log) = logged_cache(2, FifoPolicy::new());

		cache.put(1, "one".to_string());
		cache.put(1, "uno".to_string());

		assert_eq!(cache.size(), 1);
		assert_eq!(cache.get(&1).unwrap(), "uno");
		assert!(log.lock().is_empty());
	}

	#[test]
	fn test_cache_eviction_fires_callback() {
		let (cache, log) = logged_cache(2, FifoPolicy::new());

		cache.put(1, "one".to_string());
		cache.put(2, "two".to_string());
		cache.put(3, "three".to_string());

		assert_eq!(cache.size(), 2);
		assert!(!cache.cached(&1));
		assert_eq!(*log.lock(), vec![(1, "one".to_string())]);
	}

	#[test]
	fn test_cache_remove() {
		let (cache, log) = logged_cache(4, LruPolicy::new());

		cache.put(1, "one".to_string());
		cache.put(2, "two".to_string());

		assert!(!cache.remove(&3));
		assert!(log.lock().is_empty());

		assert!(cache.remove(&1));
		assert_eq!(cache.size(), 1);
		assert!(!cache.cached(&1));
		assert_eq!(*log.lock(), vec![(1, "one".to_string())]);
	}

	#[test]
	fn test_cache_get_with_touches() {
		let cache: LruCache<u64, String> = LruCache::new(2).unwrap();

		cache.put(1, "one".to_string());
		cache.put(2, "two".to_string());
		assert_eq!(cache.get_with(&1, |value| value.len()), Some(3));
		cache.put(3, "three".to_string());

		assert!(cache.cached(&1));
		assert!(!cache.cached(&2));
	}

	#[test]
	fn test_cache_cached_does_not_touch() {
		let cache: LruCache<u64, String> = LruCache::new(2).unwrap();

		cache.put(1, "one".to_string());
		cache.put(2, "two".to_string());
		assert!(cache.cached(&1));
		cache.put(3, "three".to_string());

		assert!(!cache.cached(&1));
		assert!(cache.cached(&2));
	}

	#[test]
	fn test_cache_clear_and_drop_fire_callback() {
		let (cache, log) = logged_cache(4, NoPolicy::new());

		cache.put(1, "one".to_string());
		cache.put(2, "two".to_string());
		cache.clear();

		assert!(cache.is_empty());
		assert_eq!(log.lock().len(), 2);

		cache.put(3, "three".to_string());
		drop(cache);

		let mut keys: Vec<u64> = log.lock().iter().map(|(key, _)| *key).collect();
		keys.sort_unstable();
		assert_eq!(keys, vec![1, 2, 3]);
	}

	#[test]
	fn test_cache_refills_after_clear() {
		let cache: FifoCache<u64, String> = FifoCache::new(2).unwrap();

		cache.put(1, "one".to_string());
		cache.put(2, "two".to_string());
		cache.clear();
		cache.put(3, "three".to_string());
		cache.put(4, "four".to_string());
		cache.put(5, "five".to_string());

		assert!(!cache.cached(&3));
		assert!(cache.cached(&4));
		assert!(cache.cached(&5));
	}

	#[test]
	fn test_cache_concurrent_access() {
		let cache: Arc<LruCache<u64, String>> = Arc::new(LruCache::new(64).unwrap());
		let mut handles = vec![];

		for t in 0..4 {
			let cache = cache.clone();
			handles.push(thread::spawn(move || {
				for i in 0..100 {
					let key = t * 100 + i;
					let value = format!("value-{}", i);
					cache.put(key, value.clone());

					if let Some(retrieved) = cache.try_get(&key) {
						assert_eq!(retrieved, value);
					}
					assert!(cache.size() <= 64);
				}
			}));
		}

		for handle in handles {
			handle.join().unwrap();
		}

		assert_eq!(cache.size(), 64);
	}

	#[test]
	fn test_cache_is_send_sync() {
		fn assert_send<T: Send>() {}
		fn assert_sync<T: Sync>() {}

		assert_send::<LruCache<u64, String>>();
		assert_sync::<LruCache<u64, String>>();
		assert_sync::<Cache<u64, String, Box<dyn CachePolicy<u64> + Send>>>();
	}

	#[test]
	fn test_cache_debug() {
		let cache: FifoCache<u64, String> = FifoCache::new(3).unwrap();
		cache.put(1, "one".to_string());

		assert_eq!(format!("{:?}", cache), "Cache { capacity: 3, size: 1 }");
	}

	#[cfg(feature = "metrics")]
	#[test]
	fn test_cache_metrics() {
		let cache: FifoCache<u64, String> = FifoCache::new(2).unwrap();

		cache.put(1, "one".to_string());
		cache.put(2, "two".to_string());
		cache.put(2, "deux".to_string());
		cache.put(3, "three".to_string());
		let _ = cache.try_get(&1);
		let _ = cache.try_get(&2);
		cache.remove(&3);

		let metrics = cache.metrics();
		assert_eq!(metrics.inserts, 3);
		assert_eq!(metrics.updates, 1);
		assert_eq!(metrics.evictions, 1);
		assert_eq!(metrics.removals, 1);
		assert_eq!(metrics.hits, 1);
		assert_eq!(metrics.misses, 1);
		assert_eq!(metrics.entry_count, 1);
		assert_eq!(metrics.capacity, 2);
	}
}
