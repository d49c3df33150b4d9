//! Cache performance metrics.

/// Snapshot of cache counters.
///
/// Counters are updated under the cache lock, so a snapshot is always
/// consistent with the entry count taken alongside it.
///
/// # Example
///
/// ```
/// use policy_cache::LruCache;
///
/// let cache = LruCache::new(2).unwrap();
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.put("c", 3);
/// let _ = cache.try_get(&"c");
/// let _ = cache.try_get(&"a");
///
/// let metrics = cache.metrics();
/// assert_eq!(metrics.evictions, 1);
/// assert_eq!(metrics.hit_rate(), 0.5);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheMetrics {
	/// Lookups that found their key.
	pub hits: u64,
	/// Lookups that did not find their key.
	pub misses: u64,
	/// New entries admitted by `put`.
	pub inserts: u64,
	/// `put` calls that replaced an existing value.
	pub updates: u64,
	/// Entries evicted to make room for a new key.
	pub evictions: u64,
	/// Entries removed via `remove`.
	pub removals: u64,
	/// Entries currently stored.
	pub entry_count: usize,
	/// Maximum number of entries.
	pub capacity: usize,
}

impl CacheMetrics {
	/// Hit ratio in `0.0..=1.0`; 0.0 when there were no lookups.
	pub fn hit_rate(&self) -> f64 {
		let total = self.total_accesses();
		if total == 0 {
			0.0
		} else {
			self.hits as f64 / total as f64
		}
	}

	/// Fill ratio in `0.0..=1.0`.
	pub fn utilization(&self) -> f64 {
		if self.capacity == 0 {
			0.0
		} else {
			self.entry_count as f64 / self.capacity as f64
		}
	}

	pub fn total_accesses(&self) -> u64 {
		self.hits + self.misses
	}

	pub fn total_writes(&self) -> u64 {
		self.inserts + self.updates
	}
}

/// Running counters kept inside the cache state.
#[derive(Debug, Default)]
pub(crate) struct Counters {
	pub hits: u64,
	pub misses: u64,
	pub inserts: u64,
	pub updates: u64,
	pub evictions: u64,
	pub removals: u64,
}

impl Counters {
	pub fn snapshot(&self, entry_count: usize, capacity: usize) -> CacheMetrics {
		CacheMetrics {
			hits: self.hits,
			misses: self.misses,
			inserts: self.inserts,
			updates: self.updates,
			evictions: self.evictions,
			removals: self.removals,
			entry_count,
			capacity,
		}
	}
}
