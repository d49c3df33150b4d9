//! # Policy Cache
//!
//! A fixed-capacity, thread-safe, in-process key/value cache with:
//! - **Entry-count capacity** fixed at construction
//! - **Pluggable eviction** (no-op, FIFO, LIFO, LRU) chosen as a type parameter or at runtime
//! - **Pluggable storage** (`hashbrown`, `std` `HashMap` or `BTreeMap`)
//! - **Erase notifications** for every entry that leaves the cache
//! - **Atomic operations** under a single lock
//!
//! ## Quick Start
//!
//! ```rust
//! use policy_cache::{CacheError, LruCache};
//!
//! let cache = LruCache::new(3).unwrap();
//!
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.put("c", 3);
//!
//! // Reading "a" makes it the most recently used entry
//! assert_eq!(cache.get(&"a"), Ok(1));
//!
//! // "b" is now the least recently used and makes room for "d"
//! cache.put("d", 4);
//! assert!(!cache.cached(&"b"));
//! assert_eq!(cache.get(&"b"), Err(CacheError::NotFound));
//! assert_eq!(cache.size(), 3);
//! ```
//!
//! ## Choosing a Policy
//!
//! Policies are ordinary types implementing [`CachePolicy`]. Pick one
//! statically through the type aliases ([`FifoCache`], [`LifoCache`],
//! [`LruCache`]) or `Cache<K, V, P>`, or at runtime through [`PolicyKind`]:
//!
//! ```rust
//! use policy_cache::{CacheBuilder, PolicyKind};
//!
//! let kind: PolicyKind = "lifo".parse().unwrap();
//! let cache = CacheBuilder::new(2).policy_kind(kind).build().unwrap();
//!
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.put(3, "three"); // evicts 2, the newest entry
//!
//! assert!(cache.cached(&1));
//! assert!(!cache.cached(&2));
//! ```
//!
//! ## Async Usage
//!
//! Every method is synchronous and releases the lock before returning, so
//! values obtained from [`Cache::get`] or [`Cache::try_get`] can be held
//! across `.await` points:
//!
//! ```rust,ignore
//! async fn render(cache: Arc<LruCache<UserId, Profile>>, id: UserId) {
//!     if let Some(profile) = cache.try_get(&id) {
//!         send(&profile).await;
//!     }
//! }
//! ```
//!
//! ## Thread Safety
//!
//! The cache is `Send + Sync` when its keys, values and policy are `Send`,
//! and can be shared across threads via `Arc`:
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//!
//! use policy_cache::FifoCache;
//!
//! let cache = Arc::new(FifoCache::new(8).unwrap());
//!
//! let handles: Vec<_> = (0..4u64)
//!     .map(|i| {
//!         let cache = cache.clone();
//!         thread::spawn(move || cache.put(i, i * 10))
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(cache.size(), 4);
//! ```

mod builder;
mod cache;
mod error;
mod fifo;
mod lifo;
mod list;
mod lru;
#[cfg(feature = "metrics")]
mod metrics;
mod no_policy;
mod store;
mod traits;

pub use builder::CacheBuilder;
pub use cache::{Cache, EraseCallback, FifoCache, LifoCache, LruCache};
pub use error::CacheError;
pub use fifo::FifoPolicy;
pub use lifo::LifoPolicy;
pub use lru::LruPolicy;
#[cfg(feature = "metrics")]
pub use metrics::CacheMetrics;
pub use no_policy::NoPolicy;
pub use store::{DefaultStore, Store};
pub use traits::{CachePolicy, PolicyKind};
