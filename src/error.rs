use thiserror::Error;

/// Errors surfaced by the cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
	/// The cache was constructed with a capacity of zero.
	#[error("cache capacity must be non-zero")]
	InvalidCapacity,

	/// [`Cache::get`](crate::Cache::get) was called for a key that is not cached.
	#[error("no such element in the cache")]
	NotFound,

	/// A policy name did not match any built-in policy.
	#[error("unknown eviction policy: {0:?}")]
	UnknownPolicy(String),
}
