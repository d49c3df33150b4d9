use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::CacheError;
use crate::fifo::FifoPolicy;
use crate::lifo::LifoPolicy;
use crate::lru::LruPolicy;
use crate::no_policy::NoPolicy;

/// Eviction policy contract.
///
/// A policy tracks the set of keys admitted to a cache and decides which one
/// should leave next. It never sees values and never touches storage; the
/// [`Cache`](crate::Cache) drives it under its lock and keeps both in sync.
///
/// The cache only calls `touch` and `erase` for tracked keys and only asks for
/// a replacement candidate when it is full, so implementations may treat
/// violations of those preconditions as bugs.
///
/// # Example
///
/// ```
/// use policy_cache::{CachePolicy, LruPolicy};
///
/// let mut policy = LruPolicy::new();
/// policy.insert("a");
/// policy.insert("b");
/// policy.touch(&"a");
///
/// assert_eq!(policy.replacement_candidate(), Some(&"b"));
/// ```
pub trait CachePolicy<K> {
	/// Start tracking a newly admitted key.
	fn insert(&mut self, key: K);

	/// Record an access (read or value update) of a tracked key.
	///
	/// Must not change the number of tracked keys.
	fn touch(&mut self, key: &K);

	/// Stop tracking the named key.
	fn erase(&mut self, key: &K);

	/// The key that should be evicted next, or `None` if nothing is tracked.
	fn replacement_candidate(&self) -> Option<&K>;

	/// Number of tracked keys.
	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Forget every tracked key.
	fn clear(&mut self);
}

impl<K, P> CachePolicy<K> for Box<P>
where
	P: CachePolicy<K> + ?Sized,
{
	fn insert(&mut self, key: K) {
		(**self).insert(key)
	}

	fn touch(&mut self, key: &K) {
		(**self).touch(key)
	}

	fn erase(&mut self, key: &K) {
		(**self).erase(key)
	}

	fn replacement_candidate(&self) -> Option<&K> {
		(**self).replacement_candidate()
	}

	fn len(&self) -> usize {
		(**self).len()
	}

	fn clear(&mut self) {
		(**self).clear()
	}
}

/// Runtime selector for the built-in eviction policies.
///
/// Use this when the strategy comes from configuration rather than from a
/// type parameter. Parses from `"none"`, `"fifo"`, `"lifo"` and `"lru"`
/// (case-insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolicyKind {
	/// No ordering; evicts an arbitrary key.
	#[default]
	Unordered,
	/// Oldest inserted key is evicted first.
	Fifo,
	/// Newest inserted key is evicted first.
	Lifo,
	/// Least recently used key is evicted first.
	Lru,
}

impl PolicyKind {
	/// Instantiate the selected policy behind a trait object.
	pub fn build<K>(self) -> Box<dyn CachePolicy<K> + Send>
	where
		K: Hash + Eq + Clone + Send + 'static,
	{
		match self {
			PolicyKind::Unordered => Box::new(NoPolicy::new()),
			PolicyKind::Fifo => Box::new(FifoPolicy::new()),
			PolicyKind::Lifo => Box::new(LifoPolicy::new()),
			PolicyKind::Lru => Box::new(LruPolicy::new()),
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			PolicyKind::Unordered => "none",
			PolicyKind::Fifo => "fifo",
			PolicyKind::Lifo => "lifo",
			PolicyKind::Lru => "lru",
		}
	}
}

impl fmt::Display for PolicyKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for PolicyKind {
	type Err = CacheError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"none" | "unordered" => Ok(PolicyKind::Unordered),
			"fifo" => Ok(PolicyKind::Fifo),
			"lifo" => Ok(PolicyKind::Lifo),
			"lru" => Ok(PolicyKind::Lru),
			_ => Err(CacheError::UnknownPolicy(s.to_string())),
		}
	}
}
