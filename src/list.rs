use std::hash::Hash;

use ahash::RandomState;
use hashbrown::HashMap;

/// Null link.
const NIL: usize = usize::MAX;

struct Node<K> {
	key: K,
	prev: usize,
	next: usize,
}

/// Doubly linked list of keys stored in a slot arena, with a key → slot index.
///
/// The head is the newest end, the tail the oldest. Every operation is O(1);
/// slots freed by removal are recycled before the arena grows.
pub(crate) struct KeyList<K> {
	index: HashMap<K, usize, RandomState>,
	nodes: Vec<Option<Node<K>>>,
	free: Vec<usize>,
	head: usize,
	tail: usize,
}

impl<K: Hash + Eq + Clone> KeyList<K> {
	pub fn new() -> Self {
		Self {
			index: HashMap::with_hasher(RandomState::new()),
			nodes: Vec::new(),
			free: Vec::new(),
			head: NIL,
			tail: NIL,
		}
	}

	pub fn len(&self) -> usize {
		self.index.len()
	}

	#[cfg(test)]
	pub fn contains(&self, key: &K) -> bool {
		self.index.contains_key(key)
	}

	/// Link a new key at the head.
	pub fn push_front(&mut self, key: K) {
		debug_assert!(!self.index.contains_key(&key), "key is already linked");

		let node = Node {
			key: key.clone(),
			prev: NIL,
			next: self.head,
		};
		let slot = match self.free.pop() {
			Some(slot) => {
				self.nodes[slot] = Some(node);
				slot
			}
			None => {
				self.nodes.push(Some(node));
				self.nodes.len() - 1
			}
		};

		if self.head != NIL {
			self.node_mut(self.head).prev = slot;
		} else {
			self.tail = slot;
		}
		self.head = slot;
		self.index.insert(key, slot);
	}

	/// Unlink `key` from wherever it sits.
	///
	/// Returns false if the key is not linked.
	pub fn remove(&mut self, key: &K) -> bool {
		let Some(slot) = self.index.remove(key) else {
			return false;
		};
		self.unlink(slot);
		self.nodes[slot] = None;
		self.free.push(slot);
		true
	}

	/// Relink `key` at the head.
	///
	/// Returns false if the key is not linked.
	pub fn move_to_front(&mut self, key: &K) -> bool {
		let Some(&slot) = self.index.get(key) else {
			return false;
		};
		if slot == self.head {
			return true;
		}

		self.unlink(slot);
		let old_head = self.head;
		{
			let node = self.node_mut(slot);
			node.prev = NIL;
			node.next = old_head;
		}
		if old_head != NIL {
			self.node_mut(old_head).prev = slot;
		} else {
			self.tail = slot;
		}
		self.head = slot;
		true
	}

	/// Newest key.
	pub fn front(&self) -> Option<&K> {
		(self.head != NIL).then(|| &self.node(self.head).key)
	}

	/// Oldest key.
	pub fn back(&self) -> Option<&K> {
		(self.tail != NIL).then(|| &self.node(self.tail).key)
	}

	pub fn clear(&mut self) {
		self.index.clear();
		self.nodes.clear();
		self.free.clear();
		self.head = NIL;
		self.tail = NIL;
	}

	/// Keys from head to tail.
	#[cfg(test)]
	pub fn to_vec(&self) -> Vec<K> {
		let mut keys = Vec::with_capacity(self.len());
		let mut cursor = self.head;
		while cursor != NIL {
			let node = self.node(cursor);
			keys.push(node.key.clone());
			cursor = node.next;
		}
		keys
	}

	fn unlink(&mut self, slot: usize) {
		let (prev, next) = {
			let node = self.node(slot);
			(node.prev, node.next)
		};
		if prev != NIL {
			self.node_mut(prev).next = next;
		} else {
			self.head = next;
		}
		if next != NIL {
			self.node_mut(next).prev = prev;
		} else {
			self.tail = prev;
		}
	}

	fn node(&self, slot: usize) -> &Node<K> {
		self.nodes[slot].as_ref().expect("linked slot must be occupied")
	}

	fn node_mut(&mut self, slot: usize) -> &mut Node<K> {
		self.nodes[slot].as_mut().expect("linked slot must be occupied")
	}
}
