//! Node - the in-memory form of one B-tree block.
//!
//! A [`Node`] holds the decoded fields of a single block: identity,
//! parent back-reference, and the fixed-capacity key/value/child
//! arrays. The capacity bounds (19 keys, 20 children) are part of the
//! on-disk format, so the arrays are plain fixed-size arrays rather
//! than growable containers.

use crate::common::config::{MAX_CHILDREN, MAX_KEYS};
use crate::common::BlockId;

/// One B-tree node.
///
/// # Invariants (maintained by the engine, not checked on decode)
/// - `keys[0..num_keys)` is strictly ascending; slots past `num_keys`
///   are unused and zero.
/// - `values[i]` pairs with `keys[i]`.
/// - Leaf nodes have all-zero children. An internal node with k keys
///   has exactly k+1 non-zero children, where `children[i]` roots the
///   subtree of keys between `keys[i-1]` and `keys[i]`.
/// - `parent_id` is `BlockId::NONE` for the root, otherwise the block
///   holding this node as a child. It is a lookup back-reference, not
///   an owning one: the file's block slots own the nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// This node's own block id (stable for the node's lifetime).
    pub block_id: BlockId,
    /// Parent block id, or `BlockId::NONE` for the root.
    pub parent_id: BlockId,
    /// Count of populated key/value slots.
    pub num_keys: usize,
    /// Key slots; only `keys[0..num_keys)` are meaningful.
    pub keys: [u64; MAX_KEYS],
    /// Value slots, parallel to `keys`.
    pub values: [u64; MAX_KEYS],
    /// Child block ids; `BlockId::NONE` marks an absent child.
    pub children: [BlockId; MAX_CHILDREN],
}

impl Node {
    /// Create an empty node at the given block.
    pub fn new(block_id: BlockId, parent_id: BlockId) -> Self {
        Self {
            block_id,
            parent_id,
            num_keys: 0,
            keys: [0; MAX_KEYS],
            values: [0; MAX_KEYS],
            children: [BlockId::NONE; MAX_CHILDREN],
        }
    }

    /// The populated keys.
    #[inline]
    pub fn keys(&self) -> &[u64] {
        &self.keys[..self.num_keys]
    }

    /// The populated values.
    #[inline]
    pub fn values(&self) -> &[u64] {
        &self.values[..self.num_keys]
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(|c| c.is_none())
    }

    /// Whether every key slot is populated.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.num_keys == MAX_KEYS
    }

    /// Find the value paired with `key`, if the key is in this node.
    pub fn get(&self, key: u64) -> Option<u64> {
        self.keys()
            .iter()
            .position(|&k| k == key)
            .map(|i| self.values[i])
    }

    /// Slot at which `key` belongs to keep the keys ascending.
    ///
    /// Also the index of the child to descend into when routing: the
    /// smallest `i` with `key < keys[i]`, or `num_keys` if `key`
    /// exceeds every key.
    pub fn slot_for(&self, key: u64) -> usize {
        self.keys().iter().position(|&k| key < k).unwrap_or(self.num_keys)
    }

    /// Insert a key/value pair at `slot`, shifting later pairs right.
    ///
    /// The caller must have checked `!self.is_full()` and computed
    /// `slot` with [`slot_for`](Self::slot_for); `slot` out of order
    /// breaks the ascending invariant.
    pub fn insert_pair(&mut self, slot: usize, key: u64, value: u64) {
        debug_assert!(!self.is_full());
        debug_assert!(slot <= self.num_keys);

        for i in (slot..self.num_keys).rev() {
            self.keys[i + 1] = self.keys[i];
            self.values[i + 1] = self.values[i];
        }
        self.keys[slot] = key;
        self.values[slot] = value;
        self.num_keys += 1;
    }

    /// Splice a child pointer in at `slot`, shifting later children right.
    ///
    /// Used when a split registers the new right sibling in the parent:
    /// the sibling lands immediately after the original node's slot.
    /// The caller must have made room by inserting the promoted pair
    /// first, so at most `num_keys` children occupy slots below `slot`.
    pub fn insert_child(&mut self, slot: usize, child: BlockId) {
        debug_assert!(slot < MAX_CHILDREN);

        for i in (slot..MAX_CHILDREN - 1).rev() {
            self.children[i + 1] = self.children[i];
        }
        self.children[slot] = child;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_empty_leaf() {
        let node = Node::new(BlockId::new(1), BlockId::NONE);
        assert_eq!(node.num_keys, 0);
        assert!(node.is_leaf());
        assert!(!node.is_full());
        assert_eq!(node.keys(), &[] as &[u64]);
    }

    #[test]
    fn test_insert_pair_keeps_order() {
        let mut node = Node::new(BlockId::new(1), BlockId::NONE);
        for key in [20, 10, 30] {
            let slot = node.slot_for(key);
            node.insert_pair(slot, key, key * 10);
        }

        assert_eq!(node.keys(), &[10, 20, 30]);
        assert_eq!(node.values(), &[100, 200, 300]);
    }

    #[test]
    fn test_get() {
        let mut node = Node::new(BlockId::new(1), BlockId::NONE);
        node.insert_pair(0, 10, 100);
        node.insert_pair(1, 20, 200);

        assert_eq!(node.get(10), Some(100));
        assert_eq!(node.get(20), Some(200));
        assert_eq!(node.get(15), None);
    }

    #[test]
    fn test_slot_for_routing() {
        let mut node = Node::new(BlockId::new(1), BlockId::NONE);
        node.insert_pair(0, 10, 100);
        node.insert_pair(1, 30, 300);

        assert_eq!(node.slot_for(5), 0);
        assert_eq!(node.slot_for(20), 1);
        assert_eq!(node.slot_for(40), 2);
    }

    #[test]
    fn test_full_at_max_keys() {
        let mut node = Node::new(BlockId::new(1), BlockId::NONE);
        for i in 0..MAX_KEYS as u64 {
            node.insert_pair(i as usize, i + 1, i + 1);
        }
        assert!(node.is_full());
    }

    #[test]
    fn test_insert_child_shifts_right() {
        let mut node = Node::new(BlockId::new(1), BlockId::NONE);
        node.children[0] = BlockId::new(2);
        node.children[1] = BlockId::new(4);

        node.insert_child(1, BlockId::new(3));

        assert_eq!(node.children[0], BlockId::new(2));
        assert_eq!(node.children[1], BlockId::new(3));
        assert_eq!(node.children[2], BlockId::new(4));
    }

    #[test]
    fn test_is_leaf_with_children() {
        let mut node = Node::new(BlockId::new(1), BlockId::NONE);
        assert!(node.is_leaf());
        node.children[0] = BlockId::new(2);
        assert!(!node.is_leaf());
    }
}
