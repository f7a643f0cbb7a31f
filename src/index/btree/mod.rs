//! B-tree engine: insert with split propagation, search, traversal.
//!
//! The engine is the only writer of node blocks and the only component
//! that maintains the tree invariants: strictly ascending keys within
//! every node, k+1 children for an internal node with k keys, and
//! parent back-references that match the child arrays.
//!
//! The tree has exactly two shapes as far as the engine is concerned:
//! empty (header root id 0) and non-empty. Nodes are never deleted and
//! blocks are never reclaimed; there is no delete operation.

use std::fmt::Write as _;
use std::path::Path;

use tracing::{debug, trace};

use crate::common::config::{MAX_CHILDREN, MAX_KEYS};
use crate::common::{BlockId, Error, Result};
use crate::storage::{IndexFile, Node};

/// A disk-resident B-tree over one [`IndexFile`].
pub struct BTree {
    store: IndexFile,
}

impl BTree {
    /// Wrap an already-open store.
    pub fn new(store: IndexFile) -> Self {
        Self { store }
    }

    /// Create a new index file holding an empty tree.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(IndexFile::create(path)?))
    }

    /// Create a new index file, truncating any existing file.
    pub fn create_overwrite<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(IndexFile::create_overwrite(path)?))
    }

    /// Open an existing index file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(IndexFile::open(path)?))
    }

    /// Persist the header and release the file.
    pub fn close(self) -> Result<()> {
        self.store.close()
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.store.root_id().is_none()
    }

    /// Insert a key/value pair.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateKey`] if the key is already present;
    /// in that case no block is written and the file is untouched.
    pub fn insert(&mut self, key: u64, value: u64) -> Result<()> {
        let root_id = self.store.root_id();
        if root_id.is_none() {
            let id = self.store.allocate_block_id();
            let mut root = Node::new(id, BlockId::NONE);
            root.insert_pair(0, key, value);
            self.store.write_node(&root)?;
            self.store.set_root_id(id);
            debug!(key, value, block = id.0, "created root node");
            return Ok(());
        }

        // Descend to the leaf that should receive the key, rejecting
        // duplicates along the way. No block is written until the
        // whole path is known to be duplicate-free.
        let mut node = self.store.read_node(root_id)?;
        loop {
            if node.get(key).is_some() {
                return Err(Error::DuplicateKey(key));
            }
            if node.is_leaf() {
                break;
            }
            let child = node.children[node.slot_for(key)];
            node = self.store.read_node(child)?;
        }

        self.insert_ascending(node, key, value, BlockId::NONE)
    }

    /// Look up the value for `key`, or `None` if the key was never
    /// inserted.
    pub fn search(&mut self, key: u64) -> Result<Option<u64>> {
        let mut current = self.store.root_id();
        while current.is_some() {
            let node = self.store.read_node(current)?;
            if let Some(value) = node.get(key) {
                return Ok(Some(value));
            }
            current = node.children[node.slot_for(key)];
        }
        Ok(None)
    }

    /// Pre-order walk over every node: each node is visited (with its
    /// depth) before its children, left to right.
    ///
    /// Pre-order does not yield globally sorted keys; dump and extract
    /// both depend on this exact order, so it must not be changed to an
    /// in-order walk without a format decision.
    pub fn for_each_node<F>(&mut self, mut visit: F) -> Result<()>
    where
        F: FnMut(&Node, usize),
    {
        let root = self.store.root_id();
        if root.is_none() {
            return Ok(());
        }

        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = self.store.read_node(id)?;
            visit(&node, depth);
            // Reverse push so the leftmost child pops first.
            for &child in node.children[..=node.num_keys].iter().rev() {
                if child.is_some() {
                    stack.push((child, depth + 1));
                }
            }
        }
        Ok(())
    }

    /// Human-readable listing of every node, indented by tree level.
    pub fn dump(&mut self) -> Result<String> {
        if self.is_empty() {
            return Ok("(empty tree)\n".to_string());
        }

        let mut out = String::new();
        self.for_each_node(|node, depth| {
            let _ = writeln!(
                out,
                "{:indent$}Node {}: keys = {:?}, values = {:?}",
                "",
                node.block_id.0,
                node.keys(),
                node.values(),
                indent = depth * 2
            );
        })?;
        Ok(out)
    }

    /// Insert a pair into `node`, splitting and propagating upward
    /// until an ancestor has room or a new root is created.
    ///
    /// An explicit loop rather than recursion: a cascade climbs one
    /// parent link per iteration, so tree depth never costs stack.
    /// `carry` is the right sibling produced by the split one level
    /// down (`NONE` at the leaf level); it is registered in the child
    /// array immediately after the promoted key's slot.
    fn insert_ascending(
        &mut self,
        mut node: Node,
        mut key: u64,
        mut value: u64,
        mut carry: BlockId,
    ) -> Result<()> {
        loop {
            if !node.is_full() {
                let slot = node.slot_for(key);
                node.insert_pair(slot, key, value);
                if carry.is_some() {
                    node.insert_child(slot + 1, carry);
                }
                self.store.write_node(&node)?;
                trace!(key, block = node.block_id.0, "inserted into node");
                return Ok(());
            }

            let (mid_key, mid_value, right_id) = self.split(&mut node, key, value, carry)?;

            if node.parent_id.is_none() {
                // The split node was the root: grow the tree by one level.
                let root_id = self.store.allocate_block_id();
                let mut root = Node::new(root_id, BlockId::NONE);
                root.insert_pair(0, mid_key, mid_value);
                root.children[0] = node.block_id;
                root.children[1] = right_id;

                node.parent_id = root_id;
                self.store.write_node(&node)?;
                let mut right = self.store.read_node(right_id)?;
                right.parent_id = root_id;
                self.store.write_node(&right)?;
                self.store.write_node(&root)?;
                self.store.set_root_id(root_id);
                debug!(promoted = mid_key, root = root_id.0, "created new root");
                return Ok(());
            }

            let parent = self.store.read_node(node.parent_id)?;
            node = parent;
            key = mid_key;
            value = mid_value;
            carry = right_id;
        }
    }

    /// Split a full node that is receiving one more pair.
    ///
    /// The 19 resident pairs and the incoming one are merged in order;
    /// the left 10 stay in place, pair 10 (the 11th smallest) is
    /// promoted, and the right 9 move to a freshly allocated sibling.
    /// For internal nodes the 21 merged child pointers split 11/10
    /// around the promotion, and every child that moved right gets its
    /// parent back-reference rewritten.
    ///
    /// Returns the promoted pair and the new sibling's block id.
    fn split(
        &mut self,
        node: &mut Node,
        key: u64,
        value: u64,
        carry: BlockId,
    ) -> Result<(u64, u64, BlockId)> {
        debug_assert!(node.is_full());

        let slot = node.slot_for(key);

        // Merged arrays: 20 pairs, 21 children. The carried child (the
        // sibling from the split one level down) rides just after the
        // incoming key, matching the non-split splice rule.
        let mut keys = [0u64; MAX_KEYS + 1];
        let mut values = [0u64; MAX_KEYS + 1];
        let mut children = [BlockId::NONE; MAX_CHILDREN + 1];

        keys[..slot].copy_from_slice(&node.keys[..slot]);
        keys[slot] = key;
        keys[slot + 1..].copy_from_slice(&node.keys[slot..]);

        values[..slot].copy_from_slice(&node.values[..slot]);
        values[slot] = value;
        values[slot + 1..].copy_from_slice(&node.values[slot..]);

        children[..=slot].copy_from_slice(&node.children[..=slot]);
        children[slot + 1] = carry;
        children[slot + 2..].copy_from_slice(&node.children[slot + 1..]);

        let mid = (MAX_KEYS + 1) / 2;

        let right_id = self.store.allocate_block_id();
        let mut right = Node::new(right_id, node.parent_id);
        let right_len = MAX_KEYS - mid;
        right.keys[..right_len].copy_from_slice(&keys[mid + 1..]);
        right.values[..right_len].copy_from_slice(&values[mid + 1..]);
        right.num_keys = right_len;
        right.children[..MAX_CHILDREN - mid].copy_from_slice(&children[mid + 1..]);

        node.keys = [0; MAX_KEYS];
        node.values = [0; MAX_KEYS];
        node.children = [BlockId::NONE; MAX_CHILDREN];
        node.keys[..mid].copy_from_slice(&keys[..mid]);
        node.values[..mid].copy_from_slice(&values[..mid]);
        node.num_keys = mid;
        node.children[..=mid].copy_from_slice(&children[..=mid]);

        // Children that moved to the sibling now answer to it.
        for i in 0..MAX_CHILDREN - mid {
            let child_id = right.children[i];
            if child_id.is_some() {
                let mut child = self.store.read_node(child_id)?;
                child.parent_id = right_id;
                self.store.write_node(&child)?;
            }
        }

        self.store.write_node(node)?;
        self.store.write_node(&right)?;
        debug!(
            block = node.block_id.0,
            sibling = right_id.0,
            promoted = keys[mid],
            "split node"
        );

        Ok((keys[mid], values[mid], right_id))
    }
}
