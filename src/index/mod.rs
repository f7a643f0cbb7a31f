//! Index structures.
//!
//! - [`btree`] - The disk-resident B-tree engine

pub mod btree;

pub use btree::BTree;
