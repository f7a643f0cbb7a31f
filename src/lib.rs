//! blocktree - a single-file disk-resident B-tree index.
//!
//! An ordered u64-key-to-u64-value store persisted as fixed 512-byte
//! blocks in one file. Block 0 is the header (magic tag, root pointer,
//! next free block id); every other block holds one B-tree node of up
//! to 19 keys and 20 children.
//!
//! # Architecture
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                       blocktree                           │
//! ├───────────────────────────────────────────────────────────┤
//! │  ┌───────────────────────────────────────────────────┐    │
//! │  │        Command Layer (session / main)             │    │
//! │  │   create/open/close · insert · search ·           │    │
//! │  │   load/extract (records) · dump                   │    │
//! │  └───────────────────────────────────────────────────┘    │
//! │                          ↓                                │
//! │  ┌───────────────────────────────────────────────────┐    │
//! │  │           B-Tree Engine (index/btree)             │    │
//! │  │   descent · sorted insert · split · promotion     │    │
//! │  └───────────────────────────────────────────────────┘    │
//! │                          ↓                                │
//! │  ┌───────────────────────────────────────────────────┐    │
//! │  │           Storage Layer (storage/)                │    │
//! │  │   IndexFile + Header + Node codec + Block         │    │
//! │  └───────────────────────────────────────────────────┘    │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (BlockId, Error, config)
//! - [`storage`] - The on-disk block format and file I/O
//! - [`index`] - The B-tree engine
//! - [`records`] - Bulk load/extract over `key,value` line streams
//! - [`session`] - The operation surface for the command layer
//!
//! # Quick Start
//! ```no_run
//! use blocktree::BTree;
//!
//! let mut tree = BTree::create("my_index.idx").unwrap();
//! tree.insert(42, 4200).unwrap();
//! assert_eq!(tree.search(42).unwrap(), Some(4200));
//! tree.close().unwrap();
//! ```

pub mod common;
pub mod index;
pub mod records;
pub mod session;
pub mod storage;

// Re-export commonly used items at crate root for convenience
pub use common::config::{BLOCK_SIZE, MAGIC, MAX_CHILDREN, MAX_KEYS};
pub use common::{BlockId, Error, Result};

pub use index::BTree;
pub use session::Session;
pub use storage::{Block, Header, IndexFile, Node};
