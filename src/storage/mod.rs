//! Storage layer - the on-disk format and file I/O.
//!
//! This module handles persistent storage:
//! - [`Block`] - The raw 512-byte I/O unit
//! - [`Node`] - The decoded in-memory node
//! - [`codec`] - Fixed-offset node encoding
//! - [`Header`] - The block-0 metadata record
//! - [`IndexFile`] - File lifecycle and block-addressed I/O

mod block;
pub mod codec;
mod header;
mod index_file;
mod node;

pub use block::Block;
pub use header::Header;
pub use index_file::IndexFile;
pub use node::Node;
