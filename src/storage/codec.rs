//! Node codec - fixed-offset block encoding.
//!
//! Converts a [`Node`] to and from its 512-byte on-disk form. The
//! field order and offsets below are the on-disk format; changing them
//! changes the file format.
//!
//! # Layout (big-endian u64 fields)
//! ```text
//! Offset  Size  Field
//! ------  ----  -----
//! 0       8     block_id
//! 8       8     parent_id
//! 16      8     num_keys
//! 24      152   keys[19]
//! 176     152   values[19]
//! 328     160   children[20]
//! 488     24    zero padding to 512
//! ```
//!
//! Decoding validates only the block length. Semantic invariants
//! (ascending keys, count bounds, child consistency) belong to the
//! engine, which is the only writer.

use crate::common::config::{BLOCK_SIZE, MAX_CHILDREN, MAX_KEYS};
use crate::common::{BlockId, Error, Result};
use crate::storage::block::Block;
use crate::storage::node::Node;

/// Offset of each field within a node block.
pub const OFFSET_BLOCK_ID: usize = 0;
pub const OFFSET_PARENT_ID: usize = 8;
pub const OFFSET_NUM_KEYS: usize = 16;
pub const OFFSET_KEYS: usize = 24;
pub const OFFSET_VALUES: usize = OFFSET_KEYS + 8 * MAX_KEYS;
pub const OFFSET_CHILDREN: usize = OFFSET_VALUES + 8 * MAX_KEYS;

fn read_u64(data: &[u8], offset: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&data[offset..offset + 8]);
    u64::from_be_bytes(buf)
}

fn write_u64(data: &mut [u8], offset: usize, value: u64) {
    data[offset..offset + 8].copy_from_slice(&value.to_be_bytes());
}

/// Serialize a node into a zero-padded 512-byte block.
///
/// Total and deterministic: every node with in-range fields encodes,
/// and equal nodes encode to equal bytes.
pub fn encode(node: &Node) -> Block {
    let mut block = Block::new();
    let data = block.as_mut_slice();

    write_u64(data, OFFSET_BLOCK_ID, node.block_id.0);
    write_u64(data, OFFSET_PARENT_ID, node.parent_id.0);
    write_u64(data, OFFSET_NUM_KEYS, node.num_keys as u64);

    for (i, &key) in node.keys.iter().enumerate() {
        write_u64(data, OFFSET_KEYS + 8 * i, key);
    }
    for (i, &value) in node.values.iter().enumerate() {
        write_u64(data, OFFSET_VALUES + 8 * i, value);
    }
    for (i, &child) in node.children.iter().enumerate() {
        write_u64(data, OFFSET_CHILDREN + 8 * i, child.0);
    }

    block
}

/// Reconstruct a node from one block's bytes.
///
/// `block_id` is the id the caller read the bytes from; it is only
/// used to name the block in the error.
///
/// # Errors
/// Returns [`Error::CorruptBlock`] unless `data` is exactly
/// `BLOCK_SIZE` bytes.
pub fn decode(block_id: BlockId, data: &[u8]) -> Result<Node> {
    if data.len() != BLOCK_SIZE {
        return Err(Error::CorruptBlock(block_id.0));
    }

    let mut node = Node::new(
        BlockId::new(read_u64(data, OFFSET_BLOCK_ID)),
        BlockId::new(read_u64(data, OFFSET_PARENT_ID)),
    );
    node.num_keys = read_u64(data, OFFSET_NUM_KEYS) as usize;

    for i in 0..MAX_KEYS {
        node.keys[i] = read_u64(data, OFFSET_KEYS + 8 * i);
        node.values[i] = read_u64(data, OFFSET_VALUES + 8 * i);
    }
    for i in 0..MAX_CHILDREN {
        node.children[i] = BlockId::new(read_u64(data, OFFSET_CHILDREN + 8 * i));
    }

    Ok(node)
}
