//! Block - the fundamental 512-byte unit of storage.
//!
//! A [`Block`] is a raw 512-byte array that serves as the unit of I/O
//! between the index file and memory. The header occupies block 0;
//! every other block holds one encoded B-tree node.

use crate::common::config::BLOCK_SIZE;

/// A block of data (512 bytes).
///
/// This is the fundamental unit of I/O between disk and memory. The
/// codec fills a `Block` from a node before a write and decodes a node
/// out of one after a read.
///
/// # Example
/// ```
/// use blocktree::storage::Block;
///
/// let mut block = Block::new();
/// block.as_mut_slice()[0] = 0xFF;
/// assert_eq!(block.as_slice()[0], 0xFF);
/// ```
pub struct Block {
    data: [u8; BLOCK_SIZE],
}

impl Block {
    /// Create a new zeroed block.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: [0u8; BLOCK_SIZE],
        }
    }

    /// Get immutable slice of block data.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Get mutable slice of block data.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Zero out the entire block.
    pub fn reset(&mut self) {
        self.data.fill(0);
    }

    /// Get the size of a block.
    #[inline]
    pub const fn size() -> usize {
        BLOCK_SIZE
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::new()
    }
}

// Clone only available in tests - forces explicit copying in production
#[cfg(test)]
impl Clone for Block {
    fn clone(&self) -> Self {
        let mut new_block = Block::new();
        new_block.data.copy_from_slice(&self.data);
        new_block
    }
}
