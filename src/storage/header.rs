//! Header - the block-0 metadata record.
//!
//! The header identifies the file and tracks the two pieces of mutable
//! file-level state: where the root lives and which block id to hand
//! out next.
//!
//! # Layout
//! ```text
//! Offset  Size  Field
//! ------  ----  -----
//! 0       8     magic tag (b"4337PRJ3")
//! 8       8     root_block_id (big-endian u64, 0 = empty tree)
//! 16      8     next_block_id (big-endian u64, starts at 1)
//! 24      488   zero padding to 512
//! ```

use crate::common::config::MAGIC;
use crate::common::BlockId;
use crate::storage::block::Block;

/// The file header stored in block 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Block holding the current root node, or `NONE` for an empty tree.
    pub root_block_id: BlockId,
    /// Next block id to allocate. Monotonically increasing, never reused.
    pub next_block_id: BlockId,
}

impl Header {
    pub const OFFSET_MAGIC: usize = 0;
    pub const OFFSET_ROOT: usize = 8;
    pub const OFFSET_NEXT: usize = 16;

    /// Header for a freshly created file: empty tree, ids start at 1
    /// (block 0 is the header itself).
    pub fn new() -> Self {
        Self {
            root_block_id: BlockId::NONE,
            next_block_id: BlockId::new(1),
        }
    }

    /// Read a header out of block 0's bytes.
    ///
    /// Returns `None` if the magic tag does not match; the store maps
    /// that to `InvalidFormat` with the offending path.
    pub fn from_block(block: &Block) -> Option<Self> {
        let data = block.as_slice();
        if data[Self::OFFSET_MAGIC..Self::OFFSET_MAGIC + 8] != MAGIC {
            return None;
        }

        let mut word = [0u8; 8];
        word.copy_from_slice(&data[Self::OFFSET_ROOT..Self::OFFSET_ROOT + 8]);
        let root_block_id = BlockId::new(u64::from_be_bytes(word));
        word.copy_from_slice(&data[Self::OFFSET_NEXT..Self::OFFSET_NEXT + 8]);
        let next_block_id = BlockId::new(u64::from_be_bytes(word));

        Some(Self {
            root_block_id,
            next_block_id,
        })
    }

    /// Write this header into a zero-padded block.
    pub fn to_block(&self) -> Block {
        let mut block = Block::new();
        let data = block.as_mut_slice();

        data[Self::OFFSET_MAGIC..Self::OFFSET_MAGIC + 8].copy_from_slice(&MAGIC);
        data[Self::OFFSET_ROOT..Self::OFFSET_ROOT + 8]
            .copy_from_slice(&self.root_block_id.0.to_be_bytes());
        data[Self::OFFSET_NEXT..Self::OFFSET_NEXT + 8]
            .copy_from_slice(&self.next_block_id.0.to_be_bytes());

        block
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_header() {
        let header = Header::new();
        assert!(header.root_block_id.is_none());
        assert_eq!(header.next_block_id, BlockId::new(1));
    }

    #[test]
    fn test_roundtrip() {
        let original = Header {
            root_block_id: BlockId::new(7),
            next_block_id: BlockId::new(12),
        };

        let block = original.to_block();
        let recovered = Header::from_block(&block).unwrap();
        assert_eq!(original, recovered);
    }

    #[test]
    fn test_byte_layout() {
        let header = Header {
            root_block_id: BlockId::new(2),
            next_block_id: BlockId::new(5),
        };
        let block = header.to_block();
        let data = block.as_slice();

        assert_eq!(&data[0..8], b"4337PRJ3");
        assert_eq!(&data[8..16], &2u64.to_be_bytes());
        assert_eq!(&data[16..24], &5u64.to_be_bytes());
        assert!(data[24..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_bad_magic_rejected() {
        let mut block = Header::new().to_block();
        block.as_mut_slice()[0] = b'X';
        assert!(Header::from_block(&block).is_none());
    }
}
