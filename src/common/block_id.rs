//! Block identifier type.

use std::fmt;

/// Identifies a 512-byte block in the index file.
///
/// Block ids are `u64` and map directly to file offsets:
/// block N lives at byte offset `N * BLOCK_SIZE`.
///
/// Block 0 holds the file header, so id 0 doubles as the "no block"
/// sentinel: a `parent_id` of 0 marks the root, a child entry of 0
/// marks an absent child, and a `root_block_id` of 0 marks an empty
/// tree.
///
/// # Example
/// ```
/// use blocktree::BlockId;
///
/// let id = BlockId::new(42);
/// assert!(id.is_some());
/// assert_eq!(id.0, 42);
/// assert!(BlockId::NONE.is_none());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u64);

impl BlockId {
    /// Sentinel id meaning "no block" (the header occupies block 0).
    pub const NONE: BlockId = BlockId(0);

    /// Create a new BlockId.
    #[inline]
    pub fn new(id: u64) -> Self {
        BlockId(id)
    }

    /// Check whether this id refers to a node block.
    #[inline]
    pub fn is_some(&self) -> bool {
        *self != Self::NONE
    }

    /// Check whether this id is the "no block" sentinel.
    #[inline]
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Byte offset of this block in the file.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.0 * crate::common::config::BLOCK_SIZE as u64
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "Block(NONE)")
        } else {
            write!(f, "Block({})", self.0)
        }
    }
}
