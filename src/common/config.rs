//! Configuration constants for blocktree.

/// Size of a block in bytes.
///
/// Every unit of file I/O (the header and every node) is exactly one
/// 512-byte block, and block N lives at byte offset `N * BLOCK_SIZE`.
pub const BLOCK_SIZE: usize = 512;

/// Magic tag at the start of every index file.
///
/// The first 8 bytes of block 0 must equal this value or the file is
/// rejected on open.
pub const MAGIC: [u8; 8] = *b"4337PRJ3";

/// Maximum number of key/value pairs a node can hold.
///
/// 19 keys + 19 values + 20 children + 3 metadata words, all u64,
/// is 488 bytes, the largest node that fits a 512-byte block.
pub const MAX_KEYS: usize = 19;

/// Maximum number of children per node (`MAX_KEYS + 1`).
pub const MAX_CHILDREN: usize = MAX_KEYS + 1;
