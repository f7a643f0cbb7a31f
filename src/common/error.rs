//! Error types for blocktree.

use std::path::PathBuf;

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write
/// `Result<T>`. This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in blocktree.
///
/// Every failure is a distinct, named outcome so the command layer can
/// react to each one (re-prompt, abort a load, report corruption)
/// instead of pattern-matching on strings. None of these are retried
/// internally.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from the underlying file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `open` was asked for a path that does not exist.
    #[error("index file not found: {0}")]
    NotFound(PathBuf),

    /// `create` was asked for a path that already exists and the caller
    /// has not confirmed overwrite.
    #[error("index file already exists: {0}")]
    AlreadyExists(PathBuf),

    /// The file's first 8 bytes do not match the magic tag.
    #[error("not a valid index file: {0}")]
    InvalidFormat(PathBuf),

    /// A block could not be decoded: short read, truncated file, or a
    /// read addressed at the reserved header block.
    #[error("corrupt block {0}")]
    CorruptBlock(u64),

    /// An operation was attempted with no open index file.
    #[error("no index file is open")]
    NotOpen,

    /// The key is already present in the tree.
    ///
    /// Keys are unique; ordering and search rely on strictly ascending
    /// keys within every node.
    #[error("duplicate key {0}")]
    DuplicateKey(u64),

    /// A bulk-load line did not parse as two comma-separated integers.
    ///
    /// `line` is 1-based. The load aborts at the first bad record.
    #[error("malformed record at line {line}: {text:?}")]
    BadRecord { line: usize, text: String },
}
