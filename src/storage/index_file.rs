//! Index file store - block-addressed file I/O plus the header record.
//!
//! The [`IndexFile`] owns the open file handle and the header state
//! (root pointer, next free block id). It is the single point through
//! which blocks are read and written.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::common::{BlockId, Error, Result};
use crate::storage::block::Block;
use crate::storage::codec;
use crate::storage::header::Header;
use crate::storage::node::Node;

/// A single open index file.
///
/// # File Layout
/// ```text
/// ┌──────────┬──────────┬──────────┬─────────┬──────────┐
/// │ Block 0  │ Block 1  │ Block 2  │  ...    │ Block N  │
/// │ (header) │ (node)   │ (node)   │         │ (node)   │
/// └──────────┴──────────┴──────────┴─────────┴──────────┘
/// Offset:  0        512       1024    ...    N×512
/// ```
///
/// # Thread Safety
/// `IndexFile` is **single-threaded**: one caller, blocking I/O, no
/// internal buffering. Every write goes straight to the handle and is
/// visible to subsequent reads. Callers with multiple logical users
/// must serialize access themselves.
///
/// # Handle Lifetime
/// [`close`](IndexFile::close) persists the header and releases the
/// handle. Dropping an `IndexFile` without closing performs the same
/// header write best-effort, so the handle is released with current
/// metadata on every exit path, including error paths.
pub struct IndexFile {
    file: File,
    path: PathBuf,
    header: Header,
}

impl IndexFile {
    /// Create a new index file.
    ///
    /// The file starts with an empty tree: root id 0, next id 1.
    ///
    /// # Errors
    /// Returns [`Error::AlreadyExists`] if the path exists. Overwrite
    /// confirmation is the command layer's concern; the confirmed path
    /// is [`create_overwrite`](Self::create_overwrite).
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = match OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(Error::AlreadyExists(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        Self::init(file, path)
    }

    /// Create a new index file, truncating any existing file at the path.
    pub fn create_overwrite<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        Self::init(file, path)
    }

    fn init(file: File, path: &Path) -> Result<Self> {
        let mut store = Self {
            file,
            path: path.to_path_buf(),
            header: Header::new(),
        };
        store.sync_header()?;
        debug!(path = %store.path.display(), "created index file");
        Ok(store)
    }

    /// Open an existing index file.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the path does not exist, or
    /// [`Error::InvalidFormat`] if block 0 is truncated or its first
    /// 8 bytes are not the magic tag.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }

        let mut file = OpenOptions::new().read(true).write(true).open(path)?;

        let mut block = Block::new();
        match file.read_exact(block.as_mut_slice()) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Err(Error::InvalidFormat(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        }

        let header =
            Header::from_block(&block).ok_or_else(|| Error::InvalidFormat(path.to_path_buf()))?;

        debug!(
            path = %path.display(),
            root = header.root_block_id.0,
            next = header.next_block_id.0,
            "opened index file"
        );

        Ok(Self {
            file,
            path: path.to_path_buf(),
            header,
        })
    }

    /// Block id of the current root, or `NONE` for an empty tree.
    #[inline]
    pub fn root_id(&self) -> BlockId {
        self.header.root_block_id
    }

    /// Point the file at a new root node.
    ///
    /// In-memory only; the header reaches disk on `sync_header`/`close`.
    #[inline]
    pub fn set_root_id(&mut self, id: BlockId) {
        self.header.root_block_id = id;
    }

    /// Path this store was created/opened with.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hand out the next free block id.
    ///
    /// Ids are monotonically increasing and never reused. Nothing is
    /// written; the caller decides when the block gets content.
    pub fn allocate_block_id(&mut self) -> BlockId {
        let id = self.header.next_block_id;
        self.header.next_block_id = BlockId::new(id.0 + 1);
        id
    }

    /// Read and decode the node at `block_id`.
    ///
    /// # Errors
    /// Returns [`Error::CorruptBlock`] if `block_id` is 0 (the header
    /// block never holds a node) or the file ends before a full block.
    pub fn read_node(&mut self, block_id: BlockId) -> Result<Node> {
        if block_id.is_none() {
            return Err(Error::CorruptBlock(block_id.0));
        }

        self.file.seek(SeekFrom::Start(block_id.offset()))?;

        let mut block = Block::new();
        match self.file.read_exact(block.as_mut_slice()) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Err(Error::CorruptBlock(block_id.0));
            }
            Err(e) => return Err(e.into()),
        }

        trace!(block = block_id.0, "read node block");
        codec::decode(block_id, block.as_slice())
    }

    /// Encode and write a node at its own block id.
    ///
    /// The id must have come from [`allocate_block_id`]. Writing past
    /// the current end of file extends it (sparse growth is fine);
    /// nothing is ever appended implicitly.
    pub fn write_node(&mut self, node: &Node) -> Result<()> {
        debug_assert!(node.block_id.is_some(), "node must have an allocated id");
        debug_assert!(node.block_id < self.header.next_block_id);

        self.file.seek(SeekFrom::Start(node.block_id.offset()))?;
        let block = codec::encode(node);
        self.file.write_all(block.as_slice())?;

        trace!(block = node.block_id.0, keys = node.num_keys, "wrote node block");
        Ok(())
    }

    /// Rewrite block 0 with the current header and fsync.
    pub fn sync_header(&mut self) -> Result<()> {
        self.file.seek(SeekFrom::Start(0))?;
        let block = self.header.to_block();
        self.file.write_all(block.as_slice())?;
        self.file.sync_all()?;
        Ok(())
    }

    /// Persist the header and release the file handle.
    ///
    /// Consuming `self` makes a second close impossible; the session
    /// layer treats close-with-nothing-open as a no-op, which together
    /// give the idempotent close the format requires.
    pub fn close(mut self) -> Result<()> {
        self.sync_header()?;
        debug!(path = %self.path.display(), "closed index file");
        Ok(())
    }
}

impl Drop for IndexFile {
    fn drop(&mut self) {
        // Best-effort header persistence for non-close exit paths.
        let _ = self.sync_header();
    }
}
