//! Session - the operation surface consumed by the command layer.
//!
//! A [`Session`] holds at most one open tree and maps "nothing open"
//! to [`Error::NotOpen`] so the dispatcher never has to track open
//! state itself. Every session operation delegates to the engine.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::common::{Error, Result};
use crate::index::BTree;
use crate::records;

/// One interactive session over at most one open index file.
#[derive(Default)]
pub struct Session {
    tree: Option<BTree>,
}

impl Session {
    /// Start a session with nothing open.
    pub fn new() -> Self {
        Self { tree: None }
    }

    /// Whether an index file is currently open.
    pub fn is_open(&self) -> bool {
        self.tree.is_some()
    }

    /// Path of the open index file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.tree.as_ref().map(|t| t.path())
    }

    fn tree(&mut self) -> Result<&mut BTree> {
        self.tree.as_mut().ok_or(Error::NotOpen)
    }

    /// Create a new index file and make it the session's open store.
    ///
    /// `overwrite` is the caller's confirmation to replace an existing
    /// file; without it an existing path fails with `AlreadyExists`.
    /// Any previously open store is closed first.
    pub fn create<P: AsRef<Path>>(&mut self, path: P, overwrite: bool) -> Result<()> {
        self.close()?;
        let tree = if overwrite {
            BTree::create_overwrite(path)?
        } else {
            BTree::create(path)?
        };
        self.tree = Some(tree);
        Ok(())
    }

    /// Open an existing index file, closing any previously open store.
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.close()?;
        self.tree = Some(BTree::open(path)?);
        Ok(())
    }

    /// Close the open store, persisting its header. A no-op when
    /// nothing is open, so closing twice is safe.
    pub fn close(&mut self) -> Result<()> {
        match self.tree.take() {
            Some(tree) => tree.close(),
            None => Ok(()),
        }
    }

    /// Insert a key/value pair into the open tree.
    pub fn insert(&mut self, key: u64, value: u64) -> Result<()> {
        self.tree()?.insert(key, value)
    }

    /// Look up a key in the open tree.
    pub fn search(&mut self, key: u64) -> Result<Option<u64>> {
        self.tree()?.search(key)
    }

    /// Bulk-load `key,value` lines from a text file.
    ///
    /// Returns the number of records inserted. Fail-fast on the first
    /// malformed line or duplicate key.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let tree = self.tree.as_mut().ok_or(Error::NotOpen)?;
        let file = File::open(path)?;
        records::load(tree, BufReader::new(file))
    }

    /// Extract every pair to a text file, one `key,value` line per
    /// pair, in pre-order. Returns the number of records written.
    pub fn extract<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let tree = self.tree.as_mut().ok_or(Error::NotOpen)?;
        let file = File::create(path)?;
        records::extract(tree, BufWriter::new(file))
    }

    /// Indented listing of every node in the open tree.
    pub fn dump(&mut self) -> Result<String> {
        self.tree()?.dump()
    }
}
