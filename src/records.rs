//! Bulk load/extract adapters over `key,value` record streams.
//!
//! One record per line, two base-10 unsigned integers separated by a
//! comma. Load turns a line stream into repeated engine inserts;
//! extract turns a pre-order traversal back into lines.
//!
//! Load is fail-fast: the first line that does not parse, and the
//! first duplicate key, abort the whole load. Lines inserted before
//! the failure stay in the file (durability is per line, not
//! transactional), so a retried load of the same file will stop on its
//! first already-inserted record.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::common::{Error, Result};
use crate::index::BTree;

/// Parse one `key,value` record. Fields may carry surrounding spaces.
fn parse_record(text: &str) -> Option<(u64, u64)> {
    let (key, value) = text.split_once(',')?;
    Some((key.trim().parse().ok()?, value.trim().parse().ok()?))
}

/// Insert every record from `reader` into the tree.
///
/// Returns the number of records inserted.
///
/// # Errors
/// Returns [`Error::BadRecord`] (with the 1-based line number) for the
/// first line that is not two comma-separated integers, or
/// [`Error::DuplicateKey`] for the first record whose key is already
/// present. Either aborts the load immediately.
pub fn load<R: BufRead>(tree: &mut BTree, reader: R) -> Result<usize> {
    let mut count = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        let (key, value) = parse_record(text).ok_or_else(|| Error::BadRecord {
            line: index + 1,
            text: text.to_string(),
        })?;
        tree.insert(key, value)?;
        count += 1;
    }
    debug!(records = count, "bulk load complete");
    Ok(count)
}

/// Write every pair in the tree to `writer`, one `key,value` line per
/// pair, in pre-order traversal order.
///
/// Pre-order is node-before-children, so the output is not sorted by
/// key; consumers of extracted files depend on this order.
///
/// Returns the number of records written.
pub fn extract<W: Write>(tree: &mut BTree, mut writer: W) -> Result<usize> {
    let mut pairs = Vec::new();
    tree.for_each_node(|node, _| {
        for (&key, &value) in node.keys().iter().zip(node.values()) {
            pairs.push((key, value));
        }
    })?;

    for &(key, value) in &pairs {
        writeln!(writer, "{},{}", key, value)?;
    }
    debug!(records = pairs.len(), "bulk extract complete");
    Ok(pairs.len())
}
