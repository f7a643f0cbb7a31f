//! Common types and utilities shared across blocktree.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants (block size, magic tag, node capacity)
//! - Error types
//! - Identifiers (BlockId)

pub mod config;
pub mod error;
mod block_id;

pub use block_id::BlockId;
pub use error::{Error, Result};
