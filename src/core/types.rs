/*!
 * Core Types
 * Common types used across the arena simulator
 */

use serde::Serialize;
use smartstring::{LazyCompact, SmartString};
use std::fmt;

/// Address type for arena offsets
pub type Address = usize;

/// Size type for arena extents
pub type Size = usize;

/// Reference count of an owned block
pub type RefCount = u32;

/// Variable name bound to a used block
///
/// Names in command streams are short, so they are stored inline.
pub type Name = SmartString<LazyCompact>;

/// Stable identity of an owned block
///
/// Ids are handed out monotonically and never reused, so an alias holding a
/// `BlockId` keeps pointing at the same allocation no matter how many times
/// compaction relocates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BlockId(u64);

impl BlockId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Return this id and advance the generator past it
    pub(crate) fn bump(&mut self) -> Self {
        let id = *self;
        self.0 += 1;
        id
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
