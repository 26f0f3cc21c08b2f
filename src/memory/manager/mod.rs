/*!
 * Arena Manager
 *
 * Single-address-space allocator with reference counting and compaction.
 *
 * ## Layout
 *
 * - **Used list**: one entry per live binding, in insertion order until the
 *   next compaction sorts it by address. Owned blocks carry a stable
 *   `BlockId` and a reference count; aliases are zero-size entries that
 *   point at an owned block by id.
 * - **Free list**: disjoint free extents, scanned first-fit. Extents are only
 *   coalesced right after compaction, which rebuilds the list from scratch.
 *
 * ## Operations
 *
 * - **Allocate**: first fit, split or consume, compact once and retry on a miss
 * - **Assign**: add an alias and bump the target's count
 * - **Release**: drop one binding, reclaim the block when its count hits zero
 * - **Compact**: slide owned blocks to the front, re-sync aliases
 */

mod allocator;
mod compactor;
mod free_list;
mod references;
mod stats;

pub use free_list::FreeList;

use super::traits::{Allocator, ArenaInfo, Compactor, ReferenceCounter};
use super::types::{
    ArenaResult, ArenaSnapshot, ArenaStats, Block, BlockKind, CompactionStats, FreeBlock, Release,
};
use crate::core::limits::DEFAULT_ARENA_SIZE;
use crate::core::types::{BlockId, Size};
use tracing::info;

/// Reference-counted compacting arena
#[derive(Debug, Clone)]
pub struct Arena {
    used: Vec<Block>,
    free: FreeList,
    capacity: Size,
    next_id: BlockId,
}

impl Arena {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ARENA_SIZE)
    }

    /// Create an arena whose whole space starts as a single free extent
    pub fn with_capacity(capacity: Size) -> Self {
        info!(capacity, "Arena initialized with first-fit allocator and compaction");
        let mut free = FreeList::new();
        if capacity > 0 {
            free.push(FreeBlock::new(0, capacity));
        }
        Self {
            used: Vec::new(),
            free,
            capacity,
            next_id: BlockId::new(0),
        }
    }

    pub fn capacity(&self) -> Size {
        self.capacity
    }

    /// Used entries in current list order
    pub fn used(&self) -> &[Block] {
        &self.used
    }

    /// Free extents in current list order
    pub fn free(&self) -> &[FreeBlock] {
        self.free.as_slice()
    }

    /// First used entry bound to `name`
    pub fn lookup(&self, name: &str) -> Option<&Block> {
        self.position_of(name).map(|index| &self.used[index])
    }

    pub fn snapshot(&self) -> ArenaSnapshot<'_> {
        ArenaSnapshot {
            capacity: self.capacity,
            used: &self.used,
            free: self.free.as_slice(),
        }
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.used.iter().position(|block| block.name.as_str() == name)
    }

    /// Index of the owned block with `id`, if it is still live
    fn owner_index(&self, id: BlockId) -> Option<usize> {
        self.used.iter().position(|block| {
            matches!(block.kind, BlockKind::Owned { id: owner, .. } if owner == id)
        })
    }
}

// Implement trait interfaces
impl Allocator for Arena {
    fn allocate(&mut self, size: Size, name: &str) -> ArenaResult<&Block> {
        Arena::allocate(self, size, name)
    }
}

impl Compactor for Arena {
    fn compact(&mut self) -> CompactionStats {
        Arena::compact(self)
    }
}

impl ReferenceCounter for Arena {
    fn assign(&mut self, alias: &str, target: &str) -> ArenaResult<&Block> {
        Arena::assign(self, alias, target)
    }

    fn release(&mut self, name: &str) -> ArenaResult<Release> {
        Arena::release(self, name)
    }
}

impl ArenaInfo for Arena {
    fn capacity(&self) -> Size {
        self.capacity
    }

    fn snapshot(&self) -> ArenaSnapshot<'_> {
        Arena::snapshot(self)
    }

    fn stats(&self) -> ArenaStats {
        Arena::stats(self)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}
