/*!
 * Arena Compaction
 * Slides owned blocks to the front and rebuilds the free list
 */

use super::Arena;
use crate::core::types::{Address, BlockId};
use crate::memory::types::{BlockKind, CompactionStats, FreeBlock};
use tracing::debug;

impl Arena {
    /// Compact the arena
    ///
    /// Used entries are stably sorted by start, owned blocks are packed from
    /// address 0 in that order, aliases are moved along with their targets,
    /// and the free list is rebuilt from scratch out of the remaining space.
    pub fn compact(&mut self) -> CompactionStats {
        let extents_before = self.free.len();

        // sort_by_key is stable, so ties keep insertion order
        self.used.sort_by_key(|block| block.start);

        let mut cursor: Address = 0;
        let mut moved_blocks = 0;
        for block in self.used.iter_mut().filter(|block| !block.is_alias()) {
            if block.start != cursor {
                block.start = cursor;
                moved_blocks += 1;
            }
            cursor += block.size;
        }

        self.resync_aliases();
        self.rebuild_free_list(cursor);

        let stats = CompactionStats {
            moved_blocks,
            extents_before,
            extents_after: self.free.len(),
        };
        debug!(
            moved = stats.moved_blocks,
            extents_before = stats.extents_before,
            extents_after = stats.extents_after,
            "Compaction complete"
        );
        stats
    }

    /// Point every alias at its target's current start
    ///
    /// Aliases whose target has been reclaimed keep their last address.
    fn resync_aliases(&mut self) {
        let owners: Vec<(BlockId, Address)> = self
            .used
            .iter()
            .filter_map(|block| match block.kind {
                BlockKind::Owned { id, .. } => Some((id, block.start)),
                BlockKind::Alias { .. } => None,
            })
            .collect();

        for block in self.used.iter_mut() {
            if let BlockKind::Alias { target } = block.kind {
                if let Some(&(_, start)) = owners.iter().find(|(id, _)| *id == target) {
                    block.start = start;
                }
            }
        }
    }

    /// Replace the free list with the gaps between owned blocks and the tail
    fn rebuild_free_list(&mut self, end_of_used: Address) {
        self.free.clear();

        let owned: Vec<(Address, Address)> = self
            .used
            .iter()
            .filter(|block| !block.is_alias())
            .map(|block| (block.start, block.end()))
            .collect();

        for pair in owned.windows(2) {
            let (_, previous_end) = pair[0];
            let (next_start, _) = pair[1];
            if next_start > previous_end {
                self.free
                    .push(FreeBlock::new(previous_end, next_start - previous_end));
            }
        }

        if self.capacity > end_of_used {
            self.free
                .push(FreeBlock::new(end_of_used, self.capacity - end_of_used));
        }
    }
}
