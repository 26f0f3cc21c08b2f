/*!
 * Arena Statistics and Invariant Checks
 */

use super::Arena;
use crate::core::types::{Address, Size};
use crate::memory::types::{ArenaError, ArenaResult, ArenaStats, BlockKind};

impl Arena {
    /// Get arena statistics
    pub fn stats(&self) -> ArenaStats {
        let free = self.free.total();
        let used = self.owned_size();
        let alias_bindings = self.used.iter().filter(|block| block.is_alias()).count();

        ArenaStats {
            capacity: self.capacity,
            used,
            free,
            largest_free: self.free.largest(),
            owned_blocks: self.used.len() - alias_bindings,
            alias_bindings,
            free_extents: self.free.len(),
            usage_percentage: if self.capacity > 0 {
                (used as f64 / self.capacity as f64) * 100.0
            } else {
                0.0
            },
        }
    }

    /// Check conservation and tiling
    ///
    /// Owned extents and free extents must cover `[0, capacity)` exactly once,
    /// owned blocks must hold at least one reference, and every alias whose
    /// target is live must share the target's start.
    pub fn verify(&self) -> ArenaResult<()> {
        let used = self.owned_size();
        let free = self.free.total();
        if used + free != self.capacity {
            return Err(corruption(format!(
                "conservation violated: {used} used + {free} free != {} capacity",
                self.capacity
            )));
        }

        let mut extents: Vec<(Address, Size)> = self
            .used
            .iter()
            .filter(|block| !block.is_alias())
            .map(|block| (block.start, block.size))
            .chain(self.free.as_slice().iter().map(|block| (block.start, block.size)))
            .collect();
        extents.sort_unstable();

        let mut cursor: Address = 0;
        for (start, size) in extents {
            if start != cursor {
                return Err(corruption(format!(
                    "extent at {start} does not continue from {cursor}"
                )));
            }
            cursor += size;
        }
        if cursor != self.capacity {
            return Err(corruption(format!(
                "extents end at {cursor}, capacity is {}",
                self.capacity
            )));
        }

        for block in &self.used {
            match block.kind {
                BlockKind::Owned { ref_count: 0, .. } => {
                    return Err(corruption(format!("{} holds no references", block.name)));
                }
                BlockKind::Alias { target } => {
                    if let Some(owner) = self.owner_index(target) {
                        if self.used[owner].start != block.start {
                            return Err(corruption(format!(
                                "alias {} at {} but target at {}",
                                block.name, block.start, self.used[owner].start
                            )));
                        }
                    }
                }
                BlockKind::Owned { .. } => {}
            }
        }

        Ok(())
    }

    fn owned_size(&self) -> Size {
        self.used
            .iter()
            .filter(|block| !block.is_alias())
            .map(|block| block.size)
            .sum()
    }
}

fn corruption(detail: String) -> ArenaError {
    ArenaError::CorruptionDetected(detail)
}
