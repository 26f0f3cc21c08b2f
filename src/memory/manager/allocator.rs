/*!
 * Arena Allocator Implementation
 * First-fit allocation with a single compaction retry
 */

use super::Arena;
use crate::core::types::{Address, Size};
use crate::memory::types::{ArenaError, ArenaPressure, ArenaResult, Block};
use tracing::{error, info, warn};

impl Arena {
    /// Allocate `size` units for `name`
    ///
    /// Scans the free list first-fit. On a miss the arena is compacted once
    /// and the identical scan is retried; a second miss is reported as
    /// `AllocationFailure`. Names are not checked for uniqueness here.
    pub fn allocate(&mut self, size: Size, name: &str) -> ArenaResult<&Block> {
        if size == 0 {
            warn!(name, "Rejected zero-size allocation");
            return Err(ArenaError::ZeroSizeAllocation(name.into()));
        }

        let start = match self.free.take_first_fit(size) {
            Some(start) => start,
            None => self.allocate_after_compaction(size, name)?,
        };

        let id = self.next_id.bump();
        let index = self.used.len();
        self.used.push(Block::owned(id, name, start, size));

        self.log_allocation(name, start, size);
        Ok(&self.used[index])
    }

    fn allocate_after_compaction(&mut self, size: Size, name: &str) -> ArenaResult<Address> {
        warn!(
            name,
            size,
            largest_free = self.free.largest(),
            "Attempting to compact memory due to insufficient space for allocation"
        );
        self.compact();

        self.free.take_first_fit(size).ok_or_else(|| {
            let err = ArenaError::AllocationFailure {
                requested: size,
                largest_free: self.free.largest(),
                total_free: self.free.total(),
            };
            error!(name, size, "Allocation failed: not enough space even after compaction");
            err
        })
    }

    fn log_allocation(&self, name: &str, start: Address, size: Size) {
        let used = self.capacity - self.free.total();
        let ratio = used as f64 / self.capacity as f64;

        match ArenaPressure::from_ratio(ratio) {
            level @ (ArenaPressure::High | ArenaPressure::Critical) => warn!(
                name,
                address = start,
                size,
                "Arena pressure {}: {:.1}% used ({} / {})",
                level,
                ratio * 100.0,
                used,
                self.capacity
            ),
            _ => info!(name, address = start, size, "Allocated memory"),
        }
    }
}
