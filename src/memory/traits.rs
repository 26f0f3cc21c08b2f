/*!
 * Arena Traits
 * Seams between the command session and the arena engine
 */

use super::types::*;
use crate::core::types::Size;

/// First-fit allocator interface
pub trait Allocator {
    /// Allocate `size` units for `name`
    ///
    /// The returned block borrows the engine and is invalidated by the next
    /// structural mutation.
    fn allocate(&mut self, size: Size, name: &str) -> ArenaResult<&Block>;
}

/// Compaction interface
pub trait Compactor {
    /// Slide owned blocks to the front and rebuild the free list
    fn compact(&mut self) -> CompactionStats;
}

/// Reference counting interface
pub trait ReferenceCounter {
    /// Bind `alias` to the block currently named `target`
    fn assign(&mut self, alias: &str, target: &str) -> ArenaResult<&Block>;

    /// Drop one binding named `name`
    fn release(&mut self, name: &str) -> ArenaResult<Release>;
}

/// Arena statistics provider
pub trait ArenaInfo {
    fn capacity(&self) -> Size;

    fn snapshot(&self) -> ArenaSnapshot<'_>;

    fn stats(&self) -> ArenaStats;

    /// Get arena pressure level
    fn pressure(&self) -> ArenaPressure {
        self.stats().pressure()
    }
}

/// Engine trait combining all interfaces
pub trait ArenaEngine: Allocator + Compactor + ReferenceCounter + ArenaInfo {}

/// Implement ArenaEngine for types that implement all required traits
impl<T> ArenaEngine for T where T: Allocator + Compactor + ReferenceCounter + ArenaInfo {}
