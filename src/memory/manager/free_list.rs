/*!
 * Free List
 * Ordered free extents with first-fit lookup
 */

use crate::core::types::{Address, Size};
use crate::memory::types::FreeBlock;

/// Free extents in list order
///
/// Order is significant: first-fit picks the earliest extent that fits, so
/// the same order and request always select the same extent.
#[derive(Debug, Clone, Default)]
pub struct FreeList {
    blocks: Vec<FreeBlock>,
}

impl FreeList {
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    pub fn push(&mut self, block: FreeBlock) {
        self.blocks.push(block);
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Carve `size` units out of the first extent that can hold them
    ///
    /// An exact fit removes the extent, a larger one is shrunk from the front.
    /// Returns the start address of the carved range.
    pub fn take_first_fit(&mut self, size: Size) -> Option<Address> {
        let index = self.blocks.iter().position(|block| block.size >= size)?;
        let block = &mut self.blocks[index];
        let address = block.start;

        if block.size == size {
            self.blocks.remove(index);
        } else {
            block.start += size;
            block.size -= size;
        }

        Some(address)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn total(&self) -> Size {
        self.blocks.iter().map(|block| block.size).sum()
    }

    pub fn largest(&self) -> Size {
        self.blocks.iter().map(|block| block.size).max().unwrap_or(0)
    }

    pub fn as_slice(&self) -> &[FreeBlock] {
        &self.blocks
    }
}
