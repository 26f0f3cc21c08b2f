/*!
 * Memory Module
 * Reference-counted arena with first-fit allocation and compaction
 */

pub mod manager;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use manager::Arena;
pub use traits::*;
pub use types::*;
