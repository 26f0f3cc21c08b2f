/*!
 * Refcount Arena Library
 * Reference-counted compacting arena driven by a textual command stream
 */

pub mod commands;
pub mod core;
pub mod driver;
pub mod memory;
pub mod monitoring;
pub mod report;

// Re-exports
pub use crate::core::{ArenaConfig, DriverError};
pub use commands::{parse_line, Operation, Outcome, Session};
pub use driver::{run, run_reader, RunSummary};
pub use memory::{Arena, ArenaError, ArenaResult, ArenaSnapshot, ArenaStats, Block, FreeBlock};
pub use monitoring::init_tracing;
