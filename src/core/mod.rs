/*!
 * Core Module
 * Fundamental types, limits, configuration and driver errors
 */

pub mod config;
pub mod errors;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use config::ArenaConfig;
pub use errors::*;
pub use types::*;
