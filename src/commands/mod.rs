/*!
 * Commands Module
 * Parsing command lines and executing them against an arena
 */

pub mod parser;
pub mod session;

// Re-export for convenience
pub use parser::{parse_line, Operation};
pub use session::{Outcome, Session, Step};
