/*!
 * Error Types
 * Driver-level errors with thiserror and miette support
 */

use super::limits::{EXIT_INPUT_UNAVAILABLE, EXIT_RUN_FAILED};
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

// Re-export ArenaError from the memory module
pub use crate::memory::ArenaError;

/// Errors that abort the driver before any operation runs
#[derive(Error, Debug, Diagnostic)]
pub enum DriverError {
    #[error("Error opening command file {}", path.display())]
    #[diagnostic(
        code(driver::input_unavailable),
        help("Pass the command file as the first argument or set ARENA_INPUT.")
    )]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read command stream")]
    #[diagnostic(code(driver::read_failed))]
    Read(#[source] std::io::Error),

    #[error("Failed to write report")]
    #[diagnostic(code(driver::output_failed))]
    Output(#[from] std::io::Error),

    #[error("Failed to encode report as JSON")]
    #[diagnostic(code(driver::json_failed))]
    Json(#[from] serde_json::Error),
}

impl DriverError {
    /// Process exit status for this error
    ///
    /// An unopenable input is reported before any operation runs and gets its
    /// own status; anything failing mid-run gets the other.
    pub fn exit_code(&self) -> u8 {
        match self {
            DriverError::Input { .. } => EXIT_INPUT_UNAVAILABLE,
            DriverError::Read(_) | DriverError::Output(_) | DriverError::Json(_) => {
                EXIT_RUN_FAILED
            }
        }
    }
}

/// Driver result type
pub type DriverResult<T> = Result<T, DriverError>;
