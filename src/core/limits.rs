/*!
 * Arena Limits and Constants
 *
 * Centralized location for sizes, thresholds and defaults.
 */

// =============================================================================
// ARENA
// =============================================================================

/// Default simulated arena capacity in units
pub const DEFAULT_ARENA_SIZE: usize = 250;

/// Usage ratio at which pressure is reported as medium
pub const MEDIUM_PRESSURE_THRESHOLD: f64 = 0.60;

/// Usage ratio at which allocations log a pressure warning
pub const WARNING_PRESSURE_THRESHOLD: f64 = 0.80;

/// Usage ratio treated as critical
pub const CRITICAL_PRESSURE_THRESHOLD: f64 = 0.95;

// =============================================================================
// DRIVER
// =============================================================================

/// Command file read when neither the CLI nor `ARENA_INPUT` names one
pub const DEFAULT_INPUT_PATH: &str = "input.txt";

/// Process exit status when the command file cannot be opened
pub const EXIT_INPUT_UNAVAILABLE: u8 = 1;

/// Process exit status when reading input or writing reports fails mid-run
pub const EXIT_RUN_FAILED: u8 = 2;
