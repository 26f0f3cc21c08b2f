/*!
 * Runtime Configuration
 * Defaults, then environment, then command-line arguments
 *
 * Environment variables:
 * - ARENA_SIZE: arena capacity in units (default: 250)
 * - ARENA_INPUT: command file path (default: input.txt)
 * - ARENA_REPORT_JSON: emit status reports as JSON (default: false)
 */

use super::limits::{DEFAULT_ARENA_SIZE, DEFAULT_INPUT_PATH};
use super::types::Size;
use std::path::PathBuf;
use tracing::warn;

/// Output format for status reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Driver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaConfig {
    pub arena_size: Size,
    pub input_path: PathBuf,
    pub report_format: ReportFormat,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            arena_size: DEFAULT_ARENA_SIZE,
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            report_format: ReportFormat::Text,
        }
    }
}

impl ArenaConfig {
    /// Build the configuration from the process environment and arguments
    pub fn load() -> Self {
        Self::from_sources(|key| std::env::var(key).ok(), std::env::args().skip(1))
    }

    /// Build the configuration from an explicit variable lookup and argument list
    ///
    /// The first positional argument, when present, overrides `ARENA_INPUT`.
    pub fn from_sources<F, I>(lookup: F, args: I) -> Self
    where
        F: Fn(&str) -> Option<String>,
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("ARENA_SIZE") {
            match raw.trim().parse::<Size>() {
                Ok(size) if size > 0 => config.arena_size = size,
                _ => warn!(
                    value = %raw,
                    default = DEFAULT_ARENA_SIZE,
                    "Ignoring invalid ARENA_SIZE"
                ),
            }
        }

        if let Some(path) = lookup("ARENA_INPUT") {
            config.input_path = PathBuf::from(path);
        }

        if lookup("ARENA_REPORT_JSON").is_some_and(|v| is_truthy(&v)) {
            config.report_format = ReportFormat::Json;
        }

        if let Some(path) = args.into_iter().next() {
            config.input_path = PathBuf::from(path);
        }

        config
    }

    pub fn with_arena_size(mut self, arena_size: Size) -> Self {
        self.arena_size = arena_size;
        self
    }

    pub fn with_report_format(mut self, format: ReportFormat) -> Self {
        self.report_format = format;
        self
    }
}

pub(crate) fn is_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
