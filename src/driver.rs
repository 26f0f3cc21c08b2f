/*!
 * Command Driver
 * Reads a command file line by line and reports after every operation
 */

use crate::commands::{parse_line, Session};
use crate::core::config::ArenaConfig;
use crate::core::errors::{DriverError, DriverResult};
use crate::memory::Arena;
use crate::monitoring::operation_span;
use crate::report;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use tracing::{debug, info};

/// Totals for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub executed: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Open `config.input_path` and execute every line in it
///
/// Failing to open the file is the only fatal error and happens before any
/// operation runs.
pub fn run<W: Write>(config: &ArenaConfig, out: &mut W) -> DriverResult<(RunSummary, Arena)> {
    let file = File::open(&config.input_path).map_err(|source| DriverError::Input {
        path: config.input_path.clone(),
        source,
    })?;
    info!(path = %config.input_path.display(), "Reading commands");

    run_reader(BufReader::new(file), config, out)
}

/// Execute every line of `reader` against a fresh arena
pub fn run_reader<R: BufRead, W: Write>(
    reader: R,
    config: &ArenaConfig,
    out: &mut W,
) -> DriverResult<(RunSummary, Arena)> {
    let mut session = Session::with_capacity(config.arena_size);
    let mut summary = RunSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(DriverError::Read)?;
        let Some(operation) = parse_line(&line) else {
            if !line.trim().is_empty() {
                debug!(line = index + 1, text = %line, "Skipping unrecognized command");
            }
            summary.skipped += 1;
            continue;
        };

        let span = operation_span(index + 1, &operation);
        let _entered = span.enter();

        let step = session.execute(operation);
        report::write_step(out, config.report_format, &step, session.engine().snapshot())?;
    }

    report::write_final(out, config.report_format, session.engine().snapshot())?;
    out.flush()?;

    summary.executed = session.steps();
    summary.failed = session.failures();
    info!(
        executed = summary.executed,
        failed = summary.failed,
        skipped = summary.skipped,
        "Command stream exhausted"
    );

    Ok((summary, session.into_engine()))
}
