/*!
 * Refcount Arena - Main Entry Point
 *
 * Reads `<name> allocate <size>`, `<name> = <other>`, `<name> free` and
 * `compact` lines from the command file and prints the arena state after
 * each one.
 */

use std::io::{self, BufWriter};
use std::process::ExitCode;
use tracing::{error, info};

use refcount_arena::{init_tracing, run, ArenaConfig, DriverError};

fn main() -> ExitCode {
    init_tracing();

    let config = ArenaConfig::load();
    info!(
        arena_size = config.arena_size,
        input = %config.input_path.display(),
        format = ?config.report_format,
        "Arena simulator starting"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match run(&config, &mut out) {
        Ok((summary, _)) => {
            info!(
                executed = summary.executed,
                failed = summary.failed,
                "Arena simulator finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            match &err {
                DriverError::Input { .. } => error!(error = %err, "Cannot start"),
                _ => error!(error = %err, "Run aborted"),
            }
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::from(code)
        }
    }
}
