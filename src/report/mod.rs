/*!
 * Status Reporter
 * Renders operation outcomes and arena snapshots as text or JSON
 */

use crate::commands::{Outcome, Step};
use crate::core::config::ReportFormat;
use crate::core::errors::DriverResult;
use crate::memory::{ArenaSnapshot, ReleaseEffect};
use serde::Serialize;
use std::io::Write;

/// Write the report for one executed step
pub fn write_step<W: Write>(
    out: &mut W,
    format: ReportFormat,
    step: &Step,
    snapshot: ArenaSnapshot<'_>,
) -> DriverResult<()> {
    match format {
        ReportFormat::Text => {
            writeln!(out, "{}", describe(&step.outcome))?;
            write_status(out, snapshot)?;
        }
        ReportFormat::Json => {
            let report = StepReport {
                operation: step.operation.to_string(),
                ok: !step.outcome.is_failure(),
                message: describe(&step.outcome),
                moved_blocks: step.compaction.moved_blocks,
                arena: snapshot,
            };
            serde_json::to_writer(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Write the report produced once the input is exhausted
pub fn write_final<W: Write>(
    out: &mut W,
    format: ReportFormat,
    snapshot: ArenaSnapshot<'_>,
) -> DriverResult<()> {
    match format {
        ReportFormat::Text => {
            writeln!(out, "\nMemory status at the end\n")?;
            write_status(out, snapshot)?;
        }
        ReportFormat::Json => {
            serde_json::to_writer(&mut *out, &FinalReport { final_state: snapshot })?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Used blocks then free blocks, in list order
///
/// Alias rows name the block they share. An alias whose target has been
/// reclaimed keeps its last address and is marked `(released)`, since that
/// address may now belong to an unrelated block.
pub fn write_status<W: Write>(out: &mut W, snapshot: ArenaSnapshot<'_>) -> DriverResult<()> {
    writeln!(out, "Used Blocks:")?;
    for block in snapshot.used {
        match block.ref_count() {
            Some(count) => writeln!(
                out,
                "Address: {}, Size: {}, Reference Count: {}",
                block.start, block.size, count
            )?,
            None => {
                let target = snapshot
                    .alias_target(block)
                    .map_or("(released)", |target| target.name.as_str());
                writeln!(
                    out,
                    "Address: {}, Size: {}, Reference Count: -, Alias Of: {}",
                    block.start, block.size, target
                )?
            }
        }
    }

    writeln!(out, "\nFree Blocks:")?;
    for block in snapshot.free {
        writeln!(out, "Address: {}, Size: {}", block.start, block.size)?;
    }
    Ok(())
}

/// One-line human description of an outcome
pub fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Allocated { name, start, size } => format!(
            "Allocated memory at address {start} with size {size} for variable {name}"
        ),
        Outcome::Assigned { alias, target, .. } => {
            format!("Pointer {alias} to {target} is declared")
        }
        Outcome::Released(release) => {
            let detail = match release.effect {
                ReleaseEffect::Decremented { remaining } => {
                    format!("reference count now {remaining}")
                }
                ReleaseEffect::Reclaimed { start, size } => {
                    format!("{size} units at address {start} returned to free list")
                }
                ReleaseEffect::Detached => "alias target already reclaimed".to_string(),
            };
            format!("Deallocated memory for variable {} ({detail})", release.name)
        }
        Outcome::Compacted => "compacting...".to_string(),
        Outcome::Failed(err) => format!("Error: {err}"),
    }
}

#[derive(Serialize)]
struct StepReport<'a> {
    operation: String,
    ok: bool,
    message: String,
    moved_blocks: usize,
    arena: ArenaSnapshot<'a>,
}

#[derive(Serialize)]
struct FinalReport<'a> {
    final_state: ArenaSnapshot<'a>,
}
