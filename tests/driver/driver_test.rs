/*!
 * Driver Tests
 * Command files in, reports out
 */

use pretty_assertions::assert_eq;
use refcount_arena::core::config::ReportFormat;
use refcount_arena::{run, run_reader, ArenaConfig, DriverError, FreeBlock, RunSummary};
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

fn config_for(file: &NamedTempFile) -> ArenaConfig {
    ArenaConfig {
        input_path: file.path().to_path_buf(),
        ..ArenaConfig::default()
    }
}

#[test]
fn test_run_command_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "x allocate 100").unwrap();
    writeln!(file, "y allocate 200").unwrap();
    writeln!(file, "x resize 5").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "p = x").unwrap();
    writeln!(file, "x free").unwrap();
    writeln!(file, "COMPACT").unwrap();

    let mut out = Vec::new();
    let (summary, arena) = run(&config_for(&file), &mut out).unwrap();

    assert_eq!(
        summary,
        RunSummary {
            executed: 5,
            failed: 1,
            skipped: 2,
        }
    );
    assert_eq!(arena.used().len(), 2);
    assert_eq!(arena.free(), &[FreeBlock::new(100, 150)]);

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches("Used Blocks:").count(), 6);
    assert!(text.contains("Allocated memory at address 0 with size 100 for variable x"));
    assert!(text.contains("Error: Insufficient memory for allocation"));
    assert!(text.contains("Deallocated memory for variable x (reference count now 1)"));
    assert!(text.contains("compacting..."));
    assert!(text.contains("\nMemory status at the end\n"));
}

#[test]
fn test_missing_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = ArenaConfig {
        input_path: dir.path().join("absent.txt"),
        ..ArenaConfig::default()
    };

    let mut out = Vec::new();
    let err = run(&config, &mut out).unwrap_err();
    assert!(matches!(err, DriverError::Input { .. }));
    assert!(out.is_empty(), "no report may be written before the input opens");
}

#[test]
fn test_json_reports_one_object_per_line() {
    let input = Cursor::new("a allocate 10\nb = a\nb free\n");
    let config = ArenaConfig::default()
        .with_arena_size(40)
        .with_report_format(ReportFormat::Json);

    let mut out = Vec::new();
    run_reader(input, &config, &mut out).unwrap();

    let values: Vec<serde_json::Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(values.len(), 4);
    assert_eq!(values[1]["arena"]["used"][1]["kind"], "alias");
    assert_eq!(values[2]["message"], "Deallocated memory for variable b (reference count now 1)");
    assert_eq!(values[3]["final_state"]["capacity"], 40);
}

#[test]
fn test_empty_input_still_prints_final_report() {
    let config = ArenaConfig::default().with_arena_size(8);
    let mut out = Vec::new();

    let (summary, arena) = run_reader(Cursor::new(""), &config, &mut out).unwrap();
    assert_eq!(summary, RunSummary::default());
    assert_eq!(arena.free(), &[FreeBlock::new(0, 8)]);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "\nMemory status at the end\n\nUsed Blocks:\n\nFree Blocks:\nAddress: 0, Size: 8\n"
    );
}
