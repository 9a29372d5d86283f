// Integration tests for bench/feeder.rs - external tools over pipes
//
// Verifies (unix only, using cat / sh / head):
//   - a consuming tool is fed at least one full payload and the elapsed time
//     spans the measurement window
//   - a non-zero exit after end-of-input is ToolFailed
//   - a tool that stops reading turns the next write into FeedFailed
//   - an unknown program is a Spawn error
//   - compress_through captures stdout and checks the exit status

#![cfg(unix)]

use std::path::Path;
use std::time::Duration;

use cmpbench::bench::feeder::{compress_through, feed};
use cmpbench::bench::lookup::find_program;
use cmpbench::BenchError;

const NO_ARGS: &[&str] = &[];

fn tool(name: &str) -> std::path::PathBuf {
    find_program(name).unwrap_or_else(|| panic!("{name} not on PATH"))
}

#[test]
fn cat_consumes_payload_until_deadline() {
    let payload = vec![b'z'; 64 * 1024];
    let m = feed(&tool("cat"), NO_ARGS, &payload, Duration::from_millis(50)).unwrap();
    assert!(m.iterations >= 1);
    assert!(m.elapsed >= Duration::from_millis(50));
}

#[test]
fn zero_window_still_writes_once() {
    let m = feed(&tool("cat"), NO_ARGS, b"one copy", Duration::ZERO).unwrap();
    assert_eq!(m.iterations, 1);
}

#[test]
fn nonzero_exit_is_tool_failed() {
    let err = feed(
        &tool("sh"),
        &["-c", "cat >/dev/null; exit 3"],
        b"payload",
        Duration::from_millis(10),
    )
    .unwrap_err();
    match err {
        BenchError::ToolFailed { status, .. } => assert_eq!(status.code(), Some(3)),
        other => panic!("expected ToolFailed, got {other:?}"),
    }
}

#[test]
fn early_exit_breaks_the_pipe() {
    // head exits after 1 byte; the feeder keeps writing for a full second.
    let payload = vec![b'a'; 256 * 1024];
    let err = feed(&tool("head"), &["-c", "1"], &payload, Duration::from_secs(1)).unwrap_err();
    assert!(matches!(err, BenchError::FeedFailed { .. }), "got {err:?}");
}

#[test]
fn unknown_program_is_spawn_error() {
    let err = feed(Path::new("/nonexistent/cmpbench-tool"), NO_ARGS, b"x", Duration::ZERO)
        .unwrap_err();
    assert!(matches!(err, BenchError::Spawn { .. }));
}

#[test]
fn compress_through_captures_stdout() {
    let input = b"captured through a pipe\n".repeat(10_000);
    let out = compress_through(&tool("cat"), NO_ARGS, &input).unwrap();
    assert_eq!(out, input);
}

#[test]
fn compress_through_checks_exit_status() {
    let err = compress_through(&tool("sh"), &["-c", "cat; exit 1"], b"data").unwrap_err();
    assert!(matches!(err, BenchError::ToolFailed { .. }));
}
