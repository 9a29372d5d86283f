// Integration tests for bench::run and bench::list
//
// Verifies:
//   - backends run in declaration order, one row each
//   - unavailable backends produce no row and do not fail the run
//   - the name filter restricts the run
//   - the first failing backend stops the run; earlier rows stay in the output
//   - a missing external tool next to the in-process codec still completes

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use cmpbench::bench::{self, Backend, BenchConfig, ExternalBackend, Measurement, WindowedBackend};
use cmpbench::corpus::Corpus;
use cmpbench::{BenchError, Result};
use regex::Regex;

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

struct Fake {
    name: &'static str,
    available: bool,
    fail: bool,
    compressed: Rc<Cell<u32>>,
}

impl Fake {
    fn new(name: &'static str) -> Self {
        Fake { name, available: true, fail: false, compressed: Rc::new(Cell::new(0)) }
    }

    fn missing(mut self) -> Self {
        self.available = false;
        self
    }

    fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl Backend for Fake {
    fn name(&self) -> &str {
        self.name
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn compress(&self, corpus: &Corpus) -> Result<Vec<u8>> {
        self.compressed.set(self.compressed.get() + 1);
        Ok(vec![0; corpus.len() / 2])
    }

    fn measure(&self, _: &Corpus, _: &[u8], _: &BenchConfig) -> Result<Measurement> {
        if self.fail {
            return Err(BenchError::ChildOutput {
                program: self.name.to_owned(),
                output: "boom".to_owned(),
            });
        }
        Ok(Measurement { iterations: 4, elapsed: Duration::from_secs(2) })
    }
}

fn corpus() -> Corpus {
    Corpus::from_bytes("test", vec![b'k'; 1_000_000])
}

fn quiet() -> BenchConfig {
    let mut config = BenchConfig::default();
    config
        .set_notification_level(0)
        .set_measure_window(Duration::from_millis(10));
    config
}

fn boxed(fakes: Vec<Fake>) -> Vec<Box<dyn Backend>> {
    fakes.into_iter().map(|f| Box::new(f) as Box<dyn Backend>).collect()
}

fn lines(out: &[u8]) -> Vec<String> {
    String::from_utf8(out.to_vec()).unwrap().lines().map(str::to_owned).collect()
}

const HEADER: &str = "name, compression ratio, decompression speed (MB/s)";

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn rows_follow_declaration_order() {
    let backends = boxed(vec![Fake::new("b"), Fake::new("a"), Fake::new("c")]);
    let mut out = Vec::new();
    let rows = bench::run(&backends, &corpus(), &quiet(), &mut out).unwrap();
    assert_eq!(rows, 3);
    assert_eq!(
        lines(&out),
        [HEADER, "b, 0.5000, 2.00", "a, 0.5000, 2.00", "c, 0.5000, 2.00"]
    );
}

#[test]
fn unavailable_backend_is_skipped() {
    let backends = boxed(vec![Fake::new("one"), Fake::new("gone").missing(), Fake::new("two")]);
    let mut out = Vec::new();
    let rows = bench::run(&backends, &corpus(), &quiet(), &mut out).unwrap();
    assert_eq!(rows, 2);
    let text = lines(&out);
    assert_eq!(text.len(), 3);
    assert!(text.iter().all(|l| !l.starts_with("gone")));
}

#[test]
fn filter_restricts_run() {
    let backends = boxed(vec![Fake::new("zstd-1"), Fake::new("lz4-1"), Fake::new("zstd-9")]);
    let mut config = quiet();
    config.set_filter(Some(Regex::new("^zstd").unwrap()));
    let mut out = Vec::new();
    let rows = bench::run(&backends, &corpus(), &config, &mut out).unwrap();
    assert_eq!(rows, 2);
    assert_eq!(lines(&out)[1..], ["zstd-1, 0.5000, 2.00", "zstd-9, 0.5000, 2.00"]);
}

#[test]
fn first_failure_stops_the_run() {
    let never = Fake::new("never");
    let never_compressed = Rc::clone(&never.compressed);
    let backends = boxed(vec![Fake::new("first"), Fake::new("broken").failing(), never]);
    let mut out = Vec::new();
    let err = bench::run(&backends, &corpus(), &quiet(), &mut out).unwrap_err();
    assert!(matches!(err, BenchError::ChildOutput { ref program, .. } if program == "broken"));
    assert_eq!(lines(&out), [HEADER, "first, 0.5000, 2.00"]);
    assert_eq!(never_compressed.get(), 0);
}

#[test]
fn missing_tool_does_not_fail_the_run() {
    let backends: Vec<Box<dyn Backend>> = vec![
        Box::new(WindowedBackend::new("windowed_ans", 1.0)),
        Box::new(ExternalBackend::new(
            "ghost-1",
            "cmpbench-no-such-tool-4b1d",
            ["-1", "-c"],
            ["-d", "-c"],
        )),
        Box::new(WindowedBackend::new("windowed_noans", 0.0)),
    ];
    let corpus = Corpus::from_bytes("text", b"a missing tool is not an error. ".repeat(4000));
    let mut out = Vec::new();
    let rows = bench::run(&backends, &corpus, &quiet(), &mut out).unwrap();
    assert_eq!(rows, 2);
    let text = lines(&out);
    assert!(text[1].starts_with("windowed_ans, "));
    assert!(text[2].starts_with("windowed_noans, "));
}

#[test]
fn list_reports_availability() {
    let backends = boxed(vec![Fake::new("here"), Fake::new("away").missing()]);
    let mut out = Vec::new();
    bench::list(&backends, &mut out).unwrap();
    assert_eq!(lines(&out), ["here available", "away missing"]);
}
