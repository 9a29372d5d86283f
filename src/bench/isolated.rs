//! The windowed codec measured in a fresh copy of this binary.
//!
//! The parent re-executes itself with the hidden `window-bench` subcommand.
//! The child compresses the same corpus, runs the decode loop and prints one
//! line:
//!
//! ```text
//! <compressed size> <iterations> <elapsed ns>
//! ```
//!
//! Measuring in a separate process keeps the parent's allocations and the
//! other backends' warm caches out of the timing.

use std::fmt;
use std::process::{Command, Stdio};
use std::str::FromStr;
use std::time::Duration;

use super::backend::Backend;
use super::config::BenchConfig;
use super::deadline::Measurement;
use super::lookup;
use crate::cli::constants::WINDOW_BENCH_COMMAND;
use crate::codec;
use crate::corpus::Corpus;
use crate::error::{BenchError, Result};
use crate::frame;
use crate::timefn::DurationNs;

/// What a `window-bench` child reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildReport {
    pub compressed_size: usize,
    pub measurement: Measurement,
}

impl fmt::Display for ChildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.compressed_size,
            self.measurement.iterations,
            self.measurement.elapsed.as_nanos()
        )
    }
}

impl FromStr for ChildReport {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        let mut fields = s.split_whitespace();
        let mut next = || fields.next().ok_or(());
        let compressed_size = next()?.parse().map_err(|_| ())?;
        let iterations = next()?.parse().map_err(|_| ())?;
        let nanos: DurationNs = next()?.parse().map_err(|_| ())?;
        if fields.next().is_some() {
            return Err(());
        }
        Ok(ChildReport {
            compressed_size,
            measurement: Measurement { iterations, elapsed: Duration::from_nanos(nanos) },
        })
    }
}

/// Parse a child's stdout: the last non-empty line carries the report.
pub fn parse_child_output(output: &str) -> Option<ChildReport> {
    output
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .and_then(|l| l.parse().ok())
}

/// Windowed codec measured by a `window-bench` child process.
#[derive(Debug, Clone)]
pub struct IsolatedBackend {
    name: String,
    threshold: f64,
}

impl IsolatedBackend {
    pub fn new(name: impl Into<String>, threshold: f64) -> Self {
        IsolatedBackend { name: name.into(), threshold }
    }

    fn child_command(&self, corpus: &Corpus, window: Duration) -> Result<Command> {
        let exe = lookup::self_exe().ok_or_else(|| BenchError::Spawn {
            program: WINDOW_BENCH_COMMAND.to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "own executable not found"),
        })?;
        let mut cmd = Command::new(exe);
        cmd.arg(WINDOW_BENCH_COMMAND)
            .arg("--threshold")
            .arg(self.threshold.to_string())
            .arg("--seconds")
            .arg(window.as_secs_f64().to_string());
        for path in corpus.sources() {
            cmd.arg("--file").arg(path);
        }
        cmd.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::inherit());
        Ok(cmd)
    }
}

impl Backend for IsolatedBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        lookup::self_exe().is_some() && codec::self_test()
    }

    fn compress(&self, corpus: &Corpus) -> Result<Vec<u8>> {
        Ok(frame::encode(corpus.as_bytes(), self.threshold))
    }

    fn measure(
        &self,
        corpus: &Corpus,
        compressed: &[u8],
        config: &BenchConfig,
    ) -> Result<Measurement> {
        let program = format!("{} {}", self.name, WINDOW_BENCH_COMMAND);
        let output = self
            .child_command(corpus, config.measure_window)?
            .output()
            .map_err(|source| BenchError::Spawn { program: program.clone(), source })?;
        if !output.status.success() {
            return Err(BenchError::ToolFailed { program, status: output.status });
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        match parse_child_output(&stdout) {
            Some(report) if report.compressed_size == compressed.len() => Ok(report.measurement),
            _ => Err(BenchError::ChildOutput { program, output: stdout.into_owned() }),
        }
    }
}

/// Child side of `window-bench`: compress, verify, time, report.
pub fn window_bench(corpus: &Corpus, threshold: f64, window: Duration) -> Result<ChildReport> {
    let compressed = frame::encode(corpus.as_bytes(), threshold);
    let measurement =
        super::backend::measure_windowed(WINDOW_BENCH_COMMAND, corpus, &compressed, window)?;
    Ok(ChildReport { compressed_size: compressed.len(), measurement })
}
