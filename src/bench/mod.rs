//! The benchmarking engine.
//!
//! [`run`] walks the declared backends in order. For each selected and
//! available one it compresses the corpus, measures decompression for the
//! configured window and writes one CSV row. Backends never run
//! concurrently, and the first failure ends the run; rows already written
//! stay written.
//!
//! - [`backend`]: the [`Backend`] trait and its in-process and external
//!   realizations.
//! - [`isolated`]: the in-process codec measured in a child copy of the binary.
//! - [`deadline`]: the deadline-bounded measurement loop.
//! - [`feeder`]: pipe plumbing for external tools.
//! - [`report`]: ratio and throughput arithmetic and the CSV rows.

pub mod backend;
pub mod config;
pub mod deadline;
pub mod feeder;
pub mod isolated;
pub mod lookup;
pub mod registry;
pub mod report;

pub use backend::{Backend, ExternalBackend, WindowedBackend};
pub use config::BenchConfig;
pub use deadline::Measurement;
pub use isolated::IsolatedBackend;
pub use report::{BenchResult, Unit};

use std::io::Write;

use crate::corpus::Corpus;
use crate::error::{BenchError, Result};

/// Benchmark every selected, available backend against `corpus`, writing the
/// header and one row per backend to `out`.
///
/// Returns the number of rows written.
pub fn run<W: Write>(
    backends: &[Box<dyn Backend>],
    corpus: &Corpus,
    config: &BenchConfig,
    out: &mut W,
) -> Result<usize> {
    #[cfg(feature = "realtime-priority")]
    {
        // SAFETY: setpriority(2) adjusts only the calling process's scheduling
        // priority; it has no memory-safety implications.
        unsafe {
            libc::setpriority(libc::PRIO_PROCESS, 0, -20);
        }
    }

    report::write_header(out, config.unit).map_err(|e| BenchError::io("cannot write report", e))?;

    let mut rows = 0;
    for backend in backends {
        let name = backend.name();
        if !config.selects(name) {
            continue;
        }
        if !backend.is_available() {
            if config.display_level >= 3 {
                eprintln!("skipping {name} (not available)");
            }
            continue;
        }
        if config.display_level >= 2 {
            eprintln!("benchmarking {name}...");
        }

        let compressed = backend.compress(corpus)?;
        let measurement = backend.measure(corpus, &compressed, config)?;
        if config.display_level >= 3 {
            eprintln!(
                "{name}: {} -> {} bytes, {} iterations in {:.3} s",
                corpus.len(),
                compressed.len(),
                measurement.iterations,
                measurement.elapsed.as_secs_f64()
            );
        }

        let result = BenchResult::new(name, corpus.len(), compressed.len(), measurement);
        report::write_result(out, &result, config.unit)
            .map_err(|e| BenchError::io("cannot write report", e))?;
        rows += 1;
    }
    Ok(rows)
}

/// Write one `name available|missing` line per backend.
pub fn list<W: Write>(backends: &[Box<dyn Backend>], out: &mut W) -> Result<()> {
    for backend in backends {
        let state = if backend.is_available() { "available" } else { "missing" };
        writeln!(out, "{} {state}", backend.name())
            .map_err(|e| BenchError::io("cannot write backend list", e))?;
    }
    out.flush().map_err(|e| BenchError::io("cannot write backend list", e))
}
