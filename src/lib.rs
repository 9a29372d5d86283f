// cmpbench - compression ratio and decompression throughput benchmark

pub mod bench;
pub mod cli;
pub mod codec;
pub mod config;
pub mod corpus;
pub mod error;
pub mod frame;
pub mod timefn;

pub const CMPBENCH_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the version string.
pub fn version_string() -> &'static str {
    CMPBENCH_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use bench::{run, Backend, BenchConfig, BenchResult, Measurement, Unit};
pub use corpus::Corpus;
pub use error::{BenchError, Result};
