//! CSV result rows.
//!
//! ```text
//! name, compression ratio, decompression speed (MB/s)
//! windowed_ans, 0.2731, 812.45
//! ```
//!
//! Every row is flushed as soon as it is written, so rows for backends that
//! completed survive a later fatal error.

use std::io::{self, Write};
use std::time::Duration;

use super::deadline::Measurement;

/// Throughput display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    /// 10^6 bytes per second.
    #[default]
    MegaBytes,
    /// 2^30 bytes per second.
    GibiBytes,
}

impl Unit {
    pub fn bytes_per_unit(self) -> f64 {
        match self {
            Unit::MegaBytes => 1e6,
            Unit::GibiBytes => (1u64 << 30) as f64,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Unit::MegaBytes => "MB/s",
            Unit::GibiBytes => "GiB/s",
        }
    }
}

/// One backend's outcome. Computed once, written once, then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchResult {
    pub name: String,
    pub original_size: usize,
    pub compressed_size: usize,
    pub measurement: Measurement,
}

impl BenchResult {
    pub fn new(
        name: impl Into<String>,
        original_size: usize,
        compressed_size: usize,
        measurement: Measurement,
    ) -> Self {
        BenchResult { name: name.into(), original_size, compressed_size, measurement }
    }

    /// `compressed / original`; lower is better. Zero for an empty original.
    pub fn ratio(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        self.compressed_size as f64 / self.original_size as f64
    }

    /// Original bytes reproduced per second, in `unit`.
    pub fn throughput(&self, unit: Unit) -> f64 {
        let elapsed = self.measurement.elapsed.max(Duration::from_nanos(1));
        let bytes = self.measurement.iterations as f64 * self.original_size as f64;
        bytes / elapsed.as_secs_f64() / unit.bytes_per_unit()
    }
}

pub fn write_header<W: Write>(out: &mut W, unit: Unit) -> io::Result<()> {
    writeln!(out, "name, compression ratio, decompression speed ({})", unit.label())?;
    out.flush()
}

pub fn write_result<W: Write>(out: &mut W, result: &BenchResult, unit: Unit) -> io::Result<()> {
    writeln!(
        out,
        "{}, {:.4}, {:.2}",
        result.name,
        result.ratio(),
        result.throughput(unit)
    )?;
    out.flush()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
