//! Runtime parameters for a benchmark session.
//!
//! [`BenchConfig`] holds verbosity, the measurement window, the throughput
//! unit and the backend-name filter. Its builder-style setters let the CLI
//! construct a configuration incrementally before handing it to
//! [`super::run`].

use std::time::Duration;

use regex::Regex;

use super::report::Unit;
use crate::config::MEASURE_SECONDS;

/// Runtime parameters controlling a single benchmark session.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Verbosity level: 0 = silent, 1 = errors, 2 = progress (default),
    /// 3 = skips and timing detail, 4 = debug.
    pub display_level: u32,

    /// Wall-clock length of each throughput measurement
    /// (default: [`MEASURE_SECONDS`]).
    pub measure_window: Duration,

    /// Throughput unit for the report.
    pub unit: Unit,

    /// Only backends whose name matches are run. `None` runs all of them.
    pub filter: Option<Regex>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            display_level: 2,
            measure_window: Duration::from_secs(MEASURE_SECONDS),
            unit: Unit::MegaBytes,
            filter: None,
        }
    }
}

impl BenchConfig {
    // ── Setters ───────────────────────────────────────────────────────────────

    /// Set the verbosity level for benchmark diagnostics.
    pub fn set_notification_level(&mut self, level: u32) -> &mut Self {
        self.display_level = level;
        self
    }

    /// Set how long each backend's decompression is measured.
    pub fn set_measure_window(&mut self, window: Duration) -> &mut Self {
        self.measure_window = window;
        self
    }

    pub fn set_unit(&mut self, unit: Unit) -> &mut Self {
        self.unit = unit;
        self
    }

    /// Restrict the run to backends whose name matches `filter`.
    pub fn set_filter(&mut self, filter: Option<Regex>) -> &mut Self {
        self.filter = filter;
        self
    }

    /// `true` when the backend `name` passes the filter.
    pub fn selects(&self, name: &str) -> bool {
        self.filter.as_ref().map_or(true, |re| re.is_match(name))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
