//! The declared set of backends, in benchmark order.

use super::backend::{Backend, ExternalBackend, WindowedBackend};
use super::isolated::IsolatedBackend;
use crate::config::DEFAULT_THRESHOLD;

/// Windowed codec configurations: name and entropy threshold.
pub const WINDOWED: &[(&str, f64)] = &[("windowed_ans", DEFAULT_THRESHOLD), ("windowed_noans", 0.0)];

/// External tools: name, program, compression level.
pub const EXTERNAL: &[(&str, &str, u32)] = &[
    ("zstd-9", "zstd", 9),
    ("zstd-1", "zstd", 1),
    ("zstd-18", "zstd", 18),
    ("lz4-1", "lz4", 1),
    ("lz4-9", "lz4", 9),
];

/// A tool driven with `-q -<level> -c` to compress and `-q -d -c` to
/// decompress, the flags `zstd` and `lz4` share.
pub fn external(name: &str, program: &str, level: u32) -> ExternalBackend {
    ExternalBackend::new(
        name,
        program,
        ["-q".to_owned(), format!("-{level}"), "-c".to_owned()],
        ["-q", "-d", "-c"],
    )
}

/// Every backend in declaration order. With `isolate`, the windowed codec is
/// measured in child processes instead of in-process.
pub fn default_backends(isolate: bool) -> Vec<Box<dyn Backend>> {
    let mut backends: Vec<Box<dyn Backend>> = Vec::with_capacity(WINDOWED.len() + EXTERNAL.len());
    for &(name, threshold) in WINDOWED {
        if isolate {
            backends.push(Box::new(IsolatedBackend::new(name, threshold)));
        } else {
            backends.push(Box::new(WindowedBackend::new(name, threshold)));
        }
    }
    for &(name, program, level) in EXTERNAL {
        backends.push(Box::new(external(name, program, level)));
    }
    backends
}
