// config.rs - Compile-time configuration constants.
//
// Runtime knobs (verbosity, measurement window, output unit, backend filter)
// live in `bench::config::BenchConfig`; the values here are the defaults and
// the hard format limits they are checked against.

pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;

// Largest slice of the payload compressed as one independent window.
pub const WINDOW_SIZE: usize = 256 * KB;

// Default entropy-coding threshold for the windowed codec.
// Can be overridden per backend, or by `--threshold` in the `window-bench`
// subcommand.
pub const DEFAULT_THRESHOLD: f64 = 1.0;

// Wall-clock length of one throughput measurement.
// Can be overridden by the CMPBENCH_SECONDS environment variable,
// or by the -s command-line flag.
pub const MEASURE_SECONDS: u64 = 3;

// Size of the bundled reference corpus (10 MiB).
pub const REFERENCE_CORPUS_SIZE: usize = 10 * MB;

// Seed of the reference corpus generator. Parent and self-exec children must
// agree on it so both sides benchmark identical bytes.
pub const REFERENCE_CORPUS_SEED: u32 = 0x5eed_c0de;

// Environment variable consulted for the measurement window.
pub const ENV_MEASURE_SECONDS: &str = "CMPBENCH_SECONDS";
