// cli/constants.rs - program identity and the global display level

use std::sync::atomic::{AtomicU32, Ordering};

pub const PROGRAM_NAME: &str = "cmpbench";

/// Hidden subcommand an isolated backend re-executes the binary with.
pub const WINDOW_BENCH_COMMAND: &str = "window-bench";

// ── Display level ─────────────────────────────────────────────────────────────
//
// 0 = no output; 1 = errors only; 2 = normal progress (default);
// 3 = skips and timing detail; 4 = debug
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Print to stderr when the display level is at least `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
