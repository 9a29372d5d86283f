//! Deadline-bounded repetition of a measured operation.
//!
//! The loop is do-while shaped: the operation always runs at least once,
//! even when that single call outlasts the whole window, and the deadline is
//! only checked between calls. Overshoot is therefore bounded by one call.

use std::time::Duration;

use crate::timefn::Deadline;

/// Completed iterations and the wall-clock time they took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub iterations: u64,
    pub elapsed: Duration,
}

/// Run `op` until `deadline` expires. Elapsed time is measured from the
/// deadline's start to the moment the loop exits.
///
/// The first error from `op` ends the loop and is returned as-is.
pub fn run_until_deadline<E, F>(deadline: &Deadline, mut op: F) -> Result<Measurement, E>
where
    F: FnMut() -> Result<(), E>,
{
    let mut iterations = 0u64;
    loop {
        op()?;
        iterations += 1;
        if deadline.expired() {
            break;
        }
    }
    Ok(Measurement { iterations, elapsed: deadline.elapsed() })
}

/// [`run_until_deadline`] with a deadline opened now.
pub fn run_until<E, F>(window: Duration, op: F) -> Result<Measurement, E>
where
    F: FnMut() -> Result<(), E>,
{
    run_until_deadline(&Deadline::after(window), op)
}
