// Integration tests for bench/deadline.rs - the deadline-bounded loop
//
// Verifies:
//   - an operation slower than the whole window still counts exactly one
//     iteration, and elapsed covers that call
//   - throughput computed from a one-iteration measurement is finite and
//     non-zero
//   - a shared Deadline bounds the loop from its creation, not from the call

use std::convert::Infallible;
use std::thread;
use std::time::Duration;

use cmpbench::bench::deadline::{run_until, run_until_deadline};
use cmpbench::bench::{BenchResult, Unit};
use cmpbench::timefn::Deadline;

#[test]
fn sleeping_op_reports_one_iteration() {
    let m = run_until(Duration::from_millis(20), || {
        thread::sleep(Duration::from_millis(60));
        Ok::<_, Infallible>(())
    })
    .unwrap();
    assert_eq!(m.iterations, 1);
    assert!(m.elapsed >= Duration::from_millis(60));

    let r = BenchResult::new("slow", 1_000_000, 10, m);
    let speed = r.throughput(Unit::MegaBytes);
    assert!(speed > 0.0 && speed.is_finite());
    // One MB in at least 60 ms.
    assert!(speed <= 1.0 / 0.060 + 1e-9);
}

#[test]
fn deadline_started_earlier_is_already_spent() {
    let deadline = Deadline::after(Duration::from_millis(10));
    thread::sleep(Duration::from_millis(15));
    let mut calls = 0u32;
    let m = run_until_deadline(&deadline, || {
        calls += 1;
        Ok::<_, Infallible>(())
    })
    .unwrap();
    assert_eq!(calls, 1);
    assert_eq!(m.iterations, 1);
    assert!(m.elapsed >= Duration::from_millis(15));
}

#[test]
fn iterations_match_calls() {
    let mut calls = 0u64;
    let m = run_until(Duration::from_millis(25), || {
        calls += 1;
        thread::sleep(Duration::from_millis(2));
        Ok::<_, Infallible>(())
    })
    .unwrap();
    assert_eq!(m.iterations, calls);
    assert!(calls >= 2);
}
