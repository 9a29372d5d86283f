// Integration tests for bench/report.rs - CSV rows
//
// Verifies:
//   - ratio = compressed / original, throughput = iterations × original / elapsed
//   - header and row formatting in both units

use std::time::Duration;

use cmpbench::bench::report::{write_header, write_result};
use cmpbench::bench::{BenchResult, Measurement, Unit};

fn result(name: &str, original: usize, compressed: usize, iterations: u64, secs: f64) -> BenchResult {
    BenchResult::new(
        name,
        original,
        compressed,
        Measurement { iterations, elapsed: Duration::from_secs_f64(secs) },
    )
}

#[test]
fn ratio_and_speed() {
    let r = result("zstd-9", 10_000_000, 2_500_000, 30, 3.0);
    assert!((r.ratio() - 0.25).abs() < 1e-12);
    assert!((r.throughput(Unit::MegaBytes) - 100.0).abs() < 1e-9);
}

#[test]
fn csv_rows() {
    let mut out = Vec::new();
    write_header(&mut out, Unit::MegaBytes).unwrap();
    write_result(&mut out, &result("a", 1000, 333, 1, 0.001), Unit::MegaBytes).unwrap();
    write_result(&mut out, &result("b", 1000, 1001, 2, 0.5), Unit::MegaBytes).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "name, compression ratio, decompression speed (MB/s)",
            "a, 0.3330, 1.00",
            "b, 1.0010, 0.00",
        ]
    );
}

#[test]
fn gib_rows() {
    let mut out = Vec::new();
    write_header(&mut out, Unit::GibiBytes).unwrap();
    write_result(&mut out, &result("g", 1 << 30, 1 << 29, 3, 2.0), Unit::GibiBytes).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "name, compression ratio, decompression speed (GiB/s)\ng, 0.5000, 1.50\n"
    );
}
