//! Command-line arguments.
//!
//! ```text
//! cmpbench [-v…|-q] [-f PATH]… [--filter REGEX] [-s SECONDS] [--gib] [--isolate] [--list]
//! cmpbench window-bench [--threshold T] [-s SECONDS] [-f PATH]…
//! ```
//!
//! `window-bench` is hidden: isolated backends re-execute the binary with it.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use regex::Regex;

use crate::bench::{BenchConfig, Unit};
use crate::config::{DEFAULT_THRESHOLD, ENV_MEASURE_SECONDS, MEASURE_SECONDS};

#[derive(Parser, Debug)]
#[command(name = "cmpbench", version)]
#[command(about = "Compression ratio and decompression speed of in-process and external codecs")]
pub struct Cli {
    /// More diagnostics on stderr (repeatable)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Errors only
    #[arg(short, long)]
    pub quiet: bool,

    /// Corpus file or directory (repeatable; default: bundled reference corpus)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Only run backends whose name matches
    #[arg(long, value_name = "REGEX", value_parser = parse_filter)]
    pub filter: Option<Regex>,

    /// Measurement window per backend
    #[arg(
        short,
        long,
        value_name = "SECONDS",
        env = ENV_MEASURE_SECONDS,
        value_parser = parse_seconds
    )]
    pub seconds: Option<Duration>,

    /// Report throughput in GiB/s instead of MB/s
    #[arg(long)]
    pub gib: bool,

    /// Measure the windowed codec in child processes
    #[arg(long)]
    pub isolate: bool,

    /// List backends and whether they are available, then exit
    #[arg(long)]
    pub list: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Benchmark the windowed codec once and print `<size> <iterations> <ns>`
    #[command(name = "window-bench", hide = true)]
    WindowBench {
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,

        #[arg(short, long, value_name = "SECONDS", value_parser = parse_seconds)]
        seconds: Option<Duration>,

        #[arg(short = 'f', long = "file", value_name = "PATH")]
        files: Vec<PathBuf>,
    },
}

fn parse_filter(s: &str) -> Result<Regex, String> {
    Regex::new(s).map_err(|e| e.to_string())
}

/// Non-negative, finite seconds; fractions allowed.
pub fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: f64 = s.trim().parse().map_err(|_| format!("not a number of seconds: {s:?}"))?;
    Duration::try_from_secs_f64(secs).map_err(|_| format!("invalid duration: {s:?}"))
}

impl Cli {
    /// 1 with `-q`, otherwise 2 plus one per `-v`, capped at 4.
    pub fn display_level(&self) -> u32 {
        if self.quiet {
            1
        } else {
            (2 + self.verbose as u32).min(4)
        }
    }

    pub fn measure_window(&self) -> Duration {
        self.seconds.unwrap_or(Duration::from_secs(MEASURE_SECONDS))
    }

    pub fn bench_config(&self) -> BenchConfig {
        let mut config = BenchConfig::default();
        config
            .set_notification_level(self.display_level())
            .set_measure_window(self.measure_window())
            .set_unit(if self.gib { Unit::GibiBytes } else { Unit::MegaBytes })
            .set_filter(self.filter.clone());
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cmpbench").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.display_level(), 2);
        assert!(cli.files.is_empty());
        assert!(cli.filter.is_none());
        assert!(cli.command.is_none());
        assert_eq!(cli.bench_config().unit, Unit::MegaBytes);
    }

    #[test]
    fn verbosity_is_capped() {
        assert_eq!(parse(&["-v"]).display_level(), 3);
        assert_eq!(parse(&["-vvvv"]).display_level(), 4);
        assert_eq!(parse(&["-q"]).display_level(), 1);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["cmpbench", "-q", "-v"]).is_err());
    }

    #[test]
    fn repeated_files_and_filter() {
        let cli = parse(&["-f", "a", "--file", "b", "--filter", "^zstd"]);
        assert_eq!(cli.files, vec![PathBuf::from("a"), PathBuf::from("b")]);
        let config = cli.bench_config();
        assert!(config.selects("zstd-1"));
        assert!(!config.selects("lz4-1"));
    }

    #[test]
    fn invalid_filter_is_rejected() {
        assert!(Cli::try_parse_from(["cmpbench", "--filter", "("]).is_err());
    }

    #[test]
    fn fractional_seconds() {
        assert_eq!(parse(&["-s", "0.25"]).measure_window(), Duration::from_millis(250));
        assert!(parse_seconds("-1").is_err());
        assert!(parse_seconds("soon").is_err());
        assert!(parse_seconds("inf").is_err());
    }

    #[test]
    fn window_bench_subcommand() {
        let cli = parse(&["window-bench", "--threshold", "0", "--seconds", "1", "-f", "x"]);
        match cli.command {
            Some(Command::WindowBench { threshold, seconds, files }) => {
                assert_eq!(threshold, 0.0);
                assert_eq!(seconds, Some(Duration::from_secs(1)));
                assert_eq!(files, vec![PathBuf::from("x")]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn window_bench_default_threshold() {
        match parse(&["window-bench"]).command {
            Some(Command::WindowBench { threshold, .. }) => assert_eq!(threshold, DEFAULT_THRESHOLD),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
