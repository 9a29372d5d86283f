//! Binary entry point for the `cmpbench` tool.
//!
//! # Control flow
//!
//! 1. clap parses the command line into [`Cli`]; usage errors exit 1.
//! 2. The corpus is loaded before anything is printed, so a bad path or an
//!    empty corpus leaves stdout untouched.
//! 3. Either the hidden `window-bench` child mode runs, the backend list is
//!    printed, or every selected backend is benchmarked in order.
//!
//! Any error is printed as `cmpbench: <error>` and exits 1.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use cmpbench::bench::{self, isolated, registry};
use cmpbench::cli::args::{Cli, Command};
use cmpbench::cli::constants::{set_display_level, PROGRAM_NAME};
use cmpbench::config::{DEFAULT_THRESHOLD, MEASURE_SECONDS};
use cmpbench::corpus::Corpus;
use cmpbench::displaylevel;

fn run(cli: Cli) -> anyhow::Result<()> {
    set_display_level(cli.display_level());

    if let Some(Command::WindowBench { threshold, seconds, ref files }) = cli.command {
        let corpus = Corpus::open(files).context("cannot load corpus")?;
        let window = seconds.unwrap_or(std::time::Duration::from_secs(MEASURE_SECONDS));
        let report = isolated::window_bench(&corpus, threshold, window)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{report}")?;
        stdout.flush()?;
        return Ok(());
    }

    let backends = registry::default_backends(cli.isolate);
    let mut stdout = io::stdout().lock();

    if cli.list {
        bench::list(&backends, &mut stdout)?;
        return Ok(());
    }

    let corpus = Corpus::open(&cli.files).context("cannot load corpus")?;
    displaylevel!(
        3,
        "*** {} v{}: {} ({} bytes), {:.2} s per backend, default threshold {} ***\n",
        PROGRAM_NAME,
        cmpbench::version_string(),
        corpus.label(),
        corpus.len(),
        cli.measure_window().as_secs_f64(),
        DEFAULT_THRESHOLD
    );

    let config = cli.bench_config();
    let rows = bench::run(&backends, &corpus, &config, &mut stdout)?;
    displaylevel!(3, "{rows} backends benchmarked\n");
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are reported on stdout and are not failures.
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            displaylevel!(1, "{PROGRAM_NAME}: {e:#}\n");
            ExitCode::FAILURE
        }
    }
}
