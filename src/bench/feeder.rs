//! Driving external compressors over pipes.
//!
//! [`feed`] measures decompression by launching the tool once and writing the
//! compressed payload into its stdin over and over until the deadline. The
//! iteration count is the number of complete payload copies written, which
//! stands in for the number of copies decompressed. [`compress_through`] runs
//! the tool once to capture its compressed output.

use std::ffi::OsStr;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::Duration;

use super::deadline::{run_until_deadline, Measurement};
use crate::error::{BenchError, Result};
use crate::timefn::Deadline;

fn program_name(program: &Path) -> String {
    program.display().to_string()
}

fn spawn(mut cmd: Command, name: &str) -> Result<Child> {
    cmd.spawn().map_err(|source| BenchError::Spawn { program: name.to_owned(), source })
}

/// Take a piped handle out of `child`, reaping the child if it is missing.
fn take_pipe<T>(child: &mut Child, pipe: Option<T>, name: &str) -> Result<T> {
    match pipe {
        Some(p) => Ok(p),
        None => {
            let _ = child.kill();
            let _ = child.wait();
            Err(BenchError::FeedFailed {
                program: name.to_owned(),
                source: io::Error::other("pipe not captured"),
            })
        }
    }
}

/// Stream `payload` into `program args…` for `window`, then close its stdin
/// and wait for it.
///
/// The deadline is checked only after each complete write, so at least one
/// copy of `payload` is always written, even when the spawn alone outlasts
/// `window`.
///
/// Elapsed time runs from just before the spawn to the child's exit. A write
/// failure kills and reaps the child and is returned as
/// [`BenchError::FeedFailed`]; an unsuccessful exit is
/// [`BenchError::ToolFailed`].
pub fn feed<S: AsRef<OsStr>>(
    program: &Path,
    args: &[S],
    payload: &[u8],
    window: Duration,
) -> Result<Measurement> {
    let name = program_name(program);
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::inherit());

    let deadline = Deadline::after(window);
    let mut child = spawn(cmd, &name)?;
    let pipe = child.stdin.take();
    let mut stdin = take_pipe(&mut child, pipe, &name)?;

    let fed = run_until_deadline(&deadline, || stdin.write_all(payload));
    // Closing stdin is the end-of-input signal.
    drop(stdin);

    let fed = match fed {
        Ok(m) => m,
        Err(source) => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(BenchError::FeedFailed { program: name, source });
        }
    };

    let status = child
        .wait()
        .map_err(|source| BenchError::FeedFailed { program: name.clone(), source })?;
    let elapsed = deadline.elapsed();
    if !status.success() {
        return Err(BenchError::ToolFailed { program: name, status });
    }
    Ok(Measurement { iterations: fed.iterations, elapsed })
}

/// Run `program args… < input` and return everything it wrote to stdout.
///
/// Input is written from a scoped thread while stdout is drained, so tools
/// that interleave reading and writing cannot deadlock on a full pipe.
pub fn compress_through<S: AsRef<OsStr>>(program: &Path, args: &[S], input: &[u8]) -> Result<Vec<u8>> {
    let name = program_name(program);
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit());

    let mut child = spawn(cmd, &name)?;
    let pipe = child.stdin.take();
    let mut stdin = take_pipe(&mut child, pipe, &name)?;
    let pipe = child.stdout.take();
    let mut stdout = take_pipe(&mut child, pipe, &name)?;

    let (written, read) = thread::scope(|scope| {
        let writer = scope.spawn(move || {
            let r = stdin.write_all(input);
            drop(stdin);
            r
        });
        let mut out = Vec::new();
        let read = stdout.read_to_end(&mut out).map(|_| out);
        let written = writer
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
        (written, read)
    });

    let status = child
        .wait()
        .map_err(|source| BenchError::FeedFailed { program: name.clone(), source })?;
    if !status.success() {
        return Err(BenchError::ToolFailed { program: name, status });
    }
    written.map_err(|source| BenchError::FeedFailed { program: name.clone(), source })?;
    read.map_err(|source| BenchError::FeedFailed { program: name, source })
}
