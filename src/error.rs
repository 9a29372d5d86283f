//! Error type shared by corpus loading and the benchmark engine.

use core::fmt;
use std::io;
use std::process::ExitStatus;

use crate::frame::FrameError;

/// Every failure the engine can report. None of them is retried.
#[derive(Debug)]
pub enum BenchError {
    /// I/O on a corpus file or the report stream.
    Io { context: String, source: io::Error },
    /// The selected corpus holds zero bytes.
    NoData,
    /// The windowed codec rejected its own output.
    Frame(FrameError),
    /// Decoded output does not reproduce the corpus.
    Verify { backend: String },
    /// An external program could not be started.
    Spawn { program: String, source: io::Error },
    /// Writing to or reading from an external program's pipe failed.
    FeedFailed { program: String, source: io::Error },
    /// An external program exited unsuccessfully.
    ToolFailed { program: String, status: ExitStatus },
    /// A child benchmark printed something unparseable.
    ChildOutput { program: String, output: String },
}

impl BenchError {
    /// Wrap an I/O error with a short description of what was being done.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        BenchError::Io { context: context.into(), source }
    }
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::Io { context, .. } => f.write_str(context),
            BenchError::NoData => f.write_str("no data to bench"),
            BenchError::Frame(e) => write!(f, "{e}"),
            BenchError::Verify { backend } => {
                write!(f, "{backend}: decompressed output does not match the corpus")
            }
            BenchError::Spawn { program, .. } => write!(f, "cannot start {program}"),
            BenchError::FeedFailed { program, .. } => write!(f, "pipe to {program} failed"),
            BenchError::ToolFailed { program, status } => write!(f, "{program} failed: {status}"),
            BenchError::ChildOutput { program, output } => {
                write!(f, "unexpected output from {program}: {:?}", output.trim())
            }
        }
    }
}

impl std::error::Error for BenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BenchError::Io { source, .. }
            | BenchError::Spawn { source, .. }
            | BenchError::FeedFailed { source, .. } => Some(source),
            // The frame error's text is already ours; expose its cause.
            BenchError::Frame(e) => e.source(),
            _ => None,
        }
    }
}

impl From<FrameError> for BenchError {
    fn from(e: FrameError) -> Self {
        BenchError::Frame(e)
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;
