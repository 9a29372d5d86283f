//! Backends: the compressors under test.
//!
//! Every backend answers the same four questions (name, availability,
//! compressed form of the corpus, decompression speed) behind the
//! [`Backend`] trait, so the runner never special-cases a tool.

use std::ffi::OsString;
use std::hint::black_box;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use super::config::BenchConfig;
use super::deadline::{run_until, Measurement};
use super::{feeder, lookup};
use crate::codec;
use crate::corpus::Corpus;
use crate::error::{BenchError, Result};
use crate::frame;

/// One compressor under benchmark.
pub trait Backend {
    /// Unique display name, also matched by `--filter`.
    fn name(&self) -> &str;

    /// Whether the backend can run here. Evaluated lazily and cached;
    /// absence is a normal answer, never an error.
    fn is_available(&self) -> bool;

    /// Compressed representation of the corpus.
    fn compress(&self, corpus: &Corpus) -> Result<Vec<u8>>;

    /// Measure decompression of `compressed` for `config.measure_window`.
    fn measure(&self, corpus: &Corpus, compressed: &[u8], config: &BenchConfig)
        -> Result<Measurement>;
}

// ── In-process windowed codec ─────────────────────────────────────────────────

/// The frame codec, called directly.
#[derive(Debug, Clone)]
pub struct WindowedBackend {
    name: String,
    threshold: f64,
}

impl WindowedBackend {
    pub fn new(name: impl Into<String>, threshold: f64) -> Self {
        WindowedBackend { name: name.into(), threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Decode `compressed` once and check it against the corpus, then decode it
/// repeatedly for `window`.
pub fn measure_windowed(
    name: &str,
    corpus: &Corpus,
    compressed: &[u8],
    window: Duration,
) -> Result<Measurement> {
    let mut scratch = Vec::with_capacity(corpus.len());
    frame::decode_into(compressed, &mut scratch)?;
    if xxhash_rust::xxh64::xxh64(&scratch, 0) != corpus.checksum() {
        return Err(BenchError::Verify { backend: name.to_owned() });
    }

    let m = run_until(window, || {
        frame::decode_into(compressed, &mut scratch)?;
        black_box(&scratch);
        Ok::<_, BenchError>(())
    })?;
    Ok(m)
}

impl Backend for WindowedBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        codec::self_test()
    }

    fn compress(&self, corpus: &Corpus) -> Result<Vec<u8>> {
        Ok(frame::encode(corpus.as_bytes(), self.threshold))
    }

    fn measure(
        &self,
        corpus: &Corpus,
        compressed: &[u8],
        config: &BenchConfig,
    ) -> Result<Measurement> {
        measure_windowed(&self.name, corpus, compressed, config.measure_window)
    }
}

// ── External command-line tool ────────────────────────────────────────────────

/// A compressor driven as `program args… < input > output`.
#[derive(Debug)]
pub struct ExternalBackend {
    name: String,
    program: String,
    compress_args: Vec<OsString>,
    decompress_args: Vec<OsString>,
    resolved: OnceLock<Option<PathBuf>>,
}

impl ExternalBackend {
    pub fn new<I, J, S, T>(
        name: impl Into<String>,
        program: impl Into<String>,
        compress_args: I,
        decompress_args: J,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<OsString>,
        T: Into<OsString>,
    {
        ExternalBackend {
            name: name.into(),
            program: program.into(),
            compress_args: compress_args.into_iter().map(Into::into).collect(),
            decompress_args: decompress_args.into_iter().map(Into::into).collect(),
            resolved: OnceLock::new(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Location of the program on `PATH`, looked up once.
    pub fn resolve(&self) -> Option<&Path> {
        self.resolved
            .get_or_init(|| lookup::find_program(&self.program))
            .as_deref()
    }

    fn require(&self) -> Result<&Path> {
        self.resolve().ok_or_else(|| BenchError::Spawn {
            program: self.program.clone(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found on PATH"),
        })
    }
}

impl Backend for ExternalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        self.resolve().is_some()
    }

    fn compress(&self, corpus: &Corpus) -> Result<Vec<u8>> {
        feeder::compress_through(self.require()?, &self.compress_args, corpus.as_bytes())
    }

    fn measure(
        &self,
        _corpus: &Corpus,
        compressed: &[u8],
        config: &BenchConfig,
    ) -> Result<Measurement> {
        feeder::feed(self.require()?, &self.decompress_args, compressed, config.measure_window)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
