//! The benchmark input: one immutable byte buffer shared by every backend.

pub mod files;
pub mod synthetic;

use std::fs;
use std::path::{Path, PathBuf};

use xxhash_rust::xxh64::xxh64;

use crate::config::{REFERENCE_CORPUS_SEED, REFERENCE_CORPUS_SIZE};
use crate::error::{BenchError, Result};

/// Uncompressed benchmark input.
#[derive(Debug, Clone)]
pub struct Corpus {
    label: String,
    data: Vec<u8>,
    sources: Vec<PathBuf>,
}

impl Corpus {
    /// Wrap an in-memory buffer.
    pub fn from_bytes(label: impl Into<String>, data: Vec<u8>) -> Self {
        Corpus { label: label.into(), data, sources: Vec::new() }
    }

    /// The bundled reference corpus (prose and tabular text, fixed seed).
    pub fn reference() -> Self {
        Corpus::from_bytes(
            "reference corpus",
            synthetic::generate(REFERENCE_CORPUS_SIZE, REFERENCE_CORPUS_SEED),
        )
    }

    /// Read and concatenate every file reachable from `paths`.
    ///
    /// Directories are expanded recursively. An empty result is
    /// [`BenchError::NoData`].
    pub fn load(paths: &[PathBuf]) -> Result<Self> {
        let files = files::expand(paths).map_err(|e| BenchError::io("cannot list corpus", e))?;
        let mut data = Vec::new();
        for path in &files {
            let bytes = fs::read(path)
                .map_err(|e| BenchError::io(format!("cannot read {}", path.display()), e))?;
            data.extend_from_slice(&bytes);
        }
        if data.is_empty() {
            return Err(BenchError::NoData);
        }
        let label = match files.as_slice() {
            [one] => display_name(one),
            many => format!("{} files", many.len()),
        };
        Ok(Corpus { label, data, sources: files })
    }

    /// [`Corpus::load`] for a non-empty list, otherwise the reference corpus.
    pub fn open(paths: &[PathBuf]) -> Result<Self> {
        if paths.is_empty() {
            Ok(Corpus::reference())
        } else {
            Corpus::load(paths)
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Files the corpus was read from, empty for in-memory corpora.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// XXH64 (seed 0) of the corpus bytes.
    pub fn checksum(&self) -> u64 {
        xxh64(&self.data, 0)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
