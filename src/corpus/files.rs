//! Expansion of corpus paths into a flat list of regular files.
//!
//! Directories are walked recursively with [`walkdir`]. Symlinks found during
//! the walk are never followed and never included; a symlink given directly
//! as an input is read like any other file.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Expand `inputs` into the regular files they name, in walk order.
///
/// Entries inside each directory are visited sorted by file name, so the
/// concatenated corpus is reproducible across runs and machines.
pub fn expand(inputs: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let mut result = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input).sort_by_file_name() {
                let entry = entry.map_err(walk_error)?;
                if entry.file_type().is_file() {
                    result.push(entry.into_path());
                }
            }
        } else {
            result.push(input.clone());
        }
    }
    Ok(result)
}

fn walk_error(e: walkdir::Error) -> io::Error {
    let path = e.path().map(Path::to_path_buf);
    match (e.into_io_error(), path) {
        (Some(io), Some(path)) => io::Error::new(io.kind(), format!("{}: {io}", path.display())),
        (Some(io), None) => io,
        (None, _) => io::Error::other("filesystem loop while walking corpus directory"),
    }
}
