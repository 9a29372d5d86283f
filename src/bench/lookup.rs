//! Executable resolution for external and isolated backends.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Resolve `program` the way a shell would: a name containing a path
/// separator is checked as given, anything else is searched for on `PATH`.
///
/// Returns `None` when nothing executable is found. Never fails.
pub fn find_program(program: &str) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }
    let as_path = Path::new(program);
    if as_path.components().count() > 1 {
        return is_executable(as_path).then(|| as_path.to_path_buf());
    }
    let path = env::var_os("PATH")?;
    env::split_paths(&path)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use nix::unistd::{access, AccessFlags};
    path.is_file() && access(path, AccessFlags::X_OK).is_ok()
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}

/// Path of the running executable, resolved once per process.
///
/// On Linux this reads `/proc/self/exe` so the answer survives the binary
/// being renamed on disk mid-run; elsewhere it falls back to
/// [`std::env::current_exe`].
pub fn self_exe() -> Option<&'static Path> {
    static SELF_EXE: OnceLock<Option<PathBuf>> = OnceLock::new();
    SELF_EXE
        .get_or_init(|| {
            #[cfg(target_os = "linux")]
            {
                if let Ok(path) = std::fs::read_link("/proc/self/exe") {
                    return Some(path);
                }
            }
            env::current_exe().ok()
        })
        .as_deref()
}
