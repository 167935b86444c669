//! Where pitwall looks for its settings file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Directories searched for a relative settings file, in priority order:
/// the working directory, the executable's directory, then the crate root.
fn search_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }
    let manifest_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    if manifest_root.exists() {
        roots.push(manifest_root);
    }
    roots.dedup();
    roots
}

/// First existing `root/file_name`, or the candidate under the first root when
/// none exists. `None` only when there are no roots at all.
fn first_existing(roots: &[PathBuf], file_name: &Path) -> Option<PathBuf> {
    roots
        .iter()
        .map(|root| root.join(file_name))
        .find(|candidate| candidate.exists())
        .or_else(|| roots.first().map(|root| root.join(file_name)))
}

/// Settings file location. A non-empty override (usually from the
/// environment) is used as given; otherwise `file_name` is looked up in the
/// search roots.
pub fn settings_file_path(override_path: Option<OsString>, file_name: &str) -> PathBuf {
    if let Some(path) = override_path.filter(|path| !path.is_empty()) {
        return PathBuf::from(path);
    }
    let file_name = Path::new(file_name);
    first_existing(&search_roots(), file_name).unwrap_or_else(|| file_name.to_path_buf())
}
