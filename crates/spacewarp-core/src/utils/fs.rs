use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// List the entries of a directory, sorted by path.
///
/// `fs::read_dir` order is platform dependent; everything that walks mod
/// folders goes through here so scan and load order are reproducible.
pub fn sorted_entries<P: AsRef<Path>>(dir: P) -> io::Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        entries.push(entry?.path());
    }
    entries.sort();
    Ok(entries)
}

/// Final path component as an owned string (lossy for non UTF-8 names).
pub fn file_name_string(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Whether `path` has the given extension, ignoring ASCII case.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}
