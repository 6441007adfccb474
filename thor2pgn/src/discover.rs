//! Input discovery: a single database file or every database in a directory.

use std::path::{Path, PathBuf};

use crate::config::WTB_EXTENSION;

#[derive(Debug, thiserror::Error)]
pub enum DiscoverError {
    #[error("not a WTHOR database or directory: {}", .0.display())]
    NotWthor(PathBuf),

    #[error("failed to list {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Whether `path` has a `.wtb` extension, in any case.
pub fn is_wthor_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(WTB_EXTENSION))
}

/// Resolve the `--file` argument into the list of databases to convert.
///
/// A directory yields its `.wtb` files (not recursive), sorted by path. A
/// `.wtb` path is returned as-is even if it does not exist yet; reading it
/// reports the problem per file.
pub fn collect_inputs(path: &Path) -> Result<Vec<PathBuf>, DiscoverError> {
    if path.is_dir() {
        let io_err = |source| DiscoverError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(path).map_err(io_err)? {
            let candidate = entry.map_err(io_err)?.path();
            if candidate.is_file() && is_wthor_file(&candidate) {
                files.push(candidate);
            }
        }
        files.sort();
        return Ok(files);
    }

    if is_wthor_file(path) {
        return Ok(vec![path.to_path_buf()]);
    }

    Err(DiscoverError::NotWthor(path.to_path_buf()))
}
