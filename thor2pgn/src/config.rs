//! Configuration for the thor2pgn converter.
//!
//! Every value has a compile-time default and, where it makes sense, an
//! environment variable override. Command-line flags take precedence over
//! both.

use std::path::PathBuf;

/// Default directory holding `WTHOR.TRN` and `WTHOR.JOU`.
const DEFAULT_DATA_DIR: &str = "../../wthor";

/// Extension of WTHOR database files, compared case-insensitively.
pub const WTB_EXTENSION: &str = "wtb";

/// Extension given to generated transcript files.
pub const PGN_EXTENSION: &str = "pgn";

/// Get the directory containing the name tables.
///
/// Priority:
/// 1. `THOR2PGN_DATA_DIR` env variable if set
/// 2. `../../wthor` as fallback
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("THOR2PGN_DATA_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from(DEFAULT_DATA_DIR)
}

/// Get the log file path, if logs should also go to a file.
///
/// Priority:
/// 1. `THOR2PGN_LOG_FILE` env variable if set and non-empty
/// 2. `None` (console only)
pub fn get_log_file() -> Option<PathBuf> {
    std::env::var("THOR2PGN_LOG_FILE")
        .ok()
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_data_dir() {
        let dir = get_data_dir();
        match std::env::var("THOR2PGN_DATA_DIR") {
            Ok(val) => assert_eq!(dir, PathBuf::from(val)),
            Err(_) => assert_eq!(dir, PathBuf::from(DEFAULT_DATA_DIR)),
        }
    }

    #[test]
    fn test_get_log_file() {
        let path = get_log_file();
        match std::env::var("THOR2PGN_LOG_FILE") {
            Ok(val) if !val.is_empty() => assert_eq!(path, Some(PathBuf::from(val))),
            _ => assert_eq!(path, None),
        }
    }

    #[test]
    fn test_extensions() {
        assert_eq!(WTB_EXTENSION, "wtb");
        assert_eq!(PGN_EXTENSION, "pgn");
    }
}
