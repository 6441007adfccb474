//! Where transcripts go: the log, one `.pgn` per database, or one shared file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use wthor::PgnGame;

use crate::config::PGN_EXTENSION;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no file name in {}", .0.display())]
    NoFileName(PathBuf),
}

/// Destination selected by `--save-pgn`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    /// Flag absent: transcripts are logged.
    Log,
    /// Flag without a value: `<stem>.pgn` next to each database.
    SameDir,
    /// `<stem>.pgn` for each database inside this directory.
    Dir(PathBuf),
    /// Every game of the run in this one file.
    SingleFile(PathBuf),
}

impl SaveTarget {
    /// Interpret the `--save-pgn` argument. A value naming an existing
    /// directory, or ending in a path separator, selects [`SaveTarget::Dir`].
    pub fn from_arg(arg: Option<Option<PathBuf>>) -> Self {
        match arg {
            None => Self::Log,
            Some(None) => Self::SameDir,
            Some(Some(path)) if looks_like_dir(&path) => Self::Dir(path),
            Some(Some(path)) => Self::SingleFile(path),
        }
    }

    /// Output path for one database, for the per-file targets.
    pub fn pgn_path_for(&self, input: &Path) -> Result<Option<PathBuf>, OutputError> {
        match self {
            Self::Log | Self::SingleFile(_) => Ok(None),
            Self::SameDir => Ok(Some(input.with_extension(PGN_EXTENSION))),
            Self::Dir(dir) => {
                let stem = input
                    .file_stem()
                    .ok_or_else(|| OutputError::NoFileName(input.to_path_buf()))?;
                let mut name = stem.to_os_string();
                name.push(".");
                name.push(PGN_EXTENSION);
                Ok(Some(dir.join(name)))
            }
        }
    }
}

fn looks_like_dir(path: &Path) -> bool {
    path.is_dir()
        || path
            .as_os_str()
            .to_str()
            .is_some_and(|s| s.ends_with('/') || s.ends_with(std::path::MAIN_SEPARATOR))
}

/// A buffered transcript file. Parent directories are created on open.
pub struct PgnSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl PgnSink {
    pub fn create(path: &Path) -> Result<Self, OutputError> {
        let io_err = |source| OutputError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let file = File::create(path).map_err(io_err)?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one transcript followed by a newline.
    pub fn write_game(&mut self, game: &PgnGame) -> Result<(), OutputError> {
        writeln!(self.writer, "{}", game).map_err(|source| OutputError::Io {
            path: self.path.clone(),
            source,
        })
    }

    pub fn finish(mut self) -> Result<(), OutputError> {
        self.writer.flush().map_err(|source| OutputError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
