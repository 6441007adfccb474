//! Fixed-width name tables (`WTHOR.TRN` for tournaments, `WTHOR.JOU` for
//! players).
//!
//! Both files share one layout: a 16-byte header that is not interpreted,
//! followed by fixed-width, zero-padded records. A record's position in the
//! file is the ID that game records use to refer to it.

use std::path::Path;

use crate::error::{WthorError, WthorResult};

/// Size of the uninterpreted header in front of the records.
pub const TABLE_HEADER_SIZE: usize = 16;

/// The two kinds of name table shipped alongside a WTHOR archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    Tournaments,
    Players,
}

impl NameKind {
    pub fn record_width(self) -> usize {
        match self {
            Self::Tournaments => 26,
            Self::Players => 20,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Tournaments => "WTHOR.TRN",
            Self::Players => "WTHOR.JOU",
        }
    }
}

/// Ordered names, indexed by record position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    names: Vec<String>,
}

impl NameTable {
    /// Decode a table already held in memory.
    ///
    /// Trailing bytes that do not fill a whole record are ignored. Empty and
    /// all-zero records are kept as empty strings so IDs stay aligned.
    pub fn from_bytes(bytes: &[u8], record_width: usize) -> WthorResult<Self> {
        if record_width == 0 {
            return Err(WthorError::InvalidRecordWidth(record_width));
        }

        let body = bytes.get(TABLE_HEADER_SIZE..).unwrap_or_default();
        let names = body.chunks_exact(record_width).map(decode_name).collect();
        Ok(Self { names })
    }

    /// Read and decode a table file.
    pub fn load(path: &Path, record_width: usize) -> WthorResult<Self> {
        let bytes = std::fs::read(path).map_err(|source| WthorError::MissingResource {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes, record_width)
    }

    /// Load the canonical file for `kind` from `dir`.
    pub fn load_kind(dir: &Path, kind: NameKind) -> WthorResult<Self> {
        Self::load(&dir.join(kind.file_name()), kind.record_width())
    }

    pub fn get(&self, id: u16) -> Option<&str> {
        self.names.get(usize::from(id)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for NameTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Truncate at the first zero byte and widen each byte to the Unicode code
/// point of the same value (ISO-8859-1).
fn decode_name(record: &[u8]) -> String {
    let end = record.iter().position(|&b| b == 0).unwrap_or(record.len());
    record[..end].iter().copied().map(char::from).collect()
}

/// The tournament and player tables for one run. Loaded once and shared
/// read-only by every database decoded afterwards.
#[derive(Debug, Clone, Default)]
pub struct NameTables {
    pub tournaments: NameTable,
    pub players: NameTable,
}

impl NameTables {
    pub fn new(tournaments: NameTable, players: NameTable) -> Self {
        Self {
            tournaments,
            players,
        }
    }

    /// Load both tables from their canonical file names inside `dir`.
    pub fn load_from_dir(dir: &Path) -> WthorResult<Self> {
        Ok(Self {
            tournaments: NameTable::load_kind(dir, NameKind::Tournaments)?,
            players: NameTable::load_kind(dir, NameKind::Players)?,
        })
    }
}
