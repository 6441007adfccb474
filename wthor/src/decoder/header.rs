//! The 16-byte database header.

use serde::Serialize;

use crate::bytes::ByteReader;
use crate::error::{WthorError, WthorResult};

pub const HEADER_SIZE: usize = 16;

/// File creation date as four raw header bytes. Not validated as a calendar
/// date; it only ever gets displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreationDate {
    pub century: u8,
    pub year: u8,
    pub month: u8,
    pub day: u8,
}

impl std::fmt::Display for CreationDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}-{}-{}", self.century, self.year, self.month, self.day)
    }
}

/// Per-file metadata parsed from the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMetadata {
    pub creation_date: CreationDate,
    /// Number of game records (`n1`). Not guaranteed to match the file length.
    pub record_count: u32,
    /// Secondary count (`n2`), unused by the decoder.
    pub secondary_count: u16,
    pub year: u16,
    pub board_size: u8,
    pub variant_type: u8,
    pub depth: u8,
}

impl std::fmt::Display for FileMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sep = "=".repeat(28);
        writeln!(f, "{}", sep)?;
        writeln!(f, "    File creation date:   {}", self.creation_date)?;
        writeln!(f, "    Number of records n1: {}", self.record_count)?;
        writeln!(f, "    Number of records n2: {}", self.secondary_count)?;
        writeln!(f, "    Year:                 {}", self.year)?;
        writeln!(f, "    Size game board:      {}", self.board_size)?;
        writeln!(f, "    Type of parts:        {}", self.variant_type)?;
        writeln!(f, "    Depth:                {}", self.depth)?;
        write!(f, "{}", sep)
    }
}

/// Parse the header at the start of a database buffer.
pub fn decode_header(bytes: &[u8]) -> WthorResult<FileMetadata> {
    if bytes.len() < HEADER_SIZE {
        return Err(WthorError::TruncatedHeader {
            expected: HEADER_SIZE,
            actual: bytes.len(),
        });
    }

    let mut reader = ByteReader::new(&bytes[..HEADER_SIZE]);
    let date = reader.read_bytes(4)?;
    let creation_date = CreationDate {
        century: date[0],
        year: date[1],
        month: date[2],
        day: date[3],
    };
    let record_count = reader.read_u32()?;
    let secondary_count = reader.read_u16()?;
    let year = reader.read_u16()?;
    let board_size = reader.read_u8()?;
    let variant_type = reader.read_u8()?;
    let depth = reader.read_u8()?;
    // byte 15 is reserved
    reader.skip(1)?;

    Ok(FileMetadata {
        creation_date,
        record_count,
        secondary_count,
        year,
        board_size,
        variant_type,
        depth,
    })
}
