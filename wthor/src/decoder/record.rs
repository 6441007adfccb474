//! Fixed 68-byte game records.

use crate::bytes::ByteReader;
use crate::error::WthorResult;

pub const RECORD_SIZE: usize = 68;

/// Width of the move field. Some historical readers stop at 59 bytes; the
/// archives are written with 60 and existing decoders read all 60, so this
/// must not change.
pub const MOVE_FIELD_SIZE: usize = 60;

/// Total score of a finished game; white's score is derived from it.
const TOTAL_DISCS: i16 = 64;

/// One raw game record, IDs not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub tournament_id: u16,
    pub black_id: u16,
    pub white_id: u16,
    pub black_score: u8,
    /// Theoretical (perfect-play) score stored next to the real one.
    pub theoretical_score: u8,
    /// Raw move codes in play order, padding stripped.
    pub moves: Vec<u8>,
}

impl GameRecord {
    /// Decode a single record slot.
    pub fn decode(slot: &[u8]) -> WthorResult<Self> {
        let mut reader = ByteReader::new(slot);
        let tournament_id = reader.read_u16()?;
        let black_id = reader.read_u16()?;
        let white_id = reader.read_u16()?;
        let black_score = reader.read_u8()?;
        let theoretical_score = reader.read_u8()?;
        let field = reader.read_bytes(MOVE_FIELD_SIZE)?;

        // First zero byte ends the game
        let moves = field.iter().copied().take_while(|&code| code != 0).collect();

        Ok(Self {
            tournament_id,
            black_id,
            white_id,
            black_score,
            theoretical_score,
            moves,
        })
    }

    /// `64 - black_score`. Signed because damaged records can store a black
    /// score above 64.
    pub fn white_score(&self) -> i16 {
        TOTAL_DISCS - i16::from(self.black_score)
    }

    /// Result string in `"{black}-{white}"` form.
    pub fn result(&self) -> String {
        format!("{}-{}", self.black_score, self.white_score())
    }
}
