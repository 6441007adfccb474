use thiserror::Error;

/// Which player a record field refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSide {
    Black,
    White,
}

impl PlayerSide {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
        }
    }
}

impl std::fmt::Display for PlayerSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Anomalies absorbed while decoding. None of them stops the decode; the
/// caller decides how to report them.
///
/// `game` is the 1-based position of the record in the file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    #[error("header announces {expected} records but only {decoded} fit in the file")]
    TruncatedRecords { expected: u32, decoded: usize },

    #[error("game {game}: unknown tournament id {id}")]
    UnresolvedTournament { game: usize, id: u16 },

    #[error("game {game}: unknown {side} player id {id}")]
    UnresolvedPlayer {
        game: usize,
        side: PlayerSide,
        id: u16,
    },

    #[error("game {game}: malformed move code {code} at ply {ply}")]
    MalformedMove { game: usize, ply: usize, code: u8 },
}
