//! WTHOR database decoding.
//!
//! A database file is a [`HEADER_SIZE`]-byte header followed by contiguous
//! [`RECORD_SIZE`]-byte game records. [`decode_database`] walks the records,
//! resolves IDs through the [`NameTables`] and collects anything odd as
//! [`DecodeWarning`]s instead of failing.

mod header;
mod record;
mod warning;

pub use header::{decode_header, CreationDate, FileMetadata, HEADER_SIZE};
pub use record::{GameRecord, MOVE_FIELD_SIZE, RECORD_SIZE};
pub use warning::{DecodeWarning, PlayerSide};

use crate::error::WthorResult;
use crate::moves::try_decode_move;
use crate::names::{NameTable, NameTables};
use crate::pgn::{PgnGame, PgnOptions};

/// Everything decoded from one database file.
#[derive(Debug, Clone)]
pub struct DecodedDatabase {
    pub metadata: FileMetadata,
    pub games: Vec<ThorGame>,
    pub warnings: Vec<DecodeWarning>,
}

/// A game with names resolved and moves in coordinate form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThorGame {
    pub record: GameRecord,
    /// `"{tournament} - {year}"`, or the bare tournament ID when unknown.
    pub tournament: String,
    pub black_player: String,
    pub white_player: String,
    pub moves: Vec<String>,
}

impl ThorGame {
    /// Resolve a raw record against the name tables.
    ///
    /// `game` is the 1-based record position used in warnings.
    pub fn resolve(
        game: usize,
        record: GameRecord,
        metadata: &FileMetadata,
        tables: &NameTables,
        warnings: &mut Vec<DecodeWarning>,
    ) -> Self {
        let tournament = match tables.tournaments.get(record.tournament_id) {
            Some(name) => format!("{} - {}", name, metadata.year),
            None => {
                warnings.push(DecodeWarning::UnresolvedTournament {
                    game,
                    id: record.tournament_id,
                });
                record.tournament_id.to_string()
            }
        };

        let black_player = resolve_player(
            &tables.players,
            game,
            PlayerSide::Black,
            record.black_id,
            warnings,
        );
        let white_player = resolve_player(
            &tables.players,
            game,
            PlayerSide::White,
            record.white_id,
            warnings,
        );

        let moves = record
            .moves
            .iter()
            .enumerate()
            .map(|(i, &code)| {
                try_decode_move(code).unwrap_or_else(|| {
                    warnings.push(DecodeWarning::MalformedMove {
                        game,
                        ply: i + 1,
                        code,
                    });
                    code.to_string()
                })
            })
            .collect();

        Self {
            record,
            tournament,
            black_player,
            white_player,
            moves,
        }
    }

    pub fn result(&self) -> String {
        self.record.result()
    }

    /// Build the transcript for this game. The date tag carries the
    /// database year.
    pub fn to_pgn(&self, metadata: &FileMetadata, options: PgnOptions) -> PgnGame {
        PgnGame {
            event: self.tournament.clone(),
            date: metadata.year.to_string(),
            black_player: self.black_player.clone(),
            white_player: self.white_player.clone(),
            result: self.result(),
            moves: self.moves.clone(),
            options,
        }
    }
}

impl std::fmt::Display for ThorGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sep = "=".repeat(40);
        writeln!(f, "{}", sep)?;
        writeln!(f, "    Tournament:        {}", self.tournament)?;
        writeln!(f, "    Black player:      {}", self.black_player)?;
        writeln!(f, "    White player:      {}", self.white_player)?;
        writeln!(f, "    Score:             {}", self.result())?;
        writeln!(f, "    Moves:             {}", self.moves.join(" "))?;
        write!(f, "{}", sep)
    }
}

fn resolve_player(
    players: &NameTable,
    game: usize,
    side: PlayerSide,
    id: u16,
    warnings: &mut Vec<DecodeWarning>,
) -> String {
    match players.get(id) {
        Some(name) => name.to_string(),
        None => {
            warnings.push(DecodeWarning::UnresolvedPlayer { game, side, id });
            id.to_string()
        }
    }
}

/// Decode a whole database buffer.
///
/// Only a missing header is an error. If the header announces more records
/// than the buffer holds, the complete ones are returned along with a
/// [`DecodeWarning::TruncatedRecords`].
pub fn decode_database(bytes: &[u8], tables: &NameTables) -> WthorResult<DecodedDatabase> {
    let metadata = decode_header(bytes)?;
    let expected = usize::try_from(metadata.record_count).unwrap_or(usize::MAX);

    let mut games = Vec::new();
    let mut warnings = Vec::new();

    for (index, slot) in bytes[HEADER_SIZE..]
        .chunks_exact(RECORD_SIZE)
        .take(expected)
        .enumerate()
    {
        let record = GameRecord::decode(slot)?;
        games.push(ThorGame::resolve(
            index + 1,
            record,
            &metadata,
            tables,
            &mut warnings,
        ));
    }

    if games.len() < expected {
        warnings.push(DecodeWarning::TruncatedRecords {
            expected: metadata.record_count,
            decoded: games.len(),
        });
    }

    Ok(DecodedDatabase {
        metadata,
        games,
        warnings,
    })
}
