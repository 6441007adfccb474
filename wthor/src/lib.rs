//! Decoding of WTHOR game databases.
//!
//! The crate is layered bottom-up: [`names`] loads the tournament and player
//! tables, [`decoder`] parses a database file into games, and [`pgn`] renders
//! a decoded game as a PGN-like transcript. Nothing here logs or reads global
//! configuration; recoverable anomalies come back as [`DecodeWarning`]s.

pub mod bytes;
pub mod decoder;
pub mod error;
pub mod moves;
pub mod names;
pub mod pgn;

pub use decoder::{
    decode_database, decode_header, CreationDate, DecodeWarning, DecodedDatabase, FileMetadata,
    GameRecord, PlayerSide, ThorGame, HEADER_SIZE, MOVE_FIELD_SIZE, RECORD_SIZE,
};
pub use error::{WthorError, WthorResult};
pub use moves::{column_letter, decode_move, try_decode_move};
pub use names::{NameKind, NameTable, NameTables};
pub use pgn::{PgnGame, PgnOptions};
