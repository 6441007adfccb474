//! PGN-like transcripts for decoded games.
//!
//! A transcript is a five-tag header followed by a numbered move list, two
//! moves (black then white) per line.

use serde::Serialize;

/// Presentation switches for the move list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PgnOptions {
    /// Number lines 1, 2, 3... instead of by the ply of their first move
    /// (1, 3, 5...).
    pub line_index: bool,
    /// Append the result string after the last move line.
    pub add_result: bool,
}

/// A game ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgnGame {
    pub event: String,
    pub date: String,
    pub black_player: String,
    pub white_player: String,
    pub result: String,
    pub moves: Vec<String>,
    pub options: PgnOptions,
}

impl PgnGame {
    /// The tag block, without a trailing newline.
    pub fn header(&self) -> String {
        [
            format!("[Event \"{}\"]", self.event),
            format!("[Date \"{}\"]", self.date),
            format!("[Black \"{}\"]", self.black_player),
            format!("[White \"{}\"]", self.white_player),
            format!("[Result \"{}\"]", self.result),
        ]
        .join("\n")
    }

    /// The numbered move list. Every move line ends with a newline; the
    /// result, when requested, is appended without one.
    pub fn move_list(&self) -> String {
        let mut out = String::new();

        for (line, pair) in self.moves.chunks(2).enumerate() {
            out.push_str(&format!("{}. {}\n", self.line_label(line), pair.join(" ")));
        }

        if self.options.add_result {
            out.push_str(&self.result);
        }

        out
    }

    fn line_label(&self, line: usize) -> usize {
        if self.options.line_index {
            line + 1
        } else {
            2 * line + 1
        }
    }
}

impl std::fmt::Display for PgnGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.header(), self.move_list())
    }
}
