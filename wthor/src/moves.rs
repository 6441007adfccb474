//! Move-code to coordinate conversion.
//!
//! A WTHOR move code is a single byte whose decimal rendering reads
//! `<row><column>`: 56 is row 5, column 6. Tokens put the column letter
//! first, so 56 becomes `F5`.

/// Letter for a 1-based column index, `None` outside `1..=8`.
pub fn column_letter(column: u8) -> Option<char> {
    (1..=8)
        .contains(&column)
        .then(|| char::from(b'A' + column - 1))
}

/// Convert a raw move code to its coordinate token, or `None` when the code
/// does not render as two decimal digits with a column in `1..=8`.
///
/// The row digit is copied verbatim.
pub fn try_decode_move(code: u8) -> Option<String> {
    let digits = code.to_string();
    let &[row, column] = digits.as_bytes() else {
        return None;
    };
    let letter = column_letter(column - b'0')?;
    Some(format!("{}{}", letter, char::from(row)))
}

/// Convert a raw move code to its coordinate token.
///
/// Malformed codes fall back to their raw decimal string so a single bad byte
/// never discards the rest of the game.
pub fn decode_move(code: u8) -> String {
    try_decode_move(code).unwrap_or_else(|| code.to_string())
}
