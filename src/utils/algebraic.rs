//! Square conversions between coordinates (`e4`) and [`Square`] values.

use crate::errors::ParseError;
use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to a square.
pub fn algebraic_to_square(text: &str) -> Result<Square, ParseError> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(ParseError::InvalidSquare(text.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ParseError::InvalidSquare(text.to_owned()));
    }

    Square::new(file - b'a', rank - b'1').ok_or_else(|| ParseError::InvalidSquare(text.to_owned()))
}

/// Convert a square to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}
