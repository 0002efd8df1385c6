//! Long algebraic move text (`e2e4`, `e7e8q`) used at the UCI boundary.
//!
//! Parsing is purely syntactic; whether the move is legal is decided by the
//! move validator against a concrete board.

use crate::errors::ParseError;
use crate::game_state::chess_types::{Move, PieceKind};
use crate::utils::algebraic::algebraic_to_square;

pub fn long_algebraic_to_move(text: &str) -> Result<Move, ParseError> {
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ParseError::InvalidMove(text.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;

    let promotion = match text.as_bytes().get(4) {
        Some(&letter) => Some(char_to_promotion(letter as char)?),
        None => None,
    };

    Ok(Move {
        from,
        to,
        promotion,
    })
}

#[inline]
pub fn move_to_long_algebraic(mv: Move) -> String {
    mv.to_string()
}

/// Space-separated move list, as sent after `position startpos moves`.
pub fn moves_to_long_algebraic_list(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|mv| move_to_long_algebraic(*mv))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn char_to_promotion(ch: char) -> Result<PieceKind, ParseError> {
    match ch.to_ascii_lowercase() {
        'q' => Ok(PieceKind::Queen),
        'r' => Ok(PieceKind::Rook),
        'b' => Ok(PieceKind::Bishop),
        'n' => Ok(PieceKind::Knight),
        _ => Err(ParseError::InvalidPromotion(ch)),
    }
}
