//! Game outcome, draw reasons, and the insufficient-material test.

use std::fmt;

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
    ThreefoldRepetition,
}

/// Outcome of a game. Terminal once it leaves `InProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    WhiteWins,
    BlackWins,
    Draw(DrawReason),
}

impl GameStatus {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    #[inline]
    pub const fn win_for(color: Color) -> Self {
        match color {
            Color::White => GameStatus::WhiteWins,
            Color::Black => GameStatus::BlackWins,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => f.write_str("in progress"),
            GameStatus::WhiteWins => f.write_str("white wins"),
            GameStatus::BlackWins => f.write_str("black wins"),
            GameStatus::Draw(DrawReason::Stalemate) => f.write_str("draw by stalemate"),
            GameStatus::Draw(DrawReason::FiftyMoveRule) => f.write_str("draw by fifty-move rule"),
            GameStatus::Draw(DrawReason::InsufficientMaterial) => {
                f.write_str("draw by insufficient material")
            }
            GameStatus::Draw(DrawReason::ThreefoldRepetition) => {
                f.write_str("draw by threefold repetition")
            }
        }
    }
}

/// True when neither side can possibly deliver mate.
///
/// Recognised sets: bare kings, a single minor piece against a bare king,
/// and any number of bishops (either side) all standing on one square colour.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut minors = 0usize;
    let mut knights = 0usize;
    let mut bishops_on_dark = 0usize;
    let mut bishops_on_light = 0usize;

    for (square, piece) in board.pieces() {
        match piece.kind {
            PieceKind::King => {}
            PieceKind::Knight => {
                minors += 1;
                knights += 1;
            }
            PieceKind::Bishop => {
                minors += 1;
                if square.is_dark() {
                    bishops_on_dark += 1;
                } else {
                    bishops_on_light += 1;
                }
            }
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
        }
    }

    if minors <= 1 {
        return true;
    }

    knights == 0 && (bishops_on_dark == 0 || bishops_on_light == 0)
}

#[cfg(test)]
mod tests {
    use super::is_insufficient_material;
    use crate::game_state::board::Board;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).expect("FEN should parse").0
    }

    #[test]
    fn bare_kings_and_single_minor_are_insufficient() {
        assert!(is_insufficient_material(&board("4k3/8/8/8/8/8/8/4K3 w - - 0 1")));
        assert!(is_insufficient_material(&board("4k3/8/8/8/8/8/8/4KB2 w - - 0 1")));
        assert!(is_insufficient_material(&board("4k3/8/8/8/8/8/8/4KN2 w - - 0 1")));
    }

    #[test]
    fn same_colored_bishops_are_insufficient() {
        // c1 and f8 are both dark squares.
        assert!(is_insufficient_material(&board("5b2/4k3/8/8/8/8/8/2B1K3 w - - 0 1")));
    }

    #[test]
    fn mating_material_is_sufficient() {
        assert!(!is_insufficient_material(&board("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1")));
        assert!(!is_insufficient_material(&board("4k3/8/8/8/8/8/8/R3K3 w - - 0 1")));
        assert!(!is_insufficient_material(&board("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1")));
        assert!(!is_insufficient_material(&board("4k3/8/8/8/8/8/8/2N1KN2 w - - 0 1")));
    }
}
