//! Pseudo-legal king steps and castling.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::leaper_attacks::king_attacks;
use crate::moves::slider_attacks::squares_between;

pub fn generate_king_moves(board: &Board, side: Color, out: &mut Vec<Move>) {
    let Some(from) = board.king_square(side) else {
        return;
    };

    for to in squares_of(king_attacks(from) & !board.occupancy(side)) {
        out.push(Move::new(from, to));
    }

    for kingside in [true, false] {
        if let Some(castle) = castling_move(board, side, kingside) {
            out.push(castle);
        }
    }
}

/// King and rook squares for one castling wing: (king_from, king_to, rook_from).
pub fn castling_squares(side: Color, kingside: bool) -> (Square, Square, Square) {
    match (side, kingside) {
        (Color::White, true) => (Square::E1, Square::G1, Square::H1),
        (Color::White, false) => (Square::E1, Square::C1, Square::A1),
        (Color::Black, true) => (Square::E8, Square::G8, Square::H8),
        (Color::Black, false) => (Square::E8, Square::C8, Square::A8),
    }
}

/// The castling move for one wing if every precondition holds: rights
/// intact, king and rook at home, nothing in between, and the king not
/// attacked on its start, transit, or destination square.
fn castling_move(board: &Board, side: Color, kingside: bool) -> Option<Move> {
    if !board.castling_rights.has(side, kingside) {
        return None;
    }

    let (king_from, king_to, rook_from) = castling_squares(side, kingside);
    if board.piece_at(king_from) != Some(Piece::new(PieceKind::King, side))
        || board.piece_at(rook_from) != Some(Piece::new(PieceKind::Rook, side))
    {
        return None;
    }

    if squares_between(king_from, rook_from) & board.occupancy_all() != 0 {
        return None;
    }

    let enemy = side.opposite();
    let king_path = squares_between(king_from, king_to) | king_from.bit() | king_to.bit();
    if squares_of(king_path).any(|sq| is_square_attacked(board, sq, enemy)) {
        return None;
    }

    Some(Move::new(king_from, king_to))
}
