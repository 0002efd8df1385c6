//! Attack and check queries used to filter pseudo-legal moves.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::leaper_attacks::{king_attacks, knight_attacks, pawn_attacks};
use crate::moves::slider_attacks::{bishop_attacks, rook_attacks};

/// True if the king of `color` is attacked. A board without that king is
/// never in check.
#[inline]
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = board.king_square(color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

/// True if any piece of `attacker` attacks `square`.
///
/// Looks outward from the target with each piece's pattern, which finds the
/// same attackers as generating every enemy capture would.
pub fn is_square_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    // A pawn of `attacker` hits `square` iff a defender pawn on `square`
    // would hit the pawn's square.
    if pawn_attacks(attacker.opposite(), square) & board.bitboard(attacker, PieceKind::Pawn) != 0 {
        return true;
    }

    if knight_attacks(square) & board.bitboard(attacker, PieceKind::Knight) != 0 {
        return true;
    }

    if king_attacks(square) & board.bitboard(attacker, PieceKind::King) != 0 {
        return true;
    }

    let queens = board.bitboard(attacker, PieceKind::Queen);
    let occupancy = board.occupancy_all();

    let diagonal = board.bitboard(attacker, PieceKind::Bishop) | queens;
    if bishop_attacks(square, occupancy) & diagonal != 0 {
        return true;
    }

    let straight = board.bitboard(attacker, PieceKind::Rook) | queens;
    rook_attacks(square, occupancy) & straight != 0
}
