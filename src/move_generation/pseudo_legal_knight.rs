//! Pseudo-legal knight jumps.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::leaper_attacks::knight_attacks;

pub fn generate_knight_moves(board: &Board, side: Color, out: &mut Vec<Move>) {
    let own_occ = board.occupancy(side);

    for from in squares_of(board.bitboard(side, PieceKind::Knight)) {
        for to in squares_of(knight_attacks(from) & !own_occ) {
            out.push(Move::new(from, to));
        }
    }
}
