//! Bishop, rook, and queen moves. Rays stop at the first occupied square,
//! which is a legal target only when it holds an enemy piece.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::slider_attacks::{bishop_attacks, queen_attacks, rook_attacks};

pub fn generate_slider_moves(board: &Board, side: Color, out: &mut Vec<Move>) {
    let own_occ = board.occupancy(side);
    let occupancy = board.occupancy_all();

    let sliders: [(PieceKind, fn(Square, u64) -> u64); 3] = [
        (PieceKind::Bishop, bishop_attacks),
        (PieceKind::Rook, rook_attacks),
        (PieceKind::Queen, queen_attacks),
    ];

    for (kind, attacks) in sliders {
        for from in squares_of(board.bitboard(side, kind)) {
            for to in squares_of(attacks(from, occupancy) & !own_occ) {
                out.push(Move::new(from, to));
            }
        }
    }
}
