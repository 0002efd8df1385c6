//! Pseudo-legal pawn pushes, captures, promotions, and en passant.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

pub fn generate_pawn_moves(board: &Board, side: Color, out: &mut Vec<Move>) {
    let enemy_occ = board.occupancy(side.opposite());
    let dir = side.pawn_direction();

    for from in squares_of(board.bitboard(side, PieceKind::Pawn)) {
        if let Some(one) = from.offset(0, dir) {
            if board.is_empty(one) {
                push_pawn_move(from, one, side, out);

                if from.rank() == side.pawn_start_rank() {
                    if let Some(two) = one.offset(0, dir) {
                        if board.is_empty(two) {
                            out.push(Move::new(from, two));
                        }
                    }
                }
            }
        }

        for file_delta in [-1i8, 1i8] {
            let Some(to) = from.offset(file_delta, dir) else {
                continue;
            };

            if enemy_occ & to.bit() != 0 {
                push_pawn_move(from, to, side, out);
            } else if board.en_passant_square == Some(to)
                && can_capture_en_passant(board, side, from, to)
            {
                out.push(Move::new(from, to));
            }
        }
    }
}

/// The pawn that just double-pushed must stand beside the capturer.
fn can_capture_en_passant(board: &Board, side: Color, from: Square, to: Square) -> bool {
    Square::new(to.file(), from.rank())
        .and_then(|victim| board.piece_at(victim))
        .is_some_and(|piece| piece == Piece::new(PieceKind::Pawn, side.opposite()))
}

fn push_pawn_move(from: Square, to: Square, side: Color, out: &mut Vec<Move>) {
    if to.rank() == side.promotion_rank() {
        for kind in PROMOTION_KINDS {
            out.push(Move::with_promotion(from, to, kind));
        }
    } else {
        out.push(Move::new(from, to));
    }
}
