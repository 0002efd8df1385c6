//! Perft: count leaf nodes of the legal move tree to a fixed depth.
//!
//! Node counts for well-known positions pin down every special rule at
//! once (castling, en passant, promotion, pins, checks).

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move};
use crate::move_generation::legal_move_generator::legal_moves;

pub fn perft(board: &Board, side: Color, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(board, side);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mv| perft(&board.with_move(mv), side.opposite(), depth - 1))
        .sum()
}

/// Per-root-move node counts, handy when diffing against another engine.
pub fn perft_divide(board: &Board, side: Color, depth: u8) -> Vec<(Move, u64)> {
    legal_moves(board, side)
        .into_iter()
        .map(|mv| {
            let nodes = perft(&board.with_move(mv), side.opposite(), depth.saturating_sub(1));
            (mv, nodes)
        })
        .collect()
}
