//! Full legal move generation pipeline.
//!
//! Collects piece-wise pseudo-legal moves, then plays each on a scratch
//! board and drops those that leave the mover's own king in check. This is
//! the legality oracle every move acceptance path goes through.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::pseudo_legal_king::generate_king_moves;
use crate::move_generation::pseudo_legal_knight::generate_knight_moves;
use crate::move_generation::pseudo_legal_pawn::generate_pawn_moves;
use crate::move_generation::pseudo_legal_sliders::generate_slider_moves;

/// Every move obeying piece movement patterns; may leave own king in check.
pub fn pseudo_legal_moves(board: &Board, side: Color) -> Vec<Move> {
    let mut pseudo = Vec::with_capacity(64);

    generate_pawn_moves(board, side, &mut pseudo);
    generate_knight_moves(board, side, &mut pseudo);
    generate_slider_moves(board, side, &mut pseudo);
    generate_king_moves(board, side, &mut pseudo);

    pseudo
}

pub fn legal_moves(board: &Board, side: Color) -> Vec<Move> {
    pseudo_legal_moves(board, side)
        .into_iter()
        .filter(|mv| !leaves_king_in_check(board, side, *mv))
        .collect()
}

#[inline]
pub fn has_legal_move(board: &Board, side: Color) -> bool {
    pseudo_legal_moves(board, side)
        .into_iter()
        .any(|mv| !leaves_king_in_check(board, side, mv))
}

#[inline]
pub(crate) fn leaves_king_in_check(board: &Board, side: Color, mv: Move) -> bool {
    is_in_check(&board.with_move(mv), side)
}

#[cfg(test)]
mod tests {
    use super::{has_legal_move, legal_moves, pseudo_legal_moves};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::*;
    use crate::move_generation::legal_move_checks::is_in_check;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    fn mv(text: &str) -> Move {
        long_algebraic_to_move(text).expect("test move should parse")
    }

    fn position(fen: &str) -> (Board, Color) {
        Board::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn start_position_has_twenty_moves_for_white() {
        let board = Board::starting_position();
        let moves = legal_moves(&board, Color::White);
        assert_eq!(moves.len(), 20);

        let pawn_moves = moves
            .iter()
            .filter(|m| board.piece_at(m.from).map(|p| p.kind) == Some(PieceKind::Pawn))
            .count();
        assert_eq!(pawn_moves, 16);
        assert_eq!(moves.len() - pawn_moves, 4);
    }

    #[test]
    fn castling_requires_rights_empty_path_and_safe_squares() {
        let (board, side) = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let moves = legal_moves(&board, side);
        assert!(moves.contains(&mv("e1g1")));
        assert!(moves.contains(&mv("e1c1")));

        // Black rook on f8 covers f1: no kingside castling through it.
        let (board, side) = position("r3kr2/8/8/8/8/8/8/R3K2R w KQq - 0 1");
        let moves = legal_moves(&board, side);
        assert!(!moves.contains(&mv("e1g1")));
        assert!(moves.contains(&mv("e1c1")));

        // Knight on b1 blocks the queenside path.
        let (board, side) = position("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1");
        assert!(!legal_moves(&board, side).contains(&mv("e1c1")));

        // No castling out of check.
        let (board, side) = position("r3k2r/8/8/8/8/8/4r3/R3K2R w KQkq - 0 1");
        let moves = legal_moves(&board, side);
        assert!(!moves.contains(&mv("e1g1")));
        assert!(!moves.contains(&mv("e1c1")));
    }

    #[test]
    fn queenside_castling_ignores_attack_on_b_file_square() {
        // b1 is attacked but the king never crosses it.
        let (board, side) = position("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(legal_moves(&board, side).contains(&mv("e1c1")));
    }

    #[test]
    fn en_passant_generated_only_right_after_double_push() {
        let (board, side) = position("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert!(legal_moves(&board, side).contains(&mv("e5d6")));

        let (board, side) = position("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1");
        assert!(!legal_moves(&board, side).contains(&mv("e5d6")));
    }

    #[test]
    fn en_passant_that_exposes_king_is_filtered() {
        // Capturing would clear the fifth rank between the rook and king.
        let (board, side) = position("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
        assert!(pseudo_legal_moves(&board, side).contains(&mv("e5d6")));
        assert!(!legal_moves(&board, side).contains(&mv("e5d6")));
    }

    #[test]
    fn promotions_expand_to_four_kinds() {
        let (board, side) = position("8/P7/8/8/8/8/8/k6K w - - 0 1");
        let promos: Vec<Move> = legal_moves(&board, side)
            .into_iter()
            .filter(|m| m.from == mv("a7a8").from)
            .collect();
        assert_eq!(promos.len(), 4);
        assert!(promos.iter().all(|m| m.promotion.is_some()));
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let (board, side) = position("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        let moves = legal_moves(&board, side);
        assert!(moves.iter().all(|m| m.from != mv("e2e2").from));
    }

    #[test]
    fn checkmate_and_stalemate_have_no_moves() {
        let (mate, side) = position("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1");
        assert!(!has_legal_move(&mate, side));
        assert!(is_in_check(&mate, side));

        let (stale, side) = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(!has_legal_move(&stale, side));
        assert!(!is_in_check(&stale, side));
    }
}
