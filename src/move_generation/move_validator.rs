//! Candidate move validation with a diagnosis of why a move was refused.
//!
//! Acceptance is decided solely by membership in [`legal_moves`]; the
//! reason for a refusal is worked out afterwards from cheaper tests.

use crate::errors::IllegalMoveReason;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::{legal_moves, pseudo_legal_moves};
use crate::move_generation::pseudo_legal_king::castling_squares;
use crate::moves::leaper_attacks::{king_attacks, knight_attacks};
use crate::moves::slider_attacks::{bishop_attacks, queen_attacks, rook_attacks};

pub fn validate(board: &Board, side: Color, candidate: Move) -> Result<Move, IllegalMoveReason> {
    let piece = board
        .piece_at(candidate.from)
        .ok_or(IllegalMoveReason::SquareEmpty)?;
    if piece.color != side {
        return Err(IllegalMoveReason::NotSideToMove);
    }

    let legal = legal_moves(board, side);
    if legal.contains(&candidate) {
        return Ok(candidate);
    }

    if legal.iter().any(|mv| mv.same_squares(&candidate)) {
        return Err(match candidate.promotion {
            None => IllegalMoveReason::MissingPromotion,
            Some(_) => IllegalMoveReason::InvalidPromotion,
        });
    }

    if pseudo_legal_moves(board, side)
        .iter()
        .any(|mv| mv.same_squares(&candidate))
    {
        return Err(IllegalMoveReason::SelfCheck);
    }

    if piece.kind == PieceKind::King && is_castling_shape(side, candidate) {
        return Err(IllegalMoveReason::CastlingNotAllowed);
    }

    if board.occupancy(side) & candidate.to.bit() != 0 {
        return Err(IllegalMoveReason::DestinationOccupied);
    }

    if fits_movement_pattern(board, piece, candidate) {
        Err(IllegalMoveReason::BlockedPath)
    } else {
        Err(IllegalMoveReason::WrongPiece)
    }
}

#[inline]
pub fn is_legal(board: &Board, side: Color, candidate: Move) -> bool {
    validate(board, side, candidate).is_ok()
}

fn is_castling_shape(side: Color, mv: Move) -> bool {
    [true, false].into_iter().any(|kingside| {
        let (king_from, king_to, _) = castling_squares(side, kingside);
        mv.from == king_from && mv.to == king_to
    })
}

/// Whether the move matches the piece's pattern on an otherwise empty
/// board. Pawn diagonals only count when there is something to take.
fn fits_movement_pattern(board: &Board, piece: Piece, mv: Move) -> bool {
    let target = mv.to.bit();
    match piece.kind {
        PieceKind::Knight => knight_attacks(mv.from) & target != 0,
        PieceKind::King => king_attacks(mv.from) & target != 0,
        PieceKind::Bishop => bishop_attacks(mv.from, 0) & target != 0,
        PieceKind::Rook => rook_attacks(mv.from, 0) & target != 0,
        PieceKind::Queen => queen_attacks(mv.from, 0) & target != 0,
        PieceKind::Pawn => {
            let dir = piece.color.pawn_direction();
            let file_delta = mv.to.file() as i8 - mv.from.file() as i8;
            let rank_delta = mv.to.rank() as i8 - mv.from.rank() as i8;
            let single = file_delta == 0 && rank_delta == dir;
            let double = file_delta == 0
                && rank_delta == 2 * dir
                && mv.from.rank() == piece.color.pawn_start_rank();
            let capture = file_delta.abs() == 1
                && rank_delta == dir
                && board.occupancy(piece.color.opposite()) & target != 0;
            single || double || capture
        }
    }
}
