//! Occupancy-aware attack maps for bishops, rooks, and queens.
//!
//! Each ray runs until it leaves the board or hits an occupied square; the
//! blocker itself is included so captures fall out of a colour mask.

use crate::game_state::chess_types::Square;

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    ROOK_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    BISHOP_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    rook_attacks(square, occupancy) | bishop_attacks(square, occupancy)
}

/// Squares strictly between two squares on a shared line, or 0 when they
/// are not aligned.
pub fn squares_between(a: Square, b: Square) -> u64 {
    let df = b.file() as i8 - a.file() as i8;
    let dr = b.rank() as i8 - a.rank() as i8;
    let aligned = (df == 0) != (dr == 0) || (df != 0 && df.abs() == dr.abs());
    if !aligned {
        return 0;
    }

    let (step_f, step_r) = (df.signum(), dr.signum());
    let mut between = 0u64;
    let mut current = a.offset(step_f, step_r);
    while let Some(sq) = current {
        if sq == b {
            break;
        }
        between |= sq.bit();
        current = sq.offset(step_f, step_r);
    }
    between
}

fn trace_ray(square: Square, file_step: i8, rank_step: i8, occupancy: u64) -> u64 {
    let mut attacks = 0u64;
    let mut current = square.offset(file_step, rank_step);

    while let Some(sq) = current {
        attacks |= sq.bit();
        if occupancy & sq.bit() != 0 {
            break;
        }
        current = sq.offset(file_step, rank_step);
    }

    attacks
}
