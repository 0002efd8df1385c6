//! Precomputed attack masks for pieces that jump: knight, king, and pawn
//! captures. Tables are built at compile time.

use crate::game_state::chess_types::{Color, Square};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub const KNIGHT_ATTACKS: [u64; 64] = build_table(&KNIGHT_OFFSETS);
pub const KING_ATTACKS: [u64; 64] = build_table(&KING_OFFSETS);
pub const WHITE_PAWN_ATTACKS: [u64; 64] = build_table(&[(-1, 1), (1, 1)]);
pub const BLACK_PAWN_ATTACKS: [u64; 64] = build_table(&[(-1, -1), (1, -1)]);

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square.index()]
}

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square.index()]
}

/// Squares a pawn of `color` standing on `square` attacks.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square.index()],
        Color::Black => BLACK_PAWN_ATTACKS[square.index()],
    }
}

const fn build_table(offsets: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;

        while i < offsets.len() {
            attacks |= set_if_valid(file + offsets[i].0, rank + offsets[i].1);
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    1u64 << (rank * 8 + file)
}
