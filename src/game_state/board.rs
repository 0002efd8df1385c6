//! Piece placement plus the auxiliary state legality depends on.
//!
//! `Board` stores one bitboard per colour and piece kind, occupancy caches,
//! castling rights, the en-passant target, and the two move clocks. It knows
//! how to relocate pieces (`apply_raw`) but not whether a move is legal; that
//! is the move generator's job.

use crate::errors::ParseError;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    // [color][piece_kind]
    pieces: [[u64; 6]; 2],

    occupancy_by_color: [u64; 2],
    occupancy_all: u64,

    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

/// Everything that makes two positions "the same" for repetition purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pieces: [[u64; 6]; 2],
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_square: Option<Square>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            castling_rights: CastlingRights::NONE,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl Board {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn starting_position() -> Self {
        let mut board = Self::empty();
        for (file, kind) in (0u8..).zip(BACK_RANK) {
            for (color, pawn_rank) in [(Color::White, 1u8), (Color::Black, 6u8)] {
                let back = Square::new(file, color.back_rank());
                let pawn = Square::new(file, pawn_rank);
                if let (Some(back), Some(pawn)) = (back, pawn) {
                    board.put(back, Piece::new(kind, color));
                    board.put(pawn, Piece::new(PieceKind::Pawn, color));
                }
            }
        }
        board.castling_rights = CastlingRights::ALL;
        board
    }

    /// Parse a FEN string into a board and the side to move.
    #[inline]
    pub fn from_fen(fen: &str) -> Result<(Self, Color), ParseError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self, side_to_move: Color) -> String {
        generate_fen(self, side_to_move)
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let mask = square.bit();
        if self.occupancy_all & mask == 0 {
            return None;
        }
        let color = if self.occupancy_by_color[Color::White.index()] & mask != 0 {
            Color::White
        } else {
            Color::Black
        };
        ALL_PIECE_KINDS
            .into_iter()
            .find(|kind| self.pieces[color.index()][kind.index()] & mask != 0)
            .map(|kind| Piece::new(kind, color))
    }

    /// Place a piece, replacing whatever stood on the square.
    pub fn put(&mut self, square: Square, piece: Piece) {
        self.clear(square);
        let mask = square.bit();
        self.pieces[piece.color.index()][piece.kind.index()] |= mask;
        self.occupancy_by_color[piece.color.index()] |= mask;
        self.occupancy_all |= mask;
    }

    /// Remove and return the piece on a square.
    pub fn clear(&mut self, square: Square) -> Option<Piece> {
        let removed = self.piece_at(square)?;
        let mask = !square.bit();
        self.pieces[removed.color.index()][removed.kind.index()] &= mask;
        self.occupancy_by_color[removed.color.index()] &= mask;
        self.occupancy_all &= mask;
        Some(removed)
    }

    #[inline]
    pub fn bitboard(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupancy_all(&self) -> u64 {
        self.occupancy_all
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.occupancy_all & square.bit() == 0
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        squares_of(self.bitboard(color, PieceKind::King)).next()
    }

    /// All pieces with their squares, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        squares_of(self.occupancy_all)
            .filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    pub fn position_key(&self, side_to_move: Color) -> PositionKey {
        PositionKey {
            pieces: self.pieces,
            side_to_move,
            castling_rights: self.castling_rights,
            en_passant_square: self.en_passant_square,
        }
    }

    /// Relocate a piece without any legality checking.
    ///
    /// Handles captures, en-passant removal, the rook hop of castling, and
    /// promotion. Updates castling rights, the en-passant target, and the
    /// half-move clock. The full-move number is left to the game layer.
    pub fn apply_raw(&mut self, mv: Move) {
        let Some(moving) = self.clear(mv.from) else {
            return;
        };
        let mut captured = self.clear(mv.to);

        let is_pawn = moving.kind == PieceKind::Pawn;
        let file_delta = mv.to.file() as i8 - mv.from.file() as i8;
        let rank_delta = mv.to.rank() as i8 - mv.from.rank() as i8;

        if is_pawn
            && file_delta != 0
            && captured.is_none()
            && self.en_passant_square == Some(mv.to)
        {
            // The captured pawn sits beside the origin, behind the target.
            if let Some(victim_sq) = Square::new(mv.to.file(), mv.from.rank()) {
                captured = self.clear(victim_sq);
            }
        }

        let placed_kind = match mv.promotion {
            Some(kind) if is_pawn => kind,
            _ => moving.kind,
        };
        self.put(mv.to, Piece::new(placed_kind, moving.color));

        if moving.kind == PieceKind::King && file_delta.abs() == 2 {
            let rank = mv.from.rank();
            let (rook_from, rook_to) = if file_delta > 0 { (7, 5) } else { (0, 3) };
            if let (Some(rook_from), Some(rook_to)) =
                (Square::new(rook_from, rank), Square::new(rook_to, rank))
            {
                if let Some(rook) = self.clear(rook_from) {
                    self.put(rook_to, rook);
                }
            }
        }

        self.update_castling_rights(moving, mv.from, mv.to);

        self.en_passant_square = if is_pawn && rank_delta.abs() == 2 {
            Square::new(mv.from.file(), (mv.from.rank() + mv.to.rank()) / 2)
        } else {
            None
        };

        if is_pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
    }

    /// Scratch copy with a move applied.
    pub fn with_move(&self, mv: Move) -> Board {
        let mut next = self.clone();
        next.apply_raw(mv);
        next
    }

    fn update_castling_rights(&mut self, moving: Piece, from: Square, to: Square) {
        if moving.kind == PieceKind::King {
            self.castling_rights.revoke_color(moving.color);
        }

        // A rook leaving its corner, or anything landing on one.
        for square in [from, to] {
            let flag = match square {
                Square::A1 => CastlingRights::WHITE_QUEENSIDE,
                Square::H1 => CastlingRights::WHITE_KINGSIDE,
                Square::A8 => CastlingRights::BLACK_QUEENSIDE,
                Square::H8 => CastlingRights::BLACK_KINGSIDE,
                _ => continue,
            };
            self.castling_rights.revoke(flag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    fn mv(text: &str) -> Move {
        Move::new(sq(&text[0..2]), sq(&text[2..4]))
    }

    #[test]
    fn starting_position_layout() {
        let board = Board::starting_position();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(
            board.piece_at(sq("e1")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            board.piece_at(sq("d8")),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(board.piece_at(sq("e4")), None);
        assert_eq!(board.castling_rights, CastlingRights::ALL);
        assert_eq!(board.king_square(Color::Black), Some(Square::E8));
    }

    #[test]
    fn starting_position_matches_fen() {
        let (parsed, side) = Board::from_fen(crate::game_state::chess_rules::STARTING_POSITION_FEN)
            .expect("start FEN should parse");
        assert_eq!(parsed, Board::starting_position());
        assert_eq!(side, Color::White);
    }

    #[test]
    fn double_push_sets_en_passant_target_and_resets_clock() {
        let mut board = Board::starting_position();
        board.halfmove_clock = 7;
        board.apply_raw(mv("e2e4"));
        assert_eq!(board.en_passant_square, Some(sq("e3")));
        assert_eq!(board.halfmove_clock, 0);

        board.apply_raw(mv("g8f6"));
        assert_eq!(board.en_passant_square, None);
        assert_eq!(board.halfmove_clock, 1);
    }

    #[test]
    fn en_passant_capture_removes_passed_pawn() {
        let (mut board, _) =
            Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        board.apply_raw(mv("e5d6"));
        assert_eq!(board.piece_at(sq("d5")), None);
        assert_eq!(
            board.piece_at(sq("d6")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert_eq!(board.halfmove_clock, 0);
    }

    #[test]
    fn castling_relocates_rook_and_drops_rights() {
        let (mut board, _) =
            Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        board.apply_raw(mv("e1g1"));
        assert_eq!(
            board.piece_at(sq("f1")),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert_eq!(board.piece_at(sq("h1")), None);
        assert!(!board.castling_rights.has(Color::White, true));
        assert!(!board.castling_rights.has(Color::White, false));

        board.apply_raw(mv("e8c8"));
        assert_eq!(
            board.piece_at(sq("d8")),
            Some(Piece::new(PieceKind::Rook, Color::Black))
        );
        assert_eq!(board.piece_at(sq("a8")), None);
        assert_eq!(board.castling_rights, CastlingRights::NONE);
    }

    #[test]
    fn capturing_a_corner_rook_revokes_that_right() {
        let (mut board, _) =
            Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        board.apply_raw(mv("a1a8"));
        assert!(!board.castling_rights.has(Color::White, false));
        assert!(!board.castling_rights.has(Color::Black, false));
        assert!(board.castling_rights.has(Color::White, true));
        assert!(board.castling_rights.has(Color::Black, true));
    }

    #[test]
    fn promotion_replaces_pawn_kind() {
        let (mut board, _) =
            Board::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse");
        board.apply_raw(Move::with_promotion(sq("a7"), sq("a8"), PieceKind::Knight));
        assert_eq!(
            board.piece_at(sq("a8")),
            Some(Piece::new(PieceKind::Knight, Color::White))
        );
        assert_eq!(board.bitboard(Color::White, PieceKind::Pawn), 0);
    }

    #[test]
    fn position_key_tracks_side_and_rights() {
        let board = Board::starting_position();
        assert_ne!(
            board.position_key(Color::White),
            board.position_key(Color::Black)
        );
        let mut no_rights = board.clone();
        no_rights.castling_rights = CastlingRights::NONE;
        assert_ne!(
            board.position_key(Color::White),
            no_rights.position_key(Color::White)
        );
    }
}
