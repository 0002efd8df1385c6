//! Board and side to move back to FEN text.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

pub fn generate_fen(board: &Board, side_to_move: Color) -> String {
    let side = match side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };
    let en_passant = board
        .en_passant_square
        .map(|sq| sq.to_string())
        .unwrap_or_else(|| "-".to_owned());

    format!(
        "{} {} {} {} {} {}",
        generate_board_field(board),
        side,
        generate_castling_field(board.castling_rights),
        en_passant,
        board.halfmove_clock,
        board.fullmove_number
    )
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            let piece = Square::new(file, rank).and_then(|sq| board.piece_at(sq));
            match piece {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece_to_fen_char(piece));
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out
}

pub(crate) fn piece_to_fen_char(piece: Piece) -> char {
    let base = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };

    match piece.color {
        Color::White => base.to_ascii_uppercase(),
        Color::Black => base,
    }
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let out: String = [
        (Color::White, true, 'K'),
        (Color::White, false, 'Q'),
        (Color::Black, true, 'k'),
        (Color::Black, false, 'q'),
    ]
    .into_iter()
    .filter(|(color, kingside, _)| rights.has(*color, *kingside))
    .map(|(_, _, ch)| ch)
    .collect();

    if out.is_empty() {
        "-".to_owned()
    } else {
        out
    }
}
