//! FEN-to-Board parser.
//!
//! Builds a board with rights and clocks from a Forsyth-Edwards Notation
//! string. Used for test fixtures and diagnostics; games themselves always
//! start from the standard position.

use crate::errors::ParseError;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

fn invalid(message: impl Into<String>) -> ParseError {
    ParseError::InvalidFen(message.into())
}

pub fn parse_fen(fen: &str) -> Result<(Board, Color), ParseError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    // Clocks are optional; many hand-written fixtures omit them.
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let mut board = Board::empty();

    parse_board(board_part, &mut board)?;
    let side_to_move = parse_side_to_move(side_part)?;
    board.castling_rights = parse_castling_rights(castling_part)?;
    board.en_passant_square = parse_en_passant_square(en_passant_part)?;
    board.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(format!("halfmove clock '{halfmove_part}'")))?;
    board.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid(format!("fullmove number '{fullmove_part}'")))?;

    Ok((board, side_to_move))
}

fn parse_board(board_part: &str, board: &mut Board) -> Result<(), ParseError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    for (rank, rank_str) in (0u8..8).rev().zip(ranks) {
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(invalid(format!("rank '{rank_str}' has too many files")));
                }
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(format!("piece character '{ch}'")))?;
            let square = Square::new(file, rank)
                .ok_or_else(|| invalid(format!("rank '{rank_str}' has too many files")))?;
            board.put(square, piece);
            file += 1;
        }

        if file != 8 {
            return Err(invalid(format!("rank '{rank_str}' does not sum to 8 files")));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, ParseError> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(format!("side to move '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, ParseError> {
    let mut rights = CastlingRights::NONE;
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.grant(CastlingRights::WHITE_KINGSIDE),
            'Q' => rights.grant(CastlingRights::WHITE_QUEENSIDE),
            'k' => rights.grant(CastlingRights::BLACK_KINGSIDE),
            'q' => rights.grant(CastlingRights::BLACK_QUEENSIDE),
            _ => return Err(invalid(format!("castling rights character '{ch}'"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, ParseError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    Ok(Some(algebraic_to_square(en_passant_part)?))
}

pub(crate) fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(kind, color))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::errors::ParseError;
    use crate::game_state::chess_types::{Color, Square};

    #[test]
    fn clocks_default_when_omitted() {
        let (board, side) = parse_fen("4k3/8/8/8/8/8/8/4K3 b - -").expect("short FEN should parse");
        assert_eq!(side, Color::Black);
        assert_eq!(board.halfmove_clock, 0);
        assert_eq!(board.fullmove_number, 1);
        assert_eq!(board.king_square(Color::White), Some(Square::E1));
    }

    #[test]
    fn malformed_layouts_are_rejected() {
        for bad in [
            "",
            "8/8/8/8/8/8/8 w - - 0 1",
            "9/8/8/8/8/8/8/8 w - - 0 1",
            "4k4/8/8/8/8/8/8/4K3 w - - 0 1",
            "4x3/8/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w Z - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - e9 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - - x 1",
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra",
            "88/8/8/8/8/8/8/8 w - - 0 1",
            "88888888888888888888888888888888/8/8/8/8/8/8/8 w - - 0 1",
        ] {
            assert!(parse_fen(bad).is_err(), "FEN {bad:?} should be rejected");
        }
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w - e9 0 1"),
            Err(ParseError::InvalidSquare(_))
        ));
    }
}
