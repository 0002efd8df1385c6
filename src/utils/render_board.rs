//! Terminal-oriented Unicode board renderer.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// Render the board with White at the bottom, or Black when `flipped`.
pub fn render_board(board: &Board, flipped: bool) -> String {
    let files: Vec<u8> = if flipped {
        (0..8).rev().collect()
    } else {
        (0..8).collect()
    };
    let ranks: Vec<u8> = if flipped {
        (0..8).collect()
    } else {
        (0..8).rev().collect()
    };

    let header: String = files
        .iter()
        .map(|f| char::from(b'a' + f).to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = format!("  {header}\n");
    for &rank in &ranks {
        let rank_label = char::from(b'1' + rank);
        out.push(rank_label);
        out.push(' ');
        let row: Vec<String> = files
            .iter()
            .map(|&file| {
                Square::new(file, rank)
                    .and_then(|sq| board.piece_at(sq))
                    .map(piece_to_unicode)
                    .unwrap_or('·')
                    .to_string()
            })
            .collect();
        out.push_str(&row.join(" "));
        out.push(' ');
        out.push(rank_label);
        out.push('\n');
    }
    out.push_str(&format!("  {header}"));

    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::render_board;
    use crate::game_state::board::Board;

    #[test]
    fn renders_start_position_with_white_at_bottom() {
        let text = render_board(&Board::starting_position(), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "  a b c d e f g h");
        assert_eq!(lines[1], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8");
        assert_eq!(lines[8], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1");
    }

    #[test]
    fn flipped_view_puts_black_at_bottom() {
        let text = render_board(&Board::starting_position(), true);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  h g f e d c b a");
        assert_eq!(lines[1], "1 ♖ ♘ ♗ ♔ ♕ ♗ ♘ ♖ 1");
    }
}
