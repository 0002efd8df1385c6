//! Owned game state: position, history, side to move, and outcome.
//!
//! Every mutation goes through [`GameStateMachine::apply_move_as`], which is
//! all-or-nothing: a rejected move leaves every field untouched.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::errors::{MoveError, MoveResult, ParseError};
use crate::game::game_mode::GameMode;
use crate::game_state::board::{Board, PositionKey};
use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVE_LIMIT, REPETITION_DRAW_COUNT};
use crate::game_state::chess_types::{Color, Move};
use crate::game_state::game_status::{is_insufficient_material, DrawReason, GameStatus};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{has_legal_move, legal_moves};
use crate::move_generation::move_validator::validate;

/// One applied ply and the position it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlyRecord {
    pub mv: Move,
    pub mover: Color,
    pub board_after: Board,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct GameStateMachine {
    mode: GameMode,
    board: Board,
    turn: Color,
    status: GameStatus,
    record: Vec<PlyRecord>,
    repetitions: HashMap<PositionKey, usize>,
}

impl Default for GameStateMachine {
    fn default() -> Self {
        Self::new_game(GameMode::default())
    }
}

impl GameStateMachine {
    pub fn new_game(mode: GameMode) -> Self {
        Self::from_position(mode, Board::starting_position(), Color::White)
    }

    /// Start from an arbitrary position. The status is evaluated right away,
    /// so a position that is already decided starts out terminal.
    pub fn from_position(mode: GameMode, board: Board, turn: Color) -> Self {
        let mut repetitions = HashMap::new();
        repetitions.insert(board.position_key(turn), 1);

        let mut machine = Self {
            mode,
            board,
            turn,
            status: GameStatus::InProgress,
            record: Vec::new(),
            repetitions,
        };
        machine.status = machine.evaluate_status();
        machine
    }

    pub fn from_fen(mode: GameMode, fen: &str) -> Result<Self, ParseError> {
        let (board, turn) = Board::from_fen(fen)?;
        Ok(Self::from_position(mode, board, turn))
    }

    /// Submit a move for whichever side is to move.
    pub fn apply_move(&mut self, mv: Move) -> MoveResult<()> {
        self.apply_move_as(self.turn, mv)
    }

    /// Submit a move on behalf of `side`.
    pub fn apply_move_as(&mut self, side: Color, mv: Move) -> MoveResult<()> {
        if self.status.is_terminal() {
            debug!(%mv, "move rejected, game over");
            return Err(MoveError::GameOver);
        }
        if side != self.turn {
            debug!(%mv, %side, turn = %self.turn, "move rejected, not side to move");
            return Err(MoveError::NotSideToMove);
        }

        let mv = validate(&self.board, side, mv).map_err(|reason| {
            debug!(%mv, %reason, "move rejected");
            MoveError::Illegal(reason)
        })?;

        self.board.apply_raw(mv);
        if side == Color::Black {
            self.board.fullmove_number = self.board.fullmove_number.saturating_add(1);
        }
        self.turn = side.opposite();

        *self
            .repetitions
            .entry(self.board.position_key(self.turn))
            .or_insert(0) += 1;

        self.record.push(PlyRecord {
            mv,
            mover: side,
            board_after: self.board.clone(),
            played_at: Utc::now(),
        });
        debug!(%mv, %side, ply = self.record.len(), "move applied");

        self.status = self.evaluate_status();
        if self.status.is_terminal() {
            info!(status = %self.status, plies = self.record.len(), "game finished");
        }
        Ok(())
    }

    /// First satisfied condition wins: mate or stalemate, fifty-move rule,
    /// threefold repetition, insufficient material.
    fn evaluate_status(&self) -> GameStatus {
        if !has_legal_move(&self.board, self.turn) {
            return if is_in_check(&self.board, self.turn) {
                GameStatus::win_for(self.turn.opposite())
            } else {
                GameStatus::Draw(DrawReason::Stalemate)
            };
        }

        if self.board.halfmove_clock >= FIFTY_MOVE_HALFMOVE_LIMIT {
            return GameStatus::Draw(DrawReason::FiftyMoveRule);
        }

        let key = self.board.position_key(self.turn);
        if self.repetitions.get(&key).copied().unwrap_or(0) >= REPETITION_DRAW_COUNT {
            return GameStatus::Draw(DrawReason::ThreefoldRepetition);
        }

        if is_insufficient_material(&self.board) {
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }

        GameStatus::InProgress
    }

    #[inline]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[inline]
    pub fn current_position(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn ply_count(&self) -> usize {
        self.record.len()
    }

    /// Full-move number: starts at 1 and advances after each Black move.
    #[inline]
    pub fn move_count(&self) -> u16 {
        self.board.fullmove_number
    }

    /// Moves `side` may play right now: none when it is the other side's
    /// turn or the game is over.
    pub fn legal_moves(&self, side: Color) -> Vec<Move> {
        if side != self.turn || self.status.is_terminal() {
            return Vec::new();
        }
        legal_moves(&self.board, side)
    }

    pub fn last_move(&self) -> Option<Move> {
        self.record.last().map(|ply| ply.mv)
    }

    pub fn record(&self) -> &[PlyRecord] {
        &self.record
    }

    /// Applied moves in order, as sent to an engine after `position startpos`.
    pub fn history_moves(&self) -> Vec<Move> {
        self.record.iter().map(|ply| ply.mv).collect()
    }

    /// Whether the engine should produce the next move.
    pub fn awaiting_engine(&self) -> bool {
        !self.status.is_terminal() && self.mode.is_engine_controlled(self.turn)
    }
}

#[cfg(test)]
mod tests {
    use super::GameStateMachine;
    use crate::errors::{IllegalMoveReason, MoveError};
    use crate::game::game_mode::GameMode;
    use crate::game_state::chess_types::*;
    use crate::game_state::game_status::{DrawReason, GameStatus};
    use crate::utils::long_algebraic::long_algebraic_to_move;

    fn mv(text: &str) -> Move {
        long_algebraic_to_move(text).expect("test move should parse")
    }

    fn play(game: &mut GameStateMachine, moves: &[&str]) {
        for text in moves {
            game.apply_move(mv(text))
                .unwrap_or_else(|err| panic!("{text} should be legal: {err}"));
        }
    }

    #[test]
    fn counters_follow_plies_and_full_moves() {
        let mut game = GameStateMachine::default();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.move_count(), 1);
        assert_eq!(game.ply_count(), 0);
        assert_eq!(game.last_move(), None);

        play(&mut game, &["e2e4"]);
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.move_count(), 1);

        play(&mut game, &["e7e5"]);
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.move_count(), 2);
        assert_eq!(game.ply_count(), 2);
        assert_eq!(game.last_move(), Some(mv("e7e5")));
        assert_eq!(game.history_moves(), vec![mv("e2e4"), mv("e7e5")]);
        assert_eq!(game.record()[0].mover, Color::White);
    }

    #[test]
    fn only_the_side_to_move_has_moves() {
        let mut game = GameStateMachine::default();
        assert_eq!(game.legal_moves(Color::White).len(), 20);
        assert!(game.legal_moves(Color::Black).is_empty());

        play(&mut game, &["e2e4"]);
        assert!(game.legal_moves(Color::White).is_empty());
        assert_eq!(game.legal_moves(Color::Black).len(), 20);
    }

    #[test]
    fn rejected_move_changes_nothing() {
        let mut game = GameStateMachine::default();
        play(&mut game, &["e2e4"]);
        let before = game.current_position().clone();

        assert_eq!(
            game.apply_move(mv("e4e5")),
            Err(MoveError::Illegal(IllegalMoveReason::NotSideToMove))
        );
        assert_eq!(
            game.apply_move_as(Color::White, mv("d2d4")),
            Err(MoveError::NotSideToMove)
        );
        assert_eq!(game.current_position(), &before);
        assert_eq!(game.ply_count(), 1);
        assert_eq!(game.turn(), Color::Black);
    }

    #[test]
    fn stalemate_is_a_draw() {
        let mut game =
            GameStateMachine::from_fen(GameMode::PlayerVsPlayer, "7k/8/5QK1/8/8/8/8/8 w - - 0 1")
                .expect("FEN should parse");
        play(&mut game, &["f6f7"]);
        assert_eq!(game.status(), GameStatus::Draw(DrawReason::Stalemate));
    }

    #[test]
    fn fifty_move_rule_triggers_at_one_hundred_half_moves() {
        let mut game = GameStateMachine::from_fen(
            GameMode::PlayerVsPlayer,
            "4k3/8/8/8/8/8/8/R3K3 w - - 99 80",
        )
        .expect("FEN should parse");
        assert_eq!(game.status(), GameStatus::InProgress);
        play(&mut game, &["a1a2"]);
        assert_eq!(game.status(), GameStatus::Draw(DrawReason::FiftyMoveRule));
    }

    #[test]
    fn pawn_move_resets_fifty_move_count() {
        let mut game = GameStateMachine::from_fen(
            GameMode::PlayerVsPlayer,
            "4k3/8/8/8/8/8/P7/R3K3 w - - 99 80",
        )
        .expect("FEN should parse");
        play(&mut game, &["a2a3"]);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.current_position().halfmove_clock, 0);
    }

    #[test]
    fn knight_shuffle_repeats_start_position_three_times() {
        let mut game = GameStateMachine::default();
        let cycle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        play(&mut game, &cycle);
        assert_eq!(game.status(), GameStatus::InProgress);
        play(&mut game, &cycle);
        assert_eq!(
            game.status(),
            GameStatus::Draw(DrawReason::ThreefoldRepetition)
        );
        assert_eq!(game.apply_move(mv("e2e4")), Err(MoveError::GameOver));
    }

    #[test]
    fn decided_position_starts_terminal() {
        let game = GameStateMachine::from_fen(
            GameMode::PlayerVsPlayer,
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
        )
        .expect("FEN should parse");
        assert_eq!(
            game.status(),
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        );
    }

    #[test]
    fn engine_turns_follow_the_mode() {
        let game = GameStateMachine::new_game(GameMode::PlayerVsEngine {
            engine_side: Color::White,
            elo: 1500,
        });
        assert!(game.awaiting_engine());
        assert!(!GameStateMachine::default().awaiting_engine());
    }
}
