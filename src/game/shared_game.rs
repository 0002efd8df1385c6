//! Single-writer handle around the game state machine.
//!
//! All reads and writes take one short lock; nothing blocks on an engine
//! round-trip while holding it. Readers get owned snapshots, so a half
//! applied move is never observable. Every committed change is announced
//! to subscribers over `mpsc` channels.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{error, info};

use crate::errors::{EngineProtocolError, MoveError, MoveResult};
use crate::game::game_mode::GameMode;
use crate::game::state_machine::GameStateMachine;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move};
use crate::game_state::game_status::GameStatus;

/// Owned copy of everything a presentation layer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub generation: u64,
    pub mode: GameMode,
    pub board: Board,
    pub turn: Color,
    pub status: GameStatus,
    pub ply_count: usize,
    pub move_count: u16,
    pub last_move: Option<Move>,
    pub engine_failure: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    NewGame {
        generation: u64,
        mode: GameMode,
    },
    MoveApplied {
        generation: u64,
        side: Color,
        mv: Move,
        status: GameStatus,
    },
    EngineFailed {
        generation: u64,
        message: String,
    },
}

struct SharedState {
    machine: GameStateMachine,
    generation: u64,
    engine_failure: Option<String>,
    subscribers: Vec<Sender<GameEvent>>,
}

impl SharedState {
    fn notify(&mut self, event: GameEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn commit(&mut self, side: Color, mv: Move) -> MoveResult<()> {
        self.machine.apply_move_as(side, mv)?;
        let event = GameEvent::MoveApplied {
            generation: self.generation,
            side,
            mv,
            status: self.machine.status(),
        };
        self.notify(event);
        Ok(())
    }
}

#[derive(Clone)]
pub struct SharedGame {
    state: Arc<Mutex<SharedState>>,
}

impl Default for SharedGame {
    fn default() -> Self {
        Self::new(GameStateMachine::default())
    }
}

impl SharedGame {
    pub fn new(machine: GameStateMachine) -> Self {
        Self {
            state: Arc::new(Mutex::new(SharedState {
                machine,
                generation: 0,
                engine_failure: None,
                subscribers: Vec::new(),
            })),
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let state = self.state.lock();
        let machine = &state.machine;
        GameSnapshot {
            generation: state.generation,
            mode: machine.mode(),
            board: machine.current_position().clone(),
            turn: machine.turn(),
            status: machine.status(),
            ply_count: machine.ply_count(),
            move_count: machine.move_count(),
            last_move: machine.last_move(),
            engine_failure: state.engine_failure.clone(),
        }
    }

    /// Receive an event for every change committed after this call.
    pub fn subscribe(&self) -> Receiver<GameEvent> {
        let (tx, rx) = channel();
        self.state.lock().subscribers.push(tx);
        rx
    }

    /// Replace the game; returns the new generation number.
    pub fn reset(&self, machine: GameStateMachine) -> u64 {
        let mut state = self.state.lock();
        let mode = machine.mode();
        state.machine = machine;
        state.generation += 1;
        state.engine_failure = None;
        let generation = state.generation;
        info!(generation, ?mode, "new game");
        state.notify(GameEvent::NewGame { generation, mode });
        generation
    }

    /// Move submitted by a person. Refused while the engine is to move.
    pub fn submit_human_move(&self, mv: Move) -> MoveResult<()> {
        let mut state = self.state.lock();
        let turn = state.machine.turn();
        if state.machine.status().is_terminal() {
            return Err(MoveError::GameOver);
        }
        if state.machine.mode().is_engine_controlled(turn) {
            return Err(MoveError::NotSideToMove);
        }
        state.commit(turn, mv)
    }

    /// Move history to send to the engine, if game `generation` is still
    /// current and waiting on an engine-controlled side.
    pub fn engine_request(&self, generation: u64) -> Option<Vec<Move>> {
        let state = self.state.lock();
        (state.generation == generation && state.machine.awaiting_engine())
            .then(|| state.machine.history_moves())
    }

    /// True once game `generation` has ended or been replaced.
    pub fn is_finished(&self, generation: u64) -> bool {
        let state = self.state.lock();
        state.generation != generation || state.machine.status().is_terminal()
    }

    /// Commit an engine move. `Ok(false)` means the game it was computed
    /// for has been replaced and the move was dropped.
    pub fn submit_engine_move(&self, generation: u64, mv: Move) -> MoveResult<bool> {
        let mut state = self.state.lock();
        if state.generation != generation {
            return Ok(false);
        }
        let turn = state.machine.turn();
        if !state.machine.mode().is_engine_controlled(turn) {
            return Err(MoveError::NotSideToMove);
        }
        state.commit(turn, mv).map(|()| true)
    }

    pub fn report_engine_failure(&self, generation: u64, err: &EngineProtocolError) {
        let mut state = self.state.lock();
        if state.generation != generation {
            return;
        }
        error!(generation, %err, "engine play stopped");
        let message = err.to_string();
        state.engine_failure = Some(message.clone());
        state.notify(GameEvent::EngineFailed {
            generation,
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{GameEvent, SharedGame};
    use crate::errors::MoveError;
    use crate::game::game_mode::GameMode;
    use crate::game::state_machine::GameStateMachine;
    use crate::game_state::chess_types::*;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    fn mv(text: &str) -> Move {
        long_algebraic_to_move(text).expect("test move should parse")
    }

    #[test]
    fn subscribers_see_applied_moves() {
        let game = SharedGame::default();
        let events = game.subscribe();
        game.submit_human_move(mv("e2e4")).expect("e2e4 is legal");

        match events.try_recv().expect("an event should be queued") {
            GameEvent::MoveApplied { side, mv: played, .. } => {
                assert_eq!(side, Color::White);
                assert_eq!(played, mv("e2e4"));
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn human_cannot_move_for_the_engine() {
        let game = SharedGame::default();
        let generation = game.reset(GameStateMachine::new_game(GameMode::against_engine(1500)));
        game.submit_human_move(mv("e2e4")).expect("white is human");
        let before = game.snapshot();

        assert_eq!(
            game.submit_human_move(mv("e7e5")),
            Err(MoveError::NotSideToMove)
        );
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.engine_request(generation), Some(vec![mv("e2e4")]));
    }

    #[test]
    fn stale_engine_moves_are_dropped() {
        let game = SharedGame::default();
        let old = game.reset(GameStateMachine::new_game(GameMode::EngineVsEngine { elo: 1500 }));
        let new = game.reset(GameStateMachine::new_game(GameMode::EngineVsEngine { elo: 1500 }));
        assert_ne!(old, new);

        assert_eq!(game.engine_request(old), None);
        assert_eq!(game.submit_engine_move(old, mv("e2e4")), Ok(false));
        assert_eq!(game.snapshot().ply_count, 0);
        assert_eq!(game.submit_engine_move(new, mv("e2e4")), Ok(true));
        assert_eq!(game.snapshot().last_move, Some(mv("e2e4")));
    }
}
