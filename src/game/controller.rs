//! Collaborator-facing entry point: start games, submit moves, read state.
//!
//! Owns at most one engine worker. Starting a new game tears the old one
//! down (closing its engine session) before the next session is launched.

use std::sync::mpsc::Receiver;

use tracing::info;

use crate::engine::move_source::EngineLauncher;
use crate::errors::{EngineResult, MoveResult};
use crate::game::engine_worker::EngineWorker;
use crate::game::game_mode::GameMode;
use crate::game::shared_game::{GameEvent, GameSnapshot, SharedGame};
use crate::game::state_machine::GameStateMachine;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move};
use crate::game_state::game_status::GameStatus;

pub struct GameController {
    game: SharedGame,
    launcher: Box<dyn EngineLauncher>,
    worker: Option<EngineWorker>,
}

impl GameController {
    /// A controller with a two-player game already set up.
    pub fn new(launcher: impl EngineLauncher + 'static) -> Self {
        Self {
            game: SharedGame::default(),
            launcher: Box::new(launcher),
            worker: None,
        }
    }

    /// Reset to the starting position under `mode`. For engine modes the
    /// engine is launched and configured before this returns; a failure
    /// leaves the new game in place with engine play disabled.
    pub fn new_game(&mut self, mode: GameMode) -> EngineResult<()> {
        if let Some(worker) = self.worker.take() {
            worker.shutdown();
        }

        let generation = self.game.reset(GameStateMachine::new_game(mode));
        let Some(elo) = mode.engine_elo() else {
            return Ok(());
        };

        let source = self.launcher.launch().and_then(|mut source| {
            source.new_game(Some(elo))?;
            Ok(source)
        });
        let source = match source {
            Ok(source) => source,
            Err(err) => {
                self.game.report_engine_failure(generation, &err);
                return Err(err);
            }
        };

        info!(generation, elo, "engine ready");
        let worker = EngineWorker::spawn(self.game.clone(), source, generation);
        worker.wake();
        self.worker = Some(worker);
        Ok(())
    }

    /// Submit a human move; on an engine turn this is `NotSideToMove`.
    pub fn make_move(&self, mv: Move) -> MoveResult<()> {
        self.game.submit_human_move(mv)?;
        if let Some(worker) = &self.worker {
            worker.wake();
        }
        Ok(())
    }

    pub fn current_position(&self) -> Board {
        self.game.snapshot().board
    }

    pub fn turn(&self) -> Color {
        self.game.snapshot().turn
    }

    pub fn status(&self) -> GameStatus {
        self.game.snapshot().status
    }

    pub fn move_count(&self) -> u16 {
        self.game.snapshot().move_count
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn subscribe(&self) -> Receiver<GameEvent> {
        self.game.subscribe()
    }
}

impl Drop for GameController {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.shutdown();
        }
    }
}
