//! Narrow capability interface the game uses to obtain engine moves.
//!
//! Callers see moves, never pipes. Tests plug in scripted sources through
//! the same traits.

use crate::engine::engine_config::EngineConfig;
use crate::engine::engine_session::EngineSession;
use crate::errors::EngineResult;
use crate::game_state::chess_types::Move;

pub trait MoveSource: Send {
    /// Reset for a new game, optionally limiting playing strength.
    fn new_game(&mut self, elo: Option<u16>) -> EngineResult<()>;

    /// Best move for the position reached by `history` from the start.
    fn request_move(&mut self, history: &[Move]) -> EngineResult<Move>;
}

/// Creates a ready-to-use move source for each engine game.
pub trait EngineLauncher: Send + Sync {
    fn launch(&self) -> EngineResult<Box<dyn MoveSource>>;
}

impl EngineLauncher for EngineConfig {
    fn launch(&self) -> EngineResult<Box<dyn MoveSource>> {
        Ok(Box::new(EngineSession::spawn(self)?))
    }
}
