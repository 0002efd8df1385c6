//! Background thread that plays the engine-controlled side(s).
//!
//! The thread sleeps on a command channel. On `Wake` it keeps asking the
//! move source for moves while the game is waiting on the engine, taking
//! the game lock only to read the history and to commit each move.

use std::io;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::engine::move_source::MoveSource;
use crate::errors::EngineProtocolError;
use crate::game::shared_game::SharedGame;

enum WorkerCommand {
    Wake,
    Shutdown,
}

pub struct EngineWorker {
    commands: Sender<WorkerCommand>,
    handle: Option<JoinHandle<()>>,
}

impl EngineWorker {
    pub fn spawn(game: SharedGame, source: Box<dyn MoveSource>, generation: u64) -> Self {
        let (commands, rx) = channel();
        let reporter = game.clone();
        let handle = thread::Builder::new()
            .name(format!("engine-game-{generation}"))
            .spawn(move || run(game, source, generation, rx));

        Self {
            commands,
            handle: started(handle, &reporter, generation),
        }
    }

    /// Ask the worker to check whether the engine is to move.
    pub fn wake(&self) {
        let _ = self.commands.send(WorkerCommand::Wake);
    }

    /// Stop the worker and wait for it, which also closes the move source.
    /// An in-flight engine request is allowed to finish first.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.commands.send(WorkerCommand::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("engine worker panicked");
            }
        }
    }
}

impl Drop for EngineWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// A worker thread that never started is reported like any other engine
/// failure, so the game does not wait on it forever.
fn started(
    handle: io::Result<JoinHandle<()>>,
    game: &SharedGame,
    generation: u64,
) -> Option<JoinHandle<()>> {
    match handle {
        Ok(handle) => Some(handle),
        Err(err) => {
            game.report_engine_failure(generation, &EngineProtocolError::Io(err));
            None
        }
    }
}

fn run(
    game: SharedGame,
    mut source: Box<dyn MoveSource>,
    generation: u64,
    commands: Receiver<WorkerCommand>,
) {
    debug!(generation, "engine worker started");
    while let Ok(WorkerCommand::Wake) = commands.recv() {
        if !play_pending_moves(&game, source.as_mut(), generation, &commands) {
            break;
        }
    }
    debug!(generation, "engine worker stopped");
}

/// Play engine moves until a human is to move or the game ends. Returns
/// false when the worker should exit, which includes a finished game.
fn play_pending_moves(
    game: &SharedGame,
    source: &mut dyn MoveSource,
    generation: u64,
    commands: &Receiver<WorkerCommand>,
) -> bool {
    while let Some(history) = game.engine_request(generation) {
        let mv = match source.request_move(&history) {
            Ok(mv) => mv,
            Err(err) => {
                game.report_engine_failure(generation, &err);
                return false;
            }
        };

        match game.submit_engine_move(generation, mv) {
            Ok(true) => {}
            Ok(false) => return false,
            Err(reason) => {
                let err = EngineProtocolError::IllegalEngineMove { mv, reason };
                game.report_engine_failure(generation, &err);
                return false;
            }
        }

        match commands.try_recv() {
            Ok(WorkerCommand::Shutdown) | Err(TryRecvError::Disconnected) => return false,
            Ok(WorkerCommand::Wake) | Err(TryRecvError::Empty) => {}
        }
    }
    !game.is_finished(generation)
}
