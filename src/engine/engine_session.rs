//! One running engine process and the UCI conversation with it.
//!
//! Any protocol failure closes the session: later requests return
//! `SessionClosed` instead of talking to an engine whose idea of the
//! position may have drifted.

use std::io::BufReader;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::engine::engine_config::EngineConfig;
use crate::engine::move_source::MoveSource;
use crate::engine::uci_connection::UciConnection;
use crate::errors::{EngineProtocolError, EngineResult};
use crate::game_state::chess_types::Move;

const EXIT_GRACE: Duration = Duration::from_millis(500);

type ProcessConnection = UciConnection<ChildStdin, BufReader<ChildStdout>>;

pub struct EngineSession {
    child: Child,
    connection: Option<ProcessConnection>,
    think_time: Duration,
}

impl EngineSession {
    /// Start the engine process and complete the UCI handshake.
    pub fn spawn(config: &EngineConfig) -> EngineResult<Self> {
        let path = config.path.display().to_string();
        let mut child = Command::new(&config.path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| EngineProtocolError::Spawn {
                path: path.clone(),
                source,
            })?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(EngineProtocolError::SessionClosed);
        };

        let mut session = Self {
            child,
            connection: Some(UciConnection::new(stdin, BufReader::new(stdout))),
            think_time: config.think_time,
        };
        session.with_connection(|conn| conn.handshake(config.threads))?;
        info!(%path, pid = session.child.id(), threads = config.threads, "engine session started");
        Ok(session)
    }

    pub fn is_open(&self) -> bool {
        self.connection.is_some()
    }

    /// Run one protocol exchange; on failure the session is torn down.
    fn with_connection<T>(
        &mut self,
        exchange: impl FnOnce(&mut ProcessConnection) -> EngineResult<T>,
    ) -> EngineResult<T> {
        let conn = self
            .connection
            .as_mut()
            .ok_or(EngineProtocolError::SessionClosed)?;
        let result = exchange(conn);
        if let Err(err) = &result {
            error!(%err, "engine session failed");
            self.shutdown();
        }
        result
    }

    /// Ask the engine to quit, close the pipes, and reap the process.
    fn shutdown(&mut self) {
        if let Some(mut conn) = self.connection.take() {
            let _ = conn.send("quit");
        }

        let deadline = Instant::now() + EXIT_GRACE;
        loop {
            match self.child.try_wait() {
                Ok(Some(status)) => {
                    debug!(%status, "engine process exited");
                    return;
                }
                Ok(None) if Instant::now() < deadline => thread::sleep(Duration::from_millis(10)),
                Ok(None) | Err(_) => break,
            }
        }

        warn!(pid = self.child.id(), "engine did not exit, killing it");
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl MoveSource for EngineSession {
    fn new_game(&mut self, elo: Option<u16>) -> EngineResult<()> {
        self.with_connection(|conn| conn.configure_new_game(elo))
    }

    fn request_move(&mut self, history: &[Move]) -> EngineResult<Move> {
        let think_time = self.think_time;
        self.with_connection(|conn| conn.search_best_move(history, think_time))
    }
}

impl Drop for EngineSession {
    fn drop(&mut self) {
        self.shutdown();
        info!("engine session closed");
    }
}
