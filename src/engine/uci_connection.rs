//! Client side of the UCI text protocol over any line-oriented pipe pair.
//!
//! Generic over the writer and reader so the exchange can be driven by a
//! child process in production and by in-memory buffers in tests.

use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use tracing::{debug, trace};

use crate::errors::{EngineProtocolError, EngineResult};
use crate::game_state::chess_types::Move;
use crate::utils::long_algebraic::{long_algebraic_to_move, moves_to_long_algebraic_list};

pub struct UciConnection<W: Write, R: BufRead> {
    writer: W,
    reader: R,
}

impl<W: Write, R: BufRead> UciConnection<W, R> {
    pub fn new(writer: W, reader: R) -> Self {
        Self { writer, reader }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn send(&mut self, command: &str) -> EngineResult<()> {
        trace!(target: "uci", "> {command}");
        writeln!(self.writer, "{command}")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Read lines until one whose first token is `token`; returns that line.
    pub fn read_until(&mut self, token: &str) -> EngineResult<String> {
        let mut line = String::new();
        loop {
            line.clear();
            let n = self.reader.read_line(&mut line)?;
            if n == 0 {
                return Err(EngineProtocolError::UnexpectedEof {
                    waiting_for: token.to_owned(),
                });
            }

            let trimmed = line.trim();
            trace!(target: "uci", "< {trimmed}");
            if trimmed.split_whitespace().next() == Some(token) {
                return Ok(trimmed.to_owned());
            }
        }
    }

    /// `isready` and wait for `readyok`.
    pub fn sync(&mut self) -> EngineResult<()> {
        self.send("isready")?;
        self.read_until("readyok").map(|_| ())
    }

    /// Identify, then set the worker thread count.
    pub fn handshake(&mut self, threads: usize) -> EngineResult<()> {
        self.send("uci")?;
        self.read_until("uciok")?;
        self.send(&format!("setoption name Threads value {threads}"))?;
        self.sync()?;
        debug!(threads, "engine handshake complete");
        Ok(())
    }

    /// Reset the engine for a fresh game and (re)send the strength limit.
    /// Each option is acknowledged before the next is sent.
    pub fn configure_new_game(&mut self, elo: Option<u16>) -> EngineResult<()> {
        self.send("ucinewgame")?;
        self.sync()?;
        if let Some(elo) = elo {
            self.send("setoption name UCI_LimitStrength value true")?;
            self.sync()?;
            self.send(&format!("setoption name UCI_Elo value {elo}"))?;
            self.sync()?;
        }
        Ok(())
    }

    /// Send the whole history, let the engine think for `think_time`, then
    /// stop it and parse its answer.
    pub fn search_best_move(
        &mut self,
        history: &[Move],
        think_time: Duration,
    ) -> EngineResult<Move> {
        if history.is_empty() {
            self.send("position startpos")?;
        } else {
            self.send(&format!(
                "position startpos moves {}",
                moves_to_long_algebraic_list(history)
            ))?;
        }
        self.send("go")?;
        thread::sleep(think_time);
        self.send("stop")?;

        let line = self.read_until("bestmove")?;
        parse_bestmove(&line)
    }
}

/// Parse `bestmove <move> [ponder <move>]`.
pub fn parse_bestmove(line: &str) -> EngineResult<Move> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("bestmove") {
        return Err(EngineProtocolError::MalformedBestMove(line.to_owned()));
    }

    match tokens.next() {
        None => Err(EngineProtocolError::MalformedBestMove(line.to_owned())),
        Some("0000") | Some("(none)") => Err(EngineProtocolError::NoMove),
        Some(token) => Ok(long_algebraic_to_move(token)?),
    }
}
