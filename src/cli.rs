//! Command-line interface for the duel_chess driver.

use std::path::PathBuf;

use clap::Parser;

use duel_chess::engine::engine_config::{DEFAULT_ENGINE_PATH, DEFAULT_THINK_TIME};

/// Duel Chess - play chess against a person or a UCI engine
#[derive(Parser, Debug)]
#[command(name = "duel_chess")]
#[command(about = "Line-driven chess game with an external UCI engine opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the UCI engine executable
    #[arg(long, default_value = DEFAULT_ENGINE_PATH)]
    pub engine: PathBuf,

    /// Engine thinking time per move, in milliseconds
    #[arg(long, default_value_t = DEFAULT_THINK_TIME.as_millis() as u64)]
    pub think_ms: u64,
}
