use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use duel_chess::engine::engine_config::EngineConfig;
use duel_chess::game::controller::GameController;
use duel_chess::game::game_mode::{GameMode, DEFAULT_ENGINE_ELO};
use duel_chess::game::shared_game::GameEvent;
use duel_chess::game_state::chess_types::Color;
use duel_chess::move_generation::legal_move_generator::legal_moves;
use duel_chess::utils::long_algebraic::{long_algebraic_to_move, moves_to_long_algebraic_list};
use duel_chess::utils::render_board::render_board;

mod cli;
use cli::Cli;

const HELP: &str = "commands:
  new pvp                       two players
  new engine [elo] [white|black] play against the engine (engine side, default black)
  new engines [elo]             engine plays both sides
  <move>                        long algebraic move, e.g. e2e4 or e7e8q
  board | fen | moves | status  inspect the game
  help | quit";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::default()
        .with_path(cli.engine)
        .with_think_time(Duration::from_millis(cli.think_ms));
    info!(path = %config.path.display(), threads = config.threads, "duel chess starting");

    let mut controller = GameController::new(config);
    let events = controller.subscribe();

    // Print state changes as they happen, engine moves included.
    thread::spawn(move || {
        for event in events {
            match event {
                GameEvent::NewGame { mode, .. } => println!("new game: {mode:?}"),
                GameEvent::MoveApplied { side, mv, status, .. } => {
                    println!("{side} played {mv} ({status})")
                }
                GameEvent::EngineFailed { message, .. } => {
                    println!("engine stopped: {message}")
                }
            }
            io::stdout().flush().ok();
        }
    });

    println!("{HELP}");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else {
            continue;
        };

        match cmd {
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "new" => {
                let args: Vec<&str> = parts.collect();
                match parse_mode(&args) {
                    Some(mode) => {
                        if let Err(err) = controller.new_game(mode) {
                            warn!(%err, "engine unavailable");
                        }
                    }
                    None => println!("unknown mode; try 'help'"),
                }
            }
            "board" => {
                let snapshot = controller.snapshot();
                print!("{}", render_board(&snapshot.board, false));
                println!(
                    "move {} | {} to move | {}",
                    snapshot.move_count, snapshot.turn, snapshot.status
                );
            }
            "fen" => {
                let snapshot = controller.snapshot();
                println!("{}", snapshot.board.to_fen(snapshot.turn));
            }
            "moves" => {
                let snapshot = controller.snapshot();
                println!(
                    "{}",
                    moves_to_long_algebraic_list(&legal_moves(&snapshot.board, snapshot.turn))
                );
            }
            "status" => println!("{}", controller.status()),
            text => match long_algebraic_to_move(text) {
                Ok(mv) => {
                    if let Err(err) = controller.make_move(mv) {
                        println!("rejected {mv}: {err}");
                    }
                }
                Err(err) => println!("{err}"),
            },
        }
        io::stdout().flush().ok();
    }

    info!("duel chess exiting");
}

fn parse_mode(args: &[&str]) -> Option<GameMode> {
    let elo = |arg: Option<&&str>| match arg {
        Some(text) => text.parse::<u16>().ok(),
        None => Some(DEFAULT_ENGINE_ELO),
    };

    match args.first().copied() {
        Some("pvp") => Some(GameMode::PlayerVsPlayer),
        Some("engine") => {
            let engine_side = match args.get(2).copied() {
                None | Some("black") => Color::Black,
                Some("white") => Color::White,
                Some(_) => return None,
            };
            Some(GameMode::PlayerVsEngine {
                engine_side,
                elo: elo(args.get(1))?,
            })
        }
        Some("engines") => Some(GameMode::EngineVsEngine {
            elo: elo(args.get(1))?,
        }),
        _ => None,
    }
}
