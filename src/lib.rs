//! Crate root module declarations for the Duel Chess game core.
//!
//! Exposes the board model, move generation and validation, the game state
//! machine with its engine-driven turns, the UCI engine client, and the
//! notation helpers so the binary, tests, and benches share module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_status;
}

pub mod moves {
    pub mod leaper_attacks;
    pub mod slider_attacks;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod move_validator;
    pub mod perft;
    pub mod pseudo_legal_king;
    pub mod pseudo_legal_knight;
    pub mod pseudo_legal_pawn;
    pub mod pseudo_legal_sliders;
}

pub mod engine {
    pub mod engine_config;
    pub mod engine_session;
    pub mod move_source;
    pub mod uci_connection;
}

pub mod game {
    pub mod controller;
    pub mod engine_worker;
    pub mod game_mode;
    pub mod shared_game;
    pub mod state_machine;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_board;
}
