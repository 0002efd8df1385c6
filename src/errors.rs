//! Error taxonomy for board parsing, move validation, game flow, and the
//! external engine session.
//!
//! Parsing and validation errors are recoverable: the offending input is
//! rejected and no state changes. `EngineProtocolError` is fatal to the
//! engine session that produced it, never to the game itself.

use thiserror::Error;

use crate::game_state::chess_types::Move;

/// Malformed square, move, or position text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    #[error("invalid move text '{0}'")]
    InvalidMove(String),

    #[error("invalid promotion piece '{0}'")]
    InvalidPromotion(char),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),
}

/// Why a candidate move is not legal in the current position.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveReason {
    /// The origin square holds no piece.
    #[error("no piece on the origin square")]
    SquareEmpty,

    /// The piece on the origin square belongs to the other side.
    #[error("the piece belongs to the side not on move")]
    NotSideToMove,

    /// The piece cannot move in that pattern at all.
    #[error("the piece does not move that way")]
    WrongPiece,

    /// The pattern is right but something stands in the way.
    #[error("the path is blocked")]
    BlockedPath,

    /// The destination holds a piece of the mover's own colour.
    #[error("the destination holds an own piece")]
    DestinationOccupied,

    /// Castling rights are gone, the path is occupied, or the king would
    /// start in, pass through, or land in check.
    #[error("castling is not allowed")]
    CastlingNotAllowed,

    /// The move would leave the mover's own king in check.
    #[error("the move leaves the own king in check")]
    SelfCheck,

    /// A pawn reaching the last rank needs a promotion piece.
    #[error("a promotion piece is required")]
    MissingPromotion,

    /// A promotion piece was supplied where none applies, or it is not one
    /// of queen, rook, bishop, knight.
    #[error("invalid promotion piece for this move")]
    InvalidPromotion,
}

/// Rejection of a move submitted to the game state machine.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("illegal move: {0}")]
    Illegal(#[from] IllegalMoveReason),

    #[error("the game is already over")]
    GameOver,

    #[error("it is not the submitting side's turn")]
    NotSideToMove,
}

/// Failure while talking to the external engine process.
#[derive(Error, Debug)]
pub enum EngineProtocolError {
    #[error("failed to start engine '{path}': {source}")]
    Spawn {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("engine pipe failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("engine closed its output while waiting for '{waiting_for}'")]
    UnexpectedEof { waiting_for: String },

    #[error("malformed bestmove line '{0}'")]
    MalformedBestMove(String),

    #[error("engine reported no move")]
    NoMove,

    #[error("engine move could not be parsed: {0}")]
    Parse(#[from] ParseError),

    #[error("engine proposed illegal move {mv}: {reason}")]
    IllegalEngineMove { mv: Move, reason: MoveError },

    #[error("engine session is closed")]
    SessionClosed,
}

pub type MoveResult<T> = Result<T, MoveError>;
pub type EngineResult<T> = Result<T, EngineProtocolError>;
