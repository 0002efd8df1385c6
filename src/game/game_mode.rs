//! Who controls each side of a game.

use crate::game_state::chess_types::Color;

/// Default playing strength handed to the engine when none is chosen.
pub const DEFAULT_ENGINE_ELO: u16 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Two humans share the board.
    PlayerVsPlayer,
    /// A human plays against the engine, which controls `engine_side`.
    PlayerVsEngine { engine_side: Color, elo: u16 },
    /// The engine plays both sides.
    EngineVsEngine { elo: u16 },
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PlayerVsPlayer
    }
}

impl GameMode {
    /// Human plays White, the engine Black.
    pub const fn against_engine(elo: u16) -> Self {
        GameMode::PlayerVsEngine {
            engine_side: Color::Black,
            elo,
        }
    }

    pub const fn is_engine_controlled(self, side: Color) -> bool {
        match self {
            GameMode::PlayerVsPlayer => false,
            GameMode::PlayerVsEngine { engine_side, .. } => matches!(
                (engine_side, side),
                (Color::White, Color::White) | (Color::Black, Color::Black)
            ),
            GameMode::EngineVsEngine { .. } => true,
        }
    }

    pub const fn uses_engine(self) -> bool {
        !matches!(self, GameMode::PlayerVsPlayer)
    }

    /// Strength to request from the engine, if the mode involves one.
    pub const fn engine_elo(self) -> Option<u16> {
        match self {
            GameMode::PlayerVsPlayer => None,
            GameMode::PlayerVsEngine { elo, .. } | GameMode::EngineVsEngine { elo } => Some(elo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GameMode, DEFAULT_ENGINE_ELO};
    use crate::game_state::chess_types::Color;

    #[test]
    fn control_per_mode() {
        let pvp = GameMode::PlayerVsPlayer;
        assert!(!pvp.is_engine_controlled(Color::White));
        assert!(!pvp.is_engine_controlled(Color::Black));
        assert_eq!(pvp.engine_elo(), None);

        let pve = GameMode::against_engine(DEFAULT_ENGINE_ELO);
        assert!(!pve.is_engine_controlled(Color::White));
        assert!(pve.is_engine_controlled(Color::Black));
        assert_eq!(pve.engine_elo(), Some(DEFAULT_ENGINE_ELO));

        let eve = GameMode::EngineVsEngine { elo: 2000 };
        assert!(eve.is_engine_controlled(Color::White));
        assert!(eve.is_engine_controlled(Color::Black));
        assert!(eve.uses_engine());
    }
}
