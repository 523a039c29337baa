//! Game configuration.
//!
//! A game is configured at startup with its identifier, its players in seat
//! order, and the scorecard column width:
//!
//! ```
//! use three_dice::core::GameConfig;
//!
//! let config = GameConfig::new("Game001")
//!     .with_player("Freddy")
//!     .with_player("Danny")
//!     .with_player("Smeck")
//!     .with_column_width(16);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.players.len(), 3);
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::player::PlayerName;
use crate::error::ConfigError;

/// Number of players at the table.
pub const PLAYER_COUNT: usize = 3;

/// Default scorecard column width.
pub const DEFAULT_COLUMN_WIDTH: usize = 20;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Game identifier.
    pub game_id: String,

    /// Players in seat order. The first player opens the game.
    pub players: Vec<PlayerName>,

    /// Width of each player's column on the scorecard.
    pub column_width: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_id: String::new(),
            players: Vec::new(),
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

impl GameConfig {
    /// Create a configuration with no players.
    pub fn new(game_id: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            ..Self::default()
        }
    }

    /// Create a configuration for three players.
    pub fn three_players(
        game_id: impl Into<String>,
        p1: impl Into<PlayerName>,
        p2: impl Into<PlayerName>,
        p3: impl Into<PlayerName>,
    ) -> Self {
        Self::new(game_id).with_player(p1).with_player(p2).with_player(p3)
    }

    /// Add a player in the next seat.
    #[must_use]
    pub fn with_player(mut self, player: impl Into<PlayerName>) -> Self {
        self.players.push(player.into());
        self
    }

    /// Set the scorecard column width.
    #[must_use]
    pub fn with_column_width(mut self, width: usize) -> Self {
        self.column_width = width;
        self
    }

    /// Check the configuration can start a game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.len() != PLAYER_COUNT {
            return Err(ConfigError::WrongPlayerCount {
                expected: PLAYER_COUNT,
                got: self.players.len(),
            });
        }

        let mut seen = FxHashSet::default();
        for player in &self.players {
            if player.as_str().trim().is_empty() {
                return Err(ConfigError::EmptyPlayerName);
            }
            if !seen.insert(player) {
                return Err(ConfigError::DuplicatePlayer { player: player.clone() });
            }
        }

        if self.column_width == 0 {
            return Err(ConfigError::ZeroSetting { field: "column_width" });
        }

        Ok(())
    }
}
