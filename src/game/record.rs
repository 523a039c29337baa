//! Structured game record.
//!
//! `GameRecord` is the shape a rendering or storage layer sees. Field names
//! are stable:
//!
//! - `game_id`, `players` (seat order)
//! - `scores`: player to `{player_name, chevrons: [{count, is_filled, is_paid}]}`
//! - `prev_player`, `cur_player` (nullable)
//! - `turns`: every turn, closed ones first, the open turn last
//!
//! Records encode as pretty JSON or as compact `bincode` bytes. Rebuilding a
//! game from a record checks the seating, the score ledger, and every turn:
//! each roll must have been legal when it was made, show real faces, and
//! carry a consecutive flag that matches those faces.

use std::collections::BTreeMap;

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::score::PlayerScore;
use super::state::Game;
use super::turn::Turn;
use crate::core::{is_consecutive, is_face, GameConfig, PlayerName, DEFAULT_COLUMN_WIDTH};
use crate::error::RecordError;
use crate::rules::{RollValidator, MAX_ROLLS};

/// Serializable snapshot of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: String,
    pub players: Vec<PlayerName>,
    pub scores: BTreeMap<PlayerName, PlayerScore>,
    pub prev_player: Option<PlayerName>,
    pub cur_player: Option<PlayerName>,
    pub turns: Vec<Turn>,
    #[serde(default = "default_column_width")]
    pub column_width: usize,
}

fn default_column_width() -> usize {
    DEFAULT_COLUMN_WIDTH
}

impl GameRecord {
    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, RecordError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        Ok(bincode::deserialize(bytes)?)
    }

    fn config(&self) -> GameConfig {
        GameConfig {
            game_id: self.game_id.clone(),
            players: self.players.clone(),
            column_width: self.column_width,
        }
    }
}

impl Game {
    /// Snapshot the game as a structured record.
    #[must_use]
    pub fn record(&self) -> GameRecord {
        GameRecord {
            game_id: self.config.game_id.clone(),
            players: self.config.players.clone(),
            scores: self
                .scores
                .iter()
                .map(|(player, score)| (player.clone(), score.clone()))
                .collect(),
            prev_player: self.previous_player.clone(),
            cur_player: Some(self.current_player.clone()),
            turns: self.turns().cloned().collect(),
            column_width: self.config.column_width,
        }
    }

    /// Rebuild a game from a record.
    pub fn from_record(record: GameRecord) -> Result<Self, RecordError> {
        let config = record.config();
        config.validate()?;

        let seated: FxHashSet<&PlayerName> = config.players.iter().collect();
        let check_seated = |player: &PlayerName| {
            if seated.contains(player) {
                Ok(())
            } else {
                Err(RecordError::UnknownPlayer { player: player.clone() })
            }
        };

        for player in &config.players {
            if !record.scores.contains_key(player) {
                return Err(RecordError::MissingScore { player: player.clone() });
            }
        }
        for (player, score) in &record.scores {
            check_seated(player)?;
            if score.chevrons.is_empty() {
                return Err(RecordError::NoChevrons { player: player.clone() });
            }
        }
        if let Some(prev) = &record.prev_player {
            check_seated(prev)?;
        }

        let cur_player = record.cur_player.clone().ok_or(RecordError::MissingCurrentPlayer)?;
        check_seated(&cur_player)?;

        let mut turns = record.turns;
        for (index, turn) in turns.iter().enumerate() {
            check_seated(turn.player())?;
            check_turn(index, turn)?;
        }

        let current = turns.pop().ok_or(RecordError::NoTurns)?;
        if current.is_closed() {
            return Err(RecordError::ClosedOpenTurn);
        }
        if current.player() != &cur_player {
            return Err(RecordError::CurrentPlayerMismatch { player: cur_player });
        }
        if let Some(index) = turns.iter().position(|t| !t.is_closed()) {
            return Err(RecordError::OpenTurnInHistory { index });
        }

        Ok(Self {
            config,
            scores: record.scores.into_iter().collect(),
            history: turns.into_iter().collect::<Vector<_>>(),
            current,
            current_player: cur_player,
            previous_player: record.prev_player,
        })
    }
}

/// Replay a recorded turn's rolls against the legality rules.
fn check_turn(index: usize, turn: &Turn) -> Result<(), RecordError> {
    let rolls = turn.rolls();
    if rolls.len() > MAX_ROLLS {
        return Err(RecordError::TooManyRolls { index, rolls: rolls.len() });
    }
    if turn.is_closed() && rolls.is_empty() {
        return Err(RecordError::ClosedWithoutRolls { index });
    }

    let validator = RollValidator::new();
    for (roll_index, roll) in rolls.iter().enumerate() {
        validator
            .check_history(&rolls[..roll_index], roll.rolled)
            .map_err(|source| RecordError::IllegalRoll {
                index,
                roll: roll_index,
                source,
            })?;
        if let Some(&value) = roll.results.iter().find(|&&v| !is_face(v)) {
            return Err(RecordError::InvalidFace {
                index,
                roll: roll_index,
                value,
            });
        }
        if roll.is_consecutive != is_consecutive(roll.results) {
            return Err(RecordError::ConsecutiveMismatch { index, roll: roll_index });
        }
    }
    Ok(())
}
