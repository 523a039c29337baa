//! # three-dice
//!
//! A rules engine for a three-die "ship/captain/crew" style drinking game.
//!
//! Each player gets up to three rolls per turn, holding some dice back
//! between rolls, and scores on the final combination. The engine decides
//! whether each proposed roll is legal, scores closed turns, and hands the
//! dice from player to player.
//!
//! ## Design Principles
//!
//! 1. **Caller-Supplied Dice**: The engine never rolls. Face values always
//!    come from the caller, so every game is reproducible from its inputs.
//!
//! 2. **No Partial Moves**: A rejected roll or pass leaves the game exactly
//!    as it was.
//!
//! 3. **Quiet Core**: `core`, `rules` and `game` never log and never touch
//!    a terminal. Errors are returned as typed values.
//!
//! ## Modules
//!
//! - `core`: Dice, die sets, rolls, players, configuration
//! - `rules`: Roll legality state machine and scoring
//! - `game`: Turn lifecycle, game orchestration, score ledger, records
//! - `error`: Error types
//! - `cli`: Command parsing and dispatch for the interactive front-end

pub mod core;
pub mod rules;
pub mod game;
pub mod error;
pub mod cli;

// Re-export commonly used types
pub use crate::core::{Die, DieSet, Faces, GameConfig, PlayerName, Roll};

pub use crate::rules::{consecutive_bonus, score_roll, RollScore, RollValidator, ScoreSpecial};

pub use crate::game::{Chevron, Game, GameRecord, PlayerScore, SharedGame, Turn};

pub use crate::error::{ConfigError, GameError, LegalityError, RecordError};
