//! Core types: dice, die sets, rolls, players, configuration.
//!
//! These are the building blocks the rules and the game orchestration share.
//! None of them carry rule logic beyond their own invariants.

pub mod die;
pub mod roll;
pub mod player;
pub mod config;

pub use die::{Die, DieSet, DICE_COUNT};
pub use roll::{is_consecutive, is_face, Faces, Roll, MAX_FACE, MIN_FACE};
pub use player::PlayerName;
pub use config::{GameConfig, DEFAULT_COLUMN_WIDTH, PLAYER_COUNT};
