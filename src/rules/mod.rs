//! Game rules: roll legality and scoring.
//!
//! - `validator`: which dice may be rolled next within a turn
//! - `scoring`: raw value and classification of a turn's final dice, and the
//!   consecutive-run bonus
//!
//! Both are pure: they read roll history and never mutate it.

pub mod scoring;
pub mod validator;

pub use scoring::{consecutive_bonus, score_roll, RollScore, ScoreSpecial, CONSECUTIVE_BONUS};
pub use validator::{RollValidator, MAX_ROLLS};
