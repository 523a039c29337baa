//! Scoring of a turn's final dice.
//!
//! Rules, first match wins:
//!
//! 1. Triple six scores 0, classified `TripleSix`.
//! 2. Triple five scores 0, classified `TripleFive`.
//! 3. Any other triple `(v, v, v)` scores `v`, classified `Triple`.
//! 4. Otherwise the dice are summed, with sixes counting zero.
//!
//! A non-triple whose sum is not positive has no scoring value. That is
//! reported as `None`, distinct from a legitimate zero score.
//!
//! Consecutive runs earn a flat bonus per roll, accumulated over a turn.

use serde::{Deserialize, Serialize};

use crate::core::{is_face, Faces, Roll};
use crate::error::GameError;

/// Bonus points for each roll showing a consecutive run.
pub const CONSECUTIVE_BONUS: u32 = 2;

/// Face that counts zero on its own.
const ZERO_FACE: u8 = 6;

/// Special classification of a scored roll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreSpecial {
    /// Plain sum, nothing special.
    #[default]
    None,
    /// Three of a kind other than fives or sixes.
    Triple,
    /// Three fives.
    TripleFive,
    /// Three sixes.
    TripleSix,
}

/// Raw value of a roll plus its classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollScore {
    pub score: u32,
    pub special: ScoreSpecial,
}

impl RollScore {
    #[must_use]
    pub const fn new(score: u32, special: ScoreSpecial) -> Self {
        Self { score, special }
    }
}

impl std::fmt::Display for RollScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.special {
            ScoreSpecial::None => write!(f, "{}", self.score),
            ScoreSpecial::Triple => write!(f, "Triple {}", self.score),
            ScoreSpecial::TripleFive => f.write_str("Triple-Five"),
            ScoreSpecial::TripleSix => f.write_str("Triple-Six"),
        }
    }
}

/// Score three face values.
///
/// Returns `None` when the roll has no scoring value, which includes any
/// value that is not a die face.
///
/// ```
/// use three_dice::rules::{score_roll, RollScore, ScoreSpecial};
///
/// assert_eq!(score_roll([1, 6, 3]), Some(RollScore::new(4, ScoreSpecial::None)));
/// assert_eq!(score_roll([4, 4, 4]), Some(RollScore::new(4, ScoreSpecial::Triple)));
/// assert_eq!(score_roll([0, 0, 0]), None);
/// ```
#[must_use]
pub fn score_roll(results: Faces) -> Option<RollScore> {
    if !results.iter().all(|&v| is_face(v)) {
        return None;
    }

    let [a, b, c] = results;
    if a == b && b == c {
        let scored = match a {
            6 => RollScore::new(0, ScoreSpecial::TripleSix),
            5 => RollScore::new(0, ScoreSpecial::TripleFive),
            v => RollScore::new(u32::from(v), ScoreSpecial::Triple),
        };
        return Some(scored);
    }

    let sum: u32 = results
        .iter()
        .filter(|&&v| v != ZERO_FACE)
        .map(|&v| u32::from(v))
        .sum();

    (sum > 0).then_some(RollScore::new(sum, ScoreSpecial::None))
}

/// Sum the consecutive-run bonus over rolls `0..=upto`.
///
/// Each roll showing a run adds `CONSECUTIVE_BONUS`; bonuses from different
/// rolls add up. Fails if `upto` does not address a recorded roll.
pub fn consecutive_bonus(rolls: &[Roll], upto: usize) -> Result<u32, GameError> {
    let counted = rolls.get(..=upto).ok_or(GameError::RollIndexOutOfRange {
        index: upto,
        rolls: rolls.len(),
    })?;

    Ok(counted
        .iter()
        .filter(|roll| roll.is_consecutive)
        .fold(0, |bonus, _| bonus + CONSECUTIVE_BONUS))
}
