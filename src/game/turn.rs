//! One player's turn: up to three rolls, then a final score.
//!
//! A turn is open until `close` scores its last roll. Closing happens
//! exactly once; a closed turn accepts no more rolls. Failed operations
//! leave the turn as it was.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{DieSet, Faces, PlayerName, Roll, DICE_COUNT};
use crate::error::GameError;
use crate::rules::{consecutive_bonus, score_roll, RollScore, RollValidator, ScoreSpecial, MAX_ROLLS};

/// A single player's turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    player: PlayerName,
    rolls: SmallVec<[Roll; MAX_ROLLS]>,
    final_dice_vals: Faces,
    score: u32,
    score_special: ScoreSpecial,
    closed: bool,
}

impl Turn {
    /// Open a turn with no rolls.
    #[must_use]
    pub fn new(player: PlayerName) -> Self {
        Self {
            player,
            rolls: SmallVec::new(),
            final_dice_vals: [0; DICE_COUNT],
            score: 0,
            score_special: ScoreSpecial::None,
            closed: false,
        }
    }

    #[must_use]
    pub fn player(&self) -> &PlayerName {
        &self.player
    }

    #[must_use]
    pub fn rolls(&self) -> &[Roll] {
        &self.rolls
    }

    #[must_use]
    pub fn num_rolls(&self) -> usize {
        self.rolls.len()
    }

    #[must_use]
    pub fn last_roll(&self) -> Option<&Roll> {
        self.rolls.last()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Final dice; all zero until the turn closes.
    #[must_use]
    pub fn final_dice_vals(&self) -> Faces {
        self.final_dice_vals
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn score_special(&self) -> ScoreSpecial {
        self.score_special
    }

    /// The finalized score, once closed.
    #[must_use]
    pub fn final_score(&self) -> Option<RollScore> {
        self.closed.then(|| RollScore::new(self.score, self.score_special))
    }

    /// Check whether `requested` may be rolled next.
    pub fn check_roll(&self, requested: DieSet) -> Result<(), GameError> {
        if self.closed {
            return Err(GameError::TurnClosed);
        }
        RollValidator::new().check_roll(self, requested)?;
        Ok(())
    }

    /// Record a roll of `requested`, taking their new faces from `thrown`.
    ///
    /// Faces in `thrown` for dice outside `requested` are ignored. The
    /// previous roll's `kept` set becomes the dice not rolled now.
    pub fn record_roll(&mut self, requested: DieSet, thrown: Faces) -> Result<&Roll, GameError> {
        self.check_roll(requested)?;

        let roll = Roll::following(self.rolls.last(), requested, thrown);
        if let Some(previous) = self.rolls.last_mut() {
            previous.kept = requested.complement();
        }
        self.rolls.push(roll);

        Ok(&self.rolls[self.rolls.len() - 1])
    }

    /// Score the last roll and close the turn.
    pub fn close(&mut self) -> Result<RollScore, GameError> {
        if self.closed {
            return Err(GameError::TurnClosed);
        }
        let last = self.rolls.last().ok_or(GameError::NoRollsToClose)?;
        let scored = score_roll(last.results).ok_or_else(|| GameError::InvalidFinalRoll {
            faces: last.faces_string(),
        })?;

        self.final_dice_vals = last.results;
        self.score = scored.score;
        self.score_special = scored.special;
        self.closed = true;
        Ok(scored)
    }

    /// Consecutive-run bonus over rolls `0..=upto`.
    pub fn consecutive_bonus(&self, upto: usize) -> Result<u32, GameError> {
        consecutive_bonus(&self.rolls, upto)
    }

    /// Consecutive-run bonus over every roll so far.
    #[must_use]
    pub fn total_consecutive_bonus(&self) -> u32 {
        self.rolls
            .len()
            .checked_sub(1)
            .and_then(|last| self.consecutive_bonus(last).ok())
            .unwrap_or(0)
    }

    /// Final dice as `[a][b][c]`.
    #[must_use]
    pub fn roll_string(&self) -> String {
        self.final_dice_vals.iter().map(|v| format!("[{v}]")).collect()
    }
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}'s turn: ", self.player)?;
        if self.rolls.is_empty() {
            return f.write_str("has yet to roll");
        }
        for (i, roll) in self.rolls.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{roll}")?;
        }
        Ok(())
    }
}
