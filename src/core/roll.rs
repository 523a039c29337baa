//! A single roll of the dice within a turn.
//!
//! A roll records which dice were physically thrown and the face values of
//! all three dice afterwards. Dice that were not thrown carry their value
//! forward from the previous roll.
//!
//! ## Kept dice
//!
//! `kept` names the dice held back for the *next* roll. It is only known once
//! the next roll happens (it is the complement of what that roll threw), so
//! the most recent roll of a turn always has an empty `kept` set.

use serde::{Deserialize, Serialize};

use super::die::{Die, DieSet, DICE_COUNT};

/// Face values of the three dice, indexed by `Die::index()`.
pub type Faces = [u8; DICE_COUNT];

/// Lowest face on a die.
pub const MIN_FACE: u8 = 1;

/// Highest face on a die.
pub const MAX_FACE: u8 = 6;

/// Check whether a value is a face of a six-sided die.
#[must_use]
pub const fn is_face(value: u8) -> bool {
    value >= MIN_FACE && value <= MAX_FACE
}

/// True iff the three values, sorted, are three consecutive integers.
///
/// Input order does not matter.
///
/// ```
/// use three_dice::core::is_consecutive;
///
/// assert!(is_consecutive([4, 2, 3]));
/// assert!(!is_consecutive([1, 1, 2]));
/// ```
#[must_use]
pub fn is_consecutive(faces: Faces) -> bool {
    let mut sorted = faces;
    sorted.sort_unstable();
    sorted[0].checked_add(1) == Some(sorted[1]) && sorted[1].checked_add(1) == Some(sorted[2])
}

/// One roll event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    /// Dice physically thrown in this roll.
    pub rolled: DieSet,

    /// Face values of all three dice after the roll.
    pub results: Faces,

    /// Dice held back for the next roll (filled in when the next roll happens).
    pub kept: DieSet,

    /// Dice that left the table. Reserved; always empty.
    pub off_table: DieSet,

    /// Whether `results` form a consecutive run.
    pub is_consecutive: bool,
}

impl Roll {
    /// Build a roll from the thrown dice and the resulting faces.
    #[must_use]
    pub fn new(rolled: DieSet, results: Faces) -> Self {
        Self {
            rolled,
            results,
            kept: DieSet::EMPTY,
            off_table: DieSet::EMPTY,
            is_consecutive: is_consecutive(results),
        }
    }

    /// Build the roll that follows `previous` (or opens a turn when `None`).
    ///
    /// Dice in `rolled` take their value from `thrown`; every other die keeps
    /// the previous roll's value (zero when there is no previous roll).
    #[must_use]
    pub fn following(previous: Option<&Roll>, rolled: DieSet, thrown: Faces) -> Self {
        let mut results = previous.map_or([0; DICE_COUNT], |p| p.results);
        for die in rolled.iter() {
            results[die.index()] = thrown[die.index()];
        }
        Self::new(rolled, results)
    }

    /// Face value of one die.
    #[must_use]
    pub fn face(&self, die: Die) -> u8 {
        self.results[die.index()]
    }

    /// Dice of `set` that all show the same face, if the set is non-empty.
    ///
    /// Returns the shared face value, or `None` if the faces differ or the set
    /// is empty.
    #[must_use]
    pub fn common_face(&self, set: DieSet) -> Option<u8> {
        let mut faces = set.iter().map(|d| self.face(d));
        let first = faces.next()?;
        faces.all(|f| f == first).then_some(first)
    }

    /// Render the faces as `[a][b][c]`.
    #[must_use]
    pub fn faces_string(&self) -> String {
        self.results.iter().map(|v| format!("[{v}]")).collect()
    }
}

impl std::fmt::Display for Roll {
    /// Each die renders as `+[v]` when thrown in this roll, ` [v]` otherwise.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, die) in Die::ALL.into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            let marker = if self.rolled.contains(die) { '+' } else { ' ' };
            write!(f, "{marker}[{}]", self.face(die))?;
        }
        Ok(())
    }
}
