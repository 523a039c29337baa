//! Per-player score ledger.
//!
//! Each player owns a list of chevrons, and a player always has at least one.
//! Only the first chevron is ever counted: consecutive-run bonuses accumulate
//! on it. `filled` and `paid` are carried through records untouched.

use serde::{Deserialize, Serialize};

use crate::core::PlayerName;

/// Width of one tally group on the scorecard.
const TALLY_GROUP_WIDTH: usize = 5;

/// Tally groups shown per chevron.
const TALLY_GROUPS: usize = 4;

/// Marker for a tally group that overflowed.
const TALLY_OVERFLOW: &str = "++++ ";

/// One point counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chevron {
    pub count: u32,
    #[serde(rename = "is_filled")]
    pub filled: bool,
    #[serde(rename = "is_paid")]
    pub paid: bool,
}

impl std::fmt::Display for Chevron {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "C: {}", self.count)
    }
}

/// A player's ledger entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    #[serde(rename = "player_name")]
    pub player: PlayerName,
    pub chevrons: Vec<Chevron>,
}

impl PlayerScore {
    /// Ledger entry with a single empty chevron.
    #[must_use]
    pub fn new(player: PlayerName) -> Self {
        Self {
            player,
            chevrons: vec![Chevron::default()],
        }
    }

    /// Count on the first chevron, which is what the scorecard shows.
    #[must_use]
    pub fn first_count(&self) -> Option<u32> {
        self.chevrons.first().map(|c| c.count)
    }

    /// Add points to the first chevron.
    pub fn award(&mut self, points: u32) {
        match self.chevrons.first_mut() {
            Some(chevron) => chevron.count += points,
            None => self.chevrons.push(Chevron {
                count: points,
                ..Chevron::default()
            }),
        }
    }
}

/// Render a count as tally marks: four groups of up to five `i` marks.
///
/// A group holding more than five collapses to an overflow marker, and the
/// remainder carries on into the next group.
///
/// ```
/// use three_dice::game::tally_marks;
///
/// assert_eq!(tally_marks(3), "iii                 ");
/// assert_eq!(tally_marks(7), "++++ ii             ");
/// ```
#[must_use]
pub fn tally_marks(count: u32) -> String {
    let mut out = String::with_capacity(TALLY_GROUPS * TALLY_GROUP_WIDTH);
    let mut left = i64::from(count);
    for _ in 0..TALLY_GROUPS {
        if left <= 0 {
            out.push_str(&" ".repeat(TALLY_GROUP_WIDTH));
        } else if left > TALLY_GROUP_WIDTH as i64 {
            out.push_str(TALLY_OVERFLOW);
        } else {
            let marks = "i".repeat(left as usize);
            out.push_str(&format!("{marks:<width$}", width = TALLY_GROUP_WIDTH));
        }
        left -= TALLY_GROUP_WIDTH as i64;
    }
    out
}

/// Center `s` in a column of `width` characters.
///
/// Text longer than the column is left as is.
#[must_use]
pub fn center_in(s: &str, width: usize) -> String {
    let inner = (width + s.chars().count()) / 2;
    format!("{:<width$}", format!("{s:>inner$}"))
}
