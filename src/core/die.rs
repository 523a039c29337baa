//! Die identification and die-set algebra.
//!
//! ## Die
//!
//! The three dice on the table are named `Die0`, `Die1` and `Die2`.
//! Each maps to a fixed position in a roll's face-value array.
//!
//! ## DieSet
//!
//! A subset of the three dice. Legality rules are written as set algebra
//! over `DieSet` (union, intersection, complement, containment), and the
//! type guarantees that a set never names a die outside the table.
//!
//! ```
//! use three_dice::core::{Die, DieSet};
//!
//! let kept = DieSet::from_dice(&[Die::Die0, Die::Die1]);
//! let rolled = kept.complement();
//!
//! assert_eq!(rolled, DieSet::single(Die::Die2));
//! assert!(kept.union(rolled).is_full());
//! assert!(!kept.overlaps(rolled));
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr, Not};

/// Number of dice on the table.
pub const DICE_COUNT: usize = 3;

/// One of the three dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Die {
    Die0,
    Die1,
    Die2,
}

impl Die {
    /// All dice in table order.
    pub const ALL: [Die; DICE_COUNT] = [Die::Die0, Die::Die1, Die::Die2];

    /// Position of this die in a face-value array.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Die::Die0 => 0,
            Die::Die1 => 1,
            Die::Die2 => 2,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Die::Die0 => "Die0",
            Die::Die1 => "Die1",
            Die::Die2 => "Die2",
        }
    }

    /// Look up a die by array position.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Die> {
        match index {
            0 => Some(Die::Die0),
            1 => Some(Die::Die1),
            2 => Some(Die::Die2),
            _ => None,
        }
    }

    const fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of dice, always a subset of the three dice on the table.
///
/// The empty set means "no dice selected" and is never a legal roll request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DieSet(u8);

impl DieSet {
    /// No dice.
    pub const EMPTY: DieSet = DieSet(0);

    /// All three dice.
    pub const ALL: DieSet = DieSet(0b111);

    /// A set holding one die.
    #[must_use]
    pub const fn single(die: Die) -> Self {
        Self(die.bit())
    }

    /// Build a set from explicit dice. Duplicates are ignored.
    #[must_use]
    pub fn from_dice(dice: &[Die]) -> Self {
        dice.iter().copied().collect()
    }

    /// Build a set from a bit pattern (bit `i` is die `i`).
    ///
    /// Returns `None` if any bit outside the three dice is set.
    ///
    /// ```
    /// use three_dice::core::{Die, DieSet};
    ///
    /// assert_eq!(DieSet::from_bits(0b100), Some(DieSet::single(Die::Die2)));
    /// assert_eq!(DieSet::from_bits(0b1000), None);
    /// ```
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::ALL.0 == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Raw bit pattern.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn union(self, other: DieSet) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn intersection(self, other: DieSet) -> Self {
        Self(self.0 & other.0)
    }

    /// Dice in `self` that are not in `other`.
    #[must_use]
    pub const fn difference(self, other: DieSet) -> Self {
        Self(self.0 & !other.0)
    }

    /// Dice not in this set.
    #[must_use]
    pub const fn complement(self) -> Self {
        Self(!self.0 & Self::ALL.0)
    }

    /// Set with `die` added.
    #[must_use]
    pub const fn with(self, die: Die) -> Self {
        Self(self.0 | die.bit())
    }

    /// Number of dice in the set (0..=3).
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when all three dice are in the set.
    #[must_use]
    pub const fn is_full(self) -> bool {
        self.0 == Self::ALL.0
    }

    #[must_use]
    pub const fn contains(self, die: Die) -> bool {
        self.0 & die.bit() != 0
    }

    #[must_use]
    pub const fn is_subset_of(self, other: DieSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// True when the two sets share at least one die.
    #[must_use]
    pub const fn overlaps(self, other: DieSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Iterate over the dice in table order.
    pub fn iter(self) -> impl Iterator<Item = Die> {
        Die::ALL.into_iter().filter(move |&d| self.contains(d))
    }
}

impl FromIterator<Die> for DieSet {
    fn from_iter<I: IntoIterator<Item = Die>>(iter: I) -> Self {
        iter.into_iter().fold(DieSet::EMPTY, DieSet::with)
    }
}

impl From<Die> for DieSet {
    fn from(die: Die) -> Self {
        DieSet::single(die)
    }
}

impl TryFrom<u8> for DieSet {
    type Error = String;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        DieSet::from_bits(bits).ok_or_else(|| format!("invalid die set bits 0b{bits:b}"))
    }
}

impl From<DieSet> for u8 {
    fn from(set: DieSet) -> Self {
        set.0
    }
}

impl BitOr for DieSet {
    type Output = DieSet;

    fn bitor(self, rhs: DieSet) -> DieSet {
        self.union(rhs)
    }
}

impl BitAnd for DieSet {
    type Output = DieSet;

    fn bitand(self, rhs: DieSet) -> DieSet {
        self.intersection(rhs)
    }
}

impl Not for DieSet {
    type Output = DieSet;

    fn not(self) -> DieSet {
        self.complement()
    }
}

impl std::fmt::Display for DieSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0b{:03b}", self.0)
    }
}
