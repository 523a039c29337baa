//! Roll legality state machine.
//!
//! The state is the number of rolls already recorded in the turn:
//!
//! - **No rolls**: all three dice must be rolled.
//! - **One roll**: at least one die must be held back.
//! - **Two rolls**: depends on how many dice were held after the first roll.
//!   - Two held: re-rolling exactly that pair is allowed only when the die
//!     left unrolled shows a five (going for triple-five). Re-rolling the
//!     single die from roll two is allowed only when the held pair matches
//!     (going for a triple). Re-rolling just one of the pair never is.
//!   - One held: held dice may not be re-rolled, and a third roll is allowed
//!     only when the two dice carried into it match each other.
//! - **Three rolls**: the turn has no further roll.
//!
//! Checks run in that order and the first failure is reported.

use smallvec::SmallVec;

use crate::core::{DieSet, Roll};
use crate::error::LegalityError;
use crate::game::Turn;

/// Most rolls a turn may hold.
pub const MAX_ROLLS: usize = 3;

/// Face the unrolled die must show to re-roll a held pair.
const TRIPLE_FIVE_FACE: u8 = 5;

/// Decides whether a set of dice may legally be rolled next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RollValidator;

impl RollValidator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Check a proposed roll against a turn's roll history.
    pub fn check_roll(&self, turn: &Turn, requested: DieSet) -> Result<(), LegalityError> {
        self.check_history(turn.rolls(), requested)
    }

    /// Check a proposed roll against a bare roll history.
    pub fn check_history(&self, rolls: &[Roll], requested: DieSet) -> Result<(), LegalityError> {
        if rolls.len() >= MAX_ROLLS {
            return Err(LegalityError::TooManyRolls { rolls: rolls.len() });
        }
        if requested.is_empty() {
            return Err(LegalityError::EmptyRollRequest);
        }

        match rolls {
            [] if !requested.is_full() => Err(LegalityError::MustRollAllDice { requested }),
            [] => Ok(()),
            [_] if requested.is_full() => Err(LegalityError::MustKeepAtLeastOneDie),
            [_] => Ok(()),
            [_, second, ..] => check_third_roll(second, requested),
        }
    }

    /// Every die set that may legally be rolled next.
    ///
    /// Empty when the turn cannot roll again.
    pub fn legal_requests(&self, rolls: &[Roll]) -> SmallVec<[DieSet; 7]> {
        (1..=DieSet::ALL.bits())
            .filter_map(DieSet::from_bits)
            .filter(|&set| self.check_history(rolls, set).is_ok())
            .collect()
    }
}

/// Third-roll rules. `second` is the roll just completed.
fn check_third_roll(second: &Roll, requested: DieSet) -> Result<(), LegalityError> {
    // Dice held since the first roll are exactly those not thrown in the second.
    let held = second.rolled.complement();

    match held.len() {
        2 => {
            let lone = second.rolled;
            if requested == held {
                // Going for triple-five: the die left on the table must be a five.
                match second.common_face(lone) {
                    Some(TRIPLE_FIVE_FACE) => Ok(()),
                    face => Err(LegalityError::OnlyTripleFiveMayRerollPair {
                        face: face.unwrap_or(0),
                    }),
                }
            } else if !requested.overlaps(held) {
                // Re-rolling the same single die again: the held pair must match.
                if second.common_face(held).is_some() {
                    Ok(())
                } else {
                    Err(LegalityError::OnlyMatchingTripleMayRerollSingle { dice: requested })
                }
            } else if requested.intersection(held).len() == 1 {
                Err(LegalityError::CannotRerollPartialKeptPair {
                    dice: requested.intersection(held),
                })
            } else {
                Err(LegalityError::CannotRerollKeptDie { dice: held })
            }
        }
        1 => {
            if requested.overlaps(held) {
                return Err(LegalityError::CannotRerollKeptDie {
                    dice: requested.intersection(held),
                });
            }
            let carried = requested.complement();
            if carried.len() == 2 && second.common_face(carried).is_some() {
                Ok(())
            } else {
                Err(LegalityError::NoLegalRerollAvailable)
            }
        }
        _ => Err(LegalityError::NoLegalRerollAvailable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Die;

    const D0: DieSet = DieSet::single(Die::Die0);
    const D1: DieSet = DieSet::single(Die::Die1);
    const D2: DieSet = DieSet::single(Die::Die2);

    fn history(first: [u8; 3], second_rolled: DieSet, second: [u8; 3]) -> Vec<Roll> {
        let mut one = Roll::new(DieSet::ALL, first);
        let two = Roll::following(Some(&one), second_rolled, second);
        one.kept = second_rolled.complement();
        vec![one, two]
    }

    #[test]
    fn test_first_roll_must_roll_all() {
        let v = RollValidator::new();

        assert_eq!(v.check_history(&[], DieSet::ALL), Ok(()));
        for partial in [D0, D1, D2, D0 | D1, D1 | D2, D0 | D2] {
            assert_eq!(
                v.check_history(&[], partial),
                Err(LegalityError::MustRollAllDice { requested: partial })
            );
        }
    }

    #[test]
    fn test_empty_request() {
        let v = RollValidator::new();
        assert_eq!(v.check_history(&[], DieSet::EMPTY), Err(LegalityError::EmptyRollRequest));

        let rolls = vec![Roll::new(DieSet::ALL, [1, 2, 4])];
        assert_eq!(v.check_history(&rolls, DieSet::EMPTY), Err(LegalityError::EmptyRollRequest));
    }

    #[test]
    fn test_second_roll_must_keep_one() {
        let v = RollValidator::new();
        let rolls = vec![Roll::new(DieSet::ALL, [1, 2, 4])];

        assert_eq!(v.check_history(&rolls, DieSet::ALL), Err(LegalityError::MustKeepAtLeastOneDie));
        for set in [D0 | D1, D1 | D2, D0 | D2, D0, D1, D2] {
            assert_eq!(v.check_history(&rolls, set), Ok(()));
        }
    }

    #[test]
    fn test_one_held_rerolls_third_when_carried_pair_matches() {
        let v = RollValidator::new();
        // Held die0 (a 1), threw die1+die2 and got 1 and 4.
        let rolls = history([1, 2, 4], D1 | D2, [0, 1, 4]);

        assert_eq!(v.check_history(&rolls, D2), Ok(()));
        assert_eq!(v.check_history(&rolls, D1), Err(LegalityError::NoLegalRerollAvailable));
        assert_eq!(v.check_history(&rolls, D1 | D2), Err(LegalityError::NoLegalRerollAvailable));
    }

    #[test]
    fn test_one_held_cannot_reroll_held_die() {
        let v = RollValidator::new();
        let rolls = history([1, 2, 4], D1 | D2, [0, 1, 4]);

        assert_eq!(v.check_history(&rolls, D0), Err(LegalityError::CannotRerollKeptDie { dice: D0 }));
        assert_eq!(
            v.check_history(&rolls, D0 | D1),
            Err(LegalityError::CannotRerollKeptDie { dice: D0 })
        );
    }

    #[test]
    fn test_one_held_without_match_has_no_reroll() {
        let v = RollValidator::new();
        let rolls = history([1, 2, 4], D1 | D2, [0, 3, 4]);

        assert_eq!(v.legal_requests(&rolls).len(), 0);
    }

    #[test]
    fn test_two_held_pair_reroll_needs_five() {
        let v = RollValidator::new();
        let chasing = history([3, 3, 1], D2, [0, 0, 5]);
        assert_eq!(v.check_history(&chasing, D0 | D1), Ok(()));

        let not_chasing = history([3, 3, 1], D2, [0, 0, 4]);
        assert_eq!(
            v.check_history(&not_chasing, D0 | D1),
            Err(LegalityError::OnlyTripleFiveMayRerollPair { face: 4 })
        );
    }

    #[test]
    fn test_two_held_single_reroll_needs_matching_pair() {
        let v = RollValidator::new();
        let matching = history([3, 3, 1], D2, [0, 0, 4]);
        assert_eq!(v.check_history(&matching, D2), Ok(()));

        let mismatched = history([1, 2, 4], D2, [0, 0, 5]);
        assert_eq!(
            v.check_history(&mismatched, D2),
            Err(LegalityError::OnlyMatchingTripleMayRerollSingle { dice: D2 })
        );
    }

    #[test]
    fn test_two_held_partial_pair() {
        let v = RollValidator::new();
        let rolls = history([3, 3, 1], D2, [0, 0, 5]);

        assert_eq!(
            v.check_history(&rolls, D0),
            Err(LegalityError::CannotRerollPartialKeptPair { dice: D0 })
        );
        assert_eq!(
            v.check_history(&rolls, D1 | D2),
            Err(LegalityError::CannotRerollPartialKeptPair { dice: D1 })
        );
        assert_eq!(
            v.check_history(&rolls, DieSet::ALL),
            Err(LegalityError::CannotRerollKeptDie { dice: D0 | D1 })
        );
    }

    #[test]
    fn test_two_held_non_matching_blocks_everything() {
        let v = RollValidator::new();
        // Held a non-matching pair, the new die is not a five.
        let rolls = history([1, 2, 4], D2, [0, 0, 3]);

        for bits in 1..=7u8 {
            let set = DieSet::from_bits(bits).unwrap();
            assert!(v.check_history(&rolls, set).is_err(), "allowed {set}");
        }
    }

    #[test]
    fn test_no_fourth_roll() {
        let v = RollValidator::new();
        let mut rolls = history([3, 3, 1], D2, [0, 0, 4]);
        let third = Roll::following(rolls.last(), D2, [0, 0, 3]);
        rolls.push(third);

        assert_eq!(v.check_history(&rolls, D2), Err(LegalityError::TooManyRolls { rolls: 3 }));
        assert!(v.legal_requests(&rolls).is_empty());
    }

    #[test]
    fn test_legal_requests() {
        let v = RollValidator::new();

        assert_eq!(v.legal_requests(&[]).as_slice(), &[DieSet::ALL]);

        let rolls = vec![Roll::new(DieSet::ALL, [1, 2, 4])];
        assert_eq!(v.legal_requests(&rolls).len(), 6);

        let rolls = history([5, 5, 1], D2, [0, 0, 5]);
        // Pair re-roll (the loose die is a five) and single re-roll (pair matches).
        assert_eq!(v.legal_requests(&rolls).as_slice(), &[D0 | D1, D2]);
    }
}
