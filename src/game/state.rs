//! Game orchestration.
//!
//! ## Game
//!
//! A `Game` owns:
//! - The configuration (id, seat order, scorecard and ledger settings)
//! - The score ledger, one `PlayerScore` per player
//! - The closed-turn history (append-only)
//! - Exactly one open turn, owned by the current player
//!
//! Rolls go to the open turn. `pass_dice` closes it, awards its bonus,
//! moves it into the history and opens a turn for the named player. Any
//! failing operation leaves the game exactly as it was.
//!
//! ```
//! use three_dice::core::GameConfig;
//! use three_dice::game::Game;
//!
//! let mut game = Game::new(GameConfig::three_players("G1", "A", "B", "C")).unwrap();
//! game.roll_with(3, 4, 5).unwrap();
//! game.roll_with(0, 0, 6).unwrap();
//!
//! let scored = game.pass_dice("B").unwrap();
//! assert_eq!(scored.score, 7);
//! assert_eq!(game.current_player().as_str(), "B");
//! ```

use im::Vector;
use rustc_hash::FxHashMap;

use super::score::{center_in, tally_marks, PlayerScore};
use super::turn::Turn;
use crate::core::{is_face, DieSet, GameConfig, PlayerName, Roll};
use crate::error::{ConfigError, GameError};
use crate::rules::{RollScore, RollValidator};

/// A three-player dice game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) scores: FxHashMap<PlayerName, PlayerScore>,
    /// Closed turns, oldest first. `im` keeps snapshot clones cheap.
    pub(crate) history: Vector<Turn>,
    pub(crate) current: Turn,
    pub(crate) current_player: PlayerName,
    pub(crate) previous_player: Option<PlayerName>,
}

impl Game {
    /// Start a game. The first seated player opens.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let scores = config
            .players
            .iter()
            .map(|p| (p.clone(), PlayerScore::new(p.clone())))
            .collect();
        let opener = config.players[0].clone();

        Ok(Self {
            scores,
            history: Vector::new(),
            current: Turn::new(opener.clone()),
            current_player: opener,
            previous_player: None,
            config,
        })
    }

    // === Queries ===

    #[must_use]
    pub fn id(&self) -> &str {
        &self.config.game_id
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Players in seat order.
    #[must_use]
    pub fn players(&self) -> &[PlayerName] {
        &self.config.players
    }

    #[must_use]
    pub fn scores(&self) -> &FxHashMap<PlayerName, PlayerScore> {
        &self.scores
    }

    #[must_use]
    pub fn score(&self, player: &str) -> Option<&PlayerScore> {
        self.scores.get(&PlayerName::new(player))
    }

    #[must_use]
    pub fn current_player(&self) -> &PlayerName {
        &self.current_player
    }

    #[must_use]
    pub fn previous_player(&self) -> Option<&PlayerName> {
        self.previous_player.as_ref()
    }

    /// The open turn.
    #[must_use]
    pub fn current_turn(&self) -> &Turn {
        &self.current
    }

    /// The most recently closed turn, the one the current player must beat.
    #[must_use]
    pub fn previous_turn(&self) -> Option<&Turn> {
        self.history.last()
    }

    /// Closed turns, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<Turn> {
        &self.history
    }

    /// Every turn of the game: the closed ones, then the open one.
    pub fn turns(&self) -> impl Iterator<Item = &Turn> + '_ {
        self.history.iter().chain(std::iter::once(&self.current))
    }

    /// Number of turns, including the open one.
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.history.len() + 1
    }

    // === Moves ===

    /// Dry run: would rolling `requested` be accepted now?
    pub fn check_roll(&self, requested: DieSet) -> Result<(), GameError> {
        self.current.check_roll(requested)
    }

    /// Every die set the current player may roll next.
    #[must_use]
    pub fn legal_requests(&self) -> Vec<DieSet> {
        if self.current.is_closed() {
            return Vec::new();
        }
        RollValidator::new().legal_requests(self.current.rolls()).into_vec()
    }

    /// Record a roll for the current player.
    ///
    /// Each value is the new face of that die, or 0 to keep the die as it
    /// lies. The dice with non-zero values form the roll request.
    pub fn roll_with(&mut self, d0: u8, d1: u8, d2: u8) -> Result<&Roll, GameError> {
        let thrown = [d0, d1, d2];
        if let Some(&value) = thrown.iter().find(|&&v| v != 0 && !is_face(v)) {
            return Err(GameError::InvalidDieFaceValue { value });
        }

        let requested = DieSet::from_bits(
            thrown
                .iter()
                .enumerate()
                .filter(|&(_, &v)| v != 0)
                .fold(0u8, |bits, (i, _)| bits | (1 << i)),
        )
        .unwrap_or(DieSet::EMPTY);
        if requested.is_empty() {
            return Err(GameError::NoDiceSpecified);
        }

        self.current.record_roll(requested, thrown)
    }

    /// Close the current turn and hand the dice to `player`.
    ///
    /// Any player may receive the dice, including the one passing them.
    /// Returns the closed turn's score.
    pub fn pass_dice(&mut self, player: &str) -> Result<RollScore, GameError> {
        let next = self
            .config
            .players
            .iter()
            .find(|p| p.as_str() == player)
            .cloned()
            .ok_or_else(|| GameError::UnknownPlayer {
                player: PlayerName::new(player),
            })?;

        let scored = self.current.close()?;

        let bonus = self.current.total_consecutive_bonus();
        self.scores
            .entry(self.current_player.clone())
            .or_insert_with(|| PlayerScore::new(self.current_player.clone()))
            .award(bonus);

        let closed = std::mem::replace(&mut self.current, Turn::new(next.clone()));
        self.history.push_back(closed);
        let passer = std::mem::replace(&mut self.current_player, next);
        self.previous_player = Some(passer);

        Ok(scored)
    }

    // === Rendering ===

    /// Player names over their first-chevron tallies.
    #[must_use]
    pub fn scorecard(&self) -> String {
        let width = self.config.column_width;
        let players = &self.config.players;

        let names: Vec<String> = players.iter().map(|p| center_in(p.as_str(), width)).collect();
        let tallies: Vec<String> = players
            .iter()
            .map(|p| match self.scores.get(p).and_then(PlayerScore::first_count) {
                Some(count) => center_in(&tally_marks(count), width),
                None => " ".repeat(width),
            })
            .collect();

        format!(
            "{}\n{}\n{}\n",
            names.join("|"),
            "-".repeat(width * players.len()),
            tallies.join("|")
        )
    }

    /// The open turn, and what it has to beat.
    #[must_use]
    pub fn current_turn_summary(&self) -> String {
        match self.previous_turn() {
            Some(prev) => format!(
                "{}\n\tAgainst {}'s {}",
                self.current,
                prev.player(),
                prev.roll_string()
            ),
            None => format!("{}\n\tto start the game!!!", self.current),
        }
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Game {}: ", self.config.game_id)?;
        for (i, player) in self.config.players.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{player}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LegalityError;
    use crate::rules::ScoreSpecial;

    fn game() -> Game {
        Game::new(GameConfig::three_players("G1", "A", "B", "C")).unwrap()
    }

    #[test]
    fn test_new_game() {
        let g = game();
        assert_eq!(g.current_player(), "A");
        assert_eq!(g.previous_player(), None);
        assert!(g.previous_turn().is_none());
        assert_eq!(g.turn_count(), 1);
        assert_eq!(g.scores().len(), 3);
        assert_eq!(g.to_string(), "Game G1: A, B, C");
    }

    #[test]
    fn test_new_game_rejects_bad_config() {
        let err = Game::new(GameConfig::new("G1").with_player("A")).unwrap_err();
        assert_eq!(err, ConfigError::WrongPlayerCount { expected: 3, got: 1 });
    }

    #[test]
    fn test_roll_with_invalid_face() {
        let mut g = game();
        assert_eq!(g.roll_with(3, 7, 1), Err(GameError::InvalidDieFaceValue { value: 7 }));
        assert_eq!(g.current_turn().num_rolls(), 0);
    }

    #[test]
    fn test_roll_with_nothing() {
        let mut g = game();
        assert_eq!(g.roll_with(0, 0, 0), Err(GameError::NoDiceSpecified));
    }

    #[test]
    fn test_roll_with_partial_first_roll() {
        let mut g = game();
        let requested = DieSet::from_bits(0b011).unwrap();
        assert_eq!(
            g.roll_with(2, 3, 0),
            Err(GameError::Illegal(LegalityError::MustRollAllDice { requested }))
        );
    }

    #[test]
    fn test_roll_with_carries_kept_values() {
        let mut g = game();
        g.roll_with(3, 4, 5).unwrap();
        let roll = g.roll_with(0, 0, 6).unwrap();
        assert_eq!(roll.results, [3, 4, 6]);
    }

    #[test]
    fn test_fourth_roll_rejected() {
        let mut g = game();
        g.roll_with(2, 2, 5).unwrap();
        g.roll_with(0, 0, 1).unwrap();
        g.roll_with(0, 0, 4).unwrap();

        assert_eq!(
            g.roll_with(0, 0, 2),
            Err(GameError::Illegal(LegalityError::TooManyRolls { rolls: 3 }))
        );
        assert!(g.legal_requests().is_empty());
    }

    #[test]
    fn test_pass_dice_rotates() {
        let mut g = game();
        g.roll_with(3, 4, 5).unwrap();
        g.roll_with(0, 0, 6).unwrap();

        let scored = g.pass_dice("C").unwrap();
        assert_eq!(scored, RollScore::new(7, ScoreSpecial::None));
        assert_eq!(g.current_player(), "C");
        assert_eq!(g.previous_player().map(PlayerName::as_str), Some("A"));
        assert_eq!(g.history().len(), 1);
        assert_eq!(g.current_turn().num_rolls(), 0);
        assert_eq!(g.previous_turn().map(Turn::roll_string).as_deref(), Some("[3][4][6]"));
    }

    #[test]
    fn test_pass_dice_unknown_player() {
        let mut g = game();
        g.roll_with(3, 4, 5).unwrap();
        let before = g.clone();

        assert_eq!(
            g.pass_dice("Zed"),
            Err(GameError::UnknownPlayer { player: PlayerName::new("Zed") })
        );
        assert_eq!(g, before);
    }

    #[test]
    fn test_pass_dice_without_rolls() {
        let mut g = game();
        assert_eq!(g.pass_dice("B"), Err(GameError::NoRollsToClose));
        assert_eq!(g.current_player(), "A");
        assert!(g.history().is_empty());
    }

    #[test]
    fn test_pass_dice_to_self() {
        let mut g = game();
        g.roll_with(1, 1, 1).unwrap();
        g.pass_dice("A").unwrap();
        assert_eq!(g.current_player(), "A");
        assert_eq!(g.previous_player().map(PlayerName::as_str), Some("A"));
    }

    #[test]
    fn test_consecutive_bonus_lands_on_chevron() {
        let mut g = game();
        g.roll_with(2, 3, 4).unwrap();
        g.roll_with(0, 0, 1).unwrap();
        g.pass_dice("B").unwrap();

        assert_eq!(g.score("A").and_then(PlayerScore::first_count), Some(4));
        assert_eq!(g.score("B").and_then(PlayerScore::first_count), Some(0));
    }

    #[test]
    fn test_check_roll_does_not_mutate() {
        let mut g = game();
        g.roll_with(1, 2, 4).unwrap();
        let before = g.clone();

        assert_eq!(g.check_roll(DieSet::from_bits(0b100).unwrap()), Ok(()));
        assert_eq!(
            g.check_roll(DieSet::ALL),
            Err(GameError::Illegal(LegalityError::MustKeepAtLeastOneDie))
        );
        assert_eq!(g, before);
    }

    #[test]
    fn test_current_turn_summary() {
        let mut g = game();
        assert_eq!(g.current_turn_summary(), "A's turn: has yet to roll\n\tto start the game!!!");

        g.roll_with(3, 4, 6).unwrap();
        g.pass_dice("B").unwrap();
        assert_eq!(
            g.current_turn_summary(),
            "B's turn: has yet to roll\n\tAgainst A's [3][4][6]"
        );
    }

    #[test]
    fn test_scorecard() {
        let config = GameConfig::three_players("G1", "A", "B", "C").with_column_width(20);
        let mut g = Game::new(config).unwrap();
        g.roll_with(2, 3, 4).unwrap();
        g.pass_dice("B").unwrap();

        let card = g.scorecard();
        let lines: Vec<&str> = card.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            format!("{}|{}|{}", center_in("A", 20), center_in("B", 20), center_in("C", 20))
        );
        assert_eq!(lines[1], "-".repeat(60));
        assert!(lines[2].starts_with("ii "));
        assert!(card.ends_with('\n'));
    }

    #[test]
    fn test_turns_ends_with_open_turn() {
        let mut g = game();
        g.roll_with(5, 5, 5).unwrap();
        g.pass_dice("B").unwrap();

        let players: Vec<&str> = g.turns().map(|t| t.player().as_str()).collect();
        assert_eq!(players, vec!["A", "B"]);
        assert!(!g.turns().last().unwrap().is_closed());
    }
}
