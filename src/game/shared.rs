//! A game shared between callers.
//!
//! Every mutation runs to completion under the game's lock, so callers on
//! different threads never see a game mid-move. Reads hand out snapshots
//! taken under the same lock.

use std::sync::{Arc, Mutex, MutexGuard};

use super::record::GameRecord;
use super::state::Game;
use crate::core::{DieSet, Roll};
use crate::error::GameError;
use crate::rules::RollScore;

/// Cloneable handle to one game behind a mutex.
#[derive(Clone, Debug)]
pub struct SharedGame {
    inner: Arc<Mutex<Game>>,
}

impl SharedGame {
    #[must_use]
    pub fn new(game: Game) -> Self {
        Self {
            inner: Arc::new(Mutex::new(game)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Game> {
        // Moves never panic partway, so a poisoned game is still consistent.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record a roll; returns the roll as recorded.
    pub fn roll_with(&self, d0: u8, d1: u8, d2: u8) -> Result<Roll, GameError> {
        self.lock().roll_with(d0, d1, d2).cloned()
    }

    pub fn pass_dice(&self, player: &str) -> Result<RollScore, GameError> {
        self.lock().pass_dice(player)
    }

    pub fn check_roll(&self, requested: DieSet) -> Result<(), GameError> {
        self.lock().check_roll(requested)
    }

    /// A copy of the game as it stands.
    #[must_use]
    pub fn snapshot(&self) -> Game {
        self.lock().clone()
    }

    #[must_use]
    pub fn record(&self) -> GameRecord {
        self.lock().record()
    }

    /// Run a read-only query under the lock.
    pub fn with_game<R>(&self, f: impl FnOnce(&Game) -> R) -> R {
        f(&self.lock())
    }
}

impl From<Game> for SharedGame {
    fn from(game: Game) -> Self {
        Self::new(game)
    }
}
