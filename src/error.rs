//! Error types.
//!
//! Every rule violation is an ordinary, recoverable failure: the player simply
//! chose an illegal move. Operations that fail leave the game untouched.

use thiserror::Error as ThisError;

use crate::core::{DieSet, PlayerName};

/// A proposed roll breaks the roll-legality rules.
#[derive(Clone, Debug, ThisError, PartialEq, Eq)]
pub enum LegalityError {
    #[error("must roll all dice on the first roll (requested {requested})")]
    MustRollAllDice { requested: DieSet },
    #[error("must keep at least one die on the second roll")]
    MustKeepAtLeastOneDie,
    #[error("no dice requested")]
    EmptyRollRequest,
    #[error("cannot re-roll kept dice ({dice})")]
    CannotRerollKeptDie { dice: DieSet },
    #[error("cannot re-roll only one of the two dice kept after the first roll ({dice})")]
    CannotRerollPartialKeptPair { dice: DieSet },
    #[error("can only re-roll the kept pair when going for triple-five (unrolled die shows {face})")]
    OnlyTripleFiveMayRerollPair { face: u8 },
    #[error("can only re-roll the same single die ({dice}) when the kept dice match")]
    OnlyMatchingTripleMayRerollSingle { dice: DieSet },
    #[error("no re-roll available: kept dice do not match")]
    NoLegalRerollAvailable,
    #[error("turn already has {rolls} rolls")]
    TooManyRolls { rolls: usize },
}

/// A game operation failed.
#[derive(Clone, Debug, ThisError, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Illegal(#[from] LegalityError),
    #[error("no dice specified")]
    NoDiceSpecified,
    #[error("invalid die face value {value} (expected 0 or 1..=6)")]
    InvalidDieFaceValue { value: u8 },
    #[error("turn has no rolls to close")]
    NoRollsToClose,
    #[error("final roll {faces} has no scoring value")]
    InvalidFinalRoll { faces: String },
    #[error("unknown player \"{player}\"")]
    UnknownPlayer { player: PlayerName },
    #[error("roll index {index} out of range (turn has {rolls} rolls)")]
    RollIndexOutOfRange { index: usize, rolls: usize },
    #[error("turn is already closed")]
    TurnClosed,
}

/// Game configuration is invalid.
#[derive(Clone, Debug, ThisError, PartialEq, Eq)]
pub enum ConfigError {
    #[error("game needs exactly {expected} players (got {got})")]
    WrongPlayerCount { expected: usize, got: usize },
    #[error("player names must not be empty")]
    EmptyPlayerName,
    #[error("duplicate player \"{player}\"")]
    DuplicatePlayer { player: PlayerName },
    #[error("{field} must be non-zero")]
    ZeroSetting { field: &'static str },
}

/// A structured game record could not be decoded or rebuilt into a game.
#[derive(Debug, ThisError)]
pub enum RecordError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("binary codec error: {0}")]
    Binary(#[from] bincode::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("record has no turns")]
    NoTurns,
    #[error("last turn in record is closed")]
    ClosedOpenTurn,
    #[error("turn {index} in history is still open")]
    OpenTurnInHistory { index: usize },
    #[error("turn {index} has {rolls} rolls")]
    TooManyRolls { index: usize, rolls: usize },
    #[error("turn {index} is closed without any rolls")]
    ClosedWithoutRolls { index: usize },
    #[error("turn {index}, roll {roll}: {source}")]
    IllegalRoll {
        index: usize,
        roll: usize,
        source: LegalityError,
    },
    #[error("turn {index}, roll {roll}: invalid die face value {value}")]
    InvalidFace { index: usize, roll: usize, value: u8 },
    #[error("turn {index}, roll {roll}: consecutive flag does not match the faces")]
    ConsecutiveMismatch { index: usize, roll: usize },
    #[error("player \"{player}\" has no chevrons")]
    NoChevrons { player: PlayerName },
    #[error("no score entry for player \"{player}\"")]
    MissingScore { player: PlayerName },
    #[error("player \"{player}\" is not in the game")]
    UnknownPlayer { player: PlayerName },
    #[error("current player is missing")]
    MissingCurrentPlayer,
    #[error("current player \"{player}\" does not own the open turn")]
    CurrentPlayerMismatch { player: PlayerName },
}
