//! Turn and game orchestration.
//!
//! - `turn`: one player's rolls and final score
//! - `score`: chevron ledger entries and scorecard rendering helpers
//! - `state`: the `Game` itself
//! - `record`: the structured record and its codecs
//! - `shared`: a game behind a lock for concurrent callers

pub mod record;
pub mod score;
pub mod shared;
pub mod state;
pub mod turn;

pub use record::GameRecord;
pub use score::{center_in, tally_marks, Chevron, PlayerScore};
pub use shared::SharedGame;
pub use state::Game;
pub use turn::Turn;
