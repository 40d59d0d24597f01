//! Battle engine.
//!
//! - `Battle`: turn-based state machine playing one match to completion
//! - `BattleRecord`: outcome, length and per-turn snapshots of a match
//!
//! A battle is single-threaded and fully determined by its two decks and
//! its `GameRng`.

pub mod engine;
pub mod record;

pub use engine::{simulate, Battle};
pub use record::{BattleRecord, Phase};
