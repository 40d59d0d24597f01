//! Core types: players, battle state, RNG, configuration, errors, retry.
//!
//! These are the building blocks shared by the battle engine and the deck
//! search.

pub mod config;
pub mod error;
pub mod player;
pub mod retry;
pub mod rng;
pub mod state;

pub use config::{RulesConfig, SearchConfig, TournamentPolicy};
pub use error::{Result, SimError};
pub use player::{Player, PlayerId, PlayerMap, PlayerSnapshot};
pub use retry::{bounded, Attempt};
pub use rng::GameRng;
pub use state::{BattleState, TurnSnapshot};
