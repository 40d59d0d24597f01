//! Battle records.
//!
//! A `BattleRecord` captures a finished battle: the seed it ran with, who
//! went first, how long it lasted, how it ended, and (when logging is on)
//! a snapshot of both players after every completed turn.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::player::PlayerId;
use crate::core::state::TurnSnapshot;
use crate::rules::BattleOutcome;

/// Stage of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Setup,
    OpeningHands,
    CoinToss,
    Promotion,
    TurnLoop,
}

/// A finished battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRecord {
    /// Seed of the battle's RNG.
    pub seed: u64,

    /// Coin toss winner. `None` when the battle was aborted before the toss.
    pub first: Option<PlayerId>,

    /// Turn on which the battle ended.
    pub turns: u32,

    /// Stage the battle was in when it ended. `Setup` means a deck was
    /// rejected before any card was drawn.
    pub ended_in: Phase,

    pub outcome: BattleOutcome,

    /// One snapshot per completed, non-final turn.
    pub log: Vec<TurnSnapshot>,
}

impl BattleRecord {
    /// The winner, if there is one.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.outcome.winner()
    }

    /// Compact binary encoding for append-only storage.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a record written by `encode`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
