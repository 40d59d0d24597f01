//! Crate-wide error type.

use thiserror::Error;

use crate::cards::{CardId, StatusCondition};
use crate::rules::DeckViolation;

/// Errors raised by the simulator and the deck search.
///
/// Deck rule failures inside a match are not errors: they end the match as
/// `BattleOutcome::Aborted`. `InvalidDeck` is only returned where a caller
/// asked for a valid deck outright.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid deck: {0}")]
    InvalidDeck(#[from] DeckViolation),

    #[error("card {0} is not in the catalog")]
    UnknownCard(CardId),

    #[error("card {0} is not a creature")]
    NotACreature(CardId),

    #[error("card {0} is already registered")]
    DuplicateCard(CardId),

    #[error("status {0:?} is not present")]
    StatusNotPresent(StatusCondition),

    #[error("no basic creature in opening hand after {attempts} mulligans")]
    MulliganExhausted { attempts: u32 },

    #[error("no valid random deck after {attempts} attempts")]
    DeckGenerationExhausted { attempts: u32 },

    #[error("population of 2^{0} decks is too large")]
    PopulationTooLarge(u32),

    #[error("catalog JSON error: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding error: {0}")]
    Encoding(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
