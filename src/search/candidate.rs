//! Deck candidates.
//!
//! A `DeckCandidate` is a deck list plus an energy zone, with no battle
//! state. Every battle wraps it in fresh `Player`s, so a candidate can be
//! shared by any number of concurrent battles.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardId, Element};
use crate::core::config::{RulesConfig, SearchConfig};
use crate::core::error::{Result, SimError};
use crate::core::retry::{bounded, Attempt};
use crate::core::rng::GameRng;
use crate::rules::{validate_deck, DeckViolation};

/// A deck under evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckCandidate {
    pub deck: Vec<CardId>,
    pub energy: Vec<Element>,
}

impl DeckCandidate {
    #[must_use]
    pub fn new(deck: Vec<CardId>, energy: Vec<Element>) -> Self {
        Self { deck, energy }
    }

    /// Check the deck against the construction rules.
    pub fn validate(
        &self,
        catalog: &CardCatalog,
        rules: &RulesConfig,
    ) -> std::result::Result<(), DeckViolation> {
        validate_deck(&self.deck, &self.energy, catalog, rules)
    }

    /// Rejection-sample a valid random deck.
    ///
    /// Draws `deck_size` identifiers uniformly (with repetition) and 1 to
    /// `max_energy_types` distinct energy types until the result validates.
    /// Gives up with `DeckGenerationExhausted` after
    /// `deck_generation_attempts` tries.
    pub fn random(catalog: &CardCatalog, config: &SearchConfig, rng: &mut GameRng) -> Result<Self> {
        let rules = &config.rules;
        if catalog.is_empty() {
            return Err(SimError::DeckGenerationExhausted { attempts: 0 });
        }

        let attempt = bounded(config.deck_generation_attempts, |_| {
            let deck: Option<Vec<CardId>> =
                (0..rules.deck_size).map(|_| catalog.random_id(rng)).collect();
            let count = rng.gen_range_inclusive(1..=rules.max_energy_types.max(1));
            let energy = rng.choose_distinct(&Element::ENERGY, count);

            let candidate = deck.map(|deck| Self::new(deck, energy));
            Ok::<_, SimError>(candidate.filter(|c| c.validate(catalog, rules).is_ok()))
        })?;

        match attempt {
            Attempt::Success { value, .. } => Ok(value),
            Attempt::Exhausted { attempts } => Err(SimError::DeckGenerationExhausted { attempts }),
        }
    }

    /// Compact binary encoding for append-only result storage.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a candidate written by `encode`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
