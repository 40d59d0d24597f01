//! Deck construction rules.
//!
//! Rules are checked in a fixed order and the first failure is reported:
//!
//! 1. exactly `deck_size` cards
//! 2. no identifier more than `max_copies` times
//! 3. at least one basic creature
//! 4. between 1 and `max_energy_types` energy types, none repeated
//!
//! The energy zone is a set: generated energy is drawn uniformly from its
//! entries, so a repeated type would be drawn more often. Identifiers
//! missing from the catalog are reported last, after the four rules pass.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{CardCatalog, CardId, Element};
use crate::core::config::RulesConfig;

/// Why a deck was rejected.
#[derive(Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckViolation {
    #[error("deck has {found} cards, expected {expected}")]
    Size { found: usize, expected: usize },

    #[error("card {card} appears {count} times")]
    CopyLimit { card: CardId, count: usize },

    #[error("deck has no basic creature")]
    MissingBasic,

    #[error("energy zone has {found} types")]
    EnergyCount { found: usize },

    #[error("energy type {0} appears more than once")]
    DuplicateEnergy(Element),

    #[error("card {0} is not in the catalog")]
    UnknownCard(CardId),
}

/// Check a deck and energy zone against the construction rules.
pub fn validate_deck(
    deck: &[CardId],
    energy: &[Element],
    catalog: &CardCatalog,
    rules: &RulesConfig,
) -> Result<(), DeckViolation> {
    if deck.len() != rules.deck_size {
        return Err(DeckViolation::Size {
            found: deck.len(),
            expected: rules.deck_size,
        });
    }

    let mut counts: FxHashMap<&CardId, usize> = FxHashMap::default();
    for card in deck {
        let count = counts.entry(card).or_insert(0);
        *count += 1;
        if *count > rules.max_copies {
            return Err(DeckViolation::CopyLimit {
                card: card.clone(),
                count: deck.iter().filter(|c| *c == card).count(),
            });
        }
    }

    if !deck.iter().any(|card| catalog.is_basic(card)) {
        return Err(DeckViolation::MissingBasic);
    }

    if energy.is_empty() || energy.len() > rules.max_energy_types {
        return Err(DeckViolation::EnergyCount {
            found: energy.len(),
        });
    }
    if let Some((_, repeated)) = energy
        .iter()
        .enumerate()
        .find(|(i, element)| energy[..*i].contains(*element))
    {
        return Err(DeckViolation::DuplicateEnergy(*repeated));
    }

    if let Some(unknown) = deck.iter().find(|card| !catalog.contains(card)) {
        return Err(DeckViolation::UnknownCard(unknown.clone()));
    }

    Ok(())
}
