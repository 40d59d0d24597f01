//! Card catalog for definition lookup.
//!
//! The `CardCatalog` is loaded once before any simulation and only read
//! afterwards. It keeps the catalog's order (random sampling indexes into
//! it) and an `FxHashMap` index for lookup by `CardId`.

use std::path::Path;

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, CreatureCard};
use crate::core::error::{Result, SimError};
use crate::core::rng::GameRng;

/// Read-only collection of card definitions.
///
/// ## Example
///
/// ```
/// use pocket_ccg::cards::{CardCatalog, CardDefinition, CardId, CreatureCard, Element};
///
/// let mut catalog = CardCatalog::new();
/// catalog
///     .register(CardDefinition::creature("001", "Bulbasaur", CreatureCard::basic(70, Element::Grass)))
///     .unwrap();
///
/// let found = catalog.get(&CardId::new("001")).unwrap();
/// assert_eq!(found.name, "Bulbasaur");
/// assert!(catalog.is_basic(&CardId::new("001")));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<CardDefinition>,
    index: FxHashMap<CardId, usize>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from definitions, rejecting duplicate IDs.
    pub fn from_definitions(cards: impl IntoIterator<Item = CardDefinition>) -> Result<Self> {
        let mut catalog = Self::new();
        for card in cards {
            catalog.register(card)?;
        }
        Ok(catalog)
    }

    /// Parse a JSON array of card records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cards: Vec<CardDefinition> = serde_json::from_str(json)?;
        Self::from_definitions(cards)
    }

    /// Load a JSON card pool file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Register a card definition.
    pub fn register(&mut self, card: CardDefinition) -> Result<()> {
        if self.index.contains_key(&card.id) {
            return Err(SimError::DuplicateCard(card.id));
        }
        self.index.insert(card.id.clone(), self.cards.len());
        self.cards.push(card);
        Ok(())
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&CardDefinition> {
        self.index.get(id).map(|&i| &self.cards[i])
    }

    /// Get a card definition by ID, or `UnknownCard`.
    pub fn lookup(&self, id: &CardId) -> Result<&CardDefinition> {
        self.get(id).ok_or_else(|| SimError::UnknownCard(id.clone()))
    }

    /// Get a creature definition, or an error naming what went wrong.
    pub fn creature(&self, id: &CardId) -> Result<(&CardDefinition, &CreatureCard)> {
        let def = self.lookup(id)?;
        let creature = def
            .as_creature()
            .ok_or_else(|| SimError::NotACreature(id.clone()))?;
        Ok((def, creature))
    }

    /// Is `id` a known basic creature?
    #[must_use]
    pub fn is_basic(&self, id: &CardId) -> bool {
        self.get(id).is_some_and(CardDefinition::is_basic)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.index.contains_key(id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all definitions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter()
    }

    /// Iterate over all IDs in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &CardId> {
        self.cards.iter().map(|c| &c.id)
    }

    /// Position of the first card in `hand` that evolves from `base`.
    #[must_use]
    pub fn evolution_of(&self, base: &CardId, hand: &[CardId]) -> Option<usize> {
        hand.iter()
            .position(|card| self.get(card).is_some_and(|def| def.evolves_from(base)))
    }

    /// Pick an ID uniformly at random.
    pub fn random_id(&self, rng: &mut GameRng) -> Option<CardId> {
        rng.choose(&self.cards).map(|c| c.id.clone())
    }
}
