//! Players: role identifiers, per-role storage and in-battle player state.
//!
//! ## PlayerId
//!
//! Explicit role tag. The deck being evaluated always plays `PlayerId::ONE`;
//! win attribution compares tags by value.
//!
//! ## PlayerMap
//!
//! Two-slot storage indexed by `PlayerId`.
//!
//! ## Player
//!
//! A deck brought to life for one match: deck, hand, discard, energy zone,
//! active creature and score. Built fresh from a `DeckCandidate` for every
//! battle and dropped when the battle ends.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::cards::{CardCatalog, CardId, Creature, Element};
use crate::core::error::Result;
use crate::core::rng::GameRng;
use crate::search::DeckCandidate;

/// Role of a player in a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    /// The deck under evaluation.
    pub const ONE: PlayerId = PlayerId(0);
    /// Its opponent.
    pub const TWO: PlayerId = PlayerId(1);

    /// Both roles in order.
    pub const BOTH: [PlayerId; 2] = [PlayerId::ONE, PlayerId::TWO];

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other role.
    #[must_use]
    pub const fn opponent(self) -> PlayerId {
        PlayerId(1 - self.0)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-role data storage.
///
/// ## Example
///
/// ```
/// use pocket_ccg::core::{PlayerId, PlayerMap};
///
/// let mut points: PlayerMap<u32> = PlayerMap::new(|_| 0);
/// points[PlayerId::TWO] += 2;
///
/// assert_eq!(points[PlayerId::ONE], 0);
/// assert_eq!(points[PlayerId::TWO], 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(mut factory: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::ONE), factory(PlayerId::TWO)],
        }
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Mutable access to one player and shared access to the other.
    pub fn split_mut(&mut self, player: PlayerId) -> (&mut T, &mut T) {
        let [one, two] = &mut self.data;
        if player == PlayerId::ONE {
            (one, two)
        } else {
            (two, one)
        }
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::BOTH.into_iter().zip(self.data.iter())
    }

    /// Apply `f` to both entries.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PlayerMap<U> {
        PlayerMap {
            data: [f(&self.data[0]), f(&self.data[1])],
        }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// In-battle state of one player.
#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    /// Draw pile, top card first.
    pub deck: Vec<CardId>,
    pub hand: Vec<CardId>,
    pub discard: Vec<CardId>,
    /// Fixed for the match.
    pub energy_zone: Vec<Element>,
    pub active: Option<Creature>,
    /// Never populated by the reduced rule set.
    pub bench: Vec<Creature>,
    pub went_first: bool,
    /// Energy generated this turn, cleared once attached.
    pub generated: Option<Element>,
    pub points: u32,
}

impl Player {
    /// Wrap a candidate deck for a new battle.
    #[must_use]
    pub fn from_candidate(id: PlayerId, candidate: &DeckCandidate) -> Self {
        Self {
            id,
            deck: candidate.deck.clone(),
            hand: Vec::new(),
            discard: Vec::new(),
            energy_zone: candidate.energy.clone(),
            active: None,
            bench: Vec::new(),
            went_first: false,
            generated: None,
            points: 0,
        }
    }

    /// Hand position of the first basic creature.
    #[must_use]
    pub fn first_basic_in_hand(&self, catalog: &CardCatalog) -> Option<usize> {
        self.hand.iter().position(|card| catalog.is_basic(card))
    }

    /// Move the hand card at `index` into the active slot as a fresh creature.
    pub fn promote(&mut self, index: usize, catalog: &CardCatalog) -> Result<()> {
        let def = catalog.lookup(&self.hand[index])?;
        let creature = Creature::spawn(def)?;
        self.hand.remove(index);
        self.active = Some(creature);
        Ok(())
    }

    /// Promote the first basic creature in hand.
    ///
    /// Returns `false` when the hand has none; the active slot stays empty.
    pub fn promote_first_basic(&mut self, catalog: &CardCatalog) -> Result<bool> {
        match self.first_basic_in_hand(catalog) {
            Some(index) => {
                self.promote(index, catalog)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Discard the active creature, leaving the slot empty.
    pub fn discard_active(&mut self) -> Option<Creature> {
        let creature = self.active.take()?;
        self.discard.push(creature.card_id.clone());
        Some(creature)
    }

    /// Generate one energy from the energy zone and attach it to the active
    /// creature. Returns the element generated.
    pub fn grant_energy(&mut self, rng: &mut GameRng) -> Option<Element> {
        self.generated = rng.choose(&self.energy_zone).copied();
        let element = self.generated.take()?;
        if let Some(active) = self.active.as_mut() {
            active.energy.attach(element, 1);
        }
        Some(element)
    }

    /// Evolve the active creature with the first hand card that evolves
    /// from it. Returns the evolved card's ID.
    pub fn evolve_active(&mut self, catalog: &CardCatalog) -> Result<Option<CardId>> {
        let Some(active) = self.active.as_ref() else {
            return Ok(None);
        };
        let base = active.card_id.clone();
        let Some(index) = catalog.evolution_of(&base, &self.hand) else {
            return Ok(None);
        };

        let def = catalog.lookup(&self.hand[index])?;
        if let Some(previous) = self.active.take() {
            self.active = Some(previous.evolve_into(def)?);
        }
        Ok(Some(self.hand.remove(index)))
    }

    /// Structural copy for battle logs.
    #[must_use]
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            id: self.id,
            deck: self.deck.clone(),
            hand: self.hand.clone(),
            discard: self.discard.clone(),
            energy_zone: self.energy_zone.clone(),
            active: self.active.clone(),
            bench: self.bench.clone(),
            went_first: self.went_first,
            points: self.points,
        }
    }
}

/// Serializable copy of a `Player`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub deck: Vec<CardId>,
    pub hand: Vec<CardId>,
    pub discard: Vec<CardId>,
    pub energy_zone: Vec<Element>,
    pub active: Option<Creature>,
    pub bench: Vec<Creature>,
    pub went_first: bool,
    pub points: u32,
}
