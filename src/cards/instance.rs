//! Creature instances - runtime creature state.
//!
//! A `Creature` is a creature card in play. It copies what it needs from
//! the definition and tracks HP, attached energy and status conditions.
//!
//! Evolution replaces the instance with a fresh one built from the evolved
//! card, carrying over damage taken, energy and status.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{CardDefinition, CardId, Move, Weakness};
use super::element::Element;
use super::energy::EnergyPool;
use crate::core::error::{Result, SimError};

/// Status conditions. Presence only, no duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCondition {
    Poisoned,
    Burned,
    Asleep,
    Paralyzed,
    Confused,
}

/// A creature in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub card_id: CardId,
    pub name: String,
    pub max_hp: u32,
    hp: u32,
    pub element: Element,
    pub stage: u8,
    pub moves: Vec<Move>,
    pub weakness: Option<Weakness>,
    pub retreat: u32,
    pub energy: EnergyPool,
    status: SmallVec<[StatusCondition; 2]>,
}

impl Creature {
    /// Spawn a fresh instance at full HP with no energy or status.
    ///
    /// Fails with `NotACreature` for trainer cards.
    pub fn spawn(def: &CardDefinition) -> Result<Self> {
        let card = def
            .as_creature()
            .ok_or_else(|| SimError::NotACreature(def.id.clone()))?;

        Ok(Self {
            card_id: def.id.clone(),
            name: def.name.clone(),
            max_hp: card.hp,
            hp: card.hp,
            element: card.element,
            stage: card.evolution_stage,
            moves: card.moves.clone(),
            weakness: card.weakness,
            retreat: card.retreat,
            energy: EnergyPool::new(),
            status: SmallVec::new(),
        })
    }

    /// Current HP.
    #[must_use]
    pub fn hp(&self) -> u32 {
        self.hp
    }

    /// Damage accumulated so far.
    #[must_use]
    pub fn damage_taken(&self) -> u32 {
        self.max_hp - self.hp
    }

    #[must_use]
    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    /// Lose HP, stopping at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Gain HP, stopping at max HP.
    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    #[must_use]
    pub fn has_status(&self, status: StatusCondition) -> bool {
        self.status.contains(&status)
    }

    /// Add a status. Adding one already present changes nothing.
    pub fn add_status(&mut self, status: StatusCondition) {
        if !self.has_status(status) {
            self.status.push(status);
        }
    }

    /// Remove a status that must be present.
    pub fn remove_status(&mut self, status: StatusCondition) -> Result<()> {
        let i = self
            .status
            .iter()
            .position(|s| *s == status)
            .ok_or(SimError::StatusNotPresent(status))?;
        self.status.remove(i);
        Ok(())
    }

    /// Active status conditions.
    pub fn statuses(&self) -> impl Iterator<Item = StatusCondition> + '_ {
        self.status.iter().copied()
    }

    /// First move with positive damage this creature can pay for.
    #[must_use]
    pub fn first_usable_move(&self) -> Option<&Move> {
        self.moves
            .iter()
            .find(|m| m.damage > 0 && self.energy.can_afford(&m.cost))
    }

    /// Replace this creature with `def`, keeping damage, energy and status.
    ///
    /// If the evolved card has less HP than the damage carried over it
    /// comes in at zero.
    pub fn evolve_into(self, def: &CardDefinition) -> Result<Self> {
        let mut evolved = Self::spawn(def)?;
        evolved.hp = evolved.max_hp.saturating_sub(self.damage_taken());
        evolved.energy = self.energy;
        evolved.status = self.status;
        Ok(evolved)
    }
}

/// Deal an attack's damage to `defender`. Returns the damage dealt.
///
/// The defender's weakness bonus applies when it matches the attacker's
/// element.
pub fn resolve_damage(attacker: &Creature, defender: &mut Creature, base_damage: u32) -> u32 {
    let bonus = match defender.weakness {
        Some(weakness) if weakness.element == attacker.element => weakness.bonus,
        _ => 0,
    };
    let damage = base_damage + bonus;
    defender.take_damage(damage);
    damage
}
