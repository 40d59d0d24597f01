//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card as read from
//! the catalog. Fields depend on the card's category, so the category is a
//! tagged variant: creatures carry HP, moves and evolution data, trainer
//! cards carry only their effect text.
//!
//! Instance-specific data (damage taken, energy, status) lives in
//! `Creature`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::element::Element;

/// Bonus damage a weakness adds unless the catalog says otherwise.
pub const DEFAULT_WEAKNESS_BONUS: u32 = 20;

/// Catalog identifier of a card (e.g. `"001"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A creature's attack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,

    /// Energy needed per element. The `Normal` entry is the generic cost.
    #[serde(default)]
    pub cost: BTreeMap<Element, u32>,

    /// Flat damage.
    #[serde(default)]
    pub damage: u32,

    /// Effect text. Not resolved by the simulator.
    #[serde(default)]
    pub effect: Option<String>,
}

impl Move {
    /// Create a move with no cost.
    #[must_use]
    pub fn new(name: impl Into<String>, damage: u32) -> Self {
        Self {
            name: name.into(),
            cost: BTreeMap::new(),
            damage,
            effect: None,
        }
    }

    /// Add `amount` of `element` to the cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, element: Element, amount: u32) -> Self {
        *self.cost.entry(element).or_insert(0) += amount;
        self
    }

    /// The generic part of the cost.
    #[must_use]
    pub fn generic_cost(&self) -> u32 {
        self.cost.get(&Element::Normal).copied().unwrap_or(0)
    }
}

/// Weakness to an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weakness {
    pub element: Element,
    #[serde(default = "default_weakness_bonus")]
    pub bonus: u32,
}

fn default_weakness_bonus() -> u32 {
    DEFAULT_WEAKNESS_BONUS
}

/// Creature card data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureCard {
    pub hp: u32,

    #[serde(alias = "type")]
    pub element: Element,

    /// 0 for basic creatures.
    #[serde(default)]
    pub evolution_stage: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability: Option<String>,

    #[serde(default)]
    pub moves: Vec<Move>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weakness: Option<Weakness>,

    #[serde(default)]
    pub retreat: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evolves_from: Option<CardId>,
}

impl CreatureCard {
    /// A basic creature with no moves.
    #[must_use]
    pub fn basic(hp: u32, element: Element) -> Self {
        Self {
            hp,
            element,
            evolution_stage: 0,
            ability: None,
            moves: Vec::new(),
            weakness: None,
            retreat: 1,
            evolves_from: None,
        }
    }

    /// Make this an evolution of `from` at `stage` (builder pattern).
    #[must_use]
    pub fn evolves_from(mut self, from: impl Into<CardId>, stage: u8) -> Self {
        self.evolves_from = Some(from.into());
        self.evolution_stage = stage;
        self
    }

    /// Append a move (builder pattern).
    #[must_use]
    pub fn with_move(mut self, mv: Move) -> Self {
        self.moves.push(mv);
        self
    }

    /// Set the weakness with the default bonus (builder pattern).
    #[must_use]
    pub fn with_weakness(mut self, element: Element) -> Self {
        self.weakness = Some(Weakness {
            element,
            bonus: DEFAULT_WEAKNESS_BONUS,
        });
        self
    }

    /// Is this a basic creature?
    #[must_use]
    pub fn is_basic(&self) -> bool {
        self.evolution_stage == 0
    }
}

/// Supporter or item card data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
}

/// Category-specific card data.
///
/// Unknown categories fail to deserialize.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum CardKind {
    #[serde(alias = "Pokemon")]
    Creature(CreatureCard),
    #[serde(alias = "Supporter")]
    SupporterCard(TrainerCard),
    #[serde(alias = "Item")]
    ItemCard(TrainerCard),
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use pocket_ccg::cards::{CardDefinition, CreatureCard, Element, Move};
///
/// let pup = CardDefinition::creature(
///     "004",
///     "Growlithe",
///     CreatureCard::basic(70, Element::Fire)
///         .with_move(Move::new("Bite", 20).with_cost(Element::Fire, 1)),
/// );
///
/// assert!(pup.is_basic());
/// assert_eq!(pup.as_creature().unwrap().moves[0].damage, 20);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Display name.
    pub name: String,

    #[serde(flatten)]
    pub kind: CardKind,
}

impl CardDefinition {
    /// Create a creature definition.
    #[must_use]
    pub fn creature(id: impl Into<CardId>, name: impl Into<String>, card: CreatureCard) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: CardKind::Creature(card),
        }
    }

    /// Create a supporter definition.
    #[must_use]
    pub fn supporter(id: impl Into<CardId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: CardKind::SupporterCard(TrainerCard::default()),
        }
    }

    /// Create an item definition.
    #[must_use]
    pub fn item(id: impl Into<CardId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: CardKind::ItemCard(TrainerCard::default()),
        }
    }

    /// Creature data, if this is a creature.
    #[must_use]
    pub fn as_creature(&self) -> Option<&CreatureCard> {
        match &self.kind {
            CardKind::Creature(card) => Some(card),
            CardKind::SupporterCard(_) | CardKind::ItemCard(_) => None,
        }
    }

    /// Is this a basic (stage 0) creature?
    #[must_use]
    pub fn is_basic(&self) -> bool {
        self.as_creature().is_some_and(CreatureCard::is_basic)
    }

    /// Does this card evolve from `base`?
    #[must_use]
    pub fn evolves_from(&self, base: &CardId) -> bool {
        self.as_creature()
            .and_then(|c| c.evolves_from.as_ref())
            .is_some_and(|from| from == base)
    }
}
