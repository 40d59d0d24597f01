//! Card system: elements, definitions, catalog, creature instances, energy.
//!
//! ## Key Types
//!
//! - `CardId`: Catalog identifier
//! - `CardDefinition`: Static card data, tagged by category
//! - `CardCatalog`: Read-only definition lookup
//! - `Creature`: A creature in play (HP, energy, status)
//! - `EnergyPool`: Attached energy and move affordability

pub mod definition;
pub mod element;
pub mod energy;
pub mod instance;
pub mod registry;

pub use definition::{
    CardDefinition, CardId, CardKind, CreatureCard, Move, TrainerCard, Weakness,
    DEFAULT_WEAKNESS_BONUS,
};
pub use element::Element;
pub use energy::EnergyPool;
pub use instance::{resolve_damage, Creature, StatusCondition};
pub use registry::CardCatalog;
