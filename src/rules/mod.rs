//! Rules shared by the battle engine and the deck search.
//!
//! - `validation`: deck construction rules
//! - `outcome`: terminal battle results

pub mod outcome;
pub mod validation;

pub use outcome::BattleOutcome;
pub use validation::{validate_deck, DeckViolation};
