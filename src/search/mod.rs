//! Deck search.
//!
//! - `DeckCandidate`: deck list plus energy zone, shared across battles
//! - `Evaluator`: win rate over independent parallel battles
//! - `EvolutionEngine`: mutation by rejection sampling and tournament rounds

pub mod candidate;
pub mod evaluation;
pub mod evolution;

pub use candidate::DeckCandidate;
pub use evaluation::{Evaluation, Evaluator};
pub use evolution::{
    swap_count, EvolutionEngine, GenerationReport, Mutation, SearchOutcome, MAX_GENERATIONS,
};
