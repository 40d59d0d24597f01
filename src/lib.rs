//! # pocket-ccg
//!
//! A deterministic two-player card battle simulator and an evolutionary
//! deck search that uses simulated battles as its fitness signal.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Every battle is fully determined by its two decks
//!    and a seeded `GameRng`. A search run is reproducible from one seed.
//!
//! 2. **Parallel at the edges**: The battle engine is single-threaded.
//!    Trials within an evaluation and candidates within a generation share
//!    nothing mutable and run on the rayon pool, each with its own stream.
//!
//! 3. **Bounded retries**: Mulligans, random deck generation and mutation
//!    sampling all run under a configurable ceiling and report exhaustion
//!    as a distinct result.
//!
//! ## Modules
//!
//! - `core`: Players, battle state, RNG, configuration, errors, retry
//! - `cards`: Elements, card definitions, catalog, creatures, energy
//! - `zones`: Shuffle, draw and opening-hand mulligans
//! - `rules`: Deck validation and battle outcomes
//! - `battle`: Turn-based battle engine and battle records
//! - `search`: Deck candidates, evaluation, evolutionary search

pub mod core;
pub mod cards;
pub mod zones;
pub mod rules;
pub mod battle;
pub mod search;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap, Player, PlayerSnapshot,
    GameRng,
    RulesConfig, SearchConfig, TournamentPolicy,
    SimError, Result,
    BattleState, TurnSnapshot,
};

pub use crate::cards::{
    CardId, CardDefinition, CardKind, CreatureCard, Move, Weakness,
    CardCatalog, Creature, Element, EnergyPool, StatusCondition,
};

pub use crate::rules::{validate_deck, BattleOutcome, DeckViolation};

pub use crate::battle::{simulate, Battle, BattleRecord};

pub use crate::search::{
    DeckCandidate, Evaluation, Evaluator,
    EvolutionEngine, GenerationReport, Mutation, SearchOutcome,
};
