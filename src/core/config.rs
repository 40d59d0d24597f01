//! Simulation configuration.
//!
//! - `RulesConfig`: deck construction limits and battle constants
//! - `SearchConfig`: evaluation and evolutionary search parameters
//!
//! Defaults reproduce the reference rule set. Both types are serde structs
//! so callers can load them from whatever format they keep settings in.

use serde::{Deserialize, Serialize};

/// Deck construction rules and battle constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Exact number of cards in a deck.
    pub deck_size: usize,

    /// Maximum copies of one card identifier.
    pub max_copies: usize,

    /// Maximum distinct element types in an energy zone (minimum is 1).
    pub max_energy_types: usize,

    /// Cards drawn for the opening hand.
    pub opening_hand_size: usize,

    /// Points needed to win.
    pub points_to_win: u32,

    /// Points for knocking out an "ex" creature.
    pub ex_knockout_points: u32,

    /// Points for knocking out any other creature.
    pub knockout_points: u32,

    /// Name suffix marking an "ex" creature.
    pub ex_suffix: String,

    /// Turn at which the match is declared a draw.
    pub turn_cap: u32,

    /// Maximum opening-hand redraws before the match fails.
    pub mulligan_limit: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            deck_size: 20,
            max_copies: 2,
            max_energy_types: 3,
            opening_hand_size: 5,
            points_to_win: 3,
            ex_knockout_points: 2,
            knockout_points: 1,
            ex_suffix: " ex".to_string(),
            turn_cap: 50,
            mulligan_limit: 1_000,
        }
    }
}

impl RulesConfig {
    /// Set the turn cap.
    #[must_use]
    pub fn with_turn_cap(mut self, turn_cap: u32) -> Self {
        self.turn_cap = turn_cap;
        self
    }

    /// Set the points needed to win.
    #[must_use]
    pub fn with_points_to_win(mut self, points: u32) -> Self {
        self.points_to_win = points;
        self
    }

    /// Set the mulligan ceiling.
    #[must_use]
    pub fn with_mulligan_limit(mut self, limit: u32) -> Self {
        self.mulligan_limit = limit;
        self
    }

    /// Points awarded for knocking out a creature with this display name.
    #[must_use]
    pub fn knockout_value(&self, name: &str) -> u32 {
        if name.ends_with(&self.ex_suffix) {
            self.ex_knockout_points
        } else {
            self.knockout_points
        }
    }
}

/// Which member of a tournament pair is mutated and kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TournamentPolicy {
    /// Mutate the lower-scoring deck and drop its neighbour. Ties mutate the
    /// lower index.
    #[default]
    MutateLoser,
    /// Mutate the higher-scoring deck and drop the loser. Ties mutate the
    /// lower index.
    MutateWinner,
}

impl TournamentPolicy {
    /// Index (0 or 1) of the pair member to mutate and keep, given the
    /// pair's win rates.
    #[must_use]
    pub fn pick(self, left: f64, right: f64) -> usize {
        let keep_left = match self {
            TournamentPolicy::MutateLoser => left <= right,
            TournamentPolicy::MutateWinner => left >= right,
        };
        usize::from(!keep_left)
    }
}

/// Evaluation and evolutionary search parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Battles per candidate evaluation in a generation.
    pub trials: u32,

    /// Mutation samples tried before giving up.
    pub mutation_attempts: u32,

    /// Battles of a mutated deck against its parent.
    pub mutation_trials: u32,

    /// Win rate (percent) a mutation must strictly exceed against its parent.
    pub acceptance_threshold: f64,

    /// Rejection-sampling ceiling for random deck generation.
    pub deck_generation_attempts: u32,

    /// Base seed; every battle's randomness is derived from it.
    pub seed: u64,

    /// Tournament reduction policy.
    pub tournament: TournamentPolicy,

    /// Rules every battle is played under.
    pub rules: RulesConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            trials: 10,
            mutation_attempts: 1_000,
            mutation_trials: 10,
            acceptance_threshold: 50.0,
            deck_generation_attempts: 100_000,
            seed: 42,
            tournament: TournamentPolicy::default(),
            rules: RulesConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Create the default search config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set battles per evaluation.
    #[must_use]
    pub fn with_trials(mut self, trials: u32) -> Self {
        self.trials = trials;
        self
    }

    /// Set the mutation sampling ceiling.
    #[must_use]
    pub fn with_mutation_attempts(mut self, attempts: u32) -> Self {
        self.mutation_attempts = attempts;
        self
    }

    /// Set battles per mutation check.
    #[must_use]
    pub fn with_mutation_trials(mut self, trials: u32) -> Self {
        self.mutation_trials = trials;
        self
    }

    /// Set the tournament policy.
    #[must_use]
    pub fn with_tournament(mut self, policy: TournamentPolicy) -> Self {
        self.tournament = policy;
        self
    }

    /// Set the battle rules.
    #[must_use]
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = RulesConfig::default();
        assert_eq!(rules.deck_size, 20);
        assert_eq!(rules.max_copies, 2);
        assert_eq!(rules.turn_cap, 50);
        assert_eq!(rules.points_to_win, 3);
    }

    #[test]
    fn test_knockout_value() {
        let rules = RulesConfig::default();
        assert_eq!(rules.knockout_value("Mewtwo ex"), 2);
        assert_eq!(rules.knockout_value("Mewtwo"), 1);
        assert_eq!(rules.knockout_value("Exeggcute"), 1);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SearchConfig::new()
            .with_seed(7)
            .with_trials(4)
            .with_mutation_attempts(12)
            .with_tournament(TournamentPolicy::MutateWinner)
            .with_rules(RulesConfig::default().with_turn_cap(10));

        assert_eq!(config.seed, 7);
        assert_eq!(config.trials, 4);
        assert_eq!(config.mutation_attempts, 12);
        assert_eq!(config.tournament, TournamentPolicy::MutateWinner);
        assert_eq!(config.rules.turn_cap, 10);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{ "trials": 3, "rules": { "turn_cap": 12 } }"#).unwrap();

        assert_eq!(config.trials, 3);
        assert_eq!(config.mutation_attempts, 1_000);
        assert_eq!(config.rules.turn_cap, 12);
        assert_eq!(config.rules.deck_size, 20);
    }

    #[test]
    fn test_tournament_pick() {
        let loser = TournamentPolicy::MutateLoser;
        assert_eq!(loser.pick(30.0, 70.0), 0);
        assert_eq!(loser.pick(70.0, 30.0), 1);
        assert_eq!(loser.pick(50.0, 50.0), 0);

        let winner = TournamentPolicy::MutateWinner;
        assert_eq!(winner.pick(30.0, 70.0), 1);
        assert_eq!(winner.pick(70.0, 30.0), 0);
        assert_eq!(winner.pick(50.0, 50.0), 0);
    }
}
