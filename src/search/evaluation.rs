//! Deck evaluation: win rate over independent battles.
//!
//! Each trial gets its own generator derived from the caller's seed and the
//! trial index, builds fresh players and shares nothing mutable with other
//! trials, so trials run in parallel on the rayon pool and the result does
//! not depend on scheduling.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::candidate::DeckCandidate;
use crate::battle::Battle;
use crate::cards::CardCatalog;
use crate::core::config::SearchConfig;
use crate::core::error::Result;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::rules::BattleOutcome;

/// Tally of a candidate's battles. The candidate always plays `PlayerId::ONE`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub trials: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub aborted: u32,
}

impl Evaluation {
    /// Count one battle.
    pub fn record(&mut self, outcome: &BattleOutcome) {
        self.trials += 1;
        match outcome {
            BattleOutcome::Aborted { .. } => self.aborted += 1,
            BattleOutcome::Draw => self.draws += 1,
            won if won.is_winner(PlayerId::ONE) => self.wins += 1,
            _ => self.losses += 1,
        }
    }

    /// Wins as a percentage of trials (0 for no trials).
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.trials) * 100.0
        }
    }
}

/// Runs batches of battles for one catalog and configuration.
#[derive(Clone, Copy, Debug)]
pub struct Evaluator<'a> {
    catalog: &'a CardCatalog,
    config: &'a SearchConfig,
}

impl<'a> Evaluator<'a> {
    #[must_use]
    pub fn new(catalog: &'a CardCatalog, config: &'a SearchConfig) -> Self {
        Self { catalog, config }
    }

    #[must_use]
    pub fn catalog(&self) -> &'a CardCatalog {
        self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &'a SearchConfig {
        self.config
    }

    /// Play `trials` battles of `candidate` against `opponent`, or against a
    /// fresh random deck per trial when `opponent` is `None`.
    ///
    /// Trial `i` draws all of its randomness from `rng.stream(i)`.
    pub fn evaluate(
        &self,
        candidate: &DeckCandidate,
        opponent: Option<&DeckCandidate>,
        trials: u32,
        rng: &GameRng,
    ) -> Result<Evaluation> {
        let outcomes: Vec<BattleOutcome> = (0..trials)
            .into_par_iter()
            .map(|trial| self.trial(candidate, opponent, rng.stream(u64::from(trial))))
            .collect::<Result<_>>()?;

        let mut evaluation = Evaluation::default();
        for outcome in &outcomes {
            evaluation.record(outcome);
        }
        debug!(
            trials,
            wins = evaluation.wins,
            draws = evaluation.draws,
            win_rate = evaluation.win_rate(),
            "evaluated candidate"
        );
        Ok(evaluation)
    }

    fn trial(
        &self,
        candidate: &DeckCandidate,
        opponent: Option<&DeckCandidate>,
        mut rng: GameRng,
    ) -> Result<BattleOutcome> {
        let random_opponent;
        let opponent = match opponent {
            Some(deck) => deck,
            None => {
                random_opponent = DeckCandidate::random(self.catalog, self.config, &mut rng)?;
                &random_opponent
            }
        };

        let record = Battle::new(self.catalog, &self.config.rules, candidate, opponent, rng)
            .without_log()
            .run()?;
        Ok(record.outcome)
    }
}
