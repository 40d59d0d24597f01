//! Evolutionary deck search.
//!
//! A population of `2^g` random decks is reduced by pairwise tournaments
//! over `g` generations. In each generation every deck is evaluated against
//! random opponents, then each adjacent pair keeps one member, mutated by
//! rejection sampling.
//!
//! ## Key Types
//!
//! - `EvolutionEngine`: runs mutation and tournament rounds
//! - `Mutation`: result of one mutation request
//! - `SearchOutcome`: champion deck plus per-generation reports

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::candidate::DeckCandidate;
use super::evaluation::{Evaluation, Evaluator};
use crate::cards::{CardCatalog, CardId};
use crate::core::config::SearchConfig;
use crate::core::error::{Result, SimError};
use crate::core::retry::{bounded, Attempt};
use crate::core::rng::GameRng;

/// Largest supported generation count (population `2^MAX_GENERATIONS`).
pub const MAX_GENERATIONS: u32 = 20;

/// Number of cards to replace for a deck with the given win rate (percent).
#[must_use]
pub fn swap_count(win_rate: f64) -> usize {
    if win_rate >= 100.0 {
        0
    } else if win_rate >= 75.0 {
        4
    } else if win_rate >= 50.0 {
        8
    } else if win_rate >= 25.0 {
        12
    } else {
        16
    }
}

/// Result of asking for a mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    /// Win rate was perfect, so nothing was swapped.
    Unchanged,
    /// A valid mutation beat its parent.
    Improved {
        candidate: DeckCandidate,
        attempts: u32,
        win_rate: f64,
    },
    /// No accepted mutation within the attempt ceiling.
    Exhausted { attempts: u32 },
}

impl Mutation {
    /// The deck to keep: the mutation if one was accepted, else `original`.
    #[must_use]
    pub fn into_candidate(self, original: DeckCandidate) -> DeckCandidate {
        match self {
            Mutation::Improved { candidate, .. } => candidate,
            Mutation::Unchanged | Mutation::Exhausted { .. } => original,
        }
    }

    #[must_use]
    pub fn is_improved(&self) -> bool {
        matches!(self, Mutation::Improved { .. })
    }
}

/// Summary of one tournament generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// 1-based generation number.
    pub generation: u32,
    /// Population size entering the generation.
    pub population: usize,
    pub best_win_rate: f64,
    pub mean_win_rate: f64,
    pub improved: usize,
    pub unchanged: usize,
    pub exhausted: usize,
}

/// Final result of a search run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub champion: DeckCandidate,
    pub history: Vec<GenerationReport>,
}

impl SearchOutcome {
    /// Champion and history as JSON, for append-only result logs.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Drives population generation, tournaments and mutation.
///
/// All randomness is derived from `SearchConfig::seed`, so a run is
/// reproducible regardless of how rayon schedules the work.
#[derive(Clone, Debug)]
pub struct EvolutionEngine<'a> {
    evaluator: Evaluator<'a>,
    rng: GameRng,
}

impl<'a> EvolutionEngine<'a> {
    #[must_use]
    pub fn new(catalog: &'a CardCatalog, config: &'a SearchConfig) -> Self {
        Self {
            evaluator: Evaluator::new(catalog, config),
            rng: GameRng::new(config.seed),
        }
    }

    #[must_use]
    pub fn evaluator(&self) -> &Evaluator<'a> {
        &self.evaluator
    }

    fn config(&self) -> &'a SearchConfig {
        self.evaluator.config()
    }

    fn catalog(&self) -> &'a CardCatalog {
        self.evaluator.catalog()
    }

    /// Try to improve `candidate`, whose current win rate is `win_rate`.
    ///
    /// Each attempt replaces `swap_count(win_rate)` cards at random positions
    /// with random catalog cards. A valid result is played against
    /// `candidate` and accepted only if it wins strictly more than
    /// `acceptance_threshold` percent of `mutation_trials` battles.
    pub fn mutate_deck(
        &self,
        candidate: &DeckCandidate,
        win_rate: f64,
        rng: &mut GameRng,
    ) -> Result<Mutation> {
        let swaps = swap_count(win_rate).min(candidate.deck.len());
        if swaps == 0 {
            return Ok(Mutation::Unchanged);
        }

        let config = self.config();
        let attempt = bounded(config.mutation_attempts, |_| {
            let Some(mutated) = self.swap_cards(candidate, swaps, rng) else {
                return Ok(None);
            };
            if mutated.validate(self.catalog(), &config.rules).is_err() {
                return Ok(None);
            }

            let evaluation = self.evaluator.evaluate(
                &mutated,
                Some(candidate),
                config.mutation_trials,
                &rng.fork(),
            )?;
            let rate = evaluation.win_rate();
            Ok::<_, SimError>((rate > config.acceptance_threshold).then_some((mutated, rate)))
        })?;

        Ok(match attempt {
            Attempt::Success {
                value: (candidate, win_rate),
                attempts,
            } => {
                debug!(swaps, attempts, win_rate, "mutation accepted");
                Mutation::Improved {
                    candidate,
                    attempts,
                    win_rate,
                }
            }
            Attempt::Exhausted { attempts } => {
                warn!(swaps, attempts, "no accepted mutation, keeping original deck");
                Mutation::Exhausted { attempts }
            }
        })
    }

    /// Remove `swaps` cards at random positions and append as many random
    /// catalog cards. `None` if the catalog is empty.
    fn swap_cards(
        &self,
        candidate: &DeckCandidate,
        swaps: usize,
        rng: &mut GameRng,
    ) -> Option<DeckCandidate> {
        let mut deck = candidate.deck.clone();
        for _ in 0..swaps {
            let position = rng.gen_range_usize(0..deck.len());
            deck.remove(position);
        }
        let replacements: Option<Vec<CardId>> =
            (0..swaps).map(|_| self.catalog().random_id(rng)).collect();
        deck.extend(replacements?);
        Some(DeckCandidate::new(deck, candidate.energy.clone()))
    }

    /// Build `size` random valid decks in parallel.
    pub fn initial_population(&self, size: usize) -> Result<Vec<DeckCandidate>> {
        let rng = self.rng.for_context("population");
        (0..size)
            .into_par_iter()
            .map(|index| {
                let mut rng = rng.stream(index as u64);
                DeckCandidate::random(self.catalog(), self.config(), &mut rng)
            })
            .collect()
    }

    /// Evaluate every deck against random opponents, in parallel.
    pub fn evaluate_population(
        &self,
        population: &[DeckCandidate],
        rng: &GameRng,
    ) -> Result<Vec<Evaluation>> {
        let trials = self.config().trials;
        population
            .par_iter()
            .enumerate()
            .map(|(index, candidate)| {
                self.evaluator
                    .evaluate(candidate, None, trials, &rng.stream(index as u64))
            })
            .collect()
    }

    /// Run `generations` tournament rounds over `2^generations` random decks
    /// and return the survivor.
    pub fn run_generations(&self, generations: u32) -> Result<SearchOutcome> {
        if generations > MAX_GENERATIONS {
            return Err(SimError::PopulationTooLarge(generations));
        }

        let size = 1usize << generations;
        info!(generations, size, "initializing population");
        let mut population = self.initial_population(size)?;
        let mut history = Vec::with_capacity(generations as usize);

        for generation in 1..=generations {
            let mut rng = self.rng.for_context(&format!("generation-{generation}"));
            let evaluations = self.evaluate_population(&population, &rng.fork())?;
            let rates: Vec<f64> = evaluations.iter().map(Evaluation::win_rate).collect();

            let mutation_rng = rng.for_context("tournament");
            let results: Vec<(DeckCandidate, Option<Mutation>)> = population
                .par_chunks(2)
                .zip(rates.par_chunks(2))
                .enumerate()
                .map(|(pair, (decks, rates))| {
                    let mut rng = mutation_rng.stream(pair as u64);
                    self.tournament_pair(decks, rates, &mut rng)
                })
                .collect::<Result<_>>()?;

            let report = GenerationReport {
                generation,
                population: population.len(),
                best_win_rate: rates.iter().copied().fold(0.0, f64::max),
                mean_win_rate: mean(&rates),
                improved: count(&results, |m| m.is_improved()),
                unchanged: count(&results, |m| matches!(m, Mutation::Unchanged)),
                exhausted: count(&results, |m| matches!(m, Mutation::Exhausted { .. })),
            };
            info!(
                generation,
                of = generations,
                population = report.population,
                best = report.best_win_rate,
                mean = report.mean_win_rate,
                improved = report.improved,
                exhausted = report.exhausted,
                "generation complete"
            );
            history.push(report);

            population = results.into_iter().map(|(deck, _)| deck).collect();
        }

        let champion = population
            .into_iter()
            .next()
            .ok_or(SimError::DeckGenerationExhausted { attempts: 0 })?;
        info!("search complete");
        Ok(SearchOutcome { champion, history })
    }

    /// Reduce one adjacent pair to a single (possibly mutated) deck.
    fn tournament_pair(
        &self,
        decks: &[DeckCandidate],
        rates: &[f64],
        rng: &mut GameRng,
    ) -> Result<(DeckCandidate, Option<Mutation>)> {
        let ([_, _], [left_rate, right_rate]) = (decks, rates) else {
            // Odd tail: the unpaired deck advances untouched.
            return Ok((decks[0].clone(), None));
        };
        let index = self.config().tournament.pick(*left_rate, *right_rate);
        let (chosen, rate) = (&decks[index], rates[index]);

        let mutation = self.mutate_deck(chosen, rate, rng)?;
        let deck = mutation.clone().into_candidate(chosen.clone());
        Ok((deck, Some(mutation)))
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn count(
    results: &[(DeckCandidate, Option<Mutation>)],
    predicate: impl Fn(&Mutation) -> bool,
) -> usize {
    results
        .iter()
        .filter(|(_, mutation)| mutation.as_ref().is_some_and(&predicate))
        .count()
}
