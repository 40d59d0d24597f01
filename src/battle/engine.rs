//! Battle orchestrator.
//!
//! Drives one match from setup to a terminal result:
//!
//! ```text
//! Setup -> OpeningHands -> CoinToss -> Promotion
//!       -> TurnLoop(Draw -> Energy -> Evolve -> Attack -> Knockout -> WinCheck)
//!       -> Terminal
//! ```
//!
//! The turn loop hands the turn over before acting, so the first turn is
//! played by the player who lost the coin toss. Energy is granted on every
//! turn except turn 1. The stage a battle ended in is kept on its
//! `BattleRecord`.

use tracing::{debug, trace, warn};

use super::record::{BattleRecord, Phase};
use crate::cards::{resolve_damage, CardCatalog, Creature};
use crate::core::config::RulesConfig;
use crate::core::error::Result;
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::core::state::{BattleState, TurnSnapshot};
use crate::rules::{validate_deck, BattleOutcome};
use crate::search::DeckCandidate;
use crate::zones::{draw, opening_hand};

/// A single match between two decks.
///
/// ## Example
///
/// ```rust,ignore
/// let record = Battle::new(&catalog, &rules, &deck_a, &deck_b, GameRng::new(7)).run()?;
/// if record.outcome.is_winner(PlayerId::ONE) { /* ... */ }
/// ```
pub struct Battle<'a> {
    catalog: &'a CardCatalog,
    rules: &'a RulesConfig,
    state: BattleState,
    rng: GameRng,
    phase: Phase,
    keep_log: bool,
    log: Vec<TurnSnapshot>,
}

impl<'a> Battle<'a> {
    /// Set up a battle. `one` plays as `PlayerId::ONE`.
    #[must_use]
    pub fn new(
        catalog: &'a CardCatalog,
        rules: &'a RulesConfig,
        one: &DeckCandidate,
        two: &DeckCandidate,
        rng: GameRng,
    ) -> Self {
        Self {
            catalog,
            rules,
            state: BattleState::new(one, two),
            rng,
            phase: Phase::Setup,
            keep_log: true,
            log: Vec::new(),
        }
    }

    /// Skip per-turn snapshots (evaluation only needs the outcome).
    #[must_use]
    pub fn without_log(mut self) -> Self {
        self.keep_log = false;
        self
    }

    #[must_use]
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// Play the battle to completion.
    ///
    /// Invalid decks end the battle as `Aborted`. Errors are reserved for
    /// failures outside the rules, such as an exhausted mulligan ceiling.
    pub fn run(mut self) -> Result<BattleRecord> {
        if let Some(outcome) = self.setup() {
            return Ok(self.finish(outcome));
        }

        self.phase = Phase::OpeningHands;
        let pending = self.deal_opening_hands()?;

        self.phase = Phase::CoinToss;
        let first = if self.rng.coin_flip() {
            PlayerId::ONE
        } else {
            PlayerId::TWO
        };
        self.state.set_first(first);
        debug!(%first, "coin toss");

        self.phase = Phase::Promotion;
        for id in PlayerId::BOTH {
            match pending[id] {
                Some(index) => self.state.players[id].promote(index, self.catalog)?,
                None => return Ok(self.finish(BattleOutcome::WinByElimination(id.opponent()))),
            }
        }

        self.phase = Phase::TurnLoop;
        let mut acting = first;
        loop {
            acting = acting.opponent();
            if let Some(outcome) = self.play_turn(acting)? {
                return Ok(self.finish(outcome));
            }
            if self.keep_log {
                self.log.push(self.state.snapshot(acting));
            }
            self.state.turn += 1;
        }
    }

    /// Validate both decks.
    fn setup(&self) -> Option<BattleOutcome> {
        for (id, player) in self.state.players.iter() {
            if let Err(violation) =
                validate_deck(&player.deck, &player.energy_zone, self.catalog, self.rules)
            {
                warn!(player = %id, %violation, "deck rejected, aborting battle");
                return Some(BattleOutcome::Aborted {
                    player: id,
                    violation,
                });
            }
        }
        None
    }

    /// Draw both opening hands and pick each player's first basic.
    fn deal_opening_hands(&mut self) -> Result<PlayerMap<Option<usize>>> {
        for id in PlayerId::BOTH {
            let attempts = opening_hand(
                &mut self.state.players[id],
                self.catalog,
                self.rules,
                &mut self.rng,
            )?;
            debug!(player = %id, attempts, "opening hand drawn");
        }
        Ok(self
            .state
            .players
            .map(|player| player.first_basic_in_hand(self.catalog)))
    }

    /// Play one turn for `acting`. Returns the outcome if the battle ended.
    fn play_turn(&mut self, acting: PlayerId) -> Result<Option<BattleOutcome>> {
        let turn = self.state.turn;
        let (me, them) = self.state.players.split_mut(acting);

        draw(&mut me.deck, &mut me.hand, 1);

        if turn > 1 {
            if let Some(element) = me.grant_energy(&mut self.rng) {
                trace!(turn, player = %acting, %element, "energy attached");
            }
        }

        if let Some(evolved) = me.evolve_active(self.catalog)? {
            trace!(turn, player = %acting, card = %evolved, "evolved");

            // Carried damage can meet or exceed the evolved card's HP.
            if me.active.as_ref().is_some_and(Creature::is_fainted) {
                me.discard_active();
                trace!(turn, player = %acting, card = %evolved, "fainted on evolution");
                if !me.promote_first_basic(self.catalog)? {
                    return Ok(Some(BattleOutcome::WinByElimination(acting.opponent())));
                }
            }
        }

        let knocked_out = match (me.active.as_ref(), them.active.as_mut()) {
            (Some(attacker), Some(defender)) => match attacker.first_usable_move() {
                Some(mv) => {
                    let dealt = resolve_damage(attacker, defender, mv.damage);
                    trace!(turn, player = %acting, attack = %mv.name, dealt, hp = defender.hp(), "attacked");
                    defender.is_fainted()
                }
                None => false,
            },
            _ => false,
        };

        if knocked_out {
            if let Some(fainted) = them.discard_active() {
                me.points += self.rules.knockout_value(&fainted.name);
                trace!(turn, player = %acting, knocked_out = %fainted.name, points = me.points, "knockout");
            }
            if !them.promote_first_basic(self.catalog)? {
                return Ok(Some(BattleOutcome::WinByElimination(acting)));
            }
        }

        if turn >= self.rules.turn_cap {
            return Ok(Some(BattleOutcome::Draw));
        }

        if me.points >= self.rules.points_to_win {
            return Ok(Some(BattleOutcome::WinByPoints(acting)));
        }

        Ok(None)
    }

    fn finish(self, outcome: BattleOutcome) -> BattleRecord {
        debug!(turns = self.state.turn, phase = ?self.phase, ?outcome, "battle finished");
        BattleRecord {
            seed: self.rng.seed(),
            first: self.state.first,
            turns: self.state.turn,
            ended_in: self.phase,
            outcome,
            log: self.log,
        }
    }
}

/// Play one battle between two decks.
pub fn simulate(
    catalog: &CardCatalog,
    rules: &RulesConfig,
    one: &DeckCandidate,
    two: &DeckCandidate,
    rng: GameRng,
) -> Result<BattleRecord> {
    Battle::new(catalog, rules, one, two, rng).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, CreatureCard, Element, Move};
    use crate::rules::DeckViolation;

    /// Ten basics that hit for 30 with one Fire energy.
    fn catalog() -> CardCatalog {
        CardCatalog::from_definitions((0..10).map(|i| {
            CardDefinition::creature(
                format!("{i:03}").as_str(),
                format!("Mon {i}"),
                CreatureCard::basic(60, Element::Fire)
                    .with_move(Move::new("Scratch", 30).with_cost(Element::Fire, 1)),
            )
        }))
        .unwrap()
    }

    fn deck() -> DeckCandidate {
        let cards = (0..10)
            .flat_map(|i| {
                let id = CardId::new(format!("{i:03}"));
                [id.clone(), id]
            })
            .collect();
        DeckCandidate::new(cards, vec![Element::Fire])
    }

    #[test]
    fn test_invalid_deck_aborts() {
        let catalog = catalog();
        let rules = RulesConfig::default();
        let mut short = deck();
        short.deck.truncate(19);

        let record = simulate(&catalog, &rules, &deck(), &short, GameRng::new(1)).unwrap();

        assert_eq!(
            record.outcome,
            BattleOutcome::Aborted {
                player: PlayerId::TWO,
                violation: DeckViolation::Size {
                    found: 19,
                    expected: 20
                }
            }
        );
        assert_eq!(record.first, None);
        assert_eq!(record.ended_in, Phase::Setup);
        assert!(record.log.is_empty());
    }

    #[test]
    fn test_repeated_energy_type_aborts() {
        let catalog = catalog();
        let rules = RulesConfig::default();
        let mut skewed = deck();
        skewed.energy = vec![Element::Fire, Element::Fire, Element::Water];

        let record = simulate(&catalog, &rules, &skewed, &deck(), GameRng::new(1)).unwrap();

        assert_eq!(
            record.outcome,
            BattleOutcome::Aborted {
                player: PlayerId::ONE,
                violation: DeckViolation::DuplicateEnergy(Element::Fire)
            }
        );
    }

    #[test]
    fn test_battle_terminates_with_winner() {
        let catalog = catalog();
        let rules = RulesConfig::default();

        for seed in 0..10 {
            let record = simulate(&catalog, &rules, &deck(), &deck(), GameRng::new(seed)).unwrap();

            // Every creature dies in two hits, so somebody scores 3 well before the cap.
            assert!(matches!(
                record.outcome,
                BattleOutcome::WinByPoints(_) | BattleOutcome::WinByElimination(_)
            ));
            assert!(record.turns < rules.turn_cap);
            assert_eq!(record.log.len() as u32, record.turns - 1);
            assert!(record.first.is_some());
            assert_eq!(record.ended_in, Phase::TurnLoop);
        }
    }

    #[test]
    fn test_first_turn_belongs_to_coin_toss_loser() {
        let catalog = catalog();
        let rules = RulesConfig::default();
        let record = simulate(&catalog, &rules, &deck(), &deck(), GameRng::new(3)).unwrap();

        let first = record.first.unwrap();
        assert_eq!(record.log[0].turn, 1);
        assert_eq!(record.log[0].acting, first.opponent());
        assert_eq!(record.log[1].acting, first);
    }

    #[test]
    fn test_no_energy_on_turn_one() {
        let catalog = catalog();
        let rules = RulesConfig::default();
        let record = simulate(&catalog, &rules, &deck(), &deck(), GameRng::new(11)).unwrap();

        let turn_one = &record.log[0];
        let actor = &turn_one.players[turn_one.acting];
        assert!(actor.active.as_ref().unwrap().energy.is_empty());
        assert_eq!(actor.hand.len(), 5);

        let turn_two = &record.log[1];
        let actor = &turn_two.players[turn_two.acting];
        assert_eq!(actor.active.as_ref().unwrap().energy.get(Element::Fire), 1);
    }

    #[test]
    fn test_turn_cap_draw() {
        // Nobody can attack without Water energy.
        let catalog = CardCatalog::from_definitions((0..10).map(|i| {
            CardDefinition::creature(
                format!("{i:03}").as_str(),
                format!("Mon {i}"),
                CreatureCard::basic(60, Element::Fire)
                    .with_move(Move::new("Splash", 30).with_cost(Element::Water, 1)),
            )
        }))
        .unwrap();
        let rules = RulesConfig::default();

        let record = simulate(&catalog, &rules, &deck(), &deck(), GameRng::new(2)).unwrap();

        assert_eq!(record.outcome, BattleOutcome::Draw);
        assert_eq!(record.turns, 50);
        assert_eq!(record.log.len(), 49);
    }

    #[test]
    fn test_same_seed_same_battle() {
        let catalog = catalog();
        let rules = RulesConfig::default();

        let a = simulate(&catalog, &rules, &deck(), &deck(), GameRng::new(99)).unwrap();
        let b = simulate(&catalog, &rules, &deck(), &deck(), GameRng::new(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_without_log() {
        let catalog = catalog();
        let rules = RulesConfig::default();
        let record = Battle::new(&catalog, &rules, &deck(), &deck(), GameRng::new(4))
            .without_log()
            .run()
            .unwrap();

        assert!(record.log.is_empty());
        assert!(record.winner().is_some());
    }

    /// `catalog()` plus a frail evolution of 000 and a basic ex.
    fn staged_catalog() -> CardCatalog {
        let mut catalog = catalog();
        catalog
            .register(CardDefinition::creature(
                "100",
                "Frail Mon",
                CreatureCard::basic(20, Element::Fire).evolves_from("000", 1),
            ))
            .unwrap();
        catalog
            .register(CardDefinition::creature(
                "200",
                "Titan ex",
                CreatureCard::basic(30, Element::Fire),
            ))
            .unwrap();
        catalog
    }

    fn spawn(catalog: &CardCatalog, id: &str) -> Creature {
        Creature::spawn(catalog.get(&CardId::new(id)).unwrap()).unwrap()
    }

    /// A battle on turn 1 with empty decks, empty hands and no actives.
    fn staged<'a>(catalog: &'a CardCatalog, rules: &'a RulesConfig) -> Battle<'a> {
        let mut battle = Battle::new(catalog, rules, &deck(), &deck(), GameRng::new(1));
        for id in PlayerId::BOTH {
            let player = &mut battle.state.players[id];
            player.deck.clear();
            player.hand.clear();
        }
        battle
    }

    fn hand(ids: &[&str]) -> Vec<CardId> {
        ids.iter().map(|&id| CardId::new(id)).collect()
    }

    #[test]
    fn test_evolution_into_fainted_creature_promotes() {
        let catalog = staged_catalog();
        let rules = RulesConfig::default();
        let mut battle = staged(&catalog, &rules);

        let mut damaged = spawn(&catalog, "000");
        damaged.take_damage(40);
        battle.state.players[PlayerId::ONE].active = Some(damaged);
        battle.state.players[PlayerId::ONE].hand = hand(&["100", "001"]);
        battle.state.players[PlayerId::TWO].active = Some(spawn(&catalog, "002"));

        let outcome = battle.play_turn(PlayerId::ONE).unwrap();

        assert_eq!(outcome, None);
        let one = &battle.state.players[PlayerId::ONE];
        assert_eq!(one.discard, hand(&["100"]));
        let active = one.active.as_ref().unwrap();
        assert_eq!(active.card_id, CardId::new("001"));
        assert_eq!(active.hp(), 60);
        assert!(one.hand.is_empty());
        assert_eq!(battle.state.players[PlayerId::TWO].points, 0);
    }

    #[test]
    fn test_evolution_into_fainted_creature_eliminates() {
        let catalog = staged_catalog();
        let rules = RulesConfig::default();
        let mut battle = staged(&catalog, &rules);

        let mut damaged = spawn(&catalog, "000");
        damaged.take_damage(40);
        battle.state.players[PlayerId::ONE].active = Some(damaged);
        battle.state.players[PlayerId::ONE].hand = hand(&["100"]);
        battle.state.players[PlayerId::TWO].active = Some(spawn(&catalog, "002"));

        let outcome = battle.play_turn(PlayerId::ONE).unwrap();

        assert_eq!(outcome, Some(BattleOutcome::WinByElimination(PlayerId::TWO)));
        assert!(battle.state.players[PlayerId::ONE].active.is_none());
    }

    #[test]
    fn test_knockout_needs_an_attack() {
        let catalog = staged_catalog();
        let rules = RulesConfig::default();
        let mut battle = staged(&catalog, &rules);

        // No energy, so no attack.
        battle.state.players[PlayerId::ONE].active = Some(spawn(&catalog, "000"));
        let mut fainted = spawn(&catalog, "001");
        fainted.take_damage(60);
        battle.state.players[PlayerId::TWO].active = Some(fainted);

        assert_eq!(battle.play_turn(PlayerId::ONE).unwrap(), None);
        assert_eq!(battle.state.players[PlayerId::ONE].points, 0);
        assert!(battle.state.players[PlayerId::TWO].active.is_some());
    }

    #[test]
    fn test_knockout_without_basic_in_hand_eliminates() {
        let catalog = staged_catalog();
        let rules = RulesConfig::default();
        let mut battle = staged(&catalog, &rules);

        let mut attacker = spawn(&catalog, "000");
        attacker.energy.attach(Element::Fire, 1);
        battle.state.players[PlayerId::ONE].active = Some(attacker);
        let mut defender = spawn(&catalog, "003");
        defender.take_damage(40);
        battle.state.players[PlayerId::TWO].active = Some(defender);
        battle.state.players[PlayerId::TWO].hand = hand(&["100"]);

        let outcome = battle.play_turn(PlayerId::ONE).unwrap();

        // One point is far from three, elimination still ends the battle.
        assert_eq!(outcome, Some(BattleOutcome::WinByElimination(PlayerId::ONE)));
        assert_eq!(battle.state.players[PlayerId::ONE].points, 1);
        assert_eq!(battle.state.players[PlayerId::TWO].discard, hand(&["003"]));
    }

    #[test]
    fn test_ex_knockout_scores_two() {
        let catalog = staged_catalog();
        let rules = RulesConfig::default();
        let mut battle = staged(&catalog, &rules);

        let mut attacker = spawn(&catalog, "000");
        attacker.energy.attach(Element::Fire, 1);
        battle.state.players[PlayerId::ONE].active = Some(attacker.clone());
        battle.state.players[PlayerId::TWO].active = Some(spawn(&catalog, "200"));
        battle.state.players[PlayerId::TWO].hand = hand(&["200", "001"]);

        assert_eq!(battle.play_turn(PlayerId::ONE).unwrap(), None);
        assert_eq!(battle.state.players[PlayerId::ONE].points, 2);
        let promoted = battle.state.players[PlayerId::TWO].active.as_ref().unwrap();
        assert_eq!(promoted.name, "Titan ex");

        // A second ex knockout crosses three points.
        battle.state.turn = 3;
        battle.state.players[PlayerId::ONE].active = Some(attacker);
        assert_eq!(
            battle.play_turn(PlayerId::ONE).unwrap(),
            Some(BattleOutcome::WinByPoints(PlayerId::ONE))
        );
        assert_eq!(battle.state.players[PlayerId::ONE].points, 4);
    }
}
