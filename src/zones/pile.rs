//! Deck piles: shuffling, drawing and the opening hand.
//!
//! Piles are plain `Vec<CardId>`s with the top card at index 0.

use tracing::debug;

use crate::cards::{CardCatalog, CardId};
use crate::core::config::RulesConfig;
use crate::core::error::{Result, SimError};
use crate::core::player::Player;
use crate::core::retry::{bounded, Attempt};
use crate::core::rng::GameRng;

/// Shuffle a pile into a uniformly random order.
pub fn shuffle(deck: &mut [CardId], rng: &mut GameRng) {
    rng.shuffle(deck);
}

/// Move up to `n` cards from the top of `deck` onto `target`.
///
/// Stops quietly when the deck runs out. Returns the number moved.
pub fn draw(deck: &mut Vec<CardId>, target: &mut Vec<CardId>, n: usize) -> usize {
    let n = n.min(deck.len());
    target.extend(deck.drain(..n));
    n
}

/// Draw an opening hand containing at least one basic creature.
///
/// Each attempt returns the hand to the deck, shuffles and draws
/// `opening_hand_size` cards. Returns the number of attempts taken, or
/// `MulliganExhausted` after `mulligan_limit` attempts.
///
/// The deck must already have passed validation, which guarantees a basic
/// creature somewhere in it.
pub fn opening_hand(
    player: &mut Player,
    catalog: &CardCatalog,
    rules: &RulesConfig,
    rng: &mut GameRng,
) -> Result<u32> {
    let attempt = bounded(rules.mulligan_limit, |n| {
        player.deck.append(&mut player.hand);
        shuffle(&mut player.deck, rng);
        draw(&mut player.deck, &mut player.hand, rules.opening_hand_size);

        if player.first_basic_in_hand(catalog).is_some() {
            Ok::<_, SimError>(Some(()))
        } else {
            debug!(player = %player.id, attempt = n, "no basic in opening hand, redrawing");
            Ok(None)
        }
    })?;

    match attempt {
        Attempt::Success { attempts, .. } => Ok(attempts),
        Attempt::Exhausted { attempts } => Err(SimError::MulliganExhausted { attempts }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CreatureCard, Element};
    use crate::core::player::PlayerId;
    use crate::search::DeckCandidate;

    fn ids(names: &[&str]) -> Vec<CardId> {
        names.iter().map(|&n| CardId::new(n)).collect()
    }

    #[test]
    fn test_draw_from_top() {
        let mut deck = ids(&["a", "b", "c"]);
        let mut hand = ids(&["z"]);

        assert_eq!(draw(&mut deck, &mut hand, 2), 2);
        assert_eq!(hand, ids(&["z", "a", "b"]));
        assert_eq!(deck, ids(&["c"]));
    }

    #[test]
    fn test_draw_stops_when_empty() {
        let mut deck = ids(&["a"]);
        let mut hand = Vec::new();

        assert_eq!(draw(&mut deck, &mut hand, 5), 1);
        assert!(deck.is_empty());
        assert_eq!(draw(&mut deck, &mut hand, 1), 0);
        assert_eq!(hand.len(), 1);
    }

    #[test]
    fn test_opening_hand_has_basic() {
        let mut cards = vec![CardDefinition::creature(
            "001",
            "Bulbasaur",
            CreatureCard::basic(70, Element::Grass),
        )];
        cards.extend((2..=10).map(|i| CardDefinition::item(format!("{i:03}").as_str(), "Item")));
        let catalog = CardCatalog::from_definitions(cards).unwrap();

        let deck: Vec<CardId> = catalog.ids().flat_map(|id| [id.clone(), id.clone()]).collect();
        let candidate = DeckCandidate::new(deck, vec![Element::Grass]);
        let rules = RulesConfig::default();

        for seed in 0..20 {
            let mut player = Player::from_candidate(PlayerId::ONE, &candidate);
            let mut rng = GameRng::new(seed);

            let attempts = opening_hand(&mut player, &catalog, &rules, &mut rng).unwrap();
            assert!(attempts >= 1);
            assert_eq!(player.hand.len(), 5);
            assert_eq!(player.deck.len(), 15);
            assert!(player.first_basic_in_hand(&catalog).is_some());
        }
    }

    #[test]
    fn test_opening_hand_ceiling() {
        let catalog = CardCatalog::from_definitions(
            (1..=10).map(|i| CardDefinition::item(format!("{i:03}").as_str(), "Item")),
        )
        .unwrap();
        let deck: Vec<CardId> = catalog.ids().flat_map(|id| [id.clone(), id.clone()]).collect();
        let mut player =
            Player::from_candidate(PlayerId::ONE, &DeckCandidate::new(deck, vec![Element::Fire]));
        let rules = RulesConfig::default().with_mulligan_limit(8);

        let result = opening_hand(&mut player, &catalog, &rules, &mut GameRng::new(1));
        assert!(matches!(
            result,
            Err(SimError::MulliganExhausted { attempts: 8 })
        ));
        assert_eq!(player.hand.len() + player.deck.len(), 20);
    }
}
