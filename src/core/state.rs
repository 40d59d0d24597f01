//! Battle state.
//!
//! `BattleState` is everything that changes during one match: the turn
//! counter and both players. It is created per match and never shared
//! between matches, so trials can run on separate threads.

use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId, PlayerMap, PlayerSnapshot};
use crate::search::DeckCandidate;

/// Mutable state of a single battle.
#[derive(Clone, Debug)]
pub struct BattleState {
    /// Current turn, starting at 1.
    pub turn: u32,

    pub players: PlayerMap<Player>,

    /// Winner of the coin toss, once tossed.
    pub first: Option<PlayerId>,
}

impl BattleState {
    /// Fresh players for a match between two decks.
    #[must_use]
    pub fn new(one: &DeckCandidate, two: &DeckCandidate) -> Self {
        Self {
            turn: 1,
            players: PlayerMap::new(|id| {
                Player::from_candidate(id, if id == PlayerId::ONE { one } else { two })
            }),
            first: None,
        }
    }

    /// Record the coin toss.
    pub fn set_first(&mut self, first: PlayerId) {
        self.first = Some(first);
        for id in PlayerId::BOTH {
            self.players[id].went_first = id == first;
        }
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    /// Copy of the state at the end of `acting`'s turn.
    #[must_use]
    pub fn snapshot(&self, acting: PlayerId) -> TurnSnapshot {
        TurnSnapshot {
            turn: self.turn,
            acting,
            players: self.players.map(Player::snapshot),
        }
    }
}

/// State after one turn, for battle logs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub turn: u32,
    pub acting: PlayerId,
    pub players: PlayerMap<PlayerSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, Element};

    fn candidate(id: &str) -> DeckCandidate {
        DeckCandidate::new(vec![CardId::new(id); 20], vec![Element::Fire])
    }

    #[test]
    fn test_new_state() {
        let state = BattleState::new(&candidate("001"), &candidate("002"));

        assert_eq!(state.turn, 1);
        assert_eq!(state.player(PlayerId::ONE).deck[0], CardId::new("001"));
        assert_eq!(state.player(PlayerId::TWO).deck[0], CardId::new("002"));
        assert_eq!(state.player(PlayerId::TWO).id, PlayerId::TWO);
        assert!(state.first.is_none());
    }

    #[test]
    fn test_set_first() {
        let mut state = BattleState::new(&candidate("001"), &candidate("002"));
        state.set_first(PlayerId::TWO);

        assert_eq!(state.first, Some(PlayerId::TWO));
        assert!(state.player(PlayerId::TWO).went_first);
        assert!(!state.player(PlayerId::ONE).went_first);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut state = BattleState::new(&candidate("001"), &candidate("002"));
        let snapshot = state.snapshot(PlayerId::ONE);

        state.players[PlayerId::ONE].points = 3;
        state.turn = 9;

        assert_eq!(snapshot.turn, 1);
        assert_eq!(snapshot.players[PlayerId::ONE].points, 0);
        assert_eq!(snapshot.players[PlayerId::ONE].deck.len(), 20);
    }
}
