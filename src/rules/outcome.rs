//! Terminal results of a battle.

use serde::{Deserialize, Serialize};

use super::validation::DeckViolation;
use crate::core::player::PlayerId;

/// How a battle ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// Winner reached the point threshold.
    WinByPoints(PlayerId),
    /// The loser had no basic creature to replace a knocked out one.
    WinByElimination(PlayerId),
    /// Turn cap reached.
    Draw,
    /// A deck failed validation before setup.
    Aborted {
        player: PlayerId,
        violation: DeckViolation,
    },
}

impl BattleOutcome {
    /// The winner, if there is one.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            BattleOutcome::WinByPoints(p) | BattleOutcome::WinByElimination(p) => Some(*p),
            BattleOutcome::Draw | BattleOutcome::Aborted { .. } => None,
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner() == Some(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_winner() {
        let points = BattleOutcome::WinByPoints(PlayerId::TWO);
        assert!(points.is_winner(PlayerId::TWO));
        assert!(!points.is_winner(PlayerId::ONE));

        let knockout = BattleOutcome::WinByElimination(PlayerId::ONE);
        assert_eq!(knockout.winner(), Some(PlayerId::ONE));

        assert_eq!(BattleOutcome::Draw.winner(), None);

        let aborted = BattleOutcome::Aborted {
            player: PlayerId::ONE,
            violation: DeckViolation::MissingBasic,
        };
        assert!(!aborted.is_winner(PlayerId::ONE));
        assert!(!aborted.is_winner(PlayerId::TWO));
    }
}
