//! Win streak bookkeeping at the end of a game.

use crate::common::Side;
use crate::config::GAME_ID;

/// A score to hand to the external scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ScoreReport {
    #[cfg_attr(feature = "std", serde(rename = "game_name"))]
    pub game_id: &'static str,
    pub score: u32,
}

/// How a finished game changed the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The player sank the opponent's fleet. `report` carries the new streak.
    Victory { streak: u32, report: ScoreReport },
    /// The opponent sank the player's fleet; the streak is back to zero.
    Defeat,
}

impl Outcome {
    pub fn streak(&self) -> u32 {
        match self {
            Outcome::Victory { streak, .. } => *streak,
            Outcome::Defeat => 0,
        }
    }

    /// Only victories are reported.
    pub fn report(&self) -> Option<ScoreReport> {
        match self {
            Outcome::Victory { report, .. } => Some(*report),
            Outcome::Defeat => None,
        }
    }
}

/// Settles a finished game. A player win extends the streak by one and
/// produces a report; an opponent win resets it.
pub fn settle(streak: u32, winner: Side) -> Outcome {
    match winner {
        Side::Player => {
            let streak = streak.saturating_add(1);
            Outcome::Victory {
                streak,
                report: ScoreReport {
                    game_id: GAME_ID,
                    score: streak,
                },
            }
        }
        Side::Opponent => Outcome::Defeat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_extends_streak_and_reports_it() {
        let outcome = settle(2, Side::Player);
        assert_eq!(outcome.streak(), 3);
        assert_eq!(
            outcome.report(),
            Some(ScoreReport {
                game_id: "Battleship",
                score: 3
            })
        );
    }

    #[test]
    fn loss_resets_without_report() {
        let outcome = settle(7, Side::Opponent);
        assert_eq!(outcome, Outcome::Defeat);
        assert_eq!(outcome.streak(), 0);
        assert!(outcome.report().is_none());
    }
}
