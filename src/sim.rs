#![cfg(feature = "std")]

//! Headless simulator measuring how many shots a strategy needs to sink a
//! randomly generated fleet.

use rand::rngs::SmallRng;
use serde::Serialize;

use crate::ai::{HitHistory, Strategy};
use crate::common::ShotResult;
use crate::placement::generate_fleet;

/// Summary printed as JSON by the `sim` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimReport {
    pub strategy: &'static str,
    pub games: usize,
    pub mean_shots: f64,
    pub min_shots: usize,
    pub max_shots: usize,
}

/// Plays one solitaire game against a fresh fleet and returns the number of
/// shots fired until every vessel is sunk.
pub fn shots_to_sink(strategy: &mut dyn Strategy, rng: &mut SmallRng) -> anyhow::Result<usize> {
    let mut board = generate_fleet(rng);
    let mut history = HitHistory::new();
    let mut shots = 0;
    while !board.all_sunk() {
        let at = strategy
            .select_target(rng, &board.shots(), history.as_slice())
            .ok_or_else(|| anyhow::anyhow!("{} found no target", strategy.name()))?;
        let (next, result) = board.fire(at)?;
        board = next;
        shots += 1;
        match result {
            ShotResult::Miss => {}
            ShotResult::Hit(_) => history.record(at),
            ShotResult::Sunk(id) => {
                history.record(at);
                history.prune(board.vessel_cells(id));
            }
        }
    }
    Ok(shots)
}

/// Runs `games` games back to back with one RNG.
pub fn run(strategy: &mut dyn Strategy, games: usize, rng: &mut SmallRng) -> anyhow::Result<SimReport> {
    anyhow::ensure!(games > 0, "need at least one game");
    let mut total = 0;
    let mut min_shots = usize::MAX;
    let mut max_shots = 0;
    for game in 0..games {
        let shots = shots_to_sink(strategy, rng)?;
        log::debug!("game {}: {} shots", game, shots);
        total += shots;
        min_shots = min_shots.min(shots);
        max_shots = max_shots.max(shots);
    }
    Ok(SimReport {
        strategy: strategy.name(),
        games,
        mean_shots: total as f64 / games as f64,
        min_shots,
        max_shots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{HuntOnly, HuntTarget};
    use crate::config::{BOARD_SIZE, TOTAL_VESSEL_CELLS};
    use rand::SeedableRng;

    #[test]
    fn every_game_ends_within_the_board() {
        let mut rng = SmallRng::seed_from_u64(3);
        let report = run(&mut HuntTarget, 20, &mut rng).unwrap();
        assert!(report.min_shots >= TOTAL_VESSEL_CELLS);
        assert!(report.max_shots <= BOARD_SIZE * BOARD_SIZE);
        assert_eq!(report.games, 20);
    }

    #[test]
    fn targeting_beats_random_search() {
        let mut rng = SmallRng::seed_from_u64(11);
        let smart = run(&mut HuntTarget, 100, &mut rng).unwrap();
        let blind = run(&mut HuntOnly, 100, &mut rng).unwrap();
        assert!(smart.mean_shots < blind.mean_shots);
    }

    #[test]
    fn zero_games_is_an_error() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(run(&mut HuntOnly, 0, &mut rng).is_err());
    }
}
