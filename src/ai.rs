//! Hunt/target selection for the computer's shots against the player board.
//! Reads only the shot grid (hits and misses), never the terrain underneath.

use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::board::{ShotGrid, BB};
use crate::config::BOARD_SIZE;
use crate::vessel::Coord;

/// Opponent hits that belong to a vessel not yet sunk, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct HitHistory {
    hits: Vec<Coord>,
}

impl HitHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, at: Coord) {
        self.hits.push(at);
    }

    /// Drops every hit inside `footprint`, normally a vessel just sunk.
    pub fn prune(&mut self, footprint: BB) {
        self.hits.retain(|at| !footprint.contains(at.x(), at.y()));
    }

    pub fn as_slice(&self) -> &[Coord] {
        &self.hits
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Which rule produced a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    /// Extend a straight run of two or more hits.
    LineFollow,
    /// Probe around a single hit.
    AdjacentHunt,
    /// No usable lead; any hidden cell.
    RandomSearch,
}

/// The two cells just past either end of a collinear run of hits, if the
/// hits form one. Either end may fall off the board.
fn line_ends(hits: &[Coord]) -> Option<[Option<Coord>; 2]> {
    let first = *hits.first()?;
    if hits.len() < 2 {
        return None;
    }
    if hits.iter().all(|h| h.x() == first.x()) {
        let top = hits.iter().map(|h| h.y()).min()?;
        let bottom = hits.iter().map(|h| h.y()).max()?;
        let x = first.x();
        Some([
            top.checked_sub(1).and_then(|y| Coord::new(x, y)),
            Coord::new(x, bottom + 1),
        ])
    } else if hits.iter().all(|h| h.y() == first.y()) {
        let left = hits.iter().map(|h| h.x()).min()?;
        let right = hits.iter().map(|h| h.x()).max()?;
        let y = first.y();
        Some([
            left.checked_sub(1).and_then(|x| Coord::new(x, y)),
            Coord::new(right + 1, y),
        ])
    } else {
        None
    }
}

/// Applies the targeting rules in priority order and returns the mode
/// together with its candidate cells. `RandomSearch` carries no candidates;
/// its cell is sampled by [`choose_target`].
pub fn candidates(view: &ShotGrid, hits: &[Coord]) -> (TargetMode, Vec<Coord>) {
    if hits.len() >= 2 {
        if let Some(ends) = line_ends(hits) {
            let open: Vec<Coord> = ends
                .into_iter()
                .flatten()
                .filter(|at| view.is_hidden(*at))
                .collect();
            if !open.is_empty() {
                return (TargetMode::LineFollow, open);
            }
        }
    } else if let [hit] = hits {
        let open: Vec<Coord> = hit.orthogonal().filter(|at| view.is_hidden(*at)).collect();
        if !open.is_empty() {
            return (TargetMode::AdjacentHunt, open);
        }
    }
    (TargetMode::RandomSearch, Vec::new())
}

/// Uniformly random hidden cell, resampling whenever the draw lands on a
/// cell already shot. `None` once every cell has been fired on.
pub fn random_hidden<R: Rng + ?Sized>(view: &ShotGrid, rng: &mut R) -> Option<Coord> {
    if view.hidden().is_empty() {
        return None;
    }
    loop {
        let x = rng.random_range(0..BOARD_SIZE);
        let y = rng.random_range(0..BOARD_SIZE);
        let at = Coord::new(x, y)?;
        if view.is_hidden(at) {
            return Some(at);
        }
    }
}

/// Picks the next cell to fire at.
pub fn choose_target<R: Rng + ?Sized>(
    view: &ShotGrid,
    hits: &[Coord],
    rng: &mut R,
) -> Option<(TargetMode, Coord)> {
    match candidates(view, hits) {
        (TargetMode::RandomSearch, _) => {
            random_hidden(view, rng).map(|at| (TargetMode::RandomSearch, at))
        }
        (mode, open) => Some((mode, open[rng.random_range(0..open.len())])),
    }
}

/// Interface implemented by the computer's targeting strategies.
pub trait Strategy: Send {
    /// Short label used in logs and simulator output.
    fn name(&self) -> &'static str;

    /// Choose the next target given the shots so far and the unresolved hits.
    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        view: &ShotGrid,
        hits: &[Coord],
    ) -> Option<Coord>;
}

/// Random search until something is hit, then adjacent probing and line
/// following until the vessel sinks.
#[derive(Debug, Default, Clone, Copy)]
pub struct HuntTarget;

impl Strategy for HuntTarget {
    fn name(&self) -> &'static str {
        "hunt-target"
    }

    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        view: &ShotGrid,
        hits: &[Coord],
    ) -> Option<Coord> {
        let (mode, at) = choose_target(view, hits, rng)?;
        log::trace!("{:?} picked {}", mode, at);
        Some(at)
    }
}

/// Never leaves random search. Baseline for the simulator.
#[derive(Debug, Default, Clone, Copy)]
pub struct HuntOnly;

impl Strategy for HuntOnly {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        view: &ShotGrid,
        _hits: &[Coord],
    ) -> Option<Coord> {
        random_hidden(view, rng)
    }
}
