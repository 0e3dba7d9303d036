//! Board model: vessel footprints plus hit/miss visibility, all as bitboards.

use crate::bitboard::BitBoard;
use crate::common::{BoardError, PlacementError, ShotResult};
use crate::config::{BOARD_SIZE, NUM_VESSELS};
use crate::vessel::{Coord, VesselId};

/// Bitboard covering the game grid.
pub type BB = BitBoard<u128, BOARD_SIZE>;

/// Coordinates of every cell set in `mask`.
pub fn coords(mask: BB) -> impl Iterator<Item = Coord> {
    mask.iter().filter_map(|(x, y)| Coord::new(x, y))
}

/// What occupies a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terrain {
    Water,
    Vessel(VesselId),
}

/// What the attacker has learned about a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Hit,
    Miss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub terrain: Terrain,
    pub visibility: Visibility,
}

impl Cell {
    pub fn vessel(&self) -> Option<VesselId> {
        match self.terrain {
            Terrain::Vessel(id) => Some(id),
            Terrain::Water => None,
        }
    }
}

/// The attacker's view of a board: shots only, never terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotGrid {
    pub hits: BB,
    pub misses: BB,
}

impl ShotGrid {
    pub fn is_hidden(&self, at: Coord) -> bool {
        !self.hits.contains(at.x(), at.y()) && !self.misses.contains(at.x(), at.y())
    }

    /// Cells not yet fired upon.
    pub fn hidden(&self) -> BB {
        !(self.hits | self.misses)
    }

    pub fn shots_fired(&self) -> usize {
        self.hits.count_ones() + self.misses.count_ones()
    }
}

/// One side's grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    vessels: [BB; NUM_VESSELS],
    vessel_map: BB,
    shots: ShotGrid,
}

impl Board {
    /// All water, nothing shot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a cell. Fails with `OutOfBounds` outside the grid.
    pub fn cell_at(&self, x: usize, y: usize) -> Result<Cell, BoardError> {
        let at = Coord::new(x, y).ok_or(BoardError::OutOfBounds { x, y })?;
        Ok(self.cell(at))
    }

    /// Infallible lookup for a validated coordinate.
    pub fn cell(&self, at: Coord) -> Cell {
        let terrain = match self.vessel_at(at) {
            Some(id) => Terrain::Vessel(id),
            None => Terrain::Water,
        };
        let visibility = if self.shots.hits.contains(at.x(), at.y()) {
            Visibility::Hit
        } else if self.shots.misses.contains(at.x(), at.y()) {
            Visibility::Miss
        } else {
            Visibility::Hidden
        };
        Cell {
            terrain,
            visibility,
        }
    }

    pub fn vessel_at(&self, at: Coord) -> Option<VesselId> {
        self.vessels
            .iter()
            .position(|mask| mask.contains(at.x(), at.y()))
            .and_then(VesselId::new)
    }

    /// Writes `id` into each listed cell. Callers validate the placement
    /// first; this only refuses to double-seat a vessel or stack two
    /// vessels on one cell.
    pub fn set_vessel<I>(&mut self, cells: I, id: VesselId) -> Result<(), BoardError>
    where
        I: IntoIterator<Item = Coord>,
    {
        if !self.vessels[id.index()].is_empty() {
            return Err(BoardError::VesselAlreadyPlaced);
        }
        let mut mask = BB::new();
        for at in cells {
            mask.set(at.x(), at.y())?;
        }
        if !(mask & self.vessel_map).is_empty() {
            return Err(BoardError::IllegalPlacement(PlacementError::Overlaps));
        }
        self.vessels[id.index()] = mask;
        self.vessel_map |= mask;
        Ok(())
    }

    /// Lifts a vessel off the board, returning its former footprint. The
    /// cells go back to water and hidden.
    pub fn clear_vessel(&mut self, id: VesselId) -> BB {
        let mask = self.vessels[id.index()];
        self.vessels[id.index()] = BB::new();
        self.vessel_map &= !mask;
        self.shots.hits &= !mask;
        self.shots.misses &= !mask;
        mask
    }

    /// Returns a copy of the board with `(x, y)` marked hit or miss.
    /// Only hidden cells can be marked, and only vessel cells can be hit.
    pub fn mark_shot(&self, x: usize, y: usize, hit: bool) -> Result<Board, BoardError> {
        let cell = self.cell_at(x, y)?;
        if cell.visibility != Visibility::Hidden {
            return Err(BoardError::AlreadyShot);
        }
        if hit && cell.vessel().is_none() {
            return Err(BoardError::HitOnWater);
        }
        let mut next = *self;
        if hit {
            next.shots.hits.set(x, y)?;
        } else {
            next.shots.misses.set(x, y)?;
        }
        Ok(next)
    }

    /// Fires at `at`, deciding hit or miss from the terrain underneath.
    pub fn fire(&self, at: Coord) -> Result<(Board, ShotResult), BoardError> {
        let owner = self.vessel_at(at);
        let next = self.mark_shot(at.x(), at.y(), owner.is_some())?;
        let result = match owner {
            Some(id) if next.is_sunk(id) => ShotResult::Sunk(id),
            Some(id) => ShotResult::Hit(id),
            None => ShotResult::Miss,
        };
        Ok((next, result))
    }

    /// Footprint of a vessel; empty when not placed.
    pub fn vessel_cells(&self, id: VesselId) -> BB {
        self.vessels[id.index()]
    }

    pub fn is_placed(&self, id: VesselId) -> bool {
        !self.vessels[id.index()].is_empty()
    }

    /// A placed vessel whose every cell has been hit.
    pub fn is_sunk(&self, id: VesselId) -> bool {
        let mask = self.vessels[id.index()];
        !mask.is_empty() && (mask & self.shots.hits) == mask
    }

    /// Vessel cells still hidden.
    pub fn remaining_cells(&self) -> usize {
        (self.vessel_map & !self.shots.hits).count_ones()
    }

    /// True once at least one vessel is placed and none has a hidden cell.
    pub fn all_sunk(&self) -> bool {
        !self.vessel_map.is_empty() && self.remaining_cells() == 0
    }

    /// Occupancy of every vessel on the board.
    pub fn vessel_map(&self) -> BB {
        self.vessel_map
    }

    pub fn shots(&self) -> ShotGrid {
        self.shots
    }

    pub fn is_hidden(&self, at: Coord) -> bool {
        self.shots.is_hidden(at)
    }
}
