//! Common types: sides, board errors and shot results.

use core::fmt;

use crate::bitboard::BitBoardError;
use crate::vessel::VesselId;

/// One of the two combatants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The human at the keyboard.
    #[default]
    Player,
    /// The computer.
    Opponent,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Outcome of a single shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotResult {
    Miss,
    /// Hit a vessel that is still afloat.
    Hit(VesselId),
    /// Hit the last intact cell of a vessel.
    Sunk(VesselId),
}

impl ShotResult {
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotResult::Miss)
    }
}

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Part of the vessel would hang off the board.
    OutOfBounds,
    /// A cell is already occupied by another vessel.
    Overlaps,
    /// A cell is edge- or corner-adjacent to another vessel.
    Touching,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds => write!(f, "vessel would leave the board"),
            PlacementError::Overlaps => write!(f, "vessel overlaps another vessel"),
            PlacementError::Touching => write!(f, "vessel touches another vessel"),
        }
    }
}

/// Errors returned by board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error.
    BitBoard(BitBoardError),
    /// Coordinate outside `[0, BOARD_SIZE)`.
    OutOfBounds { x: usize, y: usize },
    /// The cell was already hit or missed.
    AlreadyShot,
    /// Tried to record a hit on a water cell.
    HitOnWater,
    /// Vessel is already seated on this board.
    VesselAlreadyPlaced,
    IllegalPlacement(PlacementError),
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoard(err)
    }
}

impl From<PlacementError> for BoardError {
    fn from(err: PlacementError) -> Self {
        BoardError::IllegalPlacement(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::BitBoard(e) => write!(f, "BitBoard error: {}", e),
            BoardError::OutOfBounds { x, y } => write!(f, "Cell ({}, {}) is off the board", x, y),
            BoardError::AlreadyShot => write!(f, "Cell was already shot"),
            BoardError::HitOnWater => write!(f, "Only vessel cells can be hit"),
            BoardError::VesselAlreadyPlaced => write!(f, "Vessel is already placed on the board"),
            BoardError::IllegalPlacement(e) => write!(f, "Illegal placement: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
