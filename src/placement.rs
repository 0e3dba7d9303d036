//! Placement validation and random fleet generation.
//!
//! Vessels may not overlap and may not touch one another, not even at a
//! corner. The same rule gates manual placement and the random generator.

use alloc::vec::Vec;
use rand::Rng;

use crate::board::{coords, Board, BB};
use crate::common::{BoardError, PlacementError};
use crate::config::BOARD_SIZE;
use crate::vessel::{Orientation, VesselId};

/// Cells a vessel of `length` would cover from `(x, y)`.
pub fn footprint(
    x: usize,
    y: usize,
    length: usize,
    orientation: Orientation,
) -> Result<BB, PlacementError> {
    let fits = match orientation {
        Orientation::Horizontal => {
            x.checked_add(length).is_some_and(|end| end <= BOARD_SIZE) && y < BOARD_SIZE
        }
        Orientation::Vertical => {
            y.checked_add(length).is_some_and(|end| end <= BOARD_SIZE) && x < BOARD_SIZE
        }
    };
    if !fits || length == 0 {
        return Err(PlacementError::OutOfBounds);
    }
    let cells = (0..length).map(|i| match orientation {
        Orientation::Horizontal => (x + i, y),
        Orientation::Vertical => (x, y + i),
    });
    BB::from_cells(cells).map_err(|_| PlacementError::OutOfBounds)
}

/// Validates a placement and returns its footprint.
pub fn check_placement(
    board: &Board,
    x: usize,
    y: usize,
    length: usize,
    orientation: Orientation,
) -> Result<BB, PlacementError> {
    let mask = footprint(x, y, length, orientation)?;
    let occupied = board.vessel_map();
    if !(mask & occupied).is_empty() {
        return Err(PlacementError::Overlaps);
    }
    if !(mask.halo() & occupied).is_empty() {
        return Err(PlacementError::Touching);
    }
    Ok(mask)
}

/// In bounds, and neither the cells nor any of their eight neighbours hold a
/// vessel.
pub fn is_legal_placement(
    board: &Board,
    x: usize,
    y: usize,
    length: usize,
    orientation: Orientation,
) -> bool {
    check_placement(board, x, y, length, orientation).is_ok()
}

/// A validated spot for one vessel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: usize,
    pub y: usize,
    pub orientation: Orientation,
    pub cells: BB,
}

/// Validates then seats `id` on `board`.
pub fn place_vessel(
    board: &mut Board,
    id: VesselId,
    x: usize,
    y: usize,
    orientation: Orientation,
) -> Result<(), BoardError> {
    if board.is_placed(id) {
        return Err(BoardError::VesselAlreadyPlaced);
    }
    let mask = check_placement(board, x, y, id.kind().length(), orientation)?;
    board.set_vessel(coords(mask), id)
}

/// Samples uniformly random origins and orientations until a vessel of
/// `length` fits. There is no retry cap: the standard fleet never covers
/// enough of the grid to leave no legal spot.
pub fn random_placement<R: Rng + ?Sized>(board: &Board, rng: &mut R, length: usize) -> Placement {
    loop {
        let x = rng.random_range(0..BOARD_SIZE);
        let y = rng.random_range(0..BOARD_SIZE);
        let orientation = if rng.random_bool(0.5) {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        if let Ok(cells) = check_placement(board, x, y, length, orientation) {
            return Placement {
                x,
                y,
                orientation,
                cells,
            };
        }
    }
}

/// Seats every vessel not yet on `board`, longest first. Returns the ids it
/// placed.
pub fn place_remaining<R: Rng + ?Sized>(
    board: &mut Board,
    rng: &mut R,
) -> Result<Vec<VesselId>, BoardError> {
    let missing: Vec<VesselId> = VesselId::all().filter(|id| !board.is_placed(*id)).collect();
    let mut placed = Vec::with_capacity(missing.len());
    for id in missing {
        let spot = random_placement(board, rng, id.kind().length());
        board.set_vessel(coords(spot.cells), id)?;
        placed.push(id);
    }
    Ok(placed)
}

/// A fully deployed board with the whole fleet at random legal positions.
pub fn generate_fleet<R: Rng + ?Sized>(rng: &mut R) -> Board {
    let mut board = Board::new();
    for id in VesselId::all() {
        let spot = random_placement(&board, rng, id.kind().length());
        let seated = board.set_vessel(coords(spot.cells), id);
        debug_assert!(seated.is_ok(), "validated placement refused: {:?}", seated);
    }
    board
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footprint_rejects_overhang() {
        assert_eq!(
            footprint(8, 0, 3, Orientation::Horizontal),
            Err(PlacementError::OutOfBounds)
        );
        assert!(footprint(7, 0, 3, Orientation::Horizontal).is_ok());
        assert_eq!(
            footprint(0, 9, 2, Orientation::Vertical),
            Err(PlacementError::OutOfBounds)
        );
    }

    #[test]
    fn huge_origin_is_illegal_not_a_panic() {
        let board = Board::new();
        assert!(!is_legal_placement(&board, usize::MAX, 0, 2, Orientation::Horizontal));
        assert!(!is_legal_placement(&board, 0, usize::MAX, 2, Orientation::Vertical));
        assert_eq!(
            footprint(usize::MAX - 1, 0, 5, Orientation::Horizontal),
            Err(PlacementError::OutOfBounds)
        );
    }

    #[test]
    fn place_remaining_fills_gaps_only() {
        let mut rng = <rand::rngs::SmallRng as rand::SeedableRng>::seed_from_u64(3);
        let mut board = Board::new();
        let carrier = VesselId::new(0).unwrap();
        place_vessel(&mut board, carrier, 0, 0, Orientation::Horizontal).unwrap();
        let placed = place_remaining(&mut board, &mut rng).unwrap();
        assert!(!placed.contains(&carrier));
        assert_eq!(placed.len(), crate::config::NUM_VESSELS - 1);
        assert!(VesselId::all().all(|id| board.is_placed(id)));
    }

    #[test]
    fn diagonal_contact_is_touching() {
        let mut board = Board::new();
        place_vessel(&mut board, VesselId::new(4).unwrap(), 2, 2, Orientation::Horizontal).unwrap();
        assert_eq!(
            check_placement(&board, 4, 3, 3, Orientation::Vertical),
            Err(PlacementError::Touching)
        );
        assert_eq!(
            check_placement(&board, 3, 0, 3, Orientation::Vertical),
            Err(PlacementError::Overlaps)
        );
        assert!(is_legal_placement(&board, 5, 2, 3, Orientation::Vertical));
    }
}
