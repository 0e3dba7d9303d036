use naval_arcade::{
    place_vessel, Board, BoardError, Coord, Orientation, ShotResult, Terrain, VesselId,
    Visibility, BOARD_SIZE,
};

fn destroyer() -> VesselId {
    VesselId::from_name("destroyer").unwrap()
}

fn at(x: usize, y: usize) -> Coord {
    Coord::new(x, y).unwrap()
}

#[test]
fn test_cell_at_out_of_bounds() {
    let board = Board::new();
    assert_eq!(
        board.cell_at(BOARD_SIZE, 0).unwrap_err(),
        BoardError::OutOfBounds { x: BOARD_SIZE, y: 0 }
    );
    assert!(board.cell_at(0, BOARD_SIZE).is_err());
    let cell = board.cell_at(9, 9).unwrap();
    assert_eq!(cell.terrain, Terrain::Water);
    assert_eq!(cell.visibility, Visibility::Hidden);
}

#[test]
fn test_fire_until_sunk() {
    let mut board = Board::new();
    place_vessel(&mut board, destroyer(), 4, 4, Orientation::Vertical).unwrap();

    let (board, first) = board.fire(at(4, 4)).unwrap();
    assert_eq!(first, ShotResult::Hit(destroyer()));
    assert!(!board.is_sunk(destroyer()));

    let (board, miss) = board.fire(at(5, 5)).unwrap();
    assert_eq!(miss, ShotResult::Miss);

    let (board, last) = board.fire(at(4, 5)).unwrap();
    assert_eq!(last, ShotResult::Sunk(destroyer()));
    assert!(board.all_sunk());
    assert_eq!(board.remaining_cells(), 0);
    assert_eq!(board.shots().shots_fired(), 3);
}

#[test]
fn test_repeat_shot_rejected() {
    let mut board = Board::new();
    place_vessel(&mut board, destroyer(), 0, 0, Orientation::Horizontal).unwrap();
    let (board, _) = board.fire(at(0, 0)).unwrap();
    assert_eq!(board.fire(at(0, 0)).unwrap_err(), BoardError::AlreadyShot);
    let (board, _) = board.fire(at(5, 5)).unwrap();
    assert_eq!(board.mark_shot(5, 5, false).unwrap_err(), BoardError::AlreadyShot);
}

#[test]
fn test_mark_hit_on_water_rejected() {
    let board = Board::new();
    assert_eq!(board.mark_shot(3, 3, true).unwrap_err(), BoardError::HitOnWater);
    let marked = board.mark_shot(3, 3, false).unwrap();
    assert_eq!(marked.cell(at(3, 3)).visibility, Visibility::Miss);
    // the source board is untouched
    assert_eq!(board.cell(at(3, 3)).visibility, Visibility::Hidden);
}

#[test]
fn test_clear_vessel_restores_water() {
    let mut board = Board::new();
    place_vessel(&mut board, destroyer(), 2, 2, Orientation::Horizontal).unwrap();
    assert_eq!(board.vessel_at(at(3, 2)), Some(destroyer()));

    let footprint = board.clear_vessel(destroyer());
    assert_eq!(footprint.count_ones(), 2);
    assert!(!board.is_placed(destroyer()));
    assert!(board.vessel_map().is_empty());
    assert_eq!(board.cell(at(3, 2)).terrain, Terrain::Water);

    // seat it again somewhere else
    place_vessel(&mut board, destroyer(), 7, 7, Orientation::Vertical).unwrap();
    assert_eq!(board.vessel_map().count_ones(), 2);
}

#[test]
fn test_double_placement_rejected() {
    let mut board = Board::new();
    place_vessel(&mut board, destroyer(), 0, 0, Orientation::Horizontal).unwrap();
    assert_eq!(
        place_vessel(&mut board, destroyer(), 5, 5, Orientation::Horizontal).unwrap_err(),
        BoardError::VesselAlreadyPlaced
    );
}

#[test]
fn test_empty_board_is_not_sunk() {
    assert!(!Board::new().all_sunk());
}
