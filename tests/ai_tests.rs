use naval_arcade::{
    candidates, choose_target, place_vessel, Board, Coord, HitHistory, HuntTarget, Orientation,
    ShotGrid, ShotResult, Strategy, TargetMode, VesselId, BOARD_SIZE,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn at(x: usize, y: usize) -> Coord {
    Coord::new(x, y).unwrap()
}

fn grid_with_hits(hits: &[Coord]) -> ShotGrid {
    let mut view = ShotGrid::default();
    for h in hits {
        view.hits.set(h.x(), h.y()).unwrap();
    }
    view
}

#[test]
fn test_line_follow_on_split_column() {
    let hits = [at(3, 3), at(3, 5)];
    let view = grid_with_hits(&hits);
    let (mode, open) = candidates(&view, &hits);
    assert_eq!(mode, TargetMode::LineFollow);
    assert_eq!(open, vec![at(3, 2), at(3, 6)]);

    let mut rng = SmallRng::seed_from_u64(1);
    for _ in 0..50 {
        let (_, target) = choose_target(&view, &hits, &mut rng).unwrap();
        assert!(target == at(3, 2) || target == at(3, 6));
    }
}

#[test]
fn test_line_follow_skips_resolved_end() {
    let hits = [at(0, 4), at(1, 4)];
    let mut view = grid_with_hits(&hits);
    view.misses.set(2, 4).unwrap();
    // left end is off the board, right end already missed
    let (mode, open) = candidates(&view, &hits);
    assert_eq!(mode, TargetMode::RandomSearch);
    assert!(open.is_empty());

    view.misses = Default::default();
    let (mode, open) = candidates(&view, &hits);
    assert_eq!(mode, TargetMode::LineFollow);
    assert_eq!(open, vec![at(2, 4)]);
}

#[test]
fn test_adjacent_hunt_around_single_hit() {
    let hits = [at(0, 0)];
    let mut view = grid_with_hits(&hits);
    view.misses.set(1, 0).unwrap();
    let (mode, open) = candidates(&view, &hits);
    assert_eq!(mode, TargetMode::AdjacentHunt);
    assert_eq!(open, vec![at(0, 1)]);
}

#[test]
fn test_random_search_without_leads() {
    let view = ShotGrid::default();
    let (mode, open) = candidates(&view, &[]);
    assert_eq!(mode, TargetMode::RandomSearch);
    assert!(open.is_empty());

    let mut rng = SmallRng::seed_from_u64(7);
    let (mode, target) = choose_target(&view, &[], &mut rng).unwrap();
    assert_eq!(mode, TargetMode::RandomSearch);
    assert!(view.is_hidden(target));
}

#[test]
fn test_no_target_on_exhausted_grid() {
    let mut view = ShotGrid::default();
    view.misses = !view.misses;
    let mut rng = SmallRng::seed_from_u64(7);
    assert!(choose_target(&view, &[], &mut rng).is_none());
}

#[test]
fn test_sinking_prunes_history() {
    let cruiser = VesselId::from_name("cruiser").unwrap();
    let mut board = Board::new();
    place_vessel(&mut board, cruiser, 2, 2, Orientation::Horizontal).unwrap();

    let mut history = HitHistory::new();
    for x in 2..5 {
        let (next, result) = board.fire(at(x, 2)).unwrap();
        board = next;
        history.record(at(x, 2));
        if let ShotResult::Sunk(id) = result {
            history.prune(board.vessel_cells(id));
        }
    }
    assert!(history.is_empty());
}

#[test]
fn test_hunt_target_sinks_a_lone_vessel_without_wandering() {
    let carrier = VesselId::from_name("carrier").unwrap();
    let mut board = Board::new();
    place_vessel(&mut board, carrier, 3, 6, Orientation::Horizontal).unwrap();

    // first hit is given; from there every shot must stay on the vessel's
    // row or column until it sinks
    let (next, _) = board.fire(at(5, 6)).unwrap();
    board = next;
    let mut history = HitHistory::new();
    history.record(at(5, 6));

    let mut rng = SmallRng::seed_from_u64(99);
    let mut strategy = HuntTarget;
    while !board.is_sunk(carrier) {
        let target = strategy
            .select_target(&mut rng, &board.shots(), history.as_slice())
            .unwrap();
        assert!(target.x() == 5 || target.y() == 6, "wandered to {}", target);
        let (next, result) = board.fire(target).unwrap();
        board = next;
        match result {
            ShotResult::Hit(_) => history.record(target),
            ShotResult::Sunk(id) => {
                history.record(target);
                history.prune(board.vessel_cells(id));
            }
            ShotResult::Miss => {}
        }
    }
    assert!(history.is_empty());
    assert!(board.shots().shots_fired() <= 5 + 4);
}

proptest! {
    #[test]
    fn targets_are_always_hidden(seed in any::<u64>(), shots in prop::collection::vec((0..BOARD_SIZE, 0..BOARD_SIZE), 0..80)) {
        let mut view = ShotGrid::default();
        let mut hits = Vec::new();
        for (i, (x, y)) in shots.into_iter().enumerate() {
            if i % 3 == 0 {
                view.hits.set(x, y).unwrap();
                hits.push(at(x, y));
            } else if !view.hits.contains(x, y) {
                view.misses.set(x, y).unwrap();
            }
        }
        let mut rng = SmallRng::seed_from_u64(seed);
        if let Some((_, target)) = choose_target(&view, &hits, &mut rng) {
            prop_assert!(view.is_hidden(target));
        }
    }
}
