use naval_arcade::{generate_fleet, Board, BoardError, Coord, ShotResult, Visibility, BOARD_SIZE};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn visibility(board: &Board) -> Vec<Visibility> {
    (0..BOARD_SIZE)
        .flat_map(|y| (0..BOARD_SIZE).map(move |x| (x, y)))
        .map(|(x, y)| board.cell_at(x, y).unwrap().visibility)
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn visibility_only_moves_away_from_hidden(
        seed in any::<u64>(),
        shots in prop::collection::vec((0..BOARD_SIZE, 0..BOARD_SIZE), 1..150),
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = generate_fleet(&mut rng);
        let terrain = board.vessel_map();
        for (x, y) in shots {
            let at = Coord::new(x, y).unwrap();
            let before = visibility(&board);
            match board.fire(at) {
                Ok((next, result)) => {
                    let after = visibility(&next);
                    for (old, new) in before.iter().zip(after.iter()) {
                        if *old != Visibility::Hidden {
                            prop_assert_eq!(old, new);
                        }
                    }
                    let expected = if result == ShotResult::Miss { Visibility::Miss } else { Visibility::Hit };
                    prop_assert_eq!(next.cell(at).visibility, expected);
                    board = next;
                }
                Err(err) => {
                    prop_assert_eq!(err, BoardError::AlreadyShot);
                    prop_assert_ne!(board.cell(at).visibility, Visibility::Hidden);
                }
            }
            prop_assert_eq!(board.vessel_map(), terrain);
        }
    }

    #[test]
    fn hits_land_only_on_vessels(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = generate_fleet(&mut rng);
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let at = Coord::new(x, y).unwrap();
                let (next, result) = board.fire(at).unwrap();
                prop_assert_eq!(result.is_hit(), board.vessel_at(at).is_some());
                board = next;
            }
        }
        prop_assert!(board.all_sunk());
        prop_assert_eq!(board.shots().hidden().count_ones(), 0);
    }
}
