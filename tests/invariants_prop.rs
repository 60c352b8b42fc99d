//! Property tests over random seeds and command sequences.
//!
//! Invariants covered:
//! - Every 7 consecutive draws from one bag are a permutation of the shapes.
//! - `placed` implies `occupied`; the active piece is projected exactly.
//! - The active piece never overlaps a locked cell and never leaves the grid.
//! - A rejected rotation or move leaves the piece untouched.
//! - A hard drop adds four locked cells minus one row per cleared line.
//! - Ticks are enabled between commands.

use proptest::prelude::*;

use blockfall::core::{BagRandomizer, GameState};
use blockfall::types::{GameAction, Shape};

fn assert_grid_consistent(game: &GameState) {
    let board = game.board();
    for cell in board.cells() {
        assert!(!cell.placed || cell.occupied);
        assert!(!(cell.placed && cell.current));
    }

    let current = board.cells().iter().filter(|c| c.current).count();
    match game.active_cells() {
        Some(cells) => {
            assert_eq!(current, 4);
            for (row, col) in cells {
                let cell = board.get(row, col).expect("active piece inside grid");
                assert!(cell.current && !cell.placed, "({row}, {col})");
            }
        }
        None => assert_eq!(current, 0),
    }
}

fn action_strategy() -> impl Strategy<Value = Option<GameAction>> {
    prop_oneof![
        Just(None),
        Just(Some(GameAction::MoveLeft)),
        Just(Some(GameAction::MoveRight)),
        Just(Some(GameAction::SoftDrop)),
        Just(Some(GameAction::HardDrop)),
        Just(Some(GameAction::RotateCw)),
        Just(Some(GameAction::RotateCcw)),
        Just(Some(GameAction::Rotate180)),
    ]
}

proptest! {
    #[test]
    fn bags_are_permutations(seed in any::<u32>()) {
        let mut bags = BagRandomizer::new(seed);
        for _ in 0..10 {
            let drawn: Vec<Shape> = (0..7).map(|_| bags.draw()).collect();
            for shape in Shape::ALL {
                prop_assert_eq!(drawn.iter().filter(|&&s| s == shape).count(), 1);
            }
        }
    }

    #[test]
    fn random_play_keeps_grid_invariants(
        seed in any::<u32>(),
        // `None` is a gravity tick.
        actions in prop::collection::vec(action_strategy(), 1..200),
    ) {
        let mut game = GameState::new(seed);
        assert_grid_consistent(&game);

        for action in actions {
            let before = game.active();
            let placed_before = game.board().cells().iter().filter(|c| c.placed).count();
            let lines_before = game.lines();

            let changed = match action {
                None => game.tick(),
                Some(action) => game.apply_action(action),
            };

            if !changed {
                prop_assert_eq!(game.active(), before);
            }
            if action == Some(GameAction::HardDrop) && changed {
                let cleared = (game.lines() - lines_before) as usize;
                let placed_after = game.board().cells().iter().filter(|c| c.placed).count();
                prop_assert_eq!(placed_after + cleared * 10, placed_before + 4);
            } else {
                prop_assert_eq!(game.lines(), lines_before);
            }

            prop_assert!(game.ticks_enabled());
            prop_assert!(game.lines() >= lines_before);
            assert_grid_consistent(&game);

            if game.game_over() {
                prop_assert!(game.active().is_none());
                break;
            }
        }
    }

    #[test]
    fn o_rotation_never_moves_cells(seed in any::<u32>(), turns in 1usize..12) {
        let mut game = GameState::new(seed);
        prop_assert!(game.spawn_shape(Shape::O));
        let cells = game.active_cells();

        for i in 0..turns {
            let action = [GameAction::RotateCw, GameAction::RotateCcw, GameAction::Rotate180][i % 3];
            prop_assert!(game.apply_action(action));
            prop_assert_eq!(game.active_cells(), cells);
        }
    }
}
