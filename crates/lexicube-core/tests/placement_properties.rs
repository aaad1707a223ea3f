//! Property tests for the placement engine.
//!
//! Invariants covered:
//! - Projecting a tile and projecting it back recovers its local position and
//!   depth, for every side and word direction.
//! - The shape check accepts exactly the aligned, non-overlapping moves.
//! - Lane scans are repeatable and keep the tile nearest to the viewer.
//! - Assembled words are never shorter than the move, and every new tile
//!   lands where the player put it.

use lexicube_core::assembler::assemble;
use lexicube_core::config::BOARD_SIZE;
use lexicube_core::projection::{project, unproject};
use lexicube_core::shape::validate_shape;
use lexicube_core::*;
use proptest::prelude::*;

fn rotation() -> impl Strategy<Value = Rotation> {
    prop::sample::select(Rotation::ALL.to_vec())
}

fn straight_axis() -> impl Strategy<Value = StraightAxis> {
    prop::sample::select(vec![StraightAxis::Row, StraightAxis::Column])
}

fn coord() -> impl Strategy<Value = i32> {
    0..BOARD_SIZE
}

fn letter() -> impl Strategy<Value = char> {
    prop::char::range('A', 'Z')
}

fn placed_tile() -> impl Strategy<Value = PlacedTile> {
    (letter(), coord(), coord(), coord()).prop_map(|(v, x, y, z)| PlacedTile::new(v, x, y, z))
}

/// Tiles along one row at distinct columns
fn row_move() -> impl Strategy<Value = Vec<SubmittedTile>> {
    (
        coord(),
        prop::collection::btree_set(coord(), 1..8),
        prop::collection::vec(letter(), 8),
    )
        .prop_map(|(row, cols, letters)| {
            cols.into_iter()
                .zip(letters)
                .enumerate()
                .map(|(i, (col, v))| {
                    SubmittedTile::new(v.to_string(), format!("char-{}{}", v, i), row, col)
                })
                .collect()
        })
}

fn letters_of(tiles: &[SubmittedTile]) -> Vec<char> {
    tiles.iter().filter_map(|t| t.value.chars().next()).collect()
}

proptest! {
    #[test]
    fn projection_round_trips(
        rotation in rotation(),
        straight in straight_axis(),
        row in coord(),
        col in coord(),
        depth in coord(),
    ) {
        let pos = LocalPos::new(row, col);
        let world = project(pos, rotation, straight, depth);

        prop_assert!((0..BOARD_SIZE).contains(&world.x));
        prop_assert!((0..BOARD_SIZE).contains(&world.y));
        prop_assert!((0..BOARD_SIZE).contains(&world.z));
        prop_assert_eq!(unproject(world, rotation), (pos, depth));
    }

    #[test]
    fn aligned_moves_pass_shape_check(tiles in row_move()) {
        prop_assert!(validate_shape(&tiles).is_ok());

        // the same move turned on its side runs down a column
        let turned: Vec<_> = tiles
            .iter()
            .map(|t| {
                let (row, col) = (t.position.col, t.position.row);
                SubmittedTile::new(t.value.clone(), t.reference.clone(), row, col)
            })
            .collect();
        prop_assert!(validate_shape(&turned).is_ok());
    }

    #[test]
    fn overlapping_moves_fail_shape_check(tiles in row_move()) {
        let mut overlapping = tiles.clone();
        overlapping.push(tiles[0].clone());
        prop_assert!(
            matches!(
                validate_shape(&overlapping),
                Err(PlacementError::MisalignedOrOverlapping { .. })
            ),
            "overlapping move accepted"
        );
    }

    #[test]
    fn misaligned_moves_fail_shape_check(
        tiles in row_move().prop_filter("two or more tiles", |t| t.len() > 1),
    ) {
        let mut misaligned = tiles.clone();
        let off_row = (misaligned[0].position.row + 1) % BOARD_SIZE;
        misaligned[0].position.row = off_row;
        prop_assert!(
            matches!(
                validate_shape(&misaligned),
                Err(PlacementError::MisalignedOrOverlapping { .. })
            ),
            "misaligned move accepted"
        );
    }

    #[test]
    fn lane_scan_keeps_nearest_tile(
        board in prop::collection::vec(placed_tile(), 0..60),
        rotation in rotation(),
        straight in straight_axis(),
        lane_number in coord(),
    ) {
        let positions = match straight {
            StraightAxis::Row => {
                vec![LocalPos::new(lane_number, 0), LocalPos::new(lane_number, 1)]
            }
            StraightAxis::Column => {
                vec![LocalPos::new(0, lane_number), LocalPos::new(1, lane_number)]
            }
        };
        let axes = AxisResolution::resolve(rotation, &positions).unwrap();
        let lane = Lane::scan(&axes, &board);

        prop_assert_eq!(&lane, &Lane::scan(&axes, &board));

        for changing in 0..BOARD_SIZE {
            let depths: Vec<i32> = board
                .iter()
                .map(|t| axes.locate(t))
                .filter(|c| c.lane == lane_number && c.changing == changing)
                .map(|c| c.depth)
                .collect();

            let expected = if rotation.views_from_high_side() {
                depths.iter().copied().max()
            } else {
                depths.iter().copied().min()
            };
            prop_assert_eq!(lane.depth_at(changing), expected);
        }
    }

    #[test]
    fn assembled_word_covers_every_tile(
        tiles in row_move(),
        cells in prop::collection::vec((coord(), letter(), coord()), 0..10),
        rotation in rotation(),
    ) {
        let positions: Vec<LocalPos> = tiles.iter().map(|t| t.position).collect();
        let axes = AxisResolution::resolve(rotation, &positions).unwrap();
        let lane = Lane::from_cells(cells);

        if let Ok(resolved) = assemble(&axes, &tiles, &letters_of(&tiles), &lane) {
            let word_len = resolved.word.chars().count();
            prop_assert!(word_len >= tiles.len());
            prop_assert!(word_len <= tiles.len() + lane.letters().len());
            prop_assert_eq!(resolved.placements.len(), tiles.len());

            for placed in &resolved.placements {
                let (pos, _) = unproject(placed.position(), rotation);
                prop_assert!(tiles
                    .iter()
                    .any(|t| t.position == pos && t.value.starts_with(placed.value)));
            }
        }
    }

    #[test]
    fn moves_without_neighbours_are_disconnected(
        tiles in row_move(),
        rotation in rotation(),
        depth in coord(),
    ) {
        let positions: Vec<LocalPos> = tiles.iter().map(|t| t.position).collect();
        let axes = AxisResolution::resolve(rotation, &positions).unwrap();

        let cols: Vec<i32> = positions.iter().map(|p| p.col).collect();
        let (first, last) = (cols[0], cols[cols.len() - 1]);
        let contiguous = (last - first) as usize + 1 == cols.len();
        // an existing tile far from the move, if there is room for one
        let far = (0..BOARD_SIZE).find(|c| *c < first - 1 || *c > last + 1);

        if let (true, Some(far)) = (contiguous, far) {
            let lane = Lane::from_cells([(far, 'X', depth)]);
            prop_assert_eq!(
                assemble(&axes, &tiles, &letters_of(&tiles), &lane),
                Err(PlacementError::DisconnectedPlacement)
            );
        }
    }
}
