use std::collections::BTreeSet;

use proptest::prelude::*;
use roomkit_core::CellKey;
use roomkit_designer::{Grid, SegmentKind, SegmentStore};

fn grid_from(unit: f64, keys: &BTreeSet<(i32, i32)>) -> Grid {
    let mut grid = Grid::new(unit);
    for &(x, y) in keys {
        grid.insert(CellKey::new(f64::from(x) * unit, f64::from(y) * unit));
    }
    grid
}

fn no_segments() -> (SegmentStore, SegmentStore) {
    (
        SegmentStore::new(SegmentKind::Wall),
        SegmentStore::new(SegmentKind::Door),
    )
}

proptest! {
    #[test]
    fn prop_refine_then_coarsen_is_identity(
        keys in proptest::collection::btree_set((-4i32..4, -4i32..4), 0..24),
    ) {
        let grid = grid_from(1.0, &keys);
        let fine = grid.refined(0.25);
        prop_assert_eq!(fine.len(), grid.len() * 16);
        prop_assert_eq!(fine.try_coarsen(1.0), Some(grid));
    }

    #[test]
    fn prop_optimize_ignores_starting_resolution(
        keys in proptest::collection::btree_set((0i32..8, 0i32..8), 1..40),
    ) {
        let (walls, doors) = no_segments();
        let grid = grid_from(1.0, &keys);
        let direct = grid.optimized(&walls, &doors).grid;
        let via_fine = grid.refined(0.125).optimized(&walls, &doors).grid;
        prop_assert_eq!(direct, via_fine);
    }
}

#[test]
fn test_flood_fill_ignores_diagonals() {
    let keys = BTreeSet::from([(0, 0), (1, 0), (2, 1), (5, 5)]);
    let grid = grid_from(1.0, &keys);

    let region = grid.connected_from(CellKey::new(0.0, 0.0));
    assert_eq!(region, vec![CellKey::new(0.0, 0.0), CellKey::new(1.0, 0.0)]);
    assert!(grid.connected_from(CellKey::new(3.0, 3.0)).is_empty());
}

#[test]
fn test_flood_fill_at_fine_unit() {
    let keys = BTreeSet::from([(0, 0), (0, 1), (0, 2)]);
    let grid = grid_from(0.5, &keys);
    assert_eq!(grid.connected_from(CellKey::new(0.0, 1.0)).len(), 3);
}

#[test]
fn test_walls_pin_the_resolution() {
    let keys = BTreeSet::from([(0, 0), (1, 0), (0, 1), (1, 1)]);
    let grid = grid_from(1.0, &keys);
    let (walls, doors) = no_segments();
    assert_eq!(grid.optimized(&walls, &doors).grid.unit(), 2.0);

    let walls = walls
        .with_added(roomkit_designer::Segment::new(
            roomkit_core::Point::new(1.0, 0.0),
            roomkit_core::Point::new(1.0, 2.0),
        ))
        .unwrap();
    let result = grid.optimized(&walls, &doors);
    assert!(!result.unit_changed);
    assert_eq!(result.grid.unit(), 1.0);
}

#[test]
fn test_find_cell_at_uses_current_unit() {
    let keys = BTreeSet::from([(1, 1)]);
    let grid = grid_from(2.0, &keys);
    assert_eq!(
        grid.find_cell_at(roomkit_core::Point::new(3.9, 2.1)),
        Some(CellKey::new(2.0, 2.0))
    );
    assert!(grid.find_cell_at(roomkit_core::Point::new(1.9, 2.1)).is_none());
}
