use roomkit_core::{
    distance_point_to_segment, is_multiple_of_unit, snap_denominator_for_unit, unit_factor,
    Bounds, Point, CELL_UNIT_OPTIONS,
};

#[test]
fn test_unit_table_is_descending_powers_of_two() {
    for pair in CELL_UNIT_OPTIONS.windows(2) {
        assert_eq!(unit_factor(pair[0], pair[1]), Some(2));
    }
}

#[test]
fn test_every_unit_tracks_a_snap_denominator() {
    for unit in CELL_UNIT_OPTIONS {
        let den = snap_denominator_for_unit(unit, 1);
        assert!(den >= 1);
        if unit <= 1.0 {
            assert!(is_multiple_of_unit(1.0 / den as f64, unit));
        }
    }
}

#[test]
fn test_point_distance_along_diagonal() {
    let d = distance_point_to_segment(
        Point::new(0.0, 1.0),
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
    );
    assert!((d - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
}

#[test]
fn test_bounds_of_fine_cells() {
    let b = Bounds::from_cell_origins([Point::new(0.5, 0.5), Point::new(1.0, 0.5)], 0.5);
    assert_eq!(b.origin(), Point::new(0.5, 0.5));
    assert_eq!(b.width, 1.0);
    assert_eq!(b.height, 0.5);
}
