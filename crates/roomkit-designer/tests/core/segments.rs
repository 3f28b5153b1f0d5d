use roomkit_core::{EditError, Point};
use roomkit_designer::{DoorOrientation, Segment, SegmentKind, SegmentStore};

fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
    Segment::new(Point::new(x1, y1), Point::new(x2, y2))
}

#[test]
fn test_reversed_duplicate_is_rejected() {
    let walls = SegmentStore::new(SegmentKind::Wall)
        .with_added(seg(0.0, 0.0, 2.0, 0.0))
        .unwrap();
    assert_eq!(
        walls.with_added(seg(2.0, 0.0, 0.0, 0.0)).unwrap_err(),
        EditError::duplicate_geometry("Wall")
    );
    assert_eq!(
        walls.with_added(seg(1.0, 1.0, 1.0, 1.00001)).unwrap_err(),
        EditError::invalid_geometry("Wall")
    );
}

#[test]
fn test_sanitize_keeps_first_occurrence() {
    let first = seg(0.0, 0.0, 1.0, 0.0);
    let store = SegmentStore::from_segments(
        SegmentKind::Wall,
        vec![first.clone(), seg(1.0, 0.0, 0.0, 0.0), seg(3.0, 3.0, 3.0, 3.0)],
    )
    .sanitized();
    assert_eq!(store.to_vec(), vec![first]);
}

#[test]
fn test_nearest_at_respects_tolerance() {
    let doors = SegmentStore::from_segments(
        SegmentKind::Door,
        vec![seg(0.0, 0.0, 0.0, 2.0), seg(1.0, 0.0, 1.0, 2.0)],
    );
    let hit = doors.nearest_at(Point::new(0.7, 1.0), 0.35).unwrap();
    assert_eq!(hit.start, Point::new(1.0, 0.0));
    assert!(doors.nearest_at(Point::new(0.5, 1.0), 0.35).is_none());
}

#[test]
fn test_door_orientation() {
    assert_eq!(seg(0.0, 0.0, 2.0, 0.0).orientation(), DoorOrientation::Horizontal);
    assert_eq!(seg(0.0, 0.0, 0.0, 1.0).orientation(), DoorOrientation::Vertical);
    assert_eq!(seg(0.0, 0.0, 1.0, 1.0).orientation(), DoorOrientation::Diagonal);
}
