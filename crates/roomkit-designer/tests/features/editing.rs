use roomkit_core::{CellKey, Point, SnapFraction};
use roomkit_designer::{InteriorEditor, SelectionKind};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn test_paint_two_by_two_coarsens() {
    let mut editor = InteriorEditor::new();
    editor.paint_rect(p(0.0, 0.0), p(2.0, 2.0)).unwrap();

    let snapshot = editor.snapshot();
    assert_eq!(snapshot.cell_unit, 2.0);
    assert_eq!(snapshot.cells, vec![CellKey::new(0.0, 0.0)]);
    assert_eq!(snapshot.cells[0].to_string(), "0,0");
}

#[test]
fn test_reversed_door_is_rejected() {
    let mut editor = InteriorEditor::new();
    editor.add_door(p(1.0, 0.0), p(1.0, 1.0)).unwrap();
    assert!(editor.add_door(p(1.0, 1.0), p(1.0, 0.0)).is_err());
    assert_eq!(editor.doors().len(), 1);
    assert_eq!(editor.history_len(), 2);
}

#[test]
fn test_undo_redo_round_trip() {
    let mut editor = InteriorEditor::new();
    let mut states = vec![editor.state().clone()];
    editor.paint_rect(p(0.0, 0.0), p(3.0, 1.0)).unwrap();
    states.push(editor.state().clone());
    editor.add_wall(p(0.0, 0.0), p(3.0, 0.0)).unwrap();
    states.push(editor.state().clone());
    editor.erase_rect(p(1.0, 0.0), p(2.0, 1.0)).unwrap();
    states.push(editor.state().clone());

    for expected in states.iter().rev().skip(1) {
        editor.undo().unwrap();
        assert_eq!(editor.state(), expected);
    }
    assert!(!editor.can_undo());

    for expected in states.iter().skip(1) {
        editor.redo().unwrap();
        assert_eq!(editor.state(), expected);
    }
    assert!(!editor.can_redo());
}

#[test]
fn test_commit_after_undo_drops_redo_tail() {
    let mut editor = InteriorEditor::new();
    editor.paint_rect(p(0.0, 0.0), p(1.0, 1.0)).unwrap();
    editor.paint_rect(p(5.0, 0.0), p(6.0, 1.0)).unwrap();
    editor.undo().unwrap();
    editor.add_wall(p(0.0, 0.0), p(1.0, 0.0)).unwrap();

    assert!(!editor.can_redo());
    assert_eq!(editor.history_len(), 3);
    assert_eq!(editor.grid().len(), 1);
}

#[test]
fn test_zero_offset_move_keeps_history() {
    let mut editor = InteriorEditor::new();
    editor.paint_rect(p(0.0, 0.0), p(2.0, 1.0)).unwrap();
    editor.select_area_at(p(0.5, 0.5)).unwrap();
    let before = (editor.state().clone(), editor.history_len());

    assert_eq!(editor.move_selection(0.0, 0.0), Ok(false));
    assert_eq!((editor.state().clone(), editor.history_len()), before);
}

#[test]
fn test_move_carries_doors_but_not_outside_walls() {
    let mut editor = InteriorEditor::new();
    editor.paint_rect(p(0.0, 0.0), p(2.0, 1.0)).unwrap();
    editor.add_door(p(1.0, 0.0), p(1.0, 1.0)).unwrap();
    editor.add_wall(p(5.0, 5.0), p(6.0, 5.0)).unwrap();
    editor.select_area_at(p(0.5, 0.5)).unwrap();

    editor.move_selection(0.0, 3.0).unwrap();
    let door = editor.doors().iter().next().cloned().unwrap();
    assert_eq!(door.start, p(1.0, 3.0));
    let wall = editor.walls().iter().next().cloned().unwrap();
    assert_eq!(wall.start, p(5.0, 5.0));
}

#[test]
fn test_history_is_bounded() {
    let config = roomkit_settings::EditorConfig {
        history_depth: 3,
        ..Default::default()
    };
    let mut editor = InteriorEditor::with_config(config).unwrap();
    for i in 0..5 {
        let x = f64::from(i) * 2.0;
        editor.paint_rect(p(x, 0.0), p(x + 1.0, 1.0)).unwrap();
    }
    assert_eq!(editor.history_len(), 3);
    editor.undo().unwrap();
    editor.undo().unwrap();
    assert!(editor.undo().is_err());
    assert_eq!(editor.grid().len(), 3);
}

#[test]
fn test_fine_snap_survives_undo() {
    let mut editor = InteriorEditor::new();
    editor.paint_rect(p(0.0, 0.0), p(1.0, 1.0)).unwrap();
    editor.set_snap(SnapFraction::Quarter);
    editor.paint_rect(p(1.0, 0.0), p(1.25, 0.25)).unwrap();
    assert_eq!(editor.unit(), 0.25);

    editor.undo().unwrap();
    assert_eq!(editor.unit(), 0.25);
    assert_eq!(editor.grid().len(), 16);
}

#[test]
fn test_delete_area_removes_captured_segments() {
    let mut editor = InteriorEditor::new();
    editor.paint_rect(p(0.0, 0.0), p(2.0, 1.0)).unwrap();
    editor.add_wall(p(0.0, 1.0), p(2.0, 1.0)).unwrap();
    editor.select_at(p(0.5, 0.5));
    assert_eq!(editor.selection().kind(), SelectionKind::Area);

    assert_eq!(editor.delete_selection(), Ok(3));
    assert!(editor.grid().is_empty());
    assert!(editor.walls().is_empty());
    assert_eq!(editor.status().text, "Selection removed.");
}
