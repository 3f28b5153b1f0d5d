use roomkit_core::{CellKey, Point};
use roomkit_designer::{InteriorEditor, KeyInput};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn test_copy_then_paste_twice() {
    let mut editor = InteriorEditor::new();
    editor.paint_rect(p(0.0, 0.0), p(1.0, 1.0)).unwrap();
    editor.select_area_at(p(0.5, 0.5)).unwrap();
    editor.copy_selection().unwrap();
    let payload = editor.clipboard().cloned().unwrap();

    editor.paste_at(p(10.0, 10.0)).unwrap();
    assert!(editor.grid().contains(&CellKey::new(0.0, 0.0)));
    assert!(editor.grid().contains(&CellKey::new(10.0, 10.0)));

    editor.paste_at(p(12.0, 10.0)).unwrap();
    assert_eq!(editor.clipboard(), Some(&payload));
    assert_eq!(editor.grid().len(), 3);
}

#[test]
fn test_paste_defaults_to_view_center() {
    let mut editor = InteriorEditor::new();
    editor.paint_rect(p(0.0, 0.0), p(2.0, 1.0)).unwrap();
    editor.select_area_at(p(0.5, 0.5)).unwrap();
    editor.copy_selection().unwrap();

    editor.viewport_mut().center_on(p(20.3, 20.2));
    assert_eq!(editor.paste_target(), Some(p(19.0, 20.0)));
    editor.paste().unwrap();
    assert!(editor.grid().contains(&CellKey::new(19.0, 20.0)));
    assert!(editor.grid().contains(&CellKey::new(20.0, 20.0)));
}

#[test]
fn test_keyboard_cut_and_paste() {
    let mut editor = InteriorEditor::new();
    editor.paint_rect(p(0.0, 0.0), p(1.0, 1.0)).unwrap();
    editor.select_area_at(p(0.5, 0.5)).unwrap();

    editor.handle_key(&KeyInput::new("x").ctrl());
    assert!(editor.grid().is_empty());
    assert!(editor.can_paste());

    editor.handle_key(&KeyInput::new("v").meta());
    assert_eq!(editor.grid().len(), 1);
}
