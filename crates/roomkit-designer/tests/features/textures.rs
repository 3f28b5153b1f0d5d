use std::sync::Arc;

use roomkit_core::{CellKey, Point};
use roomkit_designer::InteriorEditor;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn test_erase_drops_textures() {
    let mut editor = InteriorEditor::new();
    editor.paint_rect(p(0.0, 0.0), p(3.0, 1.0)).unwrap();
    editor.select_area_at(p(0.5, 0.5)).unwrap();
    editor.apply_texture(Arc::from("data:image/png;base64,AA==")).unwrap();

    editor.erase_rect(p(0.0, 0.0), p(1.0, 1.0)).unwrap();
    assert_eq!(editor.grid().textures().len(), 2);
    assert!(editor.grid().texture(&CellKey::new(0.0, 0.0)).is_none());
}

#[test]
fn test_textures_move_with_selection() {
    let mut editor = InteriorEditor::new();
    editor.paint_rect(p(0.0, 0.0), p(2.0, 1.0)).unwrap();
    editor.select_free([CellKey::new(0.0, 0.0)]).unwrap();
    let pending = editor.begin_texture_load("image/png").unwrap();
    editor
        .finish_texture_load(pending, Ok(PNG_SIGNATURE.to_vec()))
        .unwrap();

    editor.select_area_at(p(0.5, 0.5)).unwrap();
    editor.move_selection(1.0, 0.0).unwrap();
    assert!(editor.grid().texture(&CellKey::new(1.0, 0.0)).is_some());
    assert!(editor.grid().texture(&CellKey::new(2.0, 0.0)).is_none());
    assert_eq!(editor.grid().textures().len(), 1);
    assert!(editor.selection_texture().is_some());
}

#[test]
fn test_disagreeing_textures_block_coarsening() {
    let mut editor = InteriorEditor::new();
    editor.paint_rect(p(0.0, 0.0), p(1.0, 2.0)).unwrap();
    editor.select_free([CellKey::new(0.0, 0.0)]).unwrap();
    editor.apply_texture(Arc::from("data:image/png;base64,AA==")).unwrap();
    editor.select_free([CellKey::new(0.0, 1.0)]).unwrap();
    editor.apply_texture(Arc::from("data:image/png;base64,AQ==")).unwrap();

    editor.paint_rect(p(1.0, 0.0), p(2.0, 2.0)).unwrap();
    assert_eq!(editor.unit(), 1.0);
    assert_eq!(editor.grid().len(), 4);
}

#[test]
fn test_single_texture_spreads_when_coarsening() {
    let mut editor = InteriorEditor::new();
    editor.paint_rect(p(0.0, 0.0), p(1.0, 2.0)).unwrap();
    editor.select_free([CellKey::new(0.0, 0.0)]).unwrap();
    editor.apply_texture(Arc::from("data:image/png;base64,AA==")).unwrap();

    editor.paint_rect(p(1.0, 0.0), p(2.0, 2.0)).unwrap();
    assert_eq!(editor.unit(), 2.0);
    assert_eq!(editor.grid().textures().len(), 1);
}
