use roomkit_core::Point;
use roomkit_designer::{EditorSnapshot, InteriorEditor};

#[test]
fn test_snapshot_json_layout() {
    let mut editor = InteriorEditor::new();
    editor
        .paint_rect(Point::new(0.0, 0.0), Point::new(2.0, 1.0))
        .unwrap();
    editor
        .add_door(Point::new(1.0, 0.0), Point::new(1.0, 1.0))
        .unwrap();

    let json = editor.snapshot().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["cellUnit"], 1.0);
    assert_eq!(value["snapDenominator"], 1);
    assert_eq!(value["cells"], serde_json::json!(["0,0", "1,0"]));
    assert_eq!(value["doors"][0]["start"]["x"], 1.0);
    assert!(value["walls"].as_array().unwrap().is_empty());

    let restored = EditorSnapshot::from_json(&json).unwrap();
    let mut other = InteriorEditor::new();
    other.restore(restored).unwrap();
    assert_eq!(other.state(), editor.state());
    assert!(!other.can_undo());
}

#[test]
fn test_restore_rejects_bad_unit() {
    let json = r#"{ "cellUnit": 3, "snapDenominator": 1, "cells": [] }"#;
    let snapshot = EditorSnapshot::from_json(json).unwrap();
    let mut editor = InteriorEditor::new();
    assert!(editor.restore(snapshot).is_err());
    assert_eq!(editor.history_len(), 1);
}

#[test]
fn test_restore_drops_orphan_textures() {
    let json = r#"{
        "cellUnit": 1,
        "snapDenominator": 1,
        "cells": ["0,0"],
        "cellTextures": { "0,0": "data:a", "4,4": "data:b" }
    }"#;
    let mut editor = InteriorEditor::new();
    editor
        .restore(EditorSnapshot::from_json(json).unwrap())
        .unwrap();
    assert_eq!(editor.grid().textures().len(), 1);
}
