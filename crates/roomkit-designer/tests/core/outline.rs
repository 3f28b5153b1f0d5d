use roomkit_core::CellKey;
use roomkit_designer::{aggregate_render_blocks, compute_outline, Axis, CellSet, TextureMap};

fn cells(keys: &[(f64, f64)]) -> CellSet {
    keys.iter().map(|&(x, y)| CellKey::new(x, y)).collect()
}

#[test]
fn test_outline_of_l_shape() {
    let set = cells(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
    let outline = compute_outline(&set, 1.0);

    let horizontal = outline.iter().filter(|s| s.axis == Axis::Horizontal).count();
    let vertical = outline.iter().filter(|s| s.axis == Axis::Vertical).count();
    assert_eq!(horizontal, 3);
    assert_eq!(vertical, 3);

    let total: f64 = outline.iter().map(|s| s.length).sum();
    assert_eq!(total, 8.0);
}

#[test]
fn test_outline_of_empty_set() {
    assert!(compute_outline(&CellSet::new(), 1.0).is_empty());
}

#[test]
fn test_render_blocks_merge_full_squares() {
    let set = cells(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0), (2.0, 0.0)]);
    let blocks = aggregate_render_blocks(&set, 1.0, &TextureMap::new(), None);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks.iter().map(|b| b.size * b.size).sum::<f64>(), 5.0);
}
