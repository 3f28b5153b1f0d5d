//! Derived display geometry.
//!
//! Both views are recomputed from the grid on demand and never write back:
//!
//! - [`compute_outline`]: boundary edges of the occupied region, merged into
//!   maximal collinear runs.
//! - [`aggregate_render_blocks`]: the occupied cells grouped into as few
//!   uniform squares as possible.

use std::collections::BTreeSet;
use std::fmt;

use roomkit_core::{normalize_coord, CellKey, CELL_UNIT_OPTIONS, OFFSET_EPSILON};
use serde::{Deserialize, Serialize};

use crate::grid::{CellSet, TextureMap};
use crate::texture::TextureRef;

/// Axis of an outline segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Axis-aligned boundary run starting at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlineSegment {
    pub axis: Axis,
    pub x: f64,
    pub y: f64,
    pub length: f64,
}

impl OutlineSegment {
    fn new(axis: Axis, x: f64, y: f64, length: f64) -> Self {
        Self {
            axis,
            x: normalize_coord(x),
            y: normalize_coord(y),
            length: normalize_coord(length),
        }
    }

    /// Far end of the run.
    pub fn end(&self) -> (f64, f64) {
        match self.axis {
            Axis::Horizontal => (self.x + self.length, self.y),
            Axis::Vertical => (self.x, self.y + self.length),
        }
    }
}

/// Boundary edges of `cells`, merged into maximal runs.
///
/// Horizontal runs come first, ordered by `y` then `x`; vertical runs follow,
/// ordered by `x` then `y`.
pub fn compute_outline(cells: &CellSet, unit: f64) -> Vec<OutlineSegment> {
    if cells.is_empty() {
        return Vec::new();
    }

    let mut raw = Vec::new();
    for key in cells.iter() {
        let (x, y) = (key.x(), key.y());
        if !cells.contains(&key.offset(0.0, unit)) {
            raw.push(OutlineSegment::new(Axis::Horizontal, x, y + unit, unit));
        }
        if !cells.contains(&key.offset(0.0, -unit)) {
            raw.push(OutlineSegment::new(Axis::Horizontal, x, y, unit));
        }
        if !cells.contains(&key.offset(-unit, 0.0)) {
            raw.push(OutlineSegment::new(Axis::Vertical, x, y, unit));
        }
        if !cells.contains(&key.offset(unit, 0.0)) {
            raw.push(OutlineSegment::new(Axis::Vertical, x + unit, y, unit));
        }
    }

    merge_segments(raw)
}

/// Merges touching or overlapping collinear runs.
pub fn merge_segments(segments: Vec<OutlineSegment>) -> Vec<OutlineSegment> {
    let (mut horizontal, mut vertical): (Vec<_>, Vec<_>) = segments
        .into_iter()
        .partition(|s| s.axis == Axis::Horizontal);

    // (perpendicular, parallel) coordinates of a run
    let horizontal_coords = |s: &OutlineSegment| (s.y, s.x);
    let vertical_coords = |s: &OutlineSegment| (s.x, s.y);

    let mut merged = Vec::new();
    merge_axis(&mut horizontal, horizontal_coords, &mut merged);
    merge_axis(&mut vertical, vertical_coords, &mut merged);
    merged
}

fn merge_axis<F>(runs: &mut [OutlineSegment], coords: F, out: &mut Vec<OutlineSegment>)
where
    F: Fn(&OutlineSegment) -> (f64, f64),
{
    runs.sort_by(|a, b| {
        let (pa, sa) = coords(a);
        let (pb, sb) = coords(b);
        if (pa - pb).abs() > OFFSET_EPSILON {
            pa.total_cmp(&pb)
        } else {
            sa.total_cmp(&sb)
        }
    });

    let mut current: Option<OutlineSegment> = None;
    for run in runs.iter() {
        current = match current {
            None => Some(*run),
            Some(mut cur) => {
                let (pc, sc) = coords(&cur);
                let (pr, sr) = coords(run);
                if (pr - pc).abs() <= OFFSET_EPSILON && sr <= sc + cur.length + OFFSET_EPSILON {
                    let end = (sc + cur.length).max(sr + run.length);
                    cur.length = normalize_coord(end - sc);
                    Some(cur)
                } else {
                    out.push(cur);
                    Some(*run)
                }
            }
        };
    }
    if let Some(cur) = current {
        out.push(cur);
    }
}

/// One drawable square of uniform cells.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBlock {
    /// Stable identity for the shell (`"x:y:size"` or `"x,y:unit"`).
    pub key: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub selected: bool,
    pub texture: Option<TextureRef>,
}

impl fmt::Display for RenderBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}x{})", self.key, self.size, self.size)
    }
}

/// Groups `cells` into the largest uniform squares available.
///
/// A group of more than one cell must be complete, untextured and uniformly
/// selected. Cells that fit no group are drawn alone. Output is sorted by
/// `y`, then `x`.
pub fn aggregate_render_blocks(
    cells: &CellSet,
    unit: f64,
    textures: &TextureMap,
    selection: Option<&BTreeSet<CellKey>>,
) -> Vec<RenderBlock> {
    if cells.is_empty() || unit <= 0.0 {
        return Vec::new();
    }

    let mut candidates: Vec<f64> = CELL_UNIT_OPTIONS
        .iter()
        .copied()
        .filter(|candidate| {
            if *candidate < unit - OFFSET_EPSILON {
                return false;
            }
            let ratio = candidate / unit;
            (ratio - ratio.round()).abs() <= OFFSET_EPSILON
        })
        .collect();
    candidates.sort_by(|a, b| b.total_cmp(a));

    let is_selected = |key: &CellKey| selection.is_some_and(|set| set.contains(key));

    let mut remaining: BTreeSet<CellKey> = cells.iter().copied().collect();
    let mut blocks = Vec::new();

    while let Some(first) = remaining.first().copied() {
        let block = candidates
            .iter()
            .find_map(|candidate| try_block(first, *candidate, unit, &remaining, textures, &is_selected));

        let (block, members) = block.unwrap_or_else(|| {
            (
                RenderBlock {
                    key: format!("{}:{}", first, unit),
                    x: first.x(),
                    y: first.y(),
                    size: unit,
                    selected: is_selected(&first),
                    texture: textures.get(&first).cloned(),
                },
                vec![first],
            )
        });

        for key in &members {
            remaining.remove(key);
        }
        blocks.push(block);
    }

    blocks.sort_by(|a, b| {
        if (a.y - b.y).abs() > OFFSET_EPSILON {
            a.y.total_cmp(&b.y)
        } else {
            a.x.total_cmp(&b.x)
        }
    });
    blocks
}

fn try_block<S>(
    first: CellKey,
    size: f64,
    unit: f64,
    remaining: &BTreeSet<CellKey>,
    textures: &TextureMap,
    is_selected: &S,
) -> Option<(RenderBlock, Vec<CellKey>)>
where
    S: Fn(&CellKey) -> bool,
{
    let factor = ((size / unit).round() as usize).max(1);
    let base = first.group_base(size);
    let mut members = Vec::with_capacity(factor * factor);
    let mut texture: Option<&TextureRef> = None;
    let mut selected = None;

    for ix in 0..factor {
        for iy in 0..factor {
            let child = base.offset(ix as f64 * unit, iy as f64 * unit);
            if !remaining.contains(&child) {
                return None;
            }
            if let Some(child_texture) = textures.get(&child) {
                if factor > 1 {
                    return None;
                }
                texture = Some(child_texture);
            }
            let child_selected = is_selected(&child);
            match selected {
                None => selected = Some(child_selected),
                Some(s) if s != child_selected => return None,
                _ => {}
            }
            members.push(child);
        }
    }

    let block = RenderBlock {
        key: format!("{}:{}:{}", base.x(), base.y(), size),
        x: base.x(),
        y: base.y(),
        size,
        selected: selected.unwrap_or(false),
        texture: texture.cloned(),
    };
    Some((block, members))
}
