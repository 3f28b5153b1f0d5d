//! Multi-resolution occupancy grid.
//!
//! The grid stores the filled cells at a single current unit, plus a texture
//! per cell. Resolution changes are pure set rewrites:
//!
//! - [`Grid::refined`] splits every cell into `factor x factor` children.
//! - [`Grid::optimized`] raises the unit to the coarsest candidate that
//!   represents the same content exactly.
//!
//! Collections are persistent (`im`), so cloning a grid for a draft or a
//! history entry shares structure with the original.

use std::collections::{BTreeSet, VecDeque};

use im::{OrdMap, OrdSet};
use roomkit_core::{
    snap_down, unit_factor, Bounds, CellKey, Point, CELL_UNIT_OPTIONS, OFFSET_EPSILON,
};

use crate::segments::SegmentStore;
use crate::texture::TextureRef;

/// Set of occupied cells.
pub type CellSet = OrdSet<CellKey>;

/// Texture assignment per occupied cell.
pub type TextureMap = OrdMap<CellKey, TextureRef>;

/// Occupied cells at one resolution, with their textures.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    unit: f64,
    cells: CellSet,
    textures: TextureMap,
}

/// Result of [`Grid::optimized`].
#[derive(Debug, Clone, PartialEq)]
pub struct Optimized {
    pub grid: Grid,
    pub unit_changed: bool,
}

impl Grid {
    /// Empty grid at `unit`.
    pub fn new(unit: f64) -> Self {
        Self {
            unit,
            cells: CellSet::new(),
            textures: TextureMap::new(),
        }
    }

    /// Builds a grid, dropping textures of cells that are not occupied.
    pub fn from_parts(unit: f64, cells: CellSet, textures: TextureMap) -> Self {
        let mut grid = Self {
            unit,
            cells,
            textures,
        };
        grid.retain_occupied_textures();
        grid
    }

    pub fn unit(&self) -> f64 {
        self.unit
    }

    pub fn cells(&self) -> &CellSet {
        &self.cells
    }

    pub fn textures(&self) -> &TextureMap {
        &self.textures
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, key: &CellKey) -> bool {
        self.cells.contains(key)
    }

    pub fn texture(&self, key: &CellKey) -> Option<&TextureRef> {
        self.textures.get(key)
    }

    /// Marks `key` occupied. Returns `false` if it already was.
    pub fn insert(&mut self, key: CellKey) -> bool {
        self.cells.insert(key).is_none()
    }

    /// Clears `key` and its texture. Returns `false` if it was empty.
    pub fn remove(&mut self, key: &CellKey) -> bool {
        self.textures.remove(key);
        self.cells.remove(key).is_some()
    }

    /// Assigns a texture to an occupied cell. Ignored for empty cells.
    pub fn set_texture(&mut self, key: CellKey, texture: TextureRef) -> bool {
        if !self.cells.contains(&key) {
            return false;
        }
        self.textures.insert(key, texture);
        true
    }

    pub fn clear_texture(&mut self, key: &CellKey) -> bool {
        self.textures.remove(key).is_some()
    }

    /// Moves textures along `(from, to)` pairs, then drops orphaned entries.
    ///
    /// All sources are read before any target is written, so chains and swaps
    /// carry the original textures. Pairs whose ends are equal are skipped.
    pub fn apply_texture_moves(&mut self, moves: &[(CellKey, CellKey)]) {
        let carried: Vec<(CellKey, TextureRef)> = moves
            .iter()
            .filter(|(from, to)| from != to)
            .filter_map(|(from, to)| self.textures.get(from).map(|t| (*to, t.clone())))
            .collect();
        for (from, to) in moves {
            if from != to {
                self.textures.remove(from);
            }
        }
        for (to, texture) in carried {
            self.textures.insert(to, texture);
        }
        self.retain_occupied_textures();
    }

    /// Shifts `keys` by `(dx, dy)` without touching the texture map.
    ///
    /// Returns the new keys in input order and the `(old, new)` pairs of the
    /// textured cells, to be fed to [`Grid::apply_texture_moves`].
    pub fn relocate(
        &mut self,
        keys: &[CellKey],
        dx: f64,
        dy: f64,
    ) -> (Vec<CellKey>, Vec<(CellKey, CellKey)>) {
        for key in keys {
            self.cells.remove(key);
        }
        let mut moved = Vec::with_capacity(keys.len());
        let mut texture_moves = Vec::new();
        for key in keys {
            let target = key.offset(dx, dy);
            self.cells.insert(target);
            moved.push(target);
            if self.textures.contains_key(key) {
                texture_moves.push((*key, target));
            }
        }
        (moved, texture_moves)
    }

    fn retain_occupied_textures(&mut self) {
        let orphans: Vec<CellKey> = self
            .textures
            .keys()
            .filter(|key| !self.cells.contains(*key))
            .copied()
            .collect();
        for key in orphans {
            self.textures.remove(&key);
        }
    }

    /// Origin of the cell at the current unit that contains `point`.
    pub fn key_at(&self, point: Point) -> CellKey {
        CellKey::new(snap_down(point.x, self.unit), snap_down(point.y, self.unit))
    }

    /// Occupied cell containing `point`, if any.
    pub fn find_cell_at(&self, point: Point) -> Option<CellKey> {
        let key = self.key_at(point);
        self.cells.contains(&key).then_some(key)
    }

    /// Bounds of `keys` at this grid's unit.
    pub fn bounds_of<'a, I>(&self, keys: I) -> Bounds
    where
        I: IntoIterator<Item = &'a CellKey>,
    {
        Bounds::from_cell_origins(keys.into_iter().map(CellKey::origin), self.unit)
    }

    /// Cells 4-connected to `start`, sorted. Empty when `start` is not occupied.
    pub fn connected_from(&self, start: CellKey) -> Vec<CellKey> {
        if !self.cells.contains(&start) {
            return Vec::new();
        }

        let mut visited = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for neighbor in current.neighbors(self.unit) {
                if self.cells.contains(&neighbor) && visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        visited.into_iter().collect()
    }

    /// Splits every cell into children of `target` size.
    ///
    /// Returns an unchanged copy when `target` is not a strictly finer
    /// integer fraction of the current unit.
    pub fn refined(&self, target: f64) -> Grid {
        if target >= self.unit - OFFSET_EPSILON {
            return self.clone();
        }
        let factor = match unit_factor(self.unit, target) {
            Some(factor) if factor > 1 => factor,
            _ => return self.clone(),
        };

        let mut cells = CellSet::new();
        let mut textures = TextureMap::new();
        for key in self.cells.iter() {
            let texture = self.textures.get(key);
            for ix in 0..factor {
                for iy in 0..factor {
                    let child = key.offset(ix as f64 * target, iy as f64 * target);
                    cells.insert(child);
                    if let Some(texture) = texture {
                        textures.insert(child, texture.clone());
                    }
                }
            }
        }

        tracing::debug!(
            "Refined grid from {} to {} ({} -> {} cells)",
            self.unit,
            target,
            self.cells.len(),
            cells.len()
        );
        Grid {
            unit: target,
            cells,
            textures,
        }
    }

    /// Merges complete `factor x factor` groups into cells of `target` size.
    ///
    /// Fails when any group is partial or holds two different textures.
    pub fn try_coarsen(&self, target: f64) -> Option<Grid> {
        if self.cells.is_empty() {
            return Some(Grid::new(target));
        }
        let factor = unit_factor(target, self.unit).filter(|f| *f > 1)?;

        let mut cells = CellSet::new();
        let mut textures = TextureMap::new();
        for key in self.cells.iter() {
            let base = key.group_base(target);
            if cells.contains(&base) {
                continue;
            }

            let mut group_texture: Option<&TextureRef> = None;
            for ix in 0..factor {
                for iy in 0..factor {
                    let child = base.offset(ix as f64 * self.unit, iy as f64 * self.unit);
                    if !self.cells.contains(&child) {
                        return None;
                    }
                    if let Some(texture) = self.textures.get(&child) {
                        match group_texture {
                            Some(existing) if existing != texture => return None,
                            _ => group_texture = Some(texture),
                        }
                    }
                }
            }

            cells.insert(base);
            if let Some(texture) = group_texture {
                textures.insert(base, texture.clone());
            }
        }

        if cells.len() * factor * factor != self.cells.len() {
            return None;
        }

        Some(Grid {
            unit: target,
            cells,
            textures,
        })
    }

    /// Coarsest equivalent representation of this grid.
    ///
    /// Candidates come from [`CELL_UNIT_OPTIONS`], largest first, and must be
    /// an integer multiple of the current unit. A candidate is rejected if any
    /// wall or door endpoint is off its lattice.
    pub fn optimized(&self, walls: &SegmentStore, doors: &SegmentStore) -> Optimized {
        for candidate in CELL_UNIT_OPTIONS {
            if candidate <= self.unit + OFFSET_EPSILON {
                continue;
            }
            if !matches!(unit_factor(candidate, self.unit), Some(f) if f > 1) {
                continue;
            }
            if !walls.all_aligned_to(candidate) || !doors.all_aligned_to(candidate) {
                continue;
            }
            if let Some(grid) = self.try_coarsen(candidate) {
                return Optimized {
                    grid,
                    unit_changed: true,
                };
            }
        }

        let mut grid = self.clone();
        grid.retain_occupied_textures();
        Optimized {
            grid,
            unit_changed: false,
        }
    }
}
