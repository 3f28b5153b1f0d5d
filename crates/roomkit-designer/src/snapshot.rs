//! Save/load payload.
//!
//! The JSON layout mirrors one history entry:
//!
//! ```json
//! {
//!   "cellUnit": 1,
//!   "snapDenominator": 1,
//!   "cells": ["0,0", "1,0"],
//!   "cellTextures": { "0,0": "data:image/png;base64,..." },
//!   "doors": [{ "id": "...", "start": { "x": 1, "y": 0 }, "end": { "x": 1, "y": 1 } }],
//!   "walls": []
//! }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use roomkit_core::{is_cell_unit, CellKey, Error, Result, SNAP_DENOMINATOR_OPTIONS};
use serde::{Deserialize, Serialize};

use crate::grid::{CellSet, Grid, TextureMap};
use crate::segments::{Segment, SegmentKind, SegmentStore};
use crate::state::InteriorState;

/// Serializable copy of the canonical state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSnapshot {
    pub cell_unit: f64,
    pub snap_denominator: u32,
    pub cells: Vec<CellKey>,
    #[serde(default)]
    pub cell_textures: BTreeMap<CellKey, String>,
    #[serde(default)]
    pub doors: Vec<Segment>,
    #[serde(default)]
    pub walls: Vec<Segment>,
}

impl EditorSnapshot {
    pub fn from_state(state: &InteriorState) -> Self {
        Self {
            cell_unit: state.grid.unit(),
            snap_denominator: state.snap_denominator,
            cells: state.grid.cells().iter().copied().collect(),
            cell_textures: state
                .grid
                .textures()
                .iter()
                .map(|(key, texture)| (*key, texture.to_string()))
                .collect(),
            doors: state.doors.to_vec(),
            walls: state.walls.to_vec(),
        }
    }

    /// Validates the payload and rebuilds the state.
    ///
    /// Orphan textures are dropped, walls are sanitized and zero-length doors
    /// removed.
    pub fn into_state(self) -> Result<InteriorState> {
        if !is_cell_unit(self.cell_unit) {
            return Err(Error::other(format!("Invalid cell unit: {}", self.cell_unit)));
        }
        if !SNAP_DENOMINATOR_OPTIONS.contains(&self.snap_denominator) {
            return Err(Error::other(format!(
                "Invalid snap denominator: {}",
                self.snap_denominator
            )));
        }
        if let Some(key) = self.cells.iter().find(|k| !k.is_aligned_to(self.cell_unit)) {
            return Err(Error::other(format!(
                "Cell {} is not aligned to unit {}",
                key, self.cell_unit
            )));
        }

        let cells: CellSet = self.cells.into_iter().collect();
        let textures: TextureMap = self
            .cell_textures
            .into_iter()
            .map(|(key, texture)| (key, Arc::from(texture)))
            .collect();

        Ok(InteriorState {
            grid: Grid::from_parts(self.cell_unit, cells, textures),
            snap_denominator: self.snap_denominator,
            walls: SegmentStore::from_segments(SegmentKind::Wall, self.walls).sanitized(),
            doors: SegmentStore::from_segments(SegmentKind::Door, self.doors).without_invalid(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
