//! # RoomKit Core
//!
//! Core types and utilities shared by the RoomKit crates:
//!
//! - **geometry**: points, segment math and containment tests
//! - **cell_key**: canonical keys for grid cells at fixed precision
//! - **units**: the ordered cell unit table and snap fractions
//! - **error**: the soft error taxonomy surfaced as status text

pub mod cell_key;
pub mod error;
pub mod geometry;
pub mod units;

pub use cell_key::{decode, encode, CellKey};
pub use error::{EditError, Error, KeyError, Result};
pub use geometry::{
    distance_point_to_segment, is_multiple_of_unit, is_segment_valid, normalize_coord,
    segment_length, snap_down, snap_nearest, Bounds, Point, OFFSET_EPSILON, PRECISION_DIGITS,
    SEGMENT_EPSILON,
};
pub use units::{
    format_snap_label, format_unit_label, is_cell_unit, snap_denominator_for_unit, snap_step,
    unit_factor, SnapFraction, CELL_UNIT_OPTIONS, SNAP_DENOMINATOR_OPTIONS,
};
