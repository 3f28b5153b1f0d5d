//! Cell unit and snap fraction tables
//!
//! The grid resolution is always one of [`CELL_UNIT_OPTIONS`]. Pointer input
//! snaps to `1 / denominator` of a world unit, or not at all when the
//! denominator is zero.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::OFFSET_EPSILON;

/// Allowed cell units, coarsest first.
pub const CELL_UNIT_OPTIONS: [f64; 7] = [8.0, 4.0, 2.0, 1.0, 0.5, 0.25, 0.125];

/// Allowed snap denominators. `0` means free placement.
pub const SNAP_DENOMINATOR_OPTIONS: [u32; 5] = [0, 1, 2, 4, 8];

/// Pointer snapping fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapFraction {
    /// No snapping; positions align to the cell unit instead
    Free,
    /// Whole units
    #[default]
    Whole,
    Half,
    Quarter,
    Eighth,
}

impl SnapFraction {
    pub const ALL: [SnapFraction; 5] = [
        SnapFraction::Free,
        SnapFraction::Whole,
        SnapFraction::Half,
        SnapFraction::Quarter,
        SnapFraction::Eighth,
    ];

    pub fn from_denominator(denominator: u32) -> Option<Self> {
        match denominator {
            0 => Some(Self::Free),
            1 => Some(Self::Whole),
            2 => Some(Self::Half),
            4 => Some(Self::Quarter),
            8 => Some(Self::Eighth),
            _ => None,
        }
    }

    pub fn denominator(&self) -> u32 {
        match self {
            Self::Free => 0,
            Self::Whole => 1,
            Self::Half => 2,
            Self::Quarter => 4,
            Self::Eighth => 8,
        }
    }

    /// Step in world units, `0.0` for [`SnapFraction::Free`].
    pub fn step(&self) -> f64 {
        snap_step(self.denominator())
    }
}

impl fmt::Display for SnapFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_snap_label(self.denominator()))
    }
}

impl FromStr for SnapFraction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" | "0" => Ok(Self::Free),
            "1" | "1/1" => Ok(Self::Whole),
            "1/2" => Ok(Self::Half),
            "1/4" => Ok(Self::Quarter),
            "1/8" => Ok(Self::Eighth),
            _ => Err(format!("Unknown snap fraction: {}", s)),
        }
    }
}

/// True when `unit` is one of [`CELL_UNIT_OPTIONS`].
pub fn is_cell_unit(unit: f64) -> bool {
    CELL_UNIT_OPTIONS
        .iter()
        .any(|u| (u - unit).abs() <= OFFSET_EPSILON)
}

/// Integer ratio `coarse / fine`, if it is a whole number of at least one.
///
/// * `coarse` - The larger edge length
/// * `fine` - The smaller edge length
pub fn unit_factor(coarse: f64, fine: f64) -> Option<usize> {
    if fine <= 0.0 || coarse <= 0.0 {
        return None;
    }
    let ratio = coarse / fine;
    let rounded = ratio.round();
    if rounded < 1.0 || (ratio - rounded).abs() > OFFSET_EPSILON {
        return None;
    }
    Some(rounded as usize)
}

/// Snap step in world units; `0.0` when snapping is off.
pub fn snap_step(denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        1.0 / f64::from(denominator)
    }
}

/// Snap denominator that follows a new cell unit.
///
/// Free snapping stays free; otherwise the denominator tracks `1 / unit` and
/// never drops below one.
pub fn snap_denominator_for_unit(unit: f64, current: u32) -> u32 {
    if current == 0 || unit <= 0.0 {
        return current;
    }
    ((1.0 / unit).round() as u32).max(1)
}

/// Human readable cell unit, e.g. `"1/2"` or `"4"`.
pub fn format_unit_label(unit: f64) -> String {
    if unit >= 1.0 - OFFSET_EPSILON {
        return format!("{}", unit.round() as i64);
    }
    let denominator = (1.0 / unit).round() as i64;
    format!("1/{}", denominator)
}

/// Human readable snap fraction, e.g. `"Free"`, `"1"` or `"1/4"`.
pub fn format_snap_label(denominator: u32) -> String {
    match denominator {
        0 => "Free".to_string(),
        1 => "1".to_string(),
        n => format!("1/{}", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_factor() {
        assert_eq!(unit_factor(2.0, 1.0), Some(2));
        assert_eq!(unit_factor(1.0, 0.125), Some(8));
        assert_eq!(unit_factor(1.0, 1.0), Some(1));
        assert_eq!(unit_factor(1.0, 2.0), None);
        assert_eq!(unit_factor(1.0, 0.3), None);
    }

    #[test]
    fn test_snap_denominator_tracks_unit() {
        assert_eq!(snap_denominator_for_unit(0.25, 1), 4);
        assert_eq!(snap_denominator_for_unit(2.0, 1), 1);
        assert_eq!(snap_denominator_for_unit(0.5, 0), 0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(format_unit_label(0.5), "1/2");
        assert_eq!(format_unit_label(8.0), "8");
        assert_eq!(format_snap_label(0), "Free");
        assert_eq!(format_snap_label(4), "1/4");
        assert_eq!(snap_step(4), 0.25);
        assert_eq!(snap_step(0), 0.0);
        assert!(is_cell_unit(0.125));
        assert!(!is_cell_unit(3.0));
    }

    #[test]
    fn test_snap_fraction() {
        for fraction in SnapFraction::ALL {
            assert_eq!(
                SnapFraction::from_denominator(fraction.denominator()),
                Some(fraction)
            );
            assert_eq!(fraction.to_string().parse::<SnapFraction>(), Ok(fraction));
        }
        assert_eq!(SnapFraction::from_denominator(3), None);
        assert_eq!(SnapFraction::Quarter.step(), 0.25);
        assert_eq!(SnapFraction::default(), SnapFraction::Whole);
    }
}
