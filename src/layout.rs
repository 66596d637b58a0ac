//! Output data model: a placed piece, the finalised layout, and the run result
//! wrapper returned to callers.

use crate::cutpath::CutPath;
use crate::stats::Statistics;
use crate::types::Sheet;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// A cut piece that has been placed in a solution by a placer.
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedPiece {
    /// Identifier unique within this run.
    pub placement_id: String,
    /// The design this placement was cut from.
    pub design_id: String,
    /// X location of the left edge within the sheet.
    pub x: f64,
    /// Y location of the bottom edge within the sheet.
    pub y: f64,
    /// Width in the chosen orientation.
    pub width: f64,
    /// Height in the chosen orientation.
    pub height: f64,
    /// Rotation applied, in degrees: 0 or 90.
    pub rotation: u16,
    /// Whether the chosen orientation is a mirror of the design's default.
    pub flipped: bool,
}

impl PlacedPiece {
    /// Area covered by this placement.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Right edge of this placement within the sheet.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge of this placement within the sheet.
    pub fn top(&self) -> f64 {
        self.y + self.height
    }
}

/// A finalised placement over a sheet, with its derived cut plan and statistics.
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    /// The sheet this layout was computed against.
    pub sheet: Sheet,
    /// Pieces placed onto the sheet.
    pub placed_pieces: Vec<PlacedPiece>,
    /// Ordered cutting plan derived from `placed_pieces`.
    pub cut_paths: Vec<CutPath>,
    /// Utilisation and cutting statistics derived from the above.
    pub statistics: Statistics,
}

/// The outcome of a single optimization run (output contract).
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Clone, Debug, PartialEq)]
pub struct RunResult {
    /// The computed layout. Contains zero placed pieces when `cancelled` is
    /// true and cancellation landed before any placement.
    pub layout: Layout,
    /// Wall-clock duration of the run, in seconds.
    pub execution_time_seconds: f64,
    /// Whether the run was cut short by cancellation or the genetic placer's
    /// wall-clock deadline.
    pub cancelled: bool,
}
