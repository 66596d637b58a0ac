//! Input data model: the stock sheet, the catalogue of designs, and the
//! quantities requested from each design.

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// A rectangular stock sheet that pieces are nested into.
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sheet {
    /// Width of the sheet in millimetres.
    pub width: f64,
    /// Height of the sheet in millimetres.
    pub height: f64,
    /// Thickness of the sheet in millimetres. Informational only; the placer
    /// does not reason about thickness.
    pub thickness: f64,
}

impl Sheet {
    /// Total area of the sheet.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A rectangular design that can be requested for cutting.
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Clone, Debug, PartialEq)]
pub struct Design {
    /// Unique identifier for this design.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Width of the design in millimetres, before any rotation.
    pub width: f64,
    /// Height of the design in millimetres, before any rotation.
    pub height: f64,
}

/// A request for `quantity` copies of a design, with a scheduling priority.
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Clone, Debug, PartialEq)]
pub struct PieceRequest {
    /// The design being requested.
    pub design: Design,
    /// Number of copies requested. Must be at least 1.
    pub quantity: usize,
    /// Scheduling priority; higher sorts first when `sort_by = priority` and
    /// `sort_order = desc`, and breaks ties for every other sort key.
    pub priority: i64,
}
