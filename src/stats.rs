//! Utilisation and cutting statistics derived from a finalised layout.

use crate::cutpath::{self, CutPath};
use crate::layout::PlacedPiece;
use crate::types::Sheet;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Derived quality and effort metrics for a single layout.
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Statistics {
    /// Sum of placed-piece areas, in square millimetres.
    pub used_area: f64,
    /// Full sheet area, in square millimetres.
    pub total_area: f64,
    /// `100 * used_area / total_area`, or 0.0 when `total_area` is 0.
    pub utilisation_rate: f64,
    /// `100 - utilisation_rate`.
    pub waste_rate: f64,
    /// Utilisation relative to the theoretical best achievable for the placed
    /// set, or 0.0 when that theoretical area is 0.
    pub material_efficiency: f64,
    /// Number of pieces successfully placed.
    pub placed_pieces: usize,
    /// Number of requested pieces that could not be placed.
    pub unplaced_pieces: usize,
    /// `placed_pieces + unplaced_pieces`.
    pub total_pieces: usize,
    /// Total length of the cut plan, in millimetres.
    pub cutting_length: f64,
    /// Estimated cutting time, in minutes.
    pub cutting_time: f64,
    /// Area of the largest contiguous waste region, when computed for this
    /// placer; `None` when the placer does not track it.
    pub largest_waste_area: Option<f64>,
}

/// Computes statistics for a sheet's placements and derived cut plan.
///
/// `theoretical_area` is the minimum sheet area that could hold every placed
/// piece with no waste (the sum of placed-piece areas is a natural choice,
/// but a caller comparing against a tighter bound may supply one); it backs
/// `material_efficiency`. `largest_waste_area` is forwarded from a placer
/// that tracks it directly (the Bottom-Left-Fill free-rectangle store) and
/// left `None` otherwise.
pub fn compute(
    sheet: &Sheet,
    placed: &[PlacedPiece],
    unplaced_count: usize,
    cut_paths: &[CutPath],
    theoretical_area: f64,
    largest_waste_area: Option<f64>,
) -> Statistics {
    let used_area: f64 = placed.iter().map(PlacedPiece::area).sum();
    let total_area = sheet.area();

    let utilisation_rate = if total_area > 0.0 {
        100.0 * used_area / total_area
    } else {
        0.0
    };

    let material_efficiency = if theoretical_area > 0.0 {
        100.0 * used_area / theoretical_area
    } else {
        0.0
    };

    Statistics {
        used_area,
        total_area,
        utilisation_rate,
        waste_rate: 100.0 - utilisation_rate,
        material_efficiency,
        placed_pieces: placed.len(),
        unplaced_pieces: unplaced_count,
        total_pieces: placed.len() + unplaced_count,
        cutting_length: cutpath::cutting_length(cut_paths),
        cutting_time: cutpath::cutting_time(cut_paths),
        largest_waste_area,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(width: f64, height: f64) -> Sheet {
        Sheet {
            width,
            height,
            thickness: 4.0,
        }
    }

    fn piece(x: f64, y: f64, width: f64, height: f64) -> PlacedPiece {
        PlacedPiece {
            placement_id: "p".to_string(),
            design_id: "d".to_string(),
            x,
            y,
            width,
            height,
            rotation: 0,
            flipped: false,
        }
    }

    #[test]
    fn utilisation_and_waste_are_complementary() {
        let sheet = sheet(100.0, 100.0);
        let placed = vec![piece(0.0, 0.0, 40.0, 40.0)];
        let stats = compute(&sheet, &placed, 0, &[], 1600.0, None);
        assert_eq!(stats.utilisation_rate, 16.0);
        assert_eq!(stats.waste_rate, 84.0);
        assert_eq!(stats.material_efficiency, 100.0);
    }

    #[test]
    fn zero_total_area_yields_zero_utilisation() {
        let sheet = sheet(0.0, 0.0);
        let stats = compute(&sheet, &[], 0, &[], 0.0, None);
        assert_eq!(stats.utilisation_rate, 0.0);
        assert_eq!(stats.material_efficiency, 0.0);
    }

    #[test]
    fn counts_placed_and_unplaced_pieces() {
        let sheet = sheet(100.0, 100.0);
        let placed = vec![piece(0.0, 0.0, 10.0, 10.0), piece(10.0, 0.0, 10.0, 10.0)];
        let stats = compute(&sheet, &placed, 3, &[], 200.0, None);
        assert_eq!(stats.placed_pieces, 2);
        assert_eq!(stats.unplaced_pieces, 3);
        assert_eq!(stats.total_pieces, 5);
    }

    #[test]
    fn forwards_largest_waste_area_when_supplied() {
        let sheet = sheet(100.0, 100.0);
        let stats = compute(&sheet, &[], 0, &[], 0.0, Some(42.0));
        assert_eq!(stats.largest_waste_area, Some(42.0));
    }

    #[test]
    fn derives_cutting_length_and_time_from_paths() {
        let sheet = sheet(100.0, 100.0);
        let placed = vec![piece(0.0, 0.0, 10.0, 20.0)];
        let paths = cutpath::generate(&placed);
        let stats = compute(&sheet, &placed, 0, &paths, 200.0, None);
        assert_eq!(stats.cutting_length, cutpath::cutting_length(&paths));
        assert_eq!(stats.cutting_time, cutpath::cutting_time(&paths));
    }
}
