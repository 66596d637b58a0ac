//! Piece expander, orientation generation, and the pre-placement sorter.

use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::options::{SortBy, SortOrder};
use crate::types::PieceRequest;

/// A `(width, height, rotation, flipped)` tuple derived from a design under the
/// run's rotation/flip policy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Orientation {
    /// Width in this orientation.
    pub width: f64,
    /// Height in this orientation.
    pub height: f64,
    /// Rotation applied, in degrees: 0 or 90.
    pub rotation: u16,
    /// Whether this orientation is a mirror of the unflipped one.
    pub flipped: bool,
}

/// A single expanded instance of a requested piece, with its allowed orientations
/// and the index it held in the flattened input sequence (used as the final
/// sort tie-break, ).
#[derive(Clone, Debug)]
pub struct Piece {
    /// Identifier unique within this run's expanded piece list.
    pub id: usize,
    /// Originating design's identifier.
    pub design_id: String,
    /// Unrotated width.
    pub base_width: f64,
    /// Unrotated height.
    pub base_height: f64,
    /// Priority inherited from the originating request.
    pub priority: i64,
    /// Position in the flattened input sequence, before sorting.
    pub input_order: usize,
    /// Orientations allowed under the run's rotation/flip policy, in the fixed
    /// generation order: unrotated, rotated, unrotated-flipped, rotated-flipped.
    pub orientations: SmallVec<[Orientation; 4]>,
}

impl Piece {
    fn area(&self) -> f64 {
        self.base_width * self.base_height
    }

    fn perimeter(&self) -> f64 {
        2.0 * (self.base_width + self.base_height)
    }

    fn ratio(&self) -> f64 {
        let (longer, shorter) = if self.base_width >= self.base_height {
            (self.base_width, self.base_height)
        } else {
            (self.base_height, self.base_width)
        };
        if shorter <= 0.0 {
            f64::INFINITY
        } else {
            longer / shorter
        }
    }

    fn sort_key(&self, sort_by: SortBy) -> f64 {
        match sort_by {
            SortBy::Area => self.area(),
            SortBy::Perimeter => self.perimeter(),
            SortBy::Ratio => self.ratio(),
            SortBy::Priority => self.priority as f64,
        }
    }
}

fn generate_orientations(
    width: f64,
    height: f64,
    allow_rotation: bool,
    allow_flipping: bool,
) -> SmallVec<[Orientation; 4]> {
    let mut orientations = SmallVec::new();

    orientations.push(Orientation {
        width,
        height,
        rotation: 0,
        flipped: false,
    });

    if allow_rotation {
        orientations.push(Orientation {
            width: height,
            height: width,
            rotation: 90,
            flipped: false,
        });
    }

    if allow_flipping {
        let mirrors: SmallVec<[Orientation; 4]> = orientations
            .iter()
            .map(|o| Orientation {
                width: o.width,
                height: o.height,
                rotation: o.rotation,
                flipped: true,
            })
            .collect();
        orientations.extend(mirrors);
    }

    orientations
}

/// Expands `requests` into a flat sequence of piece instances, preserving input
/// order and annotating each with its allowed orientations.
pub fn expand(
    requests: &[PieceRequest],
    allow_rotation: bool,
    allow_flipping: bool,
) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut next_id = 0usize;

    for request in requests {
        let orientations = generate_orientations(
            request.design.width,
            request.design.height,
            allow_rotation,
            allow_flipping,
        );

        for _ in 0..request.quantity {
            pieces.push(Piece {
                id: next_id,
                design_id: request.design.id.clone(),
                base_width: request.design.width,
                base_height: request.design.height,
                priority: request.priority,
                input_order: next_id,
                orientations: orientations.clone(),
            });
            next_id += 1;
        }
    }

    pieces
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Orders `pieces` by `sort_by`/`sort_order`, breaking ties by higher priority
/// first, then larger area, then original input order. The sort is a
/// total order, so the result is independent of the underlying sort algorithm's
/// stability.
pub fn sort_pieces(pieces: &mut [Piece], sort_by: SortBy, sort_order: SortOrder) {
    pieces.sort_by(|a, b| {
        let primary = match sort_order {
            SortOrder::Desc => cmp_f64(b.sort_key(sort_by), a.sort_key(sort_by)),
            SortOrder::Asc => cmp_f64(a.sort_key(sort_by), b.sort_key(sort_by)),
        };

        primary
            .then_with(|| b.priority.cmp(&a.priority))
            .then_with(|| cmp_f64(b.area(), a.area()))
            .then_with(|| a.input_order.cmp(&b.input_order))
    });
}
