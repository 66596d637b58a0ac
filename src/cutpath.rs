//! Cut-path generator: derives an ordered, deterministic sequence of
//! perimeter cuts from a finalised set of placed pieces.

use crate::layout::PlacedPiece;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Default feed speed used when a path's own speed is unset or non-positive.
pub const DEFAULT_SPEED_MM_PER_MIN: f64 = 100.0;

/// The linear direction of a single cut segment.
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "lowercase"))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CutPathType {
    /// A cut parallel to the sheet's width axis.
    Horizontal,
    /// A cut parallel to the sheet's height axis.
    Vertical,
    /// A non-linear cut. Never emitted by this generator; reserved for future
    /// non-rectangular cut shapes.
    Curve,
}

/// A single 2D point.
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

/// An ordered line segment that a cutting tool traverses.
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Clone, Debug, PartialEq)]
pub struct CutPath {
    /// Identifier unique within this run.
    pub id: String,
    /// Linear direction of this segment.
    pub path_type: CutPathType,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Position of this segment in the total cutting order, starting at 0.
    pub order: u32,
    /// Cutting tool used for this segment.
    pub tool: String,
    /// Feed speed in mm/min. Falls back to [`DEFAULT_SPEED_MM_PER_MIN`] for
    /// cutting-time estimation when non-positive.
    pub speed: f64,
    /// Placement IDs this segment cuts. Always a single element; see on
    /// per-piece granularity.
    pub pieces: Vec<String>,
}

fn segment_length(path: &CutPath) -> f64 {
    let dx = path.end.x - path.start.x;
    let dy = path.end.y - path.start.y;
    (dx * dx + dy * dy).sqrt()
}

/// Generates the ordered perimeter cut plan for `placed_pieces`. Pieces
/// are iterated in ascending `(y, x)`; each piece emits, in order, its bottom
/// (left-to-right), right (bottom-to-top), top (right-to-left), and left
/// (top-to-bottom) edges.
pub fn generate(placed_pieces: &[PlacedPiece]) -> Vec<CutPath> {
    let mut order: Vec<&PlacedPiece> = placed_pieces.iter().collect();
    order.sort_by(|a, b| {
        a.y.partial_cmp(&b.y)
            .unwrap()
            .then(a.x.partial_cmp(&b.x).unwrap())
    });

    let mut paths = Vec::with_capacity(order.len() * 4);
    let mut next_order = 0u32;

    for piece in order {
        let segments = [
            (
                CutPathType::Horizontal,
                Point { x: piece.x, y: piece.y },
                Point {
                    x: piece.right(),
                    y: piece.y,
                },
            ),
            (
                CutPathType::Vertical,
                Point {
                    x: piece.right(),
                    y: piece.y,
                },
                Point {
                    x: piece.right(),
                    y: piece.top(),
                },
            ),
            (
                CutPathType::Horizontal,
                Point {
                    x: piece.right(),
                    y: piece.top(),
                },
                Point { x: piece.x, y: piece.top() },
            ),
            (
                CutPathType::Vertical,
                Point { x: piece.x, y: piece.top() },
                Point { x: piece.x, y: piece.y },
            ),
        ];

        for (path_type, start, end) in segments {
            paths.push(CutPath {
                id: format!("cut-{next_order}"),
                path_type,
                start,
                end,
                order: next_order,
                tool: "straight".to_string(),
                speed: DEFAULT_SPEED_MM_PER_MIN,
                pieces: vec![piece.placement_id.clone()],
            });
            next_order += 1;
        }
    }

    paths
}

/// Total Euclidean length of all segments in `paths`, in millimetres.
pub fn cutting_length(paths: &[CutPath]) -> f64 {
    paths.iter().map(segment_length).sum()
}

/// Estimated cutting time across all segments, in minutes, using each path's
/// own speed or the default when non-positive.
pub fn cutting_time(paths: &[CutPath]) -> f64 {
    paths
        .iter()
        .map(|p| {
            let speed = if p.speed > 0.0 {
                p.speed
            } else {
                DEFAULT_SPEED_MM_PER_MIN
            };
            segment_length(p) / speed
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(placement_id: &str, x: f64, y: f64, width: f64, height: f64) -> PlacedPiece {
        PlacedPiece {
            placement_id: placement_id.to_string(),
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
    fn emits_four_segments_per_piece_in_order() {
        let pieces = vec![piece("a", 0.0, 0.0, 10.0, 20.0)];
        let paths = generate(&pieces);
        assert_eq!(paths.len(), 4);

        assert_eq!(paths[0].start, Point { x: 0.0, y: 0.0 });
        assert_eq!(paths[0].end, Point { x: 10.0, y: 0.0 });
        assert_eq!(paths[0].path_type, CutPathType::Horizontal);

        assert_eq!(paths[1].start, Point { x: 10.0, y: 0.0 });
        assert_eq!(paths[1].end, Point { x: 10.0, y: 20.0 });
        assert_eq!(paths[1].path_type, CutPathType::Vertical);

        assert_eq!(paths[2].start, Point { x: 10.0, y: 20.0 });
        assert_eq!(paths[2].end, Point { x: 0.0, y: 20.0 });
        assert_eq!(paths[2].path_type, CutPathType::Horizontal);

        assert_eq!(paths[3].start, Point { x: 0.0, y: 20.0 });
        assert_eq!(paths[3].end, Point { x: 0.0, y: 0.0 });
        assert_eq!(paths[3].path_type, CutPathType::Vertical);

        let orders: Vec<u32> = paths.iter().map(|p| p.order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);
    }

    #[test]
    fn iterates_pieces_by_ascending_y_then_x() {
        let pieces = vec![
            piece("top", 0.0, 100.0, 10.0, 10.0),
            piece("bottom-right", 50.0, 0.0, 10.0, 10.0),
            piece("bottom-left", 0.0, 0.0, 10.0, 10.0),
        ];
        let paths = generate(&pieces);
        let piece_order: Vec<&str> = paths
            .iter()
            .step_by(4)
            .map(|p| p.pieces[0].as_str())
            .collect();
        assert_eq!(piece_order, vec!["bottom-left", "bottom-right", "top"]);
    }

    #[test]
    fn cutting_length_sums_segment_lengths() {
        let pieces = vec![piece("a", 0.0, 0.0, 10.0, 20.0)];
        let paths = generate(&pieces);
        assert_eq!(cutting_length(&paths), 2.0 * (10.0 + 20.0));
    }

    #[test]
    fn cutting_time_uses_default_speed_when_unset() {
        let pieces = vec![piece("a", 0.0, 0.0, 10.0, 0.0)];
        let mut paths = generate(&pieces);
        for p in &mut paths {
            p.speed = 0.0;
        }
        let length = cutting_length(&paths);
        assert_eq!(cutting_time(&paths), length / DEFAULT_SPEED_MM_PER_MIN);
    }
}
