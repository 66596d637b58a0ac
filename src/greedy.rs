//! Row-packing greedy placer: a fast, store-free baseline that never
//! backtracks and never attempts rotation.

use crate::cancel::CancellationToken;
use crate::layout::PlacedPiece;
use crate::piece::Piece;

/// Outcome of a greedy placement pass.
pub struct GreedyResult {
    /// Pieces placed onto the sheet, in placement order.
    pub placed: Vec<PlacedPiece>,
    /// Piece ids that could not be placed.
    pub unplaced: Vec<usize>,
    /// Whether the pass stopped early due to cancellation.
    pub cancelled: bool,
}

/// Packs `pieces` (already sorted by the caller) into rows, left to right,
/// wrapping to a new row when a piece no longer fits the current one.
/// Pieces are tried only in their first orientation; rotation is never
/// attempted here even when the run allows it.
pub fn place(
    pieces: &[Piece],
    sheet_width: f64,
    sheet_height: f64,
    edge_margin: f64,
    gap: f64,
    token: &CancellationToken,
) -> GreedyResult {
    let mut placed = Vec::new();
    let mut unplaced = Vec::new();
    let mut cancelled = false;

    let mut cursor_x = edge_margin;
    let mut cursor_y = edge_margin;
    let mut row_height = 0.0_f64;

    for piece in pieces {
        if token.is_cancelled() {
            cancelled = true;
            break;
        }

        let orientation = match piece.orientations.first() {
            Some(o) => o,
            None => {
                unplaced.push(piece.id);
                continue;
            }
        };
        let w = orientation.width;
        let h = orientation.height;

        if cursor_x + w + edge_margin > sheet_width {
            cursor_x = edge_margin;
            cursor_y += row_height + gap;
            row_height = 0.0;
        }

        let fits_sheet =
            cursor_x + w + edge_margin <= sheet_width && cursor_y + h + edge_margin <= sheet_height;

        if !fits_sheet {
            unplaced.push(piece.id);
            continue;
        }

        placed.push(PlacedPiece {
            placement_id: format!("placement-{}", piece.id),
            design_id: piece.design_id.clone(),
            x: cursor_x,
            y: cursor_y,
            width: w,
            height: h,
            rotation: orientation.rotation,
            flipped: orientation.flipped,
        });

        cursor_x += w + gap;
        row_height = row_height.max(h);
    }

    for piece in pieces.iter().skip(placed.len() + unplaced.len()) {
        unplaced.push(piece.id);
    }

    GreedyResult {
        placed,
        unplaced,
        cancelled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{SortBy, SortOrder};
    use crate::types::{Design, PieceRequest};

    fn pieces(specs: &[(f64, f64)]) -> Vec<Piece> {
        let requests: Vec<PieceRequest> = specs
            .iter()
            .enumerate()
            .map(|(i, (w, h))| PieceRequest {
                design: Design {
                    id: format!("d{i}"),
                    name: format!("d{i}"),
                    width: *w,
                    height: *h,
                },
                quantity: 1,
                priority: 0,
            })
            .collect();
        crate::piece::expand(&requests, false, false)
    }

    #[test]
    fn single_piece_fits() {
        let p = pieces(&[(400.0, 300.0)]);
        let result = place(&p, 1000.0, 1000.0, 0.0, 0.0, &CancellationToken::new());
        assert_eq!(result.placed.len(), 1);
        assert_eq!(result.placed[0].x, 0.0);
        assert_eq!(result.placed[0].y, 0.0);
        assert_eq!(result.placed[0].rotation, 0);
        assert!(result.unplaced.is_empty());
    }

    #[test]
    fn wraps_to_new_row_when_out_of_width() {
        let p = pieces(&[(600.0, 200.0), (600.0, 200.0), (600.0, 200.0)]);
        let result = place(&p, 1000.0, 1000.0, 0.0, 0.0, &CancellationToken::new());
        assert_eq!(result.placed.len(), 3);
        assert_eq!((result.placed[0].x, result.placed[0].y), (0.0, 0.0));
        assert_eq!((result.placed[1].x, result.placed[1].y), (0.0, 200.0));
        assert_eq!((result.placed[2].x, result.placed[2].y), (0.0, 400.0));
    }

    #[test]
    fn gap_shifts_the_next_placement() {
        let p = pieces(&[(500.0, 500.0), (500.0, 500.0)]);
        let result = place(&p, 1000.0, 1000.0, 0.0, 10.0, &CancellationToken::new());
        assert_eq!(result.placed.len(), 2);
        assert_eq!(result.placed[1].x, 510.0);
    }

    #[test]
    fn oversized_piece_is_unplaced_not_retried() {
        let p = pieces(&[(2000.0, 2000.0), (10.0, 10.0)]);
        let result = place(&p, 1000.0, 1000.0, 0.0, 0.0, &CancellationToken::new());
        assert_eq!(result.placed.len(), 1);
        assert_eq!(result.unplaced.len(), 1);
        assert_eq!(result.placed[0].width, 10.0);
    }

    #[test]
    fn cancellation_stops_early() {
        let p = pieces(&[(10.0, 10.0), (10.0, 10.0), (10.0, 10.0)]);
        let token = CancellationToken::new();
        token.cancel();
        let result = place(&p, 1000.0, 1000.0, 0.0, 0.0, &token);
        assert!(result.cancelled);
        assert!(result.placed.is_empty());
        assert_eq!(result.unplaced.len(), 3);
    }

    #[test]
    fn default_sort_order_does_not_affect_placer_itself() {
        // Sorting is the caller's job; verify the placer honours
        // whatever order it is given rather than re-sorting internally.
        let mut p = pieces(&[(10.0, 10.0), (900.0, 900.0)]);
        crate::piece::sort_pieces(&mut p, SortBy::Area, SortOrder::Desc);
        let result = place(&p, 1000.0, 1000.0, 0.0, 0.0, &CancellationToken::new());
        assert_eq!(result.placed[0].width, 900.0);
    }
}
