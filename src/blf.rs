//! Bottom-Left-Fill placer: drives the free-rectangle store with a
//! fixed orientation-trial order and commits the first fit found.

use crate::cancel::CancellationToken;
use crate::free_rects::FreeRectStore;
use crate::layout::PlacedPiece;
use crate::piece::Piece;

/// Outcome of a BLF placement pass.
pub struct BlfResult {
    /// Pieces placed onto the sheet, in placement order.
    pub placed: Vec<PlacedPiece>,
    /// Piece ids that could not be placed.
    pub unplaced: Vec<usize>,
    /// Whether the pass stopped early due to cancellation.
    pub cancelled: bool,
    /// Area of the largest free rectangle remaining once placement stopped.
    pub largest_waste_area: f64,
}

/// Places `pieces` (already sorted by the caller) one at a time, trying each
/// piece's allowed orientations in order and taking the first one that fits
/// the store's bottom-left anchor. Mutates `store` in place so a caller can
/// reuse it (the genetic placer's decode step does).
pub fn place(
    pieces: &[Piece],
    store: &mut FreeRectStore,
    gap: f64,
    token: &CancellationToken,
) -> BlfResult {
    let mut placed = Vec::new();
    let mut unplaced = Vec::new();
    let mut cancelled = false;

    for piece in pieces {
        if token.is_cancelled() {
            cancelled = true;
            break;
        }

        let fit = piece
            .orientations
            .iter()
            .find_map(|o| store.find_blf(o.width, o.height).map(|anchor| (o, anchor)));

        match fit {
            Some((orientation, (x, y))) => {
                placed.push(PlacedPiece {
                    placement_id: format!("placement-{}", piece.id),
                    design_id: piece.design_id.clone(),
                    x,
                    y,
                    width: orientation.width,
                    height: orientation.height,
                    rotation: orientation.rotation,
                    flipped: orientation.flipped,
                });
                store.insert_placement(x, y, orientation.width, orientation.height, gap);
            }
            None => unplaced.push(piece.id),
        }
    }

    for piece in pieces.iter().skip(placed.len() + unplaced.len()) {
        unplaced.push(piece.id);
    }

    BlfResult {
        placed,
        unplaced,
        cancelled,
        largest_waste_area: store.largest_area(),
    }
}
