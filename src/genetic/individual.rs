//! A single chromosome: an ordering of piece handles plus a chosen
//! orientation per piece. Coordinates are never stored on the chromosome —
//! decoding through Bottom-Left-Fill is the only authoritative placement.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cancel::CancellationToken;
use crate::free_rects::FreeRectStore;
use crate::layout::PlacedPiece;
use crate::piece::Piece;

/// Weight applied to the unplaced-piece count in the fitness function.
pub const ALPHA_UNPLACED_PENALTY: f64 = 1.0;
/// Weight applied to the used region's bounding-box height in the fitness function.
pub const BETA_HEIGHT_PENALTY: f64 = 0.1;

/// An ordered permutation of piece ids paired with a per-piece orientation choice.
#[derive(Clone, Debug)]
pub struct Individual {
    /// Piece ids in placement-attempt order.
    pub order: Vec<usize>,
    /// Orientation index chosen per piece, indexed by piece id.
    pub orientation: Vec<usize>,
}

/// The result of decoding an individual into a concrete layout.
pub struct Decoded {
    /// Pieces placed under this individual's order and orientation choices.
    pub placed: Vec<PlacedPiece>,
    /// Piece ids left unplaced.
    pub unplaced: Vec<usize>,
    /// Height of the bounding box enclosing every placed piece, 0.0 if none placed.
    pub bbox_height: f64,
}

impl Individual {
    /// Builds the sorted-by-area-desc seed individual: `pieces` is expected
    /// to already be in the caller's chosen sort order, and this individual
    /// simply follows it with each piece's first orientation.
    pub fn sorted_seed(pieces: &[Piece]) -> Self {
        Self {
            order: pieces.iter().map(|p| p.id).collect(),
            orientation: vec![0; pieces.len()],
        }
    }

    /// Builds a uniform-random permutation with a uniform-random orientation
    /// choice per piece.
    pub fn random(pieces: &[Piece], rng: &mut impl Rng) -> Self {
        let mut order: Vec<usize> = pieces.iter().map(|p| p.id).collect();
        order.shuffle(rng);

        let orientation = pieces
            .iter()
            .map(|p| rng.gen_range(0..p.orientations.len()))
            .collect();

        Self { order, orientation }
    }

    /// Decodes this individual into a layout by running Bottom-Left-Fill
    /// over a fresh free-rectangle store, placing pieces in `self.order` and
    /// trying only each piece's chromosome-selected orientation.
    pub fn decode(
        &self,
        pieces: &[Piece],
        store: &mut FreeRectStore,
        gap: f64,
        token: &CancellationToken,
        check_every_individual: bool,
    ) -> Decoded {
        let mut placed = Vec::new();
        let mut unplaced = Vec::new();
        let mut min_y = f64::INFINITY;
        let mut max_top = f64::NEG_INFINITY;

        for &piece_id in &self.order {
            if check_every_individual && token.is_cancelled() {
                break;
            }

            let piece = &pieces[piece_id];
            let idx = self.orientation[piece_id] % piece.orientations.len();
            let orientation = &piece.orientations[idx];

            match store.find_blf(orientation.width, orientation.height) {
                Some((x, y)) => {
                    store.insert_placement(x, y, orientation.width, orientation.height, gap);
                    min_y = min_y.min(y);
                    max_top = max_top.max(y + orientation.height);
                    placed.push(PlacedPiece {
                        placement_id: format!("placement-{piece_id}"),
                        design_id: piece.design_id.clone(),
                        x,
                        y,
                        width: orientation.width,
                        height: orientation.height,
                        rotation: orientation.rotation,
                        flipped: orientation.flipped,
                    });
                }
                None => unplaced.push(piece_id),
            }
        }

        for &piece_id in self.order.iter().skip(placed.len() + unplaced.len()) {
            unplaced.push(piece_id);
        }

        let bbox_height = if placed.is_empty() { 0.0 } else { max_top - min_y };

        Decoded {
            placed,
            unplaced,
            bbox_height,
        }
    }
}

/// Scores a decoded layout: higher is better. See the module-level
/// constants for the unplaced-count and bounding-box-height weights.
pub fn fitness(decoded: &Decoded, sheet_area: f64, sheet_height: f64) -> f64 {
    let used_area: f64 = decoded.placed.iter().map(PlacedPiece::area).sum();
    let base = if sheet_area > 0.0 {
        100.0 * used_area / sheet_area
    } else {
        0.0
    };
    let height_term = if sheet_height > 0.0 {
        BETA_HEIGHT_PENALTY * decoded.bbox_height / sheet_height
    } else {
        0.0
    };
    base - ALPHA_UNPLACED_PENALTY * decoded.unplaced.len() as f64 - height_term
}

/// Order-preserving crossover (OX): copies a random contiguous segment of
/// `a`'s order into the child, then fills the remaining positions with `b`'s
/// piece ids in `b`'s order, skipping ids already copied. Orientation genes
/// follow the donating parent for each piece id.
pub fn order_crossover(a: &Individual, b: &Individual, rng: &mut impl Rng) -> Individual {
    let len = a.order.len();
    if len == 0 {
        return a.clone();
    }

    let mut start = rng.gen_range(0..len);
    let mut end = rng.gen_range(0..len);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    let mut child_order = vec![None; len];
    let mut taken = fnv::FnvHashSet::default();
    for i in start..=end {
        child_order[i] = Some(a.order[i]);
        taken.insert(a.order[i]);
    }

    let mut fill = b.order.iter().filter(|id| !taken.contains(*id));
    for slot in child_order.iter_mut() {
        if slot.is_none() {
            *slot = fill.next().copied();
        }
    }

    let order: Vec<usize> = child_order.into_iter().map(|id| id.unwrap()).collect();

    let mut orientation = vec![0usize; a.orientation.len()];
    for (piece_id, slot) in orientation.iter_mut().enumerate() {
        *slot = if taken.contains(&piece_id) {
            a.orientation[piece_id]
        } else {
            b.orientation[piece_id]
        };
    }

    Individual { order, orientation }
}

/// Applies the two independent mutation operators, each gated by
/// `mutation_rate`: a positional swap, and an orientation redraw for one piece.
pub fn mutate(individual: &mut Individual, pieces: &[Piece], mutation_rate: f64, rng: &mut impl Rng) {
    if individual.order.len() >= 2 && rng.gen::<f64>() < mutation_rate {
        let i = rng.gen_range(0..individual.order.len());
        let j = rng.gen_range(0..individual.order.len());
        individual.order.swap(i, j);
    }

    if !pieces.is_empty() && rng.gen::<f64>() < mutation_rate {
        let piece_id = rng.gen_range(0..pieces.len());
        let allowed = pieces[piece_id].orientations.len();
        if allowed > 0 {
            individual.orientation[piece_id] = rng.gen_range(0..allowed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{SortBy, SortOrder};
    use crate::types::{Design, PieceRequest};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pieces(n: usize) -> Vec<Piece> {
        let requests: Vec<PieceRequest> = (0..n)
            .map(|i| PieceRequest {
                design: Design {
                    id: format!("d{i}"),
                    name: format!("d{i}"),
                    width: 100.0,
                    height: 50.0,
                },
                quantity: 1,
                priority: 0,
            })
            .collect();
        crate::piece::expand(&requests, true, false)
    }

    #[test]
    fn sorted_seed_follows_given_order() {
        let mut p = pieces(3);
        crate::piece::sort_pieces(&mut p, SortBy::Area, SortOrder::Desc);
        let seed = Individual::sorted_seed(&p);
        assert_eq!(seed.order, p.iter().map(|x| x.id).collect::<Vec<_>>());
        assert!(seed.orientation.iter().all(|&o| o == 0));
    }

    #[test]
    fn random_individual_is_a_permutation() {
        let p = pieces(6);
        let mut rng = StdRng::seed_from_u64(7);
        let individual = Individual::random(&p, &mut rng);
        let mut sorted = individual.order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn crossover_child_is_a_permutation_of_piece_ids() {
        let p = pieces(8);
        let mut rng = StdRng::seed_from_u64(3);
        let a = Individual::random(&p, &mut rng);
        let b = Individual::random(&p, &mut rng);
        let child = order_crossover(&a, &b, &mut rng);
        let mut sorted = child.order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn decode_places_non_overlapping_pieces() {
        let p = pieces(4);
        let individual = Individual::sorted_seed(&p);
        let mut store = FreeRectStore::new(1000.0, 1000.0, 0.0);
        let decoded = individual.decode(&p, &mut store, 2.0, &CancellationToken::new(), false);
        assert_eq!(decoded.placed.len(), 4);
        assert!(decoded.unplaced.is_empty());
    }

    #[test]
    fn mutation_rate_zero_is_a_no_op() {
        let p = pieces(5);
        let mut rng = StdRng::seed_from_u64(11);
        let mut individual = Individual::random(&p, &mut rng);
        let before = individual.clone();
        mutate(&mut individual, &p, 0.0, &mut rng);
        assert_eq!(before.order, individual.order);
        assert_eq!(before.orientation, individual.orientation);
    }
}
