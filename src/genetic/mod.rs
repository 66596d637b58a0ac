//! Generational evolutionary placer: searches over orderings and
//! orientation choices, scoring each by decoding through Bottom-Left-Fill.

mod individual;
mod population;

pub use individual::{fitness, Decoded, Individual};

use tracing::{debug, trace};

use crate::cancel::{CancellationToken, Deadline};
use crate::free_rects::FreeRectStore;
use crate::layout::PlacedPiece;
use crate::options::Options;
use crate::piece::Piece;
use crate::rng::seeded_rng;

use self::population::Population;

/// Cancellation and deadline checks happen every individual, rather than
/// only between generations, once the population exceeds this size.
const PER_INDIVIDUAL_CHECK_THRESHOLD: usize = 64;

/// A scored individual, ranked best-first by [`compare_scored`]: fitness,
/// then fewer unplaced pieces, then a smaller bounding-box height.
pub(crate) type Scored = (Individual, f64, usize, f64);

/// Orders two scored individuals best-first: higher fitness wins; ties go to
/// fewer unplaced pieces, then to the smaller bounding-box height.
pub(crate) fn compare_scored(a: &Scored, b: &Scored) -> std::cmp::Ordering {
    b.1.partial_cmp(&a.1)
        .unwrap()
        .then_with(|| a.2.cmp(&b.2))
        .then_with(|| a.3.partial_cmp(&b.3).unwrap())
}

/// Outcome of a genetic placement pass.
pub struct GeneticResult {
    /// Pieces placed by the best individual found.
    pub placed: Vec<PlacedPiece>,
    /// Piece ids left unplaced by the best individual found.
    pub unplaced: Vec<usize>,
    /// Area of the largest free rectangle left by the best individual's decode.
    pub largest_waste_area: f64,
    /// Whether the search stopped early due to cancellation or its deadline.
    pub cancelled: bool,
}

fn decode_with_fresh_store(
    individual: &Individual,
    pieces: &[Piece],
    sheet_width: f64,
    sheet_height: f64,
    edge_margin: f64,
    gap: f64,
    token: &CancellationToken,
    check_every_individual: bool,
) -> (Decoded, FreeRectStore) {
    let mut store = FreeRectStore::new(sheet_width, sheet_height, edge_margin);
    let decoded = individual.decode(pieces, &mut store, gap, token, check_every_individual);
    (decoded, store)
}

/// Runs the generational search and returns the best layout found.
///
/// `pieces` must already be sorted per the caller's chosen key; the seed
/// individual follows that order directly, matching the greedy and BLF
/// placers' convention of sorting once up front.
pub fn place(
    pieces: &[Piece],
    sheet_width: f64,
    sheet_height: f64,
    edge_margin: f64,
    gap: f64,
    options: &Options,
    token: &CancellationToken,
) -> GeneticResult {
    let sheet_area = sheet_width * sheet_height;
    let check_every_individual = options.population_size > PER_INDIVIDUAL_CHECK_THRESHOLD;
    let deadline = Deadline::starting_now(options.time_limit_seconds);

    let mut rng = seeded_rng(options.seed);
    let mut population = Population::seed(pieces, options.population_size, &mut rng);

    let mut cancelled = false;
    let mut best: Option<(Individual, Decoded, FreeRectStore, f64, usize, f64)> = None;

    for generation in 0..options.max_iterations {
        if token.is_cancelled() || deadline.is_expired() {
            cancelled = true;
            break;
        }

        let mut scored: Vec<Scored> = Vec::with_capacity(population.len());
        for individual in population.individuals() {
            if check_every_individual && (token.is_cancelled() || deadline.is_expired()) {
                cancelled = true;
                break;
            }
            let (decoded, _store) = decode_with_fresh_store(
                individual,
                pieces,
                sheet_width,
                sheet_height,
                edge_margin,
                gap,
                token,
                check_every_individual,
            );
            let score = fitness(&decoded, sheet_area, sheet_height);
            scored.push((individual.clone(), score, decoded.unplaced.len(), decoded.bbox_height));
        }

        if cancelled {
            break;
        }

        scored.sort_by(compare_scored);

        let (top_individual, top_score, top_unplaced, top_bbox_height) = scored[0].clone();
        let (top_decoded, top_store) = decode_with_fresh_store(
            &top_individual,
            pieces,
            sheet_width,
            sheet_height,
            edge_margin,
            gap,
            token,
            false,
        );

        let top_scored: Scored = (top_individual.clone(), top_score, top_unplaced, top_bbox_height);
        let improved = best
            .as_ref()
            .map(|(individual, _, _, score, unplaced, bbox_height)| {
                let best_scored: Scored = (individual.clone(), *score, *unplaced, *bbox_height);
                compare_scored(&top_scored, &best_scored) == std::cmp::Ordering::Less
            })
            .unwrap_or(true);
        if improved {
            trace!(generation, fitness = top_score, "genetic placer improved");
            best = Some((top_individual, top_decoded, top_store, top_score, top_unplaced, top_bbox_height));
        }

        let utilisation = best
            .as_ref()
            .map(|(_, decoded, _, _, _, _)| {
                let used: f64 = decoded.placed.iter().map(PlacedPiece::area).sum();
                if sheet_area > 0.0 {
                    used / sheet_area
                } else {
                    0.0
                }
            })
            .unwrap_or(0.0);
        if utilisation >= options.quality_target {
            debug!(generation, utilisation, "genetic placer met quality target");
            break;
        }

        if generation + 1 == options.max_iterations {
            break;
        }

        population.advance_generation(&scored, options.crossover_rate, options.mutation_rate, pieces, &mut rng);
    }

    match best {
        Some((_, decoded, store, _, _, _)) => GeneticResult {
            placed: decoded.placed,
            unplaced: decoded.unplaced,
            largest_waste_area: store.largest_area(),
            cancelled,
        },
        None => GeneticResult {
            placed: Vec::new(),
            unplaced: pieces.iter().map(|p| p.id).collect(),
            largest_waste_area: 0.0,
            cancelled: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Design, PieceRequest};

    fn individual_with(order: Vec<usize>) -> Individual {
        Individual {
            orientation: vec![0; order.len()],
            order,
        }
    }

    #[test]
    fn compare_scored_ranks_by_fitness_first() {
        let better: Scored = (individual_with(vec![0]), 60.0, 3, 500.0);
        let worse: Scored = (individual_with(vec![0]), 40.0, 0, 10.0);
        assert_eq!(compare_scored(&better, &worse), std::cmp::Ordering::Less);
    }

    #[test]
    fn compare_scored_breaks_fitness_ties_by_fewer_unplaced() {
        let fewer_unplaced: Scored = (individual_with(vec![0]), 50.0, 1, 500.0);
        let more_unplaced: Scored = (individual_with(vec![0]), 50.0, 2, 10.0);
        assert_eq!(compare_scored(&fewer_unplaced, &more_unplaced), std::cmp::Ordering::Less);
    }

    #[test]
    fn compare_scored_breaks_remaining_ties_by_smaller_bbox_height() {
        let shorter: Scored = (individual_with(vec![0]), 50.0, 1, 100.0);
        let taller: Scored = (individual_with(vec![0]), 50.0, 1, 200.0);
        assert_eq!(compare_scored(&shorter, &taller), std::cmp::Ordering::Less);
    }

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
        crate::piece::expand(&requests, true, false)
    }

    #[test]
    fn improves_on_adversarial_order() {
        let p = pieces(&[(900.0, 100.0), (100.0, 900.0), (100.0, 900.0), (900.0, 100.0)]);
        let options = Options {
            max_iterations: 200,
            population_size: 40,
            seed: Some(42),
            ..Options::default()
        };
        let token = CancellationToken::new();
        let result = place(&p, 1000.0, 1000.0, 0.0, 0.0, &options, &token);
        assert_eq!(result.placed.len(), 4);
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let p = pieces(&[(300.0, 200.0), (250.0, 250.0), (150.0, 400.0)]);
        let options = Options {
            max_iterations: 20,
            population_size: 16,
            seed: Some(99),
            ..Options::default()
        };
        let token = CancellationToken::new();
        let a = place(&p, 1000.0, 1000.0, 0.0, 0.0, &options, &token);
        let b = place(&p, 1000.0, 1000.0, 0.0, 0.0, &options, &token);
        let coords_a: Vec<(f64, f64)> = a.placed.iter().map(|p| (p.x, p.y)).collect();
        let coords_b: Vec<(f64, f64)> = b.placed.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(coords_a, coords_b);
    }

    #[test]
    fn cancellation_before_any_generation_yields_cancelled_result() {
        let p = pieces(&[(100.0, 100.0)]);
        let options = Options {
            max_iterations: 50,
            population_size: 10,
            seed: Some(1),
            ..Options::default()
        };
        let token = CancellationToken::new();
        token.cancel();
        let result = place(&p, 1000.0, 1000.0, 0.0, 0.0, &options, &token);
        assert!(result.cancelled);
    }
}
