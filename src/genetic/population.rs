//! Tournament selection, elitism, and generational advancement over a set of
//! [`Individual`](super::Individual) chromosomes.

use rand::Rng;

use super::individual::{mutate, order_crossover, Individual};
use super::{compare_scored, Scored};
use crate::piece::Piece;

const TOURNAMENT_SIZE: usize = 3;

/// A fixed-size collection of individuals advanced one generation at a time.
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Builds the initial population: one sorted-by-area-desc seed individual
    /// following `pieces`' given order, the rest uniform-random permutations
    /// with uniform-random orientation choices.
    pub fn seed(pieces: &[Piece], size: usize, rng: &mut impl Rng) -> Self {
        let mut individuals = Vec::with_capacity(size.max(1));
        individuals.push(Individual::sorted_seed(pieces));
        for _ in 1..size {
            individuals.push(Individual::random(pieces, rng));
        }
        Self { individuals }
    }

    /// Number of individuals in this population.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether this population holds no individuals.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// The current individuals, in insertion order (not fitness order).
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Tournament selection of size 3, with replacement: draws 3 individuals
    /// uniformly at random from `scored` and returns the fittest, breaking
    /// ties by fewer unplaced pieces then by smaller bounding-box height.
    fn tournament_select<'a>(scored: &'a [Scored], rng: &mut impl Rng) -> &'a Individual {
        let mut best: Option<&Scored> = None;
        for _ in 0..TOURNAMENT_SIZE {
            let candidate = &scored[rng.gen_range(0..scored.len())];
            best = match best {
                Some(current) if compare_scored(current, candidate) != std::cmp::Ordering::Greater => Some(current),
                _ => Some(candidate),
            };
        }
        &best.unwrap().0
    }

    /// Produces the next generation in place: the top `ceil(len/4)`
    /// individuals from `scored` (already sorted best-first by
    /// [`compare_scored`]) survive unchanged, and the rest are bred via
    /// tournament selection, order crossover, and mutation.
    pub fn advance_generation(
        &mut self,
        scored: &[Scored],
        crossover_rate: f64,
        mutation_rate: f64,
        pieces: &[Piece],
        rng: &mut impl Rng,
    ) {
        let elite_count = (scored.len() as f64 / 4.0).ceil() as usize;
        let mut next = Vec::with_capacity(scored.len());
        next.extend(scored.iter().take(elite_count).map(|(ind, _, _, _)| ind.clone()));

        while next.len() < scored.len() {
            let parent_a = Self::tournament_select(scored, rng);
            let parent_b = Self::tournament_select(scored, rng);

            let mut child = if rng.gen::<f64>() < crossover_rate {
                order_crossover(parent_a, parent_b, rng)
            } else {
                parent_a.clone()
            };

            mutate(&mut child, pieces, mutation_rate, rng);
            next.push(child);
        }

        self.individuals = next;
    }
}
