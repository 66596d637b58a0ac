//! Per-run RNG construction: the genetic placer's randomness is scoped
//! to a single run rather than drawn from any process-global generator, so
//! that two runs with the same seed produce byte-identical output.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Builds a seeded [`StdRng`] for one run. Uses `seed` verbatim when given;
/// otherwise captures a wall-clock reading once, at construction time, and
/// seeds from that.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(wall_clock_seed);
    StdRng::seed_from_u64(seed)
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
