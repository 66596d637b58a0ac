//! Run options and their defaults and validation.

use crate::error::Error;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Which placer to run.
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "lowercase"))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Algorithm {
    /// Row-packing greedy heuristic.
    Greedy,
    /// Bottom-Left-Fill over a free-rectangle store.
    Blf,
    /// Generational evolutionary search.
    Genetic,
}

/// Key used to sort pieces before placement.
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "lowercase"))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SortBy {
    /// Piece area, width × height.
    Area,
    /// Piece perimeter, 2 × (width + height).
    Perimeter,
    /// Ratio of the longer side to the shorter side.
    Ratio,
    /// Request priority.
    Priority,
}

/// Sort direction.
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "lowercase"))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

/// Tunable parameters for a run. See for invariants and for defaults.
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Options {
    /// Whether a 90 degree rotation is an allowed orientation.
    pub allow_rotation: bool,
    /// Whether mirroring (producing the same bounding box, `flipped = true`) is allowed.
    pub allow_flipping: bool,
    /// Minimum gap maintained between any two placed pieces, in millimetres.
    pub minimum_gap: f64,
    /// Margin kept clear around the sheet's edge, in millimetres.
    pub edge_margin: f64,
    /// Maximum number of generations for the genetic placer.
    pub max_iterations: u32,
    /// Number of individuals in the genetic placer's population.
    pub population_size: usize,
    /// Per-gene mutation rate, in `[0.0, 1.0]`.
    pub mutation_rate: f64,
    /// Crossover rate, in `[0.0, 1.0]`.
    pub crossover_rate: f64,
    /// Wall-clock budget for the genetic placer, in seconds.
    pub time_limit_seconds: f64,
    /// Target utilisation ratio, in `[0.0, 1.0]`, that ends the genetic search early.
    pub quality_target: f64,
    /// Key used to sort pieces before placement.
    pub sort_by: SortBy,
    /// Sort direction.
    pub sort_order: SortOrder,
    /// Reserved for future nesting-in-holes support; must be `false`.
    pub enable_nesting: bool,
    /// Deterministic RNG seed for the genetic placer. `None` seeds from the wall clock.
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            allow_rotation: true,
            allow_flipping: false,
            minimum_gap: 2.0,
            edge_margin: 5.0,
            max_iterations: 1000,
            population_size: 50,
            mutation_rate: 0.1,
            crossover_rate: 0.8,
            time_limit_seconds: 300.0,
            quality_target: 0.85,
            sort_by: SortBy::Area,
            sort_order: SortOrder::Desc,
            enable_nesting: false,
            seed: None,
        }
    }
}

impl Options {
    /// Validates this set of options, returning `InvalidInput` describing the
    /// first violation found. Run once before any placement work.
    pub fn validate(&self) -> Result<(), Error> {
        let in_unit_range = |name: &str, value: f64| -> Result<(), Error> {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidInput(format!(
                    "{name} must be in [0.0, 1.0], got {value}"
                )));
            }
            Ok(())
        };

        in_unit_range("mutation_rate", self.mutation_rate)?;
        in_unit_range("crossover_rate", self.crossover_rate)?;
        in_unit_range("quality_target", self.quality_target)?;

        if self.minimum_gap < 0.0 {
            return Err(Error::InvalidInput(format!(
                "minimum_gap must be >= 0.0, got {}",
                self.minimum_gap
            )));
        }
        if self.edge_margin < 0.0 {
            return Err(Error::InvalidInput(format!(
                "edge_margin must be >= 0.0, got {}",
                self.edge_margin
            )));
        }
        if self.enable_nesting {
            return Err(Error::InvalidInput(
                "enable_nesting is reserved and must be false".to_string(),
            ));
        }
        if self.population_size == 0 {
            return Err(Error::InvalidInput(
                "population_size must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
