//! Error type for the nesting core.
//!
//! `Cancelled` is deliberately not a variant here: a cancelled run is a successful
//! [`crate::RunResult`] with `cancelled = true`, not an `Err`.

use thiserror::Error;

/// Error while preparing or running an optimization.
#[derive(Debug, Error)]
pub enum Error {
    /// Empty pieces list, non-positive dimensions, unknown algorithm, or an
    /// out-of-range option value.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The edge margin leaves a non-positive usable sheet area.
    #[error("infeasible sheet: usable area is {usable_width}x{usable_height} after edge margin")]
    InfeasibleSheet {
        /// Usable width after subtracting edge margin from both sides.
        usable_width: f64,
        /// Usable height after subtracting edge margin from both sides.
        usable_height: f64,
    },

    /// An invariant was violated after placement (overlap, out-of-bounds). This
    /// indicates a bug in the core and is fatal for the run.
    #[error("internal invariant violated: {0}")]
    Internal(String),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
