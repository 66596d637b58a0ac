//! glass-nest-core computes non-overlapping placements of rectangular glass
//! pieces onto a stock sheet, derives a deterministic cutting-path plan from
//! the placement, and reports utilisation statistics. Three interchangeable
//! placers are offered: a row-packing greedy heuristic, Bottom-Left-Fill over
//! a maximal-free-rectangle decomposition, and a generational evolutionary
//! search.
//!
//! ```
//! use glass_nest_core::{Design, Optimizer, PieceRequest, Sheet};
//!
//! let mut optimizer = Optimizer::new(Sheet {
//!     width: 1000.0,
//!     height: 1000.0,
//!     thickness: 4.0,
//! });
//! optimizer.add_piece(PieceRequest {
//!     design: Design {
//!         id: "panel-a".to_string(),
//!         name: "Panel A".to_string(),
//!         width: 400.0,
//!         height: 300.0,
//!     },
//!     quantity: 1,
//!     priority: 0,
//! });
//!
//! let result = optimizer.run(glass_nest_core::Algorithm::Greedy).unwrap();
//! assert_eq!(result.layout.placed_pieces.len(), 1);
//! ```

#![deny(missing_docs)]

mod blf;
mod cancel;
mod cutpath;
mod error;
mod free_rects;
mod genetic;
mod geometry;
mod greedy;
mod layout;
mod options;
mod piece;
mod rng;
mod stats;
mod types;


use std::time::Instant;

use tracing::{info, warn};

pub use cancel::CancellationToken;
pub use cutpath::{CutPath, CutPathType, Point};
pub use error::{Error, Result};
pub use layout::{Layout, PlacedPiece, RunResult};
pub use options::{Algorithm, Options, SortBy, SortOrder};
pub use stats::Statistics;
pub use types::{Design, PieceRequest, Sheet};

/// Builds and runs an optimization over a fixed sheet and set of piece requests.
pub struct Optimizer {
    sheet: Sheet,
    requests: Vec<PieceRequest>,
    options: Options,
}

impl Optimizer {
    /// Creates a new optimizer for `sheet` with default options and no requested pieces.
    pub fn new(sheet: Sheet) -> Self {
        Self {
            sheet,
            requests: Vec::new(),
            options: Options::default(),
        }
    }

    /// Adds a single piece request.
    pub fn add_piece(&mut self, request: PieceRequest) -> &mut Self {
        self.requests.push(request);
        self
    }

    /// Adds every piece request in `requests`.
    pub fn add_pieces<I: IntoIterator<Item = PieceRequest>>(&mut self, requests: I) -> &mut Self {
        self.requests.extend(requests);
        self
    }

    /// Replaces the run options wholesale.
    pub fn set_options(&mut self, options: Options) -> &mut Self {
        self.options = options;
        self
    }

    /// Runs `algorithm` to completion, or until `token` is cancelled.
    pub fn run_cancellable(
        &self,
        algorithm: Algorithm,
        token: &CancellationToken,
    ) -> Result<RunResult> {
        let started_at = Instant::now();

        self.options.validate()?;
        if self.requests.is_empty() {
            return Err(Error::InvalidInput("pieces list must not be empty".to_string()));
        }
        for request in &self.requests {
            if request.design.width <= 0.0 || request.design.height <= 0.0 {
                return Err(Error::InvalidInput(format!(
                    "design {} has non-positive dimensions",
                    request.design.id
                )));
            }
            if request.quantity == 0 {
                return Err(Error::InvalidInput(format!(
                    "design {} has zero quantity",
                    request.design.id
                )));
            }
        }
        if self.sheet.width <= 0.0 || self.sheet.height <= 0.0 || self.sheet.thickness <= 0.0 {
            return Err(Error::InvalidInput("sheet dimensions must be positive".to_string()));
        }

        let usable_width = self.sheet.width - 2.0 * self.options.edge_margin;
        let usable_height = self.sheet.height - 2.0 * self.options.edge_margin;
        if usable_width <= 0.0 || usable_height <= 0.0 {
            return Err(Error::InfeasibleSheet {
                usable_width,
                usable_height,
            });
        }

        let mut pieces = piece::expand(
            &self.requests,
            self.options.allow_rotation,
            self.options.allow_flipping,
        );
        piece::sort_pieces(&mut pieces, self.options.sort_by, self.options.sort_order);

        let total_requested: usize = self.requests.iter().map(|r| r.quantity).sum();
        let theoretical_area: f64 = self
            .requests
            .iter()
            .map(|r| r.design.width * r.design.height * r.quantity as f64)
            .sum();

        info!(
            algorithm = ?algorithm,
            piece_count = pieces.len(),
            "starting optimization run"
        );

        let (placed, unplaced, largest_waste_area, cancelled) = match algorithm {
            Algorithm::Greedy => {
                let result = greedy::place(
                    &pieces,
                    self.sheet.width,
                    self.sheet.height,
                    self.options.edge_margin,
                    self.options.minimum_gap,
                    token,
                );
                (result.placed, result.unplaced, None, result.cancelled)
            }
            Algorithm::Blf => {
                let mut store = free_rects::FreeRectStore::new(
                    self.sheet.width,
                    self.sheet.height,
                    self.options.edge_margin,
                );
                let result = blf::place(&pieces, &mut store, self.options.minimum_gap, token);
                (
                    result.placed,
                    result.unplaced,
                    Some(result.largest_waste_area),
                    result.cancelled,
                )
            }
            Algorithm::Genetic => {
                let result = genetic::place(
                    &pieces,
                    self.sheet.width,
                    self.sheet.height,
                    self.options.edge_margin,
                    self.options.minimum_gap,
                    &self.options,
                    token,
                );
                (
                    result.placed,
                    result.unplaced,
                    Some(result.largest_waste_area),
                    result.cancelled,
                )
            }
        };

        if placed.is_empty() && cancelled {
            warn!("run cancelled before any placement");
        }

        validate_placement_invariants(&placed, &self.sheet, &self.options)?;

        let cut_paths = cutpath::generate(&placed);
        let statistics = stats::compute(
            &self.sheet,
            &placed,
            unplaced.len(),
            &cut_paths,
            theoretical_area,
            largest_waste_area,
        );

        debug_assert_eq!(placed.len() + unplaced.len(), total_requested);

        let layout = Layout {
            sheet: self.sheet,
            placed_pieces: placed,
            cut_paths,
            statistics,
        };

        Ok(RunResult {
            layout,
            execution_time_seconds: started_at.elapsed().as_secs_f64(),
            cancelled,
        })
    }

    /// Runs `algorithm` to completion with no cancellation source.
    pub fn run(&self, algorithm: Algorithm) -> Result<RunResult> {
        self.run_cancellable(algorithm, &CancellationToken::new())
    }
}

/// Checks the non-overlap and in-bounds invariants post-placement. A
/// violation indicates a bug in one of the placers, not a recoverable
/// condition, so it is reported as `Error::Internal` rather than folded into
/// the placed/unplaced counts.
fn validate_placement_invariants(
    placed: &[PlacedPiece],
    sheet: &Sheet,
    options: &Options,
) -> Result<()> {
    for p in placed {
        if p.x < options.edge_margin
            || p.y < options.edge_margin
            || p.right() > sheet.width - options.edge_margin + f64::EPSILON
            || p.top() > sheet.height - options.edge_margin + f64::EPSILON
        {
            return Err(Error::Internal(format!(
                "placement {} out of bounds",
                p.placement_id
            )));
        }
    }

    for i in 0..placed.len() {
        for j in (i + 1)..placed.len() {
            let a = geometry::Rect::new(placed[i].x, placed[i].y, placed[i].width, placed[i].height);
            let b = geometry::Rect::new(placed[j].x, placed[j].y, placed[j].width, placed[j].height);
            let exclusion = b.inflate(options.minimum_gap);
            if geometry::intersects(&a, &exclusion) {
                return Err(Error::Internal(format!(
                    "placements {} and {} violate the minimum gap",
                    placed[i].placement_id, placed[j].placement_id
                )));
            }
        }
    }

    Ok(())
}
