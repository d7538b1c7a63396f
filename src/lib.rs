//! Totem Packing Library
//!
//! Places a sequence of tetromino totems on the non-negative quadrant of an
//! integer grid, without overlap, to maximize a compactness score. Four
//! independent strategies are provided, plus a selector that runs several
//! and keeps the best packing.

pub mod error;
pub mod geometry;
pub mod greedy;
pub mod grid;
pub mod pieces;
pub mod rectangle;
pub mod scoring;
pub mod search;
pub mod solver;
pub mod touchpoint;

pub use error::{ParseShapeError, SolveError};
pub use pieces::{Coord, Placement, ShapeKind};
pub use scoring::{score, validate, Violation};
pub use solver::{Solver, SolverConfig, StrategyKind};

/// A placement strategy, usable behind a trait object.
///
/// Every call starts from an empty board and shares no state with earlier
/// calls. A successful result holds exactly one placement per input shape,
/// the first of which covers (0, 0).
pub trait PackingStrategy {
    fn name(&self) -> &'static str;
    fn pack(&self, shapes: &[ShapeKind]) -> Result<Vec<Placement>, SolveError>;
}

/// Packs `shapes` with the default solver configuration.
pub fn solve(shapes: &[ShapeKind]) -> Result<Vec<Placement>, SolveError> {
    Solver::default().solve(shapes)
}
