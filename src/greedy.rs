//! Greedy corner-pushing strategy.
//!
//! Seeds the board with the first shape's origin-covering rotation, then
//! commits one totem per step: for every remaining kind and rotation, the
//! rotation is aligned against the board's top and right edges and pushed
//! up or right until it fits. The candidate with the best tentative score
//! wins; ties keep the first one found.

use crate::error::SolveError;
use crate::geometry::{edge_candidates, has_negative};
use crate::grid::Board;
use crate::pieces::{Cells, Placement, ShapeBag, ShapeKind};
use crate::PackingStrategy;

/// A legal placement for the next step along with its tentative score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub shape: ShapeKind,
    pub cells: Cells,
    pub score: f64,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyStrategy;

impl GreedyStrategy {
    /// Lists every non-negative candidate for the next step in scan order:
    /// remaining kinds, then catalog rotations, then the four pushes.
    pub fn candidates(board: &Board, remaining: &ShapeBag) -> Vec<Candidate> {
        let Some(extents) = board.extents() else {
            return Vec::new();
        };

        let mut candidates = Vec::new();
        for shape in remaining.kinds() {
            for variant in shape.variants() {
                for cells in edge_candidates(board, variant, extents).into_iter().flatten() {
                    if has_negative(&cells) {
                        continue;
                    }
                    candidates.push(Candidate {
                        shape,
                        cells,
                        score: board.tentative_score(&cells),
                    });
                }
            }
        }
        candidates
    }

    /// The highest-scoring candidate, first one on ties.
    pub fn best_candidate(board: &Board, remaining: &ShapeBag) -> Option<Candidate> {
        Self::candidates(board, remaining)
            .into_iter()
            .fold(None, |best: Option<Candidate>, candidate| match best {
                Some(best) if candidate.score <= best.score => Some(best),
                _ => Some(candidate),
            })
    }
}

impl PackingStrategy for GreedyStrategy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn pack(&self, shapes: &[ShapeKind]) -> Result<Vec<Placement>, SolveError> {
        let (&first, rest) = shapes.split_first().ok_or(SolveError::EmptyInput)?;
        let seed = first
            .origin_variant()
            .ok_or(SolveError::NoOriginVariant(first))?;

        let mut board = Board::unbounded();
        let mut placements = Vec::with_capacity(shapes.len());
        board.mark(&seed.cells);
        placements.push(Placement::new(first, seed.cells));

        let mut remaining = ShapeBag::from_shapes(rest);
        while !remaining.is_empty() {
            let best = Self::best_candidate(&board, &remaining).ok_or(SolveError::NoCandidate {
                remaining: remaining.len(),
            })?;

            log::debug!(
                "greedy: step {} commits {} at {:?} (score {:.3})",
                placements.len(),
                best.shape,
                best.cells,
                best.score
            );
            remaining.remove(best.shape);
            board.mark(&best.cells);
            placements.push(Placement::new(best.shape, best.cells));
        }

        Ok(placements)
    }
}
