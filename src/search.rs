//! Best-first search over partial packings.
//!
//! Nodes are partial packings. Moving from a parent to a child costs
//! `score(parent) - score(child)`, so the cheapest path to a node is the
//! negated score of that node and the first complete packing popped is the
//! best-scoring one discovered so far. There is no heuristic estimate, so
//! this is uniform-cost search and its frontier grows exponentially with the
//! number of shapes. The optional expansion budget bounds the work.
//!
//! Successor states are built as independent copies of their parent, so
//! exploring one branch never disturbs a sibling.

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

use rustc_hash::FxHashSet;

use crate::error::SolveError;
use crate::geometry::{has_negative, max_corner, move_reference_to};
use crate::pieces::{Cells, Coord, Placement, ShapeBag, ShapeKind};
use crate::scoring::score_dims;
use crate::PackingStrategy;

/// Node expansions allowed by [`ExhaustiveSearch::default`].
pub const DEFAULT_SEARCH_BUDGET: usize = 20_000;

/// Identifies states that lead to the same futures at the same score.
type StateKey = (ShapeBag, Vec<Coord>);

/// A partial packing.
#[derive(Clone, Debug)]
struct PackingState {
    remaining: ShapeBag,
    /// Every covered cell, for O(1) overlap checks.
    used: FxHashSet<Coord>,
    /// Uncovered cells inside the bounding box.
    holes: BTreeSet<Coord>,
    /// Max x and max y over covered cells; `None` before the first totem.
    extents: Option<Coord>,
    placements: Vec<Placement>,
}

impl PackingState {
    fn root(shapes: &[ShapeKind]) -> Self {
        Self {
            remaining: ShapeBag::from_shapes(shapes),
            used: FxHashSet::default(),
            holes: BTreeSet::new(),
            extents: None,
            placements: Vec::with_capacity(shapes.len()),
        }
    }

    fn score(&self) -> f64 {
        self.extents
            .map_or(0.0, |corner| score_dims(self.placements.len(), corner))
    }

    fn is_goal(&self) -> bool {
        self.remaining.is_empty()
    }

    fn accepts(&self, cells: &Cells) -> bool {
        !has_negative(cells) && cells.iter().all(|cell| !self.used.contains(cell))
    }

    fn key(&self) -> StateKey {
        let mut cells: Vec<Coord> = self.used.iter().copied().collect();
        cells.sort_unstable();
        (self.remaining, cells)
    }

    /// Every placement that may be committed next, in scan order.
    ///
    /// The first totem must cover the origin, so the root only offers the
    /// origin-covering rotations. Later states offer each rotation with its
    /// reference cell on a hole, then on the band above the top edge, then on
    /// the band right of the right edge.
    fn successors(&self) -> Vec<(ShapeKind, Cells)> {
        let mut moves = Vec::new();

        let Some((max_x, max_y)) = self.extents else {
            for shape in self.remaining.kinds() {
                for variant in shape.variants().iter().filter(|v| v.contains_origin()) {
                    moves.push((shape, variant.cells));
                }
            }
            return moves;
        };

        for shape in self.remaining.kinds() {
            for variant in shape.variants() {
                let mut offer = |target: Coord| {
                    let cells = move_reference_to(&variant.cells, target);
                    if self.accepts(&cells) {
                        moves.push((shape, cells));
                    }
                };

                for &hole in &self.holes {
                    offer(hole);
                }
                // along the top
                for x in 0..=max_x {
                    for y in max_y + 1..=max_y + variant.height {
                        offer((x, y));
                    }
                }
                // along the right
                for y in 0..=max_y {
                    for x in max_x + 1..=max_x + variant.width {
                        offer((x, y));
                    }
                }
            }
        }
        moves
    }

    /// The state reached by committing `cells` as a totem of kind `shape`.
    ///
    /// Cells that enter the bounding box without being covered become holes;
    /// holes covered by the new totem are dropped.
    fn with_placement(&self, shape: ShapeKind, cells: Cells) -> Self {
        let (cell_x, cell_y) = max_corner(&cells);
        let (max_x, max_y) = match self.extents {
            Some((old_x, old_y)) => (old_x.max(cell_x), old_y.max(cell_y)),
            None => (cell_x, cell_y),
        };

        let mut holes = self.holes.clone();
        for x in 0..=max_x {
            for y in 0..=max_y {
                let was_inside = self
                    .extents
                    .is_some_and(|(old_x, old_y)| x <= old_x && y <= old_y);
                if !was_inside && !cells.contains(&(x, y)) {
                    holes.insert((x, y));
                }
            }
        }
        for cell in &cells {
            holes.remove(cell);
        }

        let mut used = self.used.clone();
        used.extend(cells);

        let mut remaining = self.remaining;
        remaining.remove(shape);

        let mut placements = self.placements.clone();
        placements.push(Placement::new(shape, cells));

        Self {
            remaining,
            used,
            holes,
            extents: Some((max_x, max_y)),
            placements,
        }
    }
}

/// Frontier entry. The heap pops the lowest cost first, then the earliest
/// pushed.
struct Frontier {
    cost: f64,
    order: u64,
    state: PackingState,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

#[derive(Clone, Copy, Debug)]
pub struct ExhaustiveSearch {
    max_expansions: Option<usize>,
}

impl Default for ExhaustiveSearch {
    fn default() -> Self {
        Self::new(Some(DEFAULT_SEARCH_BUDGET))
    }
}

impl ExhaustiveSearch {
    /// `None` lets the search run until a goal is found or the frontier
    /// empties.
    pub fn new(max_expansions: Option<usize>) -> Self {
        Self { max_expansions }
    }
}

impl PackingStrategy for ExhaustiveSearch {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn pack(&self, shapes: &[ShapeKind]) -> Result<Vec<Placement>, SolveError> {
        if shapes.is_empty() {
            return Err(SolveError::EmptyInput);
        }

        let root = PackingState::root(shapes);
        let mut seen: FxHashSet<StateKey> = FxHashSet::default();
        seen.insert(root.key());

        let mut frontier = BinaryHeap::new();
        let mut pushed = 0u64;
        frontier.push(Frontier {
            cost: 0.0,
            order: pushed,
            state: root,
        });

        let mut expansions = 0usize;
        while let Some(Frontier { cost, state, .. }) = frontier.pop() {
            if state.is_goal() {
                log::debug!(
                    "exhaustive: reached a complete packing after {expansions} expansions ({} states queued)",
                    frontier.len()
                );
                return Ok(state.placements);
            }
            if self.max_expansions.is_some_and(|limit| expansions >= limit) {
                return Err(SolveError::SearchBudgetExceeded { expansions });
            }
            expansions += 1;

            let parent_score = state.score();
            for (shape, cells) in state.successors() {
                let child = state.with_placement(shape, cells);
                // skip if another path already reached this exact packing
                if !seen.insert(child.key()) {
                    continue;
                }
                pushed += 1;
                frontier.push(Frontier {
                    cost: cost + (parent_score - child.score()),
                    order: pushed,
                    state: child,
                });
            }

            if expansions % 1_000 == 0 {
                log::debug!(
                    "exhaustive: {expansions} expansions, {} states queued",
                    frontier.len()
                );
            }
        }

        Err(SolveError::SearchExhausted { expansions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{score, validate};

    #[test]
    fn test_single_shape_is_first_origin_rotation() {
        let placements = ExhaustiveSearch::default().pack(&[ShapeKind::I]).unwrap();
        assert_eq!(
            placements,
            vec![Placement::new(ShapeKind::I, [(0, 0), (1, 0), (2, 0), (3, 0)])]
        );
        assert_eq!(score(&placements), 1.5);
    }

    #[test]
    fn test_two_squares() {
        let placements = ExhaustiveSearch::default()
            .pack(&[ShapeKind::O, ShapeKind::O])
            .unwrap();
        assert_eq!(placements[0].cells(), &[(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(placements[1].cells(), &[(0, 2), (1, 2), (0, 3), (1, 3)]);
        assert_eq!(score(&placements), 6.0);
    }

    #[test]
    fn test_three_shapes_are_packed_validly() {
        use ShapeKind::*;
        let shapes = [L, J, O];
        let placements = ExhaustiveSearch::default().pack(&shapes).unwrap();

        assert_eq!(placements.len(), 3);
        assert!(placements[0].contains((0, 0)));
        assert!(validate(&placements).is_empty());
    }

    #[test]
    fn test_budget_is_enforced() {
        let result = ExhaustiveSearch::new(Some(0)).pack(&[ShapeKind::O, ShapeKind::O]);
        assert_eq!(result, Err(SolveError::SearchBudgetExceeded { expansions: 0 }));
    }

    #[test]
    fn test_root_offers_only_origin_rotations() {
        let root = PackingState::root(&[ShapeKind::T, ShapeKind::S]);
        let moves = root.successors();
        assert_eq!(
            moves,
            vec![
                (ShapeKind::S, ShapeKind::S.variants()[1].cells),
                (ShapeKind::T, ShapeKind::T.variants()[0].cells),
                (ShapeKind::T, ShapeKind::T.variants()[1].cells),
            ]
        );
    }

    #[test]
    fn test_holes_follow_the_bounding_box() {
        let root = PackingState::root(&[ShapeKind::L, ShapeKind::I, ShapeKind::O]);
        let l = root.with_placement(ShapeKind::L, [(0, 0), (1, 0), (0, 1), (0, 2)]);
        assert_eq!(l.holes, BTreeSet::from([(1, 1), (1, 2)]));
        assert_eq!(l.extents, Some((1, 2)));

        let li = l.with_placement(ShapeKind::I, [(2, 0), (3, 0), (4, 0), (5, 0)]);
        assert_eq!(li.extents, Some((5, 2)));
        assert_eq!(li.holes.len(), 10);
        assert!(li.holes.contains(&(5, 2)));
        assert!(!li.holes.contains(&(3, 0)));

        // the parent is untouched by its child
        assert_eq!(l.holes.len(), 2);
        assert_eq!(l.used.len(), 4);

        let filled = li.with_placement(ShapeKind::O, [(1, 1), (2, 1), (1, 2), (2, 2)]);
        assert_eq!(filled.holes.len(), 6);
        assert!(!filled.holes.contains(&(1, 1)));
    }

    #[test]
    fn test_successors_fill_holes_without_overlap() {
        let root = PackingState::root(&[ShapeKind::L, ShapeKind::O]);
        let l = root.with_placement(ShapeKind::L, [(0, 0), (1, 0), (0, 1), (0, 2)]);
        let moves = l.successors();

        assert_eq!(moves[0], (ShapeKind::O, [(1, 1), (2, 1), (1, 2), (2, 2)]));
        for (_, cells) in &moves {
            assert!(l.accepts(cells));
        }
        assert!(moves.iter().all(|(shape, _)| *shape == ShapeKind::O));
    }
}
