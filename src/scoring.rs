//! Packing score and post-hoc consistency checks.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use crate::pieces::{Coord, Placement, CELLS_PER_TOTEM};

/// Nominal points awarded per placed totem.
const POINTS_PER_TOTEM: i64 = 10;

/// Scores a packing from its totem count and the max corner of its
/// bounding box.
///
/// `(10 * count - side1 * side2) * min(side1, side2) / max(side1, side2)`
/// where the sides are `max_x + 1` and `max_y + 1`.
pub fn score_dims(count: usize, (max_x, max_y): Coord) -> f64 {
    let side1 = i64::from(max_x) + 1;
    let side2 = i64::from(max_y) + 1;
    let net = POINTS_PER_TOTEM * count as i64 - side1 * side2;
    net as f64 * side1.min(side2) as f64 / side1.max(side2) as f64
}

/// Scores a packing. An empty packing scores 0.
pub fn score(placements: &[Placement]) -> f64 {
    let corner = placements
        .iter()
        .flat_map(|placement| placement.cells().iter().copied())
        .reduce(|(mx, my), (x, y)| (mx.max(x), my.max(y)));

    match corner {
        Some(corner) => score_dims(placements.len(), corner),
        None => 0.0,
    }
}

/// Rectangles `(width, height)` with room for the cells of `count` totems,
/// best score first.
///
/// Every width from 1 up to twice the smallest covering square side (and at
/// least 4, so a straight I fits) is paired with the shortest height that
/// covers the cells, and every covering square in that range is listed too.
/// Rectangles with equal scores stay in order of increasing width.
pub fn candidate_dims(count: usize) -> Vec<Coord> {
    let cells = (count * CELLS_PER_TOTEM) as i32;
    let mut square = 0;
    while square * square < cells {
        square += 1;
    }
    let max_side = (2 * square).max(4);

    let mut dims = BTreeSet::new();
    for len in 1..=max_side {
        if len * len >= cells {
            dims.insert((len, len));
        }
        dims.insert((len, (cells + len - 1) / len));
    }

    let mut dims: Vec<Coord> = dims.into_iter().collect();
    dims.sort_by(|&(w1, h1), &(w2, h2)| {
        score_dims(count, (w2 - 1, h2 - 1)).total_cmp(&score_dims(count, (w1 - 1, h1 - 1)))
    });
    dims
}

/// A broken packing invariant found by [`validate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("cell {cell:?} is covered by totems {first} and {second}")]
    DuplicateCell {
        cell: Coord,
        first: usize,
        second: usize,
    },
    #[error("totem {index} has negative cell {cell:?}")]
    NegativeCoordinate { index: usize, cell: Coord },
    #[error("no totem covers (0, 0)")]
    MissingOrigin,
}

/// Checks a finished packing for overlapping cells, negative coordinates
/// and an uncovered origin. Only reports; the packing is never altered.
pub fn validate(placements: &[Placement]) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut owners: FxHashMap<Coord, usize> = FxHashMap::default();

    for (index, placement) in placements.iter().enumerate() {
        for &cell in placement.cells() {
            if cell.0 < 0 || cell.1 < 0 {
                violations.push(Violation::NegativeCoordinate { index, cell });
            }
            if let Some(&first) = owners.get(&cell) {
                violations.push(Violation::DuplicateCell {
                    cell,
                    first,
                    second: index,
                });
            } else {
                owners.insert(cell, index);
            }
        }
    }

    if !placements.is_empty() && !owners.contains_key(&(0, 0)) {
        violations.push(Violation::MissingOrigin);
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::ShapeKind;

    #[test]
    fn test_score_single_horizontal_i() {
        let placements = [Placement::new(ShapeKind::I, [(0, 0), (1, 0), (2, 0), (3, 0)])];
        assert_eq!(score(&placements), 1.5);
    }

    #[test]
    fn test_score_empty_is_zero() {
        assert_eq!(score(&[]), 0.0);
    }

    #[test]
    fn test_score_two_squares_side_by_side() {
        let placements = [
            Placement::new(ShapeKind::O, [(0, 0), (1, 0), (0, 1), (1, 1)]),
            Placement::new(ShapeKind::O, [(2, 0), (3, 0), (2, 1), (3, 1)]),
        ];
        assert_eq!(score(&placements), 6.0);
        assert_eq!(score_dims(2, (3, 1)), 6.0);
    }

    #[test]
    fn test_score_can_go_negative() {
        // a single totem in a 5x5 box wastes more than it earns
        assert_eq!(score_dims(1, (4, 4)), -15.0);
    }

    #[test]
    fn test_candidate_dims_for_one_totem() {
        assert_eq!(candidate_dims(1), vec![(2, 2), (3, 2), (1, 4), (4, 1), (4, 4)]);
    }

    #[test]
    fn test_candidate_dims_are_ordered_by_score() {
        let dims = candidate_dims(2);
        assert_eq!(dims[..3], [(3, 3), (2, 4), (4, 2)]);
        assert_eq!(dims.len(), 9);
        for pair in dims.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(score_dims(2, (a.0 - 1, a.1 - 1)) >= score_dims(2, (b.0 - 1, b.1 - 1)));
        }
        for (width, height) in candidate_dims(5) {
            assert!(width * height >= 20);
        }
    }

    #[test]
    fn test_validate_clean_packing() {
        let placements = [
            Placement::new(ShapeKind::O, [(0, 0), (1, 0), (0, 1), (1, 1)]),
            Placement::new(ShapeKind::I, [(2, 0), (2, 1), (2, 2), (2, 3)]),
        ];
        assert!(validate(&placements).is_empty());
    }

    #[test]
    fn test_validate_reports_every_violation() {
        let placements = [
            Placement::new(ShapeKind::O, [(1, 0), (2, 0), (1, 1), (2, 1)]),
            Placement::new(ShapeKind::I, [(2, 1), (2, 2), (2, 3), (2, 4)]),
            Placement::new(ShapeKind::I, [(-1, 5), (0, 5), (1, 5), (2, 5)]),
        ];
        let violations = validate(&placements);
        assert_eq!(
            violations,
            vec![
                Violation::DuplicateCell {
                    cell: (2, 1),
                    first: 0,
                    second: 1
                },
                Violation::NegativeCoordinate {
                    index: 2,
                    cell: (-1, 5)
                },
                Violation::MissingOrigin,
            ]
        );
        assert_eq!(violations[0].to_string(), "cell (2, 1) is covered by totems 0 and 1");
    }
}
