//! Translation primitives shared by every placement strategy.
//!
//! Totems are never rotated here (the catalog already lists every rotation);
//! they are only moved by integer offsets, either onto a target cell or step
//! by step until they stop overlapping the board.

use crate::grid::Board;
use crate::pieces::{Cells, Coord, Variant};

/// Unit direction a totem is pushed in while looking for a free spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Right,
}

impl Step {
    #[inline]
    pub const fn delta(self) -> Coord {
        match self {
            Step::Up => (0, 1),
            Step::Right => (1, 0),
        }
    }
}

/// Moves every cell by `(dx, dy)`.
#[inline]
pub fn translate(cells: &Cells, (dx, dy): Coord) -> Cells {
    cells.map(|(x, y)| (x + dx, y + dy))
}

/// Moves the cells so the reference (first) cell lands on `target`.
#[inline]
pub fn move_reference_to(cells: &Cells, target: Coord) -> Cells {
    let (rx, ry) = cells[0];
    translate(cells, (target.0 - rx, target.1 - ry))
}

#[inline]
pub fn has_negative(cells: &[Coord]) -> bool {
    cells.iter().any(|&(x, y)| x < 0 || y < 0)
}

/// Largest x and largest y over `cells`.
#[inline]
pub fn max_corner(cells: &Cells) -> Coord {
    cells
        .iter()
        .fold((i32::MIN, i32::MIN), |(mx, my), &(x, y)| (mx.max(x), my.max(y)))
}

/// Translates coordinates so the minimum x and y values are both zero.
pub fn normalize_to_origin(cells: Cells) -> Cells {
    let min_x = cells.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let min_y = cells.iter().map(|&(_, y)| y).min().unwrap_or(0);
    translate(&cells, (-min_x, -min_y))
}

/// Pushes `cells` by `step` until they fit on `board`.
///
/// On a bounded board the push gives up and returns `None` as soon as a
/// cell leaves the board. On an unbounded board the push always ends,
/// since only finitely many cells are marked.
pub fn place_with_step(board: &Board, cells: &Cells, step: Step) -> Option<Cells> {
    let delta = step.delta();
    let mut current = *cells;
    while !board.fits(&current) {
        current = translate(&current, delta);
        if !current.iter().all(|&cell| board.in_bounds(cell)) {
            return None;
        }
    }
    Some(current)
}

/// The two reference placements of `variant` against the growing edges.
///
/// The first has its top row level with the board's top row and sits flush
/// left; the second has its right column level with the board's right
/// column and sits flush with the floor. Either may contain negative
/// coordinates when the variant is larger than the current extents.
pub fn edge_aligned(variant: &Variant, (max_x, max_y): Coord) -> (Cells, Cells) {
    let top = translate(&variant.cells, (0, max_y + 1 - variant.height));
    let right = translate(&variant.cells, (max_x + 1 - variant.width, 0));
    (top, right)
}

/// The four pushed candidates derived from the edge-aligned placements, in
/// the fixed order: top pushed up, top pushed right, right pushed right,
/// right pushed up.
pub fn edge_candidates(board: &Board, variant: &Variant, extents: Coord) -> [Option<Cells>; 4] {
    let (top, right) = edge_aligned(variant, extents);
    [
        place_with_step(board, &top, Step::Up),
        place_with_step(board, &top, Step::Right),
        place_with_step(board, &right, Step::Right),
        place_with_step(board, &right, Step::Up),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::ShapeKind;

    #[test]
    fn test_move_reference_to_aligns_first_cell() {
        let j = ShapeKind::J.variants()[3];
        let moved = move_reference_to(&j.cells, (5, 1));
        assert_eq!(moved[0], (5, 1));
        assert_eq!(moved, [(5, 1), (3, 2), (4, 2), (5, 2)]);
    }

    #[test]
    fn test_normalize_to_origin() {
        let cells = [(3, 4), (4, 4), (4, 5), (5, 5)];
        assert_eq!(normalize_to_origin(cells), [(0, 0), (1, 0), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_place_with_step_pushes_past_marked_cells() {
        let mut board = Board::unbounded();
        board.mark(&[(0, 0), (0, 1), (0, 2), (0, 3)]);

        let i = ShapeKind::I.variants()[0].cells;
        let up = place_with_step(&board, &i, Step::Up);
        assert_eq!(up, Some([(0, 4), (1, 4), (2, 4), (3, 4)]));

        let right = place_with_step(&board, &i, Step::Right);
        assert_eq!(right, Some([(1, 0), (2, 0), (3, 0), (4, 0)]));
    }

    #[test]
    fn test_place_with_step_fails_at_bound() {
        let mut board = Board::bounded(4);
        board.mark(&[(0, 0), (1, 0), (2, 0), (3, 0)]);
        board.mark(&[(0, 1), (1, 1), (2, 1), (3, 1)]);

        let o = ShapeKind::O.variants()[0].cells;
        assert_eq!(
            place_with_step(&board, &o, Step::Up),
            Some([(0, 2), (1, 2), (0, 3), (1, 3)])
        );
        assert_eq!(place_with_step(&board, &o, Step::Right), None);

        let vertical = ShapeKind::I.variants()[1].cells;
        assert_eq!(place_with_step(&board, &vertical, Step::Up), None);
    }

    #[test]
    fn test_edge_aligned_reference_placements() {
        let t = ShapeKind::T.variants()[0];
        let (top, right) = edge_aligned(&t, (3, 2));
        assert_eq!(top, [(0, 1), (1, 1), (2, 1), (1, 2)]);
        assert_eq!(right, [(1, 0), (2, 0), (3, 0), (2, 1)]);
    }
}
