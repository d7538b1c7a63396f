//! Touchpoint strategy: exact-fit attempts on a growing square.
//!
//! Each attempt drops totems, Tetris style, into a `side x side` board and
//! keeps the drop that touches the most marked cells or walls. If some
//! remaining totem no longer fits anywhere, the attempt fails and the next
//! one starts over on a board one cell wider.

use crate::error::SolveError;
use crate::geometry::{place_with_step, translate, Step};
use crate::grid::Board;
use crate::pieces::{Cells, Coord, Placement, ShapeBag, ShapeKind};
use crate::PackingStrategy;

/// Side of the smallest square whose area covers `count` totems.
pub fn initial_side(count: usize) -> i32 {
    let cells = count * 4;
    let mut side = 0usize;
    while side * side < cells {
        side += 1;
    }
    side as i32
}

/// A bounded board plus a touch count for every cell.
///
/// A cell's touch count is the number of marked neighbours it has, plus one
/// per board edge it lies on. Cell (0, 0) carries one extra point so the
/// first drop is drawn to the origin.
struct TouchBoard {
    board: Board,
    width: i32,
    touches: Vec<u32>,
}

impl TouchBoard {
    fn new(width: i32, height: i32) -> Self {
        let w = width.max(0) as usize;
        let h = height.max(0) as usize;
        let mut touches = vec![0u32; w * h];
        if w > 0 && h > 0 {
            for x in 0..w {
                touches[x] += 1; // bottom row
                touches[(h - 1) * w + x] += 1; // top row
            }
            for y in 0..h {
                touches[y * w] += 1; // left column
                touches[y * w + w - 1] += 1; // right column
            }
            touches[0] += 1;
        }

        Self {
            board: Board::bounded_rect(width, height),
            width,
            touches,
        }
    }

    #[inline]
    fn index(&self, (x, y): Coord) -> usize {
        (y * self.width + x) as usize
    }

    fn touchpoints(&self, cells: &Cells) -> u32 {
        cells.iter().map(|&cell| self.touches[self.index(cell)]).sum()
    }

    /// Drops `cells` (already shifted by `dx`) onto the column profile, then
    /// pushes it up until it clears every marked cell.
    fn drop_at(&self, cells: &Cells, dx: i32) -> Option<Cells> {
        let lift = cells
            .iter()
            .map(|&(x, y)| self.board.next_free_above(x + dx) - y)
            .max()
            .unwrap_or(0);
        place_with_step(&self.board, &translate(cells, (dx, lift)), Step::Up)
    }

    fn commit(&mut self, cells: &Cells) {
        self.board.mark(cells);
        for &(x, y) in cells {
            for neighbour in [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)] {
                if self.board.in_bounds(neighbour) {
                    let index = self.index(neighbour);
                    self.touches[index] += 1;
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TouchpointStrategy;

impl TouchpointStrategy {
    /// Tries to pack every shape into a `side x side` square.
    ///
    /// Returns `None` as soon as a step finds no drop that fits. The first
    /// committed totem always covers (0, 0).
    pub fn try_fit(shapes: &[ShapeKind], side: i32) -> Option<Vec<Placement>> {
        Self::try_fit_dims(shapes, side, side)
    }

    /// Same as [`try_fit`](Self::try_fit) on a `width x height` rectangle.
    pub fn try_fit_dims(shapes: &[ShapeKind], width: i32, height: i32) -> Option<Vec<Placement>> {
        let mut board = TouchBoard::new(width, height);
        let mut remaining = ShapeBag::from_shapes(shapes);
        let mut placements = Vec::with_capacity(shapes.len());

        while !remaining.is_empty() {
            let seeding = placements.is_empty();
            let mut best: Option<(u32, ShapeKind, Cells)> = None;

            for shape in remaining.kinds() {
                for variant in shape.variants() {
                    for dx in 0..=width - variant.width {
                        let Some(cells) = board.drop_at(&variant.cells, dx) else {
                            continue;
                        };
                        if seeding && !cells.contains(&(0, 0)) {
                            continue;
                        }
                        let touches = board.touchpoints(&cells);
                        if best.map_or(true, |(most, _, _)| touches > most) {
                            best = Some((touches, shape, cells));
                        }
                    }
                }
            }

            let (_, shape, cells) = best?;
            remaining.remove(shape);
            board.commit(&cells);
            placements.push(Placement::new(shape, cells));
        }

        Some(placements)
    }
}

impl PackingStrategy for TouchpointStrategy {
    fn name(&self) -> &'static str {
        "touchpoint"
    }

    fn pack(&self, shapes: &[ShapeKind]) -> Result<Vec<Placement>, SolveError> {
        if shapes.is_empty() {
            return Err(SolveError::EmptyInput);
        }

        let mut side = initial_side(shapes.len());
        loop {
            match Self::try_fit(shapes, side) {
                Some(placements) => {
                    log::debug!("touchpoint: packed {} totems on a {side}x{side} board", shapes.len());
                    return Ok(placements);
                }
                None => {
                    log::debug!("touchpoint: no fit on a {side}x{side} board");
                    side += 1;
                }
            }
        }
    }
}
