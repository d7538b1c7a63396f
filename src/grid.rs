//! Occupancy board used by the greedy and touchpoint strategies.
//!
//! Marked cells live in a hash set, so the board grows with the packing
//! instead of being sized up front. A board may optionally be bounded to a
//! `width x height` rectangle at the origin, in which case cells outside it
//! never fit.
//!
//! Two frontier indices are kept alongside the cells:
//! - `next_free_above[x]`: smallest unmarked y in column x
//! - `next_free_right[y]`: smallest unmarked x in row y
//!
//! Both only ever advance, so keeping them current is amortized O(1) per
//! marked cell.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::geometry::max_corner;
use crate::pieces::{Cells, Coord, Placement};
use crate::scoring::score_dims;

/// Mutable occupancy over the non-negative quadrant.
#[derive(Clone, Debug, Default)]
pub struct Board {
    occupied: FxHashSet<Coord>,
    /// Width and height of the allowed rectangle.
    bound: Option<Coord>,
    /// Max x and max y over marked cells; `None` while the board is empty.
    extents: Option<Coord>,
    placed: usize,
    next_free_above: FxHashMap<i32, i32>,
    next_free_right: FxHashMap<i32, i32>,
}

impl Board {
    /// An empty board without a size limit.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// An empty board limited to the `side x side` square at the origin.
    pub fn bounded(side: i32) -> Self {
        Self::bounded_rect(side, side)
    }

    /// An empty board limited to the `width x height` rectangle at the
    /// origin.
    pub fn bounded_rect(width: i32, height: i32) -> Self {
        Self {
            bound: Some((width, height)),
            ..Self::default()
        }
    }

    /// Number of totems marked so far.
    #[inline]
    pub fn placed(&self) -> usize {
        self.placed
    }

    #[inline]
    pub fn extents(&self) -> Option<Coord> {
        self.extents
    }

    #[inline]
    pub fn is_marked(&self, cell: Coord) -> bool {
        self.occupied.contains(&cell)
    }

    /// Returns true if `cell` lies inside the board's bound (always true when
    /// the board is unbounded).
    #[inline]
    pub fn in_bounds(&self, (x, y): Coord) -> bool {
        match self.bound {
            Some((width, height)) => (0..width).contains(&x) && (0..height).contains(&y),
            None => true,
        }
    }

    /// Returns true if none of `cells` is marked and all are in bounds.
    pub fn fits(&self, cells: &[Coord]) -> bool {
        cells
            .iter()
            .all(|&cell| self.in_bounds(cell) && !self.is_marked(cell))
    }

    /// Smallest unmarked y in column `x`.
    #[inline]
    pub fn next_free_above(&self, x: i32) -> i32 {
        self.next_free_above.get(&x).copied().unwrap_or(0)
    }

    /// Smallest unmarked x in row `y`.
    #[inline]
    pub fn next_free_right(&self, y: i32) -> i32 {
        self.next_free_right.get(&y).copied().unwrap_or(0)
    }

    /// Marks the cells of one totem.
    pub fn mark(&mut self, cells: &[Coord]) {
        for &(x, y) in cells {
            debug_assert!(x >= 0 && y >= 0, "marking negative cell ({x}, {y})");
            self.occupied.insert((x, y));

            if y == self.next_free_above(x) {
                let mut free_y = y + 1;
                while self.occupied.contains(&(x, free_y)) {
                    free_y += 1;
                }
                self.next_free_above.insert(x, free_y);
            }
            if x == self.next_free_right(y) {
                let mut free_x = x + 1;
                while self.occupied.contains(&(free_x, y)) {
                    free_x += 1;
                }
                self.next_free_right.insert(y, free_x);
            }

            self.extents = Some(match self.extents {
                Some((max_x, max_y)) => (max_x.max(x), max_y.max(y)),
                None => (x, y),
            });
        }
        self.placed += 1;
    }

    /// The score the packing would have if `cells` were the next totem.
    pub fn tentative_score(&self, cells: &Cells) -> f64 {
        let (cell_x, cell_y) = max_corner(cells);
        let corner = match self.extents {
            Some((max_x, max_y)) => (max_x.max(cell_x), max_y.max(cell_y)),
            None => (cell_x, cell_y),
        };
        score_dims(self.placed + 1, corner)
    }
}

/// Formats a packing as rows of shape letters, top row first.
///
/// Empty cells show as '.'. An empty packing renders as an empty string.
pub fn format_packing(placements: &[Placement]) -> String {
    let cells: FxHashMap<Coord, char> = placements
        .iter()
        .flat_map(|placement| {
            let letter = placement.shape().letter();
            placement.cells().iter().map(move |&cell| (cell, letter))
        })
        .collect();

    let Some(max_x) = cells.keys().map(|&(x, _)| x).max() else {
        return String::new();
    };
    let max_y = cells.keys().map(|&(_, y)| y).max().unwrap_or(0);

    let mut output = String::new();
    // rows from top (y = max_y) to bottom (y = 0)
    for y in (0..=max_y).rev() {
        for x in 0..=max_x {
            output.push(cells.get(&(x, y)).copied().unwrap_or('.'));
        }
        output.push('\n');
    }
    output
}
