//! Rectangle strategy: touchpoint attempts over score-ordered dimensions.
//!
//! Rather than growing a square one cell at a time, the rectangles listed by
//! [`candidate_dims`] are tried best score first, each in both orientations.
//! An orientation that some input kind cannot fit in is skipped without an
//! attempt. If no rectangle admits the whole packing, the shapes are packed
//! by the greedy strategy instead.

use crate::error::SolveError;
use crate::greedy::GreedyStrategy;
use crate::pieces::{Coord, Placement, ShapeBag, ShapeKind};
use crate::scoring::candidate_dims;
use crate::touchpoint::TouchpointStrategy;
use crate::PackingStrategy;

#[derive(Clone, Copy, Debug, Default)]
pub struct RectangleStrategy;

impl RectangleStrategy {
    /// Packs into the first candidate rectangle that admits every shape.
    ///
    /// Returns the `(width, height)` used along with the packing, or `None`
    /// when every candidate fails.
    pub fn try_dims(shapes: &[ShapeKind]) -> Option<(Coord, Vec<Placement>)> {
        let kinds: Vec<ShapeKind> = ShapeBag::from_shapes(shapes).kinds().collect();

        for (width, height) in candidate_dims(shapes.len()) {
            let orientations = if width == height {
                vec![(width, height)]
            } else {
                vec![(width, height), (height, width)]
            };
            for (w, h) in orientations {
                if !kinds.iter().all(|kind| kind.fits_within(w, h)) {
                    log::debug!("rectangle: skipping {w}x{h}, a totem cannot fit");
                    continue;
                }
                if let Some(placements) = TouchpointStrategy::try_fit_dims(shapes, w, h) {
                    return Some(((w, h), placements));
                }
            }
        }
        None
    }
}

impl PackingStrategy for RectangleStrategy {
    fn name(&self) -> &'static str {
        "rectangle"
    }

    fn pack(&self, shapes: &[ShapeKind]) -> Result<Vec<Placement>, SolveError> {
        if shapes.is_empty() {
            return Err(SolveError::EmptyInput);
        }

        match Self::try_dims(shapes) {
            Some(((width, height), placements)) => {
                log::debug!(
                    "rectangle: packed {} totems on a {width}x{height} board",
                    shapes.len()
                );
                Ok(placements)
            }
            None => {
                log::warn!("rectangle: no candidate rectangle fits, packing greedily");
                GreedyStrategy.pack(shapes)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::format_packing;
    use crate::scoring::{score, validate};

    #[test]
    fn test_single_i_stands_upright() {
        let ((width, height), placements) = RectangleStrategy::try_dims(&[ShapeKind::I]).unwrap();
        assert_eq!((width, height), (1, 4));
        assert_eq!(
            placements,
            vec![Placement::new(ShapeKind::I, [(0, 0), (0, 1), (0, 2), (0, 3)])]
        );
        assert_eq!(score(&placements), 1.5);
    }

    #[test]
    fn test_two_bars_fill_a_narrow_rectangle() {
        // 3x3 cannot hold an I in either rotation, so 2x4 is the first attempt
        let ((width, height), placements) =
            RectangleStrategy::try_dims(&[ShapeKind::I, ShapeKind::I]).unwrap();
        assert_eq!((width, height), (2, 4));
        insta::assert_snapshot!(format_packing(&placements).trim_end(), @r"
II
II
II
II
");
        assert_eq!(score(&placements), 6.0);
    }

    #[test]
    fn test_two_squares_move_past_the_unfillable_square() {
        let ((width, height), placements) =
            RectangleStrategy::try_dims(&[ShapeKind::O, ShapeKind::O]).unwrap();
        assert_eq!((width, height), (2, 4));
        assert_eq!(placements[1].cells(), &[(0, 2), (1, 2), (0, 3), (1, 3)]);
        assert_eq!(score(&placements), 6.0);
    }

    #[test]
    fn test_pack_is_valid_and_complete() {
        use ShapeKind::*;
        let shapes = [T, O, L, J, I, S, Z, T];
        let placements = RectangleStrategy.pack(&shapes).unwrap();

        assert!(validate(&placements).is_empty());
        assert!(placements[0].contains((0, 0)));
        let mut produced: Vec<ShapeKind> = placements.iter().map(|p| p.shape()).collect();
        let mut expected = shapes.to_vec();
        produced.sort();
        expected.sort();
        assert_eq!(produced, expected);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert_eq!(RectangleStrategy.pack(&[]), Err(SolveError::EmptyInput));
    }
}
