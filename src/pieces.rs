//! Totem shape kinds, the rotation catalog, and placed-piece types.
//!
//! Every variant is a fixed rotation of a shape, normalized so the minimum
//! coordinates are at the origin. Reflections are never listed: `J` and `L`
//! (and `S` and `Z`) stay distinct kinds. The order of the variants inside
//! each kind is significant because strategies break ties by scan order.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseShapeError;

/// A 2D cell coordinate, `y` growing upward.
pub type Coord = (i32, i32);

/// Number of cells in every totem.
pub const CELLS_PER_TOTEM: usize = 4;

/// The cells of a single totem.
pub type Cells = [Coord; CELLS_PER_TOTEM];

/// Number of distinct shape kinds.
pub const NUM_KINDS: usize = 7;

/// One of the seven totem shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    I,
    O,
    J,
    L,
    S,
    Z,
    T,
}

impl ShapeKind {
    /// All kinds, in the order used whenever distinct kinds are scanned.
    pub const ALL: [ShapeKind; NUM_KINDS] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::T,
    ];

    /// Returns the rotation variants of this kind in catalog order.
    #[inline]
    pub fn variants(self) -> &'static [Variant] {
        match self {
            ShapeKind::I => &I_VARIANTS,
            ShapeKind::O => &O_VARIANTS,
            ShapeKind::J => &J_VARIANTS,
            ShapeKind::L => &L_VARIANTS,
            ShapeKind::S => &S_VARIANTS,
            ShapeKind::Z => &Z_VARIANTS,
            ShapeKind::T => &T_VARIANTS,
        }
    }

    /// The first variant (in catalog order) that covers cell (0, 0).
    pub fn origin_variant(self) -> Option<&'static Variant> {
        self.variants().iter().find(|variant| variant.contains_origin())
    }

    /// Returns true if some rotation fits a `width x height` rectangle.
    pub fn fits_within(self, width: i32, height: i32) -> bool {
        self.variants()
            .iter()
            .any(|variant| variant.width <= width && variant.height <= height)
    }

    /// The letter used on the wire and in rendered packings.
    pub fn letter(self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::O => 'O',
            ShapeKind::J => 'J',
            ShapeKind::L => 'L',
            ShapeKind::S => 'S',
            ShapeKind::Z => 'Z',
            ShapeKind::T => 'T',
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for ShapeKind {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "I" | "i" => Ok(ShapeKind::I),
            "O" | "o" => Ok(ShapeKind::O),
            "J" | "j" => Ok(ShapeKind::J),
            "L" | "l" => Ok(ShapeKind::L),
            "S" | "s" => Ok(ShapeKind::S),
            "Z" | "z" => Ok(ShapeKind::Z),
            "T" | "t" => Ok(ShapeKind::T),
            other => Err(ParseShapeError::Unknown(other.to_string())),
        }
    }
}

/// One fixed rotation of a shape kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
    /// Cells relative to the local origin. The first cell is the reference
    /// cell used when the variant is moved onto a target position.
    pub cells: Cells,
    /// Max x + 1.
    pub width: i32,
    /// Max y + 1.
    pub height: i32,
}

impl Variant {
    /// Creates a variant and derives its bounding dimensions at compile time.
    const fn new(cells: Cells) -> Self {
        let mut width = 0;
        let mut height = 0;
        let mut i = 0;
        while i < CELLS_PER_TOTEM {
            assert!(cells[i].0 >= 0 && cells[i].1 >= 0, "variant cells must be non-negative");
            if cells[i].0 + 1 > width {
                width = cells[i].0 + 1;
            }
            if cells[i].1 + 1 > height {
                height = cells[i].1 + 1;
            }
            i += 1;
        }
        Self {
            cells,
            width,
            height,
        }
    }

    /// Returns true if this variant covers cell (0, 0) untranslated.
    #[inline]
    pub fn contains_origin(&self) -> bool {
        self.cells.contains(&(0, 0))
    }
}

// Diagrams are drawn with y growing upward (bottom row is y = 0).

const I_VARIANTS: [Variant; 2] = [
    // IIII
    Variant::new([(0, 0), (1, 0), (2, 0), (3, 0)]),
    // I
    // I
    // I
    // I
    Variant::new([(0, 0), (0, 1), (0, 2), (0, 3)]),
];

const O_VARIANTS: [Variant; 1] = [
    // OO
    // OO
    Variant::new([(0, 0), (1, 0), (0, 1), (1, 1)]),
];

const J_VARIANTS: [Variant; 4] = [
    //  J
    //  J
    // JJ
    Variant::new([(0, 0), (1, 0), (1, 1), (1, 2)]),
    // J
    // JJJ
    Variant::new([(0, 0), (1, 0), (2, 0), (0, 1)]),
    // JJ
    // J
    // J
    Variant::new([(0, 0), (0, 1), (0, 2), (1, 2)]),
    // JJJ
    //   J
    Variant::new([(2, 0), (0, 1), (1, 1), (2, 1)]),
];

const L_VARIANTS: [Variant; 4] = [
    // L
    // L
    // LL
    Variant::new([(0, 0), (1, 0), (0, 1), (0, 2)]),
    // LLL
    // L
    Variant::new([(0, 0), (0, 1), (1, 1), (2, 1)]),
    // LL
    //  L
    //  L
    Variant::new([(1, 0), (1, 1), (0, 2), (1, 2)]),
    //   L
    // LLL
    Variant::new([(0, 0), (1, 0), (2, 0), (2, 1)]),
];

const S_VARIANTS: [Variant; 2] = [
    // S
    // SS
    //  S
    Variant::new([(1, 0), (0, 1), (1, 1), (0, 2)]),
    //  SS
    // SS
    Variant::new([(0, 0), (1, 0), (1, 1), (2, 1)]),
];

const Z_VARIANTS: [Variant; 2] = [
    // ZZ
    //  ZZ
    Variant::new([(1, 0), (2, 0), (0, 1), (1, 1)]),
    //  Z
    // ZZ
    // Z
    Variant::new([(0, 0), (0, 1), (1, 1), (1, 2)]),
];

const T_VARIANTS: [Variant; 4] = [
    //  T
    // TTT
    Variant::new([(0, 0), (1, 0), (2, 0), (1, 1)]),
    // T
    // TT
    // T
    Variant::new([(0, 0), (0, 1), (1, 1), (0, 2)]),
    // TTT
    //  T
    Variant::new([(1, 0), (0, 1), (1, 1), (2, 1)]),
    //  T
    // TT
    //  T
    Variant::new([(1, 0), (0, 1), (1, 1), (1, 2)]),
];

/// A multiset of shape kinds still waiting to be placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ShapeBag([u16; NUM_KINDS]);

impl ShapeBag {
    /// Builds a bag holding one entry per shape in `shapes`.
    pub fn from_shapes(shapes: &[ShapeKind]) -> Self {
        let mut bag = Self::default();
        for &shape in shapes {
            bag.0[shape.index()] += 1;
        }
        bag
    }

    /// Removes one instance of `shape`. Returns false if none was left.
    pub fn remove(&mut self, shape: ShapeKind) -> bool {
        let count = &mut self.0[shape.index()];
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    #[inline]
    pub fn count(&self, shape: ShapeKind) -> usize {
        self.0[shape.index()] as usize
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.iter().map(|&count| count as usize).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&count| count == 0)
    }

    /// Distinct kinds still present, in [`ShapeKind::ALL`] order.
    pub fn kinds(&self) -> impl Iterator<Item = ShapeKind> + '_ {
        ShapeKind::ALL
            .into_iter()
            .filter(move |shape| self.0[shape.index()] > 0)
    }
}

/// A totem committed at absolute grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    shape: ShapeKind,
    cells: Cells,
}

impl Placement {
    pub fn new(shape: ShapeKind, cells: Cells) -> Self {
        Self { shape, cells }
    }

    #[inline]
    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    #[inline]
    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    #[inline]
    pub fn contains(&self, cell: Coord) -> bool {
        self.cells.contains(&cell)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.shape)?;
        for (x, y) in self.cells {
            write!(f, " ({x},{y})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::normalize_to_origin;

    #[test]
    fn test_variant_counts_per_kind() {
        let counts: Vec<usize> = ShapeKind::ALL.iter().map(|k| k.variants().len()).collect();
        // I, O, J, L, S, Z, T
        assert_eq!(counts, vec![2, 1, 4, 4, 2, 2, 4]);
    }

    #[test]
    fn test_every_kind_has_an_origin_variant() {
        for kind in ShapeKind::ALL {
            assert!(
                kind.origin_variant().is_some(),
                "{kind} has no variant covering (0, 0)"
            );
        }
    }

    #[test]
    fn test_variants_are_normalized_and_distinct() {
        for kind in ShapeKind::ALL {
            let variants = kind.variants();
            for (i, variant) in variants.iter().enumerate() {
                let mut sorted = variant.cells;
                sorted.sort();
                let mut normalized = normalize_to_origin(variant.cells);
                normalized.sort();
                assert_eq!(sorted, normalized, "{kind} variant {i} is not normalized");

                for other in &variants[i + 1..] {
                    let mut other_sorted = other.cells;
                    other_sorted.sort();
                    assert_ne!(sorted, other_sorted, "{kind} lists a duplicate rotation");
                }
            }
        }
    }

    #[test]
    fn test_variant_dimensions() {
        let dims: Vec<(i32, i32)> = ShapeKind::L
            .variants()
            .iter()
            .map(|v| (v.width, v.height))
            .collect();
        assert_eq!(dims, vec![(2, 3), (3, 2), (2, 3), (3, 2)]);
        assert_eq!(ShapeKind::I.variants()[0].width, 4);
        assert_eq!(ShapeKind::I.variants()[1].height, 4);
        assert_eq!((ShapeKind::O.variants()[0].width, ShapeKind::O.variants()[0].height), (2, 2));
    }

    #[test]
    fn test_origin_variant_is_first_in_catalog_order() {
        // the first S rotation leaves (0, 0) empty, so the seed is the second one
        assert_eq!(ShapeKind::S.origin_variant(), Some(&ShapeKind::S.variants()[1]));
        assert_eq!(ShapeKind::Z.origin_variant(), Some(&ShapeKind::Z.variants()[1]));
        assert_eq!(ShapeKind::T.origin_variant(), Some(&ShapeKind::T.variants()[0]));
        assert_eq!(ShapeKind::L.origin_variant(), Some(&ShapeKind::L.variants()[0]));
    }

    #[test]
    fn test_fits_within_uses_any_rotation() {
        assert!(ShapeKind::I.fits_within(1, 4));
        assert!(ShapeKind::I.fits_within(4, 1));
        assert!(!ShapeKind::I.fits_within(3, 3));
        assert!(ShapeKind::L.fits_within(2, 3));
        assert!(!ShapeKind::L.fits_within(2, 2));
        assert!(ShapeKind::O.fits_within(2, 2));
    }

    #[test]
    fn test_parse_shape_kind() {
        assert_eq!("L".parse::<ShapeKind>(), Ok(ShapeKind::L));
        assert_eq!("z".parse::<ShapeKind>(), Ok(ShapeKind::Z));
        assert_eq!(
            "X".parse::<ShapeKind>(),
            Err(ParseShapeError::Unknown("X".to_string()))
        );
    }

    #[test]
    fn test_shape_bag_tracks_multiset() {
        let mut bag = ShapeBag::from_shapes(&[ShapeKind::T, ShapeKind::O, ShapeKind::T]);
        assert_eq!(bag.len(), 3);
        assert_eq!(bag.count(ShapeKind::T), 2);
        assert_eq!(bag.kinds().collect::<Vec<_>>(), vec![ShapeKind::O, ShapeKind::T]);

        assert!(bag.remove(ShapeKind::T));
        assert!(bag.remove(ShapeKind::T));
        assert!(!bag.remove(ShapeKind::T));
        assert!(bag.remove(ShapeKind::O));
        assert!(bag.is_empty());
    }
}
