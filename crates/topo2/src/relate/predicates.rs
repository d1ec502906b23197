//! Named predicates as pattern tables.
//!
//! Each predicate is a list of patterns, selected by the dimensions of the two
//! arguments; it holds when any pattern of the selected list matches. Adding a
//! predicate means adding a row here, not a new code path.

use super::matrix::{IntersectionMatrix, Pattern};
use crate::geom::Dimension;

pub const EQUALS: Pattern = Pattern::from_bytes(b"T*F**FFF*");
pub const DISJOINT: Pattern = Pattern::from_bytes(b"FF*FF****");
pub const WITHIN: Pattern = Pattern::from_bytes(b"T*F**F***");
pub const CONTAINS: Pattern = Pattern::from_bytes(b"T*****FF*");

pub const TOUCHES: [Pattern; 3] = [
    Pattern::from_bytes(b"FT*******"),
    Pattern::from_bytes(b"F**T*****"),
    Pattern::from_bytes(b"F***T****"),
];

/// Lower-dimensional first argument (point/line, point/area, line/area).
pub const CROSSES_LOWER: Pattern = Pattern::from_bytes(b"T*T******");
/// Higher-dimensional first argument.
pub const CROSSES_HIGHER: Pattern = Pattern::from_bytes(b"T*****T**");
/// Line/line.
pub const CROSSES_LINES: Pattern = Pattern::from_bytes(b"0********");

/// Point/point and area/area.
pub const OVERLAPS: Pattern = Pattern::from_bytes(b"T*T***T**");
/// Line/line.
pub const OVERLAPS_LINES: Pattern = Pattern::from_bytes(b"1*T***T**");

pub const COVERS: [Pattern; 4] = [
    Pattern::from_bytes(b"T*****FF*"),
    Pattern::from_bytes(b"*T****FF*"),
    Pattern::from_bytes(b"***T**FF*"),
    Pattern::from_bytes(b"****T*FF*"),
];

pub const COVERED_BY: [Pattern; 4] = [
    Pattern::from_bytes(b"T*F**F***"),
    Pattern::from_bytes(b"*TF**F***"),
    Pattern::from_bytes(b"**FT*F***"),
    Pattern::from_bytes(b"**F*TF***"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Predicate {
    Equals,
    Disjoint,
    Intersects,
    Touches,
    Crosses,
    Within,
    Contains,
    Overlaps,
    Covers,
    CoveredBy,
}

impl Predicate {
    pub const ALL: [Predicate; 10] = [
        Predicate::Equals,
        Predicate::Disjoint,
        Predicate::Intersects,
        Predicate::Touches,
        Predicate::Crosses,
        Predicate::Within,
        Predicate::Contains,
        Predicate::Overlaps,
        Predicate::Covers,
        Predicate::CoveredBy,
    ];

    /// Patterns that make the predicate true for arguments of dimension
    /// `da` and `db`. `Intersects` is the negation of its list and is handled
    /// by `holds`.
    pub fn patterns(self, da: Dimension, db: Dimension) -> &'static [Pattern] {
        use Dimension::{Curve, Point, Surface};
        match self {
            Predicate::Equals => std::slice::from_ref(&EQUALS),
            Predicate::Disjoint | Predicate::Intersects => std::slice::from_ref(&DISJOINT),
            Predicate::Touches => match (da, db) {
                (Point, Point) => &[],
                _ => &TOUCHES,
            },
            Predicate::Crosses => match (da, db) {
                (Curve, Curve) => std::slice::from_ref(&CROSSES_LINES),
                (Point, Curve) | (Point, Surface) | (Curve, Surface) => {
                    std::slice::from_ref(&CROSSES_LOWER)
                }
                (Curve, Point) | (Surface, Point) | (Surface, Curve) => {
                    std::slice::from_ref(&CROSSES_HIGHER)
                }
                _ => &[],
            },
            Predicate::Within => std::slice::from_ref(&WITHIN),
            Predicate::Contains => std::slice::from_ref(&CONTAINS),
            Predicate::Overlaps => match (da, db) {
                (Point, Point) | (Surface, Surface) => std::slice::from_ref(&OVERLAPS),
                (Curve, Curve) => std::slice::from_ref(&OVERLAPS_LINES),
                _ => &[],
            },
            Predicate::Covers => &COVERS,
            Predicate::CoveredBy => &COVERED_BY,
        }
    }

    /// Evaluate against a computed matrix.
    pub fn holds(self, m: &IntersectionMatrix, da: Dimension, db: Dimension) -> bool {
        let any = self.patterns(da, db).iter().any(|p| m.matches(p));
        match self {
            Predicate::Intersects => !any,
            _ => any,
        }
    }
}
