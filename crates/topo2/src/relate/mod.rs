//! DE-9IM relate engine and named predicates.
//!
//! Purpose
//! - Compute the intersection matrix of any two decomposed geometries (points,
//!   lines, polygons, their multi variants and mixed collections) and derive
//!   the standard predicates from it.
//!
//! Model
//! - Both inputs are noded against each other (`graph`). Each edge piece adds
//!   a curve-dimensional entry at (its own location, its location in the other
//!   input); ring pieces of two areal inputs also decide the area cells from
//!   which side of the piece each interior lies. Nodes add point-dimensional
//!   entries, isolated points add theirs.
//! - Exterior/Exterior is always 2: inputs are bounded.
//! - A collection is one point set: the union of its parts. Ring edges of
//!   overlapping or edge-sharing polygons that fall inside that union count as
//!   interior, so a collection relates exactly like its dissolved union.
//!
//! Code cross-refs: `graph::Noding`, `IntersectionMatrix`, `Predicate`

mod graph;
mod matrix;
mod predicates;

pub(crate) use graph::{Components, EdgeKind, Node, Noding, Piece, PieceClass};
pub use matrix::{IntersectionMatrix, Pattern, PatternCell};
pub use predicates::Predicate;

pub use crate::geom::Dimension;

use tracing::trace;

use crate::cfg::TopoCfg;
use crate::error::Result;
use crate::geom::{Geometry, Location};

/// Matrix of `a` against `b` with the default configuration.
pub fn relate(a: &Geometry, b: &Geometry) -> Result<IntersectionMatrix> {
    relate_with(a, b, TopoCfg::default())
}

pub fn relate_with(a: &Geometry, b: &Geometry, cfg: TopoCfg) -> Result<IntersectionMatrix> {
    let ca = Components::new(a, cfg.boundary_rule)?;
    let cb = Components::new(b, cfg.boundary_rule)?;
    let noding = Noding::build(&ca, &cb);

    let mut m = IntersectionMatrix::empty();
    m.set(Location::Exterior, Location::Exterior, Dimension::Surface);
    contribute(&mut m, &ca, &cb, &noding.pieces_a, false);
    contribute(&mut m, &cb, &ca, &noding.pieces_b, true);
    for node in &noding.nodes {
        let la = ca.locate(node.at, node.hint_a);
        let lb = cb.locate(node.at, node.hint_b);
        m.set_at_least(la, lb, Dimension::Point);
    }
    trace!(kind_a = %a.kind(), kind_b = %b.kind(), matrix = %m, "relate");
    Ok(m)
}

/// Entries owed by one side: its isolated points and its edge pieces.
/// `transposed` writes them for the second argument.
fn contribute(
    m: &mut IntersectionMatrix,
    own: &Components,
    other: &Components,
    pieces: &[Piece],
    transposed: bool,
) {
    use Location::{Boundary, Exterior, Interior};
    let mut put = |o: Location, t: Location, d: Dimension| {
        if transposed {
            m.set_at_least(t, o, d);
        } else {
            m.set_at_least(o, t, d);
        }
    };

    let both_areal = own.is_areal() && other.is_areal();
    if own.is_areal() && !other.is_areal() {
        put(Interior, Exterior, Dimension::Surface);
    }
    for &p in &own.points {
        put(own.locate(p, None), other.locate(p, None), Dimension::Point);
    }
    for piece in pieces {
        let own_loc = match piece.kind {
            EdgeKind::Ring { .. } if piece.buried => Interior,
            EdgeKind::Ring { .. } => Boundary,
            EdgeKind::Line if own.is_areal() => {
                match own.classify(piece.seg, EdgeKind::Line) {
                    PieceClass::OnRing { .. } => Boundary,
                    _ => Interior,
                }
            }
            EdgeKind::Line => Interior,
        };
        put(own_loc, piece.class.location(), Dimension::Curve);

        if both_areal && piece.buried {
            // Own interior on both sides.
            match piece.class {
                PieceClass::InArea => put(Interior, Interior, Dimension::Surface),
                PieceClass::OnRing { .. } => {
                    put(Interior, Interior, Dimension::Surface);
                    put(Interior, Exterior, Dimension::Surface);
                }
                PieceClass::Exterior | PieceClass::OnLine => {
                    put(Interior, Exterior, Dimension::Surface);
                }
            }
        } else if both_areal && matches!(piece.kind, EdgeKind::Ring { .. }) {
            match piece.class {
                PieceClass::InArea => {
                    put(Interior, Interior, Dimension::Surface);
                    put(Exterior, Interior, Dimension::Surface);
                }
                PieceClass::OnRing { same_side: true } => {
                    put(Interior, Interior, Dimension::Surface);
                }
                PieceClass::OnRing { same_side: false } => {
                    put(Interior, Exterior, Dimension::Surface);
                    put(Exterior, Interior, Dimension::Surface);
                }
                PieceClass::Exterior | PieceClass::OnLine => {
                    put(Interior, Exterior, Dimension::Surface);
                }
            }
        }
    }
}

/// Evaluate a pattern such as `"T*F**FFF*"` against `relate(a, b)`.
pub fn relate_pattern(a: &Geometry, b: &Geometry, pattern: &str) -> Result<bool> {
    let pattern: Pattern = pattern.parse()?;
    Ok(relate(a, b)?.matches(&pattern))
}

/// Evaluate a named predicate with an explicit configuration.
pub fn predicate_with(p: Predicate, a: &Geometry, b: &Geometry, cfg: TopoCfg) -> Result<bool> {
    let m = relate_with(a, b, cfg)?;
    Ok(p.holds(&m, a.dimension(), b.dimension()))
}

macro_rules! named_predicate {
    ($($(#[$doc:meta])* $name:ident => $pred:ident;)+) => {
        $(
            $(#[$doc])*
            pub fn $name(a: &Geometry, b: &Geometry) -> Result<bool> {
                predicate_with(Predicate::$pred, a, b, TopoCfg::default())
            }
        )+
    };
}

named_predicate! {
    /// Same point set.
    equals => Equals;
    /// No point in common.
    disjoint => Disjoint;
    /// At least one point in common.
    intersects => Intersects;
    /// Boundaries meet, interiors do not.
    touches => Touches;
    crosses => Crosses;
    /// Every point of `a` lies in `b`, and the interiors meet.
    within => Within;
    /// Every point of `b` lies in `a`, and the interiors meet.
    contains => Contains;
    overlaps => Overlaps;
    covers => Covers;
    covered_by => CoveredBy;
}
