//! Overlay: union, intersection, difference and symmetric difference.
//!
//! Purpose
//! - Build the point set of a boolean combination of two geometries as a new
//!   geometry made of points, polylines and polygons.
//!
//! Model
//! - Both inputs are noded against each other exactly as `relate` does, so
//!   every edge piece sits wholly in one location of the other input.
//! - Each operation is a selection over pieces by class. Line pieces are
//!   chained back into runs and, when `TopoCfg::merge_lines` is set, fused by
//!   the line merge engine. Ring pieces of two areal inputs are oriented with
//!   the result interior on their left and assembled into polygons (`rings`).
//! - Points survive when they are not already covered by a result line or
//!   polygon; lower-dimensional leftovers never duplicate higher ones.
//! - Symmetric difference is `difference(a, b)` plus `difference(b, a)`, with
//!   one line merge over both halves.
//!
//! Inputs are single-kind geometries (points, lines or polygons, single or
//! multi). Non-empty mixed collections are rejected. No surviving fragments
//! give the empty collection, not an error.
//!
//! Code cross-refs: `crate::relate::Noding`, `rings::assemble`, `crate::merge`

mod rings;

use tracing::debug;

use crate::cfg::TopoCfg;
use crate::error::{Result, TopoError};
use crate::geom::{Coord, Geometry, Location, PointSequence, Polygon, Segment};
use crate::merge::merge_lines;
use crate::relate::{Components, EdgeKind, Node, Noding, Piece, PieceClass};

/// Boolean operation on two point sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayOp {
    Intersection,
    Union,
    Difference,
    SymDifference,
}

impl OverlayOp {
    pub const ALL: [OverlayOp; 4] = [
        OverlayOp::Intersection,
        OverlayOp::Union,
        OverlayOp::Difference,
        OverlayOp::SymDifference,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OverlayOp::Intersection => "intersection",
            OverlayOp::Union => "union",
            OverlayOp::Difference => "difference",
            OverlayOp::SymDifference => "sym_difference",
        }
    }
}

pub fn overlay(op: OverlayOp, a: &Geometry, b: &Geometry) -> Result<Geometry> {
    overlay_with(op, a, b, TopoCfg::default())
}

pub fn overlay_with(op: OverlayOp, a: &Geometry, b: &Geometry, cfg: TopoCfg) -> Result<Geometry> {
    for g in [a, b] {
        if matches!(g, Geometry::Collection(_)) && !g.is_empty() {
            return Err(TopoError::Unsupported {
                op: op.name(),
                a: a.kind(),
                b: b.kind(),
            });
        }
    }
    let ca = Components::new(a, cfg.boundary_rule)?;
    let cb = Components::new(b, cfg.boundary_rule)?;
    let noding = Noding::build(&ca, &cb);
    let side_a = Side {
        comp: &ca,
        pieces: &noding.pieces_a,
    };
    let side_b = Side {
        comp: &cb,
        pieces: &noding.pieces_b,
    };

    let mut parts = Parts::default();
    match op {
        OverlayOp::Intersection => select(Select::Intersection, side_a, side_b, &noding.nodes, &mut parts),
        OverlayOp::Union => select(Select::Union, side_a, side_b, &[], &mut parts),
        OverlayOp::Difference => select(Select::Difference, side_a, side_b, &[], &mut parts),
        OverlayOp::SymDifference => {
            select(Select::Difference, side_a, side_b, &[], &mut parts);
            select(Select::Difference, side_b, side_a, &[], &mut parts);
        }
    }
    let parts = parts.finish(cfg);
    debug!(
        op = op.name(),
        pieces_a = noding.pieces_a.len(),
        pieces_b = noding.pieces_b.len(),
        points = parts.points.len(),
        lines = parts.lines.len(),
        polygons = parts.polygons.len(),
        "overlay"
    );
    Ok(parts.into_geometry())
}

/// Points in both `a` and `b`.
pub fn intersection(a: &Geometry, b: &Geometry) -> Result<Geometry> {
    overlay(OverlayOp::Intersection, a, b)
}

/// Points in `a` or `b`.
pub fn union(a: &Geometry, b: &Geometry) -> Result<Geometry> {
    overlay(OverlayOp::Union, a, b)
}

/// Points in `a` and not in `b`.
pub fn difference(a: &Geometry, b: &Geometry) -> Result<Geometry> {
    overlay(OverlayOp::Difference, a, b)
}

/// Points in exactly one of `a` and `b`.
pub fn sym_difference(a: &Geometry, b: &Geometry) -> Result<Geometry> {
    overlay(OverlayOp::SymDifference, a, b)
}

/// One input together with its pieces noded against the other input.
#[derive(Clone, Copy)]
struct Side<'a> {
    comp: &'a Components,
    pieces: &'a [Piece],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Select {
    Intersection,
    Union,
    Difference,
}

#[derive(Debug, Default)]
struct Parts {
    points: Vec<Coord>,
    lines: Vec<PointSequence>,
    polygons: Vec<Polygon>,
}

/// Add what `own` contributes to `sel(own, other)`. `nodes` are read with
/// `hint_a` for `own`, so they must come from noding `(own, other)`.
fn select(sel: Select, own: Side, other: Side, nodes: &[Node], parts: &mut Parts) {
    use PieceClass::{Exterior, InArea, OnLine, OnRing};

    let outside = |c: &Components, p: Coord| c.locate(p, None) == Location::Exterior;
    match sel {
        Select::Intersection => {
            parts
                .points
                .extend(own.comp.points.iter().copied().filter(|&p| !outside(other.comp, p)));
            parts
                .points
                .extend(other.comp.points.iter().copied().filter(|&p| !outside(own.comp, p)));
            parts.points.extend(
                nodes
                    .iter()
                    .filter(|n| {
                        own.comp.locate(n.at, n.hint_a) != Location::Exterior
                            && other.comp.locate(n.at, n.hint_b) != Location::Exterior
                    })
                    .map(|n| n.at),
            );
        }
        Select::Union => {
            parts.points.extend_from_slice(&own.comp.points);
            parts.points.extend_from_slice(&other.comp.points);
        }
        Select::Difference => {
            parts
                .points
                .extend(own.comp.points.iter().copied().filter(|&p| outside(other.comp, p)));
        }
    }

    let is_line = |p: &&Piece| p.kind == EdgeKind::Line;
    parts.lines.extend(runs(
        own.pieces
            .iter()
            .filter(is_line)
            .filter(|p| keeps_line(sel, true, p.class)),
    ));
    parts.lines.extend(runs(
        other
            .pieces
            .iter()
            .filter(is_line)
            .filter(|p| keeps_line(sel, false, p.class)),
    ));

    match (own.comp.is_areal(), other.comp.is_areal()) {
        (true, true) => {
            if sel == Select::Intersection {
                // Interiors on opposite sides: only the shared edge is common.
                parts.lines.extend(runs(
                    own.pieces
                        .iter()
                        .filter(|p| p.class == OnRing { same_side: false }),
                ));
            }
            let mut fragments = Vec::new();
            for p in own.pieces {
                let keep = match sel {
                    Select::Intersection => matches!(p.class, InArea | OnRing { same_side: true }),
                    Select::Union => matches!(p.class, Exterior | OnLine | OnRing { same_side: true }),
                    Select::Difference => {
                        matches!(p.class, Exterior | OnLine | OnRing { same_side: false })
                    }
                };
                if keep {
                    fragments.extend(oriented(p, false));
                }
            }
            for p in other.pieces {
                let (keep, flip) = match sel {
                    Select::Intersection => (p.class == InArea, false),
                    Select::Union => (matches!(p.class, Exterior | OnLine), false),
                    Select::Difference => (p.class == InArea, true),
                };
                if keep {
                    fragments.extend(oriented(p, flip));
                }
            }
            parts.polygons.extend(rings::assemble(&fragments));
        }
        (true, false) if sel != Select::Intersection => {
            parts.polygons.extend(own.comp.polygons.iter().cloned());
        }
        (false, true) if sel == Select::Union => {
            parts.polygons.extend(other.comp.polygons.iter().cloned());
        }
        _ => {}
    }
}

/// Whether a line piece of the first (`own`) or second input survives.
fn keeps_line(sel: Select, own: bool, class: PieceClass) -> bool {
    use PieceClass::{Exterior, InArea, OnLine, OnRing};
    match (sel, own) {
        (Select::Intersection, true) => class != Exterior,
        (Select::Intersection, false) => matches!(class, InArea | OnRing { .. }),
        (Select::Union, true) => matches!(class, Exterior | OnLine),
        (Select::Union, false) => class == Exterior,
        (Select::Difference, true) => class == Exterior,
        (Select::Difference, false) => false,
    }
}

/// Ring piece directed with its polygon interior on the left, or on the
/// right when `flip` is set. Line pieces have no side.
fn oriented(p: &Piece, flip: bool) -> Option<Segment> {
    let EdgeKind::Ring { interior_left } = p.kind else {
        return None;
    };
    if interior_left != flip {
        Some(p.seg)
    } else {
        Some(Segment::new(p.seg.p1, p.seg.p0))
    }
}

/// Chain consecutive pieces of one chain back into polylines.
fn runs<'a>(pieces: impl Iterator<Item = &'a Piece>) -> Vec<PointSequence> {
    let mut out: Vec<(usize, Vec<Coord>)> = Vec::new();
    for p in pieces {
        match out.last_mut() {
            Some((chain, coords)) if *chain == p.chain && coords.last() == Some(&p.seg.p0) => {
                coords.push(p.seg.p1);
            }
            _ => out.push((p.chain, vec![p.seg.p0, p.seg.p1])),
        }
    }
    out.into_iter()
        .map(|(_, coords)| PointSequence::from_valid(coords))
        .collect()
}

impl Parts {
    fn finish(mut self, cfg: TopoCfg) -> Self {
        if cfg.merge_lines {
            self.lines = merge_lines(self.lines);
        }
        let mut points: Vec<Coord> = Vec::with_capacity(self.points.len());
        for p in self.points {
            if points.contains(&p) {
                continue;
            }
            let covered = self.lines.iter().any(|l| l.contains_point(p))
                || self.polygons.iter().any(|poly| poly.locate(p) != Location::Exterior);
            if !covered {
                points.push(p);
            }
        }
        self.points = points;
        self
    }

    /// Single part as itself, several parts of one kind as the multi variant,
    /// mixed kinds as a collection ordered points, lines, polygons.
    fn into_geometry(self) -> Geometry {
        let mut kinds = Vec::new();
        match self.points.len() {
            0 => {}
            1 => kinds.push(Geometry::Point(self.points[0])),
            _ => kinds.push(Geometry::MultiPoint(self.points)),
        }
        match self.lines.len() {
            0 => {}
            1 => kinds.extend(self.lines.into_iter().map(Geometry::LineString)),
            _ => kinds.push(Geometry::MultiLineString(self.lines)),
        }
        match self.polygons.len() {
            0 => {}
            1 => kinds.extend(self.polygons.into_iter().map(Geometry::Polygon)),
            _ => kinds.push(Geometry::MultiPolygon(self.polygons)),
        }
        match <[Geometry; 1]>::try_from(kinds) {
            Ok([g]) => g,
            Err(kinds) => Geometry::Collection(kinds),
        }
    }
}
