//! Intersection of two closed segments.
//!
//! Parallel segments (zero determinant) only meet along a collinear overlap and
//! report every endpoint lying on the other segment. Otherwise existence is
//! decided from the four endpoint orientations; an endpoint lying on the other
//! line is returned verbatim, and a proper crossing is solved from the implicit
//! line equations and clamped into the overlap of both bounding boxes.

use crate::geom::util::{cross, on_segment, orient};
use crate::geom::{Coord, Segment};

/// One point shared by two segments, with the flags the relate and merge
/// engines read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionPoint {
    pub coord: Coord,
    /// Produced by a real intersection (always true for returned points).
    pub is_intersection: bool,
    /// Segment B enters A's left half-plane here. For collinear overlaps this
    /// is a coarse heuristic on the direction signs and is not reliable for
    /// arbitrary orientations.
    pub is_entering: bool,
    /// Coincides with an endpoint of either segment.
    pub is_original_vertex: bool,
    /// Came from a collinear overlap rather than a transversal crossing.
    pub is_collinear: bool,
}

impl IntersectionPoint {
    fn collinear(coord: Coord, is_entering: bool) -> Self {
        Self {
            coord,
            is_intersection: true,
            is_entering,
            is_original_vertex: true,
            is_collinear: true,
        }
    }
}

/// All points shared by segments `a` and `b`. Empty when they are disjoint.
pub fn intersect(a: Segment, b: Segment) -> Vec<IntersectionPoint> {
    let u = a.direction();
    let v = b.direction();
    let det = cross(u, v);
    if det == 0.0 {
        collinear_overlap(a, b, u, v)
    } else {
        transversal(a, b, det).into_iter().collect()
    }
}

/// Whether the two closed segments share at least one point.
#[inline]
pub fn segments_intersect(a: Segment, b: Segment) -> bool {
    !intersect(a, b).is_empty()
}

fn collinear_overlap(a: Segment, b: Segment, u: Coord, v: Coord) -> Vec<IntersectionPoint> {
    let same_sign = (u.x > 0.0 && v.x > 0.0)
        || (u.y > 0.0 && v.y > 0.0)
        || (u.x < 0.0 && v.x < 0.0)
        || (u.y < 0.0 && v.y < 0.0);
    let is_entering = !same_sign;

    let candidates = [
        (b.p0, on_segment(b.p0, a.p0, a.p1)),
        (b.p1, on_segment(b.p1, a.p0, a.p1)),
        (a.p0, on_segment(a.p0, b.p0, b.p1)),
        (a.p1, on_segment(a.p1, b.p0, b.p1)),
    ];
    let mut out: Vec<IntersectionPoint> = Vec::with_capacity(4);
    for (p, hit) in candidates {
        if hit && !out.iter().any(|ip| ip.coord == p) {
            out.push(IntersectionPoint::collinear(p, is_entering));
        }
    }
    out
}

fn transversal(a: Segment, b: Segment, det: f64) -> Option<IntersectionPoint> {
    let s1 = orient(b.p0, b.p1, a.p0);
    let s2 = orient(b.p0, b.p1, a.p1);
    let s3 = orient(a.p0, a.p1, b.p0);
    let s4 = orient(a.p0, a.p1, b.p1);
    let separated = |x: f64, y: f64| (x > 0.0 && y > 0.0) || (x < 0.0 && y < 0.0);
    if separated(s1, s2) || separated(s3, s4) {
        return None;
    }
    let is_entering = det < 0.0;

    // An endpoint on the other line is the unique crossing of the two lines.
    // Several can only qualify through rounding; take the smallest so the
    // answer does not depend on argument order.
    let touching = [
        (a.p0, s1 == 0.0 && on_segment(a.p0, b.p0, b.p1)),
        (a.p1, s2 == 0.0 && on_segment(a.p1, b.p0, b.p1)),
        (b.p0, s3 == 0.0 && on_segment(b.p0, a.p0, a.p1)),
        (b.p1, s4 == 0.0 && on_segment(b.p1, a.p0, a.p1)),
    ];
    let any_zero = s1 == 0.0 || s2 == 0.0 || s3 == 0.0 || s4 == 0.0;
    if any_zero {
        return touching
            .iter()
            .filter(|(_, hit)| *hit)
            .map(|(p, _)| *p)
            .min_by(|p, q| p.x.total_cmp(&q.x).then(p.y.total_cmp(&q.y)))
            .map(|p| IntersectionPoint {
                coord: p,
                is_intersection: true,
                is_entering,
                is_original_vertex: true,
                is_collinear: false,
            });
    }

    let a1 = a.p1.y - a.p0.y;
    let b1 = a.p0.x - a.p1.x;
    let c1 = -a.p0.x * a1 - b1 * a.p0.y;
    let a2 = b.p1.y - b.p0.y;
    let b2 = b.p0.x - b.p1.x;
    let c2 = -a2 * b.p0.x - b2 * b.p0.y;
    let raw = Coord::new((b1 * c2 - b2 * c1) / det, (a2 * c1 - a1 * c2) / det);
    let p = match a.envelope().intersection(&b.envelope()) {
        Some(env) => env.clamp(raw),
        None => return None,
    };
    Some(IntersectionPoint {
        coord: p,
        is_intersection: true,
        is_entering,
        is_original_vertex: a.is_endpoint(p) || b.is_endpoint(p),
        is_collinear: false,
    })
}
