//! Exact planar predicates.
//!
//! Every predicate evaluates the same cross-product expression and compares it
//! against zero without tolerance, so two callers asking the same question about
//! the same coordinates always agree.

use super::types::{Coord, Location};

/// z-component of `a × b`.
#[inline]
pub fn cross(a: Coord, b: Coord) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Orientation of `p` relative to the directed line `a → b`:
/// positive left, negative right, zero collinear.
#[inline]
pub fn orient(a: Coord, b: Coord, p: Coord) -> f64 {
    cross(b - a, p - a)
}

/// `p` lies on the closed segment `[a, b]`.
#[inline]
pub fn on_segment(p: Coord, a: Coord, b: Coord) -> bool {
    orient(a, b, p) == 0.0
        && p.x >= a.x.min(b.x)
        && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y)
        && p.y <= a.y.max(b.y)
}

/// Shoelace signed area of a closed coordinate list (last == first).
pub fn signed_area(ring: &[Coord]) -> f64 {
    let twice: f64 = ring.windows(2).map(|w| cross(w[0], w[1])).sum();
    0.5 * twice
}

/// Winding number of a closed ring around `p` (Sunday's crossing rule).
/// Meaningless when `p` lies on the ring; callers test that first.
pub fn winding_number(p: Coord, ring: &[Coord]) -> i32 {
    let mut wn = 0;
    for w in ring.windows(2) {
        let (a, b) = (w[0], w[1]);
        if a.y <= p.y {
            if b.y > p.y && orient(a, b, p) > 0.0 {
                wn += 1;
            }
        } else if b.y <= p.y && orient(a, b, p) < 0.0 {
            wn -= 1;
        }
    }
    wn
}

/// Location of `p` relative to the area bounded by a closed ring.
pub fn locate_in_ring(p: Coord, ring: &[Coord]) -> Location {
    if ring.windows(2).any(|w| on_segment(p, w[0], w[1])) {
        return Location::Boundary;
    }
    if winding_number(p, ring) != 0 {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Parameter of `p` projected on the direction of `a → b` (unnormalised).
#[inline]
pub fn projection(p: Coord, a: Coord, b: Coord) -> f64 {
    (p - a).dot(&(b - a))
}
