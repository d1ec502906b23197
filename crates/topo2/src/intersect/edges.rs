//! Pairwise intersection of two polylines.

use super::segment::{intersect, IntersectionPoint};
use crate::geom::{Coord, PointSequence};

/// Intersections between every segment of `a` and every segment of `b`,
/// deduplicated by exact coordinate. The first occurrence (in `a`-major,
/// `b`-minor segment order) keeps its flags.
pub fn intersect_edges(a: &PointSequence, b: &PointSequence) -> Vec<IntersectionPoint> {
    let (ea, eb) = (a.envelope(), b.envelope());
    if !ea.intersects(&eb) {
        return Vec::new();
    }
    let mut out: Vec<IntersectionPoint> = Vec::new();
    for sa in a.segments() {
        if !sa.envelope().intersects(&eb) {
            continue;
        }
        for sb in b.segments() {
            for ip in intersect(sa, sb) {
                if !out.iter().any(|seen| seen.coord == ip.coord) {
                    out.push(ip);
                }
            }
        }
    }
    out
}

/// Whether the two polylines share at least one point.
pub fn edges_intersect(a: &PointSequence, b: &PointSequence) -> bool {
    !intersect_edges(a, b).is_empty()
}

/// Where a coordinate sits among the vertices of a polyline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexRole {
    /// First or last coordinate.
    Endpoint,
    /// Any other vertex.
    Inner,
}

/// Role of `p` as a vertex of `line`. A coordinate repeated at an end and
/// inside counts as an endpoint.
pub fn vertex_role(p: Coord, line: &PointSequence) -> Option<VertexRole> {
    if p == line.first() || p == line.last() {
        Some(VertexRole::Endpoint)
    } else if line.coords().contains(&p) {
        Some(VertexRole::Inner)
    } else {
        None
    }
}
