//! Shared paths between two lineal geometries.
//!
//! A shared path is the collinear overlap of one segment of `a` with one
//! segment of `b`, oriented along `a`. Overlaps are grouped by whether `b`
//! runs the same way (`forward`) or the opposite way (`backward`), and listed
//! in the order they occur along `a`.

use super::segment::intersect;
use crate::error::{Result, TopoError};
use crate::geom::util::projection;
use crate::geom::{Coord, Geometry, PointSequence};

/// Collinear overlaps of two lineal geometries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SharedPaths {
    pub forward: Vec<PointSequence>,
    pub backward: Vec<PointSequence>,
}

fn lines_of<'g>(g: &'g Geometry, other: &Geometry) -> Result<&'g [PointSequence]> {
    match g {
        Geometry::LineString(l) => Ok(std::slice::from_ref(l)),
        Geometry::MultiLineString(ls) => Ok(ls),
        _ => Err(TopoError::Unsupported {
            op: "shared_paths",
            a: g.kind(),
            b: other.kind(),
        }),
    }
}

pub fn shared_paths(a: &Geometry, b: &Geometry) -> Result<SharedPaths> {
    let lines_a = lines_of(a, b)?;
    let lines_b = lines_of(b, a)?;
    let mut out = SharedPaths::default();
    for la in lines_a {
        for sa in la.segments() {
            // (start parameter along sa, path, same direction)
            let mut found: Vec<(f64, PointSequence, bool)> = Vec::new();
            for lb in lines_b {
                for sb in lb.segments() {
                    let pts = intersect(sa, sb);
                    if pts.len() < 2 || !pts[0].is_collinear {
                        continue;
                    }
                    let key = |p: &Coord| projection(*p, sa.p0, sa.p1);
                    let (mut lo, mut hi) = (pts[0].coord, pts[0].coord);
                    for ip in &pts[1..] {
                        if key(&ip.coord) < key(&lo) {
                            lo = ip.coord;
                        }
                        if key(&ip.coord) > key(&hi) {
                            hi = ip.coord;
                        }
                    }
                    if lo == hi {
                        continue;
                    }
                    let same = sa.direction().dot(&sb.direction()) > 0.0;
                    found.push((key(&lo), PointSequence::from_valid(vec![lo, hi]), same));
                }
            }
            found.sort_by(|x, y| x.0.total_cmp(&y.0));
            for (_, path, same) in found {
                if same {
                    out.forward.push(path);
                } else {
                    out.backward.push(path);
                }
            }
        }
    }
    Ok(out)
}
