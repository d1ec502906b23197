//! Polygon assembly from oriented boundary fragments.
//!
//! Every fragment carries the result interior on its left. Fragments are
//! chained end to start into closed rings; where several fragments leave the
//! same node, the sharpest left turn wins, which keeps rings that only touch at
//! a vertex apart. Counter-clockwise rings are shells, clockwise rings are
//! holes, and each hole goes to the smallest shell that contains it.

use std::cmp::Ordering;

use tracing::warn;

use crate::geom::util::{cross, orient};
use crate::geom::{Coord, Location, PointSequence, Polygon, Ring, Segment};

/// Sort key; `+ 0.0` folds `-0.0` into `0.0` so equal coordinates group.
#[inline]
fn key(c: Coord) -> (f64, f64) {
    (c.x + 0.0, c.y + 0.0)
}

#[inline]
fn cmp_key(a: (f64, f64), b: (f64, f64)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1))
}

/// Clockwise angle in `(0, 2π]` from `from` to `to`.
fn cw_angle(from: Coord, to: Coord) -> f64 {
    let ccw = cross(from, to).atan2(from.dot(&to));
    let cw = -ccw;
    if cw <= 0.0 {
        cw + 2.0 * std::f64::consts::PI
    } else {
        cw
    }
}

pub(crate) fn assemble(fragments: &[Segment]) -> Vec<Polygon> {
    let closed = trace_rings(fragments);
    let mut shells: Vec<Ring> = Vec::new();
    let mut holes: Vec<Ring> = Vec::new();
    for coords in closed {
        let coords = drop_collinear(coords);
        let Ok(ring) = Ring::new(PointSequence::from_valid(coords)) else {
            continue;
        };
        let area = ring.signed_area();
        if area > 0.0 {
            shells.push(ring);
        } else if area < 0.0 {
            holes.push(ring);
        }
    }

    shells.sort_by(|a, b| a.signed_area().total_cmp(&b.signed_area()));
    let mut owned: Vec<Vec<Ring>> = shells.iter().map(|_| Vec::new()).collect();
    for hole in holes {
        let owner = shells.iter().position(|s| {
            hole.coords()
                .iter()
                .all(|p| s.locate(*p) != Location::Exterior)
        });
        match owner {
            Some(k) => owned[k].push(hole),
            None => warn!(
                vertices = hole.coords().len(),
                "dropping hole without an enclosing shell"
            ),
        }
    }
    shells
        .into_iter()
        .zip(owned)
        .map(|(shell, holes)| Polygon::new(shell, holes))
        .collect()
}

fn trace_rings(fragments: &[Segment]) -> Vec<Vec<Coord>> {
    let n = fragments.len();
    let mut by_start: Vec<usize> = (0..n).collect();
    by_start.sort_by(|&i, &j| cmp_key(key(fragments[i].p0), key(fragments[j].p0)));

    let mut used = vec![false; n];
    let mut rings = Vec::new();
    let mut dropped = 0usize;
    for start in 0..n {
        if used[start] {
            continue;
        }
        used[start] = true;
        let mut coords = vec![fragments[start].p0, fragments[start].p1];
        let mut cur = start;
        loop {
            let here = fragments[cur].p1;
            if here == coords[0] {
                rings.push(coords);
                break;
            }
            let back = fragments[cur].p0 - here;
            let next = outgoing(&by_start, fragments, here)
                .iter()
                .copied()
                .filter(|&i| !used[i])
                .min_by(|&i, &j| {
                    cw_angle(back, fragments[i].direction())
                        .total_cmp(&cw_angle(back, fragments[j].direction()))
                });
            match next {
                Some(i) => {
                    used[i] = true;
                    coords.push(fragments[i].p1);
                    cur = i;
                }
                None => {
                    dropped += 1;
                    break;
                }
            }
        }
    }
    if dropped > 0 {
        warn!(dropped, "dropping fragment chains that do not close");
    }
    rings
}

/// Fragments starting at `at`; `by_start` is sorted by start key.
fn outgoing<'a>(by_start: &'a [usize], fragments: &[Segment], at: Coord) -> &'a [usize] {
    let k = key(at);
    let lo = by_start.partition_point(|&i| cmp_key(key(fragments[i].p0), k) == Ordering::Less);
    let hi = by_start.partition_point(|&i| cmp_key(key(fragments[i].p0), k) != Ordering::Greater);
    &by_start[lo..hi]
}

/// Remove vertices lying straight between their neighbours.
fn drop_collinear(mut coords: Vec<Coord>) -> Vec<Coord> {
    // Work on the open ring, close again at the end.
    coords.pop();
    let mut changed = true;
    while changed && coords.len() > 3 {
        changed = false;
        let n = coords.len();
        for k in 0..n {
            let prev = coords[(k + n - 1) % n];
            let next = coords[(k + 1) % n];
            let v = coords[k];
            if orient(prev, next, v) == 0.0 && (v - prev).dot(&(next - v)) > 0.0 {
                coords.remove(k);
                changed = true;
                break;
            }
        }
    }
    if let Some(&first) = coords.first() {
        coords.push(first);
    }
    coords
}
