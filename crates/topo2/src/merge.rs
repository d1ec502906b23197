//! Line merge: fuse end-to-end connectable fragments into maximal polylines.
//!
//! Model
//! - The working collection is a list of `Slot`s. Point slots and removed
//!   slots pass through untouched; only line slots take part in merging.
//! - Each pass scans the pairs `(i, j)`, `i < j`, of one immutable snapshot.
//!   The first pair that splices produces a new collection (both inputs
//!   dropped, the spliced line appended) and the next pass starts from it.
//! - A pass without a splice is the fixed point. Every splice removes one line
//!   slot, so the number of passes is bounded by the number of fragments.
//!
//! Splicing is directed: `splice(head, tail)` succeeds when `tail` continues
//! past the last coordinate of `head`, possibly after a longer shared run.

use tracing::debug;

use crate::geom::{Coord, PointSequence};
use crate::intersect::{intersect_edges, vertex_role, VertexRole};

/// One entry of a heterogeneous fragment collection.
#[derive(Clone, Debug, PartialEq)]
pub enum Slot {
    Point(Coord),
    Line(PointSequence),
    /// Placeholder that no longer contributes; skipped by every pass.
    Removed,
}

impl Slot {
    #[inline]
    pub fn as_line(&self) -> Option<&PointSequence> {
        match self {
            Slot::Line(l) => Some(l),
            _ => None,
        }
    }
}

/// Merge all connectable line fragments until no pair can be spliced.
///
/// Result order is unspecified beyond "untouched slots keep their relative
/// order, merged lines come last".
pub fn line_merge(fragments: &[Slot]) -> Vec<Slot> {
    let mut current = fragments.to_vec();
    let mut pass = 0usize;
    loop {
        pass += 1;
        match merge_pass(&current) {
            Some(next) => {
                debug!(pass, before = current.len(), after = next.len(), "line merge spliced a pair");
                current = next;
            }
            None => {
                debug!(pass, slots = current.len(), "line merge reached a fixed point");
                return current;
            }
        }
    }
}

/// Convenience over plain polylines.
pub fn merge_lines(lines: Vec<PointSequence>) -> Vec<PointSequence> {
    let slots: Vec<Slot> = lines.into_iter().map(Slot::Line).collect();
    line_merge(&slots)
        .into_iter()
        .filter_map(|s| match s {
            Slot::Line(l) => Some(l),
            _ => None,
        })
        .collect()
}

fn merge_pass(slots: &[Slot]) -> Option<Vec<Slot>> {
    for i in 0..slots.len() {
        for j in (i + 1)..slots.len() {
            if let Some(next) = merge_pair(slots, i, j) {
                return Some(next);
            }
        }
    }
    None
}

/// Try to splice slots `i` and `j`. On success the returned collection holds
/// every other slot in order followed by the spliced line.
pub fn merge_pair(slots: &[Slot], i: usize, j: usize) -> Option<Vec<Slot>> {
    let a = slots.get(i)?.as_line()?;
    let b = slots.get(j)?.as_line()?;
    if i == j {
        return None;
    }
    for ip in intersect_edges(a, b) {
        let spliced = if vertex_role(ip.coord, a) == Some(VertexRole::Endpoint) {
            splice(a, b)
        } else {
            None
        };
        let spliced = spliced.or_else(|| {
            if vertex_role(ip.coord, b) == Some(VertexRole::Endpoint) {
                splice(b, a)
            } else {
                None
            }
        });
        if let Some(line) = spliced {
            let mut next: Vec<Slot> = slots
                .iter()
                .enumerate()
                .filter(|(k, _)| *k != i && *k != j)
                .map(|(_, s)| s.clone())
                .collect();
            next.push(Slot::Line(line));
            return Some(next);
        }
    }
    None
}

/// Append `tail` to `head` when `tail` continues from `head`'s last coordinate.
///
/// The first occurrence of `head.last()` in `tail` fixes the overlap; every
/// coordinate before it in `tail` must match the trailing run of `head`.
pub fn splice(head: &PointSequence, tail: &PointSequence) -> Option<PointSequence> {
    let h = head.coords();
    let t = tail.coords();
    let end = head.last();
    let k = t.iter().position(|c| *c == end)?;
    if k >= h.len() {
        return None;
    }
    let hl = h.len();
    let overlap_ok = (1..=k).all(|step| t[k - step] == h[hl - 1 - step]);
    if !overlap_ok {
        return None;
    }
    let mut coords = h.to_vec();
    coords.extend_from_slice(&t[k + 1..]);
    Some(PointSequence::from_valid(coords))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::coord;
    use crate::geom::rand::{cut_into_fragments, draw_polyline, PolylineCfg, ReplayToken};
    use proptest::prelude::*;

    fn line(xy: &[(f64, f64)]) -> PointSequence {
        PointSequence::from_xy(xy).unwrap()
    }

    fn lines(slots: &[Slot]) -> Vec<&PointSequence> {
        slots.iter().filter_map(Slot::as_line).collect()
    }

    #[test]
    fn fuses_two_fragments_at_shared_endpoint() {
        let input = vec![
            Slot::Line(line(&[(-29.0, -27.0), (-30.0, -29.7), (-36.0, -31.0), (-45.0, -33.0)])),
            Slot::Line(line(&[(-45.0, -33.0), (-46.0, -32.0)])),
        ];
        let out = line_merge(&input);
        assert_eq!(
            out,
            vec![Slot::Line(line(&[
                (-29.0, -27.0),
                (-30.0, -29.7),
                (-36.0, -31.0),
                (-45.0, -33.0),
                (-46.0, -32.0)
            ]))]
        );
    }

    #[test]
    fn leaves_separate_fragments_alone() {
        let input = vec![
            Slot::Line(line(&[(-29.0, -27.0), (-30.0, -29.7), (-36.0, -31.0), (-45.0, -33.0)])),
            Slot::Line(line(&[(-45.2, -33.2), (-46.0, -32.0)])),
        ];
        assert_eq!(line_merge(&input), input);
    }

    #[test]
    fn tail_before_head_in_collection() {
        let input = vec![
            Slot::Line(line(&[(1.0, 0.0), (2.0, 0.0)])),
            Slot::Point(coord(9.0, 9.0)),
            Slot::Line(line(&[(0.0, 0.0), (1.0, 0.0)])),
        ];
        let out = line_merge(&input);
        assert_eq!(
            out,
            vec![
                Slot::Point(coord(9.0, 9.0)),
                Slot::Line(line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]))
            ]
        );
    }

    #[test]
    fn removed_slots_are_skipped_and_kept() {
        let input = vec![
            Slot::Removed,
            Slot::Line(line(&[(0.0, 0.0), (1.0, 0.0)])),
            Slot::Removed,
            Slot::Line(line(&[(1.0, 0.0), (1.0, 1.0)])),
        ];
        let out = line_merge(&input);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], Slot::Removed);
        assert_eq!(out[1], Slot::Removed);
        assert_eq!(
            out[2],
            Slot::Line(line(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]))
        );
    }

    #[test]
    fn cycle_closes_and_terminates() {
        let input = vec![
            Slot::Line(line(&[(0.0, 0.0), (1.0, 0.0)])),
            Slot::Line(line(&[(1.0, 0.0), (1.0, 1.0)])),
            Slot::Line(line(&[(1.0, 1.0), (0.0, 0.0)])),
        ];
        let out = line_merge(&input);
        let ls = lines(&out);
        assert_eq!(ls.len(), 1);
        assert!(ls[0].is_closed());
        assert_eq!(ls[0].coords().len(), 4);
    }

    #[test]
    fn splice_with_longer_overlap() {
        let head = line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let tail = line(&[(1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        assert_eq!(
            splice(&head, &tail),
            Some(line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]))
        );
        // Reversed roles: tail does not continue head.
        assert_eq!(splice(&tail, &head), None);
        // Overlap run disagrees.
        let bent = line(&[(5.0, 5.0), (2.0, 0.0), (3.0, 0.0)]);
        assert_eq!(splice(&head, &bent), None);
    }

    #[test]
    fn inner_touch_does_not_merge() {
        let a = line(&[(0.0, 0.0), (2.0, 0.0), (4.0, 0.0)]);
        let b = line(&[(2.0, 0.0), (2.0, 3.0)]);
        let input = vec![Slot::Line(a), Slot::Line(b)];
        assert_eq!(line_merge(&input), input);
    }

    proptest! {
        #[test]
        fn reassembles_shuffled_polyline(seed in 0u64..10_000, cuts in 0usize..8) {
            let original = draw_polyline(PolylineCfg::default(), ReplayToken { seed, index: 0 });
            let frags = cut_into_fragments(&original, cuts, ReplayToken { seed, index: 1 });
            let merged = merge_lines(frags);
            prop_assert_eq!(merged, vec![original]);
        }

        #[test]
        fn merge_is_idempotent(seed in 0u64..10_000, cuts in 0usize..6) {
            let cfg = PolylineCfg::default();
            let mut slots = Vec::new();
            for index in 0..3u64 {
                let l = draw_polyline(cfg, ReplayToken { seed, index });
                for f in cut_into_fragments(&l, cuts, ReplayToken { seed, index: index + 100 }) {
                    slots.push(Slot::Line(f));
                }
            }
            let once = line_merge(&slots);
            let twice = line_merge(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
