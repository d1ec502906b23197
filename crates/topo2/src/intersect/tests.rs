use super::*;
use crate::error::TopoError;
use crate::geom::util::orient;
use crate::geom::{coord, Coord, Geometry, PointSequence, Segment};
use proptest::prelude::*;

fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
    Segment::new(coord(x0, y0), coord(x1, y1))
}

fn coords(ips: &[IntersectionPoint]) -> Vec<Coord> {
    ips.iter().map(|ip| ip.coord).collect()
}

fn line(xy: &[(f64, f64)]) -> PointSequence {
    PointSequence::from_xy(xy).unwrap()
}

#[test]
fn proper_crossing() {
    let ips = intersect(seg(0.0, 0.0, 2.0, 2.0), seg(0.0, 2.0, 2.0, 0.0));
    assert_eq!(ips.len(), 1);
    let ip = ips[0];
    assert_eq!(ip.coord, coord(1.0, 1.0));
    assert!(ip.is_intersection);
    assert!(!ip.is_original_vertex);
    assert!(!ip.is_collinear);
    assert!(ip.is_entering);
}

#[test]
fn endpoint_touch_is_exact() {
    let ips = intersect(seg(0.0, 0.0, 2.0, 0.0), seg(1.0, 0.0, 1.0, 5.0));
    assert_eq!(coords(&ips), vec![coord(1.0, 0.0)]);
    assert!(ips[0].is_original_vertex);
    // A non-representable touch point stays the input vertex.
    let a = seg(0.0, 0.0, 3.0, 1.0);
    let t = coord(1.0, 1.0 / 3.0);
    let b = Segment::new(t, coord(1.0, 4.0));
    if orient(a.p0, a.p1, t) == 0.0 {
        assert_eq!(coords(&intersect(a, b)), vec![t]);
    }
}

#[test]
fn disjoint_segments() {
    assert!(intersect(seg(0.0, 0.0, 1.0, 1.0), seg(2.0, 0.0, 3.0, -5.0)).is_empty());
    // Supporting lines cross outside the extent of the first segment.
    assert!(intersect(seg(0.0, 0.0, 1.0, 0.0), seg(2.0, -1.0, 2.0, 1.0)).is_empty());
    // Parallel, not collinear.
    assert!(intersect(seg(0.0, 0.0, 4.0, 0.0), seg(0.0, 1.0, 4.0, 1.0)).is_empty());
    // Collinear, no overlap.
    assert!(intersect(seg(0.0, 0.0, 1.0, 0.0), seg(2.0, 0.0, 3.0, 0.0)).is_empty());
    assert!(!segments_intersect(seg(0.0, 0.0, 1.0, 0.0), seg(2.0, 0.0, 3.0, 0.0)));
}

#[test]
fn collinear_overlap_reports_interval_ends() {
    let ips = intersect(seg(0.0, 0.0, 4.0, 0.0), seg(2.0, 0.0, 6.0, 0.0));
    assert_eq!(coords(&ips), vec![coord(2.0, 0.0), coord(4.0, 0.0)]);
    assert!(ips.iter().all(|ip| ip.is_collinear && ip.is_original_vertex));
    assert!(ips.iter().all(|ip| !ip.is_entering));

    let opposite = intersect(seg(0.0, 0.0, 4.0, 0.0), seg(6.0, 0.0, 2.0, 0.0));
    assert_eq!(opposite.len(), 2);
    assert!(opposite.iter().all(|ip| ip.is_entering));

    // Identical segments: both endpoints once each.
    let same = intersect(seg(0.0, 0.0, 1.0, 1.0), seg(0.0, 0.0, 1.0, 1.0));
    assert_eq!(coords(&same), vec![coord(0.0, 0.0), coord(1.0, 1.0)]);

    // Collinear touch at a single shared endpoint.
    let touch = intersect(seg(0.0, 0.0, 1.0, 0.0), seg(1.0, 0.0, 3.0, 0.0));
    assert_eq!(coords(&touch), vec![coord(1.0, 0.0)]);
}

#[test]
fn zero_length_segment_acts_as_point() {
    let p = Segment::new(coord(1.0, 1.0), coord(1.0, 1.0));
    assert_eq!(
        coords(&intersect(seg(0.0, 0.0, 2.0, 2.0), p)),
        vec![coord(1.0, 1.0)]
    );
    assert!(intersect(seg(0.0, 0.0, 2.0, 0.0), p).is_empty());
}

#[test]
fn edges_deduplicate_shared_vertex() {
    let a = line(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
    let b = line(&[(0.0, 2.0), (2.0, 0.0)]);
    let ips = intersect_edges(&a, &b);
    assert_eq!(coords(&ips), vec![coord(1.0, 1.0)]);
    assert!(ips[0].is_original_vertex);
    assert!(edges_intersect(&a, &b));

    let far = line(&[(10.0, 10.0), (11.0, 10.0)]);
    assert!(intersect_edges(&a, &far).is_empty());
}

#[test]
fn edges_collect_every_crossing() {
    let zigzag = line(&[(0.0, 0.0), (1.0, 2.0), (2.0, 0.0), (3.0, 2.0)]);
    let axis = line(&[(0.0, 1.0), (3.0, 1.0)]);
    let ips = intersect_edges(&zigzag, &axis);
    assert_eq!(
        coords(&ips),
        vec![coord(0.5, 1.0), coord(1.5, 1.0), coord(2.5, 1.0)]
    );
}

#[test]
fn vertex_roles() {
    let l = line(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
    assert_eq!(vertex_role(coord(0.0, 0.0), &l), Some(VertexRole::Endpoint));
    assert_eq!(vertex_role(coord(2.0, 0.0), &l), Some(VertexRole::Endpoint));
    assert_eq!(vertex_role(coord(1.0, 1.0), &l), Some(VertexRole::Inner));
    assert_eq!(vertex_role(coord(0.5, 0.5), &l), None);
}

#[test]
fn shared_paths_along_first_argument() {
    let a = Geometry::line_string(&[
        (151.0, 100.0),
        (126.0, 156.25),
        (126.0, 125.0),
        (90.0, 161.0),
        (76.0, 175.0),
    ])
    .unwrap();
    let b = Geometry::multi_line_string(&[
        &[
            (26.0, 125.0),
            (26.0, 200.0),
            (126.0, 200.0),
            (126.0, 125.0),
            (26.0, 125.0),
        ],
        &[(51.0, 150.0), (101.0, 150.0), (76.0, 175.0), (51.0, 150.0)],
    ])
    .unwrap();
    let paths = shared_paths(&a, &b).unwrap();
    let want = vec![
        line(&[(126.0, 156.25), (126.0, 125.0)]),
        line(&[(101.0, 150.0), (90.0, 161.0)]),
        line(&[(90.0, 161.0), (76.0, 175.0)]),
    ];
    assert_eq!(paths.forward, want);
    assert!(paths.backward.is_empty());

    let reversed = shared_paths(&b, &a).unwrap();
    assert!(reversed.forward.len() == 3 && reversed.backward.is_empty());
}

#[test]
fn shared_paths_backward_and_unsupported() {
    let a = Geometry::line_string(&[(0.0, 0.0), (10.0, 0.0)]).unwrap();
    let b = Geometry::line_string(&[(8.0, 0.0), (2.0, 0.0)]).unwrap();
    let paths = shared_paths(&a, &b).unwrap();
    assert!(paths.forward.is_empty());
    assert_eq!(paths.backward, vec![line(&[(2.0, 0.0), (8.0, 0.0)])]);

    let poly = Geometry::polygon(
        &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)],
        &[],
    )
    .unwrap();
    assert!(matches!(
        shared_paths(&a, &poly),
        Err(TopoError::Unsupported { op: "shared_paths", .. })
    ));
}

fn small_coord() -> impl Strategy<Value = Coord> {
    (-4i32..=4, -4i32..=4).prop_map(|(x, y)| coord(f64::from(x), f64::from(y)))
}

fn sorted(mut v: Vec<IntersectionPoint>) -> Vec<IntersectionPoint> {
    v.sort_by(|p, q| {
        p.coord
            .x
            .total_cmp(&q.coord.x)
            .then(p.coord.y.total_cmp(&q.coord.y))
    });
    v
}

proptest! {
    #[test]
    fn intersection_is_symmetric(a0 in small_coord(), a1 in small_coord(), b0 in small_coord(), b1 in small_coord()) {
        let a = Segment::new(a0, a1);
        let b = Segment::new(b0, b1);
        let ab = sorted(intersect(a, b));
        let ba = sorted(intersect(b, a));
        prop_assert_eq!(ab.len(), ba.len());
        for (p, q) in ab.iter().zip(ba.iter()) {
            prop_assert_eq!(p.coord, q.coord);
            prop_assert_eq!(p.is_collinear, q.is_collinear);
            prop_assert_eq!(p.is_original_vertex, q.is_original_vertex);
            if p.is_collinear {
                prop_assert_eq!(p.is_entering, q.is_entering);
            } else {
                prop_assert_eq!(p.is_entering, !q.is_entering);
            }
        }
    }

    #[test]
    fn shared_endpoint_touch(p in small_coord(), q in small_coord(), r in small_coord(), flip_a in any::<bool>(), flip_b in any::<bool>()) {
        prop_assume!(orient(p, q, r) != 0.0);
        let a = if flip_a { Segment::new(q, p) } else { Segment::new(p, q) };
        let b = if flip_b { Segment::new(r, p) } else { Segment::new(p, r) };
        let ips = intersect(a, b);
        prop_assert_eq!(ips.len(), 1);
        prop_assert_eq!(ips[0].coord, p);
        prop_assert!(ips[0].is_original_vertex);
    }
}
