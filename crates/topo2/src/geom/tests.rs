use super::util::{locate_in_ring, on_segment, orient, signed_area, winding_number};
use super::*;
use crate::error::TopoError;

fn square(lo: f64, hi: f64) -> Vec<(f64, f64)> {
    vec![(lo, lo), (hi, lo), (hi, hi), (lo, hi), (lo, lo)]
}

#[test]
fn orientation_signs() {
    let a = coord(0.0, 0.0);
    let b = coord(2.0, 0.0);
    assert!(orient(a, b, coord(1.0, 1.0)) > 0.0);
    assert!(orient(a, b, coord(1.0, -1.0)) < 0.0);
    assert_eq!(orient(a, b, coord(5.0, 0.0)), 0.0);
}

#[test]
fn on_segment_is_closed_and_exact() {
    let a = coord(0.0, 0.0);
    let b = coord(2.0, 2.0);
    assert!(on_segment(a, a, b));
    assert!(on_segment(b, a, b));
    assert!(on_segment(coord(1.0, 1.0), a, b));
    // Collinear but beyond the extent.
    assert!(!on_segment(coord(3.0, 3.0), a, b));
    assert!(!on_segment(coord(1.0, 1.0 + 1e-12), a, b));
}

#[test]
fn ring_location_and_winding() {
    let r = Ring::from_xy(&square(0.0, 6.0)).unwrap();
    assert!(r.is_ccw());
    assert_eq!(r.signed_area(), 36.0);
    assert_eq!(r.locate(coord(3.0, 3.0)), Location::Interior);
    assert_eq!(r.locate(coord(6.0, 2.0)), Location::Boundary);
    assert_eq!(r.locate(coord(0.0, 0.0)), Location::Boundary);
    assert_eq!(r.locate(coord(7.0, 3.0)), Location::Exterior);
    // Orientation does not change location, only the winding sign.
    let cw = r.reversed();
    assert!(!cw.is_ccw());
    assert_eq!(winding_number(coord(3.0, 3.0), cw.coords()), -1);
    assert_eq!(
        locate_in_ring(coord(3.0, 3.0), cw.coords()),
        Location::Interior
    );
    assert_eq!(signed_area(cw.coords()), -36.0);
}

#[test]
fn polygon_with_hole() {
    let hole = square(2.5, 4.5);
    let p = Polygon::from_xy(&square(2.0, 5.0), &[&hole]).unwrap();
    assert_eq!(p.locate(coord(3.0, 3.0)), Location::Exterior);
    assert_eq!(p.locate(coord(2.5, 3.0)), Location::Boundary);
    assert_eq!(p.locate(coord(2.2, 2.2)), Location::Interior);
    assert_eq!(p.locate(coord(5.0, 5.0)), Location::Boundary);
    assert_eq!(p.area(), 9.0 - 4.0);
    assert_eq!(p.rings().count(), 2);
}

#[test]
fn construction_rejects_malformed_input() {
    assert_eq!(PointSequence::new(vec![]), Err(TopoError::EmptySequence));
    assert_eq!(
        PointSequence::from_xy(&[(0.0, 0.0), (f64::NAN, 1.0)]),
        Err(TopoError::NonFiniteCoordinate { index: 1 })
    );
    assert!(matches!(
        Ring::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
        Err(TopoError::UnclosedRing { .. })
    ));
    assert_eq!(
        Ring::from_xy(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]),
        Err(TopoError::RingTooShort { count: 3 })
    );
}

#[test]
fn point_constructors_reject_non_finite() {
    assert!(matches!(
        Geometry::point(f64::NAN, 0.0),
        Err(TopoError::NonFiniteCoordinate { index: 0 })
    ));
    assert!(matches!(
        Geometry::multi_point(&[(0.0, 0.0), (1.0, 1.0), (f64::INFINITY, 2.0)]),
        Err(TopoError::NonFiniteCoordinate { index: 2 })
    ));
    assert!(Geometry::multi_point(&[]).unwrap().is_empty());
}

#[test]
fn sequence_accessors() {
    let s = PointSequence::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).unwrap();
    assert_eq!(s.first(), coord(0.0, 0.0));
    assert_eq!(s.last(), coord(1.0, 1.0));
    assert!(!s.is_closed());
    assert_eq!(s.segments().count(), 2);
    assert_eq!(s.reversed().first(), coord(1.0, 1.0));
    assert!(s.contains_point(coord(1.0, 0.5)));
    assert!(!s.contains_point(coord(0.5, 0.5)));
    let env = s.envelope();
    assert_eq!(env.min, coord(0.0, 0.0));
    assert_eq!(env.max, coord(1.0, 1.0));
}

#[test]
fn envelope_overlap_and_clamp() {
    let a = Envelope::of_segment(coord(0.0, 0.0), coord(2.0, 2.0));
    let b = Envelope::of_segment(coord(1.0, 3.0), coord(3.0, 1.0));
    let i = a.intersection(&b).unwrap();
    assert_eq!(i.min, coord(1.0, 1.0));
    assert_eq!(i.max, coord(2.0, 2.0));
    assert_eq!(i.clamp(coord(5.0, 0.0)), coord(2.0, 1.0));
    let c = Envelope::of_segment(coord(5.0, 5.0), coord(6.0, 6.0));
    assert!(a.intersection(&c).is_none());
}

#[test]
fn geometry_dimension_and_emptiness() {
    assert_eq!(Geometry::point(1.0, 2.0).unwrap().dimension(), Dimension::Point);
    assert_eq!(Geometry::empty().dimension(), Dimension::Empty);
    assert!(Geometry::empty().is_empty());
    assert!(Geometry::MultiPolygon(vec![]).is_empty());
    let mixed = Geometry::Collection(vec![
        Geometry::point(0.0, 0.0).unwrap(),
        Geometry::line_string(&[(0.0, 0.0), (1.0, 0.0)]).unwrap(),
    ]);
    assert_eq!(mixed.dimension(), Dimension::Curve);
    assert_eq!(mixed.kind(), GeometryKind::GeometryCollection);
    assert_eq!(GeometryKind::MultiLineString.to_string(), "MultiLineString");
    assert!(Dimension::Empty < Dimension::Point && Dimension::Curve < Dimension::Surface);
    assert_eq!(Dimension::Surface.symbol(), '2');
    assert_eq!(Dimension::Empty.value(), -1);
}
