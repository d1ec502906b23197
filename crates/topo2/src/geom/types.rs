//! Planar primitives shared by every engine.
//!
//! - `Coord`: exact-equality planar coordinate (nalgebra vector).
//! - `PointSequence`: ordered, non-empty polyline; `Ring`: closed sequence.
//! - `Polygon`: shell plus holes; `Geometry`: the kinds the relate model knows.
//!
//! Invariants are enforced at construction and the fields stay private, so the
//! engines never re-check closure, emptiness or finiteness.

use std::fmt;

use nalgebra::Vector2;

use super::util::{locate_in_ring, on_segment, signed_area};
use crate::error::{Result, TopoError};

/// Planar coordinate. Equality is exact on both components; callers needing a
/// tolerance snap before calling in.
pub type Coord = Vector2<f64>;

#[inline]
pub fn coord(x: f64, y: f64) -> Coord {
    Vector2::new(x, y)
}

/// Location of a point relative to the point sets of a geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::Interior, Location::Boundary, Location::Exterior];

    /// Row/column index in an intersection matrix.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Location::Interior => 0,
            Location::Boundary => 1,
            Location::Exterior => 2,
        }
    }
}

/// Topological dimension of a point set; `Empty` sorts below every other value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Empty,
    Point,
    Curve,
    Surface,
}

impl Dimension {
    /// Numeric value in the DE-9IM convention (-1, 0, 1, 2).
    #[inline]
    pub fn value(self) -> i8 {
        match self {
            Dimension::Empty => -1,
            Dimension::Point => 0,
            Dimension::Curve => 1,
            Dimension::Surface => 2,
        }
    }

    /// Canonical matrix symbol (`F`, `0`, `1`, `2`).
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Dimension::Empty => 'F',
            Dimension::Point => '0',
            Dimension::Curve => '1',
            Dimension::Surface => '2',
        }
    }
}

/// Closed axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    pub min: Coord,
    pub max: Coord,
}

impl Envelope {
    #[inline]
    pub fn of_segment(a: Coord, b: Coord) -> Self {
        Self {
            min: coord(a.x.min(b.x), a.y.min(b.y)),
            max: coord(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn of_coords(coords: &[Coord]) -> Option<Self> {
        let (first, rest) = coords.split_first()?;
        let mut env = Self {
            min: *first,
            max: *first,
        };
        for c in rest {
            env.min = coord(env.min.x.min(c.x), env.min.y.min(c.y));
            env.max = coord(env.max.x.max(c.x), env.max.y.max(c.y));
        }
        Some(env)
    }

    #[inline]
    pub fn contains(&self, p: Coord) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    #[inline]
    pub fn intersects(&self, other: &Envelope) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Overlap of two boxes, if any.
    pub fn intersection(&self, other: &Envelope) -> Option<Envelope> {
        if !self.intersects(other) {
            return None;
        }
        Some(Envelope {
            min: coord(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: coord(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        })
    }

    /// Closest point of the box to `p` (component-wise clamp).
    #[inline]
    pub fn clamp(&self, p: Coord) -> Coord {
        coord(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
        )
    }
}

/// Directed segment `p0 → p1`. Zero length is allowed and behaves as a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub p0: Coord,
    pub p1: Coord,
}

impl Segment {
    #[inline]
    pub fn new(p0: Coord, p1: Coord) -> Self {
        Self { p0, p1 }
    }

    #[inline]
    pub fn direction(&self) -> Coord {
        self.p1 - self.p0
    }

    #[inline]
    pub fn envelope(&self) -> Envelope {
        Envelope::of_segment(self.p0, self.p1)
    }

    #[inline]
    pub fn midpoint(&self) -> Coord {
        (self.p0 + self.p1) * 0.5
    }

    /// Exact closed-segment membership.
    #[inline]
    pub fn contains(&self, p: Coord) -> bool {
        on_segment(p, self.p0, self.p1)
    }

    #[inline]
    pub fn is_endpoint(&self, p: Coord) -> bool {
        p == self.p0 || p == self.p1
    }
}

/// Ordered, non-empty list of finite coordinates (a polyline or a ring).
fn check_finite(coords: &[Coord]) -> Result<()> {
    match coords.iter().position(|c| !(c.x.is_finite() && c.y.is_finite())) {
        Some(index) => Err(TopoError::NonFiniteCoordinate { index }),
        None => Ok(()),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointSequence {
    coords: Vec<Coord>,
}

impl PointSequence {
    pub fn new(coords: Vec<Coord>) -> Result<Self> {
        if coords.is_empty() {
            return Err(TopoError::EmptySequence);
        }
        check_finite(&coords)?;
        Ok(Self { coords })
    }

    pub fn from_xy(xy: &[(f64, f64)]) -> Result<Self> {
        Self::new(xy.iter().map(|&(x, y)| coord(x, y)).collect())
    }

    /// Internal constructor for sequences assembled from already validated
    /// coordinates.
    pub(crate) fn from_valid(coords: Vec<Coord>) -> Self {
        debug_assert!(!coords.is_empty());
        Self { coords }
    }

    #[inline]
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    #[inline]
    pub fn first(&self) -> Coord {
        self.coords[0]
    }

    #[inline]
    pub fn last(&self) -> Coord {
        self.coords[self.coords.len() - 1]
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.first() == self.last()
    }

    /// Consecutive segments; a single-coordinate sequence has none.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.coords.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    pub fn reversed(&self) -> Self {
        let mut coords = self.coords.clone();
        coords.reverse();
        Self { coords }
    }

    pub fn envelope(&self) -> Envelope {
        // Non-empty by construction.
        Envelope::of_coords(&self.coords).unwrap_or(Envelope {
            min: self.coords[0],
            max: self.coords[0],
        })
    }

    /// Whether `p` lies on the polyline (any vertex or segment).
    pub fn contains_point(&self, p: Coord) -> bool {
        if self.coords.len() == 1 {
            return self.coords[0] == p;
        }
        self.segments().any(|s| s.contains(p))
    }
}

/// Closed point sequence used as a polygon boundary (at least 4 coordinates).
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    seq: PointSequence,
}

impl Ring {
    pub fn new(seq: PointSequence) -> Result<Self> {
        let count = seq.coords().len();
        if count < 4 {
            return Err(TopoError::RingTooShort { count });
        }
        if !seq.is_closed() {
            let (f, l) = (seq.first(), seq.last());
            return Err(TopoError::UnclosedRing {
                first: (f.x, f.y),
                last: (l.x, l.y),
            });
        }
        Ok(Self { seq })
    }

    pub fn from_xy(xy: &[(f64, f64)]) -> Result<Self> {
        Self::new(PointSequence::from_xy(xy)?)
    }

    #[inline]
    pub fn coords(&self) -> &[Coord] {
        self.seq.coords()
    }

    #[inline]
    pub fn as_sequence(&self) -> &PointSequence {
        &self.seq
    }

    /// Shoelace area; positive for counter-clockwise rings.
    #[inline]
    pub fn signed_area(&self) -> f64 {
        signed_area(self.coords())
    }

    #[inline]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Point-in-ring with exact boundary detection.
    #[inline]
    pub fn locate(&self, p: Coord) -> Location {
        locate_in_ring(p, self.coords())
    }

    pub fn reversed(&self) -> Self {
        Self {
            seq: self.seq.reversed(),
        }
    }
}

/// Polygon: one shell and zero or more holes.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    shell: Ring,
    holes: Vec<Ring>,
}

impl Polygon {
    pub fn new(shell: Ring, holes: Vec<Ring>) -> Self {
        Self { shell, holes }
    }

    pub fn from_xy(shell: &[(f64, f64)], holes: &[&[(f64, f64)]]) -> Result<Self> {
        let shell = Ring::from_xy(shell)?;
        let holes = holes
            .iter()
            .map(|h| Ring::from_xy(h))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(shell, holes))
    }

    #[inline]
    pub fn shell(&self) -> &Ring {
        &self.shell
    }

    #[inline]
    pub fn holes(&self) -> &[Ring] {
        &self.holes
    }

    /// Shell first, then holes.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> + '_ {
        std::iter::once(&self.shell).chain(self.holes.iter())
    }

    /// Interior of the shell and exterior of every hole is Interior.
    pub fn locate(&self, p: Coord) -> Location {
        match self.shell.locate(p) {
            Location::Exterior => Location::Exterior,
            Location::Boundary => Location::Boundary,
            Location::Interior => {
                for hole in &self.holes {
                    match hole.locate(p) {
                        Location::Interior => return Location::Exterior,
                        Location::Boundary => return Location::Boundary,
                        Location::Exterior => {}
                    }
                }
                Location::Interior
            }
        }
    }

    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| h.signed_area().abs()).sum();
        self.shell.signed_area().abs() - holes
    }
}

/// Geometry kinds understood by the relate and overlay engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::LineString => "LineString",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
        };
        f.write_str(name)
    }
}

/// Decomposed planar geometry as handed in by the geometry/format layer.
///
/// An empty `Collection` is the canonical empty result.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Coord),
    MultiPoint(Vec<Coord>),
    LineString(PointSequence),
    MultiLineString(Vec<PointSequence>),
    Polygon(Polygon),
    MultiPolygon(Vec<Polygon>),
    Collection(Vec<Geometry>),
}

impl Geometry {
    #[inline]
    pub fn empty() -> Self {
        Geometry::Collection(Vec::new())
    }

    pub fn point(x: f64, y: f64) -> Result<Self> {
        let p = coord(x, y);
        check_finite(&[p])?;
        Ok(Geometry::Point(p))
    }

    /// Empty input gives the empty multi point.
    pub fn multi_point(xy: &[(f64, f64)]) -> Result<Self> {
        let coords: Vec<Coord> = xy.iter().map(|&(x, y)| coord(x, y)).collect();
        check_finite(&coords)?;
        Ok(Geometry::MultiPoint(coords))
    }

    pub fn line_string(xy: &[(f64, f64)]) -> Result<Self> {
        Ok(Geometry::LineString(PointSequence::from_xy(xy)?))
    }

    pub fn multi_line_string(lines: &[&[(f64, f64)]]) -> Result<Self> {
        let lines = lines
            .iter()
            .map(|l| PointSequence::from_xy(l))
            .collect::<Result<Vec<_>>>()?;
        Ok(Geometry::MultiLineString(lines))
    }

    pub fn polygon(shell: &[(f64, f64)], holes: &[&[(f64, f64)]]) -> Result<Self> {
        Ok(Geometry::Polygon(Polygon::from_xy(shell, holes)?))
    }

    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::Collection(_) => GeometryKind::GeometryCollection,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) | Geometry::LineString(_) | Geometry::Polygon(_) => false,
            Geometry::MultiPoint(v) => v.is_empty(),
            Geometry::MultiLineString(v) => v.is_empty(),
            Geometry::MultiPolygon(v) => v.is_empty(),
            Geometry::Collection(v) => v.iter().all(Geometry::is_empty),
        }
    }

    /// Highest dimension among the non-empty components.
    pub fn dimension(&self) -> Dimension {
        match self {
            Geometry::Point(_) => Dimension::Point,
            Geometry::LineString(_) => Dimension::Curve,
            Geometry::Polygon(_) => Dimension::Surface,
            Geometry::MultiPoint(v) if !v.is_empty() => Dimension::Point,
            Geometry::MultiLineString(v) if !v.is_empty() => Dimension::Curve,
            Geometry::MultiPolygon(v) if !v.is_empty() => Dimension::Surface,
            Geometry::Collection(v) => v
                .iter()
                .map(Geometry::dimension)
                .max()
                .unwrap_or(Dimension::Empty),
            _ => Dimension::Empty,
        }
    }

    /// Total enclosed area of the polygonal components.
    pub fn area(&self) -> f64 {
        match self {
            Geometry::Polygon(p) => p.area(),
            Geometry::MultiPolygon(ps) => ps.iter().map(Polygon::area).sum(),
            Geometry::Collection(v) => v.iter().map(Geometry::area).sum(),
            _ => 0.0,
        }
    }
}
