//! Noded view of two geometries.
//!
//! Both inputs are flattened into components (isolated points, directed edges,
//! polygons). Every edge is split at the points it shares with the other
//! input, so each resulting piece lies entirely in one location of the other
//! geometry. Nodes collect every vertex, every shared point and every isolated
//! point; they carry the point-dimensional part of the matrix.
//!
//! The construction is symmetric: noding `(a, b)` yields the pieces and nodes
//! of noding `(b, a)` with the roles swapped, which keeps `relate` transposable.
//!
//! A collection may hold polygons that overlap or share edges. Its edges are
//! first split against each other, and ring edges that run through the union
//! interior are marked buried: they count as interior, not boundary.

use crate::cfg::BoundaryRule;
use crate::error::{Result, TopoError};
use crate::geom::util::projection;
use crate::geom::{Coord, Geometry, Location, PointSequence, Polygon, Segment};
use crate::intersect::intersect;

/// What an edge belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EdgeKind {
    Line,
    /// Polygon ring; `interior_left` tells on which side of the directed edge
    /// the polygon interior lies.
    Ring { interior_left: bool },
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Edge {
    pub seg: Segment,
    pub kind: EdgeKind,
    /// Index of the owning line or ring within its geometry.
    pub chain: usize,
    /// Index of the owning polygon, for ring edges.
    pub owner: Option<usize>,
    /// Ring edge covered on both sides by the geometry's own polygons.
    pub buried: bool,
}

/// Linework a node is known to lie on, independent of rounding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Hint {
    Line,
    Ring,
}

impl From<EdgeKind> for Hint {
    fn from(k: EdgeKind) -> Self {
        match k {
            EdgeKind::Line => Hint::Line,
            EdgeKind::Ring { .. } => Hint::Ring,
        }
    }
}

/// A geometry flattened into the parts the engines reason about.
#[derive(Clone, Debug, Default)]
pub(crate) struct Components {
    pub points: Vec<Coord>,
    pub lines: Vec<PointSequence>,
    pub polygons: Vec<Polygon>,
    pub edges: Vec<Edge>,
    /// Line endpoints on the boundary under the configured rule.
    pub line_boundary: Vec<Coord>,
    /// Parts may overlap; locations follow their union.
    pub overlapping: bool,
}

impl Components {
    pub fn new(g: &Geometry, rule: BoundaryRule) -> Result<Self> {
        let mut c = Components::default();
        c.collect(g)?;
        let mut chain = 0usize;
        for line in &c.lines {
            for seg in line.segments() {
                c.edges.push(Edge {
                    seg,
                    kind: EdgeKind::Line,
                    chain,
                    owner: None,
                    buried: false,
                });
            }
            chain += 1;
        }
        for (owner, poly) in c.polygons.iter().enumerate() {
            for (k, ring) in poly.rings().enumerate() {
                let interior_left = (k == 0) == ring.is_ccw();
                for seg in ring.as_sequence().segments() {
                    c.edges.push(Edge {
                        seg,
                        kind: EdgeKind::Ring { interior_left },
                        chain,
                        owner: Some(owner),
                        buried: false,
                    });
                }
                chain += 1;
            }
        }
        c.line_boundary = line_boundary(&c.lines, rule);
        c.overlapping = matches!(g, Geometry::Collection(_));
        if c.overlapping {
            c.self_node();
        }
        Ok(c)
    }

    /// Split edges where they meet edges of other chains, then mark ring
    /// edges lying inside the union of the own polygons.
    fn self_node(&mut self) {
        let mut splits: Vec<Vec<Coord>> = self.edges.iter().map(|_| Vec::new()).collect();
        for (i, ei) in self.edges.iter().enumerate() {
            let env = ei.seg.envelope();
            for (j, ej) in self.edges.iter().enumerate().skip(i + 1) {
                if ei.chain == ej.chain || !env.intersects(&ej.seg.envelope()) {
                    continue;
                }
                for ip in intersect(ei.seg, ej.seg) {
                    splits[i].push(ip.coord);
                    splits[j].push(ip.coord);
                }
            }
        }
        let mut edges = Vec::with_capacity(self.edges.len());
        for (e, pts) in self.edges.iter().zip(splits) {
            edges.extend(split_segment(e.seg, pts).into_iter().map(|seg| Edge { seg, ..*e }));
        }
        self.edges = edges;
        let buried: Vec<bool> = self.edges.iter().map(|e| self.is_buried(e)).collect();
        for (e, b) in self.edges.iter_mut().zip(buried) {
            e.buried = b;
        }
    }

    /// A ring edge is buried when another own polygon covers its other side:
    /// it runs through that polygon's interior, or along its ring with the
    /// interiors on opposite sides.
    fn is_buried(&self, e: &Edge) -> bool {
        let (EdgeKind::Ring { interior_left }, Some(owner)) = (e.kind, e.owner) else {
            return false;
        };
        let back_to_back = self.edges.iter().any(|f| match f.kind {
            EdgeKind::Ring { interior_left: f_left }
                if f.owner != Some(owner) && f.seg.contains(e.seg.p0) && f.seg.contains(e.seg.p1) =>
            {
                let other_left = if e.seg.direction().dot(&f.seg.direction()) > 0.0 {
                    f_left
                } else {
                    !f_left
                };
                other_left != interior_left
            }
            _ => false,
        });
        let mid = e.seg.midpoint();
        back_to_back
            || self
                .polygons
                .iter()
                .enumerate()
                .any(|(k, poly)| k != owner && poly.locate(mid) == Location::Interior)
    }

    /// Location of `p` from the rings it lies on: boundary when one of them
    /// is not buried, interior when all are.
    fn ring_location(&self, p: Coord) -> Option<Location> {
        let mut buried = false;
        for e in &self.edges {
            if matches!(e.kind, EdgeKind::Ring { .. }) && e.seg.contains(p) {
                if !e.buried {
                    return Some(Location::Boundary);
                }
                buried = true;
            }
        }
        buried.then_some(Location::Interior)
    }

    fn collect(&mut self, g: &Geometry) -> Result<()> {
        match g {
            Geometry::Point(p) => self.points.push(*p),
            Geometry::MultiPoint(ps) => self.points.extend_from_slice(ps),
            Geometry::LineString(l) => self.push_line(l)?,
            Geometry::MultiLineString(ls) => {
                for l in ls {
                    self.push_line(l)?;
                }
            }
            Geometry::Polygon(p) => self.polygons.push(p.clone()),
            Geometry::MultiPolygon(ps) => self.polygons.extend(ps.iter().cloned()),
            Geometry::Collection(gs) => {
                for g in gs {
                    self.collect(g)?;
                }
            }
        }
        Ok(())
    }

    fn push_line(&mut self, l: &PointSequence) -> Result<()> {
        let count = l.coords().len();
        if count < 2 {
            return Err(TopoError::LineTooShort { count });
        }
        self.lines.push(l.clone());
        Ok(())
    }

    #[inline]
    pub fn is_areal(&self) -> bool {
        !self.polygons.is_empty()
    }

    fn polygon_location(&self, p: Coord) -> Location {
        let mut on_boundary = false;
        for poly in &self.polygons {
            match poly.locate(p) {
                Location::Interior => return Location::Interior,
                Location::Boundary => on_boundary = true,
                Location::Exterior => {}
            }
        }
        if on_boundary {
            Location::Boundary
        } else {
            Location::Exterior
        }
    }

    /// Location of `p` in the whole geometry. Areas dominate lines, lines
    /// dominate points. `hint` names linework `p` is known to lie on even if
    /// its rounded coordinates miss it.
    pub fn locate(&self, p: Coord, hint: Option<Hint>) -> Location {
        if self.overlapping {
            if let Some(loc) = self.ring_location(p) {
                return loc;
            }
        }
        if hint == Some(Hint::Ring) {
            return Location::Boundary;
        }
        match self.polygon_location(p) {
            Location::Exterior => {}
            loc => return loc,
        }
        let on_line = hint == Some(Hint::Line) || self.lines.iter().any(|l| l.contains_point(p));
        if on_line {
            return if self.line_boundary.contains(&p) {
                Location::Boundary
            } else {
                Location::Interior
            };
        }
        if self.points.contains(&p) {
            Location::Interior
        } else {
            Location::Exterior
        }
    }

    /// Where the segment `seg`, a piece of an edge of kind `kind`, sits in
    /// this geometry. The piece must not cross any of this geometry's edges.
    pub fn classify(&self, seg: Segment, kind: EdgeKind) -> PieceClass {
        let dir = seg.direction();
        let mut buried = false;
        for e in &self.edges {
            let EdgeKind::Ring { interior_left } = e.kind else {
                continue;
            };
            if e.seg.contains(seg.p0) && e.seg.contains(seg.p1) {
                if e.buried {
                    buried = true;
                    continue;
                }
                let same_side = match kind {
                    EdgeKind::Line => false,
                    EdgeKind::Ring {
                        interior_left: own_left,
                    } => {
                        let other_left = if dir.dot(&e.seg.direction()) > 0.0 {
                            interior_left
                        } else {
                            !interior_left
                        };
                        own_left == other_left
                    }
                };
                return PieceClass::OnRing { same_side };
            }
        }
        if buried || self.polygon_location(seg.midpoint()) == Location::Interior {
            return PieceClass::InArea;
        }
        let on_line = self.edges.iter().any(|e| {
            e.kind == EdgeKind::Line && e.seg.contains(seg.p0) && e.seg.contains(seg.p1)
        });
        if on_line {
            PieceClass::OnLine
        } else {
            PieceClass::Exterior
        }
    }
}

fn line_boundary(lines: &[PointSequence], rule: BoundaryRule) -> Vec<Coord> {
    let mut counts: Vec<(Coord, usize)> = Vec::new();
    for l in lines {
        for end in [l.first(), l.last()] {
            match counts.iter_mut().find(|(c, _)| *c == end) {
                Some((_, n)) => *n += 1,
                None => counts.push((end, 1)),
            }
        }
    }
    counts
        .into_iter()
        .filter(|&(_, n)| rule.is_boundary(n))
        .map(|(c, _)| c)
        .collect()
}

/// Location of a piece relative to the other geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PieceClass {
    Exterior,
    /// On a line of the other geometry (and not on or inside one of its areas).
    OnLine,
    /// On a ring of the other geometry. `same_side` is meaningful for ring
    /// pieces only: both interiors lie on the same side of the shared edge.
    OnRing { same_side: bool },
    /// Inside the interior of one of the other geometry's polygons.
    InArea,
}

impl PieceClass {
    #[inline]
    pub fn location(self) -> Location {
        match self {
            PieceClass::Exterior => Location::Exterior,
            PieceClass::OnLine | PieceClass::InArea => Location::Interior,
            PieceClass::OnRing { .. } => Location::Boundary,
        }
    }
}

/// Sub-segment of an edge between two consecutive split points.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Piece {
    pub seg: Segment,
    pub kind: EdgeKind,
    pub chain: usize,
    pub buried: bool,
    pub class: PieceClass,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Node {
    pub at: Coord,
    pub hint_a: Option<Hint>,
    pub hint_b: Option<Hint>,
}

/// Pieces of both inputs and the shared node set.
#[derive(Debug, Default)]
pub(crate) struct Noding {
    pub pieces_a: Vec<Piece>,
    pub pieces_b: Vec<Piece>,
    pub nodes: Vec<Node>,
}

impl Noding {
    pub fn build(a: &Components, b: &Components) -> Self {
        let mut splits_a: Vec<Vec<Coord>> = a.edges.iter().map(|_| Vec::new()).collect();
        let mut splits_b: Vec<Vec<Coord>> = b.edges.iter().map(|_| Vec::new()).collect();
        let mut nodes: Vec<Node> = Vec::new();

        for (ia, ea) in a.edges.iter().enumerate() {
            let env_a = ea.seg.envelope();
            for (ib, eb) in b.edges.iter().enumerate() {
                if !env_a.intersects(&eb.seg.envelope()) {
                    continue;
                }
                for ip in intersect(ea.seg, eb.seg) {
                    splits_a[ia].push(ip.coord);
                    splits_b[ib].push(ip.coord);
                    nodes.push(Node {
                        at: ip.coord,
                        hint_a: Some(ea.kind.into()),
                        hint_b: Some(eb.kind.into()),
                    });
                }
            }
        }
        for e in &a.edges {
            for at in [e.seg.p0, e.seg.p1] {
                nodes.push(Node {
                    at,
                    hint_a: Some(e.kind.into()),
                    hint_b: None,
                });
            }
        }
        for e in &b.edges {
            for at in [e.seg.p0, e.seg.p1] {
                nodes.push(Node {
                    at,
                    hint_a: None,
                    hint_b: Some(e.kind.into()),
                });
            }
        }
        for &at in a.points.iter().chain(b.points.iter()) {
            nodes.push(Node {
                at,
                hint_a: None,
                hint_b: None,
            });
        }

        Self {
            pieces_a: split_edges(&a.edges, splits_a, b),
            pieces_b: split_edges(&b.edges, splits_b, a),
            nodes: merge_nodes(nodes),
        }
    }
}

/// `seg` cut at `pts`, in order from `seg.p0`.
fn split_segment(seg: Segment, mut pts: Vec<Coord>) -> Vec<Segment> {
    let (p0, p1) = (seg.p0, seg.p1);
    pts.push(p0);
    pts.push(p1);
    pts.sort_by(|u, v| projection(*u, p0, p1).total_cmp(&projection(*v, p0, p1)));
    pts.dedup();
    pts.windows(2).map(|w| Segment::new(w[0], w[1])).collect()
}

fn split_edges(edges: &[Edge], splits: Vec<Vec<Coord>>, other: &Components) -> Vec<Piece> {
    let mut pieces = Vec::new();
    for (e, pts) in edges.iter().zip(splits) {
        for seg in split_segment(e.seg, pts) {
            pieces.push(Piece {
                seg,
                kind: e.kind,
                chain: e.chain,
                buried: e.buried,
                class: other.classify(seg, e.kind),
            });
        }
    }
    pieces
}

/// Collapse nodes with equal coordinates, keeping the strongest hint per side.
fn merge_nodes(mut nodes: Vec<Node>) -> Vec<Node> {
    nodes.sort_by(|u, v| u.at.x.total_cmp(&v.at.x).then(u.at.y.total_cmp(&v.at.y)));
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for n in nodes {
        match out.last_mut() {
            Some(last) if last.at == n.at => {
                last.hint_a = last.hint_a.max(n.hint_a);
                last.hint_b = last.hint_b.max(n.hint_b);
            }
            _ => out.push(n),
        }
    }
    out
}
