//! Flat call surface for the geometry and format layer.
//!
//! Important
//! - Convenience re-exports only; the modules stay the source of truth.
//! - Names follow the engines: `relate`, the named predicates, `line_merge`,
//!   the overlay operations and the raw intersection primitives.

// Primitives
pub use crate::geom::{
    coord, Coord, Dimension, Envelope, Geometry, GeometryKind, Location, PointSequence, Polygon,
    Ring, Segment,
};
// Seeded samplers
pub use crate::geom::rand::{
    cut_into_fragments, draw_polyline, draw_star_polygon, PolylineCfg, ReplayToken as TopoReplay,
    StarCfg, VertexCount,
};
// Segment and polyline intersection
pub use crate::intersect::{
    edges_intersect, intersect, intersect_edges, segments_intersect, shared_paths,
    IntersectionPoint, SharedPaths,
};
// Line merge
pub use crate::merge::{line_merge, merge_lines, Slot};
// Relate
pub use crate::relate::{
    contains, covered_by, covers, crosses, disjoint, equals, intersects, overlaps, predicate_with,
    relate, relate_pattern, relate_with, touches, within, IntersectionMatrix, Pattern, Predicate,
};
// Overlay
pub use crate::overlay::{
    difference, intersection, overlay, overlay_with, sym_difference, union, OverlayOp,
};
// Configuration and errors
pub use crate::cfg::{BoundaryRule, TopoCfg};
pub use crate::error::{Result, TopoError};
