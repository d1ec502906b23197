//! Planar topology kernel: DE-9IM relate, segment intersection, line merge
//! and overlay.
//!
//! Layout
//! - `geom`: coordinates, segments, point sequences, rings, polygons and the
//!   `Geometry` enum, plus exact orientation predicates and seeded samplers.
//! - `intersect`: segment and polyline intersection, shared paths.
//! - `merge`: fuse line fragments into maximal polylines.
//! - `relate`: intersection matrix and named predicates.
//! - `overlay`: union, intersection, difference, symmetric difference.
//!
//! API Policy
//! - Engines consume already-decomposed geometries; parsing and text formats
//!   live with the caller. Every entry point is a pure function.
//! - Malformed input fails at construction (`PointSequence::new`,
//!   `Ring::new`); engines return `TopoError` only for what construction
//!   cannot rule out.

pub mod api;
pub mod cfg;
pub mod error;
pub mod geom;
pub mod intersect;
pub mod merge;
pub mod overlay;
pub mod relate;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::{BoundaryRule, TopoCfg};
pub use error::{Result, TopoError};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::{BoundaryRule, TopoCfg};
    pub use crate::geom::{coord, Coord, Geometry, GeometryKind, Location, PointSequence, Polygon, Ring};
    pub use crate::overlay::{difference, intersection, sym_difference, union, OverlayOp};
    pub use crate::relate::{relate, Dimension, IntersectionMatrix, Predicate};
    pub use nalgebra::Vector2 as Vec2;
}
