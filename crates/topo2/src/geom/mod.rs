//! Planar geometric primitives.
//!
//! Purpose
//! - Shared vocabulary for the intersection, merge, relate and overlay engines:
//!   exact coordinates, validated point sequences, rings and polygons, plus the
//!   decomposed `Geometry` handed in by the geometry/format layer.
//!
//! Assumptions and conventions
//! - Coordinate equality is exact. No engine applies a tolerance.
//! - Rings are closed and have at least four coordinates; shells may have
//!   either orientation on input.
//! - Empty geometries are represented by empty multi-variants or collections,
//!   never by empty sequences.
//!
//! Code cross-refs: `PointSequence`, `Ring`, `Polygon`, `Geometry`, `util::orient`

pub mod rand;
mod types;
pub mod util;

pub use types::{
    coord, Coord, Dimension, Envelope, Geometry, GeometryKind, Location, PointSequence, Polygon,
    Ring, Segment,
};

#[cfg(test)]
mod tests;
