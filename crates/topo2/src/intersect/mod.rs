//! Segment and polyline intersection.
//!
//! - `intersect`: two closed segments, zero to four typed points.
//! - `intersect_edges`: every segment pair of two polylines, deduplicated.
//! - `shared_paths`: collinear overlaps of two lineal geometries.
//!
//! All tests are exact; see `geom::util` for the shared predicates.

mod edges;
mod paths;
mod segment;

pub use edges::{edges_intersect, intersect_edges, vertex_role, VertexRole};
pub use paths::{shared_paths, SharedPaths};
pub use segment::{intersect, segments_intersect, IntersectionPoint};

#[cfg(test)]
mod tests;
