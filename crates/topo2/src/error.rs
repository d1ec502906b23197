//! Error type shared by every engine.
//!
//! Two families: malformed input (caught at construction or at the entry of
//! `relate`/`overlay`) and unsupported kind combinations. Numerically degenerate
//! configurations are never errors; the engines handle them as ordinary branches.

use thiserror::Error;

use crate::geom::GeometryKind;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopoError {
    #[error("coordinate sequence is empty")]
    EmptySequence,

    #[error("coordinate {index} is not finite")]
    NonFiniteCoordinate { index: usize },

    #[error("ring is not closed: first {first:?} differs from last {last:?}")]
    UnclosedRing { first: (f64, f64), last: (f64, f64) },

    #[error("ring has {count} coordinates, at least 4 are required")]
    RingTooShort { count: usize },

    #[error("line string has {count} coordinate(s), at least 2 are required")]
    LineTooShort { count: usize },

    #[error("invalid intersection matrix pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("{op} is not implemented for {a} / {b}")]
    Unsupported {
        op: &'static str,
        a: GeometryKind,
        b: GeometryKind,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, TopoError>;
