//! Engine configuration.
//!
//! Policy
//! - All predicates are exact; there is no tolerance to configure. The knobs
//!   below change topological conventions, not numerics.
//! - Entry points come in pairs: `relate(a, b)` uses `TopoCfg::default()`,
//!   `relate_with(a, b, cfg)` takes it explicitly.

/// Which line endpoints form the boundary of a lineal geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryRule {
    /// OGC rule: an endpoint is boundary iff it terminates an odd number of
    /// line components. A closed line has an empty boundary.
    #[default]
    Mod2,
    /// Every endpoint of every line component is boundary.
    EndPoint,
}

impl BoundaryRule {
    /// Whether a point touched by `count` line endpoints is on the boundary.
    #[inline]
    pub fn is_boundary(self, count: usize) -> bool {
        match self {
            BoundaryRule::Mod2 => count % 2 == 1,
            BoundaryRule::EndPoint => count > 0,
        }
    }
}

/// Topology configuration.
#[derive(Clone, Copy, Debug)]
pub struct TopoCfg {
    pub boundary_rule: BoundaryRule,
    /// Fuse surviving overlay line fragments into maximal polylines.
    pub merge_lines: bool,
}

impl Default for TopoCfg {
    fn default() -> Self {
        Self {
            boundary_rule: BoundaryRule::Mod2,
            merge_lines: true,
        }
    }
}
