//! Seeded samplers for star polygons, monotone polylines and fragment sets.
//!
//! Purpose
//! - Feed property tests and benches with reproducible inputs. Every draw is
//!   keyed by a replay token `(seed, index)`, so a failing case can be re-drawn
//!   in isolation.
//!
//! Model
//! - Star polygon: `n` jittered angles around a center, one radius per angle,
//!   optionally snapped to a grid. Vertices are emitted in increasing angle, so
//!   the shell is counter-clockwise.
//! - Polyline: strictly increasing x, which keeps non-adjacent segments apart.
//! - Fragments: a polyline cut at random inner vertices, then shuffled.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::types::{coord, Coord, PointSequence, Polygon, Ring};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R, floor: usize) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(floor),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(floor);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finaliser on seed and index.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Star polygon sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct StarCfg {
    pub vertex_count: VertexCount,
    pub center: Vector2<f64>,
    /// Radii are drawn uniformly from `[r_min, r_max]`.
    pub r_min: f64,
    pub r_max: f64,
    /// Angular jitter as a fraction of the base spacing 2π/n. Clamped to [0, 0.45].
    pub angle_jitter_frac: f64,
    /// Snap vertices to multiples of `grid` (0 disables snapping).
    pub grid: f64,
}
impl Default for StarCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Uniform { min: 4, max: 10 },
            center: Vector2::zeros(),
            r_min: 4.0,
            r_max: 10.0,
            angle_jitter_frac: 0.3,
            grid: 1.0,
        }
    }
}

#[inline]
fn snap(p: Coord, grid: f64) -> Coord {
    if grid > 0.0 {
        coord((p.x / grid).round() * grid, (p.y / grid).round() * grid)
    } else {
        p
    }
}

/// Draw a counter-clockwise star-shaped polygon without holes.
///
/// Returns `None` when snapping collapses the outline below three distinct
/// vertices or flips its orientation.
pub fn draw_star_polygon(cfg: StarCfg, tok: ReplayToken) -> Option<Polygon> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng, 3);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.45);
    let r_lo = cfg.r_min.max(1e-9);
    let r_hi = cfg.r_max.max(r_lo);
    let delta = 2.0 * std::f64::consts::PI / (n as f64);
    let mut coords: Vec<Coord> = Vec::with_capacity(n + 1);
    for k in 0..n {
        let th = (k as f64) * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
        let r = rng.gen_range(r_lo..=r_hi);
        let p = snap(cfg.center + Vector2::new(th.cos() * r, th.sin() * r), cfg.grid);
        if coords.last() != Some(&p) {
            coords.push(p);
        }
    }
    while coords.len() > 1 && coords.first() == coords.last() {
        coords.pop();
    }
    if coords.len() < 3 {
        return None;
    }
    coords.push(coords[0]);
    let ring = Ring::new(PointSequence::new(coords).ok()?).ok()?;
    if !ring.is_ccw() {
        return None;
    }
    Some(Polygon::new(ring, Vec::new()))
}

/// Polyline sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct PolylineCfg {
    pub vertex_count: VertexCount,
    /// Largest x step; steps are integers in `1..=max_step`.
    pub max_step: u32,
    /// y is an integer in `-amplitude..=amplitude`.
    pub amplitude: i32,
}
impl Default for PolylineCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Uniform { min: 2, max: 16 },
            max_step: 3,
            amplitude: 10,
        }
    }
}

/// Draw an x-monotone polyline on the integer grid.
pub fn draw_polyline(cfg: PolylineCfg, tok: ReplayToken) -> PointSequence {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng, 2);
    let step = cfg.max_step.max(1);
    let amp = cfg.amplitude.abs();
    let mut x = 0.0;
    let coords: Vec<Coord> = (0..n)
        .map(|_| {
            x += f64::from(rng.gen_range(1..=step));
            coord(x, f64::from(rng.gen_range(-amp..=amp)))
        })
        .collect();
    PointSequence::from_valid(coords)
}

/// Cut `line` at up to `cuts` distinct inner vertices and shuffle the pieces.
/// Consecutive pieces share their cut vertex.
pub fn cut_into_fragments(line: &PointSequence, cuts: usize, tok: ReplayToken) -> Vec<PointSequence> {
    let mut rng = tok.to_std_rng();
    let coords = line.coords();
    let inner: Vec<usize> = (1..coords.len().saturating_sub(1)).collect();
    let mut at: Vec<usize> = inner
        .choose_multiple(&mut rng, cuts.min(inner.len()))
        .copied()
        .collect();
    at.sort_unstable();
    let mut pieces = Vec::with_capacity(at.len() + 1);
    let mut start = 0;
    for &cut in at.iter().chain(std::iter::once(&(coords.len() - 1))) {
        pieces.push(PointSequence::from_valid(coords[start..=cut].to_vec()));
        start = cut;
    }
    pieces.shuffle(&mut rng);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproducible_star() {
        let tok = ReplayToken { seed: 42, index: 7 };
        let a = draw_star_polygon(StarCfg::default(), tok);
        let b = draw_star_polygon(StarCfg::default(), tok);
        assert_eq!(a, b);
    }

    #[test]
    fn unsnapped_star_is_ccw() {
        let cfg = StarCfg {
            grid: 0.0,
            ..StarCfg::default()
        };
        for index in 0..20 {
            let p = draw_star_polygon(cfg, ReplayToken { seed: 3, index }).expect("unsnapped star");
            assert!(p.shell().is_ccw());
            assert!(p.area() > 0.0);
        }
    }

    #[test]
    fn fragments_cover_polyline() {
        let line = draw_polyline(PolylineCfg::default(), ReplayToken { seed: 1, index: 0 });
        let frags = cut_into_fragments(&line, 4, ReplayToken { seed: 1, index: 1 });
        let segs: usize = frags.iter().map(|f| f.coords().len() - 1).sum();
        assert_eq!(segs, line.coords().len() - 1);
        assert!(frags.iter().all(|f| f.coords().len() >= 2));
    }
}
