//! Reproducible random polygons and the demo scene.
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π), add bounded angular and
//!   radial jitter, connect the points in angle order. The result is
//!   star-shaped around its seed point and in general not convex.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG,
//!   so polygon `k` of a scene can be redrawn without drawing `0..k`.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::polygon::Polygon;

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct StarCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii are `base_radius * (1 + u)` with `u ∈ [-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    pub base_radius: f64,
    /// Random global phase in [0, 2π)?
    pub random_phase: bool,
}

impl Default for StarCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Uniform { min: 3, max: 9 },
            angle_jitter_frac: 0.3,
            radial_jitter: 0.4,
            base_radius: 0.5,
            random_phase: true,
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
        // SplitMix64 finalizer
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

/// Draw a star-shaped polygon around `center`.
pub fn draw_star_polygon(cfg: StarCfg, tok: ReplayToken, center: Vector2<f64>) -> Polygon {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.95);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * std::f64::consts::TAU
    } else {
        0.0
    };
    // jitter stays below half a spacing, so angles remain strictly increasing
    let vertices = (0..n)
        .map(|k| {
            let th = phase + (k as f64) * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let r = (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * rj) * r0;
            center + Vector2::new(th.cos() * r, th.sin() * r)
        })
        .collect();
    Polygon::new(vertices)
}

/// `count` random polygons with centers uniform in a disk of radius `spread`.
pub fn random_scene(count: usize, spread: f64, cfg: StarCfg, seed: u64) -> Vec<Polygon> {
    (0..count as u64)
        .map(|index| {
            let tok = ReplayToken { seed, index };
            // separate stream for the placement so shapes replay independently
            let mut rng = ReplayToken {
                seed: !seed,
                index,
            }
            .to_std_rng();
            let th = rng.gen::<f64>() * std::f64::consts::TAU;
            let r = spread * rng.gen::<f64>().sqrt();
            draw_star_polygon(cfg, tok, Vector2::new(th.cos() * r, th.sin() * r))
        })
        .collect()
}

/// Square, diamond, triangle and octagon placed around the origin.
pub fn demo_shapes() -> Vec<Polygon> {
    let square = [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)];
    let diamond = [(0.0, -0.5), (0.5, 0.0), (0.0, 0.5), (-0.5, 0.0)];
    let triangle = [(-0.5, -0.5), (0.5, -0.5), (0.0, 0.5)];
    let octagon = [
        (0.0, -0.5),
        (0.35, -0.35),
        (0.5, 0.0),
        (0.35, 0.35),
        (0.0, 0.5),
        (-0.35, 0.35),
        (-0.5, 0.0),
        (-0.35, -0.35),
    ];
    let shapes: [&[(f64, f64)]; 4] = [&square, &diamond, &triangle, &octagon];
    let offsets = [(-0.8, -1.0), (-1.0, 0.8), (1.2, -1.0), (1.0, 1.2)];
    shapes
        .iter()
        .zip(offsets)
        .map(|(shape, (dx, dy))| {
            Polygon::from_xy(&shape.iter().map(|&(x, y)| (x + dx, y + dy)).collect::<Vec<_>>())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::signed_area;

    #[test]
    fn replay_token_is_deterministic() {
        let cfg = StarCfg::default();
        let tok = ReplayToken { seed: 7, index: 3 };
        let a = draw_star_polygon(cfg, tok, Vector2::zeros());
        let b = draw_star_polygon(cfg, tok, Vector2::zeros());
        assert_eq!(a, b);
        let c = draw_star_polygon(cfg, ReplayToken { seed: 7, index: 4 }, Vector2::zeros());
        assert_ne!(a, c);
    }

    #[test]
    fn star_polygons_are_counterclockwise_and_bounded() {
        let cfg = StarCfg::default();
        for index in 0..50 {
            let p = draw_star_polygon(cfg, ReplayToken { seed: 1, index }, Vector2::zeros());
            assert!(p.len() >= 3 && p.len() <= 9);
            assert!(signed_area(p.vertices()) > 0.0);
            assert!(p.bounding_radius() <= cfg.base_radius * (1.0 + cfg.radial_jitter) + 1e-12);
        }
    }

    #[test]
    fn scene_is_reproducible() {
        let a = random_scene(5, 3.0, StarCfg::default(), 11);
        let b = random_scene(5, 3.0, StarCfg::default(), 11);
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
    }

    #[test]
    fn demo_scene_has_four_shapes() {
        let shapes = demo_shapes();
        assert_eq!(shapes.iter().map(Polygon::len).collect::<Vec<_>>(), vec![4, 4, 3, 8]);
        assert!((shapes[0].midpoint() - Vector2::new(-0.8, -1.0)).norm() < 1e-12);
    }
}
