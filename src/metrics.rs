//! Hex geometry constants, edge classification, and the noise dependency.
//!
//! Noise is not a global: a [`HexMetrics`] value carries the injected
//! [`NoiseSource`] and is owned by the grid that uses it.

use std::sync::LazyLock;

use bevy::math::{Vec2, Vec3, Vec4};
use bevy::reflect::Reflect;
use hexx::{HexLayout, HexOrientation};
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use crate::math;
use crate::terrain::NoiseSettings;

/// Distance from a cell center to any of its corners.
pub const OUTER_RADIUS: f32 = 10.0;

/// Distance from a cell center to the middle of any edge.
pub const INNER_RADIUS: f32 = OUTER_RADIUS * 0.866_025_4;

/// Pointy-top layout with [`OUTER_RADIUS`] cells; layout `y` is world `z`.
pub static HEX_LAYOUT: LazyLock<HexLayout> = LazyLock::new(|| HexLayout {
    orientation: HexOrientation::Pointy,
    scale: Vec2::splat(OUTER_RADIUS),
    ..Default::default()
});

/// World-space height of one elevation level.
pub const ELEVATION_STEP: f32 = 3.0;

/// Maximum vertical offset added to a cell by noise.
pub const ELEVATION_PERTURB_STRENGTH: f32 = 1.5;

/// World-to-noise-space scale used when sampling.
pub const NOISE_SCALE: f64 = 0.003;

/// Cells per chunk along X.
pub const CHUNK_SIZE_X: usize = 6;

/// Cells per chunk along Z.
pub const CHUNK_SIZE_Z: usize = 6;

/// Terrain transition between two adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeType {
    /// Same elevation.
    Flat,
    /// Small step, walkable and drawn as terraces.
    Slope,
    /// Anything steeper.
    Cliff,
}

/// Elevation-difference thresholds for [`EdgeType`] classification.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct EdgeThresholds {
    /// Largest absolute difference still classified as a slope.
    pub slope_max: u32,
}

impl Default for EdgeThresholds {
    fn default() -> Self {
        Self { slope_max: 1 }
    }
}

impl EdgeThresholds {
    /// Classifies the edge between cells at `a` and `b`.
    pub fn classify(&self, a: i32, b: i32) -> EdgeType {
        match a.abs_diff(b) {
            0 => EdgeType::Flat,
            d if d <= self.slope_max => EdgeType::Slope,
            _ => EdgeType::Cliff,
        }
    }
}

/// Deterministic 4-channel noise field sampled at world positions.
///
/// Every channel is expected in `[0, 1]`.
pub trait NoiseSource: Send + Sync {
    /// Samples the field at `position`.
    fn sample(&self, position: Vec3) -> Vec4;
}

impl<F> NoiseSource for F
where
    F: Fn(Vec3) -> Vec4 + Send + Sync,
{
    fn sample(&self, position: Vec3) -> Vec4 {
        self(position)
    }
}

/// Constant mid-grey noise: every perturbation is zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatNoise;

impl NoiseSource for FlatNoise {
    fn sample(&self, _position: Vec3) -> Vec4 {
        Vec4::splat(0.5)
    }
}

/// Fractal Perlin noise, one independently seeded generator per channel.
///
/// Samples the XZ plane only, like a tiling noise texture laid over the map.
pub struct PerlinNoise {
    channels: [Fbm<Perlin>; 4],
    scale: f64,
}

impl PerlinNoise {
    /// Builds the four channel generators from noise settings.
    pub fn from_settings(settings: &NoiseSettings) -> Self {
        let channels = std::array::from_fn(|i| {
            Fbm::<Perlin>::new(settings.seed.wrapping_add(i as u32)).set_octaves(settings.octaves)
        });
        Self {
            channels,
            scale: settings.scale,
        }
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, position: Vec3) -> Vec4 {
        let point = [
            position.x as f64 * self.scale,
            position.z as f64 * self.scale,
        ];
        let [x, y, z, w] = self
            .channels
            .each_ref()
            .map(|fbm| math::map_noise_to_range(fbm.get(point), 0.0, 1.0).clamp(0.0, 1.0));
        Vec4::new(x, y, z, w)
    }
}

/// Geometry context shared by every cell of a grid.
pub struct HexMetrics {
    noise: Box<dyn NoiseSource>,
    edges: EdgeThresholds,
}

impl HexMetrics {
    /// Metrics backed by `noise` and classifying edges with `edges`.
    pub fn new(noise: impl NoiseSource + 'static, edges: EdgeThresholds) -> Self {
        Self {
            noise: Box::new(noise),
            edges,
        }
    }

    /// Metrics without perturbation and default edge thresholds.
    pub fn flat() -> Self {
        Self::new(FlatNoise, EdgeThresholds::default())
    }

    /// Samples the injected noise source.
    pub fn sample_noise(&self, position: Vec3) -> Vec4 {
        self.noise.sample(position)
    }

    /// Vertical position of a cell at `elevation` whose center is `position`.
    ///
    /// Linear in elevation plus a noise offset in
    /// `[-ELEVATION_PERTURB_STRENGTH, ELEVATION_PERTURB_STRENGTH]`.
    pub fn elevation_height(&self, elevation: i32, position: Vec3) -> f32 {
        let base = elevation as f32 * ELEVATION_STEP;
        let sample = self.sample_noise(Vec3::new(position.x, base, position.z));
        base + math::signed_perturbation(sample.y, ELEVATION_PERTURB_STRENGTH)
    }

    /// Edge classification between elevations `a` and `b`.
    pub fn edge_type(&self, a: i32, b: i32) -> EdgeType {
        self.edges.classify(a, b)
    }

    /// Current edge thresholds.
    pub fn edge_thresholds(&self) -> &EdgeThresholds {
        &self.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── edge classification ─────────────────────────────────────────

    #[test]
    fn default_thresholds_follow_elevation_difference() {
        let t = EdgeThresholds::default();
        assert_eq!(t.classify(3, 3), EdgeType::Flat);
        assert_eq!(t.classify(3, 4), EdgeType::Slope);
        assert_eq!(t.classify(4, 3), EdgeType::Slope);
        assert_eq!(t.classify(1, 3), EdgeType::Cliff);
        assert_eq!(t.classify(-2, 5), EdgeType::Cliff);
    }

    #[test]
    fn wider_slope_threshold() {
        let t = EdgeThresholds { slope_max: 2 };
        assert_eq!(t.classify(1, 3), EdgeType::Slope);
        assert_eq!(t.classify(0, 3), EdgeType::Cliff);
    }

    #[test]
    fn zero_slope_threshold_makes_every_step_a_cliff() {
        let t = EdgeThresholds { slope_max: 0 };
        assert_eq!(t.classify(0, 0), EdgeType::Flat);
        assert_eq!(t.classify(0, 1), EdgeType::Cliff);
    }

    // ── elevation height ────────────────────────────────────────────

    #[test]
    fn flat_noise_gives_linear_height() {
        let metrics = HexMetrics::flat();
        for e in -3..6 {
            let h = metrics.elevation_height(e, Vec3::new(12.0, 0.0, 40.0));
            assert!((h - e as f32 * ELEVATION_STEP).abs() < 1e-6);
        }
    }

    #[test]
    fn full_noise_adds_perturb_strength() {
        let metrics = HexMetrics::new(|_: Vec3| Vec4::ONE, EdgeThresholds::default());
        let h = metrics.elevation_height(2, Vec3::ZERO);
        assert!((h - (2.0 * ELEVATION_STEP + ELEVATION_PERTURB_STRENGTH)).abs() < 1e-6);
    }

    // ── Perlin source ───────────────────────────────────────────────

    fn perlin() -> PerlinNoise {
        PerlinNoise::from_settings(&NoiseSettings::default())
    }

    #[test]
    fn perlin_channels_stay_in_unit_range() {
        let noise = perlin();
        for i in 0..50 {
            let p = Vec3::new(i as f32 * 17.3, 0.0, i as f32 * -9.1);
            let s = noise.sample(p);
            for c in s.to_array() {
                assert!((0.0..=1.0).contains(&c), "channel {c} out of range at {p:?}");
            }
        }
    }

    #[test]
    fn perlin_is_deterministic_and_ignores_height() {
        let a = perlin();
        let b = perlin();
        let p = Vec3::new(123.4, 0.0, 56.7);
        assert_eq!(a.sample(p), b.sample(p));
        assert_eq!(a.sample(p), a.sample(p + Vec3::Y * 30.0));
    }
}
