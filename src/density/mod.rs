//! Population density sampling
//!
//! Provides the trait seam for density sources and the default
//! noise-backed implementation used by the pipeline.

mod noise;

pub use noise::perlin_2d;

use glam::Vec2;

/// Number of noise tiles the ground plane is mapped onto by default
pub const DEFAULT_DENSITY_TILES: f32 = 4.0;

/// Offset applied to the remapped coordinate before sampling
///
/// Keeps centroids that line up with the grid from sampling exactly on
/// lattice points, where every surflet contribution vanishes.
const LATTICE_OFFSET: f32 = 0.05;

/// Trait for sampling population density at ground-plane points
///
/// The partitioner calls this once per block centroid. Implement it to
/// drive block density (and through it, building height and merge weight)
/// from any scalar field.
pub trait DensitySampler {
    /// Sample the density at a ground-plane point (X/Z coordinates)
    fn density(&self, centroid: Vec2) -> f32;
}

/// Default density field backed by the fixed-hash gradient noise
///
/// Remaps a ground-plane centroid into the unit square of the city ground,
/// tiles it across `tiles` noise cells, and rescales the raw sample into a
/// positive density: `2.5 + (noise + 1.0) * 0.5`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerlinDensityField {
    /// Ground-plane origin (min X / min Z corner of the city square)
    pub origin: Vec2,
    /// Side length of the city square
    pub extent: f32,
    /// How many noise tiles the square spans
    pub tiles: f32,
}

impl PerlinDensityField {
    /// Create a density field over a square ground region
    pub fn new(origin: Vec2, extent: f32, tiles: f32) -> Self {
        Self {
            origin,
            extent,
            tiles,
        }
    }
}

impl DensitySampler for PerlinDensityField {
    fn density(&self, centroid: Vec2) -> f32 {
        let uv = (centroid - self.origin) / self.extent * self.tiles + Vec2::splat(LATTICE_OFFSET);

        let density = 2.5 + (perlin_2d(uv) + 1.0) * 0.5;

        if density < 0.0 {
            log::warn!("clamping negative density {} at {:?}", density, centroid);
            return 0.0;
        }

        density
    }
}
