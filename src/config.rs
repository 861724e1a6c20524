//! City Layout Configuration and Builder
//!
//! This module provides configuration types for deterministic city layout
//! generation.

use glam::{Vec2, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::density::DEFAULT_DENSITY_TILES;
use crate::error::{CityError, Result};

/// City size presets
///
/// Each size maps to a subdivision count and a ground-plane side length.
/// Density of blocks per unit stays roughly constant across presets.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CitySize {
    /// Small town: 6x6 subdivisions over a 500-unit square
    Small,
    /// Mid-size city: 12x12 subdivisions over a 1000-unit square (default)
    Medium,
    /// Metropolis: 20x20 subdivisions over a 1600-unit square
    Large,
    /// Custom city dimensions
    Custom {
        /// Grid subdivisions along the X axis
        subdivisions_x: u32,
        /// Grid subdivisions along the Z axis
        subdivisions_z: u32,
        /// Side length of the square ground plane in world units
        ground_size: f32,
    },
}

impl CitySize {
    /// Grid subdivisions along the X axis for this preset
    pub fn subdivisions_x(self) -> u32 {
        match self {
            CitySize::Small => 6,
            CitySize::Medium => 12,
            CitySize::Large => 20,
            CitySize::Custom { subdivisions_x, .. } => subdivisions_x,
        }
    }

    /// Grid subdivisions along the Z axis for this preset
    pub fn subdivisions_z(self) -> u32 {
        match self {
            CitySize::Small => 6,
            CitySize::Medium => 12,
            CitySize::Large => 20,
            CitySize::Custom { subdivisions_z, .. } => subdivisions_z,
        }
    }

    /// Side length of the square ground plane
    pub fn ground_size(self) -> f32 {
        match self {
            CitySize::Small => 500.0,
            CitySize::Medium => 1000.0,
            CitySize::Large => 1600.0,
            CitySize::Custom { ground_size, .. } => ground_size,
        }
    }

    /// Get a human-readable name for this city size
    pub fn name(self) -> &'static str {
        match self {
            CitySize::Small => "Small",
            CitySize::Medium => "Medium",
            CitySize::Large => "Large",
            CitySize::Custom { .. } => "Custom",
        }
    }
}

impl Default for CitySize {
    fn default() -> Self {
        CitySize::Medium
    }
}

/// Configuration for deterministic city layout generation
///
/// The same configuration always produces the identical layout: block
/// partition, merge sequence, seed placement, and grammar expansion all
/// draw from one random stream created from `seed`.
///
/// # Example
///
/// ```rust
/// use rust_city_grammar::*;
///
/// let config = CityConfigBuilder::new()
///     .seed(42)
///     .city_size(CitySize::Small)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.subdivisions_x(), 6);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityConfig {
    /// Random seed for deterministic generation
    pub seed: u32,

    /// City size preset (subdivision counts and ground side length)
    pub city_size: CitySize,

    /// Center of the ground plane; `y` is the base height blocks and
    /// buildings sit on
    pub center: Vec3,

    /// Width of the street gap carved between adjacent blocks
    pub street_width: f32,

    /// Maximum random offset applied to each interior subdivision line
    pub subdivision_jitter: f32,

    /// Number of successful block merges to aim for
    ///
    /// `None` derives the budget from the grid: `floor(0.1 * sx * sz)`.
    pub merge_attempts: Option<usize>,

    /// Nominal building footprint side length
    pub building_size: f32,

    /// Magnitude of the per-building footprint size jitter
    pub building_size_jitter: f32,

    /// How many times the grammar rewrite is applied to the seed nodes
    pub generations: usize,

    /// How many noise tiles the ground plane spans in the density field
    pub density_tiles: f32,
}

impl CityConfig {
    /// Grid subdivisions along the X axis
    #[inline]
    pub fn subdivisions_x(&self) -> u32 {
        self.city_size.subdivisions_x()
    }

    /// Grid subdivisions along the Z axis
    #[inline]
    pub fn subdivisions_z(&self) -> u32 {
        self.city_size.subdivisions_z()
    }

    /// Side length of the square ground plane
    #[inline]
    pub fn ground_size(&self) -> f32 {
        self.city_size.ground_size()
    }

    /// Min X / min Z corner of the ground plane
    #[inline]
    pub fn ground_origin(&self) -> Vec2 {
        Vec2::new(
            self.center.x - 0.5 * self.ground_size(),
            self.center.z - 0.5 * self.ground_size(),
        )
    }

    /// Resolved merge budget
    ///
    /// Returns the explicit budget if set, otherwise `floor(0.1 * sx * sz)`.
    pub fn merge_attempts(&self) -> usize {
        self.merge_attempts.unwrap_or_else(|| {
            (0.1 * self.subdivisions_x() as f32 * self.subdivisions_z() as f32).floor() as usize
        })
    }
}

impl Default for CityConfig {
    fn default() -> Self {
        CityConfigBuilder::new().build().unwrap()
    }
}

/// Builder for creating CityConfig with validation
///
/// # Example
///
/// ```rust
/// use rust_city_grammar::*;
///
/// // Use defaults
/// let config = CityConfigBuilder::new().build().unwrap();
///
/// // Customize
/// let config = CityConfigBuilder::new()
///     .seed(12345)
///     .city_size(CitySize::Large)
///     .street_width(24.0)
///     .unwrap()
///     .generations(2)
///     .unwrap()
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct CityConfigBuilder {
    seed: Option<u32>,
    city_size: CitySize,
    center: Vec3,
    street_width: f32,
    subdivision_jitter: f32,
    merge_attempts: Option<usize>,
    building_size: f32,
    building_size_jitter: f32,
    generations: usize,
    density_tiles: f32,
}

impl CityConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random
    /// - city_size: Medium (12x12 over 1000 units)
    /// - center: (0, 1, 0)
    /// - street_width: 18
    /// - subdivision_jitter: 35
    /// - merge_attempts: derived (`floor(0.1 * sx * sz)`)
    /// - building_size: 20, jitter 4
    /// - generations: 1
    /// - density_tiles: 4
    pub fn new() -> Self {
        Self {
            seed: None,
            city_size: CitySize::default(),
            center: Vec3::new(0.0, 1.0, 0.0),
            street_width: 18.0,
            subdivision_jitter: 35.0,
            merge_attempts: None,
            building_size: 20.0,
            building_size_jitter: 4.0,
            generations: 1,
            density_tiles: DEFAULT_DENSITY_TILES,
        }
    }

    /// Set the random seed
    ///
    /// Using the same seed with the same other parameters will produce an
    /// identical layout every time.
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the city size preset
    pub fn city_size(mut self, size: CitySize) -> Self {
        self.city_size = size;
        self
    }

    /// Set the ground-plane center (`y` is the base height)
    pub fn center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    /// Set the street gap width between blocks
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the width is negative
    pub fn street_width(mut self, width: f32) -> Result<Self> {
        if width < 0.0 {
            return Err(CityError::InvalidConfig(format!(
                "street width must be >= 0 (got {})",
                width
            )));
        }
        self.street_width = width;
        Ok(self)
    }

    /// Set the subdivision line jitter magnitude
    ///
    /// Interior grid lines are offset by a uniform sample from
    /// `[-jitter, +jitter]`; lines are clamped so they never cross.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the jitter is negative
    pub fn subdivision_jitter(mut self, jitter: f32) -> Result<Self> {
        if jitter < 0.0 {
            return Err(CityError::InvalidConfig(format!(
                "subdivision jitter must be >= 0 (got {})",
                jitter
            )));
        }
        self.subdivision_jitter = jitter;
        Ok(self)
    }

    /// Set an explicit merge budget instead of the derived default
    pub fn merge_attempts(mut self, attempts: usize) -> Self {
        self.merge_attempts = Some(attempts);
        self
    }

    /// Set the nominal building footprint size and its jitter magnitude
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the size is not positive or the jitter
    /// is negative
    pub fn building_size(mut self, size: f32, jitter: f32) -> Result<Self> {
        if size <= 0.0 {
            return Err(CityError::InvalidConfig(format!(
                "building size must be positive (got {})",
                size
            )));
        }
        if jitter < 0.0 {
            return Err(CityError::InvalidConfig(format!(
                "building size jitter must be >= 0 (got {})",
                jitter
            )));
        }
        self.building_size = size;
        self.building_size_jitter = jitter;
        Ok(self)
    }

    /// Set how many grammar rewrite generations to run
    ///
    /// One generation reproduces the classic skyline; more generations
    /// only matter for grammars whose successors stay non-terminal.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if generations > 16 (excessive and
    /// impractical)
    pub fn generations(mut self, generations: usize) -> Result<Self> {
        if generations > 16 {
            return Err(CityError::InvalidConfig(format!(
                "generations must be <= 16 (got {})",
                generations
            )));
        }
        self.generations = generations;
        Ok(self)
    }

    /// Set the noise tile count of the density field
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the tile count is not positive
    pub fn density_tiles(mut self, tiles: f32) -> Result<Self> {
        if tiles <= 0.0 {
            return Err(CityError::InvalidConfig(format!(
                "density tiles must be positive (got {})",
                tiles
            )));
        }
        self.density_tiles = tiles;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a custom city size carries a
    /// non-positive ground size
    pub fn build(self) -> Result<CityConfig> {
        let ground_size = self.city_size.ground_size();
        if ground_size <= 0.0 {
            return Err(CityError::InvalidConfig(format!(
                "ground size must be positive (got {})",
                ground_size
            )));
        }

        let seed = self.seed.unwrap_or_else(rand::random);

        Ok(CityConfig {
            seed,
            city_size: self.city_size,
            center: self.center,
            street_width: self.street_width,
            subdivision_jitter: self.subdivision_jitter,
            merge_attempts: self.merge_attempts,
            building_size: self.building_size,
            building_size_jitter: self.building_size_jitter,
            generations: self.generations,
            density_tiles: self.density_tiles,
        })
    }
}

impl Default for CityConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
