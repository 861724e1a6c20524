//! Ground partitioning and seed layout
//!
//! Splits the city square into jittered blocks, merges some of them, and
//! lays out the root grammar nodes for every building.

mod merge;
mod partition;
mod seeds;

pub use merge::merge_blocks;
pub use partition::subdivide;
pub use seeds::{place_seed_nodes, SeedPlacement};

use rand_chacha::ChaCha8Rng;

use crate::block::Block;
use crate::config::CityConfig;
use crate::density::DensitySampler;

/// Produce the final block list for a configuration
///
/// Subdivides the configured ground square into a jittered, density-
/// annotated grid, then runs the randomized merge pass over it.
pub fn generate_blocks<S: DensitySampler>(
    config: &CityConfig,
    sampler: &S,
    rng: &mut ChaCha8Rng,
) -> Vec<Block> {
    let blocks = subdivide(
        config.center,
        config.ground_size(),
        config.subdivisions_x(),
        config.subdivisions_z(),
        config.street_width,
        config.subdivision_jitter,
        sampler,
        rng,
    );

    merge_blocks(
        blocks,
        config.subdivisions_x(),
        config.subdivisions_z(),
        config.merge_attempts(),
        rng,
    )
}
