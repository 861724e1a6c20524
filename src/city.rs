//! CityLayout main structure

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::config::CityConfig;
use crate::density::{DensitySampler, PerlinDensityField};
use crate::generation;
use crate::grammar::{ProductionSet, ShapeGrammar, ShapeGrammarNode};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// Base scale of a park tree before jitter
const TREE_BASE_SCALE: f32 = 10.0;

/// Decoration descriptor for one park-like block
///
/// The renderer instances its tree template with this transform and
/// color, the same way it instances building templates from node data.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ParkTree {
    /// Tree position (centroid of the park block)
    pub position: Vec3,
    /// Uniform scale of the tree template
    pub scale: f32,
    /// Gray tree color, equal on all channels
    pub color: Vec3,
}

/// A complete generated city layout
///
/// Runs the whole pipeline to completion on construction: partition the
/// ground into blocks, place seed nodes, expand the shape grammar, and
/// decorate parks. The result is plain data for a renderer to consume;
/// re-running with the same configuration reproduces it exactly.
///
/// # Example
///
/// ```
/// use rust_city_grammar::*;
///
/// let config = CityConfigBuilder::new()
///     .seed(42)
///     .city_size(CitySize::Small)
///     .build()
///     .unwrap();
///
/// let city = CityLayout::generate(config);
/// println!(
///     "{} blocks, {} nodes, {} parks",
///     city.block_count(),
///     city.node_count(),
///     city.park_block_indices().len()
/// );
/// ```
#[derive(Clone)]
pub struct CityLayout {
    /// Configuration used to generate this layout
    config: CityConfig,

    /// Final block list, merged blocks included
    blocks: Vec<Block>,

    /// Indices into `blocks` of the park-like blocks
    park_blocks: Vec<usize>,

    /// Final shape grammar node list
    nodes: Vec<ShapeGrammarNode>,

    /// One tree descriptor per park-like block
    park_trees: Vec<ParkTree>,

    /// Spatial index over block centroids, absent for empty layouts
    #[cfg(feature = "spatial-index")]
    spatial_index: Option<SpatialIndex>,
}

impl CityLayout {
    /// Generate a layout with the classic city rule set
    pub fn generate(config: CityConfig) -> Self {
        Self::generate_with_grammar(config, ProductionSet::standard())
    }

    /// Generate a layout with a custom production rule set
    pub fn generate_with_grammar(config: CityConfig, productions: ProductionSet) -> Self {
        let sampler = PerlinDensityField::new(
            config.ground_origin(),
            config.ground_size(),
            config.density_tiles,
        );
        Self::generate_with_sampler(config, productions, &sampler)
    }

    /// Generate a layout with a custom density source
    ///
    /// The sampler is consulted once per block centroid during
    /// partitioning, before merging sums the sampled values.
    pub fn generate_with_sampler<S>(
        config: CityConfig,
        productions: ProductionSet,
        sampler: &S,
    ) -> Self
    where
        S: DensitySampler,
    {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed as u64);

        let blocks = generation::generate_blocks(&config, sampler, &mut rng);

        let placement = generation::place_seed_nodes(
            &blocks,
            config.building_size,
            config.building_size_jitter,
            &mut rng,
        );

        let mut grammar = ShapeGrammar::new(productions);
        grammar.set_seed_nodes(placement.nodes);
        let nodes = grammar.run_generations(config.generations, &mut rng).to_vec();

        let park_trees = decorate_parks(&blocks, &placement.park_blocks, &mut rng);

        #[cfg(feature = "spatial-index")]
        let spatial_index = if blocks.is_empty() {
            None
        } else {
            let centroids: Vec<Vec3> = blocks.iter().map(Block::centroid).collect();
            Some(SpatialIndex::new(&centroids))
        };

        Self {
            config,
            blocks,
            park_blocks: placement.park_blocks,
            nodes,
            park_trees,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        }
    }

    /// Get the configuration used to generate this layout
    #[inline]
    pub fn config(&self) -> &CityConfig {
        &self.config
    }

    /// Get all blocks as a slice
    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Get the number of blocks
    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Get all shape grammar nodes as a slice
    #[inline]
    pub fn nodes(&self) -> &[ShapeGrammarNode] {
        &self.nodes
    }

    /// Get the number of shape grammar nodes
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Indices of the blocks that hold no buildings
    #[inline]
    pub fn park_block_indices(&self) -> &[usize] {
        &self.park_blocks
    }

    /// Tree descriptors, one per park-like block
    #[inline]
    pub fn park_trees(&self) -> &[ParkTree] {
        &self.park_trees
    }

    /// Find the block nearest to a position (requires `spatial-index`)
    ///
    /// Returns `None` only for an empty layout.
    #[cfg(feature = "spatial-index")]
    pub fn find_block_at(&self, position: Vec3) -> Option<usize> {
        self.spatial_index
            .as_ref()
            .map(|index| index.find_nearest(position))
    }
}

/// Derive one tree descriptor per park-like block
fn decorate_parks(blocks: &[Block], park_blocks: &[usize], rng: &mut ChaCha8Rng) -> Vec<ParkTree> {
    park_blocks
        .iter()
        .map(|&index| {
            let color = Vec3::splat(0.2 + rng.gen::<f32>());
            let scale = TREE_BASE_SCALE + 3.0 * rng.gen::<f32>();
            ParkTree {
                position: blocks[index].centroid(),
                scale,
                color,
            }
        })
        .collect()
}
