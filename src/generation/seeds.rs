//! Seed node placement
//!
//! Lays out building footprints inside each block and creates the root
//! shape-grammar node for every building. Blocks too small for a single
//! footprint become parks.

use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::block::Block;
use crate::grammar::{GeometryKind, ShapeGrammarNode};

/// Density-to-height scale of the root nodes
const HEIGHT_DENSITY_SCALE: f32 = 30.0;

/// Uniform random height added on top of the density term
const HEIGHT_JITTER: f32 = 40.0;

/// Brick-red accent color of the occasional landmark building
const ACCENT_COLOR: Vec3 = Vec3::new(164.0 / 255.0, 41.0 / 255.0, 41.0 / 255.0);

/// Chance for a building to take the accent color
const ACCENT_CHANCE: f32 = 0.02;

/// Height below which a building is eligible to become a low-rise
const LOW_RISE_HEIGHT: f32 = 75.0;

/// Chance for an eligible building to become a low-rise
const LOW_RISE_CHANCE: f32 = 0.45;

/// Result of laying out seed nodes over a block list
#[derive(Debug, Clone)]
pub struct SeedPlacement {
    /// Root nodes, one per building, all non-terminal
    pub nodes: Vec<ShapeGrammarNode>,
    /// Indices of blocks that fit no building
    pub park_blocks: Vec<usize>,
}

/// Lay out root nodes inside every block
///
/// Capacity along each axis is `floor(span / building_size) - 1`; the
/// subtraction reserves breathing room between buildings. When either
/// axis has no capacity the block is recorded as park-like and skipped.
/// Otherwise `capacity` buildings plus `capacity + 1` even gaps exactly
/// fill the span, and one root node is created per grid slot:
///
/// - height `density * 30 + U(0, 40)`, also the node's vertical scale,
/// - footprint `building_size + (U(0,1) - 0.5) * size_jitter`,
/// - a rare accent color, otherwise one gray level for all channels,
/// - symbol `'A'`, or `'E'` for short buildings that pass a 45% coin.
pub fn place_seed_nodes(
    blocks: &[Block],
    building_size: f32,
    size_jitter: f32,
    rng: &mut ChaCha8Rng,
) -> SeedPlacement {
    let mut nodes = Vec::new();
    let mut park_blocks = Vec::new();

    for (index, block) in blocks.iter().enumerate() {
        let rows = (block.width() / building_size).floor() as i64 - 1;
        let cols = (block.depth() / building_size).floor() as i64 - 1;

        if rows <= 0 || cols <= 0 {
            park_blocks.push(index);
            continue;
        }
        let (rows, cols) = (rows as usize, cols as usize);

        let gap_x = (block.width() - rows as f32 * building_size) / (rows as f32 + 1.0);
        let gap_z = (block.depth() - cols as f32 * building_size) / (cols as f32 + 1.0);
        let base = block.corners[0];

        for col in 0..cols {
            for row in 0..rows {
                let height = block.density * HEIGHT_DENSITY_SCALE + rng.gen::<f32>() * HEIGHT_JITTER;
                let footprint = building_size + (rng.gen::<f32>() - 0.5) * size_jitter;

                let color = if rng.gen::<f32>() < ACCENT_CHANCE {
                    ACCENT_COLOR
                } else {
                    Vec3::splat(0.2 + rng.gen::<f32>())
                };

                let mut symbol = 'A';
                if height < LOW_RISE_HEIGHT && rng.gen::<f32>() < LOW_RISE_CHANCE {
                    symbol = 'E';
                }

                let position = Vec3::new(
                    base.x + (row as f32 + 0.5) * building_size + (row as f32 + 1.0) * gap_x,
                    base.y,
                    base.z + (col as f32 + 0.5) * building_size + (col as f32 + 1.0) * gap_z,
                );

                nodes.push(ShapeGrammarNode::new(
                    symbol,
                    GeometryKind::Cube,
                    position,
                    Vec3::ZERO,
                    Vec3::new(footprint, height, footprint),
                    color,
                    height,
                    false,
                ));
            }
        }
    }

    SeedPlacement { nodes, park_blocks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn block(width: f32, depth: f32, density: f32) -> Block {
        Block::new(
            [
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(width, 1.0, 0.0),
                Vec3::new(width, 1.0, depth),
                Vec3::new(0.0, 1.0, depth),
            ],
            density,
        )
    }

    #[test]
    fn test_small_block_becomes_park() {
        // capacity floor(30/20) - 1 = 0 on both axes
        let blocks = vec![block(30.0, 30.0, 2.5)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let placement = place_seed_nodes(&blocks, 20.0, 4.0, &mut rng);

        assert!(placement.nodes.is_empty());
        assert_eq!(placement.park_blocks, vec![0]);
    }

    #[test]
    fn test_capacity_grid_fills_block() {
        // floor(80/20) - 1 = 3 rows, floor(60/20) - 1 = 2 columns
        let blocks = vec![block(80.0, 60.0, 2.5)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let placement = place_seed_nodes(&blocks, 20.0, 4.0, &mut rng);

        assert_eq!(placement.nodes.len(), 6);
        assert!(placement.park_blocks.is_empty());
    }

    #[test]
    fn test_buildings_stay_inside_block() {
        let blocks = vec![block(100.0, 100.0, 3.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let placement = place_seed_nodes(&blocks, 20.0, 4.0, &mut rng);

        for node in &placement.nodes {
            assert!(node.position.x > 0.0 && node.position.x < 100.0);
            assert!(node.position.z > 0.0 && node.position.z < 100.0);
            assert_eq!(node.position.y, 1.0);
        }
    }

    #[test]
    fn test_root_node_shape() {
        let blocks = vec![block(100.0, 100.0, 2.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let placement = place_seed_nodes(&blocks, 20.0, 4.0, &mut rng);

        for node in &placement.nodes {
            assert!(!node.terminal);
            assert_eq!(node.geometry, GeometryKind::Cube);
            assert_eq!(node.rotation, Vec3::ZERO);
            assert_eq!(node.scale.y, node.building_height);
            assert_eq!(node.scale.x, node.scale.z);
            // height = density * 30 + U(0, 40)
            assert!(node.building_height >= 60.0);
            assert!(node.building_height < 100.0);
            // footprint jitter stays within +-2
            assert!((node.scale.x - 20.0).abs() <= 2.0);
        }
    }

    #[test]
    fn test_low_rise_only_below_height_gate() {
        let blocks = vec![block(200.0, 200.0, 2.5)];
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let placement = place_seed_nodes(&blocks, 20.0, 4.0, &mut rng);

        for node in &placement.nodes {
            if node.symbol == 'E' {
                assert!(node.building_height < LOW_RISE_HEIGHT);
            } else {
                assert_eq!(node.symbol, 'A');
            }
        }
    }

    #[test]
    fn test_gray_buildings_have_equal_channels() {
        let blocks = vec![block(200.0, 200.0, 2.5)];
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let placement = place_seed_nodes(&blocks, 20.0, 4.0, &mut rng);

        for node in &placement.nodes {
            if node.base_color != ACCENT_COLOR {
                assert_eq!(node.base_color.x, node.base_color.y);
                assert_eq!(node.base_color.y, node.base_color.z);
                assert!(node.base_color.x >= 0.2 && node.base_color.x < 1.2);
            }
        }
    }

    #[test]
    fn test_mixed_blocks_report_only_small_ones() {
        let blocks = vec![
            block(100.0, 100.0, 2.0),
            block(10.0, 10.0, 2.0),
            block(90.0, 90.0, 2.0),
            block(35.0, 200.0, 2.0),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let placement = place_seed_nodes(&blocks, 20.0, 4.0, &mut rng);

        assert_eq!(placement.park_blocks, vec![1, 3]);
        assert!(!placement.nodes.is_empty());
    }

    #[test]
    fn test_placement_determinism() {
        let blocks = vec![block(150.0, 150.0, 2.8)];
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            place_seed_nodes(&blocks, 20.0, 4.0, &mut rng).nodes
        };
        assert_eq!(run(11), run(11));
    }
}
