//! Spatial indexing for fast position-to-block lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;
#[cfg(feature = "spatial-index")]
use glam::Vec3;

/// Wrapper around a KD-tree over block centroids
///
/// Provides O(log n) nearest-neighbor lookups to convert 3D positions
/// (from raycasts, clicks, unit placement) into block indices.
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f32, usize, 3, 32>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build the index from block centroids
    ///
    /// Called once at the end of layout generation.
    pub fn new(centroids: &[Vec3]) -> Self {
        let points: Vec<[f32; 3]> = centroids.iter().map(|c| [c.x, c.y, c.z]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Find the block whose centroid is nearest to a position
    pub fn find_nearest(&self, position: Vec3) -> usize {
        let query = [position.x, position.y, position.z];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}
