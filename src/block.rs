//! City Block Structure
//!
//! Represents one quadrilateral region of the ground plane with its
//! population density.

use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single city block on the ground plane
///
/// Each block is a planar convex quadrilateral carved out of the ground
/// grid, carrying:
/// - Four corner positions, ordered so that consecutive corners are
///   adjacent (corner 0 at min X / min Z, winding through max X / min Z,
///   max X / max Z, min X / max Z)
/// - A non-negative population density sampled from the noise field
///
/// # Design Notes
///
/// Blocks are plain data. They are created by the partitioner, optionally
/// replaced by a merged block covering 2 or 4 neighbors, and then consumed
/// by seed placement. The merged block's corners are corners of the outer
/// boundary of its constituents, so the corner ordering invariant survives
/// merging.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Corner positions, ordered around the quad boundary
    pub corners: [Vec3; 4],

    /// Population density of this block
    ///
    /// Sampled from the density field at the block centroid during
    /// partitioning. Merging sums the densities of the merged blocks.
    /// Always non-negative.
    pub density: f32,
}

impl Block {
    /// Create a new block from its four corners and density
    pub fn new(corners: [Vec3; 4], density: f32) -> Self {
        Self { corners, density }
    }

    /// Centroid of the block (average of the four corners)
    #[inline]
    pub fn centroid(&self) -> Vec3 {
        0.25 * (self.corners[0] + self.corners[1] + self.corners[2] + self.corners[3])
    }

    /// Block span along the X axis, measured on the min-Z edge
    #[inline]
    pub fn width(&self) -> f32 {
        self.corners[1].x - self.corners[0].x
    }

    /// Block span along the Z axis, measured on the min-X edge
    #[inline]
    pub fn depth(&self) -> f32 {
        self.corners[3].z - self.corners[0].z
    }

    /// Approximate ground area of the block
    ///
    /// Uses the diagonal bounding extents rather than the exact quad area,
    /// which is sufficient for small-block filtering.
    pub fn area(&self) -> f32 {
        (self.corners[0].x - self.corners[2].x).abs() * (self.corners[0].z - self.corners[2].z).abs()
    }
}
