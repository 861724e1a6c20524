//! Stochastic merging of adjacent blocks
//!
//! Randomly fuses pairs or 2x2 groups of neighboring grid blocks into
//! larger blocks, summing their densities. Merged blocks keep the outer
//! boundary corners of their constituents, so the corner ordering
//! invariant of [`Block`] survives.

use std::collections::HashSet;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::block::Block;

/// Bound on total draws per pass, as a multiple of the merge budget
///
/// Without it a pass over a mostly-consumed grid can spin forever
/// re-drawing used indices.
const RETRY_FACTOR: usize = 10;

/// How a merge candidate extends from its anchor block
#[derive(Debug, Clone, Copy)]
enum MergeShape {
    /// Anchor plus its right neighbor
    Horizontal,
    /// Anchor plus the block one row down
    Vertical,
    /// Anchor plus right, down, and diagonal neighbors
    Quad,
}

/// Merge adjacent blocks of an unmerged grid
///
/// `blocks` must be the row-major grid produced by
/// [`subdivide`](super::subdivide), `subdivisions_x * subdivisions_z`
/// entries long. Runs until `merge_attempts` merges succeed or the draw
/// budget (`10 * merge_attempts`) runs out, whichever comes first:
///
/// - draw a uniform anchor index; reject it if already consumed or if it
///   sits on the rightmost column or bottom row,
/// - pick horizontal, vertical, or 2x2 with roughly equal probability;
///   reject the candidate if any partner is consumed,
/// - otherwise emit one merged block from the outer corners with the
///   summed density of all participants.
///
/// Returns the never-consumed originals followed by the merged blocks;
/// downstream stages do not depend on the relative order.
pub fn merge_blocks(
    blocks: Vec<Block>,
    subdivisions_x: u32,
    subdivisions_z: u32,
    merge_attempts: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<Block> {
    let sx = subdivisions_x as usize;
    let sz = subdivisions_z as usize;

    if merge_attempts == 0 || blocks.is_empty() || sx < 2 || sz < 2 {
        return blocks;
    }
    debug_assert_eq!(blocks.len(), sx * sz);

    let mut used: HashSet<usize> = HashSet::new();
    let mut merged: Vec<Block> = Vec::new();
    let mut successes = 0;

    for _ in 0..RETRY_FACTOR * merge_attempts {
        if successes >= merge_attempts {
            break;
        }

        let k = rng.gen_range(0..blocks.len());
        if used.contains(&k) {
            continue;
        }
        if k % sx == sx - 1 || k / sx == sz - 1 {
            continue;
        }

        let roll: f32 = rng.gen();
        let shape = if roll < 0.34 {
            MergeShape::Horizontal
        } else if roll < 0.67 {
            MergeShape::Vertical
        } else {
            MergeShape::Quad
        };

        let pair_right = [k, k + 1];
        let pair_down = [k, k + sx];
        let quad = [k, k + 1, k + sx, k + sx + 1];
        let participants: &[usize] = match shape {
            MergeShape::Horizontal => &pair_right,
            MergeShape::Vertical => &pair_down,
            MergeShape::Quad => &quad,
        };
        if participants.iter().any(|i| used.contains(i)) {
            continue;
        }

        // outer boundary corners: min/min, max/min, max/max, min/max
        let corners = match shape {
            MergeShape::Horizontal => [
                blocks[k].corners[0],
                blocks[k + 1].corners[1],
                blocks[k + 1].corners[2],
                blocks[k].corners[3],
            ],
            MergeShape::Vertical => [
                blocks[k].corners[0],
                blocks[k].corners[1],
                blocks[k + sx].corners[2],
                blocks[k + sx].corners[3],
            ],
            MergeShape::Quad => [
                blocks[k].corners[0],
                blocks[k + 1].corners[1],
                blocks[k + sx + 1].corners[2],
                blocks[k + sx].corners[3],
            ],
        };
        let density = participants.iter().map(|&i| blocks[i].density).sum();

        merged.push(Block::new(corners, density));
        used.extend(participants.iter().copied());
        successes += 1;
    }

    if successes < merge_attempts {
        log::debug!(
            "merge pool exhausted after {} of {} merges",
            successes,
            merge_attempts
        );
    }

    let mut result: Vec<Block> = blocks
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !used.contains(i))
        .map(|(_, block)| block)
        .collect();
    result.extend(merged);
    result
}
