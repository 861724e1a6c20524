//! Jittered grid subdivision of the ground plane
//!
//! Splits the city square into a grid of quadrilateral blocks whose edges
//! wobble around the regular grid lines, with a street gap carved between
//! neighbors and a density value sampled at every block centroid.

use glam::{Vec2, Vec3};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::block::Block;
use crate::density::DensitySampler;

/// Build the subdivision line coordinates along one axis
///
/// Starts at `start`, adds one step plus a uniform offset from
/// `[-jitter, +jitter]` per interior line, and forces the final line to
/// `end`. Interior lines are clamped to `[previous, end]` so the sequence
/// stays monotonic even under jitter larger than the step.
fn subdivision_lines(
    start: f32,
    end: f32,
    subdivisions: u32,
    jitter: f32,
    rng: &mut ChaCha8Rng,
) -> Vec<f32> {
    let step = (end - start) / subdivisions as f32;

    let mut lines = Vec::with_capacity(subdivisions as usize + 1);
    lines.push(start);

    let mut line = start;
    for _ in 0..subdivisions.saturating_sub(1) {
        line += step + rng.gen_range(-1.0..1.0) * jitter;
        line = line.clamp(*lines.last().unwrap(), end);
        lines.push(line);
    }

    lines.push(end);
    lines
}

/// Subdivide a square ground region into blocks
///
/// Blocks are produced row-major, Z outer and X inner, so the block at
/// grid cell `(i, j)` lands at index `i * subdivisions_x + j`. Each
/// block's corners are the cell's grid-line intersections inset by half
/// the street width on all sides, and its density is sampled at the
/// resulting centroid.
///
/// Zero subdivisions on either axis yields an empty list.
#[allow(clippy::too_many_arguments)]
pub fn subdivide<S: DensitySampler>(
    center: Vec3,
    size: f32,
    subdivisions_x: u32,
    subdivisions_z: u32,
    street_width: f32,
    jitter: f32,
    sampler: &S,
    rng: &mut ChaCha8Rng,
) -> Vec<Block> {
    if subdivisions_x == 0 || subdivisions_z == 0 {
        return Vec::new();
    }

    let y = center.y;
    let lines_x = subdivision_lines(
        center.x - 0.5 * size,
        center.x + 0.5 * size,
        subdivisions_x,
        jitter,
        rng,
    );
    let lines_z = subdivision_lines(
        center.z - 0.5 * size,
        center.z + 0.5 * size,
        subdivisions_z,
        jitter,
        rng,
    );

    let inset = 0.5 * street_width;
    let mut blocks = Vec::with_capacity((subdivisions_x * subdivisions_z) as usize);

    for i in 0..subdivisions_z as usize {
        for j in 0..subdivisions_x as usize {
            let corners = [
                Vec3::new(lines_x[j] + inset, y, lines_z[i] + inset),
                Vec3::new(lines_x[j + 1] - inset, y, lines_z[i] + inset),
                Vec3::new(lines_x[j + 1] - inset, y, lines_z[i + 1] - inset),
                Vec3::new(lines_x[j] + inset, y, lines_z[i + 1] - inset),
            ];

            let centroid = 0.25 * (corners[0] + corners[1] + corners[2] + corners[3]);
            let density = sampler.density(Vec2::new(centroid.x, centroid.z));

            blocks.push(Block::new(corners, density));
        }
    }

    blocks
}
