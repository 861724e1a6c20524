//! 2D gradient noise for the population density field
//!
//! This module provides the fixed-hash 2D Perlin-style noise the density
//! field is built on. The hash and surflet formulas are the classic
//! shader-toy `fract(sin(dot(...)))` construction; the surflet projects
//! the sample point through the corner gradient itself rather than the
//! lattice-corner offset. That deviation from the textbook formula is what
//! gives the density field its visual signature and must not be
//! "corrected".

use glam::Vec2;

// ============================================================================
// GRADIENT HASH
// ============================================================================

/// Floor-based fractional part, `x - floor(x)`
///
/// Always lands in [0, 1), including for negative inputs. `f32::fract`
/// truncates toward zero instead, which would flip the hash sign for
/// negative lattice coordinates.
#[inline]
fn fract(x: f64) -> f64 {
    x - x.floor()
}

/// Derive a pseudo-random unit gradient for a lattice corner
///
/// Two large-magnitude dot products fed through `sin` and a fractional
/// part reduction, remapped to [-1, 1] and normalized. Evaluated in f64:
/// the fractional part of `sin(x) * 43758.5453` needs more mantissa bits
/// than f32 carries.
#[inline]
fn lattice_gradient(corner: Vec2) -> Vec2 {
    let x = corner.x as f64;
    let y = corner.y as f64;

    let gx = 2.0 * fract((x * 127.1 + y * 311.7).sin() * 43758.5453) - 1.0;
    let gy = 2.0 * fract((x * 269.5 + y * 183.3).sin() * 43758.5453) - 1.0;

    Vec2::new(gx as f32, gy as f32).normalize_or_zero()
}

// ============================================================================
// SURFLET ACCUMULATION
// ============================================================================

/// Quintic falloff `1 - 6d^5 + 15d^4 - 10d^3` of a per-axis distance
#[inline]
fn falloff(d: f32) -> f32 {
    1.0 - 6.0 * d.powi(5) + 15.0 * d.powi(4) - 10.0 * d.powi(3)
}

/// Contribution of one lattice corner to the noise value at `point`
fn surflet(point: Vec2, corner: Vec2) -> f32 {
    let tx = falloff((point.x - corner.x).abs());
    let ty = falloff((point.y - corner.y).abs());

    let gradient = lattice_gradient(corner);

    // Project (point - gradient) through the gradient. Not a typo for the
    // lattice-corner offset; see the module docs.
    let height = (point - gradient).dot(gradient);

    height * tx * ty
}

/// Sample 2D gradient noise at a point
///
/// Pure function of its input and the fixed internal hash; there is no
/// seed and no mutable state. Sums the surflet contributions of the four
/// surrounding integer lattice corners.
///
/// # Returns
///
/// Unbounded in principle, empirically roughly in [-1, 1].
pub fn perlin_2d(point: Vec2) -> f32 {
    let x0 = point.x.floor();
    let y0 = point.y.floor();

    surflet(point, Vec2::new(x0, y0))
        + surflet(point, Vec2::new(x0 + 1.0, y0))
        + surflet(point, Vec2::new(x0 + 1.0, y0 + 1.0))
        + surflet(point, Vec2::new(x0, y0 + 1.0))
}
