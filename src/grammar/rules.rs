//! Per-symbol successor derivation
//!
//! Each character of a chosen replacement string maps to one rewrite rule
//! through a closed dispatch table. Children are produced left to right;
//! a rule that needs the previously produced sibling receives it as an
//! explicit `Option` instead of indexing back into the output.

use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::node::{GeometryKind, ShapeGrammarNode};

/// Building height above which body segments may start twisting
const TWIST_HEIGHT_THRESHOLD: f32 = 135.0;

/// Chance per body segment of a tall tower to twist against its sibling
const TWIST_CHANCE: f32 = 0.65;

/// Y-rotation added per twisted body segment
const TWIST_STEP: f32 = 0.15 * PI;

/// Fixed footprint side of a low-rise slab
const SLAB_FOOTPRINT: f32 = 4.0;

/// Which rewrite rule a replacement character selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SuccessorRule {
    /// `'B'`: stacked tower body segment
    Body,
    /// `'C'`: roof cap, flat or pyramid
    Cap,
    /// `'G'`: low-rise repeating slab
    Slab,
    /// Everything else: terminal copy of the parent shape
    Passthrough,
}

impl SuccessorRule {
    fn for_symbol(symbol: char) -> Self {
        match symbol {
            'B' => SuccessorRule::Body,
            'C' => SuccessorRule::Cap,
            'G' => SuccessorRule::Slab,
            _ => SuccessorRule::Passthrough,
        }
    }
}

/// One position of a replacement string being expanded
struct Slot<'a> {
    symbol: char,
    index: usize,
    len: usize,
    /// Replacement length minus one when a trailing cap consumes a unit
    /// of body allowance
    effective_len: f32,
    /// The previously produced regular child, if any
    previous: Option<&'a ShapeGrammarNode>,
}

/// Expand one replacement string into successor nodes
///
/// All successors inherit the parent's base color and building height
/// verbatim and are terminal.
pub(crate) fn expand_replacement(
    parent: &ShapeGrammarNode,
    replacement: &str,
    rng: &mut ChaCha8Rng,
) -> Vec<ShapeGrammarNode> {
    let chars: Vec<char> = replacement.chars().collect();
    let len = chars.len();

    let mut effective_len = len as f32;
    if chars.last() == Some(&'C') {
        effective_len -= 1.0;
    }

    let mut successors = Vec::with_capacity(len + 1);
    let mut prev_child: Option<usize> = None;

    for (index, &symbol) in chars.iter().enumerate() {
        let rule = SuccessorRule::for_symbol(symbol);

        // A low-rise keeps its original silhouette standing under the
        // slab stack; emit it once, ahead of the first slab.
        if rule == SuccessorRule::Slab && index == 0 {
            successors.push(parent_copy(parent));
        }

        let child = {
            let slot = Slot {
                symbol,
                index,
                len,
                effective_len,
                previous: prev_child.map(|i| &successors[i]),
            };
            match rule {
                SuccessorRule::Body => body(parent, &slot, rng),
                SuccessorRule::Cap => cap(parent, &slot, rng),
                SuccessorRule::Slab => slab(parent, &slot),
                SuccessorRule::Passthrough => passthrough(parent, symbol),
            }
        };

        successors.push(child);
        prev_child = Some(successors.len() - 1);
    }

    successors
}

/// Stacked body segment of a tower
///
/// Segment `i` reaches `(i+1)/effective_len` of the parent's vertical
/// scale, so consecutive segments grow by equal increments and the final
/// body segment recovers the full parent height. Horizontal scale tapers
/// off the previous sibling; tall towers occasionally twist per segment.
fn body(parent: &ShapeGrammarNode, slot: &Slot<'_>, rng: &mut ChaCha8Rng) -> ShapeGrammarNode {
    let mut scale = parent.scale;
    scale.y = (slot.index as f32 + 1.0) * (parent.scale.y / slot.effective_len);

    let mut rotation = parent.rotation;

    if let Some(previous) = slot.previous {
        let taper = 0.9 + 0.035 * (slot.effective_len - 3.0);
        scale.x = previous.scale.x * taper;
        scale.z = previous.scale.z * taper;

        if parent.building_height > TWIST_HEIGHT_THRESHOLD && rng.gen::<f32>() < TWIST_CHANCE {
            rotation.y = previous.rotation.y + TWIST_STEP;
        }
    }

    ShapeGrammarNode::new(
        slot.symbol,
        GeometryKind::Cube,
        parent.position,
        rotation,
        scale,
        parent.base_color,
        parent.building_height,
        true,
    )
}

/// Roof cap, 50/50 flat box or pyramid
///
/// Either variant sits exactly `building_height` above the parent base.
/// The pyramid shrinks the previous sibling's footprint a little; the
/// first child of a replacement has no sibling and shrinks the parent's
/// footprint instead.
fn cap(parent: &ShapeGrammarNode, slot: &Slot<'_>, rng: &mut ChaCha8Rng) -> ShapeGrammarNode {
    let mut position = parent.position;
    position.y += parent.building_height;

    let (geometry, scale) = if rng.gen::<f32>() < 0.5 {
        let sx = 2.0 + rng.gen::<f32>();
        let sz = 1.5 + rng.gen::<f32>();
        let sy = 0.5 + 2.0 * rng.gen::<f32>();
        (GeometryKind::TopCube, Vec3::new(sx, sy, sz))
    } else {
        let shrink = 0.95 - 0.15 * rng.gen::<f32>();
        let base = slot
            .previous
            .map(|p| p.footprint())
            .unwrap_or_else(|| parent.footprint());
        let sy = 10.0 + 15.0 * rng.gen::<f32>();
        (
            GeometryKind::Pyramid,
            Vec3::new(base.x * shrink, sy, base.y * shrink),
        )
    };

    ShapeGrammarNode::new(
        slot.symbol,
        geometry,
        position,
        parent.rotation,
        scale,
        parent.base_color,
        parent.building_height,
        true,
    )
}

/// Low-rise repeating slab unit
///
/// A replacement of length `n` spreads `n` thin slabs evenly over the
/// building height on a fixed 4x4 footprint.
fn slab(parent: &ShapeGrammarNode, slot: &Slot<'_>) -> ShapeGrammarNode {
    let step = parent.building_height / slot.len as f32;

    let mut position = parent.position;
    position.y += slot.index as f32 * step;

    let scale = Vec3::new(SLAB_FOOTPRINT, 0.1 * step, SLAB_FOOTPRINT);

    ShapeGrammarNode::new(
        slot.symbol,
        GeometryKind::CubeRepeat,
        position,
        parent.rotation,
        scale,
        parent.base_color,
        parent.building_height,
        true,
    )
}

/// Terminal copy of the parent shape under a new symbol
fn passthrough(parent: &ShapeGrammarNode, symbol: char) -> ShapeGrammarNode {
    ShapeGrammarNode::new(
        symbol,
        parent.geometry,
        parent.position,
        parent.rotation,
        parent.scale,
        parent.base_color,
        parent.building_height,
        true,
    )
}

/// Terminal copy of the parent, symbol included
fn parent_copy(parent: &ShapeGrammarNode) -> ShapeGrammarNode {
    ShapeGrammarNode {
        terminal: true,
        ..parent.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn tower_parent(height: f32) -> ShapeGrammarNode {
        ShapeGrammarNode::new(
            'A',
            GeometryKind::Cube,
            Vec3::new(10.0, 1.0, -20.0),
            Vec3::ZERO,
            Vec3::new(20.0, height, 20.0),
            Vec3::splat(0.6),
            height,
            false,
        )
    }

    #[test]
    fn test_body_chain_recovers_parent_vertical_scale() {
        // Sum of the equal vertical-scale increments across a body chain
        // must equal the parent's vertical scale.
        for replacement in ["BBB", "BBBC", "BBBBB", "BBBBBC"] {
            let parent = tower_parent(100.0);
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            let successors = expand_replacement(&parent, replacement, &mut rng);

            let bodies: Vec<&ShapeGrammarNode> =
                successors.iter().filter(|n| n.symbol == 'B').collect();

            let mut total = 0.0;
            let mut prev_y = 0.0;
            for b in &bodies {
                total += b.scale.y - prev_y;
                prev_y = b.scale.y;
            }
            assert!(
                (total - parent.scale.y).abs() < 1e-3,
                "chain {} sums to {} instead of {}",
                replacement,
                total,
                parent.scale.y
            );
        }
    }

    #[test]
    fn test_body_tapers_monotonically() {
        let parent = tower_parent(100.0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let successors = expand_replacement(&parent, "BBBBB", &mut rng);

        for pair in successors.windows(2) {
            assert!(pair[1].scale.x <= pair[0].scale.x);
            assert!(pair[1].scale.z <= pair[0].scale.z);
        }
    }

    #[test]
    fn test_cap_sits_at_building_height() {
        // Both cap variants must land exactly building_height above the
        // parent base; sweep seeds so both branches are exercised.
        let mut saw_flat = false;
        let mut saw_pyramid = false;

        for seed in 0..32 {
            let parent = tower_parent(90.0);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let successors = expand_replacement(&parent, "BBBC", &mut rng);

            let cap = successors.last().unwrap();
            assert_eq!(cap.symbol, 'C');
            assert!(cap.geometry.is_cap());
            assert!(
                (cap.position.y - (parent.position.y + parent.building_height)).abs() < 1e-4
            );

            match cap.geometry {
                GeometryKind::TopCube => saw_flat = true,
                GeometryKind::Pyramid => saw_pyramid = true,
                _ => unreachable!(),
            }
        }

        assert!(saw_flat && saw_pyramid, "seed sweep missed a cap variant");
    }

    #[test]
    fn test_lone_cap_uses_parent_footprint() {
        // 'C' as the first child has no previous sibling; the pyramid
        // branch must fall back to the parent footprint without panicking.
        for seed in 0..16 {
            let parent = tower_parent(60.0);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let successors = expand_replacement(&parent, "C", &mut rng);
            assert_eq!(successors.len(), 1);

            let cap = &successors[0];
            if cap.geometry == GeometryKind::Pyramid {
                assert!(cap.scale.x <= parent.scale.x);
                assert!(cap.scale.x >= parent.scale.x * 0.8);
            }
        }
    }

    #[test]
    fn test_slab_run_emits_one_extra_parent_copy() {
        let parent = tower_parent(50.0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let successors = expand_replacement(&parent, "GGGGG", &mut rng);

        // 5 slabs plus exactly one leading copy of the parent
        assert_eq!(successors.len(), 6);

        let copy = &successors[0];
        assert_eq!(copy.symbol, parent.symbol);
        assert_eq!(copy.geometry, parent.geometry);
        assert_eq!(copy.scale, parent.scale);
        assert_eq!(copy.position, parent.position);
        assert!(copy.terminal);

        let slabs: Vec<&ShapeGrammarNode> = successors[1..].iter().collect();
        assert_eq!(slabs.len(), 5);
        for (i, s) in slabs.iter().enumerate() {
            assert_eq!(s.geometry, GeometryKind::CubeRepeat);
            assert_eq!(s.scale.x, SLAB_FOOTPRINT);
            assert_eq!(s.scale.z, SLAB_FOOTPRINT);
            let expected_y = parent.position.y + i as f32 * parent.building_height / 5.0;
            assert!((s.position.y - expected_y).abs() < 1e-4);
        }
    }

    #[test]
    fn test_short_tower_never_twists() {
        let parent = tower_parent(100.0);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let successors = expand_replacement(&parent, "BBBBB", &mut rng);
        for node in &successors {
            assert_eq!(node.rotation.y, 0.0);
        }
    }

    #[test]
    fn test_tall_tower_twists_eventually() {
        // 65% per segment over several seeds: at least one run must twist.
        let mut twisted = false;
        for seed in 0..16 {
            let parent = tower_parent(150.0);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let successors = expand_replacement(&parent, "BBBBB", &mut rng);
            if successors.iter().any(|n| n.rotation.y != 0.0) {
                twisted = true;
                break;
            }
        }
        assert!(twisted);
    }

    #[test]
    fn test_unknown_symbol_passes_through_terminal() {
        let parent = tower_parent(80.0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let successors = expand_replacement(&parent, "XY", &mut rng);

        assert_eq!(successors.len(), 2);
        for (node, symbol) in successors.iter().zip(['X', 'Y']) {
            assert_eq!(node.symbol, symbol);
            assert_eq!(node.geometry, parent.geometry);
            assert_eq!(node.position, parent.position);
            assert_eq!(node.scale, parent.scale);
            assert!(node.terminal);
        }
    }

    #[test]
    fn test_successors_inherit_color_and_height() {
        let parent = tower_parent(140.0);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for node in expand_replacement(&parent, "BBBC", &mut rng) {
            assert_eq!(node.base_color, parent.base_color);
            assert_eq!(node.building_height, parent.building_height);
            assert!(node.terminal);
        }
    }

    #[test]
    fn test_empty_replacement_drops_node() {
        let parent = tower_parent(80.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(expand_replacement(&parent, "", &mut rng).is_empty());
    }
}
