//! Shape grammar node and geometry tags

use glam::{Vec2, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mesh template tag carried by every node
///
/// This is the only coupling to the rendering layer: the renderer picks a
/// mesh template by this tag and instances it with the node's transform
/// and color.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeometryKind {
    /// Plain building body cube
    Cube,
    /// Pyramid roof cap
    Pyramid,
    /// Flat box roof cap
    TopCube,
    /// Repeating low-rise slab unit
    CubeRepeat,
    /// No template assigned
    #[default]
    Unchanged,
}

impl GeometryKind {
    /// Key of the mesh template the renderer should instance
    ///
    /// `None` means the node carries no template of its own and should be
    /// skipped by mesh assembly.
    pub fn mesh_key(&self) -> Option<&'static str> {
        match self {
            GeometryKind::Cube => Some("Cube"),
            GeometryKind::Pyramid => Some("Pyramid"),
            GeometryKind::TopCube => Some("TopCube"),
            GeometryKind::CubeRepeat => Some("CubeRepeat"),
            GeometryKind::Unchanged => None,
        }
    }

    /// Check if this tag marks a roof cap
    pub fn is_cap(&self) -> bool {
        matches!(self, GeometryKind::Pyramid | GeometryKind::TopCube)
    }
}

/// One node of the shape grammar
///
/// Nodes are immutable once created: a rewrite produces new nodes that
/// replace their parent in the active set, it never mutates a node in
/// place. A node is destroyed only by being excluded from the next
/// generation's node set.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeGrammarNode {
    /// Grammar symbol of this node
    pub symbol: char,

    /// Mesh template tag
    pub geometry: GeometryKind,

    /// World position of the node base
    pub position: Vec3,

    /// Euler rotation in radians, applied X then Y then Z
    pub rotation: Vec3,

    /// Per-axis scale; `y` is the vertical extent, `x`/`z` the footprint
    pub scale: Vec3,

    /// Base color of the whole building, RGB in [0, 1]
    ///
    /// Shared by every node of one building; the renderer derives per-
    /// vertex shading from it.
    pub base_color: Vec3,

    /// Total height of the building this node belongs to
    ///
    /// Set on the root node and inherited unchanged by all descendants.
    pub building_height: f32,

    /// Terminal nodes are never rewritten again
    pub terminal: bool,
}

impl ShapeGrammarNode {
    /// Create a new node
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: char,
        geometry: GeometryKind,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
        base_color: Vec3,
        building_height: f32,
        terminal: bool,
    ) -> Self {
        Self {
            symbol,
            geometry,
            position,
            rotation,
            scale,
            base_color,
            building_height,
            terminal,
        }
    }

    /// Horizontal (X/Z) scale of the node
    #[inline]
    pub fn footprint(&self) -> Vec2 {
        Vec2::new(self.scale.x, self.scale.z)
    }
}
