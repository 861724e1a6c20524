//! Shape-grammar city layout generation
//!
//! A standalone library for generating synthetic city layouts: a jittered
//! block partition of a ground plane, noise-driven population density,
//! and building geometry descriptors grown from seed shapes by a
//! stochastic shape grammar. The output is plain data suitable for any
//! game engine (Bevy, Godot, etc.): the renderer joins each node's
//! geometry tag to a mesh template and instances it.
//!
//! # Quick Start
//!
//! ```rust
//! use rust_city_grammar::*;
//!
//! // Configure a city
//! let config = CityConfigBuilder::new()
//!     .seed(42)
//!     .city_size(CitySize::Small)
//!     .build()
//!     .unwrap();
//!
//! // Generate the layout
//! let city = CityLayout::generate(config);
//! println!(
//!     "Generated {} blocks and {} building nodes",
//!     city.block_count(),
//!     city.node_count()
//! );
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): O(log n) position-to-block lookups using a KD-tree
//! - `serde`: Serialization support for configuration and layout data

// Modules
pub mod error;
pub mod config;
pub mod block;
pub mod density;
pub mod generation;
pub mod grammar;
pub mod city;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{CityError, Result};
pub use config::{CityConfig, CityConfigBuilder, CitySize};
pub use block::Block;
pub use density::{DensitySampler, PerlinDensityField, perlin_2d};
pub use generation::{generate_blocks, merge_blocks, place_seed_nodes, subdivide, SeedPlacement};
pub use grammar::{GeometryKind, ProductionSet, ShapeGrammar, ShapeGrammarNode, rewrite};
pub use city::{CityLayout, ParkTree};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam vector types for convenience
pub use glam::{Vec2, Vec3};
