//! Demonstration of full city layout generation

use rust_city_grammar::{CityConfigBuilder, CityLayout, CitySize, GeometryKind};

fn main() {
    println!("City Layout Demo\n");

    let config = CityConfigBuilder::new()
        .seed(42)
        .city_size(CitySize::Medium)
        .build()
        .unwrap();

    println!(
        "Generating a {} city ({}x{} subdivisions over {} units, seed {})",
        config.city_size.name(),
        config.subdivisions_x(),
        config.subdivisions_z(),
        config.ground_size(),
        config.seed
    );

    let city = CityLayout::generate(config);

    println!("{:-<60}", "");
    println!("Blocks      : {}", city.block_count());
    println!("Parks       : {}", city.park_block_indices().len());
    println!("Nodes       : {}", city.node_count());

    println!("\nNodes by mesh template:");
    println!("{:-<60}", "");

    let mut counts = std::collections::HashMap::new();
    for node in city.nodes() {
        *counts.entry(node.geometry).or_insert(0usize) += 1;
    }

    for kind in [
        GeometryKind::Cube,
        GeometryKind::Pyramid,
        GeometryKind::TopCube,
        GeometryKind::CubeRepeat,
    ] {
        let count = counts.get(&kind).unwrap_or(&0);
        let percentage = (*count as f32 / city.node_count() as f32) * 100.0;
        println!(
            "{:12} : {:5} nodes ({:5.1}%)",
            kind.mesh_key().unwrap(),
            count,
            percentage
        );
    }

    println!("\nDensity extremes:");
    println!("{:-<60}", "");

    let mut blocks: Vec<_> = city.blocks().iter().enumerate().collect();
    blocks.sort_by(|a, b| a.1.density.partial_cmp(&b.1.density).unwrap());

    if let (Some((lo_idx, lo)), Some((hi_idx, hi))) = (blocks.first(), blocks.last()) {
        println!("sparsest block {:3} : density {:.3}", lo_idx, lo.density);
        println!("densest  block {:3} : density {:.3}", hi_idx, hi.density);
    }

    println!("\n{:-<60}", "");
    println!("City layout generated successfully!");
}
