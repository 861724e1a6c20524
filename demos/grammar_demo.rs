//! Demonstration of the shape grammar rewriting system

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_city_grammar::{
    GeometryKind, ProductionSet, ShapeGrammar, ShapeGrammarNode, Vec3,
};

fn main() {
    println!("Shape Grammar Demo\n");

    // Parse a rule listing, with one deliberately broken line
    let listing = "A -> BBBC\nA -> BBBBB\nE -> GGG\nthis line is broken\n";
    let (productions, diagnostics) = ProductionSet::parse(listing);

    println!("Parsed {} symbols from the listing", productions.len());
    for diagnostic in &diagnostics {
        println!("  skipped: {}", diagnostic);
    }

    // One hand-made seed tower
    let seed = ShapeGrammarNode::new(
        'A',
        GeometryKind::Cube,
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::ZERO,
        Vec3::new(20.0, 140.0, 20.0),
        Vec3::splat(0.7),
        140.0,
        false,
    );

    let mut grammar = ShapeGrammar::new(productions);
    grammar.set_seed_nodes(vec![seed]);

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let nodes = grammar.run_generations(1, &mut rng);

    println!("\nExpanded one seed into {} nodes:", nodes.len());
    println!("{:-<72}", "");
    for node in nodes {
        println!(
            "{} {:10} pos.y {:7.2}  scale ({:6.2}, {:6.2}, {:6.2})  rot.y {:5.2}",
            node.symbol,
            node.geometry.mesh_key().unwrap_or("-"),
            node.position.y,
            node.scale.x,
            node.scale.y,
            node.scale.z,
            node.rotation.y,
        );
    }

    println!("\n{:-<72}", "");
    println!("Grammar expansion complete!");
}
