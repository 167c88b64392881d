//! Iterative repulsion/attraction simulation. Approximate spring model for
//! visual clarity, not physical accuracy: every node pair repels, every
//! relationship pulls its endpoints together scaled by its strength.

use std::collections::HashMap;

use super::{LayoutNode, clamp_axis};
use crate::components::relationship_graph::types::Relationship;

const ITERATIONS: usize = 100;
/// Minimum pair distance, guards the division for coincident nodes.
const MIN_DISTANCE: f64 = 1.0;
const FORCE_SCALE: f64 = 0.1;
const DAMPING: f64 = 0.9;

/// Run the full simulation over `nodes` in place. Relationships whose
/// endpoints don't resolve to a node are skipped.
pub fn simulate(
	nodes: &mut [LayoutNode],
	relationships: &[Relationship],
	width: f64,
	height: f64,
) {
	if nodes.is_empty() {
		return;
	}

	// Fruchterman-Reingold scaling constant: denser graphs pack tighter.
	let k = ((width * height) / nodes.len() as f64).sqrt();
	let index: HashMap<String, usize> = nodes
		.iter()
		.enumerate()
		.map(|(i, node)| (node.id.clone(), i))
		.collect();

	for _ in 0..ITERATIONS {
		let mut forces = vec![(0.0_f64, 0.0_f64); nodes.len()];

		// Repulsion between every pair.
		for i in 0..nodes.len() {
			for j in 0..nodes.len() {
				if i == j {
					continue;
				}
				let dx = nodes[i].x - nodes[j].x;
				let dy = nodes[i].y - nodes[j].y;
				let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
				let repulsion = k * k / distance;
				forces[i].0 += dx / distance * repulsion;
				forces[i].1 += dy / distance * repulsion;
			}
		}

		// Attraction along relationships, scaled by strength.
		for relationship in relationships {
			let (Some(&source), Some(&target)) = (
				index.get(relationship.source_id.as_str()),
				index.get(relationship.target_id.as_str()),
			) else {
				continue;
			};
			let dx = nodes[target].x - nodes[source].x;
			let dy = nodes[target].y - nodes[source].y;
			let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
			let attraction = distance * distance / k * relationship.strength;
			let fx = dx / distance * attraction;
			let fy = dy / distance * attraction;
			forces[source].0 += fx;
			forces[source].1 += fy;
			forces[target].0 -= fx;
			forces[target].1 -= fy;
		}

		for (node, &(fx, fy)) in nodes.iter_mut().zip(&forces) {
			node.vx = (node.vx + fx * FORCE_SCALE) * DAMPING;
			node.vy = (node.vy + fy * FORCE_SCALE) * DAMPING;
			node.x = clamp_axis(node.x + node.vx, node.radius, width);
			node.y = clamp_axis(node.y + node.vy, node.radius, height);
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand_chacha::ChaCha8Rng;

	use super::super::testutil::{asset, relationship};
	use super::super::{compute_layout, seed_nodes};
	use super::*;
	use crate::components::relationship_graph::types::{
		LayoutKind, RelationshipType, VisualizationSettings,
	};

	const WIDTH: f64 = 800.0;
	const HEIGHT: f64 = 600.0;

	fn run(seed: u64, asset_count: usize, relationships: &[Relationship]) -> Vec<LayoutNode> {
		let assets: Vec<_> = (0..asset_count).map(|i| asset(&format!("a{i}"))).collect();
		let mut rng = ChaCha8Rng::seed_from_u64(seed);
		let settings = VisualizationSettings {
			layout: LayoutKind::Force,
			..VisualizationSettings::default()
		};
		compute_layout(
			&assets,
			relationships,
			&[],
			&settings,
			WIDTH,
			HEIGHT,
			&mut rng,
		)
	}

	#[test]
	fn positions_stay_clamped_to_the_viewport() {
		let relationships = vec![
			relationship("r1", "a0", "a1", RelationshipType::Dependency),
			relationship("r2", "a1", "a2", RelationshipType::Usage),
			relationship("r3", "a0", "a5", RelationshipType::Similarity),
		];
		for seed in 0..8 {
			let nodes = run(seed, 20, &relationships);
			for node in &nodes {
				assert!(
					node.x >= node.radius && node.x <= WIDTH - node.radius,
					"x {} outside [{}, {}]",
					node.x,
					node.radius,
					WIDTH - node.radius
				);
				assert!(
					node.y >= node.radius && node.y <= HEIGHT - node.radius,
					"y {} outside [{}, {}]",
					node.y,
					node.radius,
					HEIGHT - node.radius
				);
			}
		}
	}

	#[test]
	fn connected_nodes_sit_closer_than_the_unconnected_spread() {
		// One strongly linked pair in a field of loose nodes: the linked
		// pair should end up closer together than the average pair.
		let mut relationships = vec![relationship("r1", "a0", "a1", RelationshipType::Dependency)];
		relationships[0].strength = 1.0;
		let nodes = run(11, 14, &relationships);

		let by_id = |id: &str| nodes.iter().find(|n| n.id == id).unwrap();
		let pair_distance = {
			let (a, b) = (by_id("a0"), by_id("a1"));
			((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
		};
		let mut total = 0.0;
		let mut count = 0;
		for i in 0..nodes.len() {
			for j in (i + 1)..nodes.len() {
				let (a, b) = (&nodes[i], &nodes[j]);
				total += ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
				count += 1;
			}
		}
		assert!(
			pair_distance < total / count as f64,
			"linked pair at {pair_distance}, mean {}",
			total / count as f64
		);
	}

	#[test]
	fn unresolved_relationships_are_ignored_by_attraction() {
		let relationships = vec![relationship("r1", "a0", "ghost", RelationshipType::Dependency)];
		// Must not panic, and still clamps.
		let nodes = run(5, 4, &relationships);
		for node in &nodes {
			assert!(node.x >= node.radius && node.x <= WIDTH - node.radius);
		}
	}

	#[test]
	fn coincident_nodes_do_not_produce_nan() {
		let assets: Vec<_> = (0..3).map(|i| asset(&format!("a{i}"))).collect();
		let settings = VisualizationSettings::default();
		let mut rng = ChaCha8Rng::seed_from_u64(0);
		let mut nodes = seed_nodes(&assets, &settings, WIDTH, HEIGHT, &mut rng);
		for node in &mut nodes {
			node.x = 400.0;
			node.y = 300.0;
		}
		simulate(&mut nodes, &[], WIDTH, HEIGHT);
		for node in &nodes {
			assert!(node.x.is_finite() && node.y.is_finite());
		}
	}

	#[test]
	fn degenerate_viewport_does_not_panic() {
		let relationships = vec![relationship("r1", "a0", "a1", RelationshipType::Dependency)];
		let assets: Vec<_> = (0..3).map(|i| asset(&format!("a{i}"))).collect();
		let settings = VisualizationSettings::default();
		let mut rng = ChaCha8Rng::seed_from_u64(1);
		let mut nodes = seed_nodes(&assets, &settings, 4.0, 4.0, &mut rng);
		simulate(&mut nodes, &relationships, 4.0, 4.0);
		for node in &nodes {
			assert!(node.x.is_finite() && node.y.is_finite());
		}
	}
}
