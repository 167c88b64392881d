//! Grid-of-clusters placement. Each cluster gets a grid cell and its
//! members ring the cell center; assets outside every cluster keep their
//! random seed scatter. With no clusters at all this is just the force
//! layout.

use std::collections::HashMap;
use std::f64::consts::PI;

use super::{LayoutNode, force};
use crate::components::relationship_graph::types::{Cluster, Relationship};

/// Arrange clustered members on per-cell rings; falls back to the force
/// simulation when no clusters are supplied. An asset claimed by an earlier
/// cluster is not repositioned by a later one.
pub fn arrange(
	nodes: &mut [LayoutNode],
	relationships: &[Relationship],
	clusters: &[Cluster],
	enable_physics: bool,
	width: f64,
	height: f64,
) {
	if clusters.is_empty() {
		if enable_physics {
			force::simulate(nodes, relationships, width, height);
		}
		return;
	}

	let index: HashMap<String, usize> = nodes
		.iter()
		.enumerate()
		.map(|(i, node)| (node.id.clone(), i))
		.collect();

	let cols = (clusters.len() as f64).sqrt().ceil() as usize;
	let rows = clusters.len().div_ceil(cols);
	let cell_width = width / cols as f64;
	let cell_height = height / rows as f64;

	let mut placed = vec![false; nodes.len()];
	for (slot, cluster) in clusters.iter().enumerate() {
		let center_x = (slot % cols) as f64 * cell_width + cell_width / 2.0;
		let center_y = (slot / cols) as f64 * cell_height + cell_height / 2.0;
		let radius = cell_width.min(cell_height) / 3.0;

		let members: Vec<usize> = cluster
			.asset_ids
			.iter()
			.filter_map(|id| index.get(id.as_str()).copied())
			.filter(|&node| !placed[node])
			.collect();
		for (i, &node) in members.iter().enumerate() {
			let angle = 2.0 * PI * i as f64 / members.len() as f64;
			nodes[node].x = center_x + radius * angle.cos();
			nodes[node].y = center_y + radius * angle.sin();
			placed[node] = true;
		}
	}
	// Unclustered nodes keep the uniform random scatter they were seeded
	// with; they may overlap clustered groups.
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand_chacha::ChaCha8Rng;

	use super::super::testutil::asset;
	use super::super::compute_layout;
	use crate::components::relationship_graph::types::{
		Cluster, ClusterType, LayoutKind, VisualizationSettings,
	};

	fn cluster(id: &str, asset_ids: &[&str]) -> Cluster {
		Cluster {
			id: id.into(),
			name: id.to_uppercase(),
			cluster_type: ClusterType::Semantic,
			asset_ids: asset_ids.iter().map(|s| s.to_string()).collect(),
		}
	}

	#[test]
	fn shared_members_stay_with_the_first_cluster() {
		let assets: Vec<_> = (0..4).map(|i| asset(&format!("a{i}"))).collect();
		let clusters = vec![
			cluster("c1", &["a0", "a1"]),
			cluster("c2", &["a1", "a2", "a3"]),
		];
		let settings = VisualizationSettings {
			layout: LayoutKind::Cluster,
			..VisualizationSettings::default()
		};
		let mut rng = ChaCha8Rng::seed_from_u64(6);
		let nodes = compute_layout(&assets, &[], &clusters, &settings, 800.0, 600.0, &mut rng);

		// Cells: 2 cols x 1 row, centers at (200, 300) and (600, 300),
		// ring radius 400/3.
		let ring = 400.0 / 3.0;
		let distance_to = |id: &str, center: (f64, f64)| {
			let node = nodes.iter().find(|n| n.id == id).unwrap();
			((node.x - center.0).powi(2) + (node.y - center.1).powi(2)).sqrt()
		};
		// a1 belongs to c1's ring, not c2's.
		assert!((distance_to("a1", (200.0, 300.0)) - ring).abs() < 1e-6);
		assert!((distance_to("a2", (600.0, 300.0)) - ring).abs() < 1e-6);
		assert!((distance_to("a3", (600.0, 300.0)) - ring).abs() < 1e-6);
	}

	#[test]
	fn unknown_member_ids_are_skipped() {
		let assets = vec![asset("a0")];
		let clusters = vec![cluster("c1", &["a0", "missing"])];
		let settings = VisualizationSettings {
			layout: LayoutKind::Cluster,
			..VisualizationSettings::default()
		};
		let mut rng = ChaCha8Rng::seed_from_u64(6);
		let nodes = compute_layout(&assets, &[], &clusters, &settings, 800.0, 600.0, &mut rng);
		// The single resolved member rings alone: angle 0 puts it right of
		// the (only) cell center.
		assert_eq!(nodes[0].x, 400.0 + 600.0 / 3.0);
		assert_eq!(nodes[0].y, 300.0);
	}
}
