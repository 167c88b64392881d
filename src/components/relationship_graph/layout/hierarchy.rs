//! Parent/child tree leveling. Only `parent_child` relationships shape the
//! forest; everything else is ignored here (edges still render).

use std::collections::HashMap;

use super::LayoutNode;
use crate::components::relationship_graph::types::{Relationship, RelationshipType};

/// Level the forest and spread each level across the viewport width.
///
/// A child records its most recent parent when duplicate `parent_child`
/// edges target it (last write wins), and a visited set keeps cyclic data
/// from being reprocessed: the first-reached level sticks. Nodes that no
/// root can reach keep their seeded positions.
pub fn arrange(
	nodes: &mut [LayoutNode],
	relationships: &[Relationship],
	width: f64,
	height: f64,
) {
	if nodes.is_empty() {
		return;
	}

	let index: HashMap<&str, usize> = nodes
		.iter()
		.enumerate()
		.map(|(i, node)| (node.id.as_str(), i))
		.collect();

	let mut parent: Vec<Option<usize>> = vec![None; nodes.len()];
	let mut children: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
	for relationship in relationships {
		if relationship.relationship_type != RelationshipType::ParentChild {
			continue;
		}
		let (Some(&p), Some(&c)) = (
			index.get(relationship.source_id.as_str()),
			index.get(relationship.target_id.as_str()),
		) else {
			continue;
		};
		parent[c] = Some(p);
		children[p].push(c);
	}

	let mut levels: Vec<Vec<usize>> = Vec::new();
	let mut visited = vec![false; nodes.len()];
	for root in 0..nodes.len() {
		if parent[root].is_none() {
			assign_levels(root, 0, &children, &mut visited, &mut levels);
		}
	}

	let level_count = levels.len();
	for (depth, members) in levels.iter().enumerate() {
		let y = height * (depth as f64 + 1.0) / (level_count as f64 + 1.0);
		for (slot, &node) in members.iter().enumerate() {
			nodes[node].x = width * (slot as f64 + 1.0) / (members.len() as f64 + 1.0);
			nodes[node].y = y;
		}
	}
}

fn assign_levels(
	node: usize,
	level: usize,
	children: &[Vec<usize>],
	visited: &mut [bool],
	levels: &mut Vec<Vec<usize>>,
) {
	if visited[node] {
		return;
	}
	visited[node] = true;
	if levels.len() <= level {
		levels.resize(level + 1, Vec::new());
	}
	levels[level].push(node);
	for &child in &children[node] {
		assign_levels(child, level + 1, children, visited, levels);
	}
}
