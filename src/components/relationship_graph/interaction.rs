//! Pointer hit-testing and the selection/highlight state it derives. Kept
//! as an explicit value passed into the renderer rather than captured
//! closure state, so the pipeline stays a pure function of its inputs.

use std::collections::HashSet;

use super::layout::LayoutNode;
use super::types::Relationship;

/// Transient selection state; never persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionState {
	pub selected_asset: Option<String>,
	pub focused_asset: Option<String>,
	pub selected_relationship: Option<String>,
	pub highlighted_assets: HashSet<String>,
	pub highlighted_relationships: HashSet<String>,
}

impl SelectionState {
	/// True while either highlight set is non-empty (the dim overlay cue).
	pub fn has_highlight(&self) -> bool {
		!self.highlighted_assets.is_empty() || !self.highlighted_relationships.is_empty()
	}

	pub fn is_asset_highlighted(&self, asset_id: &str) -> bool {
		self.highlighted_assets.contains(asset_id)
	}

	pub fn is_relationship_highlighted(&self, relationship_id: &str) -> bool {
		self.highlighted_relationships.contains(relationship_id)
	}

	/// Whether the node should get the selected/focused emphasis.
	pub fn is_asset_emphasized(&self, asset_id: &str) -> bool {
		self.selected_asset.as_deref() == Some(asset_id)
			|| self.focused_asset.as_deref() == Some(asset_id)
	}

	pub fn clear(&mut self) {
		*self = SelectionState::default();
	}
}

/// Linear first-match scan: the first node in asset iteration order whose
/// circle contains the pointer wins, even when a later node is closer.
pub fn hit_test(nodes: &[LayoutNode], x: f64, y: f64) -> Option<&LayoutNode> {
	nodes.iter().find(|node| {
		let dx = x - node.x;
		let dy = y - node.y;
		(dx * dx + dy * dy).sqrt() <= node.radius
	})
}

/// Selection derived from clicking `asset_id`: the asset itself plus every
/// asset one relationship away, and every relationship touching it.
pub fn select_asset(asset_id: &str, relationships: &[Relationship]) -> SelectionState {
	let mut state = SelectionState {
		selected_asset: Some(asset_id.to_string()),
		focused_asset: Some(asset_id.to_string()),
		..SelectionState::default()
	};
	state.highlighted_assets.insert(asset_id.to_string());
	for relationship in relationships {
		if !relationship.touches(asset_id) {
			continue;
		}
		state.highlighted_relationships.insert(relationship.id.clone());
		let neighbor = if relationship.source_id == asset_id {
			&relationship.target_id
		} else {
			&relationship.source_id
		};
		state.highlighted_assets.insert(neighbor.clone());
	}
	state
}
