//! Fixed z-order frame painter: clusters, edges, nodes, badges, labels,
//! metrics, then the highlight dim overlay. Pure function of the state and
//! the surface; the render loop just calls it every tick.

use std::collections::HashMap;
use std::f64::consts::TAU;

use super::layout::LayoutNode;
use super::state::GraphState;
use super::style;
use super::surface::DrawSurface;
use super::types::{RelationshipDirection, RelationshipType};

const ARROW_SIZE: f64 = 8.0;
const CLUSTER_PADDING: f64 = 14.0;
const EDGE_ALPHA: f64 = 0.6;
const CURVE_BOW: f64 = 0.15;
const LABEL_MAX_CHARS: usize = 18;

/// Paint one full frame. A zero-sized surface short-circuits with no draw
/// calls.
pub fn render<S: DrawSurface>(state: &GraphState, surface: &mut S) {
	let (width, height) = (surface.width(), surface.height());
	if width <= 0.0 || height <= 0.0 {
		return;
	}

	surface.set_fill_color(style::BACKGROUND);
	surface.fill_rect(0.0, 0.0, width, height);

	let positions: HashMap<&str, &LayoutNode> = state
		.nodes
		.iter()
		.map(|node| (node.id.as_str(), node))
		.collect();

	if state.settings.show_clusters {
		draw_clusters(state, &positions, surface);
	}
	draw_edges(state, &positions, surface);
	draw_nodes(state, surface);
	draw_badges(state, surface);
	if state.settings.show_labels {
		draw_labels(state, surface);
	}
	if state.settings.show_metrics {
		draw_metrics(state, surface);
	}

	// Crude global dim: suppresses the non-highlighted bulk; highlighted
	// elements were drawn emphasized so they still read through it.
	if state.selection.has_highlight() {
		surface.set_fill_color(style::DIM_OVERLAY);
		surface.fill_rect(0.0, 0.0, width, height);
	}
}

fn draw_clusters<S: DrawSurface>(
	state: &GraphState,
	positions: &HashMap<&str, &LayoutNode>,
	surface: &mut S,
) {
	for (slot, cluster) in state.clusters.iter().enumerate() {
		let members: Vec<&&LayoutNode> = cluster
			.asset_ids
			.iter()
			.filter_map(|id| positions.get(id.as_str()))
			.collect();
		if members.is_empty() {
			continue;
		}

		let mut min_x = f64::INFINITY;
		let mut min_y = f64::INFINITY;
		let mut max_x = f64::NEG_INFINITY;
		let mut max_y = f64::NEG_INFINITY;
		for node in &members {
			min_x = min_x.min(node.x - node.radius);
			min_y = min_y.min(node.y - node.radius);
			max_x = max_x.max(node.x + node.radius);
			max_y = max_y.max(node.y + node.radius);
		}
		min_x -= CLUSTER_PADDING;
		min_y -= CLUSTER_PADDING;
		max_x += CLUSTER_PADDING;
		max_y += CLUSTER_PADDING;

		let color = style::PALETTE[slot % style::PALETTE.len()];
		surface.set_global_alpha(0.08);
		surface.set_fill_color(color);
		surface.fill_rect(min_x, min_y, max_x - min_x, max_y - min_y);
		surface.set_global_alpha(0.5);
		surface.set_stroke_color(color);
		surface.set_line_width(1.0);
		surface.set_line_dash(&[6.0, 4.0]);
		surface.stroke_rect(min_x, min_y, max_x - min_x, max_y - min_y);
		surface.set_line_dash(&[]);
		surface.set_global_alpha(1.0);

		surface.set_fill_color(style::LABEL_COLOR);
		surface.set_font("11px sans-serif");
		surface.set_text_align("left");
		surface.fill_text(&cluster.name, min_x + 4.0, min_y - 5.0);
	}
}

fn draw_edges<S: DrawSurface>(
	state: &GraphState,
	positions: &HashMap<&str, &LayoutNode>,
	surface: &mut S,
) {
	for relationship in &state.relationships {
		let (Some(source), Some(target)) = (
			positions.get(relationship.source_id.as_str()),
			positions.get(relationship.target_id.as_str()),
		) else {
			log::debug!(
				"skipping relationship {} with unresolved endpoint",
				relationship.id
			);
			continue;
		};

		let dx = target.x - source.x;
		let dy = target.y - source.y;
		let distance = (dx * dx + dy * dy).sqrt();
		if distance < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / distance, dy / distance);

		// Clip to the circle boundaries along the line of sight.
		let (start_x, start_y) = (
			source.x + ux * source.radius,
			source.y + uy * source.radius,
		);
		let (end_x, end_y) = (target.x - ux * target.radius, target.y - uy * target.radius);

		let highlighted = state
			.selection
			.is_relationship_highlighted(&relationship.id)
			|| state.selection.selected_relationship.as_deref() == Some(relationship.id.as_str());
		let color = style::relationship_color(relationship.relationship_type);
		let line_width = style::edge_width(relationship, state.settings.edge_width_metric)
			+ if highlighted { 1.0 } else { 0.0 };

		surface.set_global_alpha(if highlighted { 1.0 } else { EDGE_ALPHA });
		surface.set_stroke_color(color);
		surface.set_line_width(line_width);
		surface.begin_path();
		surface.move_to(start_x, start_y);
		if relationship.relationship_type == RelationshipType::ParentChild {
			surface.line_to(end_x, end_y);
		} else {
			// Bow the curve perpendicular to the sight line.
			let bow = distance * CURVE_BOW;
			let control_x = (start_x + end_x) / 2.0 - uy * bow;
			let control_y = (start_y + end_y) / 2.0 + ux * bow;
			surface.quadratic_curve_to(control_x, control_y, end_x, end_y);
		}
		surface.stroke();

		surface.set_fill_color(color);
		draw_arrowhead(surface, end_x, end_y, ux, uy);
		if matches!(
			relationship.direction,
			RelationshipDirection::Bidirectional | RelationshipDirection::TargetToSource
		) {
			draw_arrowhead(surface, start_x, start_y, -ux, -uy);
		}
		surface.set_global_alpha(1.0);
	}
}

/// Filled triangle with its tip at `(x, y)`, pointing along `(ux, uy)`.
fn draw_arrowhead<S: DrawSurface>(surface: &mut S, x: f64, y: f64, ux: f64, uy: f64) {
	let back_x = x - ux * ARROW_SIZE;
	let back_y = y - uy * ARROW_SIZE;
	let px = -uy * ARROW_SIZE * 0.5;
	let py = ux * ARROW_SIZE * 0.5;
	surface.begin_path();
	surface.move_to(x, y);
	surface.line_to(back_x + px, back_y + py);
	surface.line_to(back_x - px, back_y - py);
	surface.close_path();
	surface.fill();
}

fn draw_nodes<S: DrawSurface>(state: &GraphState, surface: &mut S) {
	for node in &state.nodes {
		let Some(asset) = state.asset(&node.id) else {
			continue;
		};
		let color = style::node_color(
			asset,
			state.settings.color_scheme,
			state.cluster_index_of(&node.id),
		);
		let emphasized = state.selection.is_asset_emphasized(&node.id);

		if emphasized {
			surface.set_shadow(style::SELECTION_SHADOW, 12.0);
		}
		surface.set_fill_color(color);
		surface.begin_path();
		surface.arc(node.x, node.y, node.radius, 0.0, TAU);
		surface.fill();
		surface.set_stroke_color(style::NODE_BORDER);
		surface.set_line_width(if emphasized { 3.0 } else { 1.5 });
		surface.stroke();
		if emphasized {
			surface.clear_shadow();
		}

		if state.selection.is_asset_highlighted(&node.id) {
			surface.begin_path();
			surface.arc(node.x, node.y, node.radius + 4.0, 0.0, TAU);
			surface.set_stroke_color(style::HIGHLIGHT_RING);
			surface.set_line_width(2.0);
			surface.stroke();
		}
	}
}

/// Type glyph inside the circle plus a status dot on its rim.
fn draw_badges<S: DrawSurface>(state: &GraphState, surface: &mut S) {
	for node in &state.nodes {
		let Some(asset) = state.asset(&node.id) else {
			continue;
		};

		surface.set_fill_color("rgba(255, 255, 255, 0.9)");
		surface.set_font("10px sans-serif");
		surface.set_text_align("center");
		surface.fill_text(style::type_glyph(asset.asset_type), node.x, node.y + 3.0);

		// Dot at the upper-right rim.
		let dot_x = node.x + node.radius * std::f64::consts::FRAC_1_SQRT_2;
		let dot_y = node.y - node.radius * std::f64::consts::FRAC_1_SQRT_2;
		surface.set_fill_color(style::status_color(asset.status));
		surface.begin_path();
		surface.arc(dot_x, dot_y, 3.0, 0.0, TAU);
		surface.fill();
	}
}

fn draw_labels<S: DrawSurface>(state: &GraphState, surface: &mut S) {
	surface.set_fill_color(style::LABEL_COLOR);
	surface.set_font("12px sans-serif");
	surface.set_text_align("center");
	for node in &state.nodes {
		let Some(asset) = state.asset(&node.id) else {
			continue;
		};
		let label = truncate_label(&asset.name);
		surface.fill_text(&label, node.x, node.y + node.radius + 14.0);
	}
}

fn draw_metrics<S: DrawSurface>(state: &GraphState, surface: &mut S) {
	surface.set_fill_color(style::METRIC_COLOR);
	surface.set_font("10px sans-serif");
	surface.set_text_align("center");
	for node in &state.nodes {
		let Some(asset) = state.asset(&node.id) else {
			continue;
		};
		let caption = format!("Q {:.0}", asset.quality_score);
		surface.fill_text(&caption, node.x, node.y + node.radius + 27.0);
	}
}

fn truncate_label(name: &str) -> String {
	if name.chars().count() <= LABEL_MAX_CHARS {
		return name.to_string();
	}
	let mut label: String = name.chars().take(LABEL_MAX_CHARS - 1).collect();
	label.push('…');
	label
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::relationship_graph::layout::testutil::{asset, relationship};
	use crate::components::relationship_graph::surface::{DrawOp, RecordingSurface};
	use crate::components::relationship_graph::types::{
		Cluster, ClusterType, Relationship, RelationshipDirection, RelationshipType,
		VisualizationSettings,
	};

	fn graph(
		asset_count: usize,
		relationships: Vec<Relationship>,
		settings: VisualizationSettings,
	) -> GraphState {
		let assets: Vec<_> = (0..asset_count).map(|i| asset(&format!("a{i}"))).collect();
		GraphState::new(
			assets,
			relationships,
			Vec::new(),
			Vec::new(),
			settings,
			800.0,
			600.0,
			21,
		)
	}

	#[test]
	fn zero_sized_surface_short_circuits() {
		let state = graph(3, Vec::new(), VisualizationSettings::default());
		let mut surface = RecordingSurface::new(0.0, 600.0);
		render(&state, &mut surface);
		assert!(surface.ops.is_empty());
	}

	#[test]
	fn frame_starts_with_the_background_fill() {
		let state = graph(2, Vec::new(), VisualizationSettings::default());
		let mut surface = RecordingSurface::new(800.0, 600.0);
		render(&state, &mut surface);
		assert_eq!(
			&surface.ops[..2],
			&[
				DrawOp::FillColor(style::BACKGROUND.into()),
				DrawOp::FillRect(0.0, 0.0, 800.0, 600.0),
			]
		);
	}

	#[test]
	fn unresolved_relationship_produces_no_edge_draw_calls() {
		let relationships = vec![relationship(
			"r1",
			"a0",
			"ghost",
			RelationshipType::Dependency,
		)];
		let state = graph(2, relationships, VisualizationSettings::default());
		let mut surface = RecordingSurface::new(800.0, 600.0);
		render(&state, &mut surface);
		// Edge segments and arrowheads are the only users of MoveTo.
		assert_eq!(surface.count(|op| matches!(op, DrawOp::MoveTo(..))), 0);
	}

	#[test]
	fn parent_child_edges_are_straight_and_others_curve() {
		let straight = vec![relationship("r1", "a0", "a1", RelationshipType::ParentChild)];
		let state = graph(2, straight, VisualizationSettings::default());
		let mut surface = RecordingSurface::new(800.0, 600.0);
		render(&state, &mut surface);
		assert_eq!(
			surface.count(|op| matches!(op, DrawOp::QuadraticCurveTo(..))),
			0
		);
		assert!(surface.count(|op| matches!(op, DrawOp::MoveTo(..))) > 0);

		let curved = vec![relationship("r1", "a0", "a1", RelationshipType::Similarity)];
		let state = graph(2, curved, VisualizationSettings::default());
		let mut surface = RecordingSurface::new(800.0, 600.0);
		render(&state, &mut surface);
		assert_eq!(
			surface.count(|op| matches!(op, DrawOp::QuadraticCurveTo(..))),
			1
		);
	}

	#[test]
	fn arrowheads_follow_the_direction_field() {
		// One arrowhead triangle closes one path; source_to_target draws
		// one, bidirectional draws two.
		let mut one_way = relationship("r1", "a0", "a1", RelationshipType::Dependency);
		one_way.direction = RelationshipDirection::SourceToTarget;
		let state = graph(2, vec![one_way], VisualizationSettings::default());
		let mut surface = RecordingSurface::new(800.0, 600.0);
		render(&state, &mut surface);
		assert_eq!(surface.count(|op| matches!(op, DrawOp::ClosePath)), 1);

		let mut both_ways = relationship("r1", "a0", "a1", RelationshipType::Dependency);
		both_ways.direction = RelationshipDirection::Bidirectional;
		let state = graph(2, vec![both_ways], VisualizationSettings::default());
		let mut surface = RecordingSurface::new(800.0, 600.0);
		render(&state, &mut surface);
		assert_eq!(surface.count(|op| matches!(op, DrawOp::ClosePath)), 2);
	}

	#[test]
	fn labels_and_metrics_obey_their_toggles() {
		let settings = VisualizationSettings {
			show_labels: false,
			show_metrics: false,
			..VisualizationSettings::default()
		};
		let state = graph(2, Vec::new(), settings);
		let mut surface = RecordingSurface::new(800.0, 600.0);
		render(&state, &mut surface);
		// Only the glyph badges draw text when labels and metrics are off.
		let badge_text = surface.count(|op| matches!(op, DrawOp::FillText(..)));

		let settings = VisualizationSettings {
			show_labels: true,
			show_metrics: true,
			..VisualizationSettings::default()
		};
		let state = graph(2, Vec::new(), settings);
		let mut surface = RecordingSurface::new(800.0, 600.0);
		render(&state, &mut surface);
		let all_text = surface.count(|op| matches!(op, DrawOp::FillText(..)));
		// Two extra strings per node: the name label and the quality line.
		assert_eq!(all_text, badge_text + 4);
		assert!(
			surface.count(|op| matches!(op, DrawOp::FillText(text, _, _) if text == "A0")) == 1
		);
		assert!(
			surface.count(|op| matches!(op, DrawOp::FillText(text, _, _) if text == "Q 75")) == 2
		);
	}

	#[test]
	fn dim_overlay_is_the_last_layer_when_highlighted() {
		let relationships = vec![relationship("r1", "a0", "a1", RelationshipType::Dependency)];
		let mut state = graph(2, relationships, VisualizationSettings::default());
		let (x, y) = (state.nodes[0].x, state.nodes[0].y);
		state.handle_click(x, y);

		let mut surface = RecordingSurface::new(800.0, 600.0);
		render(&state, &mut surface);
		let last_two = &surface.ops[surface.ops.len() - 2..];
		assert_eq!(
			last_two,
			&[
				DrawOp::FillColor(style::DIM_OVERLAY.into()),
				DrawOp::FillRect(0.0, 0.0, 800.0, 600.0),
			]
		);
		// The highlight ring is present underneath.
		assert!(
			surface.count(|op| matches!(op, DrawOp::StrokeColor(c) if c == style::HIGHLIGHT_RING))
				>= 1
		);
	}

	#[test]
	fn cluster_overlay_draws_only_resolved_clusters() {
		let mut state = graph(3, Vec::new(), VisualizationSettings::default());
		state.clusters = vec![
			Cluster {
				id: "c1".into(),
				name: "named".into(),
				cluster_type: ClusterType::Domain,
				asset_ids: vec!["a0".into(), "a1".into()],
			},
			Cluster {
				id: "c2".into(),
				name: "empty".into(),
				cluster_type: ClusterType::Domain,
				asset_ids: vec!["nope".into()],
			},
		];
		let mut surface = RecordingSurface::new(800.0, 600.0);
		render(&state, &mut surface);
		assert_eq!(surface.count(|op| matches!(op, DrawOp::StrokeRect(..))), 1);
		assert_eq!(
			surface.count(|op| matches!(op, DrawOp::FillText(text, _, _) if text == "named")),
			1
		);
		assert_eq!(
			surface.count(|op| matches!(op, DrawOp::FillText(text, _, _) if text == "empty")),
			0
		);

		let mut settings = VisualizationSettings::default();
		settings.show_clusters = false;
		state.settings = settings;
		let mut surface = RecordingSurface::new(800.0, 600.0);
		render(&state, &mut surface);
		assert_eq!(surface.count(|op| matches!(op, DrawOp::StrokeRect(..))), 0);
	}

	#[test]
	fn long_names_are_truncated_with_an_ellipsis() {
		assert_eq!(truncate_label("orders"), "orders");
		let long = "a_very_long_asset_name_indeed";
		let label = truncate_label(long);
		assert_eq!(label.chars().count(), LABEL_MAX_CHARS);
		assert!(label.ends_with('…'));
	}
}
