//! Layout strategies. The dispatcher seeds every node at a random position
//! inside the viewport, then hands the node slice to the strategy selected
//! by the settings. Edges pass through untouched; positioning is the only
//! concern here.

mod circular;
mod cluster;
mod force;
mod hierarchy;

use rand::Rng;

use super::style;
use super::types::{Asset, Cluster, LayoutKind, Relationship, VisualizationSettings};

/// Per-pass positioning record for one asset. Owned by a single layout
/// pass; a relayout builds a fresh set from new random seeds.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode {
	pub id: String,
	pub x: f64,
	pub y: f64,
	/// Velocity, meaningful only while the force simulation runs.
	pub vx: f64,
	pub vy: f64,
	/// Rendered radius under the active size metric.
	pub radius: f64,
}

/// Clamp a coordinate so the node circle stays inside the viewport. The low
/// bound wins on degenerate viewports smaller than the node itself.
pub(crate) fn clamp_axis(value: f64, radius: f64, extent: f64) -> f64 {
	value.clamp(radius, (extent - radius).max(radius))
}

/// Seed one node per asset at a uniformly random viewport position.
fn seed_nodes<R: Rng>(
	assets: &[Asset],
	settings: &VisualizationSettings,
	width: f64,
	height: f64,
	rng: &mut R,
) -> Vec<LayoutNode> {
	assets
		.iter()
		.map(|asset| LayoutNode {
			id: asset.id.clone(),
			x: rng.gen_range(0.0..width.max(f64::MIN_POSITIVE)),
			y: rng.gen_range(0.0..height.max(f64::MIN_POSITIVE)),
			vx: 0.0,
			vy: 0.0,
			radius: style::node_radius(asset, settings.node_size_metric),
		})
		.collect()
}

/// Run the configured layout strategy and return positioned nodes, one per
/// asset. An empty asset list yields an empty node set.
pub fn compute_layout<R: Rng>(
	assets: &[Asset],
	relationships: &[Relationship],
	clusters: &[Cluster],
	settings: &VisualizationSettings,
	width: f64,
	height: f64,
	rng: &mut R,
) -> Vec<LayoutNode> {
	let mut nodes = seed_nodes(assets, settings, width, height, rng);
	match settings.layout {
		LayoutKind::Force => {
			if settings.enable_physics {
				force::simulate(&mut nodes, relationships, width, height);
			}
		}
		LayoutKind::Hierarchical => hierarchy::arrange(&mut nodes, relationships, width, height),
		LayoutKind::Circular => circular::arrange(&mut nodes, width, height),
		LayoutKind::Cluster => cluster::arrange(
			&mut nodes,
			relationships,
			clusters,
			settings.enable_physics,
			width,
			height,
		),
	}
	nodes
}
