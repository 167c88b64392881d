//! Pure size/color/width mappings. Every function here is stateless so the
//! renderer stays a plain function of its inputs.

use super::types::{
	Asset, AssetStatus, AssetType, ColorScheme, EdgeWidthMetric, NodeSizeMetric, Relationship,
	RelationshipType,
};

/// Categorical palette used by the cluster color scheme and overlays.
pub const PALETTE: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

pub const BACKGROUND: &str = "#1a1a2e";
pub const DEFAULT_NODE_COLOR: &str = "#64b4ff";
pub const NODE_BORDER: &str = "rgba(255, 255, 255, 0.85)";
pub const HIGHLIGHT_RING: &str = "#fbbf24";
pub const LABEL_COLOR: &str = "rgba(230, 235, 245, 0.9)";
pub const METRIC_COLOR: &str = "rgba(180, 190, 210, 0.7)";
pub const DIM_OVERLAY: &str = "rgba(26, 26, 46, 0.45)";
pub const SELECTION_SHADOW: &str = "rgba(0, 0, 0, 0.5)";

const NODE_BASE_SIZE: f64 = 8.0;
const NODE_MIN_SIZE: f64 = 5.0;
const NODE_MAX_SIZE: f64 = 30.0;

const EDGE_BASE_WIDTH: f64 = 2.0;
const EDGE_MIN_WIDTH: f64 = 1.0;
const EDGE_MAX_WIDTH: f64 = 8.0;

/// Rendered radius for an asset under the active size metric.
pub fn node_radius(asset: &Asset, metric: NodeSizeMetric) -> f64 {
	let boost = match metric {
		NodeSizeMetric::Degree => asset.relationship_ids.len() as f64 * 2.0,
		NodeSizeMetric::BusinessValue => asset.business_value * 20.0,
		NodeSizeMetric::Usage => asset.usage_frequency * 20.0,
		// Centrality is declared but never computed; it renders at the
		// static size.
		NodeSizeMetric::Static | NodeSizeMetric::Centrality => 0.0,
	};
	(NODE_BASE_SIZE + boost).clamp(NODE_MIN_SIZE, NODE_MAX_SIZE)
}

/// Stroke width for a relationship under the active width metric.
pub fn edge_width(relationship: &Relationship, metric: EdgeWidthMetric) -> f64 {
	let boost = match metric {
		EdgeWidthMetric::Strength => relationship.strength * 4.0,
		EdgeWidthMetric::Confidence => relationship.confidence * 4.0,
		EdgeWidthMetric::Frequency => relationship.frequency() * 4.0,
		EdgeWidthMetric::Static => 0.0,
	};
	(EDGE_BASE_WIDTH + boost).clamp(EDGE_MIN_WIDTH, EDGE_MAX_WIDTH)
}

/// Fill color for an asset under the active color scheme.
///
/// `cluster_index` is the index of the first cluster containing the asset,
/// if any; only the cluster scheme consumes it.
pub fn node_color(asset: &Asset, scheme: ColorScheme, cluster_index: Option<usize>) -> &'static str {
	match scheme {
		ColorScheme::Type => type_color(asset.asset_type),
		ColorScheme::Status => status_color(asset.status),
		ColorScheme::Quality => quality_color(asset.quality_score),
		ColorScheme::Cluster => cluster_index
			.map(|index| PALETTE[index % PALETTE.len()])
			.unwrap_or(DEFAULT_NODE_COLOR),
		// Centrality is declared but never computed; assets render in the
		// default color.
		ColorScheme::Centrality => DEFAULT_NODE_COLOR,
	}
}

pub fn type_color(asset_type: AssetType) -> &'static str {
	match asset_type {
		AssetType::Dataset => "#4e79a7",
		AssetType::Table => "#59a14f",
		AssetType::Column => "#9c755f",
		AssetType::View => "#76b7b2",
		AssetType::Schema => "#edc948",
		AssetType::Database => "#b07aa1",
		AssetType::Model => "#f28e2b",
		AssetType::Report => "#e15759",
		AssetType::Dashboard => "#ff9da7",
	}
}

pub fn status_color(status: AssetStatus) -> &'static str {
	match status {
		AssetStatus::Active => "#10b981",
		AssetStatus::Inactive => "#9ca3af",
		AssetStatus::Deprecated => "#ef4444",
	}
}

/// Four-tier quality coloring over the 0-100 score.
pub fn quality_color(score: f64) -> &'static str {
	if score >= 90.0 {
		"#10b981"
	} else if score >= 70.0 {
		"#f59e0b"
	} else if score >= 50.0 {
		"#f97316"
	} else {
		"#ef4444"
	}
}

pub fn relationship_color(relationship_type: RelationshipType) -> &'static str {
	match relationship_type {
		RelationshipType::ParentChild => "#a0aec0",
		RelationshipType::Dependency => "#64b4ff",
		RelationshipType::Similarity => "#b794f4",
		RelationshipType::Usage => "#68d391",
		RelationshipType::Transformation => "#f6ad55",
		RelationshipType::Reference => "#76e4f7",
		RelationshipType::Composition => "#f687b3",
		RelationshipType::Inheritance => "#fbd38d",
	}
}

/// One-character glyph drawn inside a node to hint its asset type.
pub fn type_glyph(asset_type: AssetType) -> &'static str {
	match asset_type {
		AssetType::Dataset => "◆",
		AssetType::Table => "▦",
		AssetType::Column => "▥",
		AssetType::View => "◫",
		AssetType::Schema => "⌘",
		AssetType::Database => "⛁",
		AssetType::Model => "ƒ",
		AssetType::Report => "▤",
		AssetType::Dashboard => "◳",
	}
}
