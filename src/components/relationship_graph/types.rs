//! Value types shared by the layout strategies, the renderer and the
//! export adapter. All collections are supplied by the data layer and are
//! read-only inside the engine.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of catalogued entity an [`Asset`] represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
	Dataset,
	Table,
	Column,
	View,
	Schema,
	Database,
	Model,
	Report,
	Dashboard,
}

/// Lifecycle status of an asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
	Active,
	Inactive,
	Deprecated,
}

/// A catalogued entity to be positioned and drawn.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Asset {
	pub id: String,
	pub name: String,
	#[serde(rename = "type")]
	pub asset_type: AssetType,
	pub status: AssetStatus,
	/// Ids of the relationships this asset participates in.
	#[serde(default)]
	pub relationship_ids: Vec<String>,
	/// Quality score on a 0-100 scale.
	#[serde(default)]
	pub quality_score: f64,
	/// Usage frequency on a 0-1 scale.
	#[serde(default)]
	pub usage_frequency: f64,
	/// Business value on a 0-1 scale.
	#[serde(default)]
	pub business_value: f64,
	#[serde(default)]
	pub parent_id: Option<String>,
	#[serde(default)]
	pub children: Vec<String>,
}

/// Kind of connection between two assets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
	ParentChild,
	Dependency,
	Similarity,
	Usage,
	Transformation,
	Reference,
	Composition,
	Inheritance,
}

impl fmt::Display for RelationshipType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			RelationshipType::ParentChild => "parent_child",
			RelationshipType::Dependency => "dependency",
			RelationshipType::Similarity => "similarity",
			RelationshipType::Usage => "usage",
			RelationshipType::Transformation => "transformation",
			RelationshipType::Reference => "reference",
			RelationshipType::Composition => "composition",
			RelationshipType::Inheritance => "inheritance",
		};
		f.write_str(name)
	}
}

/// Direction a relationship's arrowheads point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipDirection {
	Bidirectional,
	SourceToTarget,
	TargetToSource,
}

impl fmt::Display for RelationshipDirection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			RelationshipDirection::Bidirectional => "bidirectional",
			RelationshipDirection::SourceToTarget => "source_to_target",
			RelationshipDirection::TargetToSource => "target_to_source",
		};
		f.write_str(name)
	}
}

/// A typed, weighted edge between two asset ids.
///
/// Both endpoints must resolve to known assets for the edge to be laid out
/// or drawn; unresolved edges are skipped, not rejected.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Relationship {
	pub id: String,
	pub source_id: String,
	pub target_id: String,
	#[serde(rename = "type")]
	pub relationship_type: RelationshipType,
	pub direction: RelationshipDirection,
	/// Pull strength in [0, 1].
	pub strength: f64,
	/// Detection confidence in [0, 1].
	pub confidence: f64,
	#[serde(default)]
	pub metadata: HashMap<String, serde_json::Value>,
}

impl Relationship {
	/// Usage frequency in [0, 1], read from the free-form metadata map.
	pub fn frequency(&self) -> f64 {
		self.metadata
			.get("frequency")
			.and_then(|value| value.as_f64())
			.unwrap_or(0.0)
	}

	/// Whether this relationship has `asset_id` as either endpoint.
	pub fn touches(&self, asset_id: &str) -> bool {
		self.source_id == asset_id || self.target_id == asset_id
	}
}

/// How a cluster of assets was derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterType {
	Semantic,
	Structural,
	Functional,
	Domain,
}

/// A named grouping of asset ids, consumed only by the cluster layout and
/// the cluster-overlay renderer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cluster {
	pub id: String,
	pub name: String,
	#[serde(rename = "type")]
	pub cluster_type: ClusterType,
	#[serde(default)]
	pub asset_ids: Vec<String>,
}

/// A detected usage/structure pattern. Opaque to the engine; carried so the
/// JSON export can include the full pattern collection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pattern {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[serde(rename = "type")]
	pub pattern_type: String,
	#[serde(default)]
	pub asset_ids: Vec<String>,
	#[serde(default)]
	pub confidence: f64,
}

/// The full input bundle the data layer hands the component.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GraphData {
	pub assets: Vec<Asset>,
	pub relationships: Vec<Relationship>,
	#[serde(default)]
	pub clusters: Vec<Cluster>,
	#[serde(default)]
	pub patterns: Vec<Pattern>,
}

/// Layout strategy selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
	#[default]
	Force,
	Hierarchical,
	Circular,
	Cluster,
}

impl LayoutKind {
	/// Lenient name lookup; unrecognized values fall back to `force`.
	pub fn parse(value: &str) -> Self {
		match value {
			"force" => LayoutKind::Force,
			"hierarchical" => LayoutKind::Hierarchical,
			"circular" => LayoutKind::Circular,
			"cluster" => LayoutKind::Cluster,
			other => {
				log::warn!("unknown layout {other:?}, using force");
				LayoutKind::Force
			}
		}
	}
}

/// Which asset metric drives node radius.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeSizeMetric {
	Static,
	#[default]
	Degree,
	Centrality,
	BusinessValue,
	Usage,
}

impl NodeSizeMetric {
	/// Lenient name lookup; unrecognized values fall back to `degree`.
	pub fn parse(value: &str) -> Self {
		match value {
			"static" => NodeSizeMetric::Static,
			"degree" => NodeSizeMetric::Degree,
			"centrality" => NodeSizeMetric::Centrality,
			"business_value" => NodeSizeMetric::BusinessValue,
			"usage" => NodeSizeMetric::Usage,
			other => {
				log::warn!("unknown node size metric {other:?}, using degree");
				NodeSizeMetric::Degree
			}
		}
	}
}

/// Which relationship metric drives edge width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeWidthMetric {
	Static,
	#[default]
	Strength,
	Confidence,
	Frequency,
}

impl EdgeWidthMetric {
	/// Lenient name lookup; unrecognized values fall back to `strength`.
	pub fn parse(value: &str) -> Self {
		match value {
			"static" => EdgeWidthMetric::Static,
			"strength" => EdgeWidthMetric::Strength,
			"confidence" => EdgeWidthMetric::Confidence,
			"frequency" => EdgeWidthMetric::Frequency,
			other => {
				log::warn!("unknown edge width metric {other:?}, using strength");
				EdgeWidthMetric::Strength
			}
		}
	}
}

/// Which property drives node fill color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
	#[default]
	Type,
	Cluster,
	Centrality,
	Quality,
	Status,
}

impl ColorScheme {
	/// Lenient name lookup; unrecognized values fall back to `type`.
	pub fn parse(value: &str) -> Self {
		match value {
			"type" => ColorScheme::Type,
			"cluster" => ColorScheme::Cluster,
			"centrality" => ColorScheme::Centrality,
			"quality" => ColorScheme::Quality,
			"status" => ColorScheme::Status,
			other => {
				log::warn!("unknown color scheme {other:?}, using type");
				ColorScheme::Type
			}
		}
	}
}

/// Engine configuration supplied by the settings panel.
///
/// `cluster_threshold` is forwarded to the clustering collaborator; the
/// engine itself receives clusters precomputed and does not consume it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationSettings {
	pub layout: LayoutKind,
	pub node_size_metric: NodeSizeMetric,
	pub edge_width_metric: EdgeWidthMetric,
	pub color_scheme: ColorScheme,
	pub show_labels: bool,
	pub show_metrics: bool,
	pub show_clusters: bool,
	pub enable_physics: bool,
	pub cluster_threshold: f64,
	pub max_relationships: usize,
}

impl Default for VisualizationSettings {
	fn default() -> Self {
		Self {
			layout: LayoutKind::Force,
			node_size_metric: NodeSizeMetric::Degree,
			edge_width_metric: EdgeWidthMetric::Strength,
			color_scheme: ColorScheme::Type,
			show_labels: true,
			show_metrics: false,
			show_clusters: true,
			enable_physics: true,
			cluster_threshold: 0.5,
			max_relationships: 100,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_falls_back_on_unknown_names() {
		assert_eq!(LayoutKind::parse("circular"), LayoutKind::Circular);
		assert_eq!(LayoutKind::parse("spiral"), LayoutKind::Force);
		assert_eq!(NodeSizeMetric::parse("pagerank"), NodeSizeMetric::Degree);
		assert_eq!(EdgeWidthMetric::parse("confidence"), EdgeWidthMetric::Confidence);
		assert_eq!(EdgeWidthMetric::parse(""), EdgeWidthMetric::Strength);
		assert_eq!(ColorScheme::parse("quality"), ColorScheme::Quality);
		assert_eq!(ColorScheme::parse("rainbow"), ColorScheme::Type);
	}

	#[test]
	fn relationship_frequency_reads_metadata() {
		let mut rel = Relationship {
			id: "r1".into(),
			source_id: "a".into(),
			target_id: "b".into(),
			relationship_type: RelationshipType::Usage,
			direction: RelationshipDirection::SourceToTarget,
			strength: 0.5,
			confidence: 0.5,
			metadata: HashMap::new(),
		};
		assert_eq!(rel.frequency(), 0.0);
		rel.metadata
			.insert("frequency".into(), serde_json::json!(0.75));
		assert_eq!(rel.frequency(), 0.75);
	}

	#[test]
	fn wire_names_are_snake_case() {
		let json = serde_json::to_value(RelationshipType::ParentChild).unwrap();
		assert_eq!(json, serde_json::json!("parent_child"));
		let json = serde_json::to_value(RelationshipDirection::TargetToSource).unwrap();
		assert_eq!(json, serde_json::json!("target_to_source"));
		assert_eq!(RelationshipType::ParentChild.to_string(), "parent_child");
		assert_eq!(
			RelationshipDirection::Bidirectional.to_string(),
			"bidirectional"
		);
	}
}
