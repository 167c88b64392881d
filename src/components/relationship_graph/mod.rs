#[cfg(target_arch = "wasm32")]
mod component;
mod export;
mod interaction;
mod layout;
mod render;
mod state;
pub mod style;
mod surface;
mod types;

#[cfg(target_arch = "wasm32")]
pub use component::RelationshipGraphCanvas;
#[cfg(target_arch = "wasm32")]
pub use export::{download_canvas_png, download_text};
pub use export::{
	CSV_FILENAME, ExportError, JSON_FILENAME, PNG_FILENAME, graph_json, relationships_csv,
};
pub use interaction::{SelectionState, hit_test, select_asset};
pub use layout::{LayoutNode, compute_layout};
pub use render::render;
pub use state::GraphState;
pub use surface::DrawSurface;
pub use types::{
	Asset, AssetStatus, AssetType, Cluster, ClusterType, ColorScheme, EdgeWidthMetric, GraphData,
	LayoutKind, NodeSizeMetric, Pattern, Relationship, RelationshipDirection, RelationshipType,
	VisualizationSettings,
};
