//! Mutable engine state: the input collections, the positioned nodes of the
//! current layout pass, and the live selection. The component owns one of
//! these behind `Rc<RefCell<..>>` and the render loop and pointer handlers
//! share it on the one UI thread.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::interaction::{self, SelectionState};
use super::layout::{self, LayoutNode};
use super::types::{Asset, Cluster, Pattern, Relationship, VisualizationSettings};

/// Everything one visualization instance owns.
pub struct GraphState {
	pub assets: Vec<Asset>,
	/// Relationship list already capped at `settings.max_relationships`.
	pub relationships: Vec<Relationship>,
	pub clusters: Vec<Cluster>,
	pub patterns: Vec<Pattern>,
	pub settings: VisualizationSettings,
	pub nodes: Vec<LayoutNode>,
	pub selection: SelectionState,
	pub width: f64,
	pub height: f64,
	rng: ChaCha8Rng,
}

impl GraphState {
	/// Build state and run the first layout pass.
	pub fn new(
		assets: Vec<Asset>,
		mut relationships: Vec<Relationship>,
		clusters: Vec<Cluster>,
		patterns: Vec<Pattern>,
		settings: VisualizationSettings,
		width: f64,
		height: f64,
		seed: u64,
	) -> Self {
		if relationships.len() > settings.max_relationships {
			log::debug!(
				"capping {} relationships at {}",
				relationships.len(),
				settings.max_relationships
			);
			relationships.truncate(settings.max_relationships);
		}
		let mut state = Self {
			assets,
			relationships,
			clusters,
			patterns,
			settings,
			nodes: Vec::new(),
			selection: SelectionState::default(),
			width,
			height,
			rng: ChaCha8Rng::seed_from_u64(seed),
		};
		state.relayout();
		state
	}

	/// Discard the previous node array and lay out fresh. Random seeding
	/// makes each pass start from new positions; nothing carries over.
	pub fn relayout(&mut self) {
		self.nodes = layout::compute_layout(
			&self.assets,
			&self.relationships,
			&self.clusters,
			&self.settings,
			self.width,
			self.height,
			&mut self.rng,
		);
	}

	/// Track a container size change and re-run the layout against the new
	/// viewport.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.relayout();
	}

	/// Swap in new settings and re-run the layout under them.
	pub fn apply_settings(&mut self, settings: VisualizationSettings) {
		self.settings = settings;
		if self.relationships.len() > self.settings.max_relationships {
			self.relationships.truncate(self.settings.max_relationships);
		}
		self.relayout();
	}

	/// Resolve a pointer click: select and highlight on a hit, clear the
	/// selection on a miss. Returns the selected asset id, if any.
	pub fn handle_click(&mut self, x: f64, y: f64) -> Option<String> {
		match interaction::hit_test(&self.nodes, x, y) {
			Some(node) => {
				let id = node.id.clone();
				self.selection = interaction::select_asset(&id, &self.relationships);
				Some(id)
			}
			None => {
				self.selection.clear();
				None
			}
		}
	}

	/// First cluster (by list order) containing the asset, as an index into
	/// the cluster list. Drives the cluster color scheme.
	pub fn cluster_index_of(&self, asset_id: &str) -> Option<usize> {
		self.clusters
			.iter()
			.position(|cluster| cluster.asset_ids.iter().any(|id| id == asset_id))
	}

	pub fn asset(&self, asset_id: &str) -> Option<&Asset> {
		self.assets.iter().find(|asset| asset.id == asset_id)
	}
}
