//! Relationship-graph layout and rendering engine for the catalog
//! visualization surface, with a Leptos canvas component front-end.
//!
//! The layout strategies, render pipeline, interaction layer and export
//! adapter are target-independent; the component, router and download glue
//! only exist on the WASM target.

// Pulled in only to switch on its `js` feature for wasm builds of `rand`.
#[cfg(target_arch = "wasm32")]
use getrandom as _;
#[cfg(target_arch = "wasm32")]
use leptos::prelude::*;
#[cfg(target_arch = "wasm32")]
use leptos_meta::*;
#[cfg(target_arch = "wasm32")]
use leptos_router::components::*;
#[cfg(target_arch = "wasm32")]
use leptos_router::path;

// Modules
mod components;
#[cfg(target_arch = "wasm32")]
mod pages;

pub use components::relationship_graph::{
	Asset, AssetStatus, AssetType, CSV_FILENAME, Cluster, ClusterType, ColorScheme, DrawSurface,
	EdgeWidthMetric, ExportError, GraphData, GraphState, JSON_FILENAME, LayoutKind, LayoutNode,
	NodeSizeMetric, PNG_FILENAME, Pattern, Relationship, RelationshipDirection, RelationshipType,
	SelectionState, VisualizationSettings, compute_layout, graph_json, hit_test,
	relationships_csv, render, select_asset,
};
#[cfg(target_arch = "wasm32")]
pub use components::relationship_graph::{
	RelationshipGraphCanvas, download_canvas_png, download_text,
};

/// Initialize logging and panic hooks for the WASM target.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
	let _ = console_log::init_with_level(log::Level::Debug);
	console_error_panic_hook::set_once();
	log::info!("Logging initialized");
}

/// An app router which renders the relationship map and handles 404's
#[cfg(target_arch = "wasm32")]
#[component]
pub fn App() -> impl IntoView {
	use crate::pages::home::Home;
	use crate::pages::not_found::NotFound;

	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="Relationship Map" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
