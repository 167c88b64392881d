use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use crate::components::relationship_graph::{
	Asset, AssetStatus, AssetType, CSV_FILENAME, Cluster, ClusterType, GraphData, JSON_FILENAME,
	LayoutKind, PNG_FILENAME, Pattern, Relationship, RelationshipDirection,
	RelationshipGraphCanvas, RelationshipType, VisualizationSettings, download_canvas_png,
	download_text, graph_json, relationships_csv,
};

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

fn catalog_asset(id: &str, name: &str, asset_type: AssetType, seed: usize) -> Asset {
	Asset {
		id: id.into(),
		name: name.into(),
		asset_type,
		status: if seed % 7 == 3 {
			AssetStatus::Deprecated
		} else {
			AssetStatus::Active
		},
		relationship_ids: Vec::new(),
		quality_score: 40.0 + rand_simple(seed) * 60.0,
		usage_frequency: rand_simple(seed * 3),
		business_value: rand_simple(seed * 5),
		parent_id: None,
		children: Vec::new(),
	}
}

fn link(
	assets: &mut [Asset],
	relationships: &mut Vec<Relationship>,
	source: &str,
	target: &str,
	relationship_type: RelationshipType,
	direction: RelationshipDirection,
	strength: f64,
) {
	let id = format!("r{}", relationships.len());
	relationships.push(Relationship {
		id: id.clone(),
		source_id: source.into(),
		target_id: target.into(),
		relationship_type,
		direction,
		strength,
		confidence: 0.6 + rand_simple(relationships.len()) * 0.4,
		metadata: Default::default(),
	});
	for asset in assets.iter_mut() {
		if asset.id == source || asset.id == target {
			asset.relationship_ids.push(id.clone());
		}
	}
}

/// Build a small deterministic sample catalog: a warehouse hierarchy plus
/// cross-cutting dependency and usage links.
fn sample_catalog() -> GraphData {
	let mut assets: Vec<Asset> = [
		("warehouse", "Warehouse", AssetType::Database),
		("sales", "Sales", AssetType::Schema),
		("analytics", "Analytics", AssetType::Schema),
		("orders", "orders", AssetType::Table),
		("customers", "customers", AssetType::Table),
		("events", "events", AssetType::Table),
		("order_id", "orders.order_id", AssetType::Column),
		("customer_id", "orders.customer_id", AssetType::Column),
		("active_customers", "active_customers", AssetType::View),
		("sessions", "sessions", AssetType::Dataset),
		("revenue_model", "Revenue Forecast", AssetType::Model),
		("churn_model", "Churn Risk", AssetType::Model),
		("sales_report", "Weekly Sales", AssetType::Report),
		("kpi_dashboard", "Exec KPIs", AssetType::Dashboard),
	]
	.into_iter()
	.enumerate()
	.map(|(i, (id, name, asset_type))| catalog_asset(id, name, asset_type, i))
	.collect();

	let mut relationships = Vec::new();
	use RelationshipDirection::{Bidirectional, SourceToTarget};
	use RelationshipType::*;
	for (parent, child) in [
		("warehouse", "sales"),
		("warehouse", "analytics"),
		("sales", "orders"),
		("sales", "customers"),
		("analytics", "events"),
		("orders", "order_id"),
		("orders", "customer_id"),
	] {
		link(&mut assets, &mut relationships, parent, child, ParentChild, SourceToTarget, 1.0);
	}
	for (source, target, ty, strength) in [
		("orders", "revenue_model", Dependency, 0.9),
		("customers", "revenue_model", Dependency, 0.7),
		("customers", "churn_model", Dependency, 0.8),
		("events", "churn_model", Dependency, 0.6),
		("events", "sessions", Transformation, 0.8),
		("customers", "active_customers", Transformation, 0.9),
		("revenue_model", "sales_report", Usage, 0.8),
		("sales_report", "kpi_dashboard", Reference, 0.7),
		("churn_model", "kpi_dashboard", Usage, 0.6),
	] {
		link(&mut assets, &mut relationships, source, target, ty, SourceToTarget, strength);
	}
	link(
		&mut assets,
		&mut relationships,
		"orders",
		"events",
		Similarity,
		Bidirectional,
		0.4,
	);

	let clusters = vec![
		Cluster {
			id: "c_sales".into(),
			name: "Sales domain".into(),
			cluster_type: ClusterType::Domain,
			asset_ids: vec![
				"sales".into(),
				"orders".into(),
				"customers".into(),
				"order_id".into(),
				"customer_id".into(),
			],
		},
		Cluster {
			id: "c_analytics".into(),
			name: "Analytics domain".into(),
			cluster_type: ClusterType::Domain,
			asset_ids: vec!["analytics".into(), "events".into(), "sessions".into()],
		},
		Cluster {
			id: "c_consumers".into(),
			name: "Consumers".into(),
			cluster_type: ClusterType::Functional,
			asset_ids: vec![
				"revenue_model".into(),
				"churn_model".into(),
				"sales_report".into(),
				"kpi_dashboard".into(),
			],
		},
	];

	let patterns = vec![Pattern {
		id: "p_hub".into(),
		name: "Customer data hub".into(),
		description: "customers feeds both models and the active view".into(),
		pattern_type: "usage_hub".into(),
		asset_ids: vec!["customers".into()],
		confidence: 0.82,
	}];

	GraphData {
		assets,
		relationships,
		clusters,
		patterns,
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(sample_catalog);
	let (settings, set_settings) = signal(VisualizationSettings::default());
	let selected = RwSignal::new(None::<String>);
	let on_select = Callback::new(move |id: Option<String>| selected.set(id));

	let cycle_layout = move |_| {
		set_settings.update(|s| {
			s.layout = match s.layout {
				LayoutKind::Force => LayoutKind::Hierarchical,
				LayoutKind::Hierarchical => LayoutKind::Circular,
				LayoutKind::Circular => LayoutKind::Cluster,
				LayoutKind::Cluster => LayoutKind::Force,
			};
		});
	};

	let export_json = move |_| {
		let data = graph_data.get_untracked();
		match graph_json(&data.assets, &data.relationships, &data.clusters, &data.patterns) {
			Ok(json) => download_text(JSON_FILENAME, "application/json", &json),
			Err(error) => log::warn!("json export failed: {error}"),
		}
	};
	let export_csv = move |_| {
		let data = graph_data.get_untracked();
		download_text(
			CSV_FILENAME,
			"text/csv",
			&relationships_csv(&data.relationships),
		);
	};
	let export_png = move |_| {
		let canvas = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.query_selector(".relationship-graph-canvas").ok().flatten())
			.and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
		match canvas {
			Some(canvas) => download_canvas_png(&canvas, PNG_FILENAME),
			None => log::warn!("no canvas to snapshot"),
		}
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<RelationshipGraphCanvas
					data=graph_data
					settings=settings
					fullscreen=true
					on_select=on_select
				/>
				<div class="graph-overlay">
					<h1>"Relationship Map"</h1>
					<p class="subtitle">
						{move || {
							selected
								.get()
								.map(|id| format!("Selected: {id}"))
								.unwrap_or_else(|| "Click a node to inspect its neighborhood.".into())
						}}
					</p>
					<div class="graph-toolbar">
						<button on:click=cycle_layout>"Switch layout"</button>
						<button on:click=export_png>"Export PNG"</button>
						<button on:click=export_json>"Export JSON"</button>
						<button on:click=export_csv>"Export CSV"</button>
					</div>
				</div>
			</div>
		</ErrorBoundary>
	}
}
