//! Synchronous snapshots of the current graph state: a JSON document of the
//! full in-memory collections, a CSV of the relationship list, and (in the
//! browser) the canvas pixels as a PNG. Downloads are fire-and-forget;
//! failures log and move on.

use std::fmt::Write as _;

use serde::Serialize;
use thiserror::Error;

use super::types::{Asset, Cluster, Pattern, Relationship};

/// Fixed download filenames, one per format.
pub const JSON_FILENAME: &str = "relationship-map.json";
pub const CSV_FILENAME: &str = "relationships.csv";
pub const PNG_FILENAME: &str = "relationship-map.png";

pub const CSV_HEADER: &str = "source_id,target_id,type,strength,confidence,direction";

/// Export failure. Only the JSON serializer can actually fail off-browser;
/// browser delivery problems are logged, not raised.
#[derive(Debug, Error)]
pub enum ExportError {
	#[error("failed to serialize graph state: {0}")]
	Serialize(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct ExportDocument<'a> {
	assets: &'a [Asset],
	relationships: &'a [Relationship],
	clusters: &'a [Cluster],
	patterns: &'a [Pattern],
}

/// Full in-memory collections as a pretty-printed JSON document, not just
/// what is on screen.
pub fn graph_json(
	assets: &[Asset],
	relationships: &[Relationship],
	clusters: &[Cluster],
	patterns: &[Pattern],
) -> Result<String, ExportError> {
	let document = ExportDocument {
		assets,
		relationships,
		clusters,
		patterns,
	};
	Ok(serde_json::to_string_pretty(&document)?)
}

/// One comma-joined row per relationship under a fixed header. Fields are
/// written verbatim; ids are expected not to contain commas.
pub fn relationships_csv(relationships: &[Relationship]) -> String {
	let mut csv = String::from(CSV_HEADER);
	csv.push('\n');
	for relationship in relationships {
		let _ = writeln!(
			csv,
			"{},{},{},{},{},{}",
			relationship.source_id,
			relationship.target_id,
			relationship.relationship_type,
			relationship.strength,
			relationship.confidence,
			relationship.direction,
		);
	}
	csv
}

#[cfg(target_arch = "wasm32")]
mod download {
	use wasm_bindgen::{JsCast, JsValue};
	use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, HtmlCanvasElement, Url};

	/// Offer `contents` as a file download via a temporary object URL.
	pub fn download_text(filename: &str, mime: &str, contents: &str) {
		let parts = js_sys::Array::of1(&JsValue::from_str(contents));
		let options = BlobPropertyBag::new();
		options.set_type(mime);
		let Ok(blob) = Blob::new_with_str_sequence_and_options(&parts, &options) else {
			log::warn!("blob creation failed for {filename}");
			return;
		};
		let Ok(url) = Url::create_object_url_with_blob(&blob) else {
			log::warn!("object url creation failed for {filename}");
			return;
		};
		click_anchor(&url, filename);
		let _ = Url::revoke_object_url(&url);
	}

	/// Snapshot the canvas pixels and offer them as a PNG download.
	pub fn download_canvas_png(canvas: &HtmlCanvasElement, filename: &str) {
		match canvas.to_data_url_with_type("image/png") {
			Ok(url) => click_anchor(&url, filename),
			Err(error) => log::warn!("canvas png snapshot failed: {error:?}"),
		}
	}

	fn click_anchor(url: &str, filename: &str) {
		let Some(document) = web_sys::window().and_then(|w| w.document()) else {
			return;
		};
		let Ok(element) = document.create_element("a") else {
			return;
		};
		let Ok(anchor) = element.dyn_into::<HtmlAnchorElement>() else {
			return;
		};
		anchor.set_href(url);
		anchor.set_download(filename);
		anchor.click();
	}
}

#[cfg(target_arch = "wasm32")]
pub use download::{download_canvas_png, download_text};

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;
	use crate::components::relationship_graph::layout::testutil::asset;
	use crate::components::relationship_graph::types::{
		RelationshipDirection, RelationshipType,
	};

	#[test]
	fn csv_round_trip_fixture() {
		let relationships = vec![Relationship {
			id: "r1".into(),
			source_id: "a".into(),
			target_id: "b".into(),
			relationship_type: RelationshipType::Dependency,
			direction: RelationshipDirection::Bidirectional,
			strength: 0.5,
			confidence: 0.9,
			metadata: HashMap::new(),
		}];
		assert_eq!(
			relationships_csv(&relationships),
			"source_id,target_id,type,strength,confidence,direction\n\
			 a,b,dependency,0.5,0.9,bidirectional\n"
		);
	}

	#[test]
	fn csv_of_no_relationships_is_just_the_header() {
		assert_eq!(
			relationships_csv(&[]),
			"source_id,target_id,type,strength,confidence,direction\n"
		);
	}

	#[test]
	fn json_document_carries_all_four_collections() {
		let assets = vec![asset("a1")];
		let relationships = Vec::new();
		let clusters = Vec::new();
		let patterns = vec![Pattern {
			id: "p1".into(),
			name: "hub".into(),
			description: String::new(),
			pattern_type: "usage_hub".into(),
			asset_ids: vec!["a1".into()],
			confidence: 0.8,
		}];

		let json = graph_json(&assets, &relationships, &clusters, &patterns).unwrap();
		let value: serde_json::Value = serde_json::from_str(&json).unwrap();
		assert_eq!(value["assets"][0]["id"], "a1");
		assert_eq!(value["assets"][0]["type"], "table");
		assert!(value["relationships"].as_array().unwrap().is_empty());
		assert!(value["clusters"].as_array().unwrap().is_empty());
		assert_eq!(value["patterns"][0]["type"], "usage_hub");
	}
}
