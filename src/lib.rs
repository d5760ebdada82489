//! pratejra-graph: the Semantic Graph view of the Pratejra knowledge workspace.
//!
//! This crate provides a WASM-based knowledge graph that lays out documents
//! and their metadata tags with a force-directed simulation, plus the view
//! shell around it: freeze toggle, layer legend, search and a resizable
//! canvas.

use leptos::ev;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

pub mod components;
pub mod error;

pub use components::force_graph::{
	Document, GraphConfig, GraphData, GraphLink, GraphNode, KnowledgeGraphCanvas, Layer,
	NodeGroup, VisibilityFilter,
};
pub use error::LoadError;

/// Graph payload used as-is when present.
pub const GRAPH_DATA_ID: &str = "graph-data";
/// Document list the graph is derived from when no graph payload is given.
pub const GRAPH_DOCUMENTS_ID: &str = "graph-documents";
/// Optional configuration overrides.
pub const GRAPH_CONFIG_ID: &str = "graph-config";

/// Initial canvas height in CSS pixels.
pub const DEFAULT_GRAPH_HEIGHT: f64 = 500.0;
/// Bounds for the resize handle.
pub const MIN_GRAPH_HEIGHT: f64 = 300.0;
pub const MAX_GRAPH_HEIGHT: f64 = 800.0;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("pratejra-graph: logging initialized");
}

/// Parses a JSON payload read from the element with the given id.
pub fn parse_payload<T: DeserializeOwned>(id: &str, text: &str) -> Result<T, LoadError> {
	serde_json::from_str(text).map_err(|source| LoadError::Parse {
		id: id.to_string(),
		source,
	})
}

/// Reads and parses the JSON text of a `<script>` element.
fn load_json<T: DeserializeOwned>(id: &str) -> Result<T, LoadError> {
	let window = web_sys::window().ok_or(LoadError::NoWindow)?;
	let document = window.document().ok_or(LoadError::NoWindow)?;
	let element = document
		.get_element_by_id(id)
		.ok_or_else(|| LoadError::MissingElement(id.to_string()))?;
	let script: HtmlScriptElement = element
		.dyn_into()
		.map_err(|_| LoadError::NotAScript(id.to_string()))?;
	let text = script
		.text()
		.map_err(|_| LoadError::NotAScript(id.to_string()))?;
	parse_payload(id, &text)
}

fn report(err: &LoadError) {
	if !err.is_missing() {
		warn!("pratejra-graph: {}", err);
	}
}

/// Loads configuration overrides, falling back to defaults.
fn load_config() -> GraphConfig {
	load_json(GRAPH_CONFIG_ID).unwrap_or_else(|e| {
		report(&e);
		GraphConfig::default()
	})
}

/// Loads graph data from the page: an explicit graph payload if present,
/// otherwise a graph derived from the document list, otherwise empty.
fn load_graph_data(rng: &mut SmallRng) -> GraphData {
	match load_json::<GraphData>(GRAPH_DATA_ID) {
		Ok(data) => {
			info!(
				"pratejra-graph: loaded {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			return data;
		}
		Err(e) => report(&e),
	}

	match load_json::<Vec<Document>>(GRAPH_DOCUMENTS_ID) {
		Ok(documents) => {
			let data = GraphData::from_documents(&documents, rng);
			info!(
				"pratejra-graph: built graph from {} documents ({} nodes, {} links)",
				documents.len(),
				data.nodes.len(),
				data.links.len()
			);
			data
		}
		Err(e) => {
			report(&e);
			GraphData::default()
		}
	}
}

/// Applies a resize-handle drag to the graph height.
pub fn resize_height(current: f64, delta: f64) -> f64 {
	(current + delta).clamp(MIN_GRAPH_HEIGHT, MAX_GRAPH_HEIGHT)
}

/// Legend button toggling one visibility layer.
#[component]
fn LegendToggle(filters: RwSignal<VisibilityFilter>, layer: Layer, label: &'static str) -> impl IntoView {
	view! {
		<button
			class="legend-toggle"
			class:off=move || !filters.get().shows(layer)
			on:click=move |_| filters.update(|f| f.toggle(layer))
		>
			{label}
		</button>
	}
}

/// Main application component: the Semantic Graph view.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let seed = config
		.simulation
		.seed
		.unwrap_or_else(|| js_sys::Date::now() as u64);
	let graph_data = load_graph_data(&mut SmallRng::seed_from_u64(seed));
	let node_count = graph_data.nodes.len();
	let data = Signal::derive(move || graph_data.clone());

	let frozen = RwSignal::new(false);
	let filters = RwSignal::new(VisibilityFilter::default());
	let search = RwSignal::new(String::new());
	let height = RwSignal::new(DEFAULT_GRAPH_HEIGHT);
	let resizing = RwSignal::new(false);
	let hovered = RwSignal::new(None::<GraphNode>);
	let selected = RwSignal::new(None::<GraphNode>);

	let _ = window_event_listener(ev::mousemove, move |ev| {
		if resizing.get_untracked() {
			height.update(|h| *h = resize_height(*h, ev.movement_y() as f64));
		}
	});
	let _ = window_event_listener(ev::mouseup, move |_| resizing.set(false));

	let toggle_physics = move |_: ev::MouseEvent| {
		let was_frozen = frozen.get_untracked();
		frozen.set(!was_frozen);
		if was_frozen {
			selected.set(None);
		}
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Pratejra · Semantic Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="graph-view">
			<header class="graph-header">
				<div>
					<h2>"Semantic Graph"</h2>
					<p class="subtitle">"Force-Directed Layout & Clusters"</p>
				</div>
				<span class="badge">{format!("{node_count} Nodes")}</span>
			</header>

			<div class="graph-frame">
				<button class="physics-toggle" class:active=move || frozen.get() on:click=toggle_physics>
					{move || if frozen.get() { "Resume physics" } else { "Freeze physics" }}
				</button>

				<div class="graph-canvas-container" style=move || format!("height: {}px;", height.get())>
					<KnowledgeGraphCanvas
						data=data
						frozen=frozen
						filters=filters
						search=search
						height=height
						config=config
						on_hover={move |node: Option<GraphNode>| hovered.set(node)}
						on_node_click={move |node: Option<GraphNode>| selected.set(node)}
					/>
					{move || {
						hovered
							.get()
							.map(|node| {
								view! {
									<div class="graph-tooltip">
										<p class="tooltip-label">{node.label}</p>
										<p class="tooltip-group">{node.group.name()}</p>
									</div>
								}
							})
					}}
				</div>

				<div class="resize-handle" on:mousedown=move |_| resizing.set(true)></div>
			</div>

			<div class="graph-toolbar">
				<div class="graph-legend">
					<span class="legend-title">"Filters:"</span>
					<LegendToggle filters=filters layer=Layer::Documents label="Documents" />
					<LegendToggle filters=filters layer=Layer::Metadata label="Metadata" />
					<LegendToggle filters=filters layer=Layer::Links label="Relations" />
				</div>
				<input
					class="graph-search"
					placeholder="Hybrid Search..."
					prop:value=move || search.get()
					on:input=move |ev| search.set(event_target_value(&ev))
				/>
				<p class="graph-status">
					{move || {
						selected
							.get()
							.map(|node| format!("Selected: {}", node.label))
							.unwrap_or_else(|| "Interact with nodes to inspect connections".to_string())
					}}
				</p>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resize_height_is_clamped() {
		assert_eq!(resize_height(500.0, 40.0), 540.0);
		assert_eq!(resize_height(790.0, 40.0), MAX_GRAPH_HEIGHT);
		assert_eq!(resize_height(310.0, -50.0), MIN_GRAPH_HEIGHT);
	}

	#[test]
	fn parse_payload_reports_element() {
		let docs: Vec<Document> =
			parse_payload(GRAPH_DOCUMENTS_ID, r#"[{ "id": "d1", "title": "Notes", "size": "2MB" }]"#)
				.unwrap();
		assert_eq!(docs[0].title, "Notes");
		assert!(docs[0].metadata.is_empty());

		let err = parse_payload::<GraphData>(GRAPH_DATA_ID, "{ not json").unwrap_err();
		assert!(matches!(err, LoadError::Parse { ref id, .. } if id == GRAPH_DATA_ID));
	}
}
