//! Leptos component wrapping the knowledge graph canvas.
//!
//! The component creates an HTML canvas element sized to its parent's width
//! and the requested height, and wires up mouse handlers for hover and click.
//! An [`AnimationLoop`] advances the layout (unless frozen) and repaints every
//! frame; it is stopped when the component is unmounted.
//!
//! Reactive inputs are pushed into the graph state by effects. The
//! simulation itself never touches reactive state; the host only hears about
//! hover changes and clicks.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::animation::AnimationLoop;
use super::config::GraphConfig;
use super::frame::build_frame;
use super::render;
use super::state::{ForceGraphState, VisibilityFilter};
use super::theme::Theme;
use super::types::{GraphData, GraphNode};

/// Width used until the canvas has a laid-out parent.
const FALLBACK_WIDTH: f64 = 800.0;

/// Bundles graph state with its visual configuration.
struct GraphContext {
	state: ForceGraphState,
	theme: Theme,
}

type SharedContext = Rc<RefCell<Option<GraphContext>>>;

/// Renders an interactive force-directed knowledge graph on a canvas element.
///
/// The canvas follows its parent container's width; `height` is controlled
/// by the host. `on_hover` fires when the hovered node changes, `on_node_click`
/// on every press (with `None` for empty space).
#[component]
pub fn KnowledgeGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into)] frozen: Signal<bool>,
	#[prop(into)] filters: Signal<VisibilityFilter>,
	#[prop(into)] search: Signal<String>,
	#[prop(into)] height: Signal<f64>,
	#[prop(optional)] config: GraphConfig,
	#[prop(optional, into)] on_hover: Option<Callback<Option<GraphNode>>>,
	#[prop(optional, into)] on_node_click: Option<Callback<Option<GraphNode>>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let frame_loop = StoredValue::new_local(None::<AnimationLoop>);

	let context_init = context.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(ctx) = canvas_context(&canvas) else {
			warn!("pratejra-graph: canvas has no 2d context");
			return;
		};

		let (w, h) = (container_width(&canvas), height.get_untracked());
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let seed = config
			.simulation
			.seed
			.unwrap_or_else(|| js_sys::Date::now() as u64);
		let mut state = ForceGraphState::new(&data.get_untracked(), w, h, &config, seed);
		state.set_frozen(frozen.get_untracked());
		state.set_filters(filters.get_untracked());
		state.set_search(&search.get_untracked());
		info!(
			"pratejra-graph: canvas mounted at {}x{} with {} nodes",
			w,
			h,
			state.simulation.nodes().len()
		);

		*context_init.borrow_mut() = Some(GraphContext {
			state,
			theme: Theme::default(),
		});

		let context_anim = context_init.clone();
		frame_loop.set_value(Some(AnimationLoop::start(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let (w, h) = (container_width(&canvas), height.get_untracked());
				if canvas.width() != w as u32 || canvas.height() != h as u32 {
					canvas.set_width(w as u32);
					canvas.set_height(h as u32);
				}
				c.state.resize(w, h);
				c.state.tick();
				render::render(&build_frame(&c.state, &c.theme), &ctx, &c.theme);
			}
		})));
	});

	on_cleanup(move || {
		frame_loop.try_update_value(|handle| {
			if let Some(handle) = handle.take() {
				handle.stop();
			}
		});
	});

	let context_data = context.clone();
	Effect::new(move |_| {
		let data = data.get();
		if let Some(ref mut c) = *context_data.borrow_mut() {
			c.state.set_data(&data);
		}
	});

	let context_frozen = context.clone();
	Effect::new(move |_| {
		let frozen = frozen.get();
		if let Some(ref mut c) = *context_frozen.borrow_mut() {
			c.state.set_frozen(frozen);
		}
	});

	let context_filters = context.clone();
	Effect::new(move |_| {
		let filters = filters.get();
		let hover_hidden = context_filters
			.borrow_mut()
			.as_mut()
			.is_some_and(|c| c.state.set_filters(filters));
		if let (true, Some(cb)) = (hover_hidden, on_hover) {
			cb.run(None);
		}
	});

	let context_search = context.clone();
	Effect::new(move |_| {
		let text = search.get();
		if let Some(ref mut c) = *context_search.borrow_mut() {
			c.state.set_search(&text);
		}
	});

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		// Release the borrow before notifying the host.
		let changed = {
			let mut guard = context_mm.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};
			let hit = c.state.node_at(x, y).map(|node| node.id.clone());
			c.state
				.set_hover(hit.as_deref())
				.then(|| c.state.hovered().map(|node| node.to_graph_node()))
		};
		if let (Some(node), Some(cb)) = (changed, on_hover) {
			cb.run(node);
		}
	};

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let clicked = context_md
			.borrow()
			.as_ref()
			.and_then(|c| c.state.node_at(x, y).map(|node| node.to_graph_node()));
		if let Some(cb) = on_node_click {
			cb.run(clicked);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let changed = context_ml
			.borrow_mut()
			.as_mut()
			.is_some_and(|c| c.state.set_hover(None));
		if let (true, Some(cb)) = (changed, on_hover) {
			cb.run(None);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="knowledge-graph-canvas"
			on:mousemove=on_mousemove
			on:mousedown=on_mousedown
			on:mouseleave=on_mouseleave
			style="display: block; cursor: crosshair;"
		/>
	}
}

fn canvas_context(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn container_width(canvas: &HtmlCanvasElement) -> f64 {
	canvas
		.parent_element()
		.map(|p| p.client_width() as f64)
		.filter(|w| *w > 0.0)
		.unwrap_or(FALLBACK_WIDTH)
}

/// Pointer position relative to the canvas' top-left corner.
fn pointer_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}
