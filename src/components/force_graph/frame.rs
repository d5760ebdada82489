//! Per-frame display list.
//!
//! [`build_frame`] resolves everything that decides *what* is drawn (layer
//! visibility, search dimming, hover/match emphasis, label placement) into
//! plain data. The canvas painter in `render` then only issues draw calls.

use super::state::{ForceGraphState, Layer};
use super::theme::{Color, Theme};

/// A straight link between two visible node centers.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkSegment {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

/// A soft circle drawn behind an emphasized node.
#[derive(Clone, Debug, PartialEq)]
pub struct Halo {
	pub radius: f64,
	pub color: Color,
}

/// A node label centered horizontally on `x`, with `y` as the text baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelSprite {
	pub text: String,
	pub x: f64,
	pub y: f64,
	pub font: String,
	/// Whether to draw the translucent plate behind the text.
	pub plate: bool,
	/// Top edge of the plate.
	pub plate_top: f64,
}

/// Everything needed to draw one node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSprite {
	pub id: String,
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub alpha: f64,
	pub halo: Option<Halo>,
	pub fill: Color,
	pub outline: Color,
	pub outline_width: f64,
	pub label: Option<LabelSprite>,
}

/// The display list for one animation frame, in paint order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
	pub width: f64,
	pub height: f64,
	pub links: Vec<LinkSegment>,
	pub nodes: Vec<NodeSprite>,
}

#[cfg(test)]
impl Frame {
	fn node(&self, id: &str) -> Option<&NodeSprite> {
		self.nodes.iter().find(|n| n.id == id)
	}
}

/// Builds the display list for the current state.
pub fn build_frame(state: &ForceGraphState, theme: &Theme) -> Frame {
	let sim = &state.simulation;
	let filters = state.filters();
	let nodes = sim.nodes();

	let links = if filters.shows(Layer::Links) {
		sim.links()
			.iter()
			.map(|link| (&nodes[link.source], &nodes[link.target]))
			.filter(|(a, b)| state.is_visible(a) && state.is_visible(b))
			.map(|(a, b)| LinkSegment {
				x1: a.x,
				y1: a.y,
				x2: b.x,
				y2: b.y,
			})
			.collect()
	} else {
		Vec::new()
	};

	let search = state.search();
	let highlight = &theme.highlight;
	let label_style = &theme.label;

	let sprites = nodes
		.iter()
		.filter(|node| state.is_visible(node))
		.map(|node| {
			let hovered = state.is_hovered(&node.id);
			let matched = search.matches(&node.label);
			let emphasized = hovered || matched;
			let style = theme.group_style(node.group);

			let alpha = if search.is_active() && !matched {
				highlight.dimmed_alpha
			} else {
				1.0
			};
			let halo = emphasized.then(|| Halo {
				radius: node.val + highlight.halo_padding,
				color: if matched {
					highlight.match_halo
				} else {
					highlight.hover_halo
				},
			});
			let (outline, outline_width) = if matched {
				(highlight.match_outline, highlight.match_outline_width)
			} else {
				(style.outline, style.outline_width)
			};
			let label = (node.val > label_style.min_radius || emphasized).then(|| LabelSprite {
				text: node.label.clone(),
				x: node.x,
				y: node.y + node.val + label_style.offset,
				font: label_style.font(emphasized),
				plate: emphasized,
				plate_top: node.y + node.val + label_style.plate_offset,
			});

			NodeSprite {
				id: node.id.clone(),
				x: node.x,
				y: node.y,
				radius: node.val,
				alpha,
				halo,
				fill: style.fill,
				outline,
				outline_width,
				label,
			}
		})
		.collect();

	Frame {
		width: sim.width(),
		height: sim.height(),
		links,
		nodes: sprites,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::config::GraphConfig;
	use crate::components::force_graph::state::VisibilityFilter;
	use crate::components::force_graph::types::{GraphData, GraphLink, GraphNode, NodeGroup};

	fn node(id: &str, label: &str, group: NodeGroup, val: f64) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: label.into(),
			group,
			val,
		}
	}

	fn link(source: &str, target: &str) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
			relation: "topic".into(),
		}
	}

	fn sample_state() -> ForceGraphState {
		let data = GraphData {
			nodes: vec![
				node("t", "Transformer", NodeGroup::Document, 12.0),
				node("db", "Database", NodeGroup::Document, 11.0),
				node("meta-ai", "AI", NodeGroup::Metadata, 6.0),
			],
			links: vec![link("t", "meta-ai"), link("db", "meta-ai"), link("t", "missing")],
		};
		ForceGraphState::new(&data, 800.0, 500.0, &GraphConfig::default(), 11)
	}

	#[test]
	fn dangling_links_are_not_drawn() {
		let frame = build_frame(&sample_state(), &Theme::default());
		assert_eq!(frame.links.len(), 2);
		assert_eq!(frame.nodes.len(), 3);
	}

	#[test]
	fn search_dims_non_matches_and_outlines_matches() {
		let theme = Theme::default();
		let mut state = sample_state();
		state.set_search("trans");

		let frame = build_frame(&state, &theme);
		let t = frame.node("t").unwrap();
		assert_eq!(t.alpha, 1.0);
		assert_eq!(t.outline, theme.highlight.match_outline);
		assert_eq!(t.outline_width, 3.0);
		assert_eq!(t.halo.as_ref().map(|h| h.color), Some(theme.highlight.match_halo));
		assert!(t.label.as_ref().is_some_and(|l| l.plate));

		let db = frame.node("db").unwrap();
		assert_eq!(db.alpha, 0.2);
		assert_eq!(db.outline_width, 2.0);
		assert!(db.halo.is_none());

		state.set_search("");
		let frame = build_frame(&state, &theme);
		assert!(frame.nodes.iter().all(|n| n.alpha == 1.0 && n.halo.is_none()));
	}

	#[test]
	fn hidden_group_drops_nodes_and_their_links() {
		let mut state = sample_state();
		state.set_filters(VisibilityFilter::default().with(Layer::Metadata, false));

		let frame = build_frame(&state, &Theme::default());
		assert!(frame.node("meta-ai").is_none());
		assert_eq!(frame.nodes.len(), 2);
		assert!(frame.links.is_empty());
	}

	#[test]
	fn link_layer_toggle_keeps_nodes() {
		let mut state = sample_state();
		state.set_filters(VisibilityFilter::default().with(Layer::Links, false));

		let frame = build_frame(&state, &Theme::default());
		assert!(frame.links.is_empty());
		assert_eq!(frame.nodes.len(), 3);
	}

	#[test]
	fn hover_adds_halo_and_label() {
		let theme = Theme::default();
		let mut state = sample_state();

		let frame = build_frame(&state, &theme);
		assert!(frame.node("meta-ai").unwrap().label.is_none());
		assert!(frame.node("t").unwrap().label.as_ref().is_some_and(|l| !l.plate));

		state.set_hover(Some("meta-ai"));
		let frame = build_frame(&state, &theme);
		let meta = frame.node("meta-ai").unwrap();
		assert_eq!(meta.halo.as_ref().map(|h| h.color), Some(theme.highlight.hover_halo));
		assert_eq!(meta.halo.as_ref().map(|h| h.radius), Some(12.0));
		let label = meta.label.as_ref().unwrap();
		assert_eq!(label.font, "bold 12px Inter");
		assert_eq!(label.y, meta.y + 6.0 + 15.0);
		assert_eq!(meta.fill, theme.metadata.fill);
	}
}
