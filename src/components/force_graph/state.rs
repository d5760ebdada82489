//! Graph view state and pointer interaction.
//!
//! Wraps the layout [`Simulation`] with everything the view layers on top of
//! it: which layers are visible, the active search query, and the hovered
//! node. Visibility only affects drawing and hit-testing; hidden nodes keep
//! being simulated so they reappear where the layout has moved them.

use serde::Deserialize;

use super::config::{GraphConfig, HitPolicy, InteractionConfig};
use super::simulation::{SimNode, Simulation};
use super::types::{GraphData, NodeGroup};

/// A toggleable visibility layer: one per node group, plus the links.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum Layer {
	Documents,
	Metadata,
	Other,
	Links,
}

impl From<NodeGroup> for Layer {
	fn from(group: NodeGroup) -> Self {
		match group {
			NodeGroup::Document => Layer::Documents,
			NodeGroup::Metadata => Layer::Metadata,
			NodeGroup::Other => Layer::Other,
		}
	}
}

/// Which layers are drawn and hit-testable. Everything is visible by default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityFilter {
	documents: bool,
	metadata: bool,
	other: bool,
	links: bool,
}

impl Default for VisibilityFilter {
	fn default() -> Self {
		Self {
			documents: true,
			metadata: true,
			other: true,
			links: true,
		}
	}
}

impl VisibilityFilter {
	fn slot(&mut self, layer: Layer) -> &mut bool {
		match layer {
			Layer::Documents => &mut self.documents,
			Layer::Metadata => &mut self.metadata,
			Layer::Other => &mut self.other,
			Layer::Links => &mut self.links,
		}
	}

	pub fn shows(&self, layer: Layer) -> bool {
		match layer {
			Layer::Documents => self.documents,
			Layer::Metadata => self.metadata,
			Layer::Other => self.other,
			Layer::Links => self.links,
		}
	}

	pub fn shows_group(&self, group: NodeGroup) -> bool {
		self.shows(group.into())
	}

	pub fn set(&mut self, layer: Layer, visible: bool) {
		*self.slot(layer) = visible;
	}

	pub fn toggle(&mut self, layer: Layer) {
		let slot = self.slot(layer);
		*slot = !*slot;
	}

	/// Builder-style variant of [`VisibilityFilter::set`].
	pub fn with(mut self, layer: Layer, visible: bool) -> Self {
		self.set(layer, visible);
		self
	}
}

/// A case-insensitive substring query over node labels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchQuery {
	needle: String,
}

impl SearchQuery {
	/// Builds a query. Text shorter than `min_len` chars yields an inactive query.
	pub fn new(text: &str, min_len: usize) -> Self {
		let needle = if text.chars().count() >= min_len.max(1) {
			text.to_lowercase()
		} else {
			String::new()
		};
		Self { needle }
	}

	/// Whether any highlighting/dimming should happen.
	pub fn is_active(&self) -> bool {
		!self.needle.is_empty()
	}

	pub fn matches(&self, label: &str) -> bool {
		self.is_active() && label.to_lowercase().contains(&self.needle)
	}
}

/// Core view state: the layout simulation plus filter, search and hover.
///
/// Created once when the component mounts. The animation loop calls
/// [`ForceGraphState::tick`] every frame; pointer handlers call
/// [`ForceGraphState::node_at`] and [`ForceGraphState::set_hover`] between
/// frames.
pub struct ForceGraphState {
	pub simulation: Simulation,
	filters: VisibilityFilter,
	search: SearchQuery,
	hovered: Option<String>,
	interaction: InteractionConfig,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64, config: &GraphConfig, seed: u64) -> Self {
		let mut simulation = Simulation::new(config.simulation.clone(), width, height, seed);
		simulation.set_data(data);
		Self {
			simulation,
			filters: VisibilityFilter::default(),
			search: SearchQuery::default(),
			hovered: None,
			interaction: config.interaction.clone(),
		}
	}

	pub fn set_data(&mut self, data: &GraphData) {
		self.simulation.set_data(data);
		let hover_gone = self
			.hovered
			.as_deref()
			.is_some_and(|id| self.simulation.node(id).is_none());
		if hover_gone {
			self.hovered = None;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.simulation.resize(width, height);
	}

	pub fn set_frozen(&mut self, frozen: bool) {
		self.simulation.set_frozen(frozen);
	}

	/// Applies new layer filters. Returns `true` if the hovered node was
	/// hidden by them and the hover was cleared.
	pub fn set_filters(&mut self, filters: VisibilityFilter) -> bool {
		self.filters = filters;
		let hover_hidden = self.hovered().is_some_and(|node| !self.is_visible(node));
		if hover_hidden {
			self.hovered = None;
		}
		hover_hidden
	}

	pub fn filters(&self) -> &VisibilityFilter {
		&self.filters
	}

	pub fn set_search(&mut self, text: &str) {
		self.search = SearchQuery::new(text, self.interaction.min_search_len);
	}

	pub fn search(&self) -> &SearchQuery {
		&self.search
	}

	/// Advances the layout one step unless frozen.
	pub fn tick(&mut self) -> bool {
		self.simulation.tick()
	}

	/// Whether a node is drawn and hit-testable under the current filters.
	pub fn is_visible(&self, node: &SimNode) -> bool {
		self.filters.shows_group(node.group)
	}

	/// Finds the visible node under a canvas-space point.
	///
	/// A node is hit when the point lies strictly within `val + hit_tolerance`
	/// of its center. With [`HitPolicy::FirstMatch`] the first such node in
	/// store order wins even if another candidate is closer.
	pub fn node_at(&self, x: f64, y: f64) -> Option<&SimNode> {
		let tolerance = self.interaction.hit_tolerance;
		let mut candidates = self
			.simulation
			.nodes()
			.iter()
			.filter(|node| self.is_visible(node))
			.map(|node| (node, node.distance_to(x, y)))
			.filter(|(node, dist)| *dist < node.val + tolerance);

		match self.interaction.hit_policy {
			HitPolicy::FirstMatch => candidates.next().map(|(node, _)| node),
			HitPolicy::Nearest => candidates
				.min_by(|(_, a), (_, b)| a.total_cmp(b))
				.map(|(node, _)| node),
		}
	}

	/// Sets the hovered node by id. Returns `true` if the hover changed.
	pub fn set_hover(&mut self, id: Option<&str>) -> bool {
		if self.hovered.as_deref() == id {
			return false;
		}
		self.hovered = id.map(str::to_owned);
		true
	}

	pub fn hovered(&self) -> Option<&SimNode> {
		self.hovered.as_deref().and_then(|id| self.simulation.node(id))
	}

	pub fn is_hovered(&self, id: &str) -> bool {
		self.hovered.as_deref() == Some(id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::GraphNode;

	fn node(id: &str, label: &str, group: NodeGroup, val: f64) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: label.into(),
			group,
			val,
		}
	}

	/// State with nodes pinned at fixed positions.
	fn state_with(nodes: &[(GraphNode, f64, f64)], config: GraphConfig) -> ForceGraphState {
		let data = GraphData {
			nodes: nodes.iter().map(|(n, _, _)| n.clone()).collect(),
			links: vec![],
		};
		let mut state = ForceGraphState::new(&data, 800.0, 500.0, &config, 3);
		for (sim, (_, x, y)) in state.simulation.nodes_mut().iter_mut().zip(nodes) {
			sim.x = *x;
			sim.y = *y;
		}
		state
	}

	#[test]
	fn hit_test_within_radius_plus_tolerance() {
		let state = state_with(
			&[(node("a", "A", NodeGroup::Document, 10.0), 100.0, 100.0)],
			GraphConfig::default(),
		);

		assert_eq!(state.node_at(105.0, 105.0).map(|n| n.id.as_str()), Some("a"));
		assert_eq!(state.node_at(119.9, 100.0).map(|n| n.id.as_str()), Some("a"));
		assert!(state.node_at(120.0, 100.0).is_none());
		assert!(state.node_at(200.0, 200.0).is_none());
	}

	#[test]
	fn first_match_wins_over_nearest_by_default() {
		let nodes = [
			(node("far", "Far", NodeGroup::Document, 10.0), 100.0, 100.0),
			(node("near", "Near", NodeGroup::Document, 10.0), 110.0, 100.0),
		];
		let state = state_with(&nodes, GraphConfig::default());
		assert_eq!(state.node_at(109.0, 100.0).map(|n| n.id.as_str()), Some("far"));

		let mut config = GraphConfig::default();
		config.interaction.hit_policy = HitPolicy::Nearest;
		let state = state_with(&nodes, config);
		assert_eq!(state.node_at(109.0, 100.0).map(|n| n.id.as_str()), Some("near"));
	}

	#[test]
	fn hidden_group_is_not_hit_but_keeps_moving() {
		let mut state = state_with(
			&[
				(node("m", "Tag", NodeGroup::Metadata, 6.0), 300.0, 200.0),
				(node("d", "Doc", NodeGroup::Document, 12.0), 500.0, 300.0),
			],
			GraphConfig::default(),
		);
		state.set_filters(VisibilityFilter::default().with(Layer::Metadata, false));

		assert!(state.node_at(300.0, 200.0).is_none());
		assert_eq!(state.node_at(500.0, 300.0).map(|n| n.id.as_str()), Some("d"));

		let before = state.simulation.node("m").cloned().unwrap();
		state.tick();
		let after = state.simulation.node("m").unwrap();
		assert!((before.x, before.y) != (after.x, after.y));
	}

	#[test]
	fn filter_toggle_round_trips() {
		let mut filters = VisibilityFilter::default();
		filters.toggle(Layer::Links);
		assert!(!filters.shows(Layer::Links));
		assert!(filters.shows_group(NodeGroup::Document));
		filters.toggle(Layer::Links);
		assert_eq!(filters, VisibilityFilter::default());
	}

	#[test]
	fn search_is_case_insensitive_substring() {
		let query = SearchQuery::new("trans", 1);
		assert!(query.is_active());
		assert!(query.matches("Transformer"));
		assert!(query.matches("Vision TRANSformers"));
		assert!(!query.matches("Database"));

		let cleared = SearchQuery::new("", 1);
		assert!(!cleared.is_active());
		assert!(!cleared.matches("Transformer"));
	}

	#[test]
	fn short_queries_respect_min_length() {
		assert!(SearchQuery::new("t", 1).is_active());
		assert!(!SearchQuery::new("t", 2).is_active());
		assert!(SearchQuery::new("tr", 2).is_active());
		assert!(!SearchQuery::new("", 0).is_active());
	}

	#[test]
	fn hover_reports_changes_only() {
		let mut state = state_with(
			&[(node("a", "A", NodeGroup::Document, 10.0), 100.0, 100.0)],
			GraphConfig::default(),
		);
		assert!(state.set_hover(Some("a")));
		assert!(!state.set_hover(Some("a")));
		assert!(state.is_hovered("a"));
		assert_eq!(state.hovered().map(|n| n.label.as_str()), Some("A"));
		assert!(state.set_hover(None));
		assert!(!state.set_hover(None));
	}

	#[test]
	fn hover_cleared_when_node_removed() {
		let mut state = state_with(
			&[(node("a", "A", NodeGroup::Document, 10.0), 100.0, 100.0)],
			GraphConfig::default(),
		);
		state.set_hover(Some("a"));
		state.set_data(&GraphData::default());
		assert!(state.hovered().is_none());
		assert!(!state.is_hovered("a"));
	}

	#[test]
	fn hiding_hovered_layer_clears_hover() {
		let mut state = state_with(
			&[
				(node("m", "Tag", NodeGroup::Metadata, 6.0), 300.0, 200.0),
				(node("d", "Doc", NodeGroup::Document, 12.0), 500.0, 300.0),
			],
			GraphConfig::default(),
		);
		state.set_hover(Some("m"));

		assert!(!state.set_filters(VisibilityFilter::default().with(Layer::Links, false)));
		assert!(state.is_hovered("m"));

		assert!(state.set_filters(VisibilityFilter::default().with(Layer::Metadata, false)));
		assert!(state.hovered().is_none());

		state.set_hover(Some("d"));
		assert!(!state.set_filters(VisibilityFilter::default().with(Layer::Metadata, false)));
		assert!(state.is_hovered("d"));
	}
}
