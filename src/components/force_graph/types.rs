//! Graph data structures for input to the knowledge graph component.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;

/// Category of a node. Drives styling and visibility filtering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum NodeGroup {
	/// An uploaded document.
	Document,
	/// A metadata value shared between documents.
	Metadata,
	/// Any group name the view has no dedicated style for.
	#[default]
	#[serde(other)]
	Other,
}

impl NodeGroup {
	/// Display name, as shown in tooltips.
	pub fn name(self) -> &'static str {
		match self {
			NodeGroup::Document => "Document",
			NodeGroup::Metadata => "Metadata",
			NodeGroup::Other => "Other",
		}
	}
}

/// A node in the graph.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links.
	pub id: String,
	/// Display label, also matched against the search query.
	pub label: String,
	/// Node category.
	#[serde(default)]
	pub group: NodeGroup,
	/// Radius in canvas units. Also the basis for hit-testing.
	pub val: f64,
}

/// A relation between two nodes, referenced by id.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Relation name (the metadata key for document links).
	#[serde(default)]
	pub relation: String,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Returns the nodes with duplicate ids removed. The first occurrence wins.
	pub fn unique_nodes(&self) -> Vec<&GraphNode> {
		let mut seen = HashSet::with_capacity(self.nodes.len());
		self.nodes
			.iter()
			.filter(|node| {
				let fresh = seen.insert(node.id.as_str());
				if !fresh {
					warn!("pratejra-graph: dropping duplicate node id {:?}", node.id);
				}
				fresh
			})
			.collect()
	}
}

/// An uploaded document, as far as the graph is concerned.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Document {
	pub id: String,
	pub title: String,
	/// Tag key to tag value, e.g. `"topic" -> "AI"`, in payload order.
	#[serde(default)]
	pub metadata: IndexMap<String, String>,
}
