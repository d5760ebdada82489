//! Derives graph data from the document library.
//!
//! Every document becomes a node, every distinct metadata value becomes a
//! shared node, and each `(key, value)` tag links its document to the value
//! node with the key as relation.

use std::collections::HashSet;

use rand::Rng;

use super::types::{Document, GraphData, GraphLink, GraphNode, NodeGroup};

/// Base radius of a document node. A random jitter of up to
/// [`DOCUMENT_RADIUS_JITTER`] is added so documents don't look uniform.
pub const DOCUMENT_RADIUS: f64 = 10.0;
pub const DOCUMENT_RADIUS_JITTER: f64 = 5.0;
/// Radius of a metadata node.
pub const METADATA_RADIUS: f64 = 6.0;

/// Id of the shared node for a metadata value.
pub fn metadata_node_id(value: &str) -> String {
	format!("meta-{value}")
}

impl GraphData {
	/// Builds the knowledge graph for a set of documents.
	pub fn from_documents<R: Rng>(documents: &[Document], rng: &mut R) -> Self {
		let mut nodes = Vec::new();
		let mut links = Vec::new();
		let mut metadata_ids = HashSet::new();

		for doc in documents {
			nodes.push(GraphNode {
				id: doc.id.clone(),
				label: doc.title.clone(),
				group: NodeGroup::Document,
				val: DOCUMENT_RADIUS + rng.gen_range(0.0..DOCUMENT_RADIUS_JITTER),
			});

			for (key, value) in &doc.metadata {
				let meta_id = metadata_node_id(value);
				if metadata_ids.insert(meta_id.clone()) {
					nodes.push(GraphNode {
						id: meta_id.clone(),
						label: value.clone(),
						group: NodeGroup::Metadata,
						val: METADATA_RADIUS,
					});
				}
				links.push(GraphLink {
					source: doc.id.clone(),
					target: meta_id,
					relation: key.clone(),
				});
			}
		}

		Self { nodes, links }
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn doc(id: &str, title: &str, tags: &[(&str, &str)]) -> Document {
		Document {
			id: id.into(),
			title: title.into(),
			metadata: tags
				.iter()
				.map(|(k, v)| (k.to_string(), v.to_string()))
				.collect(),
		}
	}

	#[test]
	fn no_documents_yields_empty_graph() {
		let mut rng = SmallRng::seed_from_u64(1);
		assert_eq!(GraphData::from_documents(&[], &mut rng), GraphData::default());
	}

	#[test]
	fn shared_metadata_values_become_one_node() {
		let mut rng = SmallRng::seed_from_u64(7);
		let docs = [
			doc("d1", "Attention Is All You Need", &[("topic", "AI"), ("year", "2017")]),
			doc("d2", "Scaling Laws", &[("topic", "AI")]),
		];

		let data = GraphData::from_documents(&docs, &mut rng);

		let ids: Vec<&str> = data.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["d1", "meta-AI", "meta-2017", "d2"]);
		assert_eq!(data.links.len(), 3);
		assert!(
			data.links
				.iter()
				.any(|l| l.source == "d2" && l.target == "meta-AI" && l.relation == "topic")
		);
	}

	#[test]
	fn metadata_nodes_follow_payload_order() {
		let mut rng = SmallRng::seed_from_u64(3);
		let docs: Vec<Document> = serde_json::from_str(
			r#"[{ "id": "d1", "title": "Notes", "metadata": { "year": "2017", "author": "Vaswani", "topic": "AI" } }]"#,
		)
		.unwrap();

		let data = GraphData::from_documents(&docs, &mut rng);

		let ids: Vec<&str> = data.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["d1", "meta-2017", "meta-Vaswani", "meta-AI"]);
		let relations: Vec<&str> = data.links.iter().map(|l| l.relation.as_str()).collect();
		assert_eq!(relations, ["year", "author", "topic"]);
	}

	#[test]
	fn node_radii_follow_group() {
		let mut rng = SmallRng::seed_from_u64(42);
		let docs = [doc("d1", "Notes", &[("type", "md")])];

		let data = GraphData::from_documents(&docs, &mut rng);

		let document = &data.nodes[0];
		assert_eq!(document.group, NodeGroup::Document);
		assert!(document.val >= DOCUMENT_RADIUS);
		assert!(document.val < DOCUMENT_RADIUS + DOCUMENT_RADIUS_JITTER);

		let meta = &data.nodes[1];
		assert_eq!(meta.group, NodeGroup::Metadata);
		assert_eq!(meta.label, "md");
		assert_eq!(meta.val, METADATA_RADIUS);
	}
}
