//! Force-directed layout solver.
//!
//! Owns the kinematic state (position and velocity) of every node, keyed by
//! node id, and advances it one tick at a time:
//!
//! 1. pairwise repulsion `k² / d` between all nodes,
//! 2. spring attraction `d² / k` along every resolved link,
//! 3. gravity towards the canvas center,
//! 4. damping, speed clamping and integration,
//! 5. inelastic collision with the canvas border.
//!
//! `k` is the ideal edge length derived from the canvas area and node count.
//! Repulsion is O(n²), which is fine for the tens of nodes a personal
//! knowledge base produces.

use std::collections::HashMap;

use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::SimulationConfig;
use super::types::{GraphData, GraphNode, NodeGroup};

/// Radius used for nodes whose `val` is missing, zero, negative or not finite.
pub const FALLBACK_RADIUS: f64 = 1.0;

/// A node together with its solver-owned kinematic state.
#[derive(Clone, Debug, PartialEq)]
pub struct SimNode {
	pub id: String,
	pub label: String,
	pub group: NodeGroup,
	/// Drawn radius, always > 0.
	pub val: f64,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
}

impl SimNode {
	pub fn speed(&self) -> f64 {
		self.vx.hypot(self.vy)
	}

	/// Euclidean distance from the node center to a point.
	pub fn distance_to(&self, x: f64, y: f64) -> f64 {
		(self.x - x).hypot(self.y - y)
	}

	/// The input form of this node, as handed to hover/click callbacks.
	pub fn to_graph_node(&self) -> GraphNode {
		GraphNode {
			id: self.id.clone(),
			label: self.label.clone(),
			group: self.group,
			val: self.val,
		}
	}
}

/// A link whose endpoints both resolved, stored as indices into the node store.
#[derive(Clone, Debug, PartialEq)]
pub struct SimLink {
	pub source: usize,
	pub target: usize,
	pub relation: String,
}

/// The layout solver and its node store.
pub struct Simulation {
	nodes: Vec<SimNode>,
	index: HashMap<String, usize>,
	links: Vec<SimLink>,
	config: SimulationConfig,
	rng: SmallRng,
	width: f64,
	height: f64,
	frozen: bool,
}

impl Simulation {
	/// Creates an empty simulation. `seed` drives initial node placement.
	pub fn new(config: SimulationConfig, width: f64, height: f64, seed: u64) -> Self {
		Self {
			nodes: Vec::new(),
			index: HashMap::new(),
			links: Vec::new(),
			config,
			rng: SmallRng::seed_from_u64(seed),
			width: sanitize_extent(width),
			height: sanitize_extent(height),
			frozen: false,
		}
	}

	/// Replaces the graph. Nodes whose id is already known keep their position
	/// and velocity; new ids are placed randomly and start at rest. Links with
	/// an unknown endpoint are dropped.
	pub fn set_data(&mut self, data: &GraphData) {
		let mut previous: HashMap<String, SimNode> = self
			.nodes
			.drain(..)
			.map(|node| (node.id.clone(), node))
			.collect();
		let unique = data.unique_nodes();
		let mut nodes = Vec::with_capacity(unique.len());
		let mut seeded = 0;

		for input in unique {
			let val = sanitize_radius(input);
			let node = match previous.remove(&input.id) {
				Some(mut existing) => {
					existing.label.clone_from(&input.label);
					existing.group = input.group;
					existing.val = val;
					existing
				}
				None => {
					seeded += 1;
					let (x, y) = self.seed_position();
					SimNode {
						id: input.id.clone(),
						label: input.label.clone(),
						group: input.group,
						val,
						x,
						y,
						vx: 0.0,
						vy: 0.0,
					}
				}
			};
			nodes.push(node);
		}

		let index: HashMap<String, usize> = nodes
			.iter()
			.enumerate()
			.map(|(i, node)| (node.id.clone(), i))
			.collect();
		let links: Vec<SimLink> = data
			.links
			.iter()
			.filter_map(|link| {
				let source = *index.get(&link.source)?;
				let target = *index.get(&link.target)?;
				Some(SimLink {
					source,
					target,
					relation: link.relation.clone(),
				})
			})
			.collect();

		debug!(
			"pratejra-graph: synced {} nodes ({} new, {} removed), {} of {} links resolved",
			nodes.len(),
			seeded,
			previous.len(),
			links.len(),
			data.links.len()
		);

		self.nodes = nodes;
		self.index = index;
		self.links = links;
	}

	/// Updates the canvas bounds. Nodes are not moved; any that now lie
	/// outside are brought back by the border collision on the next tick.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = sanitize_extent(width);
		self.height = sanitize_extent(height);
	}

	/// Suspends or resumes integration. Velocities are kept as they are.
	pub fn set_frozen(&mut self, frozen: bool) {
		self.frozen = frozen;
	}

	pub fn is_frozen(&self) -> bool {
		self.frozen
	}

	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	pub fn links(&self) -> &[SimLink] {
		&self.links
	}

	pub fn node(&self, id: &str) -> Option<&SimNode> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	/// Ideal edge length `k` for the current bounds and node count.
	pub fn ideal_distance(&self) -> f64 {
		let area = self.width * self.height;
		(area / (self.nodes.len() + 1) as f64).sqrt() * self.config.ideal_distance_factor
	}

	/// Advances the layout by one step. Returns `false` (and does nothing)
	/// while frozen.
	pub fn tick(&mut self) -> bool {
		if self.frozen {
			return false;
		}
		let k = self.ideal_distance();
		self.apply_repulsion(k);
		self.apply_attraction(k);
		self.apply_gravity();
		self.integrate();
		true
	}

	fn apply_repulsion(&mut self, k: f64) {
		let strength = self.config.repulsion;
		for j in 1..self.nodes.len() {
			let (head, tail) = self.nodes.split_at_mut(j);
			let b = &mut tail[0];
			for a in head.iter_mut() {
				let (dx, dy) = (a.x - b.x, a.y - b.y);
				let dist = dx.hypot(dy);
				// Co-located nodes have no direction to push apart in.
				if dist == 0.0 {
					continue;
				}
				let force = k * k / dist * strength;
				let (fx, fy) = (dx / dist * force, dy / dist * force);
				a.vx += fx;
				a.vy += fy;
				b.vx -= fx;
				b.vy -= fy;
			}
		}
	}

	fn apply_attraction(&mut self, k: f64) {
		if !(k > 0.0) {
			return;
		}
		let strength = self.config.attraction;
		for link in &self.links {
			if link.source == link.target {
				continue;
			}
			let (source, target) = pair_mut(&mut self.nodes, link.source, link.target);
			let (dx, dy) = (source.x - target.x, source.y - target.y);
			let dist = dx.hypot(dy);
			if dist == 0.0 {
				continue;
			}
			let force = dist * dist / k * strength;
			let (fx, fy) = (dx / dist * force, dy / dist * force);
			source.vx -= fx;
			source.vy -= fy;
			target.vx += fx;
			target.vy += fy;
		}
	}

	fn apply_gravity(&mut self) {
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		let gravity = self.config.gravity;
		for node in &mut self.nodes {
			node.vx -= (node.x - cx) * gravity;
			node.vy -= (node.y - cy) * gravity;
		}
	}

	fn integrate(&mut self) {
		let SimulationConfig {
			damping,
			max_speed,
			boundary_margin,
			restitution,
			..
		} = self.config;

		for node in &mut self.nodes {
			node.vx *= damping;
			node.vy *= damping;
			if !(node.vx.is_finite() && node.vy.is_finite()) {
				node.vx = 0.0;
				node.vy = 0.0;
			}

			let speed = node.speed();
			if speed > max_speed {
				node.vx = node.vx / speed * max_speed;
				node.vy = node.vy / speed * max_speed;
			}

			node.x += node.vx;
			node.y += node.vy;

			collide(&mut node.x, &mut node.vx, self.width, boundary_margin, restitution);
			collide(&mut node.y, &mut node.vy, self.height, boundary_margin, restitution);
		}
	}

	fn seed_position(&mut self) -> (f64, f64) {
		let margin = self.config.seed_margin;
		let x = seed_coordinate(&mut self.rng, self.width, margin);
		let y = seed_coordinate(&mut self.rng, self.height, margin);
		(x, y)
	}

	#[cfg(test)]
	pub(crate) fn nodes_mut(&mut self) -> &mut [SimNode] {
		&mut self.nodes
	}
}

/// Clamps one coordinate into `[margin, extent - margin]`, reversing and
/// damping the matching velocity component on contact.
fn collide(pos: &mut f64, vel: &mut f64, extent: f64, margin: f64, restitution: f64) {
	let low = margin;
	let high = (extent - margin).max(low);
	if *pos <= low {
		*pos = low;
		*vel *= -restitution;
	} else if *pos >= high {
		*pos = high;
		*vel *= -restitution;
	}
}

fn seed_coordinate(rng: &mut SmallRng, extent: f64, margin: f64) -> f64 {
	let high = extent - margin;
	if high > margin {
		rng.gen_range(margin..=high)
	} else {
		extent / 2.0
	}
}

/// Mutable references to two distinct nodes.
fn pair_mut(nodes: &mut [SimNode], a: usize, b: usize) -> (&mut SimNode, &mut SimNode) {
	debug_assert_ne!(a, b);
	if a < b {
		let (head, tail) = nodes.split_at_mut(b);
		(&mut head[a], &mut tail[0])
	} else {
		let (head, tail) = nodes.split_at_mut(a);
		(&mut tail[0], &mut head[b])
	}
}

fn sanitize_radius(node: &GraphNode) -> f64 {
	if node.val.is_finite() && node.val > 0.0 {
		node.val
	} else {
		warn!(
			"pratejra-graph: node {:?} has invalid radius {}, using {}",
			node.id, node.val, FALLBACK_RADIUS
		);
		FALLBACK_RADIUS
	}
}

fn sanitize_extent(extent: f64) -> f64 {
	if extent.is_finite() { extent.max(0.0) } else { 0.0 }
}
