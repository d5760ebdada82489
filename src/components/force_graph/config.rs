//! Tunable parameters for the layout solver and pointer interaction.
//!
//! Every struct has a [`Default`] matching the tuned behaviour of the graph
//! view, and deserializes with all fields optional so a host page can
//! override individual values:
//!
//! ```json
//! { "simulation": { "damping": 0.5 }, "interaction": { "hit_policy": "nearest" } }
//! ```
//!
//! # Stability
//!
//! The force constants are small relative to the damping factor. Raising
//! `repulsion`, `attraction` or `gravity` without also lowering `damping`
//! (or `max_speed`) makes the layout oscillate or diverge.

use serde::Deserialize;

/// Physics constants for the force-directed layout.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
	/// Multiplier on `sqrt(area / (n + 1))` giving the ideal edge length `k`.
	pub ideal_distance_factor: f64,
	/// Scale applied to the `k² / d` repulsive force.
	pub repulsion: f64,
	/// Scale applied to the `d² / k` spring force along links.
	pub attraction: f64,
	/// Pull towards the canvas center, per unit of displacement.
	pub gravity: f64,
	/// Velocity multiplier applied every tick.
	pub damping: f64,
	/// Maximum node speed in canvas units per tick.
	pub max_speed: f64,
	/// Nodes are kept within `[margin, dimension - margin]`.
	pub boundary_margin: f64,
	/// Fraction of velocity kept (and reversed) when a node hits a wall.
	pub restitution: f64,
	/// New nodes are placed within `[seed_margin, dimension - seed_margin]`.
	pub seed_margin: f64,
	/// Fixed seed for initial placement. Time-based when unset.
	pub seed: Option<u64>,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			ideal_distance_factor: 1.5,
			repulsion: 0.05,
			attraction: 0.05,
			gravity: 0.005,
			damping: 0.6,
			max_speed: 10.0,
			boundary_margin: 20.0,
			restitution: 0.5,
			seed_margin: 50.0,
			seed: None,
		}
	}
}

/// Which node wins when the pointer is within range of several.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitPolicy {
	/// First node in store order whose hit radius contains the pointer.
	#[default]
	FirstMatch,
	/// Closest node center among those whose hit radius contains the pointer.
	Nearest,
}

/// Pointer and search behaviour.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
	/// Extra hit radius beyond the drawn node radius, in canvas units.
	pub hit_tolerance: f64,
	pub hit_policy: HitPolicy,
	/// Queries shorter than this (in chars) don't highlight anything.
	pub min_search_len: usize,
}

impl Default for InteractionConfig {
	fn default() -> Self {
		Self {
			hit_tolerance: 10.0,
			hit_policy: HitPolicy::FirstMatch,
			min_search_len: 1,
		}
	}
}

/// Complete configuration for the graph view.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
	pub simulation: SimulationConfig,
	pub interaction: InteractionConfig,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_json_is_default() {
		let config: GraphConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config, GraphConfig::default());
	}

	#[test]
	fn partial_override_keeps_other_defaults() {
		let config: GraphConfig = serde_json::from_str(
			r#"{ "simulation": { "damping": 0.5, "seed": 9 }, "interaction": { "hit_policy": "nearest" } }"#,
		)
		.unwrap();

		assert_eq!(config.simulation.damping, 0.5);
		assert_eq!(config.simulation.seed, Some(9));
		assert_eq!(config.simulation.max_speed, 10.0);
		assert_eq!(config.interaction.hit_policy, HitPolicy::Nearest);
		assert_eq!(config.interaction.hit_tolerance, 10.0);
	}
}
