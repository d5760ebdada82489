//! Visual theming for the knowledge graph.
//!
//! Node appearance is looked up per [`NodeGroup`] through an exhaustive
//! match, so adding a group without a style fails to compile.

use super::types::NodeGroup;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Fill and outline of a node group.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupStyle {
	pub fill: Color,
	pub outline: Color,
	pub outline_width: f64,
}

/// Link line style.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkStyle {
	pub color: Color,
	pub width: f64,
}

/// Emphasis for hovered and search-matched nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct HighlightStyle {
	/// Halo behind a hovered node.
	pub hover_halo: Color,
	/// Halo behind a search match. Wins over the hover halo.
	pub match_halo: Color,
	/// Extra halo radius beyond the node radius.
	pub halo_padding: f64,
	/// Outline of a search match, replacing the group outline.
	pub match_outline: Color,
	pub match_outline_width: f64,
	/// Opacity of nodes that don't match an active search.
	pub dimmed_alpha: f64,
}

/// Label text and backing plate.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelStyle {
	pub color: Color,
	pub font_family: &'static str,
	pub size: f64,
	/// Font size for hovered or matched nodes.
	pub emphasized_size: f64,
	/// Labels are always shown for nodes larger than this radius.
	pub min_radius: f64,
	/// Baseline distance below the node's bottom edge.
	pub offset: f64,
	pub plate: Color,
	/// Plate top edge distance below the node's bottom edge.
	pub plate_offset: f64,
	pub plate_height: f64,
	pub plate_padding: f64,
}

impl LabelStyle {
	pub fn font(&self, emphasized: bool) -> String {
		let size = if emphasized {
			self.emphasized_size
		} else {
			self.size
		};
		format!("bold {}px {}", size, self.font_family)
	}
}

/// Complete visual theme.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
	pub document: GroupStyle,
	pub metadata: GroupStyle,
	pub other: GroupStyle,
	pub link: LinkStyle,
	pub highlight: HighlightStyle,
	pub label: LabelStyle,
}

impl Theme {
	/// Ink-on-paper look of the Pratejra workspace (default).
	pub fn paper() -> Self {
		let ink = Color::rgb(24, 24, 27);
		Self {
			document: GroupStyle {
				fill: Color::rgb(16, 185, 129),
				outline: ink,
				outline_width: 2.0,
			},
			metadata: GroupStyle {
				fill: Color::rgb(255, 255, 255),
				outline: ink,
				outline_width: 2.0,
			},
			other: GroupStyle {
				fill: Color::rgb(255, 255, 255),
				outline: ink,
				outline_width: 2.0,
			},
			link: LinkStyle {
				color: Color::rgb(228, 228, 231),
				width: 1.0,
			},
			highlight: HighlightStyle {
				hover_halo: Color::rgba(16, 185, 129, 0.2),
				match_halo: Color::rgba(239, 68, 68, 0.2),
				halo_padding: 6.0,
				match_outline: Color::rgb(239, 68, 68),
				match_outline_width: 3.0,
				dimmed_alpha: 0.2,
			},
			label: LabelStyle {
				color: ink,
				font_family: "Inter",
				size: 10.0,
				emphasized_size: 12.0,
				min_radius: 8.0,
				offset: 15.0,
				plate: Color::rgba(255, 255, 255, 0.8),
				plate_offset: 5.0,
				plate_height: 14.0,
				plate_padding: 2.0,
			},
		}
	}

	/// Style for a node group.
	pub fn group_style(&self, group: NodeGroup) -> &GroupStyle {
		match group {
			NodeGroup::Document => &self.document,
			NodeGroup::Metadata => &self.metadata,
			NodeGroup::Other => &self.other,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::paper()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(16, 185, 129).to_css(), "#10b981");
		assert_eq!(
			Color::rgba(239, 68, 68, 0.2).to_css(),
			"rgba(239, 68, 68, 0.2)"
		);
	}

	#[test]
	fn documents_are_distinguished() {
		let theme = Theme::default();
		assert_ne!(
			theme.group_style(NodeGroup::Document).fill,
			theme.group_style(NodeGroup::Metadata).fill
		);
		assert_eq!(theme.label.font(true), "bold 12px Inter");
	}
}
