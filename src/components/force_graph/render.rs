//! Canvas rendering for the knowledge graph.
//!
//! Paints a [`Frame`] in two passes for correct z-ordering:
//! 1. Links (below everything)
//! 2. Per node: halo, body, outline, then label

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::frame::{Frame, LabelSprite, NodeSprite};
use super::theme::Theme;

/// Renders the complete frame to the canvas.
pub fn render(frame: &Frame, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.clear_rect(0.0, 0.0, frame.width, frame.height);
	draw_links(frame, ctx, theme);
	for node in &frame.nodes {
		draw_node(ctx, node, theme);
	}
	ctx.set_global_alpha(1.0);
}

fn draw_links(frame: &Frame, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	if frame.links.is_empty() {
		return;
	}
	ctx.set_stroke_style_str(&theme.link.color.to_css());
	ctx.set_line_width(theme.link.width);
	for link in &frame.links {
		ctx.begin_path();
		ctx.move_to(link.x1, link.y1);
		ctx.line_to(link.x2, link.y2);
		ctx.stroke();
	}
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &NodeSprite, theme: &Theme) {
	ctx.set_global_alpha(node.alpha);

	if let Some(halo) = &node.halo {
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, halo.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&halo.color.to_css());
		ctx.fill();
	}

	ctx.begin_path();
	let _ = ctx.arc(node.x, node.y, node.radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&node.fill.to_css());
	ctx.set_stroke_style_str(&node.outline.to_css());
	ctx.set_line_width(node.outline_width);
	ctx.fill();
	ctx.stroke();

	if let Some(label) = &node.label {
		draw_label(ctx, label, theme);
	}

	ctx.set_global_alpha(1.0);
}

fn draw_label(ctx: &CanvasRenderingContext2d, label: &LabelSprite, theme: &Theme) {
	let style = &theme.label;
	ctx.set_font(&label.font);
	ctx.set_text_align("center");

	if label.plate {
		// Text metrics only exist on the live context.
		let width = ctx
			.measure_text(&label.text)
			.map(|metrics| metrics.width())
			.unwrap_or(0.0);
		ctx.set_fill_style_str(&style.plate.to_css());
		ctx.fill_rect(
			label.x - width / 2.0 - style.plate_padding,
			label.plate_top,
			width + style.plate_padding * 2.0,
			style.plate_height,
		);
	}

	ctx.set_fill_style_str(&style.color.to_css());
	let _ = ctx.fill_text(&label.text, label.x, label.y);
}
