use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::palette::{NODE_FADE, PACKET_CORE, PACKET_FADE, Palette};
use super::state::{CircuitState, PacketSprite};
use super::types::{CircuitPath, Point};

const TRACE_ALPHA: f64 = 0.25;
const NODE_ALPHA: f64 = 0.6;
const NODE_RADIUS: f64 = 2.0;

/// Clears the canvas and draws one frame, advancing the packets.
pub fn render(state: &mut CircuitState, ctx: &CanvasRenderingContext2d) {
	let viewport = state.viewport();
	let palette = state.palette();
	ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);

	for path in state.paths() {
		draw_path(state, path, &palette, ctx);
	}
	for sprite in state.step() {
		draw_packet(&sprite, &palette, ctx);
	}
	ctx.set_global_alpha(1.0);
}

fn stroke_segment(ctx: &CanvasRenderingContext2d, a: Point, b: Point) {
	ctx.begin_path();
	ctx.move_to(a.x, a.y);
	ctx.line_to(b.x, b.y);
	ctx.stroke();
}

fn fill_circle(ctx: &CanvasRenderingContext2d, at: Point, radius: f64) {
	ctx.begin_path();
	let _ = ctx.arc(at.x, at.y, radius, 0.0, 2.0 * PI);
	ctx.fill();
}

/// Fills a radial glow through three color stops.
fn fill_glow(
	ctx: &CanvasRenderingContext2d,
	at: Point,
	radius: f64,
	stops: [(f64, &str); 3],
) {
	let Ok(gradient) = ctx.create_radial_gradient(at.x, at.y, 0.0, at.x, at.y, radius) else {
		return;
	};
	for (offset, color) in stops {
		let _ = gradient.add_color_stop(offset as f32, color);
	}
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	fill_circle(ctx, at, radius);
}

fn draw_path(
	state: &CircuitState,
	path: &CircuitPath,
	palette: &Palette,
	ctx: &CanvasRenderingContext2d,
) {
	if !path.is_drawable() {
		return;
	}

	ctx.set_stroke_style_str(path.color);
	for (a, b) in path.segments() {
		let influence = state.influence_at(a.midpoint(b));

		if influence > 0.1 {
			ctx.set_line_width(2.0 + influence * 3.0);
			ctx.set_global_alpha(influence * 0.12);
			stroke_segment(ctx, a, b);
		}

		ctx.set_line_width(0.8 + influence * 0.4);
		ctx.set_global_alpha(TRACE_ALPHA + influence * 0.4);
		stroke_segment(ctx, a, b);
	}

	if path.has_nodes {
		for &point in &path.points {
			let influence = state.influence_at(point);
			if influence > 0.2 {
				ctx.set_global_alpha(0.3 + influence * 0.5);
				fill_glow(
					ctx,
					point,
					6.0 + influence * 8.0,
					[(0.0, palette.node_glow), (0.5, palette.node), (1.0, NODE_FADE)],
				);
				ctx.set_fill_style_str(palette.node);
				ctx.set_global_alpha(NODE_ALPHA + influence * 0.4);
				fill_circle(ctx, point, NODE_RADIUS + influence * 2.0);
			} else {
				ctx.set_fill_style_str(palette.node);
				ctx.set_global_alpha(NODE_ALPHA);
				fill_circle(ctx, point, NODE_RADIUS);
			}
		}
	}

	ctx.set_global_alpha(1.0);
}

fn draw_packet(sprite: &PacketSprite, palette: &Palette, ctx: &CanvasRenderingContext2d) {
	let influence = sprite.influence;
	let size = 2.5 + influence * 2.0;
	let intensity = sprite.intensity + influence * 0.3;

	ctx.set_global_alpha(intensity * 0.6);
	fill_glow(
		ctx,
		sprite.position,
		8.0 + influence * 10.0,
		[(0.0, palette.node_glow), (0.4, palette.packet), (1.0, PACKET_FADE)],
	);

	ctx.set_fill_style_str(PACKET_CORE);
	ctx.set_global_alpha(intensity * 0.9);
	fill_circle(ctx, sprite.position, size * 0.5);
}
