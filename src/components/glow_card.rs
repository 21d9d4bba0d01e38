//! Card whose background glows where the pointer is.
//!
//! The glow itself is pure CSS (a radial gradient on `.glow-overlay`); this
//! component only feeds it the pointer position through custom properties.

use leptos::ev::MouseEvent;
use leptos::prelude::*;

/// Soft white, readable on both themes.
pub const DEFAULT_GLOW_COLOR: &str = "rgba(255, 255, 255, 0.15)";
/// Glow diameter in CSS pixels.
pub const DEFAULT_GLOW_SIZE: f64 = 400.0;

/// Inline style carrying the glow's custom properties.
pub fn glow_style(x: f64, y: f64, color: &str, size: f64, hovered: bool) -> String {
	let opacity = if hovered { 1 } else { 0 };
	format!(
		"position: relative; overflow: hidden; --mouse-x: {x}px; --mouse-y: {y}px; \
		 --glow-color: {color}; --glow-size: {size}px; --glow-opacity: {opacity};"
	)
}

/// Wraps `children` in a card lit by a glow that follows the pointer.
#[component]
pub fn GlowCard(
	children: Children,
	#[prop(into, default = DEFAULT_GLOW_COLOR.to_string())] glow_color: String,
	#[prop(default = DEFAULT_GLOW_SIZE)] glow_size: f64,
) -> impl IntoView {
	let card_ref = NodeRef::<leptos::html::Div>::new();
	let (pointer, set_pointer) = signal((0.0, 0.0));
	let (hovered, set_hovered) = signal(false);

	// Position relative to the card, so the glow follows scrolling content.
	let on_mousemove = move |ev: MouseEvent| {
		let Some(card) = card_ref.get() else {
			return;
		};
		let rect = card.get_bounding_client_rect();
		set_pointer.set((
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		));
	};

	let style = move || {
		let (x, y) = pointer.get();
		glow_style(x, y, &glow_color, glow_size, hovered.get())
	};

	view! {
		<div
			node_ref=card_ref
			class="glow-card"
			style=style
			on:mousemove=on_mousemove
			on:mouseenter=move |_| set_hovered.set(true)
			on:mouseleave=move |_| set_hovered.set(false)
		>
			<div class="glow-overlay" />
			<div class="glow-content">{children()}</div>
		</div>
	}
}
