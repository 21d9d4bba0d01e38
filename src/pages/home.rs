use leptos::prelude::*;

use crate::components::circuit_background::CircuitBackground;
use crate::components::glow_card::GlowCard;
use crate::components::reveal::Reveal;
use crate::components::theme_toggle::ThemeToggle;

/// A short card describing one part of the page.
struct Highlight {
	title: &'static str,
	body: &'static str,
}

const HIGHLIGHTS: &[Highlight] = &[
	Highlight {
		title: "Routed traces",
		body: "Orthogonal traces are laid out fresh for every window size.",
	},
	Highlight {
		title: "Data packets",
		body: "Light pulses travel at constant speed, whatever the shape of the trace.",
	},
	Highlight {
		title: "Pointer glow",
		body: "Traces, nodes and packets brighten near the cursor and fade when it rests.",
	},
];

/// Rendered instead of the page content if a child view fails.
///
/// The background sits outside the boundary, so the board keeps running
/// behind the message.
#[component]
fn RenderFailure(errors: ArcRwSignal<Errors>) -> impl IntoView {
	view! {
		<section class="render-failure" role="alert">
			<h2>"This section could not be shown"</h2>
			<p class="subtitle">"Reload the page to try again."</p>
			<details>
				<summary>"Details"</summary>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			</details>
		</section>
	}
}

/// Hero and highlight cards over the animated board.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<CircuitBackground />
		<main class="page-content">
			<ErrorBoundary fallback=|errors| view! { <RenderFailure errors /> }>
				<header class="hero">
					<h1>"Portfolio"</h1>
					<p class="subtitle">"Move the pointer around to light up the board."</p>
					<ThemeToggle />
				</header>
				<section class="highlights">
					{HIGHLIGHTS
						.iter()
						.enumerate()
						.map(|(i, h)| {
							view! {
								<Reveal delay={i as f64 * 0.1}>
									<GlowCard>
										<h2>{h.title}</h2>
										<p>{h.body}</p>
									</GlowCard>
								</Reveal>
							}
						})
						.collect_view()}
				</section>
			</ErrorBoundary>
		</main>
	}
}
