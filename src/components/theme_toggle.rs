//! Light/dark switch for the whole site.

use leptos::prelude::*;
use web_sys::Element;

/// Root class marking the dark theme.
pub const DARK_CLASS: &str = "dark";

fn root_element() -> Option<Element> {
	web_sys::window()?.document()?.document_element()
}

/// Flips the `dark` class on `<html>`.
///
/// Other components watch that class rather than a shared signal, so the
/// toggle only has to touch the DOM.
#[component]
pub fn ThemeToggle() -> impl IntoView {
	let initial = root_element()
		.map(|root| root.class_list().contains(DARK_CLASS))
		.unwrap_or(true);
	let (dark, set_dark) = signal(initial);

	let toggle = move |_| {
		let next = !dark.get_untracked();
		if let Some(root) = root_element() {
			let _ = root.class_list().toggle_with_force(DARK_CLASS, next);
		}
		set_dark.set(next);
	};

	view! {
		<button class="theme-toggle" type="button" on:click=toggle>
			{move || if dark.get() { "Light mode" } else { "Dark mode" }}
		</button>
	}
}
