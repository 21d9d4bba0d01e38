//! Fade-and-slide entrance for content scrolled into view.
//!
//! The transition is plain CSS on `.reveal`; this component positions the
//! hidden state through custom properties and adds `revealed` once an
//! `IntersectionObserver` reports the element on screen.

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// Slide distance in CSS pixels.
pub const DEFAULT_DISTANCE: f64 = 50.0;
/// Transition length in seconds.
pub const DEFAULT_DURATION: f64 = 0.6;
/// Shrinks the viewport so content starts moving slightly after it appears.
const ROOT_MARGIN: &str = "-100px";

/// Direction the content travels while it appears.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealDirection {
	/// Rises from below.
	#[default]
	Up,
	/// Drops in from above.
	Down,
	/// Slides in from the right.
	Left,
	/// Slides in from the left.
	Right,
}

impl RevealDirection {
	/// Translation of the hidden state.
	pub fn hidden_offset(self, distance: f64) -> (f64, f64) {
		match self {
			RevealDirection::Up => (0.0, distance),
			RevealDirection::Down => (0.0, -distance),
			RevealDirection::Left => (distance, 0.0),
			RevealDirection::Right => (-distance, 0.0),
		}
	}
}

/// Inline style carrying the hidden offset and timing.
pub fn reveal_style(direction: RevealDirection, distance: f64, duration: f64, delay: f64) -> String {
	let (x, y) = direction.hidden_offset(distance);
	format!(
		"--reveal-x: {x}px; --reveal-y: {y}px; --reveal-duration: {duration}s; \
		 --reveal-delay: {delay}s;"
	)
}

/// Outcome of one intersection report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealUpdate {
	/// Whether the content should now be shown.
	pub visible: bool,
	/// Stop watching the element.
	pub unobserve: bool,
}

/// With `once`, content stays shown after its first appearance and the
/// element is no longer watched. Otherwise it hides again when it leaves.
pub fn on_intersection(visible: bool, intersecting: bool, once: bool) -> RevealUpdate {
	if intersecting {
		return RevealUpdate {
			visible: true,
			unobserve: once,
		};
	}
	RevealUpdate {
		visible: once && visible,
		unobserve: false,
	}
}

struct Watcher {
	observer: IntersectionObserver,
	_callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Watcher {
	fn observe(
		target: &Element,
		once: bool,
		visible: ReadSignal<bool>,
		set_visible: WriteSignal<bool>,
	) -> Result<Self, JsValue> {
		let callback = Closure::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
			for entry in entries.iter() {
				let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
					continue;
				};
				let update = on_intersection(visible.get_untracked(), entry.is_intersecting(), once);
				set_visible.set(update.visible);
				if update.unobserve {
					observer.unobserve(&entry.target());
				}
			}
		});
		let init = IntersectionObserverInit::new();
		init.set_root_margin(ROOT_MARGIN);
		let observer =
			IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
		observer.observe(target);
		Ok(Self {
			observer,
			_callback: callback,
		})
	}

	fn disconnect(self) {
		self.observer.disconnect();
	}
}

/// Shows `children` with a fade and slide when they scroll into view.
///
/// Without `IntersectionObserver` the content is shown straight away.
#[component]
pub fn Reveal(
	children: Children,
	#[prop(optional)] direction: RevealDirection,
	#[prop(default = DEFAULT_DISTANCE)] distance: f64,
	#[prop(default = DEFAULT_DURATION)] duration: f64,
	/// Seconds before the transition starts.
	#[prop(optional)]
	delay: f64,
	/// Keep the content shown after the first appearance.
	#[prop(default = true)]
	once: bool,
) -> impl IntoView {
	let node = NodeRef::<leptos::html::Div>::new();
	let (visible, set_visible) = signal(false);
	let watcher = StoredValue::new_local(None::<Watcher>);

	Effect::new(move |_| {
		let Some(element) = node.get() else {
			return;
		};
		if watcher.with_value(Option::is_some) {
			return;
		}
		let element: Element = element.into();
		match Watcher::observe(&element, once, visible, set_visible) {
			Ok(attached) => watcher.set_value(Some(attached)),
			Err(err) => {
				warn!("reveal shown without observer: {err:?}");
				set_visible.set(true);
			}
		}
	});

	on_cleanup(move || {
		watcher.try_update_value(|slot| {
			if let Some(attached) = slot.take() {
				attached.disconnect();
			}
		});
	});

	view! {
		<div
			node_ref=node
			class="reveal"
			class:revealed=move || visible.get()
			style=reveal_style(direction, distance, duration, delay)
		>
			{children()}
		</div>
	}
}
