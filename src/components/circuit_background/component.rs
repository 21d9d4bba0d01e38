use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Document, Element, Event, EventTarget, HtmlCanvasElement, MouseEvent,
	MutationObserver, MutationObserverInit, Window,
};

use super::animation::CircuitAnimation;
use super::config::CircuitConfig;
use super::palette::Theme;
use super::render;
use super::scheduler::{FrameId, FramePort, TimerId, TimerPort};
use super::state::CircuitState;
use super::types::{Point, Viewport};

type Callback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Why the background could not attach to the page.
#[derive(Debug)]
pub enum CanvasError {
	/// Not running in a browser window.
	NoWindow,
	/// The window has no document or root element.
	NoDocument,
	/// `getContext("2d")` returned nothing.
	NoContext,
	/// A DOM call threw.
	Js(String),
}

impl fmt::Display for CanvasError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			CanvasError::NoWindow => f.write_str("no window"),
			CanvasError::NoDocument => f.write_str("no document element"),
			CanvasError::NoContext => f.write_str("2d context unavailable"),
			CanvasError::Js(msg) => write!(f, "browser error: {msg}"),
		}
	}
}

impl std::error::Error for CanvasError {}

impl From<JsValue> for CanvasError {
	fn from(value: JsValue) -> Self {
		CanvasError::Js(format!("{value:?}"))
	}
}

/// `requestAnimationFrame`/`setTimeout` backed ports.
struct BrowserHost {
	window: Window,
	frame_cb: Callback,
	timer_cb: Callback,
}

impl FramePort for BrowserHost {
	fn request_frame(&mut self) -> Option<FrameId> {
		let cb = self.frame_cb.borrow();
		let cb = cb.as_ref()?;
		self.window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.ok()
	}

	fn cancel_frame(&mut self, id: FrameId) {
		let _ = self.window.cancel_animation_frame(id);
	}

	fn now(&self) -> f64 {
		self.window
			.performance()
			.map(|p| p.now())
			.unwrap_or_else(js_sys::Date::now)
	}
}

impl TimerPort for BrowserHost {
	fn set_timeout(&mut self, delay_ms: i32) -> Option<TimerId> {
		let cb = self.timer_cb.borrow();
		let cb = cb.as_ref()?;
		self.window
			.set_timeout_with_callback_and_timeout_and_arguments_0(
				cb.as_ref().unchecked_ref(),
				delay_ms,
			)
			.ok()
	}

	fn clear_timeout(&mut self, id: TimerId) {
		self.window.clear_timeout_with_handle(id);
	}
}

/// A registered DOM listener, removed again on teardown.
struct Listener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
	fn attach(target: EventTarget, event: &'static str, callback: Closure<dyn FnMut(Event)>) -> Self {
		if target
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
			.is_err()
		{
			warn!("could not listen for {event}");
		}
		Self {
			target,
			event,
			callback,
		}
	}

	fn detach(self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

fn read_viewport(window: &Window, config: &CircuitConfig) -> Viewport {
	let dimension = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	Viewport::new(
		dimension(window.inner_width()),
		dimension(window.inner_height()),
		window.device_pixel_ratio(),
		config.max_dpr,
	)
}

fn read_theme(root: &Element) -> Theme {
	Theme::from_dark_flag(root.class_list().contains("dark"))
}

/// Sizes the backing store in device pixels and maps drawing to CSS pixels.
fn size_canvas(canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d, viewport: Viewport) {
	let (width, height) = viewport.backing_size();
	canvas.set_width(width);
	canvas.set_height(height);
	// `leptos::prelude` brings its own `style` method into scope.
	let style = web_sys::HtmlElement::style(canvas);
	let _ = style.set_property("width", &format!("{}px", viewport.width));
	let _ = style.set_property("height", &format!("{}px", viewport.height));
	let _ = ctx.set_transform(viewport.dpr, 0.0, 0.0, viewport.dpr, 0.0, 0.0);
}

/// Everything the mounted background keeps alive.
struct Mounted {
	runtime: Rc<RefCell<CircuitAnimation<BrowserHost>>>,
	frame_cb: Callback,
	timer_cb: Callback,
	listeners: Vec<Listener>,
	observer: MutationObserver,
	_observer_cb: Closure<dyn FnMut()>,
}

impl Mounted {
	fn attach(canvas: HtmlCanvasElement, config: CircuitConfig) -> Result<Self, CanvasError> {
		let window = web_sys::window().ok_or(CanvasError::NoWindow)?;
		let document: Document = window.document().ok_or(CanvasError::NoDocument)?;
		let root = document.document_element().ok_or(CanvasError::NoDocument)?;
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or(CanvasError::NoContext)?
			.dyn_into()
			.map_err(|_| CanvasError::NoContext)?;

		let viewport = read_viewport(&window, &config);
		size_canvas(&canvas, &ctx, viewport);
		let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
		let state = CircuitState::new(config, viewport, read_theme(&root), seed);

		let (frame_cb, timer_cb): (Callback, Callback) = Default::default();
		let host = BrowserHost {
			window: window.clone(),
			frame_cb: frame_cb.clone(),
			timer_cb: timer_cb.clone(),
		};
		let runtime = Rc::new(RefCell::new(CircuitAnimation::new(host, state)));

		// Theme observer first: it is the only step that can still fail.
		let (rt, root_theme) = (runtime.clone(), root.clone());
		let observer_cb: Closure<dyn FnMut()> = Closure::new(move || {
			rt.borrow_mut().on_theme(read_theme(&root_theme));
		});
		let observer = MutationObserver::new(observer_cb.as_ref().unchecked_ref())?;
		let init = MutationObserverInit::new();
		init.set_attributes(true);
		init.set_attribute_filter(&js_sys::Array::of1(&JsValue::from_str("class")));
		observer.observe_with_options(&root, &init)?;

		let (rt, ctx_frame) = (runtime.clone(), ctx.clone());
		*frame_cb.borrow_mut() = Some(Closure::new(move || {
			rt.borrow_mut()
				.on_frame(|state| render::render(state, &ctx_frame));
		}));

		let (rt, win) = (runtime.clone(), window.clone());
		*timer_cb.borrow_mut() = Some(Closure::new(move || {
			let mut anim = rt.borrow_mut();
			let viewport = read_viewport(&win, anim.state().config());
			if anim.on_resize_elapsed(viewport) {
				size_canvas(&canvas, &ctx, viewport);
			}
		}));

		let rt = runtime.clone();
		let on_resize = Closure::new(move |_: Event| rt.borrow_mut().on_resize());

		let rt = runtime.clone();
		let on_move = Closure::new(move |ev: Event| {
			if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
				let position = Point::new(ev.client_x() as f64, ev.client_y() as f64);
				rt.borrow_mut().on_pointer_move(position);
			}
		});

		let rt = runtime.clone();
		let on_leave = Closure::new(move |_: Event| rt.borrow_mut().on_pointer_leave());

		let (rt, doc) = (runtime.clone(), document.clone());
		let on_visibility = Closure::new(move |_: Event| {
			rt.borrow_mut().on_visibility(!doc.hidden());
		});

		let listeners = vec![
			Listener::attach(window.clone().into(), "resize", on_resize),
			Listener::attach(window.into(), "mousemove", on_move),
			Listener::attach(root.into(), "mouseleave", on_leave),
			Listener::attach(document.clone().into(), "visibilitychange", on_visibility),
		];

		runtime.borrow_mut().mount(!document.hidden());

		Ok(Self {
			runtime,
			frame_cb,
			timer_cb,
			listeners,
			observer,
			_observer_cb: observer_cb,
		})
	}

	fn detach(self) {
		self.runtime.borrow_mut().teardown();
		self.observer.disconnect();
		for listener in self.listeners {
			listener.detach();
		}
		// Breaks the closure <-> runtime reference cycle.
		self.frame_cb.borrow_mut().take();
		self.timer_cb.borrow_mut().take();
	}
}

/// Full-viewport animated circuit board drawn behind the page content.
///
/// The layer never receives pointer events; it listens on the window instead.
/// If no 2D context can be obtained the component renders an empty layer.
#[component]
pub fn CircuitBackground(#[prop(optional)] config: Option<CircuitConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let mounted = StoredValue::new_local(None::<Mounted>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if mounted.with_value(Option::is_some) {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		match Mounted::attach(canvas, config.clone().unwrap_or_default()) {
			Ok(attached) => mounted.set_value(Some(attached)),
			Err(err) => warn!("circuit background disabled: {err}"),
		}
	});

	on_cleanup(move || {
		mounted.try_update_value(|slot| {
			if let Some(attached) = slot.take() {
				attached.detach();
			}
		});
	});

	view! {
		<div
			class="circuit-background"
			aria-hidden="true"
			style="position: fixed; inset: 0; z-index: 0; pointer-events: none;"
		>
			<canvas node_ref=canvas_ref class="circuit-canvas" style="display: block;" />
			<div class="circuit-overlay" />
		</div>
	}
}
