//! Event handling for the circuit background, host-agnostic.
//!
//! [`CircuitAnimation`] owns the scene, the frame loop and the resize
//! debouncer. The component forwards browser events to it; every mutation of
//! the scene goes through one of these handlers.

use log::{debug, info};

use super::palette::Theme;
use super::scheduler::{Debouncer, FrameDecision, FrameLoop, FramePort, LoopState, TimerPort};
use super::state::CircuitState;
use super::types::{Point, Viewport};

/// Scene, frame loop and resize debounce driven through a host's ports.
pub struct CircuitAnimation<H> {
	host: H,
	state: CircuitState,
	frames: FrameLoop,
	resize: Debouncer,
	drawn: u64,
}

impl<H: FramePort + TimerPort> CircuitAnimation<H> {
	/// Wraps an already generated scene. Nothing is scheduled until [`mount`](Self::mount).
	pub fn new(host: H, state: CircuitState) -> Self {
		let config = state.config();
		let frames = FrameLoop::new(config.frame_interval_ms());
		let resize = Debouncer::new(config.resize_debounce_ms);
		Self {
			host,
			state,
			frames,
			resize,
			drawn: 0,
		}
	}

	/// Starts the frame loop, honouring the initial visibility.
	pub fn mount(&mut self, visible: bool) {
		self.frames.set_visible(visible, &mut self.host);
		info!(
			"circuit background mounted with {} paths",
			self.state.paths().len()
		);
	}

	/// Handles one animation-frame callback; `draw` runs only on rendered frames.
	pub fn on_frame<F>(&mut self, draw: F) -> FrameDecision
	where
		F: FnOnce(&mut CircuitState),
	{
		let decision = self.frames.on_frame(&mut self.host);
		match decision {
			FrameDecision::Draw => {
				draw(&mut self.state);
				self.drawn += 1;
			}
			FrameDecision::Stop => debug!("circuit background paused"),
			FrameDecision::Skip => {}
		}
		decision
	}

	/// Tab visibility changed.
	pub fn on_visibility(&mut self, visible: bool) {
		let was_idle = self.frames.state() == LoopState::Idle;
		self.frames.set_visible(visible, &mut self.host);
		if visible && was_idle && self.frames.state() == LoopState::Running {
			debug!("circuit background resumed");
		}
	}

	/// Raw resize notification; restarts the debounce window.
	pub fn on_resize(&mut self) {
		self.resize.trigger(&mut self.host);
	}

	/// Debounce timer elapsed. Returns true if the scene was regenerated.
	pub fn on_resize_elapsed(&mut self, viewport: Viewport) -> bool {
		if !self.resize.fire() {
			return false;
		}
		self.state.rebuild(viewport);
		true
	}

	/// Root theme class changed.
	pub fn on_theme(&mut self, theme: Theme) {
		if theme != self.state.theme() {
			debug!("circuit background theme -> {theme:?}");
			self.state.set_theme(theme);
		}
	}

	/// Pointer moved to `position` in CSS pixels.
	pub fn on_pointer_move(&mut self, position: Point) {
		self.state.pointer_moved(position);
	}

	/// Pointer left the document.
	pub fn on_pointer_leave(&mut self) {
		self.state.pointer_left();
	}

	/// Cancels pending callbacks and releases caches.
	pub fn teardown(&mut self) {
		self.frames.stop(&mut self.host);
		self.resize.cancel(&mut self.host);
		self.state.release();
		info!("circuit background torn down after {} frames", self.drawn);
	}

	/// Current scene.
	pub fn state(&self) -> &CircuitState {
		&self.state
	}

	/// Whether a frame callback is pending.
	pub fn loop_state(&self) -> LoopState {
		self.frames.state()
	}

	/// Frames actually drawn since construction.
	pub fn drawn_frames(&self) -> u64 {
		self.drawn
	}

	#[cfg(test)]
	pub(crate) fn resize_pending(&self) -> bool {
		self.resize.is_pending()
	}

	#[cfg(test)]
	pub(crate) fn host(&self) -> &H {
		&self.host
	}

	#[cfg(test)]
	pub(crate) fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::circuit_background::config::CircuitConfig;
	use crate::components::circuit_background::testing::FakeHost;

	const FRAME_MS: f64 = 1000.0 / 60.0;

	fn viewport(width: f64, height: f64) -> Viewport {
		Viewport::new(width, height, 1.0, 2.0)
	}

	fn mounted() -> CircuitAnimation<FakeHost> {
		let state = CircuitState::new(
			CircuitConfig::default(),
			viewport(1024.0, 768.0),
			Theme::Dark,
			7,
		);
		let mut anim = CircuitAnimation::new(FakeHost::new(), state);
		anim.mount(true);
		anim
	}

	/// Runs the fake clock for `ms`, delivering frames and debounce timers.
	/// Returns the number of frames that drew.
	fn run(anim: &mut CircuitAnimation<FakeHost>, ms: f64, resize_to: Viewport) -> usize {
		let mut drawn = 0;
		let mut elapsed = 0.0;
		while elapsed < ms {
			// A hair over one frame so the gate never rounds below the interval.
			let step = FRAME_MS + 0.01;
			elapsed += step;
			let delivered = anim.host_mut().advance(step);
			for _ in 0..delivered {
				if anim.on_frame(|state| {
					state.step();
				}) == FrameDecision::Draw
				{
					drawn += 1;
				}
			}
			for _ in anim.host_mut().take_due_timers() {
				anim.on_resize_elapsed(resize_to);
			}
		}
		drawn
	}

	#[test]
	fn draws_every_frame_while_visible() {
		let mut anim = mounted();
		let drawn = run(&mut anim, 500.0, viewport(1024.0, 768.0));
		assert!(drawn >= 29, "drew {drawn}");
		assert_eq!(anim.loop_state(), LoopState::Running);
	}

	#[test]
	fn counts_only_drawn_frames() {
		let mut anim = mounted();
		let drawn = run(&mut anim, 300.0, viewport(1024.0, 768.0));
		assert_eq!(anim.drawn_frames(), drawn as u64);
		anim.on_visibility(false);
		run(&mut anim, 300.0, viewport(1024.0, 768.0));
		assert_eq!(anim.drawn_frames(), drawn as u64);
	}

	#[test]
	fn hidden_tab_stops_drawing_until_visible() {
		let mut anim = mounted();
		let vp = viewport(1024.0, 768.0);
		run(&mut anim, 200.0, vp);

		anim.on_visibility(false);
		let packets_before = anim.state().packets().to_vec();
		let drawn = run(&mut anim, 2_000.0, vp);
		assert_eq!(drawn, 0);
		assert_eq!(anim.loop_state(), LoopState::Idle);
		assert_eq!(anim.host().pending_frames(), 0);
		assert_eq!(anim.state().packets(), packets_before.as_slice());

		anim.on_visibility(true);
		assert!(run(&mut anim, 200.0, vp) > 0);
	}

	#[test]
	fn resize_burst_regenerates_once() {
		let mut anim = mounted();
		anim.on_resize();
		anim.on_resize();
		assert!(anim.resize_pending());
		assert_eq!(anim.host().pending_timers(), 1);

		run(&mut anim, 400.0, viewport(320.0, 600.0));
		assert_eq!(anim.state().rebuilds(), 2);
		assert_eq!(anim.state().packets().len(), 6);
	}

	#[test]
	fn stale_timer_does_not_rebuild() {
		let mut anim = mounted();
		assert!(!anim.on_resize_elapsed(viewport(800.0, 600.0)));
		assert_eq!(anim.state().rebuilds(), 1);
	}

	#[test]
	fn theme_signal_rebuilds_in_place() {
		let mut anim = mounted();
		anim.on_theme(Theme::Light);
		anim.on_theme(Theme::Light);
		assert_eq!(anim.state().rebuilds(), 2);
		assert_eq!(anim.state().theme(), Theme::Light);
		assert_eq!(anim.loop_state(), LoopState::Running);
	}

	#[test]
	fn idle_pointer_decays_while_running() {
		let mut anim = mounted();
		let (a, b) = anim.state().paths()[0]
			.segments()
			.next()
			.expect("generated paths have segments");
		let midpoint = a.midpoint(b);
		anim.on_pointer_move(midpoint);
		assert_eq!(anim.state().influence_at(midpoint), 1.0);

		run(&mut anim, 3_000.0, viewport(1024.0, 768.0));
		let strength = anim.state().pointer().strength;
		assert!(strength < 0.01 && strength >= 0.0);
	}

	#[test]
	fn pointer_leave_drops_influence() {
		let mut anim = mounted();
		anim.on_pointer_move(Point::new(100.0, 100.0));
		anim.on_pointer_leave();
		assert_eq!(anim.state().influence_at(Point::new(100.0, 100.0)), 0.0);
	}

	#[test]
	fn teardown_cancels_everything() {
		let mut anim = mounted();
		anim.on_resize();
		run(&mut anim, 50.0, viewport(1024.0, 768.0));
		anim.teardown();

		assert_eq!(anim.loop_state(), LoopState::Idle);
		assert_eq!(anim.host().pending_frames(), 0);
		assert_eq!(anim.host().pending_timers(), 0);
		assert_eq!(anim.state().cached_lengths(), 0);
		assert_eq!(run(&mut anim, 1_000.0, viewport(1024.0, 768.0)), 0);
		assert_eq!(anim.state().rebuilds(), 1);
	}

	#[test]
	fn mounting_hidden_waits_for_visibility() {
		let state = CircuitState::new(
			CircuitConfig::default(),
			viewport(1024.0, 768.0),
			Theme::Dark,
			3,
		);
		let mut anim = CircuitAnimation::new(FakeHost::new(), state);
		anim.mount(false);
		assert_eq!(anim.loop_state(), LoopState::Idle);
		anim.on_visibility(true);
		assert_eq!(anim.loop_state(), LoopState::Running);
	}
}
