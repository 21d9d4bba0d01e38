//! Frame pacing and resize coalescing, independent of the browser.
//!
//! The animation only talks to the host through [`FramePort`] and
//! [`TimerPort`]. The component backs them with `requestAnimationFrame` and
//! `setTimeout`; tests back them with a manual clock.

/// Handle returned by [`FramePort::request_frame`].
pub type FrameId = i32;
/// Handle returned by [`TimerPort::set_timeout`].
pub type TimerId = i32;

/// Access to the host's animation-frame primitive and clock.
pub trait FramePort {
	/// Schedules the frame callback. `None` if the host refused.
	fn request_frame(&mut self) -> Option<FrameId>;
	/// Drops a pending callback; unknown ids are ignored.
	fn cancel_frame(&mut self, id: FrameId);
	/// Monotonic milliseconds.
	fn now(&self) -> f64;
}

/// One-shot timers, used for the resize debounce.
pub trait TimerPort {
	/// Schedules the timer callback after `delay_ms`.
	fn set_timeout(&mut self, delay_ms: i32) -> Option<TimerId>;
	/// Cancels a pending timer.
	fn clear_timeout(&mut self, id: TimerId);
}

/// Whether the frame loop owns a pending callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
	/// No callback scheduled.
	Idle,
	/// A frame callback is pending.
	Running,
}

/// What the frame callback should do after consulting the loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameDecision {
	/// View hidden; the loop went idle and nothing was rescheduled.
	Stop,
	/// Too early for the next frame; rescheduled without drawing.
	Skip,
	/// Draw the scene; the next frame is already scheduled.
	Draw,
}

/// Fixed-rate frame gate with visibility pausing.
#[derive(Debug)]
pub struct FrameLoop {
	state: LoopState,
	visible: bool,
	interval_ms: f64,
	last_frame_ms: f64,
	pending: Option<FrameId>,
}

impl FrameLoop {
	/// Idle and visible, gating frames `interval_ms` apart.
	pub fn new(interval_ms: f64) -> Self {
		Self {
			state: LoopState::Idle,
			visible: true,
			interval_ms,
			last_frame_ms: 0.0,
			pending: None,
		}
	}

	#[allow(missing_docs)]
	pub fn state(&self) -> LoopState {
		self.state
	}

	/// Last visibility passed to [`set_visible`](Self::set_visible).
	pub fn is_visible(&self) -> bool {
		self.visible
	}

	/// Id of the scheduled callback, if any.
	pub fn pending(&self) -> Option<FrameId> {
		self.pending
	}

	/// Idle -> Running. No-op when already running or hidden.
	pub fn start<P: FramePort>(&mut self, port: &mut P) {
		if self.state == LoopState::Running || !self.visible {
			return;
		}
		self.last_frame_ms = port.now();
		self.schedule(port);
	}

	/// Runs the frame gate for one animation-frame callback.
	pub fn on_frame<P: FramePort>(&mut self, port: &mut P) -> FrameDecision {
		self.pending = None;
		if !self.visible {
			self.state = LoopState::Idle;
			return FrameDecision::Stop;
		}

		let now = port.now();
		let elapsed = now - self.last_frame_ms;
		if elapsed < self.interval_ms {
			self.schedule(port);
			return FrameDecision::Skip;
		}

		self.last_frame_ms = now - elapsed % self.interval_ms;
		self.schedule(port);
		FrameDecision::Draw
	}

	/// Records a visibility change. Regaining visibility restarts an idle loop.
	pub fn set_visible<P: FramePort>(&mut self, visible: bool, port: &mut P) {
		self.visible = visible;
		if visible {
			self.start(port);
		}
	}

	/// Cancels any pending callback and goes idle.
	pub fn stop<P: FramePort>(&mut self, port: &mut P) {
		if let Some(id) = self.pending.take() {
			port.cancel_frame(id);
		}
		self.state = LoopState::Idle;
	}

	fn schedule<P: FramePort>(&mut self, port: &mut P) {
		self.pending = port.request_frame();
		self.state = if self.pending.is_some() {
			LoopState::Running
		} else {
			LoopState::Idle
		};
	}
}

/// Trailing-edge debounce: only the last trigger in a burst fires.
#[derive(Debug)]
pub struct Debouncer {
	delay_ms: i32,
	pending: Option<TimerId>,
}

impl Debouncer {
	/// Fires `delay_ms` after the last trigger.
	pub fn new(delay_ms: i32) -> Self {
		Self {
			delay_ms,
			pending: None,
		}
	}

	/// A timer is armed.
	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	/// Restarts the quiet period.
	pub fn trigger<T: TimerPort>(&mut self, port: &mut T) {
		self.cancel(port);
		self.pending = port.set_timeout(self.delay_ms);
	}

	/// Called from the timer callback. True if the debounced action should run.
	pub fn fire(&mut self) -> bool {
		self.pending.take().is_some()
	}

	/// Clears the armed timer, if any.
	pub fn cancel<T: TimerPort>(&mut self, port: &mut T) {
		if let Some(id) = self.pending.take() {
			port.clear_timeout(id);
		}
	}
}
