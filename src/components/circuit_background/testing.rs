//! Manual-clock host for driving the animation in unit tests.

use super::scheduler::{FrameId, FramePort, TimerId, TimerPort};

#[derive(Debug, Default)]
pub struct FakeHost {
	now: f64,
	next_id: i32,
	frames: Vec<FrameId>,
	cancelled_frames: usize,
	timers: Vec<(TimerId, f64)>,
	refuse_frames: bool,
}

impl FakeHost {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn refuse_frames(&mut self, refuse: bool) {
		self.refuse_frames = refuse;
	}

	/// Moves the clock forward and returns how many frame callbacks were due.
	///
	/// Every frame requested before the call counts as delivered.
	pub fn advance(&mut self, ms: f64) -> usize {
		self.now += ms;
		let delivered = self.frames.len();
		self.frames.clear();
		delivered
	}

	pub fn pending_frames(&self) -> usize {
		self.frames.len()
	}

	pub fn cancelled_frames(&self) -> usize {
		self.cancelled_frames
	}

	pub fn pending_timers(&self) -> usize {
		self.timers.len()
	}

	/// Removes and returns timers whose deadline has passed.
	pub fn take_due_timers(&mut self) -> Vec<TimerId> {
		let now = self.now;
		let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.timers)
			.into_iter()
			.partition(|(_, at)| *at <= now);
		self.timers = waiting;
		due.into_iter().map(|(id, _)| id).collect()
	}

	fn next_id(&mut self) -> i32 {
		self.next_id += 1;
		self.next_id
	}
}

impl FramePort for FakeHost {
	fn request_frame(&mut self) -> Option<FrameId> {
		if self.refuse_frames {
			return None;
		}
		let id = self.next_id();
		self.frames.push(id);
		Some(id)
	}

	fn cancel_frame(&mut self, id: FrameId) {
		let before = self.frames.len();
		self.frames.retain(|&f| f != id);
		if self.frames.len() < before {
			self.cancelled_frames += 1;
		}
	}

	fn now(&self) -> f64 {
		self.now
	}
}

impl TimerPort for FakeHost {
	fn set_timeout(&mut self, delay_ms: i32) -> Option<TimerId> {
		let id = self.next_id();
		self.timers.push((id, self.now + delay_ms as f64));
		Some(id)
	}

	fn clear_timeout(&mut self, id: TimerId) {
		self.timers.retain(|(t, _)| *t != id);
	}
}
