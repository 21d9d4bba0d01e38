//! Tunables for the circuit background.
//!
//! Every value has a default matching the shipped look; pass a modified
//! [`CircuitConfig`] to the component to override them.

/// Density class of the hosting device, picked from the viewport width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
	/// Narrower than the breakpoint: sparser board.
	Mobile,
	/// Everything else.
	Desktop,
}

impl DeviceClass {
	/// `Mobile` strictly below `breakpoint`.
	pub fn for_width(width: f64, breakpoint: f64) -> Self {
		if width < breakpoint {
			DeviceClass::Mobile
		} else {
			DeviceClass::Desktop
		}
	}
}

/// Per-device density settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density {
	/// Distance between neighbouring horizontal traces.
	pub spacing: f64,
	/// Upper bound on traces for one scene.
	pub max_paths: usize,
	/// Packets spawned per rebuild.
	pub packets: usize,
}

/// Every tunable of the background. `Default` gives the shipped look.
#[derive(Clone, Debug, PartialEq)]
pub struct CircuitConfig {
	/// Inset from the viewport edges where traces start and end.
	pub margin: f64,
	#[allow(missing_docs)]
	pub desktop: Density,
	#[allow(missing_docs)]
	pub mobile: Density,
	/// Share of `max_paths` reserved for horizontal traces.
	pub horizontal_share: f64,
	/// Vertical traces are spaced `spacing * vertical_spacing_factor` apart.
	pub vertical_spacing_factor: f64,
	/// Frame-rate cap for the render loop.
	pub target_fps: f64,
	/// Highest device pixel ratio honoured by the backing store.
	pub max_dpr: f64,
	/// Reach of the pointer glow in CSS pixels.
	pub pointer_radius: f64,
	/// Factor applied to the pointer strength every frame.
	pub pointer_decay: f64,
	/// Below this the pointer has no effect at all.
	pub min_pointer_strength: f64,
	/// Quiet period after the last resize before the scene is rebuilt.
	pub resize_debounce_ms: i32,
	/// Viewport width separating mobile from desktop density.
	pub mobile_breakpoint: f64,
	/// `[min, max)` band packet speeds are drawn from.
	pub packet_speed: (f64, f64),
	/// `[min, max)` band packet brightness is drawn from.
	pub packet_intensity: (f64, f64),
}

impl Default for CircuitConfig {
	fn default() -> Self {
		Self {
			margin: 50.0,
			desktop: Density {
				spacing: 80.0,
				max_paths: 30,
				packets: 12,
			},
			mobile: Density {
				spacing: 100.0,
				max_paths: 15,
				packets: 6,
			},
			horizontal_share: 0.6,
			vertical_spacing_factor: 1.5,
			target_fps: 60.0,
			max_dpr: 2.0,
			pointer_radius: 180.0,
			pointer_decay: 0.96,
			min_pointer_strength: 0.01,
			resize_debounce_ms: 150,
			mobile_breakpoint: 768.0,
			packet_speed: (0.0015, 0.004),
			packet_intensity: (0.7, 1.0),
		}
	}
}

impl CircuitConfig {
	/// Density for `device`.
	pub fn density(&self, device: DeviceClass) -> Density {
		match device {
			DeviceClass::Mobile => self.mobile,
			DeviceClass::Desktop => self.desktop,
		}
	}

	/// Milliseconds between rendered frames.
	pub fn frame_interval_ms(&self) -> f64 {
		1000.0 / self.target_fps.max(1.0)
	}

	/// Device class for a viewport `width` wide.
	pub fn device_class(&self, width: f64) -> DeviceClass {
		DeviceClass::for_width(width, self.mobile_breakpoint)
	}
}
