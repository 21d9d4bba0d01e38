//! Manhattan-routed trace layout.
//!
//! Horizontal traces are laid out first on rows `spacing` apart, then
//! vertical traces on columns `spacing * vertical_spacing_factor` apart, until
//! the device's path budget is spent. Each trace runs forward in long
//! segments with occasional perpendicular jogs that rejoin the main line.

use rand::Rng;

use super::config::{CircuitConfig, DeviceClass};
use super::palette::Palette;
use super::types::{CircuitPath, Orientation, Point, Viewport};

/// Shape parameters for one routing direction.
struct Routing {
	orientation: Orientation,
	/// Half-width of the jitter applied to the row/column coordinate.
	jitter: f64,
	/// Segment count for desktop: `base + floor(r * extra)`.
	segments_base: usize,
	segments_extra: f64,
	/// A jog is taken when a unit draw exceeds this.
	jog_threshold: f64,
	jog_span: f64,
	/// A path gets endpoint nodes when a unit draw exceeds this.
	node_threshold: f64,
}

const HORIZONTAL: Routing = Routing {
	orientation: Orientation::Horizontal,
	jitter: 30.0,
	segments_base: 3,
	segments_extra: 3.0,
	jog_threshold: 0.3,
	jog_span: 100.0,
	node_threshold: 0.3,
};

const VERTICAL: Routing = Routing {
	orientation: Orientation::Vertical,
	jitter: 40.0,
	segments_base: 2,
	segments_extra: 2.0,
	jog_threshold: 0.4,
	jog_span: 120.0,
	node_threshold: 0.4,
};

const MOBILE_SEGMENTS: usize = 2;
const START_OFFSET: f64 = 100.0;
const RUN_MIN: f64 = 100.0;
const RUN_SPAN: f64 = 200.0;
const CONTINUE_MIN: f64 = 50.0;
const CONTINUE_SPAN: f64 = 100.0;

/// Number of `spacing`-wide lanes fitting in `extent` after margins, never negative.
fn lane_count(extent: f64, margin: f64, spacing: f64) -> usize {
	if spacing <= 0.0 {
		return 0;
	}
	let lanes = ((extent - 2.0 * margin) / spacing).floor();
	if lanes.is_finite() && lanes > 0.0 {
		lanes as usize
	} else {
		0
	}
}

/// Builds a path in (along, across) coordinates, dropping repeated points.
struct Router {
	orientation: Orientation,
	points: Vec<Point>,
}

impl Router {
	fn new(orientation: Orientation) -> Self {
		Self {
			orientation,
			points: Vec::new(),
		}
	}

	fn push(&mut self, along: f64, across: f64) {
		let point = match self.orientation {
			Orientation::Horizontal => Point::new(along, across),
			Orientation::Vertical => Point::new(across, along),
		};
		if self.points.last() != Some(&point) {
			self.points.push(point);
		}
	}
}

fn route<R: Rng>(
	rng: &mut R,
	routing: &Routing,
	lane: f64,
	margin: f64,
	device: DeviceClass,
) -> Vec<Point> {
	let mut router = Router::new(routing.orientation);
	let mut along = margin + rng.random::<f64>() * START_OFFSET;
	let segments = match device {
		DeviceClass::Mobile => MOBILE_SEGMENTS,
		DeviceClass::Desktop => {
			routing.segments_base + (rng.random::<f64>() * routing.segments_extra) as usize
		}
	};

	for j in 0..segments {
		router.push(along, lane);
		along += RUN_MIN + rng.random::<f64>() * RUN_SPAN;
		router.push(along, lane);

		if j + 1 < segments && rng.random::<f64>() > routing.jog_threshold {
			let offset = lane + (rng.random::<f64>() - 0.5) * routing.jog_span;
			router.push(along, offset);
			along += CONTINUE_MIN + rng.random::<f64>() * CONTINUE_SPAN;
			router.push(along, offset);
			router.push(along, lane);
		}
	}
	router.points
}

fn build_path<R: Rng>(
	rng: &mut R,
	routing: &Routing,
	lane: f64,
	margin: f64,
	device: DeviceClass,
	palette: &Palette,
) -> CircuitPath {
	let points = route(rng, routing, lane, margin, device);
	let color = if rng.random::<f64>() > 0.5 {
		palette.trace
	} else {
		palette.trace_light
	};
	CircuitPath {
		points,
		color,
		has_nodes: rng.random::<f64>() > routing.node_threshold,
		orientation: routing.orientation,
	}
}

/// Lays out a fresh set of traces covering `viewport`.
pub fn generate_paths<R: Rng>(
	rng: &mut R,
	viewport: &Viewport,
	device: DeviceClass,
	palette: &Palette,
	config: &CircuitConfig,
) -> Vec<CircuitPath> {
	let density = config.density(device);
	let margin = config.margin;
	let horizontal_budget = (density.max_paths as f64 * config.horizontal_share).floor() as usize;
	let horizontal = lane_count(viewport.height, margin, density.spacing).min(horizontal_budget);

	let mut paths = Vec::with_capacity(density.max_paths);
	for i in 0..horizontal {
		let lane = margin + i as f64 * density.spacing + (rng.random::<f64>() - 0.5) * HORIZONTAL.jitter;
		paths.push(build_path(rng, &HORIZONTAL, lane, margin, device, palette));
	}

	let column_spacing = density.spacing * config.vertical_spacing_factor;
	let vertical = lane_count(viewport.width, margin, column_spacing)
		.min(density.max_paths.saturating_sub(paths.len()));
	for i in 0..vertical {
		let lane = margin + i as f64 * column_spacing + (rng.random::<f64>() - 0.5) * VERTICAL.jitter;
		paths.push(build_path(rng, &VERTICAL, lane, margin, device, palette));
	}

	paths
}
