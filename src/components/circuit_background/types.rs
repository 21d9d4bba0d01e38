/// A position in CSS pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Distance from the left edge.
	pub x: f64,
	/// Distance from the top edge.
	pub y: f64,
}

impl Point {
	/// A point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Squared Euclidean distance, cheap enough for range checks.
	pub fn distance_squared(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		dx * dx + dy * dy
	}

	/// Halfway between `self` and `other`.
	pub fn midpoint(self, other: Point) -> Point {
		Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
	}
}

/// Main routing direction of a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
	/// Runs left to right with vertical jogs.
	Horizontal,
	/// Runs top to bottom with horizontal jogs.
	Vertical,
}

/// An axis-aligned polyline routed across the viewport.
#[derive(Clone, Debug)]
pub struct CircuitPath {
	/// Corners of the polyline, no two consecutive ones equal.
	pub points: Vec<Point>,
	/// CSS color of the trace.
	pub color: &'static str,
	/// Whether solder nodes are drawn at the corners.
	pub has_nodes: bool,
	/// Main routing direction.
	pub orientation: Orientation,
}

impl CircuitPath {
	/// Paths with fewer than two points are skipped when drawing.
	pub fn is_drawable(&self) -> bool {
		self.points.len() >= 2
	}

	/// Consecutive point pairs.
	pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
		self.points.windows(2).map(|w| (w[0], w[1]))
	}
}

/// A light pulse riding one path.
#[derive(Clone, Debug, PartialEq)]
pub struct Packet {
	/// Index into the scene's path list.
	pub path_index: usize,
	/// Fraction of the path length travelled, always in `[0, 1)`.
	pub progress: f64,
	/// Progress units per frame.
	pub speed: f64,
	/// Base brightness, drawn from `CircuitConfig::packet_intensity`.
	pub intensity: f64,
}

/// Visible area in CSS pixels plus the (capped) device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
	/// Device pixel ratio after the cap.
	pub dpr: f64,
}

impl Viewport {
	/// Negative or non-finite sizes become 0; the ratio is capped at `max_dpr`.
	pub fn new(width: f64, height: f64, device_pixel_ratio: f64, max_dpr: f64) -> Self {
		let clean = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
		let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
			device_pixel_ratio.min(max_dpr.max(1.0))
		} else {
			1.0
		};
		Self {
			width: clean(width),
			height: clean(height),
			dpr,
		}
	}

	/// Backing-store size in device pixels.
	pub fn backing_size(&self) -> (u32, u32) {
		(
			(self.width * self.dpr).round() as u32,
			(self.height * self.dpr).round() as u32,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn viewport_caps_pixel_ratio() {
		let vp = Viewport::new(800.0, 600.0, 3.0, 2.0);
		assert_eq!(vp.dpr, 2.0);
		assert_eq!(vp.backing_size(), (1600, 1200));
	}

	#[test]
	fn viewport_rejects_garbage_dimensions() {
		let vp = Viewport::new(-5.0, f64::NAN, 0.0, 2.0);
		assert_eq!((vp.width, vp.height, vp.dpr), (0.0, 0.0, 1.0));
		assert_eq!(vp.backing_size(), (0, 0));
	}
}
