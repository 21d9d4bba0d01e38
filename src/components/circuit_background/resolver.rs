//! Arc-length parameterisation of paths.
//!
//! Packets store their position as a fraction of the total path length, so a
//! packet crosses a short jog as quickly as it crosses the same distance of a
//! long run. Segment lengths are computed once per distinct point sequence.

use std::collections::HashMap;

use super::types::Point;

#[derive(Clone, Debug, PartialEq)]
struct ArcLengths {
	segments: Vec<f64>,
	total: f64,
}

impl ArcLengths {
	fn measure(points: &[Point]) -> Self {
		let segments: Vec<f64> = points
			.windows(2)
			.map(|w| w[0].distance_squared(w[1]).sqrt())
			.collect();
		let total = segments.iter().sum();
		Self { segments, total }
	}
}

/// Exact bit patterns of every coordinate in the sequence.
type PathKey = Vec<u64>;

fn key_of(points: &[Point]) -> PathKey {
	points
		.iter()
		.flat_map(|p| [p.x.to_bits(), p.y.to_bits()])
		.collect()
}

/// Segment lengths per distinct point sequence, keyed by exact coordinates.
#[derive(Debug, Default)]
pub struct PathLengthCache {
	entries: HashMap<PathKey, ArcLengths>,
}

impl PathLengthCache {
	/// An empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of distinct point sequences measured so far.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True before the first `resolve` and after `clear`.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Drops every measurement. Called on rebuild and teardown.
	pub fn clear(&mut self) {
		self.entries.clear();
	}

	#[cfg(test)]
	pub(crate) fn total_length(&mut self, points: &[Point]) -> f64 {
		self.lengths(points).total
	}

	/// Point at `progress` (0..1) of the way along `points`, by distance.
	pub fn resolve(&mut self, points: &[Point], progress: f64) -> Point {
		let (first, last) = match points {
			[] => return Point::default(),
			[only] => return *only,
			[first, .., last] => (*first, *last),
		};

		let lengths = self.lengths(points);
		if lengths.total <= 0.0 {
			return first;
		}

		let target = progress * lengths.total;
		let mut walked = 0.0;
		for (i, &segment) in lengths.segments.iter().enumerate() {
			if walked + segment >= target {
				let (a, b) = (points[i], points[i + 1]);
				if segment <= 0.0 {
					return a;
				}
				let t = (target - walked) / segment;
				return Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
			}
			walked += segment;
		}
		last
	}

	fn lengths(&mut self, points: &[Point]) -> &ArcLengths {
		self.entries
			.entry(key_of(points))
			.or_insert_with(|| ArcLengths::measure(points))
	}
}
