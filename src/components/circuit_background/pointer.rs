use super::config::CircuitConfig;
use super::types::Point;

/// Where the pointer last was and how strongly it still lights up the board.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerInfluence {
	/// Last reported position in CSS pixels.
	pub position: Point,
	/// Distance at which influence reaches 0.
	pub radius: f64,
	/// In `[0, 1]`; 1 right after a move, decaying every frame afterwards.
	pub strength: f64,
	decay: f64,
	min_strength: f64,
}

impl PointerInfluence {
	/// Off screen with no strength.
	pub fn new(config: &CircuitConfig) -> Self {
		Self {
			position: Point::new(-1000.0, -1000.0),
			radius: config.pointer_radius,
			strength: 0.0,
			decay: config.pointer_decay,
			min_strength: config.min_pointer_strength,
		}
	}

	/// Full strength at `position`.
	pub fn moved(&mut self, position: Point) {
		self.position = position;
		self.strength = 1.0;
	}

	/// Drops strength to 0 immediately.
	pub fn left(&mut self) {
		self.strength = 0.0;
	}

	/// Called once per rendered frame.
	pub fn decay(&mut self) {
		if self.strength > 0.0 {
			self.strength *= self.decay;
		}
	}

	/// Linear falloff from `strength` at the pointer to 0 at `radius`.
	pub fn influence_at(&self, point: Point) -> f64 {
		if self.strength < self.min_strength || self.radius <= 0.0 {
			return 0.0;
		}
		let dist_sq = point.distance_squared(self.position);
		if dist_sq > self.radius * self.radius {
			return 0.0;
		}
		(1.0 - dist_sq.sqrt() / self.radius) * self.strength
	}
}
