use rand::Rng;

use super::config::{CircuitConfig, DeviceClass};
use super::types::Packet;

fn draw_in<R: Rng>(rng: &mut R, (low, high): (f64, f64)) -> f64 {
	low + rng.random::<f64>() * (high - low)
}

fn pick_path<R: Rng>(rng: &mut R, path_count: usize) -> usize {
	if path_count == 0 {
		0
	} else {
		rng.random_range(0..path_count)
	}
}

/// Scatters the device's packet budget over the given paths.
pub fn spawn_packets<R: Rng>(
	rng: &mut R,
	path_count: usize,
	device: DeviceClass,
	config: &CircuitConfig,
) -> Vec<Packet> {
	if path_count == 0 {
		return Vec::new();
	}
	(0..config.density(device).packets)
		.map(|_| Packet {
			path_index: pick_path(rng, path_count),
			progress: rng.random::<f64>(),
			speed: draw_in(rng, config.packet_speed),
			intensity: draw_in(rng, config.packet_intensity),
		})
		.collect()
}

/// Moves every packet one frame along its path.
///
/// A packet that reaches the end restarts at progress 0 on a randomly chosen
/// path with a fresh speed. Overshoot is discarded.
pub fn advance_packets<R: Rng>(
	rng: &mut R,
	packets: &mut [Packet],
	path_count: usize,
	config: &CircuitConfig,
) {
	for packet in packets.iter_mut() {
		packet.progress += packet.speed;
		if packet.progress >= 1.0 || !packet.progress.is_finite() {
			packet.progress = 0.0;
			packet.path_index = pick_path(rng, path_count);
			packet.speed = draw_in(rng, config.packet_speed);
		}
	}
}
