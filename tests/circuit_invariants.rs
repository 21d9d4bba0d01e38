//! Property tests for the circuit background's geometry and simulation.

#![cfg(not(target_arch = "wasm32"))]

use circuit_portfolio::components::circuit_background::{
	CircuitConfig, CircuitState, DeviceClass, Orientation, PathLengthCache, PointerInfluence,
	Theme, Viewport, advance_packets, generate_paths, spawn_packets,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn device_strategy() -> impl Strategy<Value = DeviceClass> {
	prop_oneof![Just(DeviceClass::Mobile), Just(DeviceClass::Desktop)]
}

proptest! {
	#[test]
	fn generated_paths_are_manhattan_routed(
		seed in any::<u64>(),
		width in 0.0f64..4000.0,
		height in 0.0f64..4000.0,
		device in device_strategy(),
	) {
		let config = CircuitConfig::default();
		let mut rng = SmallRng::seed_from_u64(seed);
		let viewport = Viewport::new(width, height, 1.0, config.max_dpr);
		let paths = generate_paths(&mut rng, &viewport, device, &Theme::Dark.palette(), &config);

		prop_assert!(paths.len() <= config.density(device).max_paths);
		let horizontal = paths.iter().filter(|p| p.orientation == Orientation::Horizontal).count();
		prop_assert!(horizontal * 10 <= config.density(device).max_paths * 6);
		for path in &paths {
			prop_assert!(path.points.len() >= 2);
			for (a, b) in path.segments() {
				prop_assert!((a.x == b.x) != (a.y == b.y));
			}
		}
	}

	#[test]
	fn progress_never_leaves_unit_interval(
		seed in any::<u64>(),
		path_count in 1usize..40,
		ticks in 0usize..3000,
	) {
		let config = CircuitConfig::default();
		let mut rng = SmallRng::seed_from_u64(seed);
		let mut packets = spawn_packets(&mut rng, path_count, DeviceClass::Desktop, &config);
		for _ in 0..ticks {
			advance_packets(&mut rng, &mut packets, path_count, &config);
		}
		for packet in &packets {
			prop_assert!(packet.progress >= 0.0 && packet.progress < 1.0);
			prop_assert!(packet.path_index < path_count);
		}
	}

	#[test]
	fn resolved_points_track_path_ends(seed in any::<u64>()) {
		let config = CircuitConfig::default();
		let mut rng = SmallRng::seed_from_u64(seed);
		let viewport = Viewport::new(1440.0, 900.0, 1.0, config.max_dpr);
		let paths = generate_paths(&mut rng, &viewport, DeviceClass::Desktop, &Theme::Light.palette(), &config);
		let mut cache = PathLengthCache::new();
		for path in &paths {
			let first = path.points[0];
			let last = path.points[path.points.len() - 1];
			prop_assert_eq!(cache.resolve(&path.points, 0.0), first);
			let near_end = cache.resolve(&path.points, 1.0 - 1e-9);
			prop_assert!(near_end.distance_squared(last) < 1e-3);
		}
		prop_assert_eq!(cache.len(), paths.len());
	}

	#[test]
	fn influence_is_bounded_by_strength(
		px in -500.0f64..2500.0,
		py in -500.0f64..2500.0,
		tx in -500.0f64..2500.0,
		ty in -500.0f64..2500.0,
		fade in 0u32..100,
	) {
		use circuit_portfolio::components::circuit_background::Point;

		let mut pointer = PointerInfluence::new(&CircuitConfig::default());
		pointer.moved(Point::new(px, py));
		for _ in 0..fade {
			pointer.decay();
		}
		let target = Point::new(tx, ty);
		let influence = pointer.influence_at(target);
		prop_assert!(influence >= 0.0 && influence <= pointer.strength);
		if target.distance_squared(pointer.position) > pointer.radius * pointer.radius {
			prop_assert_eq!(influence, 0.0);
		}
	}
}

#[test]
fn scene_survives_resize_to_nothing_and_back() {
	let config = CircuitConfig::default();
	let mut state = CircuitState::new(
		config.clone(),
		Viewport::new(1024.0, 768.0, 1.0, config.max_dpr),
		Theme::Dark,
		99,
	);
	state.rebuild(Viewport::new(0.0, 0.0, 1.0, config.max_dpr));
	assert!(state.paths().is_empty());
	assert!(state.step().is_empty());

	state.rebuild(Viewport::new(1920.0, 1080.0, 2.0, config.max_dpr));
	assert!(!state.paths().is_empty());
	assert_eq!(state.step().len(), state.packets().len());
}
