use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::{CircuitConfig, DeviceClass};
use super::generator::generate_paths;
use super::packets::{advance_packets, spawn_packets};
use super::palette::{Palette, Theme};
use super::pointer::PointerInfluence;
use super::resolver::PathLengthCache;
use super::types::{CircuitPath, Packet, Point, Viewport};

/// A packet resolved to screen space for the current frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PacketSprite {
	/// Screen position in CSS pixels.
	pub position: Point,
	/// The packet's own brightness.
	pub intensity: f64,
	/// Pointer influence at `position` this frame.
	pub influence: f64,
}

/// Everything regenerated together on resize or theme change.
#[derive(Debug, Default)]
struct Scene {
	paths: Vec<CircuitPath>,
	packets: Vec<Packet>,
}

/// The generated board plus everything that animates on it.
pub struct CircuitState {
	config: CircuitConfig,
	viewport: Viewport,
	theme: Theme,
	device: DeviceClass,
	scene: Scene,
	pointer: PointerInfluence,
	lengths: PathLengthCache,
	rng: SmallRng,
	rebuilds: u64,
}

impl CircuitState {
	/// Builds the first scene for `viewport`. `seed` drives every random choice.
	pub fn new(config: CircuitConfig, viewport: Viewport, theme: Theme, seed: u64) -> Self {
		let mut state = Self {
			device: config.device_class(viewport.width),
			pointer: PointerInfluence::new(&config),
			config,
			viewport,
			theme,
			scene: Scene::default(),
			lengths: PathLengthCache::new(),
			rng: SmallRng::seed_from_u64(seed),
			rebuilds: 0,
		};
		state.rebuild(viewport);
		state
	}

	/// Replaces paths, packets and pointer state in one step.
	pub fn rebuild(&mut self, viewport: Viewport) {
		let device = self.config.device_class(viewport.width);
		let palette = self.theme.palette();
		let paths = generate_paths(&mut self.rng, &viewport, device, &palette, &self.config);
		let packets = spawn_packets(&mut self.rng, paths.len(), device, &self.config);

		self.viewport = viewport;
		self.device = device;
		self.scene = Scene { paths, packets };
		self.pointer = PointerInfluence::new(&self.config);
		// Old point sequences can never be looked up again.
		self.lengths.clear();
		self.rebuilds += 1;
		debug!(
			"circuit rebuilt: {}x{} {:?}, {} paths, {} packets",
			viewport.width,
			viewport.height,
			device,
			self.scene.paths.len(),
			self.scene.packets.len()
		);
	}

	/// Switches palette. Path colors are baked in, so this rebuilds.
	pub fn set_theme(&mut self, theme: Theme) {
		if self.theme == theme {
			return;
		}
		self.theme = theme;
		self.rebuild(self.viewport);
	}

	/// Advances one rendered frame and returns where each packet now is.
	///
	/// Pointer strength decays after the sprites are resolved, so paths drawn
	/// earlier in the frame and the packets see the same influence.
	pub fn step(&mut self) -> Vec<PacketSprite> {
		let Scene { paths, packets } = &mut self.scene;
		advance_packets(&mut self.rng, packets, paths.len(), &self.config);

		let sprites = packets
			.iter()
			.filter_map(|packet| {
				let path = paths.get(packet.path_index)?;
				let position = self.lengths.resolve(&path.points, packet.progress);
				Some(PacketSprite {
					position,
					intensity: packet.intensity,
					influence: self.pointer.influence_at(position),
				})
			})
			.collect();

		self.pointer.decay();
		sprites
	}

	/// Records a pointer move at full strength.
	pub fn pointer_moved(&mut self, position: Point) {
		self.pointer.moved(position);
	}

	/// Pointer left the page.
	pub fn pointer_left(&mut self) {
		self.pointer.left();
	}

	/// Current pointer influence at `point`, in `[0, 1]`.
	pub fn influence_at(&self, point: Point) -> f64 {
		self.pointer.influence_at(point)
	}

	/// Drops memoised path lengths.
	pub fn release(&mut self) {
		self.lengths.clear();
	}

	/// Traces of the current scene.
	pub fn paths(&self) -> &[CircuitPath] {
		&self.scene.paths
	}

	#[allow(missing_docs)]
	pub fn packets(&self) -> &[Packet] {
		&self.scene.packets
	}

	#[allow(missing_docs)]
	pub fn pointer(&self) -> &PointerInfluence {
		&self.pointer
	}

	/// Palette of the active theme.
	pub fn palette(&self) -> Palette {
		self.theme.palette()
	}

	#[allow(missing_docs)]
	pub fn theme(&self) -> Theme {
		self.theme
	}

	/// Viewport the scene was last built for.
	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	/// Density class picked at the last rebuild.
	pub fn device(&self) -> DeviceClass {
		self.device
	}

	#[allow(missing_docs)]
	pub fn config(&self) -> &CircuitConfig {
		&self.config
	}

	/// Paths currently memoised by the length cache.
	pub fn cached_lengths(&self) -> usize {
		self.lengths.len()
	}

	/// How many times the scene has been generated, including the first.
	pub fn rebuilds(&self) -> u64 {
		self.rebuilds
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn desktop_state() -> CircuitState {
		let config = CircuitConfig::default();
		let viewport = Viewport::new(1024.0, 768.0, 1.0, config.max_dpr);
		CircuitState::new(config, viewport, Theme::Dark, 42)
	}

	#[test]
	fn new_state_is_populated() {
		let state = desktop_state();
		assert_eq!(state.rebuilds(), 1);
		assert_eq!(state.device(), DeviceClass::Desktop);
		assert_eq!(state.paths().len(), 15);
		assert_eq!(state.packets().len(), 12);
	}

	#[test]
	fn sprites_sit_on_their_paths() {
		let mut state = desktop_state();
		for _ in 0..200 {
			let sprites = state.step();
			assert_eq!(sprites.len(), state.packets().len());
			for (sprite, packet) in sprites.iter().zip(state.packets()) {
				let path = &state.paths()[packet.path_index];
				let on_segment = path.segments().any(|(a, b)| {
					let within = |v: f64, lo: f64, hi: f64| v >= lo.min(hi) - 1e-6 && v <= lo.max(hi) + 1e-6;
					within(sprite.position.x, a.x, b.x) && within(sprite.position.y, a.y, b.y)
				});
				assert!(on_segment, "sprite {:?} off path", sprite.position);
			}
		}
		assert!(state.cached_lengths() <= state.paths().len());
	}

	#[test]
	fn rebuild_replaces_scene_and_resets_cache() {
		let mut state = desktop_state();
		state.step();
		assert!(state.cached_lengths() > 0);

		let mobile = Viewport::new(320.0, 600.0, 3.0, 2.0);
		state.rebuild(mobile);
		assert_eq!(state.device(), DeviceClass::Mobile);
		assert_eq!(state.viewport().dpr, 2.0);
		assert!(state.paths().len() <= 15);
		assert_eq!(state.packets().len(), 6);
		assert_eq!(state.cached_lengths(), 0);
		assert_eq!(state.rebuilds(), 2);
	}

	#[test]
	fn theme_change_recolors_paths() {
		let mut state = desktop_state();
		state.set_theme(Theme::Dark);
		assert_eq!(state.rebuilds(), 1);

		state.set_theme(Theme::Light);
		assert_eq!(state.rebuilds(), 2);
		let light = Theme::Light.palette();
		for path in state.paths() {
			assert!(path.color == light.trace || path.color == light.trace_light);
		}
	}

	#[test]
	fn pointer_brightens_nearby_packets_then_fades() {
		let mut state = desktop_state();
		let target = state.paths()[0].points[0];
		state.pointer_moved(target);
		assert_eq!(state.influence_at(target), 1.0);

		for _ in 0..300 {
			state.step();
		}
		assert!(state.pointer().strength < state.config().min_pointer_strength);
		assert_eq!(state.influence_at(target), 0.0);
	}

	#[test]
	fn empty_viewport_runs_without_paths() {
		let config = CircuitConfig::default();
		let mut state = CircuitState::new(config, Viewport::new(0.0, 0.0, 1.0, 2.0), Theme::Light, 1);
		assert!(state.paths().is_empty());
		assert!(state.packets().is_empty());
		assert!(state.step().is_empty());
	}
}
