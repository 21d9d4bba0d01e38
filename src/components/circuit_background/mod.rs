//! Animated circuit-board background.
//!
//! Orthogonal traces are generated to fill the viewport and light packets run
//! along them. The board brightens around the pointer, follows the site's
//! light/dark theme and pauses while the tab is hidden.

mod animation;
mod component;
mod config;
mod generator;
mod packets;
mod palette;
mod pointer;
mod render;
mod resolver;
mod scheduler;
mod state;
#[cfg(test)]
mod testing;
mod types;

pub use animation::CircuitAnimation;
pub use component::{CanvasError, CircuitBackground};
pub use config::{CircuitConfig, Density, DeviceClass};
pub use generator::generate_paths;
pub use packets::{advance_packets, spawn_packets};
pub use palette::{Palette, Theme};
pub use pointer::PointerInfluence;
pub use resolver::PathLengthCache;
pub use scheduler::{
	Debouncer, FrameDecision, FrameId, FrameLoop, FramePort, LoopState, TimerId, TimerPort,
};
pub use state::{CircuitState, PacketSprite};
pub use types::{CircuitPath, Orientation, Packet, Point, Viewport};
