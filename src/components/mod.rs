//! Page building blocks.

pub mod circuit_background;
pub mod glow_card;
pub mod reveal;
pub mod theme_toggle;
