/// Light or dark site theme, read from the `dark` class on the root element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
	#[default]
	#[allow(missing_docs)]
	Dark,
	#[allow(missing_docs)]
	Light,
}

impl Theme {
	/// Maps the presence of the `dark` class to a theme.
	pub fn from_dark_flag(is_dark: bool) -> Self {
		if is_dark { Theme::Dark } else { Theme::Light }
	}

	/// Colors used for this theme.
	pub fn palette(self) -> Palette {
		match self {
			Theme::Dark => DARK,
			Theme::Light => LIGHT,
		}
	}
}

/// CSS colors for one theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
	/// Most traces.
	pub trace: &'static str,
	/// Roughly one trace in three.
	pub trace_light: &'static str,
	/// Solder nodes.
	pub node: &'static str,
	/// Inner stop of node and packet glows.
	pub node_glow: &'static str,
	/// Packet glow body.
	pub packet: &'static str,
}

// Light mode uses darker shades so traces stay visible on a pale page.
const DARK: Palette = Palette {
	trace: "#4a6b8a",
	trace_light: "#6b8caf",
	node: "#d4a574",
	node_glow: "#ffd700",
	packet: "#ffa500",
};

const LIGHT: Palette = Palette {
	trace: "#5a7a9a",
	trace_light: "#7a9abf",
	node: "#b48654",
	node_glow: "#c9a000",
	packet: "#d08500",
};

/// Transparent outer stop of node glows.
pub const NODE_FADE: &str = "rgba(212, 165, 116, 0)";
/// Transparent outer stop of packet glows.
pub const PACKET_FADE: &str = "rgba(255, 165, 0, 0)";
/// Packet core, the same in both themes.
pub const PACKET_CORE: &str = "#FFFFFF";
