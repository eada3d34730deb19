use std::fmt;

use serde::{Deserialize, Serialize};

/// A gesture classification pushed by the backend.
///
/// Names are matched exactly; anything else is kept as [Action::Unknown] so it can still be shown.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
	Play,
	Pause,
	VolUp,
	VolDown,
	Forward,
	Rewind,
	Unknown(String),
}

impl Action {
	pub const KNOWN: [Action; 6] = [
		Action::Play,
		Action::Pause,
		Action::VolUp,
		Action::VolDown,
		Action::Forward,
		Action::Rewind,
	];

	pub fn name(&self) -> &str {
		match self {
			Self::Play => "Play",
			Self::Pause => "Pause",
			Self::VolUp => "VolUp",
			Self::VolDown => "VolDown",
			Self::Forward => "Forward",
			Self::Rewind => "Rewind",
			Self::Unknown(name) => name,
		}
	}

	/// The glyph shown next to the toast message.
	pub fn icon(&self) -> &'static str {
		match self {
			Self::Play => "▶",
			Self::Pause => "⏸",
			Self::VolUp => "🔊",
			Self::VolDown => "🔉",
			Self::Forward => "⏩",
			Self::Rewind => "⏪",
			Self::Unknown(_) => "Info",
		}
	}

	pub fn is_known(&self) -> bool {
		!matches!(self, Self::Unknown(_))
	}
}

impl From<&str> for Action {
	fn from(name: &str) -> Self {
		match name {
			"Play" => Self::Play,
			"Pause" => Self::Pause,
			"VolUp" => Self::VolUp,
			"VolDown" => Self::VolDown,
			"Forward" => Self::Forward,
			"Rewind" => Self::Rewind,
			other => Self::Unknown(other.to_string()),
		}
	}
}

impl From<String> for Action {
	fn from(name: String) -> Self {
		match Self::from(name.as_str()) {
			Self::Unknown(_) => Self::Unknown(name),
			known => known,
		}
	}
}

impl From<Action> for String {
	fn from(action: Action) -> Self {
		match action {
			Action::Unknown(name) => name,
			known => known.name().to_string(),
		}
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
