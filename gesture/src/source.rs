use std::{fmt, str::FromStr};

use serde_json::Value;

use crate::{Action, Error, Result};

/// What an inbound text frame turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
	Action(Action),

	/// The protocol expects this frame to be sent back.
	Reply(String),

	Ignore,
}

/// Decodes the frames of one transport convention into actions.
pub trait ActionSource {
	/// The path of the socket endpoint, relative to the page origin.
	fn path(&self) -> &'static str;

	fn decode(&self, frame: &str) -> Result<Inbound>;
}

// Only a JSON object can carry an action; arrays and scalars are ignored.
fn payload(value: Value) -> Result<Inbound> {
	let Value::Object(mut fields) = value else {
		return Ok(Inbound::Ignore);
	};

	let action: Option<String> = match fields.remove("action") {
		Some(action) => serde_json::from_value(action)?,
		None => None,
	};

	Ok(match action {
		Some(action) if !action.is_empty() => Inbound::Action(action.into()),
		_ => Inbound::Ignore,
	})
}

/// Plain text frames, each holding a JSON object with an `action` field.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawMessage;

impl ActionSource for RawMessage {
	fn path(&self) -> &'static str {
		"/ws"
	}

	fn decode(&self, frame: &str) -> Result<Inbound> {
		payload(serde_json::from_str(frame)?)
	}
}

/// Socket.IO framing, where actions arrive as a `gesture_detected` event.
///
/// Only the packets needed to stay connected are handled: the open handshake and pings.
#[derive(Debug, Clone, Copy)]
pub struct NamedEvent {
	pub event: &'static str,
}

impl NamedEvent {
	pub const GESTURE_DETECTED: &'static str = "gesture_detected";
}

impl Default for NamedEvent {
	fn default() -> Self {
		Self {
			event: Self::GESTURE_DETECTED,
		}
	}
}

impl ActionSource for NamedEvent {
	fn path(&self) -> &'static str {
		"/socket.io/?EIO=4&transport=websocket"
	}

	fn decode(&self, frame: &str) -> Result<Inbound> {
		// Engine.IO packet type first, then Socket.IO packet type for messages.
		let mut chars = frame.chars();
		let inbound = match chars.next() {
			// open: join the default namespace
			Some('0') => Inbound::Reply("40".to_string()),
			// ping
			Some('2') => Inbound::Reply("3".to_string()),
			Some('4') => match chars.next() {
				// event
				Some('2') => {
					let (name, value): (String, Value) = serde_json::from_str(chars.as_str())?;
					if name == self.event {
						payload(value)?
					} else {
						Inbound::Ignore
					}
				}
				Some(_) => Inbound::Ignore,
				None => return Err(Error::Transport(format!("truncated packet: {}", frame))),
			},
			Some(_) => Inbound::Ignore,
			None => return Err(Error::Transport("empty packet".to_string())),
		};

		Ok(inbound)
	}
}

/// The transport convention spoken by the backend.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
	#[default]
	Raw,
	NamedEvent,
}

impl Protocol {
	pub fn source(&self) -> Box<dyn ActionSource> {
		match self {
			Self::Raw => Box::new(RawMessage),
			Self::NamedEvent => Box::new(NamedEvent::default()),
		}
	}
}

impl FromStr for Protocol {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s {
			"raw" => Ok(Self::Raw),
			"named-event" | "socket.io" => Ok(Self::NamedEvent),
			_ => Err(format!("unknown protocol: {}", s)),
		}
	}
}

impl fmt::Display for Protocol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Raw => write!(f, "raw"),
			Self::NamedEvent => write!(f, "named-event"),
		}
	}
}

impl<T: ActionSource + ?Sized> ActionSource for Box<T> {
	fn path(&self) -> &'static str {
		(**self).path()
	}

	fn decode(&self, frame: &str) -> Result<Inbound> {
		(**self).decode(frame)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn raw() {
		let source = RawMessage;
		assert_eq!(source.decode(r#"{"action":"Play"}"#).unwrap(), Inbound::Action(Action::Play));
		assert_eq!(
			source.decode(r#"{"action":"Wave","confidence":0.9}"#).unwrap(),
			Inbound::Action(Action::from("Wave"))
		);
		assert_eq!(source.decode(r#"{"status":"ok"}"#).unwrap(), Inbound::Ignore);
		assert_eq!(source.decode(r#"{"action":""}"#).unwrap(), Inbound::Ignore);
		assert_eq!(source.decode(r#"{"action":null}"#).unwrap(), Inbound::Ignore);
	}

	#[test]
	fn raw_malformed() {
		let source = RawMessage;
		assert!(matches!(source.decode("Play"), Err(Error::Malformed(_))));
		assert!(matches!(source.decode(r#"{"action":"Pl"#), Err(Error::Malformed(_))));
		assert!(matches!(source.decode(r#"{"action":5}"#), Err(Error::Malformed(_))));

		// Only objects carry an action field.
		assert_eq!(source.decode(r#"["Pause"]"#).unwrap(), Inbound::Ignore);
		assert_eq!(source.decode(r#""Play""#).unwrap(), Inbound::Ignore);
		assert_eq!(source.decode("7").unwrap(), Inbound::Ignore);

		let source = NamedEvent::default();
		assert_eq!(
			source.decode(r#"42["gesture_detected",["Play"]]"#).unwrap(),
			Inbound::Ignore
		);
		assert_eq!(
			source.decode(r#"42["gesture_detected","Play"]"#).unwrap(),
			Inbound::Ignore
		);
		assert!(matches!(
			source.decode(r#"42["gesture_detected",{"action":["Play"]}]"#),
			Err(Error::Malformed(_))
		));
	}

	#[test]
	fn named_event() {
		let source = NamedEvent::default();
		assert_eq!(
			source.decode(r#"42["gesture_detected",{"action":"Rewind"}]"#).unwrap(),
			Inbound::Action(Action::Rewind)
		);
		assert_eq!(
			source.decode(r#"42["status",{"action":"Play"}]"#).unwrap(),
			Inbound::Ignore
		);
		assert_eq!(
			source.decode(r#"42["gesture_detected",{}]"#).unwrap(),
			Inbound::Ignore
		);
	}

	#[test]
	fn named_event_handshake() {
		let source = NamedEvent::default();
		assert_eq!(
			source.decode(r#"0{"sid":"abc","pingInterval":25000}"#).unwrap(),
			Inbound::Reply("40".to_string())
		);
		assert_eq!(source.decode("2").unwrap(), Inbound::Reply("3".to_string()));
		assert_eq!(source.decode(r#"40{"sid":"xyz"}"#).unwrap(), Inbound::Ignore);
		assert_eq!(source.decode("6").unwrap(), Inbound::Ignore);
	}

	#[test]
	fn named_event_malformed() {
		let source = NamedEvent::default();
		assert!(source.decode("").is_err());
		assert!(source.decode("4").is_err());
		assert!(source.decode(r#"42["gesture_detected""#).is_err());
	}

	#[test]
	fn protocol() {
		assert_eq!("raw".parse::<Protocol>().unwrap(), Protocol::Raw);
		assert_eq!("named-event".parse::<Protocol>().unwrap(), Protocol::NamedEvent);
		assert!("sse".parse::<Protocol>().is_err());

		assert_eq!(Protocol::Raw.source().path(), "/ws");
		assert_eq!(Protocol::NamedEvent.to_string(), "named-event");
	}
}
