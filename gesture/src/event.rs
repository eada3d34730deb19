use tokio::sync::mpsc;

use crate::{Action, Result, UploadResponse};

/// Whether the channel to the backend is up.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum ConnectionState {
	#[default]
	Disconnected,
	Connected,
}

/// The two status lights, projected from [ConnectionState].
///
/// The camera light only reflects the channel; the client has no way to see the camera itself.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Indicators {
	pub connection: bool,
	pub camera: bool,
}

impl From<ConnectionState> for Indicators {
	fn from(state: ConnectionState) -> Self {
		let active = state == ConnectionState::Connected;
		Self {
			connection: active,
			camera: active,
		}
	}
}

/// Everything a [crate::Session] reacts to, in arrival order.
#[derive(Debug)]
pub enum Event {
	Connection(ConnectionState),
	Action(Action),
	UploadStarted,
	UploadFinished(Result<UploadResponse>),
}

impl From<ConnectionState> for Event {
	fn from(state: ConnectionState) -> Self {
		Event::Connection(state)
	}
}

impl From<Action> for Event {
	fn from(action: Action) -> Self {
		Event::Action(action)
	}
}

pub type EventSend = mpsc::UnboundedSender<Event>;
pub type EventRecv = mpsc::UnboundedReceiver<Event>;

pub fn events() -> (EventSend, EventRecv) {
	mpsc::unbounded_channel()
}
