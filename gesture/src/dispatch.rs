use crate::{player, Action, History, Indicators, Player, Toast};

/// Where the dispatcher and session draw things.
pub trait Surface {
	/// The history changed; the newest entry is first.
	fn history(&mut self, history: &History);

	/// Show a toast and remove it once [Toast::lifetime] has passed.
	fn toast(&mut self, toast: &Toast);

	fn indicators(&mut self, indicators: Indicators);

	/// Swap the upload button between its idle and busy labels.
	fn uploading(&mut self, busy: bool);

	/// A blocking, user facing error.
	fn alert(&mut self, message: &str);
}

/// Turns each action into a history entry, a toast and a playback change, in that order.
#[derive(Debug, Default)]
pub struct Dispatcher {
	history: History,
}

impl Dispatcher {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn dispatch<P: Player + ?Sized, S: Surface + ?Sized>(&mut self, action: Action, player: &mut P, surface: &mut S) {
		tracing::info!(%action, "gesture");

		if let Some(evicted) = self.history.push(action.clone()) {
			tracing::trace!(action = %evicted.action, "history evicted");
		}
		surface.history(&self.history);

		surface.toast(&Toast::new(&action));

		player::apply(player, &action);
	}

	pub fn history(&self) -> &History {
		&self.history
	}
}
