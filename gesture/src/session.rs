use crate::{
	upload, ConnectionState, Dispatcher, Event, EventRecv, History, Indicators, Player, Result, Surface, UploadResponse,
};

/// The page's client state, built once at startup.
///
/// The session owns the player and the surface; everything else talks to it through [Event]s,
/// which are handled one at a time and in arrival order.
pub struct Session<P: Player, S: Surface> {
	player: P,
	surface: S,
	dispatcher: Dispatcher,
	state: ConnectionState,
}

impl<P: Player, S: Surface> Session<P, S> {
	pub fn new(player: P, mut surface: S) -> Self {
		let state = ConnectionState::default();
		surface.indicators(state.into());

		Self {
			player,
			surface,
			dispatcher: Dispatcher::new(),
			state,
		}
	}

	pub fn handle(&mut self, event: Event) {
		match event {
			Event::Connection(state) => {
				tracing::debug!(?state, "connection");
				self.state = state;
				self.surface.indicators(Indicators::from(state));
			}
			Event::Action(action) => self.dispatcher.dispatch(action, &mut self.player, &mut self.surface),
			Event::UploadStarted => self.surface.uploading(true),
			Event::UploadFinished(res) => self.uploaded(res),
		}
	}

	fn uploaded(&mut self, res: Result<UploadResponse>) {
		// Restored first so no exit path leaves the button busy.
		self.surface.uploading(false);

		match res.and_then(UploadResponse::into_url) {
			Ok(url) => {
				tracing::info!(%url, "uploaded");
				self.player.set_source(&url);
				self.player.play();
			}
			Err(err) => {
				tracing::warn!(%err, "upload rejected");
				self.surface.alert(&upload::alert_message(&err));
			}
		}
	}

	/// Handle events until every sender is gone.
	pub async fn run(&mut self, events: &mut EventRecv) {
		while let Some(event) = events.recv().await {
			self.handle(event);
		}
	}

	pub fn state(&self) -> ConnectionState {
		self.state
	}

	pub fn history(&self) -> &History {
		self.dispatcher.history()
	}

	pub fn player(&self) -> &P {
		&self.player
	}

	pub fn surface(&self) -> &S {
		&self.surface
	}

	pub fn surface_mut(&mut self) -> &mut S {
		&mut self.surface
	}
}
