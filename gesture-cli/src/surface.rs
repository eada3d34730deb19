use gesture::{History, Indicators, Surface, Toast, Toasts};
use tokio::time::Instant;

/// Draws the activity panel as log lines.
#[derive(Debug, Default)]
pub struct LogSurface {
	toasts: Toasts,
	pub indicators: Indicators,
	pub busy: bool,
	pub alerts: Vec<String>,
}

impl LogSurface {
	pub fn new() -> Self {
		Self::default()
	}

	/// When the oldest toast on screen should go.
	pub fn next_expiry(&self) -> Option<Instant> {
		self.toasts.next_expiry().map(Instant::from_std)
	}

	pub fn expire(&mut self) {
		for toast in self.toasts.expire(Instant::now().into_std()) {
			tracing::debug!(message = %toast.message, "toast dismissed");
		}
	}

	pub fn toasts(&self) -> &Toasts {
		&self.toasts
	}
}

impl Surface for LogSurface {
	fn history(&mut self, history: &History) {
		if let Some(entry) = history.latest() {
			tracing::info!(action = %entry.action, time = %entry.time(), len = history.len(), "history");
		}
	}

	fn toast(&mut self, toast: &Toast) {
		tracing::info!("{} {}", toast.icon, toast.message);

		// Timed on the runtime clock, which also drives the dismissal timer.
		self.toasts.push(Toast {
			created: Instant::now().into_std(),
			..toast.clone()
		});
	}

	fn indicators(&mut self, indicators: Indicators) {
		if indicators != self.indicators {
			tracing::info!(connection = indicators.connection, camera = indicators.camera, "indicators");
		}
		self.indicators = indicators;
	}

	fn uploading(&mut self, busy: bool) {
		self.busy = busy;
		tracing::info!("{}", if busy { "Uploading..." } else { "Upload Video" });
	}

	fn alert(&mut self, message: &str) {
		tracing::error!("{}", message);
		self.alerts.push(message.to_string());
	}
}

#[cfg(test)]
mod test {
	use std::time::Duration;

	use gesture::{Action, MemoryPlayer, Session, TOAST_LIFETIME};

	use super::*;

	#[tokio::test(start_paused = true)]
	async fn toasts_expire() {
		let mut session = Session::new(MemoryPlayer::default(), LogSurface::new());
		session.handle(Action::Play.into());

		tokio::time::advance(Duration::from_secs(1)).await;
		session.handle(Action::Pause.into());
		assert_eq!(session.surface().toasts().len(), 2);

		let expiry = session.surface().next_expiry().unwrap();
		tokio::time::sleep_until(expiry).await;
		session.surface_mut().expire();
		assert_eq!(session.surface().toasts().len(), 1);

		tokio::time::advance(Duration::from_secs(1)).await;
		session.surface_mut().expire();
		assert!(session.surface().toasts().is_empty());
		assert!(session.surface().next_expiry().is_none());
		assert!(TOAST_LIFETIME > Duration::from_secs(1));
	}
}
