use crate::Action;

/// Volume change applied by [Action::VolUp] and [Action::VolDown].
pub const VOLUME_STEP: f64 = 0.1;

/// Seconds skipped by [Action::Forward] and [Action::Rewind].
pub const SEEK_STEP: f64 = 10.0;

/// The subset of a media element that gestures can drive.
///
/// Volume is in the range 0.0 to 1.0 and positions are in seconds, matching `HTMLMediaElement`.
pub trait Player {
	fn play(&mut self);
	fn pause(&mut self);
	fn is_paused(&self) -> bool;

	fn volume(&self) -> f64;
	fn set_volume(&mut self, volume: f64);

	fn current_time(&self) -> f64;
	fn set_current_time(&mut self, seconds: f64);

	fn set_source(&mut self, url: &str);
}

/// Apply the playback effect of an action.
///
/// Volume snaps to the boundary once it is within a step of it, instead of clamping the sum.
/// Seeks are not bounds checked; the player decides what an out of range position means.
pub fn apply<P: Player + ?Sized>(player: &mut P, action: &Action) {
	match action {
		Action::Play => player.play(),
		Action::Pause => player.pause(),
		Action::VolUp => {
			let volume = player.volume();
			if volume < 0.9 {
				player.set_volume(volume + VOLUME_STEP);
			} else {
				player.set_volume(1.0);
			}
		}
		Action::VolDown => {
			let volume = player.volume();
			if volume > 0.1 {
				player.set_volume(volume - VOLUME_STEP);
			} else {
				player.set_volume(0.0);
			}
		}
		Action::Forward => player.set_current_time(player.current_time() + SEEK_STEP),
		Action::Rewind => player.set_current_time(player.current_time() - SEEK_STEP),
		Action::Unknown(name) => tracing::debug!(%name, "no playback effect"),
	}
}

/// A player without any media attached, used for headless control.
///
/// Like a media element, it clamps the position at zero and the volume to 0.0..=1.0.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryPlayer {
	pub paused: bool,
	pub volume: f64,
	pub position: f64,
	pub source: Option<String>,
}

impl Default for MemoryPlayer {
	fn default() -> Self {
		Self {
			paused: true,
			volume: 1.0,
			position: 0.0,
			source: None,
		}
	}
}

impl Player for MemoryPlayer {
	fn play(&mut self) {
		self.paused = false;
	}

	fn pause(&mut self) {
		self.paused = true;
	}

	fn is_paused(&self) -> bool {
		self.paused
	}

	fn volume(&self) -> f64 {
		self.volume
	}

	fn set_volume(&mut self, volume: f64) {
		self.volume = volume.clamp(0.0, 1.0);
	}

	fn current_time(&self) -> f64 {
		self.position
	}

	fn set_current_time(&mut self, seconds: f64) {
		self.position = seconds.max(0.0);
	}

	fn set_source(&mut self, url: &str) {
		self.source = Some(url.to_string());
		self.position = 0.0;
	}
}
