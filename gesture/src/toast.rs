use std::time::Duration;

use web_time::Instant;

use crate::Action;

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);

/// A short-lived notification for a received action.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
	pub icon: &'static str,
	pub message: String,
	pub created: Instant,
}

impl Toast {
	pub fn new(action: &Action) -> Self {
		Self::at(action, Instant::now())
	}

	pub fn at(action: &Action, created: Instant) -> Self {
		Self {
			icon: action.icon(),
			message: format!("{} Detected", action),
			created,
		}
	}

	pub fn lifetime(&self) -> Duration {
		TOAST_LIFETIME
	}

	pub fn expires_at(&self) -> Instant {
		self.created + TOAST_LIFETIME
	}

	pub fn is_expired(&self, now: Instant) -> bool {
		now >= self.expires_at()
	}
}

/// The toasts currently on screen.
///
/// Each toast expires on its own clock; a burst of actions produces overlapping toasts.
#[derive(Debug, Default)]
pub struct Toasts {
	active: Vec<Toast>,
}

impl Toasts {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, toast: Toast) {
		self.active.push(toast);
	}

	/// Remove and return every toast that has outlived [TOAST_LIFETIME].
	pub fn expire(&mut self, now: Instant) -> Vec<Toast> {
		let (expired, active) = self.active.drain(..).partition(|toast| toast.is_expired(now));
		self.active = active;
		expired
	}

	/// When the next toast is due to disappear.
	pub fn next_expiry(&self) -> Option<Instant> {
		self.active.iter().map(Toast::expires_at).min()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Toast> {
		self.active.iter()
	}

	pub fn len(&self) -> usize {
		self.active.len()
	}

	pub fn is_empty(&self) -> bool {
		self.active.is_empty()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn message() {
		let toast = Toast::new(&Action::VolDown);
		assert_eq!(toast.icon, "🔉");
		assert_eq!(toast.message, "VolDown Detected");

		let toast = Toast::new(&Action::from("Brightness"));
		assert_eq!(toast.icon, "Info");
		assert_eq!(toast.message, "Brightness Detected");
	}

	#[test]
	fn expires_after_lifetime() {
		let start = Instant::now();
		let mut toasts = Toasts::new();
		toasts.push(Toast::at(&Action::Play, start));

		assert!(toasts.expire(start + Duration::from_millis(3999)).is_empty());
		assert_eq!(toasts.len(), 1);

		let expired = toasts.expire(start + TOAST_LIFETIME);
		assert_eq!(expired.len(), 1);
		assert!(toasts.is_empty());
	}

	#[test]
	fn independent_of_later_toasts() {
		let start = Instant::now();
		let mut toasts = Toasts::new();

		// A burst, one every 500ms.
		for i in 0..6 {
			toasts.push(Toast::at(&Action::Forward, start + Duration::from_millis(500 * i)));
		}
		assert_eq!(toasts.next_expiry(), Some(start + TOAST_LIFETIME));

		let expired = toasts.expire(start + Duration::from_millis(4000));
		assert_eq!(expired.len(), 1);
		assert_eq!(expired[0].created, start);

		let expired = toasts.expire(start + Duration::from_millis(5600));
		assert_eq!(expired.len(), 3);
		assert_eq!(toasts.len(), 2);

		assert!(toasts.iter().all(|toast| !toast.is_expired(start + Duration::from_millis(5600))));
		toasts.expire(start + Duration::from_millis(6500));
		assert!(toasts.is_empty());
		assert_eq!(toasts.next_expiry(), None);
	}
}
