use std::collections::VecDeque;

use chrono::{DateTime, Local};

use crate::Action;

/// The number of entries kept before the oldest is evicted.
pub const HISTORY_CAPACITY: usize = 20;

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
	pub action: Action,
	pub timestamp: DateTime<Local>,
}

impl HistoryEntry {
	pub fn new(action: Action) -> Self {
		Self {
			action,
			timestamp: Local::now(),
		}
	}

	/// The receipt time as shown next to the action.
	pub fn time(&self) -> String {
		self.timestamp.format("%H:%M:%S").to_string()
	}
}

/// A bounded log of received actions, most recent first.
#[derive(Clone, Debug, Default)]
pub struct History {
	entries: VecDeque<HistoryEntry>,
}

impl History {
	pub fn new() -> Self {
		Self::default()
	}

	/// Record an action at the current time, returning the entry evicted to make room.
	pub fn push(&mut self, action: Action) -> Option<HistoryEntry> {
		self.insert(HistoryEntry::new(action))
	}

	pub fn insert(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
		self.entries.push_front(entry);

		if self.entries.len() > HISTORY_CAPACITY {
			return self.entries.pop_back();
		}

		None
	}

	pub fn latest(&self) -> Option<&HistoryEntry> {
		self.entries.front()
	}

	pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn action(i: usize) -> Action {
		Action::KNOWN[i % Action::KNOWN.len()].clone()
	}

	#[test]
	fn most_recent_first() {
		let mut history = History::new();
		assert!(history.latest().is_none());

		history.push(Action::Play);
		history.push(Action::VolUp);
		history.push(Action::from("Wave"));

		let names: Vec<_> = history.iter().map(|entry| entry.action.name().to_string()).collect();
		assert_eq!(names, ["Wave", "VolUp", "Play"]);
		assert_eq!(history.latest().unwrap().action, Action::from("Wave"));
	}

	#[test]
	fn capped() {
		for n in [0, 1, 19, 20, 21, 45] {
			let mut history = History::new();
			let mut evicted = Vec::new();

			for i in 0..n {
				evicted.extend(history.push(action(i)));
			}

			assert_eq!(history.len(), n.min(HISTORY_CAPACITY));
			assert_eq!(evicted.len(), n.saturating_sub(HISTORY_CAPACITY));

			// The newest N, newest first.
			let expected: Vec<_> = (0..n).rev().take(HISTORY_CAPACITY).map(action).collect();
			let actual: Vec<_> = history.iter().map(|entry| entry.action.clone()).collect();
			assert_eq!(actual, expected);
		}
	}

	#[test]
	fn evicts_oldest() {
		let mut history = History::new();
		for _ in 0..HISTORY_CAPACITY {
			assert!(history.push(Action::Pause).is_none());
		}

		history.insert(HistoryEntry::new(Action::Play));
		let evicted = history.push(Action::Rewind).expect("expected eviction");
		assert_eq!(evicted.action, Action::Pause);
		assert_eq!(history.iter().nth(1).unwrap().action, Action::Play);
	}

	#[test]
	fn time_format() {
		let entry = HistoryEntry::new(Action::Play);
		let time = entry.time();
		assert_eq!(time.len(), 8);
		assert_eq!(time.matches(':').count(), 2);
	}
}
