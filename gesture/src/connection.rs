use std::time::Duration;

use url::Url;

use crate::{runtime, ActionSource, ConnectionState, Error, Event, EventSend, Inbound, Result};

/// The fixed delay between a disconnect and the next attempt.
pub const RETRY_DELAY: Duration = Duration::from_secs(2);

/// The backend addresses, derived from the page origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
	origin: Url,
}

impl Endpoint {
	pub fn new(page: &Url) -> Result<Self> {
		match page.scheme() {
			"http" | "https" => {}
			scheme => return Err(Error::InvalidScheme(scheme.to_string())),
		}

		let mut origin = page.clone();
		origin.set_path("/");
		origin.set_query(None);
		origin.set_fragment(None);

		Ok(Self { origin })
	}

	/// The socket URL for the given path, secure only if the page is.
	pub fn socket(&self, path: &str) -> Result<Url> {
		let mut url = self.origin.join(path)?;

		let scheme = match self.origin.scheme() {
			"https" => "wss",
			_ => "ws",
		};
		url.set_scheme(scheme)
			.map_err(|_| Error::InvalidScheme(scheme.to_string()))?;

		Ok(url)
	}

	pub fn upload(&self) -> Result<Url> {
		Ok(self.origin.join("/upload_video")?)
	}

	pub fn origin(&self) -> &Url {
		&self.origin
	}
}

/// Opens duplex text channels.
#[allow(async_fn_in_trait)]
pub trait Transport {
	type Channel: Channel;

	async fn connect(&mut self, url: &Url) -> Result<Self::Channel>;
}

/// An open channel; it ends when [Channel::recv] returns `None`.
#[allow(async_fn_in_trait)]
pub trait Channel {
	/// The next text frame. Errors are reported without closing the channel.
	async fn recv(&mut self) -> Option<Result<String>>;

	async fn send(&mut self, text: &str) -> Result<()>;
}

/// Keeps a channel to the backend open and publishes what arrives on it.
///
/// A closed channel is never fatal: the manager waits [RETRY_DELAY] and connects again, forever.
/// It only stops once nobody is listening to its events.
pub struct ConnectionManager<T: Transport, S: ActionSource> {
	transport: T,
	source: S,
	url: Url,
	retry: Duration,
	state: ConnectionState,
	events: EventSend,
}

impl<T: Transport, S: ActionSource> ConnectionManager<T, S> {
	pub fn new(transport: T, source: S, endpoint: &Endpoint, events: EventSend) -> Result<Self> {
		let url = endpoint.socket(source.path())?;

		Ok(Self {
			transport,
			source,
			url,
			retry: RETRY_DELAY,
			state: ConnectionState::Disconnected,
			events,
		})
	}

	pub fn with_retry(mut self, retry: Duration) -> Self {
		self.retry = retry;
		self
	}

	pub fn url(&self) -> &Url {
		&self.url
	}

	pub async fn run(mut self) -> Result<()> {
		loop {
			if self.events.is_closed() {
				return Err(Error::Closed);
			}

			tracing::info!(url = %self.url, "connecting");

			match self.transport.connect(&self.url).await {
				Ok(channel) => self.serve(channel).await?,
				Err(err) => tracing::warn!(%err, url = %self.url, "failed to connect"),
			}

			self.set_state(ConnectionState::Disconnected)?;

			tracing::info!(retry = ?self.retry, "disconnected, retrying");
			runtime::sleep(self.retry).await;
		}
	}

	async fn serve(&mut self, mut channel: T::Channel) -> Result<()> {
		tracing::info!(url = %self.url, "connected");
		self.set_state(ConnectionState::Connected)?;

		while let Some(frame) = channel.recv().await {
			let frame = match frame {
				Ok(frame) => frame,
				Err(err) => {
					// The close that follows, if any, tears the channel down.
					tracing::error!(%err, "transport error");
					continue;
				}
			};

			match self.source.decode(&frame) {
				Ok(Inbound::Action(action)) => self.publish(Event::Action(action))?,
				Ok(Inbound::Reply(reply)) => {
					if let Err(err) = channel.send(&reply).await {
						tracing::warn!(%err, "failed to reply");
					}
				}
				Ok(Inbound::Ignore) => tracing::trace!(%frame, "ignored frame"),
				Err(err) => tracing::warn!(%err, %frame, "malformed frame"),
			}
		}

		Ok(())
	}

	fn set_state(&mut self, state: ConnectionState) -> Result<()> {
		if self.state == state {
			return Ok(());
		}

		self.state = state;
		self.publish(Event::Connection(state))
	}

	fn publish(&self, event: Event) -> Result<()> {
		self.events.send(event).map_err(|_| Error::Closed)
	}
}

#[cfg(test)]
mod test {
	use std::{
		collections::VecDeque,
		sync::{Arc, Mutex},
	};

	use tokio::time::Instant;

	use super::*;
	use crate::{events, Action, NamedEvent, RawMessage};

	#[derive(Clone, Default)]
	struct Log {
		attempts: Arc<Mutex<Vec<Instant>>>,
		sent: Arc<Mutex<Vec<String>>>,
	}

	// Each entry is one connection attempt: refused, or accepted with a list of frames.
	struct Scripted {
		script: VecDeque<Option<Vec<Result<String>>>>,
		log: Log,
	}

	struct ScriptedChannel {
		frames: VecDeque<Result<String>>,
		sent: Arc<Mutex<Vec<String>>>,
	}

	impl Transport for Scripted {
		type Channel = ScriptedChannel;

		async fn connect(&mut self, _url: &Url) -> Result<ScriptedChannel> {
			self.log.attempts.lock().unwrap().push(Instant::now());

			match self.script.pop_front() {
				Some(Some(frames)) => Ok(ScriptedChannel {
					frames: frames.into(),
					sent: self.log.sent.clone(),
				}),
				_ => Err(Error::Transport("connection refused".to_string())),
			}
		}
	}

	impl Channel for ScriptedChannel {
		async fn recv(&mut self) -> Option<Result<String>> {
			self.frames.pop_front()
		}

		async fn send(&mut self, text: &str) -> Result<()> {
			self.sent.lock().unwrap().push(text.to_string());
			Ok(())
		}
	}

	fn text(frame: &str) -> Result<String> {
		Ok(frame.to_string())
	}

	fn endpoint() -> Endpoint {
		Endpoint::new(&Url::parse("http://localhost:5000/player?x=1").unwrap()).unwrap()
	}

	// Runs the manager until `count` events were published, then hangs up.
	async fn collect<S: ActionSource>(
		script: Vec<Option<Vec<Result<String>>>>,
		source: S,
		count: usize,
	) -> (Vec<Event>, Log) {
		let log = Log::default();
		let transport = Scripted {
			script: script.into(),
			log: log.clone(),
		};

		let (tx, mut rx) = events();
		let manager = ConnectionManager::new(transport, source, &endpoint(), tx).unwrap();

		let listen = async move {
			let mut events = Vec::new();
			while events.len() < count {
				events.push(rx.recv().await.expect("manager stopped"));
			}
			events
		};

		let (res, events) = tokio::join!(manager.run(), listen);
		assert!(matches!(res, Err(Error::Closed)));

		(events, log)
	}

	fn describe(events: &[Event]) -> Vec<String> {
		events
			.iter()
			.map(|event| match event {
				Event::Connection(state) => format!("{:?}", state),
				Event::Action(action) => action.to_string(),
				other => format!("{:?}", other),
			})
			.collect()
	}

	#[test]
	fn endpoint_urls() {
		let endpoint = endpoint();
		assert_eq!(endpoint.socket("/ws").unwrap().as_str(), "ws://localhost:5000/ws");
		assert_eq!(endpoint.upload().unwrap().as_str(), "http://localhost:5000/upload_video");

		let secure = Endpoint::new(&Url::parse("https://example.com/index.html").unwrap()).unwrap();
		assert_eq!(
			secure.socket(NamedEvent::default().path()).unwrap().as_str(),
			"wss://example.com/socket.io/?EIO=4&transport=websocket"
		);

		let file = Url::parse("file:///tmp/index.html").unwrap();
		assert!(matches!(Endpoint::new(&file), Err(Error::InvalidScheme(_))));
	}

	#[tokio::test(start_paused = true)]
	async fn forwards_actions() {
		let script = vec![Some(vec![
			text(r#"{"action":"Play"}"#),
			text("not json"),
			Err(Error::Transport("hiccup".to_string())),
			text(r#"{"hello":"world"}"#),
			text(r#"{"action":"VolUp"}"#),
		])];

		let (events, _) = collect(script, RawMessage, 4).await;
		assert_eq!(describe(&events), ["Connected", "Play", "VolUp", "Disconnected"]);
	}

	#[tokio::test(start_paused = true)]
	async fn reconnects_at_fixed_interval() {
		let script = vec![
			Some(vec![text(r#"{"action":"Pause"}"#)]),
			None,
			None,
			Some(vec![text(r#"{"action":"Rewind"}"#)]),
		];

		let (events, log) = collect(script, RawMessage, 6).await;
		assert_eq!(
			describe(&events),
			["Connected", "Pause", "Disconnected", "Connected", "Rewind", "Disconnected"]
		);

		let attempts = log.attempts.lock().unwrap();
		assert!(attempts.len() >= 4);
		for pair in attempts.windows(2) {
			assert_eq!(pair[1] - pair[0], RETRY_DELAY);
		}
	}

	#[tokio::test(start_paused = true)]
	async fn refused_stays_disconnected() {
		// Nothing is published until a connection succeeds.
		let script = vec![None, None, None, Some(vec![])];

		let start = Instant::now();
		let (events, _) = collect(script, RawMessage, 2).await;
		assert_eq!(describe(&events), ["Connected", "Disconnected"]);
		assert!(start.elapsed() >= RETRY_DELAY * 3);
	}

	#[tokio::test(start_paused = true)]
	async fn named_event_replies() {
		let script = vec![Some(vec![
			text(r#"0{"sid":"a","pingInterval":25000,"pingTimeout":20000}"#),
			text(r#"40{"sid":"b"}"#),
			text("2"),
			text(r#"42["gesture_detected",{"action":"Forward"}]"#),
		])];

		let (events, log) = collect(script, NamedEvent::default(), 3).await;
		assert_eq!(describe(&events), ["Connected", "Forward", "Disconnected"]);
		assert_eq!(*log.sent.lock().unwrap(), ["40", "3"]);
		assert!(matches!(&events[1], Event::Action(Action::Forward)));
	}
}
