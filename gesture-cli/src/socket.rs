use futures::{SinkExt, StreamExt};
use gesture::{url::Url, Channel, Error, Result, Transport};
use tokio::net::TcpStream;
use tokio_tungstenite::{tungstenite::Message, MaybeTlsStream, WebSocketStream};

/// Opens channels with `tokio-tungstenite`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TungsteniteTransport;

impl Transport for TungsteniteTransport {
	type Channel = TungsteniteChannel;

	async fn connect(&mut self, url: &Url) -> Result<TungsteniteChannel> {
		let (stream, response) = tokio_tungstenite::connect_async(url.as_str())
			.await
			.map_err(ws_error)?;
		tracing::debug!(status = %response.status(), "websocket upgraded");

		Ok(TungsteniteChannel { stream, failed: false })
	}
}

pub struct TungsteniteChannel {
	stream: WebSocketStream<MaybeTlsStream<TcpStream>>,

	// A stream error is reported once; the channel counts as closed afterwards.
	failed: bool,
}

impl Channel for TungsteniteChannel {
	async fn recv(&mut self) -> Option<Result<String>> {
		if self.failed {
			return None;
		}

		loop {
			let message = match self.stream.next().await? {
				Ok(message) => message,
				Err(err) => {
					self.failed = true;
					return Some(Err(ws_error(err)));
				}
			};

			match message {
				Message::Text(text) => return Some(Ok(text)),
				Message::Close(frame) => {
					tracing::debug!(?frame, "websocket closed");
					return None;
				}
				// Pings are answered by tungstenite itself.
				other => tracing::trace!(?other, "ignoring frame"),
			}
		}
	}

	async fn send(&mut self, text: &str) -> Result<()> {
		self.stream
			.send(Message::Text(text.to_string()))
			.await
			.map_err(ws_error)
	}
}

fn ws_error(err: tokio_tungstenite::tungstenite::Error) -> Error {
	Error::Transport(err.to_string())
}
