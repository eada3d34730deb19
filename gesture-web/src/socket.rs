use gesture::{url::Url, Channel, Error, Result, Transport};
use tokio::sync::mpsc;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use crate::transport_error;

// What the socket callbacks report, in the order the browser fires them.
enum Signal {
	Open,
	Text(String),
	Error,
	Close { code: u16, reason: String },
}

/// Opens channels with the browser's `WebSocket`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSocketTransport;

impl Transport for WebSocketTransport {
	type Channel = WebSocketChannel;

	async fn connect(&mut self, url: &Url) -> Result<WebSocketChannel> {
		let socket = WebSocket::new(url.as_str()).map_err(transport_error)?;
		let (tx, signals) = mpsc::unbounded_channel();

		let onopen = {
			let tx = tx.clone();
			Closure::wrap(Box::new(move |_: web_sys::Event| {
				tx.send(Signal::Open).ok();
			}) as Box<dyn FnMut(_)>)
		};

		let onmessage = {
			let tx = tx.clone();
			Closure::wrap(Box::new(move |event: MessageEvent| match event.data().as_string() {
				Some(text) => {
					tx.send(Signal::Text(text)).ok();
				}
				None => tracing::debug!("ignoring binary frame"),
			}) as Box<dyn FnMut(_)>)
		};

		let onerror = {
			let tx = tx.clone();
			Closure::wrap(Box::new(move |_: web_sys::Event| {
				tx.send(Signal::Error).ok();
			}) as Box<dyn FnMut(_)>)
		};

		let onclose = Closure::wrap(Box::new(move |event: CloseEvent| {
			tx.send(Signal::Close {
				code: event.code(),
				reason: event.reason(),
			})
			.ok();
		}) as Box<dyn FnMut(_)>);

		socket.set_onopen(Some(onopen.as_ref().unchecked_ref()));
		socket.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
		socket.set_onerror(Some(onerror.as_ref().unchecked_ref()));
		socket.set_onclose(Some(onclose.as_ref().unchecked_ref()));

		let mut channel = WebSocketChannel {
			socket,
			signals,
			_onopen: onopen,
			_onmessage: onmessage,
			_onerror: onerror,
			_onclose: onclose,
		};

		// A failed handshake fires error, then close.
		loop {
			let signal = channel.signals.recv().await;
			match signal {
				Some(Signal::Open) => return Ok(channel),
				Some(Signal::Close { code, reason }) => {
					return Err(Error::Transport(format!("closed before open: code={} reason={}", code, reason)))
				}
				Some(Signal::Error) | Some(Signal::Text(_)) => continue,
				None => return Err(Error::Closed),
			}
		}
	}
}

/// An open browser socket; closed when dropped.
pub struct WebSocketChannel {
	socket: WebSocket,
	signals: mpsc::UnboundedReceiver<Signal>,

	// Kept alive for as long as the socket can call them.
	_onopen: Closure<dyn FnMut(web_sys::Event)>,
	_onmessage: Closure<dyn FnMut(MessageEvent)>,
	_onerror: Closure<dyn FnMut(web_sys::Event)>,
	_onclose: Closure<dyn FnMut(CloseEvent)>,
}

impl Channel for WebSocketChannel {
	async fn recv(&mut self) -> Option<Result<String>> {
		loop {
			match self.signals.recv().await? {
				Signal::Text(text) => return Some(Ok(text)),
				Signal::Error => return Some(Err(Error::Transport("websocket error".to_string()))),
				Signal::Close { code, reason } => {
					tracing::debug!(code, %reason, "websocket closed");
					return None;
				}
				Signal::Open => continue,
			}
		}
	}

	async fn send(&mut self, text: &str) -> Result<()> {
		self.socket.send_with_str(text).map_err(transport_error)
	}
}

impl Drop for WebSocketChannel {
	fn drop(&mut self) {
		self.socket.set_onopen(None);
		self.socket.set_onmessage(None);
		self.socket.set_onerror(None);
		self.socket.set_onclose(None);
		self.socket.close().ok();
	}
}
