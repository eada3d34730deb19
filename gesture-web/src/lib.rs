//! Binds the gesture player to the page: the video element, the activity panel and the backend socket.
//!
//! Only built for `wasm32`; on other targets this crate is empty.

#[cfg(target_arch = "wasm32")]
mod error;
#[cfg(target_arch = "wasm32")]
mod page;
#[cfg(target_arch = "wasm32")]
mod socket;
#[cfg(target_arch = "wasm32")]
mod upload;

#[cfg(target_arch = "wasm32")]
pub use error::*;
#[cfg(target_arch = "wasm32")]
pub use page::*;
#[cfg(target_arch = "wasm32")]
pub use socket::*;
#[cfg(target_arch = "wasm32")]
pub use upload::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
	// print pretty errors in wasm https://github.com/rustwasm/console_error_panic_hook
	console_error_panic_hook::set_once();

	let config = wasm_tracing::WasmLayerConfig {
		max_level: tracing::Level::INFO,
		..Default::default()
	};
	wasm_tracing::set_as_global_default_with_config(config).expect("failed to install logger");

	run().map_err(Into::into)
}

#[cfg(target_arch = "wasm32")]
fn run() -> Result<()> {
	use gesture::{runtime, url::Url, ConnectionManager, Endpoint, Session};

	let window = web_sys::window().ok_or(Error::Missing("window"))?;
	let document = window.document().ok_or(Error::Missing("document"))?;

	let href = window.location().href()?;
	let endpoint = Endpoint::new(&Url::parse(&href).map_err(gesture::Error::from)?)?;

	let page = Page::bind(&window, &document)?;
	let protocol = page.protocol()?;

	let (events, mut inbox) = gesture::events();

	page.listen_upload(events.clone(), endpoint.upload()?)?;

	let manager = ConnectionManager::new(WebSocketTransport, protocol.source(), &endpoint, events)?;
	tracing::info!(url = %manager.url(), %protocol, "starting");

	runtime::spawn(async move {
		if let Err(err) = manager.run().await {
			tracing::warn!(%err, "connection manager stopped");
		}
	});

	let mut session = Session::new(page.video(), page.surface());
	runtime::spawn(async move {
		session.run(&mut inbox).await;
	});

	Ok(())
}
