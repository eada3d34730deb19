use gesture::{runtime, upload, url::Url, EventSend, History, Indicators, Player, Protocol, Surface, Toast};
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlInputElement, HtmlVideoElement, Window};

use crate::{Error, HttpUploader, Result};

const VIDEO: &str = "main-video";
const HISTORY: &str = "gesture-history-list";
const CONNECTION: &str = "connection-status";
const CAMERA: &str = "cam-status";
const TOASTS: &str = "toast-container";
const UPLOAD_INPUT: &str = "video-upload";
const UPLOAD_BUTTON: &str = ".upload-btn";

const ACTIVE: &str = "active";

/// The elements the controller drives, looked up once.
#[derive(Clone)]
pub struct Page {
	window: Window,
	document: Document,
	video: HtmlVideoElement,
	history: Element,
	connection: Element,
	camera: Element,
	toasts: Element,
	input: HtmlInputElement,
	button: Option<Element>,
}

impl Page {
	pub fn bind(window: &Window, document: &Document) -> Result<Self> {
		let by_id = |id: &'static str| document.get_element_by_id(id).ok_or(Error::Missing(id));

		Ok(Self {
			window: window.clone(),
			document: document.clone(),
			video: by_id(VIDEO)?.dyn_into().map_err(|_| Error::Missing(VIDEO))?,
			history: by_id(HISTORY)?,
			connection: by_id(CONNECTION)?,
			camera: by_id(CAMERA)?,
			toasts: by_id(TOASTS)?,
			input: by_id(UPLOAD_INPUT)?.dyn_into().map_err(|_| Error::Missing(UPLOAD_INPUT))?,
			button: document.query_selector(UPLOAD_BUTTON)?,
		})
	}

	/// The backend convention, from `<body data-gesture-protocol="...">`, defaulting to raw frames.
	pub fn protocol(&self) -> Result<Protocol> {
		let attribute = self.document.body().and_then(|body| body.get_attribute("data-gesture-protocol"));

		match attribute {
			Some(value) => value.parse().map_err(Error::InvalidProtocol),
			None => Ok(Protocol::default()),
		}
	}

	pub fn video(&self) -> Video {
		Video(self.video.clone())
	}

	pub fn surface(&self) -> Dom {
		Dom { page: self.clone() }
	}

	/// Upload whatever file gets picked, reporting to the session.
	pub fn listen_upload(&self, events: EventSend, url: Url) -> Result<()> {
		let input = self.input.clone();

		let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
			let file = input.files().and_then(|files| files.get(0));
			let events = events.clone();
			let mut uploader = HttpUploader::new(url.clone());

			runtime::spawn(async move {
				if let Err(err) = upload::upload(&events, &mut uploader, file).await {
					tracing::warn!(%err, "upload dropped");
				}
			});
		}) as Box<dyn FnMut(_)>);

		self.input
			.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
		closure.forget(); // Lives as long as the page.

		Ok(())
	}
}

/// The page's `<video>` element.
pub struct Video(HtmlVideoElement);

impl Player for Video {
	fn play(&mut self) {
		match self.0.play() {
			// Autoplay policies reject the promise rather than throwing.
			Ok(promise) => runtime::spawn(async move {
				if let Err(err) = JsFuture::from(promise).await {
					tracing::warn!(?err, "playback refused");
				}
			}),
			Err(err) => tracing::warn!(?err, "failed to play"),
		}
	}

	fn pause(&mut self) {
		if let Err(err) = self.0.pause() {
			tracing::warn!(?err, "failed to pause");
		}
	}

	fn is_paused(&self) -> bool {
		self.0.paused()
	}

	fn volume(&self) -> f64 {
		self.0.volume()
	}

	fn set_volume(&mut self, volume: f64) {
		self.0.set_volume(volume);
	}

	fn current_time(&self) -> f64 {
		self.0.current_time()
	}

	fn set_current_time(&mut self, seconds: f64) {
		self.0.set_current_time(seconds);
	}

	fn set_source(&mut self, url: &str) {
		self.0.set_src(url);
	}
}

/// Renders into the activity panel.
pub struct Dom {
	page: Page,
}

impl Dom {
	fn render_history(&self, history: &History) -> Result<()> {
		let list = &self.page.history;
		list.set_text_content(None);

		for entry in history.iter() {
			let item = self.page.document.create_element("div")?;
			item.set_class_name("history-item");

			let name = self.page.document.create_element("span")?;
			name.set_text_content(Some(entry.action.name()));

			let time = self.page.document.create_element("span")?;
			time.set_attribute("style", "color:var(--text-secondary); font-size: 0.8em;")?;
			time.set_text_content(Some(&entry.time()));

			item.append_child(&name)?;
			item.append_child(&time)?;
			list.append_child(&item)?;
		}

		Ok(())
	}

	fn render_toast(&self, toast: &Toast) -> Result<()> {
		let element = self.page.document.create_element("div")?;
		element.set_class_name("toast");

		let icon = self.page.document.create_element("span")?;
		icon.set_attribute("style", "font-size:1.2em")?;
		icon.set_text_content(Some(toast.icon));

		let message = self.page.document.create_element("span")?;
		message.set_text_content(Some(&toast.message));

		element.append_child(&icon)?;
		element.append_child(&message)?;
		self.page.toasts.append_child(&element)?;

		let remove = Closure::once_into_js(move || element.remove());
		self.page.window.set_timeout_with_callback_and_timeout_and_arguments_0(
			remove.unchecked_ref(),
			runtime::timeout_millis(toast.lifetime()),
		)?;

		Ok(())
	}

	fn render_indicators(&self, indicators: Indicators) -> Result<()> {
		self.page
			.connection
			.class_list()
			.toggle_with_force(ACTIVE, indicators.connection)?;
		self.page.camera.class_list().toggle_with_force(ACTIVE, indicators.camera)?;
		Ok(())
	}
}

impl Surface for Dom {
	fn history(&mut self, history: &History) {
		if let Err(err) = self.render_history(history) {
			tracing::error!(%err, "failed to render history");
		}
	}

	fn toast(&mut self, toast: &Toast) {
		if let Err(err) = self.render_toast(toast) {
			tracing::error!(%err, "failed to render toast");
		}
	}

	fn indicators(&mut self, indicators: Indicators) {
		if let Err(err) = self.render_indicators(indicators) {
			tracing::error!(%err, "failed to render indicators");
		}
	}

	fn uploading(&mut self, busy: bool) {
		let label = if busy { "Uploading..." } else { "Upload Video" };

		if let Some(button) = &self.page.button {
			button.set_text_content(Some(label));
		}
	}

	fn alert(&mut self, message: &str) {
		if let Err(err) = self.page.window.alert_with_message(message) {
			tracing::error!(?err, "failed to alert");
		}
	}
}
