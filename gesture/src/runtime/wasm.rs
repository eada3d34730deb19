use std::{future::Future, time::Duration};

use tracing::Instrument;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

pub fn spawn<F: Future<Output = ()> + 'static>(f: F) {
	wasm_bindgen_futures::spawn_local(f.in_current_span());
}

/// Resolve after `duration` using the window's `setTimeout`.
///
/// Resolves immediately if the timer can't be scheduled, so callers never hang.
pub async fn sleep(duration: Duration) {
	let promise = js_sys::Promise::new(&mut |resolve, _reject| {
		let Some(window) = web_sys::window() else {
			tracing::error!("no window to schedule a timer on");
			resolve.call0(&JsValue::UNDEFINED).ok();
			return;
		};

		if let Err(err) =
			window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, super::timeout_millis(duration))
		{
			tracing::error!(?err, "failed to schedule timer");
			resolve.call0(&JsValue::UNDEFINED).ok();
		}
	});

	JsFuture::from(promise).await.ok();
}
