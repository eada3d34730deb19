use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("gesture error: {0}")]
	Gesture(#[from] gesture::Error),

	#[error("missing element: {0}")]
	Missing(&'static str),

	#[error("invalid protocol: {0}")]
	InvalidProtocol(String),

	#[error("unclassified: {0}")]
	Js(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for JsValue {
	fn from(err: Error) -> JsValue {
		JsValue::from_str(&format!("{}", err))
	}
}

impl From<JsValue> for Error {
	fn from(value: JsValue) -> Self {
		Error::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
	}
}

/// Describe a JS exception as a transport failure.
pub(crate) fn transport_error(value: JsValue) -> gesture::Error {
	gesture::Error::Transport(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
