#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid url: {0}")]
	InvalidUrl(#[from] url::ParseError),

	#[error("invalid scheme: {0}")]
	InvalidScheme(String),

	#[error("malformed payload: {0}")]
	Malformed(#[from] serde_json::Error),

	#[error("transport error: {0}")]
	Transport(String),

	#[error("upload rejected: {}", .0.as_deref().unwrap_or("Unknown error"))]
	Rejected(Option<String>),

	#[error("upload failed: {0}")]
	Upload(String),

	#[error("closed")]
	Closed,
}

pub type Result<T> = std::result::Result<T, Error>;
