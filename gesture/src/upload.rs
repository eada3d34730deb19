//! Posting a video file and reacting to the result.
//!
//! The request itself happens behind [Uploader]. Its outcome reaches the [crate::Session] as
//! [Event::UploadFinished], which restores the button and then either plays the new source or
//! raises an alert.

use serde::{Deserialize, Serialize};

use crate::{Error, Event, EventSend, Result};

/// The multipart field holding the file.
pub const UPLOAD_FIELD: &str = "video";

/// The JSON body returned by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
	pub status: String,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub filename: Option<String>,
}

impl UploadResponse {
	pub fn is_success(&self) -> bool {
		self.status == "success"
	}

	/// The media URL to play, or why there isn't one.
	pub fn into_url(self) -> Result<String> {
		match (self.is_success(), self.url) {
			(true, Some(url)) => Ok(url),
			(true, None) => Err(Error::Rejected(Some("missing url".to_string()))),
			(false, _) => Err(Error::Rejected(self.message)),
		}
	}
}

/// Sends one file to the upload endpoint and parses the reply.
#[allow(async_fn_in_trait)]
pub trait Uploader {
	type File;

	async fn upload(&mut self, file: Self::File) -> Result<UploadResponse>;
}

/// The text of the alert shown when an upload fails.
pub fn alert_message(err: &Error) -> String {
	match err {
		Error::Rejected(message) => {
			format!("Upload failed: {}", message.as_deref().unwrap_or("Unknown error"))
		}
		_ => "Upload failed".to_string(),
	}
}

/// Upload the selected file, if any, reporting progress to the session.
///
/// A missing file does nothing. There is no retry and no way to cancel.
pub async fn upload<U: Uploader>(events: &EventSend, uploader: &mut U, file: Option<U::File>) -> Result<()> {
	let Some(file) = file else {
		return Ok(());
	};

	events.send(Event::UploadStarted).map_err(|_| Error::Closed)?;

	let res = uploader.upload(file).await;
	if let Err(err) = &res {
		tracing::error!(%err, "upload failed");
	}

	events.send(Event::UploadFinished(res)).map_err(|_| Error::Closed)
}
