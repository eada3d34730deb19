use std::path::PathBuf;

use gesture::{upload::UPLOAD_FIELD, url::Url, Error, Result, UploadResponse, Uploader};
use reqwest::multipart;

/// Posts a file from disk as multipart form data.
pub struct HttpUploader {
	url: Url,
	client: reqwest::Client,
}

impl HttpUploader {
	pub fn new(url: Url) -> Self {
		let client = reqwest::Client::new();
		Self { url, client }
	}
}

impl Uploader for HttpUploader {
	type File = PathBuf;

	async fn upload(&mut self, path: PathBuf) -> Result<UploadResponse> {
		let bytes = tokio::fs::read(&path)
			.await
			.map_err(|err| Error::Upload(format!("{}: {}", path.display(), err)))?;

		let name = path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_else(|| "video".to_string());

		tracing::info!(url = %self.url, %name, size = bytes.len(), "uploading");

		let part = multipart::Part::bytes(bytes).file_name(name);
		let form = multipart::Form::new().part(UPLOAD_FIELD, part);

		// The body is parsed whatever the status; the endpoint reports failures in it.
		let resp = self
			.client
			.post(self.url.clone())
			.multipart(form)
			.send()
			.await
			.map_err(http_error)?;

		resp.json().await.map_err(http_error)
	}
}

fn http_error(err: reqwest::Error) -> Error {
	Error::Upload(err.to_string())
}
