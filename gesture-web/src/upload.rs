use gesture::{upload::UPLOAD_FIELD, url::Url, Error, Result, UploadResponse, Uploader};
use web_sys::{File, FormData};

use crate::transport_error;

/// Posts the picked file as multipart form data.
pub struct HttpUploader {
	url: Url,
}

impl HttpUploader {
	pub fn new(url: Url) -> Self {
		Self { url }
	}
}

impl Uploader for HttpUploader {
	type File = File;

	async fn upload(&mut self, file: File) -> Result<UploadResponse> {
		tracing::info!(url = %self.url, name = %file.name(), size = file.size(), "uploading");

		let form = FormData::new().map_err(transport_error)?;
		form.append_with_blob_and_filename(UPLOAD_FIELD, &file, &file.name())
			.map_err(transport_error)?;

		let resp = gloo_net::http::Request::post(self.url.as_str())
			.body(form)
			.map_err(http_error)?
			.send()
			.await
			.map_err(http_error)?;

		resp.json().await.map_err(http_error)
	}
}

fn http_error(err: gloo_net::Error) -> Error {
	Error::Upload(err.to_string())
}
