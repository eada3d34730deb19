use std::{future::Future, time::Duration};

use tracing::Instrument;

pub fn spawn<F: Future<Output = ()> + Send + 'static>(f: F) {
	tokio::task::spawn(f.in_current_span());
}

pub async fn sleep(duration: Duration) {
	tokio::time::sleep(duration).await
}
