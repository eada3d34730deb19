use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::{Parser, Subcommand};
use gesture::{events, ConnectionManager, Endpoint, EventRecv, MemoryPlayer, Protocol, Session};
use url::Url;

mod log;
mod socket;
mod surface;
mod upload;

use socket::TungsteniteTransport;
use surface::LogSurface;
use upload::HttpUploader;

#[derive(Parser, Clone)]
#[command(version, about)]
pub struct Cli {
	/// Log configuration.
	#[command(flatten)]
	pub log: log::Log,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Clone)]
pub enum Command {
	/// Follow the gesture feed of a page and drive a headless player with it.
	Watch {
		/// The page URL, starting with http:// or https://
		url: Url,

		/// The convention spoken by the backend: raw or named-event.
		#[arg(long, default_value = "raw")]
		protocol: Protocol,

		/// How long to wait before reconnecting.
		#[arg(long, default_value = "2s", value_parser = humantime::parse_duration)]
		retry: Duration,
	},

	/// Upload a video to the page's backend and print where it can be played.
	Upload {
		/// The page URL, starting with http:// or https://
		url: Url,

		/// The video file to upload.
		file: PathBuf,
	},
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	cli.log.init()?;

	match cli.command {
		Command::Watch { url, protocol, retry } => watch(url, protocol, retry).await,
		Command::Upload { url, file } => upload(url, file).await,
	}
}

async fn watch(url: Url, protocol: Protocol, retry: Duration) -> anyhow::Result<()> {
	let endpoint = Endpoint::new(&url).context("invalid page url")?;
	let (tx, mut rx) = events();

	let manager = ConnectionManager::new(TungsteniteTransport, protocol.source(), &endpoint, tx)?.with_retry(retry);
	tracing::info!(url = %manager.url(), %protocol, "watching");

	let mut session = Session::new(MemoryPlayer::default(), LogSurface::new());

	tokio::select! {
		res = manager.run() => res.context("connection failed")?,
		_ = serve(&mut session, &mut rx) => {},
		res = tokio::signal::ctrl_c() => res.context("failed to listen for ctrl-c")?,
	}

	let player = session.player();
	tracing::info!(
		paused = player.paused,
		volume = player.volume,
		position = player.position,
		gestures = session.history().len(),
		"stopped"
	);

	Ok(())
}

// Like Session::run, but also dismisses toasts once they expire.
async fn serve(session: &mut Session<MemoryPlayer, LogSurface>, events: &mut EventRecv) {
	loop {
		let expiry = session.surface().next_expiry();

		tokio::select! {
			event = events.recv() => match event {
				Some(event) => session.handle(event),
				None => return,
			},
			_ = tokio::time::sleep_until(expiry.unwrap_or_else(tokio::time::Instant::now)), if expiry.is_some() => {
				session.surface_mut().expire();
			}
		}
	}
}

async fn upload(url: Url, file: PathBuf) -> anyhow::Result<()> {
	let endpoint = Endpoint::new(&url).context("invalid page url")?;
	let (tx, mut rx) = events();

	let mut uploader = HttpUploader::new(endpoint.upload()?);
	gesture::upload::upload(&tx, &mut uploader, Some(file)).await?;
	drop(tx);

	let mut session = Session::new(MemoryPlayer::default(), LogSurface::new());
	session.run(&mut rx).await;

	if let Some(alert) = session.surface().alerts.last() {
		anyhow::bail!("{}", alert);
	}

	let source = session.player().source.as_deref().context("no source was set")?;
	let media = endpoint.origin().join(source).context("invalid media url")?;
	println!("{}", media);

	Ok(())
}
