use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Clone, clap::Parser, Debug)]
pub struct Log {
	/// The level filter to use.
	#[arg(id = "log-level", long = "log-level", default_value = "info")]
	pub level: Level,
}

impl Default for Log {
	fn default() -> Self {
		Self { level: Level::INFO }
	}
}

impl Log {
	pub fn level(&self) -> LevelFilter {
		LevelFilter::from_level(self.level)
	}

	pub fn init(&self) -> anyhow::Result<()> {
		let filter = EnvFilter::builder()
			.with_default_directive(self.level().into()) // Default to our --log-level
			.from_env_lossy() // Allow overriding with RUST_LOG
			.add_directive("tungstenite=info".parse()?)
			.add_directive("hyper=info".parse()?)
			.add_directive("reqwest=info".parse()?);

		let logger = tracing_subscriber::FmtSubscriber::builder()
			.with_writer(std::io::stderr)
			.with_env_filter(filter)
			.finish();

		tracing::subscriber::set_global_default(logger)?;
		Ok(())
	}
}
