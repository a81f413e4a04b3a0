//! `tweet-relay` server binary.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
// self
use tweet_relay::{config::RelayConfig, obs, relay::Relay, server};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	obs::init_tracing();

	let config = RelayConfig::from_env()?;
	let addr = config.bind_address;
	let relay = Arc::new(Relay::new(config)?);

	server::serve(relay, addr).await?;

	Ok(())
}
