//! Fixtures shared by the integration tests.

#![allow(dead_code)]

// crates.io
use httpmock::MockServer;
// self
use tweet_relay::{
	config::RelayConfig,
	oauth::Credentials,
	relay::{Relay, ReqwestRelay},
};

pub const WEBHOOK_SECRET: &str = "it-webhook-secret";
pub const TWEETS_PATH: &str = "/2/tweets";

/// Configuration pointing the relay at `upstream_url` with fixed test credentials.
pub fn config_for(upstream_url: &str) -> RelayConfig {
	RelayConfig::builder()
		.credentials(Credentials::new(
			"it-consumer-key",
			"it-consumer-secret",
			"it-access-token",
			"it-access-secret",
		))
		.webhook_secret(WEBHOOK_SECRET)
		.upstream_url(upstream_url)
		.bind_address("127.0.0.1:0")
		.build()
		.expect("Integration test configuration should build.")
}

/// Reqwest-backed relay forwarding to the mock server's tweets endpoint.
pub fn relay_for(server: &MockServer) -> ReqwestRelay {
	Relay::new(config_for(&server.url(TWEETS_PATH))).expect("Relay should build for tests.")
}

/// URL on a loopback port nothing listens on.
pub fn unreachable_url() -> String {
	let listener = std::net::TcpListener::bind("127.0.0.1:0")
		.expect("Binding an ephemeral port should succeed.");
	let port = listener.local_addr().expect("Bound listener should have an address.").port();

	drop(listener);

	format!("http://127.0.0.1:{port}{TWEETS_PATH}")
}
