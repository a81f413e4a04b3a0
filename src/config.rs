//! Process-wide relay configuration.
//!
//! [`RelayConfig`] is assembled once at startup, either from the process environment via
//! [`RelayConfig::from_env`] or from any lookup closure via [`RelayConfig::from_lookup`], and
//! then shared immutably behind an [`Arc`] by every request.
//!
//! Missing OAuth credentials are not rejected here. The signer still produces a header and
//! the upstream API reports the authentication failure, which the relay mirrors to the caller.

pub mod secret;

pub use secret::*;

// std
use std::net::SocketAddr;
// self
use crate::{_prelude::*, error::ConfigError, oauth::Credentials};

/// Upstream endpoint every signed post is forwarded to.
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.twitter.com/2/tweets";
/// Listen address used when `TWEET_RELAY_BIND` is unset.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Environment variable holding the OAuth consumer key.
pub const ENV_CONSUMER_KEY: &str = "TWITTER_API_KEY";
/// Environment variable holding the OAuth consumer secret.
pub const ENV_CONSUMER_SECRET: &str = "TWITTER_API_SECRET";
/// Environment variable holding the OAuth access token.
pub const ENV_ACCESS_TOKEN: &str = "TWITTER_ACCESS_TOKEN";
/// Environment variable holding the OAuth access token secret.
pub const ENV_ACCESS_SECRET: &str = "TWITTER_ACCESS_SECRET";
/// Environment variable holding the webhook shared secret.
pub const ENV_WEBHOOK_SECRET: &str = "WEBHOOK_SECRET";
/// Environment variable overriding the upstream endpoint (staging and tests).
pub const ENV_UPSTREAM_URL: &str = "TWEET_RELAY_UPSTREAM_URL";
/// Environment variable overriding the listen address.
pub const ENV_BIND_ADDRESS: &str = "TWEET_RELAY_BIND";

/// Immutable configuration shared by every relay invocation.
#[derive(Clone, Debug)]
pub struct RelayConfig {
	/// OAuth 1.0a credentials used to sign upstream requests.
	pub credentials: Credentials,
	/// Shared secret callers must present; `None` rejects every request.
	pub webhook_secret: Option<Secret>,
	/// Upstream endpoint receiving the signed post.
	pub upstream_url: Url,
	/// Address the HTTP server listens on.
	pub bind_address: SocketAddr,
}
impl RelayConfig {
	/// Starts a builder seeded with defaults.
	pub fn builder() -> RelayConfigBuilder {
		RelayConfigBuilder::default()
	}

	/// Loads configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Loads configuration through `lookup`, which maps variable names to values.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |name: &str| lookup(name).unwrap_or_default();
		let credentials = Credentials::new(
			read(ENV_CONSUMER_KEY),
			read(ENV_CONSUMER_SECRET),
			read(ENV_ACCESS_TOKEN),
			read(ENV_ACCESS_SECRET),
		);
		let mut builder = Self::builder().credentials(credentials);

		if let Some(secret) = lookup(ENV_WEBHOOK_SECRET) {
			builder = builder.webhook_secret(secret);
		}
		if let Some(url) = lookup(ENV_UPSTREAM_URL) {
			builder = builder.upstream_url(url);
		}
		if let Some(addr) = lookup(ENV_BIND_ADDRESS) {
			builder = builder.bind_address(addr);
		}

		let config = builder.build()?;

		#[cfg(feature = "tracing")]
		{
			let missing = config.credentials.missing_fields();

			if !missing.is_empty() {
				tracing::warn!(?missing, "OAuth credentials are incomplete; upstream will reject posts.");
			}
			if config.webhook_secret.is_none() {
				tracing::warn!("{ENV_WEBHOOK_SECRET} is unset; every request will be rejected.");
			}
		}

		Ok(config)
	}
}

/// Builder for [`RelayConfig`] values.
#[derive(Debug, Default)]
pub struct RelayConfigBuilder {
	/// OAuth 1.0a credentials.
	pub credentials: Credentials,
	/// Optional webhook shared secret.
	pub webhook_secret: Option<Secret>,
	/// Raw upstream URL; defaults to [`DEFAULT_UPSTREAM_URL`].
	pub upstream_url: Option<String>,
	/// Raw bind address; defaults to [`DEFAULT_BIND_ADDRESS`].
	pub bind_address: Option<String>,
}
impl RelayConfigBuilder {
	/// Sets the OAuth credentials.
	pub fn credentials(mut self, credentials: Credentials) -> Self {
		self.credentials = credentials;

		self
	}

	/// Sets the webhook shared secret.
	pub fn webhook_secret(mut self, secret: impl Into<Secret>) -> Self {
		self.webhook_secret = Some(secret.into());

		self
	}

	/// Overrides the upstream endpoint.
	pub fn upstream_url(mut self, url: impl Into<String>) -> Self {
		self.upstream_url = Some(url.into());

		self
	}

	/// Overrides the listen address.
	pub fn bind_address(mut self, addr: impl Into<String>) -> Self {
		self.bind_address = Some(addr.into());

		self
	}

	/// Validates and produces the [`RelayConfig`].
	pub fn build(self) -> Result<RelayConfig, ConfigError> {
		let upstream_raw = self.upstream_url.as_deref().unwrap_or(DEFAULT_UPSTREAM_URL);
		let upstream_url = Url::parse(upstream_raw).map_err(|source| {
			ConfigError::InvalidUpstreamUrl { value: upstream_raw.to_owned(), source }
		})?;
		let bind_raw = self.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS);
		let bind_address = bind_raw.parse::<SocketAddr>().map_err(|source| {
			ConfigError::InvalidBindAddress { value: bind_raw.to_owned(), source }
		})?;

		Ok(RelayConfig {
			credentials: self.credentials,
			webhook_secret: self.webhook_secret,
			upstream_url,
			bind_address,
		})
	}
}
