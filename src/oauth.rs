//! OAuth 1.0a request signing (HMAC-SHA1).
//!
//! `encode` implements the RFC 5849 canonicalization steps (percent-encoding, parameter
//! normalization, base string). `signer` assembles the protocol parameters, computes the
//! signature, and renders the `Authorization` header. Every call draws a fresh nonce and
//! timestamp; nothing is cached across requests.

pub mod encode;
pub mod signer;

pub use signer::*;

// self
use crate::config::Secret;

/// Consumer and access-token credentials used to sign requests.
#[derive(Clone, Debug, Default)]
pub struct Credentials {
	/// Consumer (API) key.
	pub consumer_key: String,
	/// Consumer (API) secret.
	pub consumer_secret: Secret,
	/// Access token.
	pub token: String,
	/// Access token secret.
	pub token_secret: Secret,
}
impl Credentials {
	/// Bundles the four OAuth 1.0a credential strings.
	pub fn new(
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<Secret>,
		token: impl Into<String>,
		token_secret: impl Into<Secret>,
	) -> Self {
		Self {
			consumer_key: consumer_key.into(),
			consumer_secret: consumer_secret.into(),
			token: token.into(),
			token_secret: token_secret.into(),
		}
	}

	/// Names of the credential fields that are empty.
	pub fn missing_fields(&self) -> Vec<&'static str> {
		[
			("consumer_key", self.consumer_key.is_empty()),
			("consumer_secret", self.consumer_secret.is_empty()),
			("token", self.token.is_empty()),
			("token_secret", self.token_secret.is_empty()),
		]
		.into_iter()
		.filter_map(|(name, missing)| missing.then_some(name))
		.collect()
	}
}
