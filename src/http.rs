//! Transport seam for the single upstream call.
//!
//! [`UpstreamHttpClient`] is the relay's only dependency on an HTTP stack. The crate ships
//! [`ReqwestHttpClient`]; tests and alternative stacks implement the trait directly. A
//! transport issues exactly one request per call and never retries.

// std
use std::ops::Deref;
// crates.io
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
// self
use crate::{_prelude::*, error::ConfigError};

/// Content type of every upstream request body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Boxed future returned by [`UpstreamHttpClient::post`].
pub type UpstreamFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<UpstreamResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports able to deliver one signed JSON `POST`.
///
/// Implementations must be `Send + Sync + 'static` so one instance can serve concurrent
/// invocations behind an [`Arc`], and the futures they return must be `Send`.
pub trait UpstreamHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and resolves once the full response body has been read.
	///
	/// Non-success statuses are responses, not errors; only failures to obtain a response
	/// surface as [`Self::TransportError`].
	fn post(&self, request: UpstreamRequest) -> UpstreamFuture<'_, Self::TransportError>;
}

/// Fully prepared upstream request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamRequest {
	/// Target endpoint.
	pub url: Url,
	/// Rendered `Authorization` header value.
	pub authorization: String,
	/// JSON-encoded body.
	pub body: Vec<u8>,
}

/// Raw upstream response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamResponse {
	/// HTTP status code.
	pub status: u16,
	/// Undecoded response body.
	pub body: Vec<u8>,
}
impl UpstreamResponse {
	/// Whether the status is in the 2xx range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client identifying itself with this crate's user agent.
	pub fn build() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
			.build()
			.map_err(ConfigError::http_client_build)?;

		Ok(Self(client))
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl UpstreamHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn post(&self, request: UpstreamRequest) -> UpstreamFuture<'_, Self::TransportError> {
		Box::pin(async move {
			let response = self
				.0
				.post(request.url)
				.header(AUTHORIZATION, request.authorization)
				.header(CONTENT_TYPE, JSON_CONTENT_TYPE)
				.body(request.body)
				.send()
				.await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(UpstreamResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn success_covers_the_2xx_range() {
		let response = |status| UpstreamResponse { status, body: Vec::new() };

		assert!(response(200).is_success());
		assert!(response(201).is_success());
		assert!(response(299).is_success());
		assert!(!response(199).is_success());
		assert!(!response(301).is_success());
		assert!(!response(403).is_success());
	}

	#[test]
	fn build_produces_a_client() {
		assert!(ReqwestHttpClient::build().is_ok());
	}
}
