//! Relay-level error types shared across the pipeline stages.

// crates.io
use serde_json::json;
// self
use crate::_prelude::*;

/// Relay-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical relay error; every variant maps to exactly one HTTP response.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Inbound request used a method other than `POST`.
	#[error("Method not allowed")]
	MethodNotAllowed,
	/// Shared-secret header was missing or did not match.
	#[error("Unauthorized")]
	Unauthorized,
	/// Payload carried no usable `text`.
	#[error("Missing text")]
	MissingText,
	/// Upstream answered with a non-success status.
	#[error("Upstream rejected the request with status {status}.")]
	UpstreamRejected {
		/// HTTP status returned by the upstream API.
		status: u16,
		/// Decoded upstream response body.
		body: Value,
	},

	/// JSON decoding failure (inbound body or upstream response).
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}
impl Error {
	/// HTTP status the caller sees for this error.
	pub fn status(&self) -> u16 {
		match self {
			Self::MethodNotAllowed => 405,
			Self::Unauthorized => 401,
			Self::MissingText => 400,
			Self::UpstreamRejected { status, .. } => *status,
			Self::Decode(_) | Self::Transport(_) | Self::Config(_) => 500,
		}
	}

	/// JSON body the caller sees for this error, always shaped as `{ "error": ... }`.
	pub fn body(&self) -> Value {
		match self {
			Self::UpstreamRejected { body, .. } => json!({ "error": body }),
			other => json!({ "error": other.to_string() }),
		}
	}

	/// Whether the failure was caused by the caller rather than the relay or upstream.
	pub fn is_client_error(&self) -> bool {
		matches!(self, Self::MethodNotAllowed | Self::Unauthorized | Self::MissingText)
	}
}

/// JSON decoding failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Inbound body is not valid JSON.
	#[error("Request body is not valid JSON: {source}.")]
	InboundBody {
		/// Path-aware parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Inbound body has content after the JSON document.
	#[error("Request body is not valid JSON: {0}.")]
	InboundTrailing(#[source] serde_json::Error),
	/// Inbound body text parsed to a JSON `null`.
	#[error("Request body is `null`; expected a JSON object.")]
	InboundNull,
	/// Upstream responded with a body that is not valid JSON.
	#[error("Upstream returned malformed JSON (status {status}): {source}.")]
	UpstreamBody {
		/// Path-aware parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status attached to the malformed body.
		status: u16,
	},
	/// Upstream body has content after the JSON document.
	#[error("Upstream returned malformed JSON (status {status}): {source}.")]
	UpstreamTrailing {
		/// Trailing-content failure.
		#[source]
		source: serde_json::Error,
		/// HTTP status attached to the malformed body.
		status: u16,
	},
	/// Outbound payload could not be serialized.
	#[error("Outbound payload could not be encoded: {0}.")]
	OutboundPayload(#[source] serde_json::Error),
}

/// Transport-level failures while calling the upstream API.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the upstream endpoint: {source}.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Configuration and setup failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Upstream URL cannot be parsed.
	#[error("Upstream URL `{value}` is invalid.")]
	InvalidUpstreamUrl {
		/// Raw configured value.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Bind address cannot be parsed.
	#[error("Bind address `{value}` is invalid.")]
	InvalidBindAddress {
		/// Raw configured value.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: std::net::AddrParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
