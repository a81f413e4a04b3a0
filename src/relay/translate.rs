//! Upstream response translation and the caller-visible response type.

// self
use crate::{_prelude::*, error::DecodeError, http::UpstreamResponse};

/// Status returned to the caller whenever the upstream call succeeds.
pub const SUCCESS_STATUS: u16 = 200;

/// Caller-visible response produced by one relay invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct RelayResponse {
	/// HTTP status code.
	pub status: u16,
	/// JSON body.
	pub body: Value,
}
impl RelayResponse {
	/// Success response carrying the upstream body verbatim.
	pub fn ok(body: Value) -> Self {
		Self { status: SUCCESS_STATUS, body }
	}

	/// Collapses a pipeline result into a response at the boundary.
	pub fn from_result(result: Result<Value>) -> Self {
		match result {
			Ok(body) => Self::ok(body),
			Err(err) => err.into(),
		}
	}
}
impl From<Error> for RelayResponse {
	fn from(err: Error) -> Self {
		Self { status: err.status(), body: err.body() }
	}
}

/// Decodes the upstream body and classifies the status.
///
/// Any 2xx yields the decoded body; other statuses become [`Error::UpstreamRejected`]. A body
/// that is not JSON fails regardless of status.
pub fn translate_upstream(response: UpstreamResponse) -> Result<Value> {
	let mut deserializer = serde_json::Deserializer::from_slice(&response.body);
	let body = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| DecodeError::UpstreamBody { source, status: response.status })?;

	deserializer
		.end()
		.map_err(|source| DecodeError::UpstreamTrailing { source, status: response.status })?;

	if response.is_success() {
		Ok(body)
	} else {
		Err(Error::UpstreamRejected { status: response.status, body })
	}
}
