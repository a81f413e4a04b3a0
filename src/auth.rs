//! Inbound request authentication: method gate and shared-secret check.

// self
use crate::{_prelude::*, config::Secret};

/// Header carrying the webhook shared secret.
pub const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

/// Rejects anything but `POST`, then requires `presented` to equal the configured secret.
///
/// Comparison is plain string equality. An empty header or an unconfigured secret never
/// authenticates.
pub fn authenticate(
	method: &Method,
	presented: Option<&str>,
	expected: Option<&Secret>,
) -> Result<()> {
	if *method != Method::POST {
		return Err(Error::MethodNotAllowed);
	}

	match (presented, expected) {
		(Some(presented), Some(expected))
			if !presented.is_empty() && presented == expected.expose() =>
			Ok(()),
		_ => Err(Error::Unauthorized),
	}
}
