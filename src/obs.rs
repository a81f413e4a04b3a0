//! Optional observability helpers for the relay pipeline.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to run each invocation inside a span named `tweet_relay.relay` and to
//!   log stage failures.
//! - Enable `metrics` to increment the `tweet_relay_stage_total` counter for every
//!   attempt/success/failure, labeled by `stage` + `outcome`.
//! - Enable `server` to get [`init_tracing`], which installs a `tracing-subscriber` formatter.

mod metrics;
mod tracing;

pub use self::metrics::*;
pub use self::tracing::*;

// self
use crate::_prelude::*;

/// Pipeline stages, executed at most once each and in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelayStage {
	/// Method gate and shared-secret check.
	Authenticate,
	/// Body decoding and payload validation.
	Validate,
	/// OAuth 1.0a signature computation.
	Sign,
	/// Upstream HTTP call.
	Call,
	/// Upstream response translation.
	Translate,
}
impl RelayStage {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RelayStage::Authenticate => "authenticate",
			RelayStage::Validate => "validate",
			RelayStage::Sign => "sign",
			RelayStage::Call => "call",
			RelayStage::Translate => "translate",
		}
	}
}
impl Display for RelayStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageOutcome {
	/// Entry to a stage.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure that short-circuits the pipeline.
	Failure,
}
impl StageOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StageOutcome::Attempt => "attempt",
			StageOutcome::Success => "success",
			StageOutcome::Failure => "failure",
		}
	}
}
impl Display for StageOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Installs the global `tracing` subscriber, honoring `RUST_LOG` and defaulting to
/// `tweet_relay=info`.
#[cfg(feature = "server")]
pub fn init_tracing() {
	// crates.io
	use tracing_subscriber::EnvFilter;

	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tweet_relay=info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}
