// self
use crate::{_prelude::*, error::Error, obs::RelayStage};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRelay<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRelay<F> = F;

/// Span wrapping one relay invocation.
#[derive(Clone, Debug)]
pub struct RelaySpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RelaySpan {
	/// Creates a new span tagged with the inbound method.
	pub fn new(method: &Method) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("tweet_relay.relay", method = %method);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = method;

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRelay<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs a stage failure: caller mistakes at `warn`, everything else at `error`.
pub fn log_stage_failure(stage: RelayStage, err: &Error) {
	#[cfg(feature = "tracing")]
	{
		if err.is_client_error() {
			tracing::warn!(stage = stage.as_str(), status = err.status(), "{err}");
		} else {
			tracing::error!(stage = stage.as_str(), status = err.status(), "{err}");
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (stage, err);
	}
}
