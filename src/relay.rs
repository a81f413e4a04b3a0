//! The signed post forwarder.
//!
//! [`Relay`] owns the shared configuration, the OAuth signer, and the upstream transport.
//! Each call to [`Relay::handle`] runs `authenticate -> validate -> sign -> call -> translate`
//! once, short-circuiting at the first failing stage, and converts the outcome into a
//! [`RelayResponse`] only at the end. Invocations share nothing mutable, so one relay serves
//! any number of concurrent requests.

pub mod translate;

pub use translate::*;

// self
use crate::{
	_prelude::*,
	auth,
	config::RelayConfig,
	error::TransportError,
	http::{ReqwestHttpClient, UpstreamHttpClient, UpstreamRequest, UpstreamResponse},
	oauth::{Authorization, Signer},
	obs::{self, RelaySpan, RelayStage, StageOutcome},
	payload::{self, InboundBody, OutboundPayload},
};

/// Relay specialized for the crate's default reqwest transport.
pub type ReqwestRelay = Relay<ReqwestHttpClient>;

/// Inbound request after the hosting layer has extracted what the pipeline needs.
#[derive(Clone, Debug, PartialEq)]
pub struct InboundRequest {
	/// HTTP method.
	pub method: Method,
	/// Value of the `x-webhook-secret` header, if present and valid UTF-8.
	pub webhook_secret: Option<String>,
	/// Request body.
	pub body: InboundBody,
}
impl InboundRequest {
	/// Bundles the parts of an inbound request.
	pub fn new(
		method: Method,
		webhook_secret: Option<String>,
		body: impl Into<InboundBody>,
	) -> Self {
		Self { method, webhook_secret, body: body.into() }
	}
}

/// Forwards authenticated webhook posts to the upstream API.
#[derive(Clone)]
pub struct Relay<C>
where
	C: ?Sized + UpstreamHttpClient,
{
	/// Transport used for the upstream call.
	pub http_client: Arc<C>,
	/// Immutable process-wide configuration.
	pub config: Arc<RelayConfig>,
	signer: Signer,
}
impl<C> Relay<C>
where
	C: ?Sized + UpstreamHttpClient,
{
	/// Creates a relay over a caller-provided transport.
	pub fn with_http_client(
		config: impl Into<Arc<RelayConfig>>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		let config = config.into();
		let signer = Signer::new(config.credentials.clone());

		Self { http_client: http_client.into(), config, signer }
	}

	/// Runs the pipeline and always produces a caller-visible response.
	pub async fn handle(&self, request: InboundRequest) -> RelayResponse {
		RelayResponse::from_result(self.forward(request).await)
	}

	/// Runs the pipeline, returning the upstream body on success.
	pub async fn forward(&self, request: InboundRequest) -> Result<Value> {
		let span = RelaySpan::new(&request.method);

		span.instrument(async move {
			let InboundRequest { method, webhook_secret, body } = request;

			run_stage(RelayStage::Authenticate, || {
				auth::authenticate(
					&method,
					webhook_secret.as_deref(),
					self.config.webhook_secret.as_ref(),
				)
			})?;

			let payload = run_stage(RelayStage::Validate, || payload::validate(body))?;
			let authorization = run_stage(RelayStage::Sign, || {
				Ok(self.signer.authorize(&Method::POST, &self.config.upstream_url))
			})?;

			obs::record_stage_outcome(RelayStage::Call, StageOutcome::Attempt);

			let response = observe(RelayStage::Call, self.call(&payload, &authorization).await)?;

			#[cfg(feature = "tracing")]
			tracing::info!(status = response.status, "Upstream responded.");

			run_stage(RelayStage::Translate, || translate::translate_upstream(response))
		})
		.await
	}

	async fn call(
		&self,
		payload: &OutboundPayload,
		authorization: &Authorization,
	) -> Result<UpstreamResponse> {
		let request = UpstreamRequest {
			url: self.config.upstream_url.clone(),
			authorization: authorization.header_value(),
			body: payload.to_json_bytes()?,
		};

		self.http_client.post(request).await.map_err(|e| TransportError::network(e).into())
	}
}
impl Relay<ReqwestHttpClient> {
	/// Creates a relay that provisions its own reqwest transport.
	pub fn new(config: impl Into<Arc<RelayConfig>>) -> Result<Self> {
		Ok(Self::with_http_client(config, ReqwestHttpClient::build()?))
	}
}
impl<C> Debug for Relay<C>
where
	C: ?Sized + UpstreamHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Relay")
			.field("upstream_url", &self.config.upstream_url.as_str())
			.field("webhook_secret_set", &self.config.webhook_secret.is_some())
			.finish()
	}
}

fn run_stage<T>(stage: RelayStage, f: impl FnOnce() -> Result<T>) -> Result<T> {
	obs::record_stage_outcome(stage, StageOutcome::Attempt);

	observe(stage, f())
}

fn observe<T>(stage: RelayStage, result: Result<T>) -> Result<T> {
	match &result {
		Ok(_) => obs::record_stage_outcome(stage, StageOutcome::Success),
		Err(err) => {
			obs::record_stage_outcome(stage, StageOutcome::Failure);
			obs::log_stage_failure(stage, err);
		},
	}

	result
}
