//! axum adapter exposing the relay over HTTP.
//!
//! The single route accepts every method so that non-`POST` requests receive the relay's own
//! JSON 405 body instead of a framework default.

// std
use std::net::SocketAddr;
// crates.io
use axum::{
	Json, Router,
	body::Bytes,
	extract::State,
	http::{HeaderMap, StatusCode},
	response::{IntoResponse, Response},
	routing::any,
};
use tokio::net::TcpListener;
// self
use crate::{
	_prelude::*,
	auth::WEBHOOK_SECRET_HEADER,
	http::UpstreamHttpClient,
	payload::InboundBody,
	relay::{InboundRequest, Relay, RelayResponse},
};

/// Path the relay is mounted on.
pub const RELAY_PATH: &str = "/api/tweet";

/// Builds the router serving [`RELAY_PATH`].
pub fn router<C>(relay: Arc<Relay<C>>) -> Router
where
	C: UpstreamHttpClient,
{
	Router::new().route(RELAY_PATH, any(relay_webhook::<C>)).with_state(relay)
}

/// Serves the relay on an already bound listener until Ctrl-C.
pub async fn serve_listener<C>(relay: Arc<Relay<C>>, listener: TcpListener) -> std::io::Result<()>
where
	C: UpstreamHttpClient,
{
	#[cfg(feature = "tracing")]
	if let Ok(addr) = listener.local_addr() {
		tracing::info!(%addr, path = RELAY_PATH, "Relay listening.");
	}

	axum::serve(listener, router(relay)).with_graceful_shutdown(shutdown_signal()).await
}

/// Binds `addr` and serves the relay until Ctrl-C.
pub async fn serve<C>(relay: Arc<Relay<C>>, addr: SocketAddr) -> std::io::Result<()>
where
	C: UpstreamHttpClient,
{
	serve_listener(relay, TcpListener::bind(addr).await?).await
}

async fn relay_webhook<C>(
	State(relay): State<Arc<Relay<C>>>,
	method: Method,
	headers: HeaderMap,
	body: Bytes,
) -> RelayResponse
where
	C: UpstreamHttpClient,
{
	let webhook_secret = headers
		.get(WEBHOOK_SECRET_HEADER)
		.and_then(|value| value.to_str().ok())
		.map(str::to_owned);
	let body = InboundBody::Raw(String::from_utf8_lossy(&body).into_owned());

	relay.handle(InboundRequest::new(method, webhook_secret, body)).await
}

async fn shutdown_signal() {
	if tokio::signal::ctrl_c().await.is_err() {
		// Without a signal handler the server runs until the process is killed.
		std::future::pending::<()>().await;
	}

	#[cfg(feature = "tracing")]
	tracing::info!("Shutdown signal received.");
}

impl IntoResponse for RelayResponse {
	fn into_response(self) -> Response {
		let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

		(status, Json(self.body)).into_response()
	}
}
