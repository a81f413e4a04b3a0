#![cfg(feature = "server")]

mod common;

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use serde_json::{Value, json};
use tokio::net::TcpListener;
// self
use common::{TWEETS_PATH, WEBHOOK_SECRET};
use tweet_relay::{
	auth::WEBHOOK_SECRET_HEADER,
	reqwest::{Client, Method},
	server::{self, RELAY_PATH},
};

/// Starts the relay on an ephemeral loopback port and returns its endpoint URL.
async fn spawn_relay(upstream_url: &str) -> String {
	let relay = Arc::new(
		tweet_relay::relay::Relay::new(common::config_for(upstream_url))
			.expect("Relay should build for tests."),
	);
	let listener =
		TcpListener::bind("127.0.0.1:0").await.expect("Binding an ephemeral port should succeed.");
	let addr = listener.local_addr().expect("Bound listener should have an address.");

	tokio::spawn(server::serve_listener(relay, listener));

	format!("http://{addr}{RELAY_PATH}")
}

async fn send(
	method: Method,
	url: &str,
	secret: Option<&str>,
	body: impl Into<String>,
) -> (u16, Value) {
	let mut request = Client::new()
		.request(method, url)
		.header("content-type", "application/json")
		.body(body.into());

	if let Some(secret) = secret {
		request = request.header(WEBHOOK_SECRET_HEADER, secret);
	}

	let response = request.send().await.expect("Relay should answer.");
	let status = response.status().as_u16();
	let bytes = response.bytes().await.expect("Relay response body should be readable.");
	let body = serde_json::from_slice(&bytes).expect("Relay responses should be JSON.");

	(status, body)
}

#[tokio::test]
async fn non_post_methods_get_json_405() {
	let url = spawn_relay(&common::unreachable_url()).await;

	for method in [Method::GET, Method::PUT, Method::DELETE] {
		let (status, body) = send(method, &url, Some(WEBHOOK_SECRET), "").await;

		assert_eq!(status, 405);
		assert_eq!(body, json!({ "error": "Method not allowed" }));
	}
}

#[tokio::test]
async fn missing_or_wrong_secret_gets_401() {
	let url = spawn_relay(&common::unreachable_url()).await;
	let payload = json!({ "text": "hello" }).to_string();

	for secret in [None, Some("wrong")] {
		let (status, body) = send(Method::POST, &url, secret, payload.clone()).await;

		assert_eq!(status, 401);
		assert_eq!(body, json!({ "error": "Unauthorized" }));
	}
}

#[tokio::test]
async fn missing_text_gets_400() {
	let url = spawn_relay(&common::unreachable_url()).await;

	for payload in ["", "{}", r#"{"text":""}"#, r#"{"media_ids":["1"]}"#] {
		let (status, body) = send(Method::POST, &url, Some(WEBHOOK_SECRET), payload).await;

		assert_eq!(status, 400);
		assert_eq!(body, json!({ "error": "Missing text" }));
	}
}

#[tokio::test]
async fn malformed_body_gets_500() {
	let url = spawn_relay(&common::unreachable_url()).await;
	let (status, body) = send(Method::POST, &url, Some(WEBHOOK_SECRET), "{not json").await;

	assert_eq!(status, 500);
	assert!(body["error"].is_string());
}

#[tokio::test]
async fn valid_post_is_forwarded_end_to_end() {
	let upstream = MockServer::start_async().await;
	let created = json!({ "data": { "id": "99", "text": "from the webhook" } });
	let mock = upstream
		.mock_async(|when, then| {
			when.method(POST)
				.path(TWEETS_PATH)
				.header_exists("authorization")
				.json_body(json!({ "text": "from the webhook", "media": { "media_ids": ["5"] } }));
			then.status(201).json_body(created.clone());
		})
		.await;
	let url = spawn_relay(&upstream.url(TWEETS_PATH)).await;
	let payload = json!({ "text": "from the webhook", "media_ids": ["5", null] }).to_string();
	let (status, body) = send(Method::POST, &url, Some(WEBHOOK_SECRET), payload).await;

	assert_eq!(status, 200);
	assert_eq!(body, created);

	mock.assert_async().await;
}

#[tokio::test]
async fn upstream_forbidden_is_mirrored_over_http() {
	let upstream = MockServer::start_async().await;
	let mock = upstream
		.mock_async(|when, then| {
			when.method(POST).path(TWEETS_PATH);
			then.status(403).json_body(json!({ "detail": "forbidden" }));
		})
		.await;
	let url = spawn_relay(&upstream.url(TWEETS_PATH)).await;
	let payload = json!({ "text": "hello" }).to_string();
	let (status, body) = send(Method::POST, &url, Some(WEBHOOK_SECRET), payload).await;

	assert_eq!(status, 403);
	assert_eq!(body, json!({ "error": { "detail": "forbidden" } }));

	mock.assert_async().await;
}
