//! Webhook-triggered relay that authenticates a caller by shared secret, signs the post with
//! OAuth 1.0a, and forwards it to the X (Twitter) v2 tweets endpoint.
//!
//! The crate is one linear pipeline: authenticate, validate, sign, call, translate. Each
//! stage returns a [`Result`] and the first failure becomes the caller-visible response.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod payload;
pub mod relay;
#[cfg(feature = "server")] pub mod server;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError, Method};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(any(test, feature = "server"))] use color_eyre as _;
#[cfg(test)] use httpmock as _;
