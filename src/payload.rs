//! Inbound body decoding, validation, and the outbound post payload.
//!
//! Webhook senders deliver the body either as an already parsed JSON value or as raw text.
//! [`InboundBody`] accepts both and decodes them uniformly into a [`TweetRequest`], which
//! [`TweetRequest::validate`] turns into the [`OutboundPayload`] sent upstream.

pub mod coerce;

// self
use crate::{_prelude::*, error::DecodeError};

/// Request body as delivered by the hosting layer.
#[derive(Clone, Debug, PartialEq)]
pub enum InboundBody {
	/// Body already parsed into JSON.
	Parsed(Value),
	/// Raw body text still to be parsed.
	Raw(String),
}
impl InboundBody {
	/// Decodes the body into a [`TweetRequest`].
	///
	/// Empty raw text and an already parsed `null` decode as an empty object; a parsed JSON
	/// string is parsed again as raw text. Text that parses to `null` has no fields to read and
	/// fails to decode. Other non-object documents carry no fields.
	pub fn decode(self) -> Result<TweetRequest> {
		let value = match self {
			Self::Parsed(Value::String(raw)) | Self::Raw(raw) => match parse_raw(&raw)? {
				Value::Null => return Err(DecodeError::InboundNull.into()),
				value => value,
			},
			Self::Parsed(value) => value,
		};

		match value {
			Value::Object(_) => serde_path_to_error::deserialize(value)
				.map_err(|source| DecodeError::InboundBody { source }.into()),
			_ => Ok(TweetRequest::default()),
		}
	}
}
impl From<Value> for InboundBody {
	fn from(value: Value) -> Self {
		Self::Parsed(value)
	}
}
impl From<String> for InboundBody {
	fn from(raw: String) -> Self {
		Self::Raw(raw)
	}
}
impl From<&str> for InboundBody {
	fn from(raw: &str) -> Self {
		Self::Raw(raw.to_owned())
	}
}

/// Strongly typed view of the inbound fields; both stay loose until validation.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TweetRequest {
	/// Post text, coerced to a string during validation.
	#[serde(default)]
	pub text: Option<Value>,
	/// Optional media identifiers; only an array is honored.
	#[serde(default)]
	pub media_ids: Option<Value>,
}
impl TweetRequest {
	/// Coerces `text`, filters `media_ids`, and builds the outbound payload.
	pub fn validate(self) -> Result<OutboundPayload> {
		let text = coerce::coerce_text(self.text.as_ref());

		if text.is_empty() {
			return Err(Error::MissingText);
		}

		let media_ids = match self.media_ids {
			Some(Value::Array(items)) => items.into_iter().filter(coerce::is_truthy).collect(),
			_ => Vec::new(),
		};

		Ok(OutboundPayload::new(text, media_ids))
	}
}

/// JSON body posted upstream.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutboundPayload {
	/// Post text.
	pub text: String,
	/// Attached media, omitted entirely when there is none.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub media: Option<OutboundMedia>,
}
impl OutboundPayload {
	/// Builds a payload, attaching `media` only when `media_ids` is non-empty.
	pub fn new(text: impl Into<String>, media_ids: Vec<Value>) -> Self {
		let media = (!media_ids.is_empty()).then_some(OutboundMedia { media_ids });

		Self { text: text.into(), media }
	}

	/// Encodes the payload as the upstream request body.
	pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
		serde_json::to_vec(self).map_err(|e| DecodeError::OutboundPayload(e).into())
	}
}

/// Media block of an [`OutboundPayload`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutboundMedia {
	/// Opaque media identifiers, forwarded unchanged.
	pub media_ids: Vec<Value>,
}

/// Decodes and validates `body` in one step.
pub fn validate(body: InboundBody) -> Result<OutboundPayload> {
	body.decode()?.validate()
}

fn parse_raw(raw: &str) -> Result<Value, DecodeError> {
	let raw = if raw.is_empty() { "{}" } else { raw };
	let mut deserializer = serde_json::Deserializer::from_str(raw);
	let value = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| DecodeError::InboundBody { source })?;

	deserializer.end().map_err(DecodeError::InboundTrailing)?;

	Ok(value)
}
