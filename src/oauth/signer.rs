//! HMAC-SHA1 signer producing OAuth 1.0a `Authorization` headers.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac, digest::Key};
use rand::{Rng, distr::Alphanumeric};
use sha1::{Digest, Sha1};
// self
use crate::{
	_prelude::*,
	oauth::{
		Credentials,
		encode::{self, percent_encode},
	},
};

type HmacSha1 = Hmac<Sha1>;

/// Value of `oauth_signature_method`.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// Value of `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";
/// Length of generated nonces.
pub const NONCE_LEN: usize = 32;

/// Signs outbound requests with a fixed set of [`Credentials`].
#[derive(Clone, Debug)]
pub struct Signer {
	credentials: Credentials,
}
impl Signer {
	/// Creates a signer bound to `credentials`.
	pub fn new(credentials: Credentials) -> Self {
		Self { credentials }
	}

	/// Signs a request whose body is not form-encoded, using a fresh nonce and timestamp.
	pub fn authorize(&self, method: &Method, url: &Url) -> Authorization {
		self.authorize_form::<&str, &str>(method, url, &[])
	}

	/// Signs a request carrying form-encoded body parameters.
	pub fn authorize_form<K, V>(
		&self,
		method: &Method,
		url: &Url,
		form: &[(K, V)],
	) -> Authorization
	where
		K: AsRef<str>,
		V: AsRef<str>,
	{
		self.authorize_with(method, url, form, generate_nonce(), OffsetDateTime::now_utc().unix_timestamp())
	}

	/// Signs with a caller-supplied nonce and timestamp.
	///
	/// Only reference vectors should pin these; live requests go through [`Self::authorize`].
	pub fn authorize_with<K, V>(
		&self,
		method: &Method,
		url: &Url,
		form: &[(K, V)],
		nonce: String,
		timestamp: i64,
	) -> Authorization
	where
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let mut oauth_params = BTreeMap::new();

		oauth_params.insert("oauth_consumer_key", self.credentials.consumer_key.clone());
		oauth_params.insert("oauth_nonce", nonce);
		oauth_params.insert("oauth_signature_method", SIGNATURE_METHOD.to_owned());
		oauth_params.insert("oauth_timestamp", timestamp.to_string());
		oauth_params.insert("oauth_token", self.credentials.token.clone());
		oauth_params.insert("oauth_version", OAUTH_VERSION.to_owned());

		let mut params = oauth_params
			.iter()
			.map(|(key, value)| ((*key).to_owned(), value.clone()))
			.collect::<Vec<_>>();

		params.extend(url.query_pairs().map(|(key, value)| (key.into_owned(), value.into_owned())));
		params.extend(
			form.iter().map(|(key, value)| (key.as_ref().to_owned(), value.as_ref().to_owned())),
		);

		let base_string = encode::signature_base_string(method, url, &params);
		let signature = self.sign(&base_string);

		oauth_params.insert("oauth_signature", signature);

		Authorization { params: oauth_params, base_string }
	}

	fn signing_key(&self) -> String {
		format!(
			"{}&{}",
			percent_encode(self.credentials.consumer_secret.expose()),
			percent_encode(self.credentials.token_secret.expose()),
		)
	}

	fn sign(&self, base_string: &str) -> String {
		let mut mac = <HmacSha1 as Mac>::new(&block_key(self.signing_key().as_bytes()));

		mac.update(base_string.as_bytes());

		STANDARD.encode(mac.finalize().into_bytes())
	}
}

/// Result of signing one request; valid for that request only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Authorization {
	/// Protocol parameters including `oauth_signature`, keyed and ordered by name.
	pub params: BTreeMap<&'static str, String>,
	/// Signature base string the signature was computed over.
	pub base_string: String,
}
impl Authorization {
	/// Renders the `Authorization` header value.
	pub fn header_value(&self) -> String {
		let pairs = self
			.params
			.iter()
			.map(|(key, value)| format!("{}=\"{}\"", percent_encode(key), percent_encode(value)))
			.collect::<Vec<_>>();

		format!("OAuth {}", pairs.join(", "))
	}

	/// The `oauth_nonce` used for this request.
	pub fn nonce(&self) -> &str {
		self.param("oauth_nonce")
	}

	/// The `oauth_timestamp` used for this request.
	pub fn timestamp(&self) -> &str {
		self.param("oauth_timestamp")
	}

	/// The base64 `oauth_signature`.
	pub fn signature(&self) -> &str {
		self.param("oauth_signature")
	}

	fn param(&self, name: &str) -> &str {
		self.params.get(name).map(String::as_str).unwrap_or_default()
	}
}

// Keys longer than the SHA-1 block are hashed first; shorter ones are zero padded.
fn block_key(key: &[u8]) -> Key<HmacSha1> {
	let mut block = Key::<HmacSha1>::default();

	if key.len() > block.len() {
		let digest = <Sha1 as Digest>::digest(key);

		block[..digest.len()].copy_from_slice(&digest);
	} else {
		block[..key.len()].copy_from_slice(key);
	}

	block
}

fn generate_nonce() -> String {
	rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	// Published HMAC-SHA1 reference request for the v1.1 status update endpoint.
	const REF_CONSUMER_KEY: &str = "xvz1evFS4wEEPTGEFPHBog";
	const REF_CONSUMER_SECRET: &str = "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw";
	const REF_TOKEN: &str = "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb";
	const REF_TOKEN_SECRET: &str = "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE";
	const REF_NONCE: &str = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";
	const REF_TIMESTAMP: i64 = 1318622958;

	fn reference_signer() -> Signer {
		Signer::new(Credentials::new(
			REF_CONSUMER_KEY,
			REF_CONSUMER_SECRET,
			REF_TOKEN,
			REF_TOKEN_SECRET,
		))
	}

	#[test]
	fn reproduces_reference_signature() {
		let url = Url::parse("https://api.twitter.com/1.1/statuses/update.json?include_entities=true")
			.expect("Reference URL should parse.");
		let form = [("status", "Hello Ladies + Gentlemen, a signed OAuth request!")];
		let authorization = reference_signer()
			.authorize_with(&Method::POST, &url, &form, REF_NONCE.into(), REF_TIMESTAMP);

		assert_eq!(
			authorization.base_string,
			"POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&include_entities%3Dtrue%26oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1318622958%26oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26oauth_version%3D1.0%26status%3DHello%2520Ladies%2520%252B%2520Gentlemen%252C%2520a%2520signed%2520OAuth%2520request%2521",
		);
		assert_eq!(authorization.signature(), "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
	}

	#[test]
	fn header_lists_sorted_encoded_oauth_params() {
		let url = Url::parse("https://api.twitter.com/2/tweets").expect("Endpoint URL should parse.");
		let authorization = reference_signer()
			.authorize_with::<&str, &str>(&Method::POST, &url, &[], REF_NONCE.into(), REF_TIMESTAMP);
		let header = authorization.header_value();
		let signature = percent_encode(authorization.signature()).into_owned();

		assert_eq!(
			header,
			format!(
				"OAuth oauth_consumer_key=\"{REF_CONSUMER_KEY}\", oauth_nonce=\"{REF_NONCE}\", oauth_signature=\"{signature}\", oauth_signature_method=\"HMAC-SHA1\", oauth_timestamp=\"{REF_TIMESTAMP}\", oauth_token=\"{REF_TOKEN}\", oauth_version=\"1.0\""
			),
		);
		assert!(
			authorization.base_string.starts_with("POST&https%3A%2F%2Fapi.twitter.com%2F2%2Ftweets&"),
		);
		assert!(!authorization.base_string.contains("status"));
	}

	#[test]
	fn each_authorization_draws_a_fresh_nonce_and_current_timestamp() {
		let url = Url::parse("https://api.twitter.com/2/tweets").expect("Endpoint URL should parse.");
		let signer = reference_signer();
		let before = OffsetDateTime::now_utc().unix_timestamp();
		let first = signer.authorize(&Method::POST, &url);
		let second = signer.authorize(&Method::POST, &url);
		let after = OffsetDateTime::now_utc().unix_timestamp();

		assert_ne!(first.nonce(), second.nonce());
		assert_ne!(first.header_value(), second.header_value());
		assert_eq!(first.nonce().len(), NONCE_LEN);
		assert!(first.nonce().chars().all(|c| c.is_ascii_alphanumeric()));

		let timestamp = first.timestamp().parse::<i64>().expect("Timestamp should be numeric.");

		assert!((before..=after).contains(&timestamp));
	}

	#[test]
	fn empty_credentials_still_sign() {
		let url = Url::parse("https://api.twitter.com/2/tweets").expect("Endpoint URL should parse.");
		let authorization = Signer::new(Credentials::default()).authorize(&Method::POST, &url);

		assert!(authorization.header_value().contains("oauth_consumer_key=\"\""));
		assert!(!authorization.signature().is_empty());
	}

	#[test]
	fn block_key_matches_hmac_key_schedule_for_any_length() {
		let base_string = "POST&https%3A%2F%2Fapi.twitter.com%2F2%2Ftweets&oauth_version%3D1.0";

		for secret_len in [0, 10, 31, 32, 80, 200] {
			let secret = "s".repeat(secret_len);
			let signer = Signer::new(Credentials::new("ck", secret.as_str(), "at", secret.as_str()));
			let mut reference = <HmacSha1 as Mac>::new_from_slice(signer.signing_key().as_bytes())
				.expect("HMAC should accept keys of any length.");

			reference.update(base_string.as_bytes());

			assert_eq!(
				signer.sign(base_string),
				STANDARD.encode(reference.finalize().into_bytes()),
				"Signature with {secret_len}-byte secrets should match the HMAC key schedule.",
			);
		}
	}
}
