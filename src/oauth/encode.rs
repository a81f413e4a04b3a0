//! RFC 5849 canonicalization: percent-encoding, parameter normalization, base string.

// std
use std::borrow::Cow;
// self
use crate::_prelude::*;

/// Percent-encodes `value` per RFC 3986, leaving only `ALPHA / DIGIT / "-" / "." / "_" / "~"`.
pub fn percent_encode(value: &str) -> Cow<'_, str> {
	urlencoding::encode(value)
}

/// Encodes every pair, sorts by encoded key then encoded value, and joins as `k=v&k=v`.
pub fn normalize_parameters<K, V>(params: &[(K, V)]) -> String
where
	K: AsRef<str>,
	V: AsRef<str>,
{
	let mut encoded = params
		.iter()
		.map(|(key, value)| {
			(percent_encode(key.as_ref()).into_owned(), percent_encode(value.as_ref()).into_owned())
		})
		.collect::<Vec<_>>();

	encoded.sort();

	encoded.into_iter().map(|(key, value)| format!("{key}={value}")).collect::<Vec<_>>().join("&")
}

/// Base string URI: scheme, lowercase host, non-default port, and path; no query or fragment.
pub fn base_string_uri(url: &Url) -> String {
	let mut base = url.clone();

	base.set_query(None);
	base.set_fragment(None);

	base.to_string()
}

/// Builds `METHOD&encode(base uri)&encode(normalized parameters)`.
pub fn signature_base_string<K, V>(method: &Method, url: &Url, params: &[(K, V)]) -> String
where
	K: AsRef<str>,
	V: AsRef<str>,
{
	format!(
		"{}&{}&{}",
		method.as_str().to_ascii_uppercase(),
		percent_encode(&base_string_uri(url)),
		percent_encode(&normalize_parameters(params)),
	)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn percent_encode_keeps_only_unreserved_characters() {
		assert_eq!(percent_encode("AZaz09-._~"), "AZaz09-._~");
		assert_eq!(
			percent_encode("Ladies + Gentlemen, a signed OAuth request!"),
			"Ladies%20%2B%20Gentlemen%2C%20a%20signed%20OAuth%20request%21",
		);
		assert_eq!(percent_encode("a=b&c/d*"), "a%3Db%26c%2Fd%2A");
		assert_eq!(percent_encode("☃"), "%E2%98%83");
	}

	#[test]
	fn parameters_sort_by_key_then_value() {
		let params = [("b", "2"), ("a", "z"), ("a", "y"), ("a b", "x")];

		assert_eq!(normalize_parameters(&params), "a=y&a=z&a%20b=x&b=2");
	}

	#[test]
	fn base_uri_drops_query_fragment_and_default_port() {
		let url = Url::parse("HTTPS://API.Example.com:443/2/tweets?x=1#frag")
			.expect("Fixture URL should parse.");

		assert_eq!(base_string_uri(&url), "https://api.example.com/2/tweets");

		let url = Url::parse("http://example.com:8080/path").expect("Fixture URL should parse.");

		assert_eq!(base_string_uri(&url), "http://example.com:8080/path");
	}
}
