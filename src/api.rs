//! Wire envelope and request descriptions for the backend API.
//!
//! Every backend endpoint wraps its payload in a `{success, message, data}`
//! JSON envelope. [`Envelope`] models it, [`decode_envelope`] parses it with
//! path-aware diagnostics, and [`ApiCall`] describes one endpoint invocation
//! independently of the base URL so the send core can re-resolve it against a
//! fallback candidate or retry it with a fresh bearer.

pub mod models;

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	http::{ApiRequest, Method, RawResponse},
};

/// Response envelope shared by every backend endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct Envelope<T> {
	/// Whether the backend treated the request as successful.
	#[serde(default)]
	pub success: bool,
	/// Human-readable message accompanying failures and some successes.
	#[serde(default)]
	pub message: Option<String>,
	/// Payload, present on success for data-bearing endpoints.
	#[serde(default = "Option::default")]
	pub data: Option<T>,
}
impl<T> Envelope<T> {
	/// Collapses the envelope into its payload.
	///
	/// `success: false` and a success envelope missing its payload both
	/// surface as [`Error::Api`] carrying the server message when present,
	/// otherwise `fallback`.
	pub fn require_data(self, status: u16, fallback: &str) -> Result<T> {
		if !self.success {
			return Err(self.failure(status, fallback));
		}

		match self.data {
			Some(data) => Ok(data),
			None => Err(Error::Api { message: fallback.into(), status: Some(status) }),
		}
	}

	/// Collapses an acknowledgement-style envelope, yielding the server message.
	pub fn acknowledge(self, status: u16, fallback: &str) -> Result<Option<String>> {
		if self.success { Ok(self.message) } else { Err(self.failure(status, fallback)) }
	}

	fn failure(self, status: u16, fallback: &str) -> Error {
		let message = self.message.filter(|m| !m.is_empty()).unwrap_or_else(|| fallback.into());

		Error::Api { message, status: Some(status) }
	}
}

/// Decodes a raw response into a typed envelope, reporting the JSON path on failure.
pub fn decode_envelope<T>(response: &RawResponse) -> Result<Envelope<T>>
where
	T: serde::de::DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(&response.body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::Decode { source, status: Some(response.status) })
}

/// One endpoint invocation, independent of the base URL.
///
/// The send core resolves the call against the active endpoint per attempt,
/// so a fallback retry or a refreshed bearer never mutates the description.
#[derive(Clone)]
pub struct ApiCall {
	/// HTTP method.
	pub method: Method,
	/// Absolute path under the API base, e.g. `/api/wallet/balance`.
	pub path: String,
	/// Query parameters appended in order.
	pub query: Vec<(String, String)>,
	/// JSON body, when present.
	pub body: Option<serde_json::Value>,
}
impl ApiCall {
	/// Describes a GET call.
	pub fn get(path: impl Into<String>) -> Self {
		Self { method: Method::Get, path: path.into(), query: Vec::new(), body: None }
	}

	/// Describes a POST call carrying a JSON body.
	pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
		Self { method: Method::Post, path: path.into(), query: Vec::new(), body: Some(body) }
	}

	/// Describes a bodyless PUT call; attach a body with [`ApiCall::with_body`].
	pub fn put(path: impl Into<String>) -> Self {
		Self { method: Method::Put, path: path.into(), query: Vec::new(), body: None }
	}

	/// Appends one query parameter.
	pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));

		self
	}

	/// Attaches a JSON body.
	pub fn with_body(mut self, body: serde_json::Value) -> Self {
		self.body = Some(body);

		self
	}

	/// Resolves the call against a base endpoint into a transportable request.
	pub(crate) fn resolve(&self, base: &Url, timeout: Duration) -> Result<ApiRequest, ConfigError> {
		let mut url = base
			.join(&self.path)
			.map_err(|_| ConfigError::UnusableEndpoint { endpoint: base.to_string() })?;

		if !self.query.is_empty() {
			let mut pairs = url.query_pairs_mut();

			for (key, value) in &self.query {
				pairs.append_pair(key, value);
			}
		}

		let mut request = ApiRequest::new(self.method, url, timeout);

		if let Some(body) = &self.body {
			request = request.with_body(body.clone());
		}

		Ok(request)
	}
}
impl Debug for ApiCall {
	// Bodies can carry passwords; show shape only.
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiCall")
			.field("method", &self.method)
			.field("path", &self.path)
			.field("query", &self.query)
			.field("body", &self.body.as_ref().map(|_| "<redacted>"))
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::api::models::BalancePayload;

	fn raw(status: u16, body: &str) -> RawResponse {
		RawResponse { status, body: body.as_bytes().to_vec() }
	}

	#[test]
	fn success_envelope_yields_its_payload() {
		let envelope: Envelope<BalancePayload> =
			decode_envelope(&raw(200, r#"{"success":true,"data":{"balance":12500}}"#))
				.expect("Well-formed envelope should decode.");
		let payload = envelope
			.require_data(200, "Failed to fetch wallet balance")
			.expect("Success envelope should yield its payload.");

		assert_eq!(payload.balance, 12_500.0);
	}

	#[test]
	fn failure_envelope_surfaces_the_server_message() {
		let envelope: Envelope<BalancePayload> =
			decode_envelope(&raw(400, r#"{"success":false,"message":"Daily limit exceeded"}"#))
				.expect("Failure envelope should still decode.");
		let err = envelope
			.require_data(400, "Funding request failed")
			.expect_err("Failure envelope should not yield a payload.");

		assert_eq!(err.user_message("Funding request failed"), "Daily limit exceeded");
	}

	#[test]
	fn success_without_payload_falls_back_to_the_operation_message() {
		let envelope: Envelope<BalancePayload> =
			decode_envelope(&raw(200, r#"{"success":true}"#))
				.expect("Payload-free envelope should decode.");
		let err = envelope
			.require_data(200, "Failed to fetch wallet balance")
			.expect_err("Missing payload should be reported.");

		assert!(matches!(err, Error::Api { ref message, .. } if message == "Failed to fetch wallet balance"));
	}

	#[test]
	fn acknowledgement_keeps_the_server_message() {
		let envelope: Envelope<serde_json::Value> = decode_envelope(&raw(
			200,
			r#"{"success":true,"message":"All notifications marked as read"}"#,
		))
		.expect("Acknowledgement envelope should decode.");
		let message = envelope
			.acknowledge(200, "Failed to update notifications")
			.expect("Success acknowledgement should pass.");

		assert_eq!(message.as_deref(), Some("All notifications marked as read"));
	}

	#[test]
	fn malformed_envelope_reports_the_json_path() {
		let err = decode_envelope::<BalancePayload>(&raw(200, r#"{"success":true,"data":{"balance":"soon"}}"#))
			.expect_err("Type mismatch should fail decoding.");

		match err {
			Error::Decode { source, status } => {
				assert_eq!(status, Some(200));
				assert_eq!(source.path().to_string(), "data.balance");
			},
			other => panic!("Expected a decode failure, got {other:?}."),
		}
	}

	#[test]
	fn calls_resolve_against_a_base_endpoint() {
		let base = Url::parse("https://api.example.com").expect("Base fixture should parse.");
		let call = ApiCall::get("/api/services/tv-customer")
			.with_query("provider", "gotv")
			.with_query("smartcard", "1234567890");
		let request =
			call.resolve(&base, Duration::seconds(20)).expect("Resolution should succeed.");

		assert_eq!(
			request.url.as_str(),
			"https://api.example.com/api/services/tv-customer?provider=gotv&smartcard=1234567890",
		);
	}

	#[test]
	fn call_debug_redacts_bodies() {
		let call = ApiCall::post(
			"/api/auth/login",
			serde_json::json!({ "email": "a@b.co", "password": "hunter22" }),
		);
		let rendered = format!("{call:?}");

		assert!(rendered.contains("<redacted>"));
		assert!(!rendered.contains("hunter22"));
	}
}
