//! Transport primitives for backend API calls.
//!
//! The module exposes [`HttpTransport`] over a crate-local [`ApiRequest`] /
//! [`RawResponse`] pair so downstream crates can plug in custom HTTP stacks
//! (proxied, recorded, or embedded) without touching the client's retry,
//! refresh, or cancellation policies. [`ReqwestTransport`] is the default
//! implementation behind the `reqwest` feature.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, auth::TokenSecret, error::TransportError};

/// Boxed request future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing backend API calls.
///
/// The trait is the client's only dependency on an HTTP stack. Implementations
/// must enforce the per-request deadline carried by [`ApiRequest::timeout`]
/// and map transport failures into [`TransportError`]; everything above this
/// seam (bearer retry, endpoint fallback, cancellation) is transport-agnostic.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes one request and resolves with the raw status and body bytes.
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_>;
}

/// HTTP method subset used by the backend API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
	/// Idempotent read.
	Get,
	/// Creation or action submission.
	Post,
	/// In-place update.
	Put,
}
impl Method {
	/// Canonical wire label.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
			Self::Put => "PUT",
		}
	}
}

/// One backend API request, fully resolved against a base URL.
#[derive(Clone)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute request URL including query parameters.
	pub url: Url,
	/// Bearer credential attached as `Authorization`, when present.
	pub bearer: Option<TokenSecret>,
	/// JSON body, when present.
	pub body: Option<serde_json::Value>,
	/// Per-request deadline enforced by the transport.
	pub timeout: Duration,
}
impl ApiRequest {
	/// Builds a bare request; callers attach bearer/body as needed.
	pub fn new(method: Method, url: Url, timeout: Duration) -> Self {
		Self { method, url, bearer: None, body: None, timeout }
	}

	/// Attaches a bearer credential.
	pub fn with_bearer(mut self, bearer: TokenSecret) -> Self {
		self.bearer = Some(bearer);

		self
	}

	/// Attaches a JSON body.
	pub fn with_body(mut self, body: serde_json::Value) -> Self {
		self.body = Some(body);

		self
	}
}
impl Debug for ApiRequest {
	// Bodies can carry passwords and the bearer is credential material.
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiRequest")
			.field("method", &self.method)
			.field("url", &self.url.as_str())
			.field("bearer", &self.bearer)
			.field("body", &self.body.as_ref().map(|_| "<redacted>"))
			.field("timeout", &self.timeout)
			.finish()
	}
}

/// Raw transport response before envelope decoding.
#[derive(Clone, Debug)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Body bytes as received.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// True for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one
/// place. The client passes every policy decision (deadline, bearer, body)
/// through [`ApiRequest`], so a custom [`ReqwestClient`] only needs connection
/// concerns (proxies, TLS, pools) configured on it.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			let timeout = request.timeout;
			let mut builder = match request.method {
				Method::Get => self.0.get(request.url.clone()),
				Method::Post => self.0.post(request.url.clone()),
				Method::Put => self.0.put(request.url.clone()),
			}
			.timeout(timeout.unsigned_abs());

			if let Some(bearer) = &request.bearer {
				builder = builder.bearer_auth(bearer.expose());
			}
			if let Some(body) = &request.body {
				builder = builder.json(body);
			}

			let response =
				builder.send().await.map_err(|e| classify_reqwest_error(e, timeout))?;
			let status = response.status().as_u16();
			let body = response
				.bytes()
				.await
				.map_err(|e| classify_reqwest_error(e, timeout))?
				.to_vec();

			Ok(RawResponse { status, body })
		})
	}
}

#[cfg(feature = "reqwest")]
fn classify_reqwest_error(e: ReqwestError, timeout: Duration) -> TransportError {
	if e.is_timeout() {
		TransportError::Timeout { timeout }
	} else {
		TransportError::network(e)
	}
}
