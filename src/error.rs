//! Client-level error types shared across flows, transports, and stores.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Client-side rule violation; the request never reached the network.
	#[error(transparent)]
	Validation(#[from] crate::validate::FormIssues),

	/// Backend reported a failure envelope or an unexpected status.
	#[error("Backend rejected the request: {message}.")]
	Api {
		/// Server-supplied message, or a per-operation fallback.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Backend response could not be decoded as the expected envelope.
	#[error("Backend returned a malformed response.")]
	Decode {
		/// Structured parsing failure with the offending JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// No access token is present; the call was never issued.
	#[error("No access token is present; sign in first.")]
	Unauthenticated,
	/// The session could not be refreshed and has been cleared.
	#[error("Session has expired; sign in again.")]
	SessionExpired,
	/// The backend rejected the credentials outright; the session has been cleared.
	#[error("Access denied for this account; sign in again.")]
	Forbidden,
	/// The request was superseded by a newer one for the same operation.
	#[error("Request was superseded before completion.")]
	Aborted,
}
impl Error {
	/// True when the caller must route to the login entry point.
	pub fn requires_login(&self) -> bool {
		matches!(self, Self::Unauthenticated | Self::SessionExpired | Self::Forbidden)
	}

	/// True when the outcome must be dropped without any user-visible update.
	pub fn is_aborted(&self) -> bool {
		matches!(self, Self::Aborted)
	}

	/// Returns the server-supplied message verbatim when present, otherwise `fallback`.
	pub fn user_message(&self, fallback: &str) -> String {
		match self {
			Self::Api { message, .. } if !message.is_empty() => message.clone(),
			_ => fallback.into(),
		}
	}
}

/// Configuration failures raised while building the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Candidate endpoint list is empty.
	#[error("At least one backend endpoint candidate is required.")]
	NoEndpoints,
	/// Endpoint URL cannot serve as an API base.
	#[error("Endpoint `{endpoint}` cannot be used as an API base URL.")]
	UnusableEndpoint {
		/// Offending URL string.
		endpoint: String,
	},
	/// Request timeout must be positive.
	#[error("Request timeout must be positive.")]
	NonPositiveTimeout,
	/// Debounce window must be positive.
	#[error("Debounce window must be positive.")]
	NonPositiveDebounce,
	/// Cache TTL must be positive.
	#[error("Cache TTL must be positive.")]
	NonPositiveTtl,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for ConfigError {
	fn from(e: reqwest::Error) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, deadline).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the backend.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request exceeded its deadline.
	#[error("Request did not complete within {timeout}.")]
	Timeout {
		/// Deadline that elapsed.
		timeout: Duration,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the backend.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
