//! Client configuration with validated construction.

// self
use crate::{_prelude::*, error::ConfigError};

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::seconds(20);
/// Default quiet period before a smartcard edit is validated and looked up.
pub const DEFAULT_SMARTCARD_DEBOUNCE: Duration = Duration::milliseconds(500);
/// Default quiet period before a user search query is sent.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::milliseconds(300);
/// Default minimum query length for the admin user search.
pub const DEFAULT_SEARCH_MIN_CHARS: usize = 3;
/// Default lifetime of a cached TV variation catalog.
pub const DEFAULT_VARIATIONS_TTL: Duration = Duration::hours(1);
/// Default lifetime of a cached smartcard customer lookup.
pub const DEFAULT_CUSTOMER_TTL: Duration = Duration::minutes(30);
/// Default lifetime of a transient alert before it dismisses itself.
pub const DEFAULT_ALERT_TTL: Duration = Duration::seconds(5);

/// Immutable client configuration consumed by flows.
///
/// Construct through [`ClientConfig::builder`]; validation rejects empty
/// endpoint lists, endpoints that cannot anchor relative paths, and
/// non-positive durations.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// API base endpoints, in preference order.
	pub endpoints: Vec<Url>,
	/// Per-request timeout.
	pub request_timeout: Duration,
	/// Quiet period before a smartcard edit is validated and looked up.
	pub smartcard_debounce: Duration,
	/// Quiet period before a user search query is sent.
	pub search_debounce: Duration,
	/// Minimum query length for the admin user search.
	pub search_min_chars: usize,
	/// Lifetime of a cached TV variation catalog.
	pub variations_ttl: Duration,
	/// Lifetime of a cached smartcard customer lookup.
	pub customer_ttl: Duration,
	/// Lifetime of a transient alert before it dismisses itself.
	pub alert_ttl: Duration,
}
impl ClientConfig {
	/// Creates a builder seeded with the default tunables and no endpoints.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::new()
	}

	/// Creates a validated configuration with one endpoint and default tunables.
	pub fn single_endpoint(endpoint: Url) -> Result<Self, ConfigError> {
		Self::builder().endpoint(endpoint).build()
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.endpoints.is_empty() {
			return Err(ConfigError::NoEndpoints);
		}

		for endpoint in &self.endpoints {
			validate_endpoint(endpoint)?;
		}
		if !self.request_timeout.is_positive() {
			return Err(ConfigError::NonPositiveTimeout);
		}
		if !self.smartcard_debounce.is_positive() || !self.search_debounce.is_positive() {
			return Err(ConfigError::NonPositiveDebounce);
		}
		if !self.variations_ttl.is_positive()
			|| !self.customer_ttl.is_positive()
			|| !self.alert_ttl.is_positive()
		{
			return Err(ConfigError::NonPositiveTtl);
		}

		Ok(())
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Clone, Debug)]
pub struct ClientConfigBuilder {
	/// Endpoints accumulated so far, in preference order.
	pub endpoints: Vec<Url>,
	/// Per-request timeout.
	pub request_timeout: Duration,
	/// Quiet period before a smartcard edit is validated and looked up.
	pub smartcard_debounce: Duration,
	/// Quiet period before a user search query is sent.
	pub search_debounce: Duration,
	/// Minimum query length for the admin user search.
	pub search_min_chars: usize,
	/// Lifetime of a cached TV variation catalog.
	pub variations_ttl: Duration,
	/// Lifetime of a cached smartcard customer lookup.
	pub customer_ttl: Duration,
	/// Lifetime of a transient alert before it dismisses itself.
	pub alert_ttl: Duration,
}
impl ClientConfigBuilder {
	/// Creates a builder seeded with the default tunables.
	pub fn new() -> Self {
		Self {
			endpoints: Vec::new(),
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
			smartcard_debounce: DEFAULT_SMARTCARD_DEBOUNCE,
			search_debounce: DEFAULT_SEARCH_DEBOUNCE,
			search_min_chars: DEFAULT_SEARCH_MIN_CHARS,
			variations_ttl: DEFAULT_VARIATIONS_TTL,
			customer_ttl: DEFAULT_CUSTOMER_TTL,
			alert_ttl: DEFAULT_ALERT_TTL,
		}
	}

	/// Appends one endpoint candidate.
	pub fn endpoint(mut self, endpoint: Url) -> Self {
		self.endpoints.push(endpoint);

		self
	}

	/// Appends multiple endpoint candidates in order.
	pub fn endpoints<I>(mut self, endpoints: I) -> Self
	where
		I: IntoIterator<Item = Url>,
	{
		self.endpoints.extend(endpoints);

		self
	}

	/// Overrides the per-request timeout.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;

		self
	}

	/// Overrides the smartcard debounce quiet period.
	pub fn smartcard_debounce(mut self, debounce: Duration) -> Self {
		self.smartcard_debounce = debounce;

		self
	}

	/// Overrides the user search debounce quiet period.
	pub fn search_debounce(mut self, debounce: Duration) -> Self {
		self.search_debounce = debounce;

		self
	}

	/// Overrides the minimum user search query length.
	pub fn search_min_chars(mut self, min_chars: usize) -> Self {
		self.search_min_chars = min_chars;

		self
	}

	/// Overrides the TV variation catalog lifetime.
	pub fn variations_ttl(mut self, ttl: Duration) -> Self {
		self.variations_ttl = ttl;

		self
	}

	/// Overrides the smartcard customer lookup lifetime.
	pub fn customer_ttl(mut self, ttl: Duration) -> Self {
		self.customer_ttl = ttl;

		self
	}

	/// Overrides the transient alert lifetime.
	pub fn alert_ttl(mut self, ttl: Duration) -> Self {
		self.alert_ttl = ttl;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let config = ClientConfig {
			endpoints: self.endpoints,
			request_timeout: self.request_timeout,
			smartcard_debounce: self.smartcard_debounce,
			search_debounce: self.search_debounce,
			search_min_chars: self.search_min_chars,
			variations_ttl: self.variations_ttl,
			customer_ttl: self.customer_ttl,
			alert_ttl: self.alert_ttl,
		};

		config.validate()?;

		Ok(config)
	}
}
impl Default for ClientConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

fn validate_endpoint(endpoint: &Url) -> Result<(), ConfigError> {
	// Relative call paths must be joinable, and a pre-attached query or
	// fragment would be silently dropped by that join.
	if endpoint.cannot_be_a_base() || endpoint.query().is_some() || endpoint.fragment().is_some() {
		Err(ConfigError::UnusableEndpoint { endpoint: endpoint.to_string() })
	} else {
		Ok(())
	}
}
