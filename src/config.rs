//! Immutable client configuration and its validating builder.

// self
use crate::{
	_prelude::*,
	auth::{self, ApiKey, DEFAULT_TOKEN_VALIDITY},
	error::ConfigError,
};

/// Production API endpoint used when no base URL is supplied.
pub const DEFAULT_BASE_URL: &str = "https://api.fireblocks.io";

/// Settings fixed for the lifetime of a client.
///
/// Values are validated once by [`ClientConfigBuilder::build`] and only read afterwards;
/// there are no setters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	api_key: ApiKey,
	base_url: Url,
	timeout: Option<Duration>,
	token_validity: Duration,
}
impl ClientConfig {
	/// Creates a builder seeded with the provided API key.
	pub fn builder(api_key: impl Into<String>) -> ClientConfigBuilder {
		ClientConfigBuilder::new(api_key)
	}

	/// API key sent in `X-API-Key` and signed into every token.
	pub fn api_key(&self) -> &ApiKey {
		&self.api_key
	}

	/// Base URL every request path is resolved against.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Optional per-request timeout enforced by the transport.
	pub fn timeout(&self) -> Option<Duration> {
		self.timeout
	}

	/// Lifetime of each signed token.
	pub fn token_validity(&self) -> Duration {
		self.token_validity
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	api_key: String,
	base_url: Option<Url>,
	timeout: Option<Duration>,
	token_validity: Duration,
}
impl ClientConfigBuilder {
	/// Creates a new builder seeded with the provided API key.
	pub fn new(api_key: impl Into<String>) -> Self {
		Self {
			api_key: api_key.into(),
			base_url: None,
			timeout: None,
			token_validity: DEFAULT_TOKEN_VALIDITY,
		}
	}

	/// Overrides the base URL (defaults to [`DEFAULT_BASE_URL`]).
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Sets the request timeout forwarded to the transport.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Overrides the signed token lifetime (at most [`auth::MAX_TOKEN_VALIDITY`]).
	pub fn token_validity(mut self, validity: Duration) -> Self {
		self.token_validity = validity;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let api_key = ApiKey::new(self.api_key)?;
		let base_url = match self.base_url {
			Some(url) => url,
			None => Url::parse(DEFAULT_BASE_URL)
				.map_err(|_| ConfigError::InvalidBaseUrl { url: DEFAULT_BASE_URL.into() })?,
		};

		validate_base_url(&base_url)?;
		auth::validate_token_validity(self.token_validity)?;

		if self.timeout.is_some_and(|timeout| timeout <= Duration::ZERO) {
			return Err(ConfigError::NonPositiveTimeout);
		}

		Ok(ClientConfig {
			api_key,
			base_url,
			timeout: self.timeout,
			token_validity: self.token_validity,
		})
	}
}

fn validate_base_url(url: &Url) -> Result<(), ConfigError> {
	let scheme_ok = matches!(url.scheme(), "http" | "https");

	if !scheme_ok || url.host_str().is_none() || url.cannot_be_a_base() {
		Err(ConfigError::InvalidBaseUrl { url: url.to_string() })
	} else {
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_point_at_production() {
		let config = ClientConfig::builder("cfg-key").build().expect("Defaults should validate.");

		assert_eq!(config.api_key().expose(), "cfg-key");
		assert_eq!(config.base_url().as_str(), "https://api.fireblocks.io/");
		assert_eq!(config.timeout(), None);
		assert_eq!(config.token_validity(), DEFAULT_TOKEN_VALIDITY);
	}

	#[test]
	fn overrides_are_kept() {
		let config = ClientConfig::builder("cfg-key")
			.base_url(Url::parse("https://sandbox.example.com").expect("URL fixture should parse."))
			.timeout(Duration::seconds(10))
			.token_validity(Duration::seconds(25))
			.build()
			.expect("Overrides should validate.");

		assert_eq!(config.base_url().host_str(), Some("sandbox.example.com"));
		assert_eq!(config.timeout(), Some(Duration::seconds(10)));
		assert_eq!(config.token_validity(), Duration::seconds(25));
	}

	#[test]
	fn invalid_settings_are_rejected() {
		let err = ClientConfig::builder("")
			.build()
			.expect_err("Empty API keys should be rejected.");

		assert!(matches!(err, ConfigError::InvalidApiKey { .. }));

		let err = ClientConfig::builder("cfg-key")
			.base_url(Url::parse("ftp://files.example.com").expect("URL fixture should parse."))
			.build()
			.expect_err("Non-HTTP schemes should be rejected.");

		assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));

		let err = ClientConfig::builder("cfg-key")
			.token_validity(Duration::ZERO)
			.build()
			.expect_err("Zero validity should be rejected.");

		assert!(matches!(err, ConfigError::NonPositiveTokenValidity));

		let err = ClientConfig::builder("cfg-key")
			.token_validity(Duration::MAX)
			.build()
			.expect_err("Unbounded validity should be rejected.");

		assert!(matches!(err, ConfigError::TokenValidityTooLong { .. }));

		let err = ClientConfig::builder("cfg-key")
			.timeout(Duration::seconds(-1))
			.build()
			.expect_err("Negative timeouts should be rejected.");

		assert!(matches!(err, ConfigError::NonPositiveTimeout));
	}
}
