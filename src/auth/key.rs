//! Validated API key sent with every request.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, error::ConfigError};

const API_KEY_MAX_LEN: usize = 128;

/// Caller-supplied API key forwarded in the `X-API-Key` header and the token `sub` claim.
///
/// Construction rejects values that could not travel in an HTTP header, so header
/// assembly never fails on the key itself.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApiKey(String);
impl ApiKey {
	/// Validates and wraps an API key.
	pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
		let value = value.into();

		validate(&value)?;

		Ok(Self(value))
	}

	/// Returns the raw key. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Deref for ApiKey {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for ApiKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl TryFrom<String> for ApiKey {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl Debug for ApiKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ApiKey").field(&"<redacted>").finish()
	}
}

fn validate(value: &str) -> Result<(), ConfigError> {
	if value.is_empty() {
		return Err(ConfigError::InvalidApiKey { reason: "empty" });
	}
	if value.len() > API_KEY_MAX_LEN {
		return Err(ConfigError::InvalidApiKey { reason: "longer than 128 characters" });
	}
	if !value.bytes().all(|b| b.is_ascii_graphic()) {
		return Err(ConfigError::InvalidApiKey { reason: "contains non-printable characters" });
	}

	Ok(())
}
