//! Header assembly shared by every operation.

// crates.io
use http::header::{AUTHORIZATION, CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	auth::{ApiKey, SignedToken},
	client::RequestDescriptor,
	error::ConfigError,
};

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "x-api-key";
/// Header carrying the optional idempotency key on create calls.
pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

/// Builds the header set for one request.
///
/// Always sets `X-API-Key` and `Authorization: Bearer <token>`; adds `Idempotency-Key` when the
/// descriptor carries one and `Content-Type: application/json` for replace/modify calls.
pub fn assemble_headers(
	api_key: &ApiKey,
	token: &SignedToken,
	request: &RequestDescriptor,
) -> Result<HeaderMap, ConfigError> {
	let mut headers = HeaderMap::new();
	let mut authorization = header_value("Authorization", &token.bearer())?;

	authorization.set_sensitive(true);
	headers.insert(HeaderName::from_static(API_KEY_HEADER), header_value("X-API-Key", api_key)?);
	headers.insert(AUTHORIZATION, authorization);

	if let Some(key) = request.idempotency_key.as_deref() {
		headers.insert(
			HeaderName::from_static(IDEMPOTENCY_KEY_HEADER),
			header_value("Idempotency-Key", key)?,
		);
	}
	if request.sends_explicit_content_type() {
		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
	}

	Ok(headers)
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, ConfigError> {
	HeaderValue::from_str(value).map_err(|source| ConfigError::InvalidHeaderValue { name, source })
}
