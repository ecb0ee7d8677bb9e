//! Redacted wrapper for per-request bearer tokens.

// self
use crate::_prelude::*;

/// Short-lived token bound to one request's path and body.
///
/// The client never parses or caches it; the value is forwarded verbatim in the
/// `Authorization` header and dropped once the call completes.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedToken(String);
impl SignedToken {
	/// Wraps a token string produced by a signer.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the token. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Formats the `Authorization` header value.
	pub fn bearer(&self) -> String {
		format!("Bearer {}", self.0)
	}
}
impl AsRef<str> for SignedToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for SignedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SignedToken").field(&"<redacted>").finish()
	}
}
impl Display for SignedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
