//! Client-level error types shared across signing, transport, and response handling.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Prefix carried by every [`ApiError`] message ahead of the raw response body.
pub const API_ERROR_PREFIX: &str = "Got an error from fireblocks server: ";

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Server answered with a status code of 300 or above.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Transport failure (DNS, TCP, TLS, timeout), passed through untranslated.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Token signer could not produce a bearer token.
	#[error(transparent)]
	Signing(#[from] SigningError),
	/// Local configuration or header value problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}
impl Error {
	/// Returns the [`ApiError`] when the server rejected the call.
	pub fn as_api(&self) -> Option<&ApiError> {
		match self {
			Self::Api(e) => Some(e),
			_ => None,
		}
	}
}

/// Error response returned by the server.
///
/// The message always embeds the literal response body, and `code` carries the server's
/// `code` field when the body decoded to a JSON object that has one.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{message}")]
pub struct ApiError {
	/// HTTP status code of the response.
	pub status: u16,
	/// Server-provided error code, if any.
	pub code: Option<String>,
	/// Human-readable message including the raw response body.
	pub message: String,
}
impl ApiError {
	/// Builds an error from the raw body text and an optional server code.
	pub fn new(status: u16, body: &str, code: Option<String>) -> Self {
		Self { status, code, message: format!("{API_ERROR_PREFIX}{body}") }
	}

	/// Returns the raw response body embedded in the message.
	pub fn body(&self) -> &str {
		self.message.strip_prefix(API_ERROR_PREFIX).unwrap_or(&self.message)
	}
}

/// Transport-level failures surfaced without translation.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a failure.
	#[error(transparent)]
	Network {
		/// Transport-specific error, unmodified.
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Returns the original transport error so callers can downcast it.
	pub fn into_inner(self) -> BoxError {
		match self {
			Self::Network { source } => source,
		}
	}
}

/// Failures raised while deriving a bearer token.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// Private key material could not be loaded.
	#[error("Private key could not be loaded.")]
	InvalidKey {
		/// Underlying key parsing failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// Claims could not be encoded or signed.
	#[error("Token claims could not be signed.")]
	Encode {
		/// Underlying signing failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// Token expiry does not fit in a unix timestamp.
	#[error("Token expiry overflows when adding {validity} to the issue time.")]
	ExpiryOverflow {
		/// Validity window that could not be applied.
		validity: Duration,
	},
	/// Request body could not be serialized for hashing.
	#[error("Request body could not be serialized.")]
	Body(#[from] serde_json::Error),
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// API key is empty, too long, or contains non-printable characters.
	#[error("API key is invalid: {reason}.")]
	InvalidApiKey {
		/// Validation failure summary.
		reason: &'static str,
	},
	/// Base URL uses an unsupported scheme or has no host.
	#[error("Base URL is invalid: {url}.")]
	InvalidBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// Token validity window must be positive.
	#[error("Token validity window must be positive.")]
	NonPositiveTokenValidity,
	/// Token validity window exceeds the supported maximum.
	#[error("Token validity window must not exceed {max}.")]
	TokenValidityTooLong {
		/// Largest accepted validity window.
		max: Duration,
	},
	/// Request timeout must be positive.
	#[error("Request timeout must be positive.")]
	NonPositiveTimeout,
	/// A header value contains characters that HTTP does not allow.
	#[error("Header `{name}` contains an invalid value.")]
	InvalidHeaderValue {
		/// Header name.
		name: &'static str,
		/// Underlying header validation failure.
		#[source]
		source: http::header::InvalidHeaderValue,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
